use crate::document::WikiLinkAttrs;

pub struct WikiLink;

impl WikiLink {
    pub const OPEN: &'static str = "[[";
    pub const CLOSE: &'static str = "]]";
    pub const ALIAS: char = '|';

    /// Matches `[[Target]]` or `[[Target|Display]]` at the start of `rest`.
    ///
    /// The link may not span lines. Returns unresolved attributes and the
    /// number of bytes consumed.
    pub fn match_at(rest: &str) -> Option<(WikiLinkAttrs, usize)> {
        let body = rest.strip_prefix(Self::OPEN)?;
        let close = body.find(Self::CLOSE)?;
        let inner = &body[..close];
        if inner.contains('\n') {
            return None;
        }
        let attrs = Self::parse_inner(inner)?;
        Some((attrs, Self::OPEN.len() + close + Self::CLOSE.len()))
    }

    /// Splits bracket content on the first `|`; an absent or blank display
    /// part means no display override.
    pub fn parse_inner(inner: &str) -> Option<WikiLinkAttrs> {
        let (target, display) = match inner.split_once(Self::ALIAS) {
            Some((target, display)) => (target.trim(), Some(display.trim())),
            None => (inner.trim(), None),
        };
        if target.is_empty() {
            return None;
        }
        Some(WikiLinkAttrs {
            id: None,
            target: target.to_string(),
            display: display.filter(|d| !d.is_empty()).map(str::to_string),
        })
    }

    /// The bracket form of `attrs`, without any envelope.
    pub fn render(attrs: &WikiLinkAttrs) -> String {
        match &attrs.display {
            Some(display) => format!(
                "{}{}{}{}{}",
                Self::OPEN,
                attrs.target,
                Self::ALIAS,
                display,
                Self::CLOSE
            ),
            None => format!("{}{}{}", Self::OPEN, attrs.target, Self::CLOSE),
        }
    }
}
