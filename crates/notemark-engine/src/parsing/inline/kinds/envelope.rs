use std::sync::LazyLock;

use regex::Regex;

use crate::document::{TagAttrs, WikiLinkAttrs, slugify};

use super::WikiLink;

static TAG_ENVELOPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^<!--\s*tag\s+id="([^"]*)"(?:\s+color="([^"]*)")?\s*-->#([\p{L}\p{N}][\p{L}\p{N}_-]*)<!--\s*/tag\s*-->"#,
    )
    .expect("Invalid tag envelope regex")
});

static WIKILINK_ENVELOPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^<!--\s*wikilink\s+id="([^"]*)"\s*-->\[\[([^\]\n]+)\]\]<!--\s*/wikilink\s*-->"#)
        .expect("Invalid wikilink envelope regex")
});

/// HTML-comment wrappers that carry already-resolved identifiers through a
/// plain-text export:
///
/// ```text
/// <!-- tag id="ID" color="COLOR" -->#name<!-- /tag -->
/// <!-- wikilink id="ID" -->[[Target|Display]]<!-- /wikilink -->
/// ```
///
/// Attribute values are HTML-escaped.
pub struct Envelope;

impl Envelope {
    pub const OPEN: &'static str = "<!--";

    /// Matches a tag envelope at the start of `rest`.
    pub fn tag(rest: &str) -> Option<(TagAttrs, usize)> {
        if !rest.starts_with(Self::OPEN) {
            return None;
        }
        let caps = TAG_ENVELOPE.captures(rest)?;
        let name = caps.get(3)?.as_str();
        let attrs = TagAttrs {
            id: caps.get(1).and_then(|m| attr_value(m.as_str())),
            name: name.to_string(),
            slug: slugify(name),
            color: caps.get(2).and_then(|m| attr_value(m.as_str())),
        };
        Some((attrs, caps.get(0)?.end()))
    }

    /// Matches a wiki-link envelope at the start of `rest`.
    pub fn wikilink(rest: &str) -> Option<(WikiLinkAttrs, usize)> {
        if !rest.starts_with(Self::OPEN) {
            return None;
        }
        let caps = WIKILINK_ENVELOPE.captures(rest)?;
        let mut attrs = WikiLink::parse_inner(caps.get(2)?.as_str())?;
        attrs.id = caps.get(1).and_then(|m| attr_value(m.as_str()));
        Some((attrs, caps.get(0)?.end()))
    }

    pub fn render_tag(attrs: &TagAttrs, id: &str) -> String {
        let color = attrs
            .color
            .as_deref()
            .map(|c| format!(" color=\"{}\"", escape(c)))
            .unwrap_or_default();
        format!(
            "<!-- tag id=\"{}\"{color} -->#{}<!-- /tag -->",
            escape(id),
            attrs.name
        )
    }

    pub fn render_wikilink(attrs: &WikiLinkAttrs, id: &str) -> String {
        format!(
            "<!-- wikilink id=\"{}\" -->{}<!-- /wikilink -->",
            escape(id),
            WikiLink::render(attrs)
        )
    }
}

fn attr_value(raw: &str) -> Option<String> {
    let value = html_escape::decode_html_entities(raw);
    (!value.is_empty()).then(|| value.into_owned())
}

fn escape(value: &str) -> String {
    html_escape::encode_double_quoted_attribute(value).into_owned()
}
