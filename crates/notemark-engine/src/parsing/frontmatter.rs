use crate::warnings::{Warning, WarningCode};

/// Frontmatter block type with owned delimiter constant.
pub struct Frontmatter;

impl Frontmatter {
    pub const DELIMITER: &'static str = "---";

    fn is_delimiter(line: &str) -> bool {
        line.trim_end() == Self::DELIMITER
    }
}

/// Lines left after frontmatter handling.
#[derive(Debug)]
pub struct Stripped<'a> {
    pub lines: Vec<&'a str>,
    /// 1-based line number of `lines[0]` in the original input.
    pub first_line_number: usize,
    pub frontmatter: Option<String>,
}

/// Removes a leading `---` … `---` block when `enabled`.
///
/// An unclosed block is left in place (nothing is discarded) and reported as
/// [`WarningCode::UnclosedFrontmatter`].
pub fn strip<'a>(lines: Vec<&'a str>, enabled: bool, warnings: &mut Vec<Warning>) -> Stripped<'a> {
    let unchanged = |lines: Vec<&'a str>| Stripped {
        lines,
        first_line_number: 1,
        frontmatter: None,
    };

    if !enabled || !lines.first().is_some_and(|l| Frontmatter::is_delimiter(l)) {
        return unchanged(lines);
    }

    let close = lines
        .iter()
        .skip(1)
        .position(|l| Frontmatter::is_delimiter(l))
        .map(|i| i + 1);
    let Some(close) = close else {
        log::warn!("frontmatter opened on line 1 is never closed; keeping it as content");
        warnings.push(
            Warning::new(
                WarningCode::UnclosedFrontmatter,
                "Frontmatter block is never closed",
            )
            .at_line(1)
            .with_suggestion("Add a closing `---` line after the metadata"),
        );
        return unchanged(lines);
    };

    let frontmatter = lines[1..close].join("\n");
    log::debug!("stripped {} frontmatter lines", close + 1);
    Stripped {
        lines: lines[close + 1..].to_vec(),
        first_line_number: close + 2,
        frontmatter: Some(frontmatter),
    }
}
