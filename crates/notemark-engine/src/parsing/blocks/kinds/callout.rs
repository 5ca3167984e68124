use std::sync::LazyLock;

use regex::Regex;

use crate::document::{CalloutAttrs, CalloutType};

static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[!([A-Za-z]+)\](?:\s+(.*?))?\s*$").expect("Invalid callout marker regex")
});

/// Callout syntax: a blockquote whose first line is `[!type] optional title`.
pub struct Callout;

impl Callout {
    /// Parses the marker from the first quote line with its `>` prefix removed.
    ///
    /// Unknown types are not callouts; the quote stays a plain blockquote.
    pub fn parse_marker(dedented: &str) -> Option<CalloutAttrs> {
        let caps = MARKER.captures(dedented)?;
        let callout_type = CalloutType::from_name(caps.get(1)?.as_str())?;
        let title = caps
            .get(2)
            .map(|m| m.as_str().trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        Some(CalloutAttrs {
            callout_type,
            title,
        })
    }
}
