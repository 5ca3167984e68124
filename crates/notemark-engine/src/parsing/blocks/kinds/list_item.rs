use std::sync::LazyLock;

use regex::Regex;

static TASK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^( *)- \[([ xX])\] (.*)$").expect("Invalid task item regex"));
static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^( *)[-*] (.*)$").expect("Invalid bullet item regex"));
static ORDERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^( *)(\d+)\. (.*)$").expect("Invalid ordered item regex"));

/// Which kind of item a list line introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Task { checked: bool },
    Bullet,
    Ordered { number: u64 },
}

impl ItemKind {
    /// Bullet and ordered items share a list type with others of the same kind.
    pub fn same_list(self, other: ItemKind) -> bool {
        matches!(
            (self, other),
            (ItemKind::Task { .. }, ItemKind::Task { .. })
                | (ItemKind::Bullet, ItemKind::Bullet)
                | (ItemKind::Ordered { .. }, ItemKind::Ordered { .. })
        )
    }
}

/// A single list/task item line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListItemLine<'a> {
    pub kind: ItemKind,
    /// Nesting level: leading spaces / [`ListItemLine::INDENT_WIDTH`].
    pub level: usize,
    pub text: &'a str,
}

impl<'a> ListItemLine<'a> {
    pub const INDENT_WIDTH: usize = 2;

    /// Task items are tried before bullets, since every task line is also a
    /// valid bullet line.
    pub fn parse(line: &'a str) -> Option<Self> {
        if let Some(caps) = TASK.captures(line) {
            return Some(Self {
                kind: ItemKind::Task {
                    checked: caps[2].eq_ignore_ascii_case("x"),
                },
                level: caps[1].len() / Self::INDENT_WIDTH,
                text: caps.get(3)?.as_str(),
            });
        }
        if let Some(caps) = BULLET.captures(line) {
            return Some(Self {
                kind: ItemKind::Bullet,
                level: caps[1].len() / Self::INDENT_WIDTH,
                text: caps.get(2)?.as_str(),
            });
        }
        let caps = ORDERED.captures(line)?;
        Some(Self {
            kind: ItemKind::Ordered {
                // Only overflow can fail here: the regex admits digits alone.
                number: caps[2].parse().unwrap_or(u64::MAX),
            },
            level: caps[1].len() / Self::INDENT_WIDTH,
            text: caps.get(3)?.as_str(),
        })
    }
}
