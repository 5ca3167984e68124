/// An opening fence line: its backtick count and language tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceOpen<'a> {
    pub len: usize,
    pub language: &'a str,
}

pub struct CodeFence;

impl CodeFence {
    pub const TICK: char = '`';
    pub const MIN_LEN: usize = 3;

    fn run_len(s: &str) -> usize {
        s.chars().take_while(|&c| c == Self::TICK).count()
    }

    /// Recognises an opening fence (three or more backticks).
    pub fn open(line: &str) -> Option<FenceOpen<'_>> {
        let t = line.trim_start();
        let len = Self::run_len(t);
        if len < Self::MIN_LEN {
            return None;
        }
        Some(FenceOpen {
            len,
            language: t[len..].trim(),
        })
    }

    /// Whether `line` closes a fence opened with `open`: only backticks, at
    /// least as many as the opener.
    pub fn closes(open: &FenceOpen<'_>, line: &str) -> bool {
        let t = line.trim();
        let len = Self::run_len(t);
        len >= open.len && len == t.len()
    }
}
