//! Navigation state: current section index, bounds, and replay mode.

/// Whether a transition originates from normal input or from replaying a
/// browser history entry. While replaying, no new history entry may be
/// recorded; making this a mode (rather than a boolean side flag) keeps
/// the invariant visible at every use site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavMode {
    Normal,
    ReplayingHistory,
}

/// Navigation state for the viewer.
///
/// `current` is 0 until the first `show_section` call; afterwards it is
/// always within `[1, amount]` (or 1 when the document has no indexed
/// sections at all).
#[derive(Debug, Clone)]
pub struct NavState {
    /// Currently shown section index (1-based; 0 before startup).
    pub current: usize,
    /// Number of indexed sections.
    pub amount: usize,
    /// Normal input vs. history replay.
    pub mode: NavMode,
}

impl NavState {
    pub fn new() -> Self {
        Self {
            current: 0,
            amount: 0,
            mode: NavMode::Normal,
        }
    }

    /// Clamp a requested index into `[1, amount]`. Requests below 1 (or
    /// any request against an empty document) clamp to 1.
    pub fn clamp(&self, requested: i64) -> usize {
        requested.min(self.amount as i64).max(1) as usize
    }

    /// Whether a previous section exists.
    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    /// Whether a next section exists.
    pub fn has_next(&self) -> bool {
        self.current < self.amount
    }
}

impl Default for NavState {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a URL fragment as a section index, defaulting to 1.
///
/// Mirrors `parseInt`: optional sign, then leading decimal digits;
/// trailing garbage is ignored (`"3abc"` parses as 3). Anything without
/// a leading integer defaults to section 1 -- an explicit absent-value
/// check, never a NaN sentinel comparison.
pub fn parse_fragment(fragment: &str) -> i64 {
    leading_int(fragment.trim()).unwrap_or(1)
}

fn leading_int(text: &str) -> Option<i64> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Saturate instead of failing on absurdly long digit runs; the value
    // is clamped to the section range anyway.
    let value: i64 = digits[..end].parse().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}
