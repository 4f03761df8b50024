//! Character count hint.

use crate::aria::LiveRegion;

/// Character usage of a text value against a limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterCount {
    pub current: usize,
    pub max: usize,
}

impl CharacterCount {
    /// Count the characters of `text` (Unicode scalar values)
    pub fn new(text: &str, max: usize) -> Self {
        Self {
            current: text.chars().count(),
            max,
        }
    }

    pub fn remaining(&self) -> usize {
        self.max.saturating_sub(self.current)
    }

    pub fn overflow(&self) -> usize {
        self.current.saturating_sub(self.max)
    }

    pub fn is_over_limit(&self) -> bool {
        self.current > self.max
    }

    /// Fraction of the limit in use; a zero limit counts as full.
    pub fn ratio(&self) -> f32 {
        if self.max == 0 {
            1.0
        } else {
            self.current as f32 / self.max as f32
        }
    }

    /// Text for the count element
    pub fn message(&self) -> String {
        if self.is_over_limit() {
            let over = self.overflow();
            format!(
                "{} {} over the limit",
                over,
                if over == 1 { "character" } else { "characters" }
            )
        } else {
            format!("{} of {} characters used", self.current, self.max)
        }
    }

    /// How eagerly the count should be announced.
    ///
    /// Silent below `threshold` (a fraction of the limit), polite from there
    /// up to the limit, assertive past it.
    pub fn live_region(&self, threshold: f32) -> LiveRegion {
        if self.is_over_limit() {
            LiveRegion::Assertive
        } else if self.ratio() >= threshold {
            LiveRegion::Polite
        } else {
            LiveRegion::Off
        }
    }
}

impl std::fmt::Display for CharacterCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}
