//! Sequence and tick timings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Label word spelled across the grid columns.
pub const DEFAULT_WORD: &str = "sohmhos";

/// Errors for configuration values that would break the animation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValueError {
    #[error("label word must contain at least one character")]
    EmptyWord,
    #[error("tick delay range is empty: min {min}ms must be below max {max}ms")]
    EmptyTickRange { min: u64, max: u64 },
    #[error("sequence timings overflow: run {run}ms + freeze {freeze}ms + fade {fade}ms")]
    SequenceOverflow { run: u64, freeze: u64, fade: u64 },
}

/// Timings of the preloader sequence, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// How long the matrix animates before freezing.
    pub run_ms: u64,
    /// How long the frozen frame stays up.
    pub freeze_ms: u64,
    /// Duration of the overlay fade-out.
    pub fade_ms: u64,
    /// Debounce between a resize and the grid rebuild.
    pub resize_debounce_ms: u64,
    /// Lower bound (inclusive) of the delay between ticks.
    pub tick_min_ms: u64,
    /// Upper bound (exclusive) of the delay between ticks.
    pub tick_max_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            run_ms: 2000,
            freeze_ms: 100,
            fade_ms: 650,
            resize_debounce_ms: 120,
            tick_min_ms: 55,
            tick_max_ms: 140,
        }
    }
}

impl Timings {
    /// Check that the tick delay range is non-empty and the whole sequence
    /// fits in a millisecond counter.
    pub fn validate(&self) -> Result<(), ConfigValueError> {
        if self.tick_min_ms >= self.tick_max_ms {
            return Err(ConfigValueError::EmptyTickRange {
                min: self.tick_min_ms,
                max: self.tick_max_ms,
            });
        }
        let total = self
            .run_ms
            .checked_add(self.freeze_ms)
            .and_then(|t| t.checked_add(self.fade_ms));
        if total.is_none() {
            return Err(ConfigValueError::SequenceOverflow {
                run: self.run_ms,
                freeze: self.freeze_ms,
                fade: self.fade_ms,
            });
        }
        Ok(())
    }

    /// Time from sequence start until the overlay is fully faded (reveal mode).
    pub fn reveal_total_ms(&self) -> u64 {
        self.navigate_total_ms().saturating_add(self.fade_ms)
    }

    /// Time from sequence start until navigation happens (navigate mode).
    pub fn navigate_total_ms(&self) -> u64 {
        self.run_ms.saturating_add(self.freeze_ms)
    }
}

/// Check that a label word is usable as grid column labels.
pub fn validate_word(word: &str) -> Result<(), ConfigValueError> {
    if word.chars().next().is_none() {
        return Err(ConfigValueError::EmptyWord);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timings() {
        let t = Timings::default();
        assert_eq!(t.reveal_total_ms(), 2750);
        assert_eq!(t.navigate_total_ms(), 2100);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_empty_tick_range_rejected() {
        let t = Timings {
            tick_min_ms: 100,
            tick_max_ms: 100,
            ..Timings::default()
        };
        assert_eq!(
            t.validate(),
            Err(ConfigValueError::EmptyTickRange { min: 100, max: 100 })
        );
    }

    #[test]
    fn test_sequence_overflow_rejected() {
        let t = Timings {
            run_ms: u64::MAX,
            ..Timings::default()
        };
        assert_eq!(
            t.validate(),
            Err(ConfigValueError::SequenceOverflow {
                run: u64::MAX,
                freeze: 100,
                fade: 650,
            })
        );
        assert_eq!(t.reveal_total_ms(), u64::MAX);
    }

    #[test]
    fn test_validate_word() {
        assert!(validate_word(DEFAULT_WORD).is_ok());
        assert_eq!(validate_word(""), Err(ConfigValueError::EmptyWord));
    }
}
