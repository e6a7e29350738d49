//! Phase and mode vocabulary of the preloader sequence.

use serde::{Deserialize, Serialize};

/// Phase of the preloader sequence.
///
/// Reveal runs `Idle → Showing → Frozen → Fading → Done`; navigate runs
/// `Idle → Showing → Frozen → Navigating`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    #[default]
    Idle,
    /// Overlay visible, matrix ticking.
    Showing,
    /// Ticking stopped, last frame still on screen.
    Frozen,
    /// Overlay fading out.
    Fading,
    /// Overlay gone, content revealed.
    Done,
    /// Navigation issued with the overlay still covering the page.
    Navigating,
}

impl Phase {
    /// Is a sequence currently in flight?
    pub fn is_in_progress(self) -> bool {
        matches!(
            self,
            Phase::Showing | Phase::Frozen | Phase::Fading | Phase::Navigating
        )
    }
}

/// How a sequence ends.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Page-load entry: fade the overlay and reveal the content.
    Reveal,
    /// Link-intercept entry: navigate to `href` once frozen.
    Navigate { href: String },
}

impl Mode {
    /// Navigation target, if this is a navigate sequence.
    pub fn href(&self) -> Option<&str> {
        match self {
            Mode::Reveal => None,
            Mode::Navigate { href } => Some(href),
        }
    }
}

/// What happens to ticking after a debounced resize rebuild.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizePolicy {
    /// Rebuild the grid and leave it still until the sequence moves on.
    #[default]
    Freeze,
    /// Rebuild the grid and resume ticking while still showing.
    Resume,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_progress_phases() {
        assert!(!Phase::Idle.is_in_progress());
        assert!(Phase::Showing.is_in_progress());
        assert!(Phase::Frozen.is_in_progress());
        assert!(Phase::Fading.is_in_progress());
        assert!(Phase::Navigating.is_in_progress());
        assert!(!Phase::Done.is_in_progress());
    }

    #[test]
    fn test_mode_href() {
        assert_eq!(Mode::Reveal.href(), None);
        let mode = Mode::Navigate {
            href: "/about".to_string(),
        };
        assert_eq!(mode.href(), Some("/about"));
    }
}
