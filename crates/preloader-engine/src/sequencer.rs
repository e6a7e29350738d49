//! Phase state machine of the preloader sequence.

use preloader_core::{Mode, Phase, Timings};
use thiserror::Error;

/// Errors when starting a sequence.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SequenceError {
    #[error("a preloader sequence is already in progress ({0:?})")]
    Busy(Phase),
    #[error("the preloader has been disposed")]
    Disposed,
}

/// A scheduled phase transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// `Showing → Frozen`.
    Freeze,
    /// `Frozen → Fading`.
    Fade,
    /// `Fading → Done`.
    Finish,
    /// `Frozen → Navigating`.
    Navigate,
}

impl Step {
    /// Delay between entering the previous phase and this transition.
    pub fn delay(self, timings: &Timings) -> u64 {
        match self {
            Step::Freeze => timings.run_ms,
            Step::Fade | Step::Navigate => timings.freeze_ms,
            Step::Finish => timings.fade_ms,
        }
    }
}

/// The sequencer state machine.
///
/// Each timer event fires exactly one [`Step`]; firing returns the step to
/// schedule next, if any.
#[derive(Debug, Default)]
pub struct Sequencer {
    phase: Phase,
    mode: Option<Mode>,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Mode of the current (or last) sequence.
    pub fn mode(&self) -> Option<&Mode> {
        self.mode.as_ref()
    }

    /// Enter `Showing` for `mode`, returning the first step to schedule.
    ///
    /// Rejected while another sequence is in progress.
    pub fn start(&mut self, mode: Mode) -> Result<Step, SequenceError> {
        if self.phase.is_in_progress() {
            return Err(SequenceError::Busy(self.phase));
        }
        self.phase = Phase::Showing;
        self.mode = Some(mode);
        Ok(Step::Freeze)
    }

    /// Apply `step` and return the step that follows it.
    ///
    /// Steps that do not match the current phase are ignored.
    pub fn fire(&mut self, step: Step) -> Option<Step> {
        let navigate = matches!(self.mode, Some(Mode::Navigate { .. }));
        let (phase, next) = match (self.phase, step) {
            (Phase::Showing, Step::Freeze) if navigate => (Phase::Frozen, Some(Step::Navigate)),
            (Phase::Showing, Step::Freeze) => (Phase::Frozen, Some(Step::Fade)),
            (Phase::Frozen, Step::Fade) if !navigate => (Phase::Fading, Some(Step::Finish)),
            (Phase::Frozen, Step::Navigate) if navigate => (Phase::Navigating, None),
            (Phase::Fading, Step::Finish) => (Phase::Done, None),
            (phase, step) => {
                tracing::debug!(?phase, ?step, "ignoring out-of-order sequence step");
                return None;
            }
        };
        tracing::debug!(from = ?self.phase, to = ?phase, "preloader phase");
        self.phase = phase;
        next
    }

    /// Return to `Idle`, forgetting the current mode.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.mode = None;
    }
}
