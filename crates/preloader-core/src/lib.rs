//! Core types for the matrix preloader.
//!
//! Shared between the engine, the renderers and the configuration layer:
//! viewport geometry, sequence timings, the phase/mode vocabulary of the
//! sequencer and the timer queue every host drives.

mod sequence;
mod theme;
mod timer;
mod timings;
mod viewport;

pub use sequence::{Mode, Phase, ResizePolicy};
pub use theme::ColorTheme;
pub use timer::{TimerId, TimerQueue};
pub use timings::{ConfigValueError, DEFAULT_WORD, Timings, validate_word};
pub use viewport::{CellMetrics, NARROW_BREAKPOINT_PX, Viewport};
