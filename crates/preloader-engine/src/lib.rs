//! Preloader controller for the matrix loading animation.
//!
//! The [`Controller`] owns all animation state: the responsive layout, the
//! grid of labeled cells with one active cell per column, the randomized
//! tick loop and the sequencer that plays the overlay on page load or
//! before an intercepted navigation. Visual effects go through the
//! [`Host`] trait; time advances only when the host calls
//! [`Controller::advance_to`].

mod controller;
mod driver;
mod grid;
mod host;
mod layout;
mod link;
mod sequencer;

pub use controller::{Controller, EngineConfig};
pub use driver::{Move, next_delay, next_row, tick};
pub use grid::{Cell, Grid};
pub use host::Host;
pub use layout::{GridLayout, compute_layout, ticks_per_batch};
pub use link::{ClickAction, ClickOutcome, Link, classify};
pub use sequencer::{SequenceError, Sequencer, Step};
