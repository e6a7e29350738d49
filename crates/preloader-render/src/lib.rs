//! Terminal rendering for the matrix preloader.
//!
//! [`OverlaySurface`] is the terminal's stand-in for the overlay markup: it
//! receives the same layout, grid and highlight updates a DOM would, and
//! [`MatrixOverlay`] draws it with ratatui.

mod color;
mod surface;
mod widget;

pub use color::{blend, theme_color};
pub use surface::{OverlayState, OverlaySurface};
pub use widget::MatrixOverlay;
