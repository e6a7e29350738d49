#![forbid(unsafe_code)]

//! Browser binding of the matrix preloader.
//!
//! Expects the page to contain the overlay `#preloader` and the grid
//! container `#matrix`, with the `is-loading`, `fade-out`, `cell` and `on`
//! classes styled by the page. Links carrying `data-preload` play the
//! preloader before navigating.
//!
//! JS entry point (wasm32 only): `mount(optionsJson?)`.

mod error;
mod options;

#[cfg(target_arch = "wasm32")]
mod dom;

pub use error::MountError;
pub use options::{
    CELL_CLASS, FADE_OUT_CLASS, GRID_ID, LOADING_CLASS, ON_CLASS, OVERLAY_ID, PRELOAD_SELECTOR,
    WebOptions, WebTimings, grid_styles,
};

#[cfg(target_arch = "wasm32")]
pub use dom::mount;
