//! Options passed from JavaScript and the DOM contract.

use preloader_core::{DEFAULT_WORD, ResizePolicy, Timings};
use preloader_engine::{EngineConfig, GridLayout};
use serde::Deserialize;

use crate::error::MountError;

/// Id of the full-screen overlay element.
pub const OVERLAY_ID: &str = "preloader";
/// Id of the grid container inside the overlay.
pub const GRID_ID: &str = "matrix";
/// Body class while the overlay is up.
pub const LOADING_CLASS: &str = "is-loading";
/// Overlay class that triggers the CSS fade.
pub const FADE_OUT_CLASS: &str = "fade-out";
/// Class of every grid cell.
pub const CELL_CLASS: &str = "cell";
/// Class of the active cell in a column.
pub const ON_CLASS: &str = "on";
/// Anchors intercepted for navigation.
pub const PRELOAD_SELECTOR: &str = "a[data-preload]";

/// Options accepted by `mount`, as JSON. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WebOptions {
    pub word: String,
    pub resize_policy: ResizePolicy,
    pub timings: WebTimings,
}

impl Default for WebOptions {
    fn default() -> Self {
        Self {
            word: DEFAULT_WORD.to_string(),
            resize_policy: ResizePolicy::default(),
            timings: WebTimings::default(),
        }
    }
}

/// [`Timings`] with JavaScript-style keys (`runMs`, `tickMinMs`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WebTimings {
    pub run_ms: u64,
    pub freeze_ms: u64,
    pub fade_ms: u64,
    pub resize_debounce_ms: u64,
    pub tick_min_ms: u64,
    pub tick_max_ms: u64,
}

impl Default for WebTimings {
    fn default() -> Self {
        Timings::default().into()
    }
}

impl From<Timings> for WebTimings {
    fn from(t: Timings) -> Self {
        Self {
            run_ms: t.run_ms,
            freeze_ms: t.freeze_ms,
            fade_ms: t.fade_ms,
            resize_debounce_ms: t.resize_debounce_ms,
            tick_min_ms: t.tick_min_ms,
            tick_max_ms: t.tick_max_ms,
        }
    }
}

impl From<WebTimings> for Timings {
    fn from(t: WebTimings) -> Self {
        Self {
            run_ms: t.run_ms,
            freeze_ms: t.freeze_ms,
            fade_ms: t.fade_ms,
            resize_debounce_ms: t.resize_debounce_ms,
            tick_min_ms: t.tick_min_ms,
            tick_max_ms: t.tick_max_ms,
        }
    }
}

impl WebOptions {
    /// Parse options JSON; `None` or blank input gives the defaults.
    pub fn parse(json: Option<&str>) -> Result<Self, MountError> {
        match json.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(json) => Ok(serde_json::from_str(json)?),
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            word: self.word.clone(),
            timings: self.timings.into(),
            resize_policy: self.resize_policy,
        }
    }
}

/// Inline style properties for the grid container.
pub fn grid_styles(layout: &GridLayout) -> [(&'static str, String); 5] {
    [
        (
            "grid-template-columns",
            format!("repeat({}, {}px)", layout.cols, layout.cell),
        ),
        (
            "grid-template-rows",
            format!("repeat({}, {}px)", layout.rows, layout.cell),
        ),
        ("column-gap", format!("{}px", layout.gap_x)),
        ("row-gap", format!("{}px", layout.gap_y)),
        ("font-size", format!("{}px", layout.font_size)),
    ]
}
