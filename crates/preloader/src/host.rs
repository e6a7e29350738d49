//! Terminal implementation of the preloader host.

use std::time::Instant;

use preloader_core::Viewport;
use preloader_engine::{Grid, GridLayout, Host};
use preloader_render::OverlaySurface;

use crate::site::PageView;

/// The terminal "document": overlay, loading state and the current page.
#[derive(Debug)]
pub struct TerminalHost {
    started: Instant,
    viewport: Viewport,
    overlay: OverlaySurface,
    /// Mirrors `body.is-loading`.
    loading: bool,
    page: PageView,
    pending_navigation: Option<String>,
}

impl TerminalHost {
    pub fn new(page: PageView) -> Self {
        Self {
            started: Instant::now(),
            viewport: Viewport::default(),
            overlay: OverlaySurface::new(),
            loading: false,
            page,
            pending_navigation: None,
        }
    }

    /// Milliseconds since the host was created.
    pub fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn overlay(&self) -> &OverlaySurface {
        &self.overlay
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn page(&self) -> &PageView {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut PageView {
        &mut self.page
    }

    /// Replace the current page, as a browser does when a navigation lands.
    pub fn load(&mut self, page: PageView) {
        self.page = page;
    }

    /// Navigation requested by the controller, if any.
    pub fn take_navigation(&mut self) -> Option<String> {
        self.pending_navigation.take()
    }
}

impl Host for TerminalHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn apply_layout(&mut self, layout: &GridLayout) {
        self.overlay.apply_layout(layout);
    }

    fn render_grid(&mut self, grid: &Grid) {
        self.overlay.render_grid(grid);
    }

    fn set_cell_active(&mut self, row: usize, col: usize, active: bool) {
        self.overlay.set_cell_active(row, col, active);
    }

    fn show_overlay(&mut self) {
        self.loading = true;
        self.overlay.show();
    }

    fn fade_overlay(&mut self) {
        let now = self.now_ms();
        self.overlay.fade(now);
    }

    fn hide_overlay(&mut self) {
        self.loading = false;
        self.overlay.hide();
    }

    fn reset_location(&mut self) {
        self.page.reset_location();
    }

    fn scroll_to_top(&mut self) {
        self.page.scroll_to_top();
    }

    fn navigate(&mut self, href: &str) {
        self.pending_navigation = Some(href.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::Site;
    use preloader_config::default_pages;

    fn host() -> TerminalHost {
        TerminalHost::new(Site::new(default_pages()).open("/#contact"))
    }

    #[test]
    fn test_overlay_lifecycle() {
        let mut host = host();
        host.show_overlay();
        assert!(host.is_loading());
        assert!(host.overlay().is_visible());

        host.fade_overlay();
        assert!(host.overlay().is_visible());
        host.hide_overlay();
        assert!(!host.is_loading());
        assert!(!host.overlay().is_visible());
    }

    #[test]
    fn test_reset_location_clears_fragment() {
        let mut host = host();
        assert_eq!(host.page().fragment(), Some("contact"));
        host.reset_location();
        assert_eq!(host.page().fragment(), None);
        assert_eq!(host.page().scroll(), 0);
    }

    #[test]
    fn test_navigation_is_taken_once() {
        let mut host = host();
        host.navigate("/work");
        assert_eq!(host.take_navigation().as_deref(), Some("/work"));
        assert_eq!(host.take_navigation(), None);
    }
}
