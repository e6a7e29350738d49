//! Pages behind the overlay and the default link behavior between them.

use preloader_config::{LinkConfig, PageConfig, SectionConfig};

/// Blank lines after each section so fragment jumps visibly scroll.
const SECTION_GAP: usize = 12;

/// All pages of the site.
#[derive(Debug, Clone)]
pub struct Site {
    pages: Vec<PageConfig>,
}

impl Site {
    pub fn new(pages: Vec<PageConfig>) -> Self {
        Self { pages }
    }

    /// Open the page at `href`, or a not-found page.
    ///
    /// A trailing `#fragment` is kept so the page can scroll to it.
    pub fn open(&self, href: &str) -> PageView {
        let (path, fragment) = match href.split_once('#') {
            Some((path, fragment)) => (path, Some(fragment.to_string())),
            None => (href, None),
        };
        let page = self
            .pages
            .iter()
            .find(|p| p.path == path)
            .cloned()
            .unwrap_or_else(|| not_found(href));

        let mut view = PageView::new(page);
        if let Some(id) = fragment {
            view.jump_to(&id);
        }
        view
    }
}

fn not_found(href: &str) -> PageConfig {
    PageConfig {
        path: href.to_string(),
        title: "Not found".to_string(),
        sections: vec![SectionConfig {
            id: "missing".to_string(),
            heading: "404".to_string(),
            body: format!("Nothing lives at {href}."),
        }],
        links: vec![LinkConfig {
            label: "Home".to_string(),
            href: Some("/".to_string()),
            preload: true,
        }],
    }
}

/// One line of a laid out page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocLine {
    Title,
    Blank,
    Link(usize),
    Heading(usize),
    Body(usize),
}

/// A loaded page with its scroll position, fragment and link focus.
#[derive(Debug, Clone)]
pub struct PageView {
    page: PageConfig,
    lines: Vec<DocLine>,
    scroll: usize,
    fragment: Option<String>,
    selected: usize,
}

impl PageView {
    pub fn new(page: PageConfig) -> Self {
        let lines = layout(&page);
        Self {
            page,
            lines,
            scroll: 0,
            fragment: None,
            selected: 0,
        }
    }

    pub fn page(&self) -> &PageConfig {
        &self.page
    }

    pub fn lines(&self) -> &[DocLine] {
        &self.lines
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    /// Drop the fragment and go back to the top.
    pub fn reset_location(&mut self) {
        self.fragment = None;
        self.scroll = 0;
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let max = self.lines.len().saturating_sub(1);
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
    }

    /// Scroll to the section with `id`. Unknown ids leave the scroll alone.
    pub fn jump_to(&mut self, id: &str) -> bool {
        let Some(section) = self.page.sections.iter().position(|s| s.id == id) else {
            return false;
        };
        let line = self
            .lines
            .iter()
            .position(|l| *l == DocLine::Heading(section))
            .unwrap_or(0);
        self.scroll = line;
        self.fragment = Some(id.to_string());
        true
    }

    /// Index of the link drawn on document line `line`.
    pub fn link_at_line(&self, line: usize) -> Option<usize> {
        match self.lines.get(line)? {
            DocLine::Link(idx) => Some(*idx),
            _ => None,
        }
    }

    pub fn link(&self, idx: usize) -> Option<&LinkConfig> {
        self.page.links.get(idx)
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        let count = self.page.links.len();
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    pub fn select_prev(&mut self) {
        let count = self.page.links.len();
        if count > 0 {
            self.selected = (self.selected + count - 1) % count;
        }
    }

    pub fn select(&mut self, idx: usize) {
        if idx < self.page.links.len() {
            self.selected = idx;
        }
    }
}

fn layout(page: &PageConfig) -> Vec<DocLine> {
    let mut lines = vec![DocLine::Title, DocLine::Blank];
    lines.extend((0..page.links.len()).map(DocLine::Link));
    lines.push(DocLine::Blank);
    for idx in 0..page.sections.len() {
        lines.push(DocLine::Heading(idx));
        lines.push(DocLine::Body(idx));
        lines.extend(std::iter::repeat_n(DocLine::Blank, SECTION_GAP));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use preloader_config::default_pages;

    fn site() -> Site {
        Site::new(default_pages())
    }

    #[test]
    fn test_open_known_page() {
        let view = site().open("/work");
        assert_eq!(view.page().title, "Work");
        assert_eq!(view.scroll(), 0);
        assert_eq!(view.fragment(), None);
    }

    #[test]
    fn test_open_unknown_page() {
        let view = site().open("/archive");
        assert_eq!(view.page().title, "Not found");
        assert_eq!(view.link(0).and_then(|l| l.href.as_deref()), Some("/"));
    }

    #[test]
    fn test_open_with_fragment_scrolls() {
        let view = site().open("/work#beta");
        assert_eq!(view.fragment(), Some("beta"));
        assert_eq!(view.lines()[view.scroll()], DocLine::Heading(1));
    }

    #[test]
    fn test_jump_and_reset() {
        let mut view = site().open("/");
        assert!(view.jump_to("contact"));
        assert!(view.scroll() > 0);
        assert!(!view.jump_to("nowhere"));
        assert_eq!(view.fragment(), Some("contact"));

        view.reset_location();
        assert_eq!(view.scroll(), 0);
        assert_eq!(view.fragment(), None);
    }

    #[test]
    fn test_link_lines() {
        let view = site().open("/");
        assert_eq!(view.link_at_line(0), None);
        assert_eq!(view.link_at_line(2), Some(0));
        assert_eq!(view.link_at_line(6), Some(4));
        assert_eq!(view.link_at_line(7), None);
    }

    #[test]
    fn test_selection_wraps() {
        let mut view = site().open("/about");
        view.select_prev();
        assert_eq!(view.selected(), 1);
        view.select_next();
        assert_eq!(view.selected(), 0);
        view.select(9);
        assert_eq!(view.selected(), 0);
    }

    #[test]
    fn test_scroll_is_bounded() {
        let mut view = site().open("/about");
        view.scroll_by(-5);
        assert_eq!(view.scroll(), 0);
        view.scroll_by(1000);
        assert_eq!(view.scroll(), view.lines().len() - 1);
    }
}
