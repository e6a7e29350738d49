//! Terminal application: event loop, page rendering and link handling.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use preloader_config::Config;
use preloader_core::{CellMetrics, ColorTheme, Mode};
use preloader_engine::{ClickOutcome, Controller, EngineConfig, Link};
use preloader_render::{MatrixOverlay, OverlayState, theme_color};
use rand::{SeedableRng, rngs::SmallRng};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Stylize},
    text::Line,
    widgets::Paragraph,
};

use crate::{
    host::TerminalHost,
    site::{DocLine, PageView, Site},
};

/// Longest time to sleep in `event::poll` between redraws.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Redraw interval while the overlay is fading.
const FADE_FRAME: Duration = Duration::from_millis(16);

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    site: Site,
    metrics: CellMetrics,
    color_theme: ColorTheme,
    /// Area the page content was last drawn in, for mouse hit testing.
    content_area: Rect,
    controller: Controller<TerminalHost, SmallRng>,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> color_eyre::Result<Self> {
        let site = Site::new(config.pages.clone());
        let host = TerminalHost::new(site.open(&config.start_page));

        // Capture system time as seed for randomness
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        let engine = EngineConfig {
            word: config.word,
            timings: config.timings,
            resize_policy: config.resize_policy,
        };
        let controller = Controller::new(host, engine, SmallRng::seed_from_u64(seed))?;

        Ok(Self {
            running: false,
            site,
            metrics: config.cell_px,
            color_theme: config.color_theme,
            content_area: Rect::default(),
            controller,
        })
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        let viewport = self.metrics.viewport(size.width, size.height);
        self.controller.host_mut().set_viewport(viewport);

        self.running = true;
        let now = self.now_ms();
        self.controller.on_load(now);

        while self.running {
            self.advance();
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        self.controller.dispose();
        Ok(())
    }

    fn now_ms(&self) -> u64 {
        self.controller.host().now_ms()
    }

    /// Fire due timers and follow any navigation they issued.
    fn advance(&mut self) {
        let now = self.now_ms();
        self.controller.advance_to(now);
        if let Some(href) = self.controller.host_mut().take_navigation() {
            self.load_page(&href);
        }
    }

    /// Replace the page and play the page-load sequence on it.
    fn load_page(&mut self, href: &str) {
        tracing::info!(%href, "loading page");
        let view = self.site.open(href);
        self.controller.reset();
        self.controller.host_mut().load(view);
        let now = self.now_ms();
        self.controller.on_load(now);
    }

    /// How long to wait for input before the next timer is due.
    fn poll_timeout(&self) -> Duration {
        if matches!(
            self.controller.host().overlay().state(),
            OverlayState::Fading { .. }
        ) {
            return FADE_FRAME;
        }
        match self.controller.next_deadline() {
            Some(deadline) => {
                let wait = deadline.saturating_sub(self.now_ms());
                Duration::from_millis(wait).min(IDLE_POLL)
            }
            None => IDLE_POLL,
        }
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let color = theme_color(self.color_theme);
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Length(1), // Address bar
            Constraint::Fill(1),   // Page
            Constraint::Length(1), // Help text
        ])
        .split(area);

        let host = self.controller.host();
        let page = host.page();
        let address = match page.fragment() {
            Some(fragment) => format!("{}#{}", page.page().path, fragment),
            None => page.page().path.clone(),
        };
        let phase = format!("{:?}", self.controller.phase());
        let address_bar = Line::from(vec![
            " ".into(),
            address.fg(color),
            "  ".into(),
            phase.dark_gray(),
        ]);
        frame.render_widget(address_bar, chunks[0]);

        self.content_area = chunks[1];
        let lines: Vec<Line> = page
            .lines()
            .iter()
            .map(|line| page_line(page, *line, color))
            .collect();
        let scroll = u16::try_from(page.scroll()).unwrap_or(u16::MAX);
        frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), chunks[1]);

        let help = Line::from(vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "tab".bold().fg(color),
            " next link  ".dark_gray(),
            "enter".bold().fg(color),
            " follow  ".dark_gray(),
            "r".bold().fg(color),
            " replay  ".dark_gray(),
            "c".bold().fg(color),
            " cycle color".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, chunks[2]);

        let overlay = host.overlay();
        if overlay.is_visible() {
            let opacity = overlay.opacity(host.now_ms(), self.controller.timings().fade_ms);
            let widget = MatrixOverlay::new(overlay)
                .metrics(self.metrics)
                .theme(self.color_theme)
                .opacity(opacity);
            frame.render_widget(widget, area);
        }
    }

    /// Reads the crossterm events and updates the state of [`App`].
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.poll_timeout())? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(width, height) => self.on_resize(width, height),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('c')) => self.cycle_color_theme(),
            // The overlay covers the page while loading.
            _ if self.controller.host().is_loading() => {}
            (_, KeyCode::Tab | KeyCode::Down | KeyCode::Char('j')) => {
                self.page_mut().select_next();
            }
            (_, KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k')) => {
                self.page_mut().select_prev();
            }
            (_, KeyCode::PageDown) => self.page_mut().scroll_by(10),
            (_, KeyCode::PageUp) => self.page_mut().scroll_by(-10),
            (_, KeyCode::Enter) => {
                let selected = self.controller.host().page().selected();
                self.click_link(selected);
            }
            (_, KeyCode::Char('r')) => self.replay(),
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if self.controller.host().is_loading() {
            return;
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let area = self.content_area;
                if mouse.row < area.y || mouse.row >= area.bottom() {
                    return;
                }
                let page = self.controller.host().page();
                let line = page.scroll() + usize::from(mouse.row - area.y);
                if let Some(idx) = page.link_at_line(line) {
                    self.page_mut().select(idx);
                    self.click_link(idx);
                }
            }
            MouseEventKind::ScrollDown => self.page_mut().scroll_by(3),
            MouseEventKind::ScrollUp => self.page_mut().scroll_by(-3),
            _ => {}
        }
    }

    fn on_resize(&mut self, width: u16, height: u16) {
        let viewport = self.metrics.viewport(width, height);
        self.controller.host_mut().set_viewport(viewport);
        let now = self.now_ms();
        self.controller.on_resize(now);
    }

    /// Click a link: let the controller intercept it, otherwise follow it.
    fn click_link(&mut self, idx: usize) {
        let Some(config) = self.controller.host().page().link(idx) else {
            return;
        };
        let link = Link {
            href: config.href.clone(),
            preload: config.preload,
        };
        let now = self.now_ms();
        if self.controller.on_click(&link, now) == ClickOutcome::PreventDefault {
            return;
        }
        match link.href.as_deref() {
            None | Some("") => {}
            Some(href) => match href.strip_prefix('#') {
                Some(id) => {
                    self.page_mut().jump_to(id);
                }
                None => self.load_page(href),
            },
        }
    }

    /// Play the page-load sequence again on the current page.
    fn replay(&mut self) {
        let now = self.now_ms();
        if let Err(err) = self.controller.start(Mode::Reveal, now) {
            tracing::warn!(%err, "replay ignored");
        }
    }

    fn page_mut(&mut self) -> &mut PageView {
        self.controller.host_mut().page_mut()
    }

    /// Cycle through available color themes.
    fn cycle_color_theme(&mut self) {
        self.color_theme = self.color_theme.next();
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

/// Render one document line of `page`.
fn page_line(page: &PageView, line: DocLine, color: Color) -> Line<'static> {
    let doc = page.page();
    match line {
        DocLine::Title => Line::from(format!(" {}", doc.title)).bold().fg(color),
        DocLine::Blank => Line::default(),
        DocLine::Link(idx) => {
            let link = &doc.links[idx];
            let marker = if idx == page.selected() { " ▸ " } else { "   " };
            let target = link.href.as_deref().unwrap_or("(no address)");
            let label = if link.preload {
                link.label.clone().underlined().fg(color)
            } else {
                link.label.clone().underlined()
            };
            Line::from(vec![
                marker.to_string().fg(color),
                label,
                format!("  {target}").dark_gray(),
            ])
        }
        DocLine::Heading(idx) => Line::from(format!(" {}", doc.sections[idx].heading)).bold(),
        DocLine::Body(idx) => Line::from(format!(" {}", doc.sections[idx].body)),
    }
}
