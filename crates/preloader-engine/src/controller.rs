//! The preloader controller.

use preloader_core::{
    ConfigValueError, DEFAULT_WORD, Mode, Phase, ResizePolicy, TimerId, TimerQueue, Timings,
    validate_word,
};
use rand::Rng;

use crate::{
    driver,
    grid::Grid,
    host::Host,
    layout::{GridLayout, compute_layout, ticks_per_batch},
    link::{ClickAction, ClickOutcome, Link, classify},
    sequencer::{SequenceError, Sequencer, Step},
};

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Column labels; the grid has one column per character.
    pub word: String,
    pub timings: Timings,
    pub resize_policy: ResizePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            word: DEFAULT_WORD.to_string(),
            timings: Timings::default(),
            resize_policy: ResizePolicy::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigValueError> {
        validate_word(&self.word)?;
        self.timings.validate()
    }
}

/// Events carried by the timer queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerEvent {
    Tick,
    Rebuild,
    Phase(Step),
}

/// Owns the preloader for one page context.
///
/// All state that a browser script would keep in closures lives here: the
/// `running` flag, the pending tick timer, the grid and the sequencer.
/// Time is supplied by the host in milliseconds; the controller never reads
/// a clock itself.
#[derive(Debug)]
pub struct Controller<H, R> {
    host: H,
    rng: R,
    labels: Vec<char>,
    timings: Timings,
    resize_policy: ResizePolicy,
    timers: TimerQueue<TimerEvent>,
    now: u64,
    sequencer: Sequencer,
    running: bool,
    tick_timer: Option<TimerId>,
    rebuild_timer: Option<TimerId>,
    layout: Option<GridLayout>,
    grid: Option<Grid>,
    loaded: bool,
    disposed: bool,
}

impl<H: Host, R: Rng> Controller<H, R> {
    /// Create a controller drawing through `host`.
    pub fn new(host: H, config: EngineConfig, rng: R) -> Result<Self, ConfigValueError> {
        config.validate()?;
        Ok(Self {
            host,
            rng,
            labels: config.word.chars().collect(),
            timings: config.timings,
            resize_policy: config.resize_policy,
            timers: TimerQueue::new(),
            now: 0,
            sequencer: Sequencer::new(),
            running: false,
            tick_timer: None,
            rebuild_timer: None,
            layout: None,
            grid: None,
            loaded: false,
            disposed: false,
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn phase(&self) -> Phase {
        self.sequencer.phase()
    }

    /// Is the matrix animating (ticks allowed)?
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn layout(&self) -> Option<&GridLayout> {
        self.layout.as_ref()
    }

    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    /// Current controller time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Deadline of the next timer the host must wake up for.
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Is a tick scheduled?
    pub fn has_pending_tick(&self) -> bool {
        self.tick_timer.is_some_and(|id| self.timers.is_pending(id))
    }

    /// Page-load entry: play the reveal sequence, once per controller.
    pub fn on_load(&mut self, now: u64) {
        if self.disposed || self.loaded {
            tracing::debug!("page load already handled");
            return;
        }
        self.loaded = true;
        if let Err(err) = self.start(Mode::Reveal, now) {
            tracing::warn!(%err, "reveal on load rejected");
        }
    }

    /// Click entry: intercept marked links and play the navigate sequence.
    pub fn on_click(&mut self, link: &Link, now: u64) -> ClickOutcome {
        if self.disposed {
            return ClickOutcome::Default;
        }
        let ClickAction::Intercept(href) = classify(link) else {
            return ClickOutcome::Default;
        };
        if let Err(err) = self.start(Mode::Navigate { href }, now) {
            tracing::warn!(%err, "navigation click ignored");
        }
        ClickOutcome::PreventDefault
    }

    /// Viewport resize: cancel ticking and debounce a rebuild.
    pub fn on_resize(&mut self, now: u64) {
        if self.disposed || !self.running {
            return;
        }
        self.sync_clock(now);
        self.cancel_tick();
        if let Some(id) = self.rebuild_timer.take() {
            self.timers.cancel(id);
        }
        let deadline = self.now.saturating_add(self.timings.resize_debounce_ms);
        self.rebuild_timer = Some(self.timers.schedule(deadline, TimerEvent::Rebuild));
    }

    /// Start a sequence in `mode`.
    pub fn start(&mut self, mode: Mode, now: u64) -> Result<(), SequenceError> {
        if self.disposed {
            return Err(SequenceError::Disposed);
        }
        self.sync_clock(now);
        let reveal = mode == Mode::Reveal;
        let step = self.sequencer.start(mode)?;
        let total_ms = if reveal {
            self.timings.reveal_total_ms()
        } else {
            self.timings.navigate_total_ms()
        };
        tracing::debug!(reveal, at = self.now, total_ms, "preloader sequence started");

        if reveal {
            self.host.reset_location();
        }
        self.host.show_overlay();
        self.running = true;
        self.cancel_tick();
        self.rebuild();
        self.tick();
        self.schedule_step(step);
        Ok(())
    }

    /// Freeze the matrix: no further ticks, last frame stays.
    pub fn stop(&mut self) {
        self.running = false;
        self.cancel_tick();
    }

    /// Cancel every pending timer and ignore all further events.
    pub fn dispose(&mut self) {
        self.stop();
        if !self.timers.is_empty() {
            tracing::debug!(cancelled = self.timers.len(), "dropping pending timers");
        }
        self.timers.clear();
        self.rebuild_timer = None;
        self.disposed = true;
    }

    /// Start over as a fresh page context: timers, grid and sequence are
    /// dropped and the next [`on_load`](Self::on_load) plays again.
    pub fn reset(&mut self) {
        self.dispose();
        self.sequencer.reset();
        self.layout = None;
        self.grid = None;
        self.loaded = false;
        self.disposed = false;
    }

    /// Advance the clock to `now`, firing every timer due by then in order.
    pub fn advance_to(&mut self, now: u64) {
        while let Some((id, event)) = self.timers.pop_due(now) {
            self.now = self.now.max(id.deadline());
            self.dispatch(event);
        }
        self.sync_clock(now);
    }

    fn dispatch(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::Tick => {
                self.tick_timer = None;
                self.tick();
            }
            TimerEvent::Rebuild => {
                self.rebuild_timer = None;
                self.rebuild();
                if self.resize_policy == ResizePolicy::Resume
                    && self.running
                    && self.phase() == Phase::Showing
                {
                    self.tick();
                }
            }
            TimerEvent::Phase(step) => self.fire_step(step),
        }
    }

    fn fire_step(&mut self, step: Step) {
        let next = self.sequencer.fire(step);
        match (step, self.phase()) {
            (Step::Freeze, Phase::Frozen) => self.stop(),
            (Step::Fade, Phase::Fading) => self.host.fade_overlay(),
            (Step::Finish, Phase::Done) => {
                self.host.hide_overlay();
                self.host.scroll_to_top();
            }
            (Step::Navigate, Phase::Navigating) => {
                if let Some(href) = self.sequencer.mode().and_then(Mode::href) {
                    let href = href.to_string();
                    tracing::debug!(%href, "navigating");
                    self.host.navigate(&href);
                }
            }
            _ => {}
        }
        if let Some(next) = next {
            self.schedule_step(next);
        }
    }

    fn schedule_step(&mut self, step: Step) {
        let deadline = self.now.saturating_add(step.delay(&self.timings));
        self.timers.schedule(deadline, TimerEvent::Phase(step));
    }

    /// Recompute the layout and rebuild the grid from scratch.
    fn rebuild(&mut self) {
        let viewport = self.host.viewport();
        let layout = compute_layout(viewport, self.labels.len());
        self.host.apply_layout(&layout);

        let grid = Grid::build(&self.labels, layout.rows, &mut self.rng);
        self.host.render_grid(&grid);
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            rows = layout.rows,
            cell = layout.cell,
            "matrix rebuilt"
        );

        self.layout = Some(layout);
        self.grid = Some(grid);
    }

    /// Move a batch of active cells and schedule the next batch.
    fn tick(&mut self) {
        if !self.running {
            return;
        }
        let Some(grid) = self.grid.as_mut() else {
            return;
        };

        let k = ticks_per_batch(self.host.viewport());
        for m in driver::tick(grid, k, &mut self.rng) {
            self.host.set_cell_active(m.from, m.col, false);
            self.host.set_cell_active(m.to, m.col, true);
        }

        let delay = driver::next_delay(&self.timings, &mut self.rng);
        let deadline = self.now.saturating_add(delay);
        self.tick_timer = Some(self.timers.schedule(deadline, TimerEvent::Tick));
    }

    fn cancel_tick(&mut self) {
        if let Some(id) = self.tick_timer.take() {
            self.timers.cancel(id);
        }
    }

    fn sync_clock(&mut self, now: u64) {
        self.now = self.now.max(now);
    }
}
