//! DOM host and the JS entry point.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use preloader_core::Viewport;
use preloader_engine::{ClickOutcome, Controller, Grid, GridLayout, Host, Link};
use rand::{SeedableRng, rngs::SmallRng};
use wasm_bindgen::{JsCast, prelude::*};
use web_sys::{AddEventListenerOptions, Document, Element, Event, HtmlElement, Window};

use crate::{
    error::MountError,
    options::{
        CELL_CLASS, FADE_OUT_CLASS, GRID_ID, LOADING_CLASS, ON_CLASS, OVERLAY_ID,
        PRELOAD_SELECTOR, WebOptions, grid_styles,
    },
};

/// Report a runtime failure on the browser console and to tracing.
fn report(message: &str, err: &JsValue) {
    tracing::warn!(?err, "{message}");
    web_sys::console::warn_2(&JsValue::from_str(&format!("preloader: {message}")), err);
}

/// Log a failed DOM call; the effect is best effort.
fn check<T>(result: Result<T, JsValue>, what: &str) {
    if let Err(err) = result {
        report(&format!("{what} failed"), &err);
    }
}

fn element(document: &Document, id: &'static str) -> Result<HtmlElement, MountError> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .ok_or(MountError::MissingElement(id))
}

/// The page's overlay markup.
struct DomHost {
    window: Window,
    document: Document,
    body: HtmlElement,
    overlay: HtmlElement,
    matrix: HtmlElement,
    /// `cells_by_col[col][row]`.
    cells_by_col: Vec<Vec<Element>>,
}

impl DomHost {
    fn attach() -> Result<Self, MountError> {
        let window = web_sys::window().ok_or(MountError::NoWindow)?;
        let document = window.document().ok_or(MountError::NoDocument)?;
        let body = document.body().ok_or(MountError::NoBody)?;
        let overlay = element(&document, OVERLAY_ID)?;
        let matrix = element(&document, GRID_ID)?;
        Ok(Self {
            window,
            document,
            body,
            overlay,
            matrix,
            cells_by_col: Vec::new(),
        })
    }

    fn dimension(value: Result<JsValue, JsValue>) -> u32 {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32
    }
}

impl Host for DomHost {
    fn viewport(&self) -> Viewport {
        Viewport::new(
            Self::dimension(self.window.inner_width()),
            Self::dimension(self.window.inner_height()),
        )
    }

    fn apply_layout(&mut self, layout: &GridLayout) {
        let style = self.matrix.style();
        for (property, value) in grid_styles(layout) {
            check(style.set_property(property, &value), property);
        }
    }

    fn render_grid(&mut self, grid: &Grid) {
        self.matrix.set_inner_html("");
        self.cells_by_col = vec![Vec::with_capacity(grid.rows()); grid.cols()];

        for cell in grid.cells() {
            let el = match self.document.create_element("div") {
                Ok(el) => el,
                Err(err) => {
                    report("failed to create grid cell", &err);
                    return;
                }
            };
            el.set_class_name(CELL_CLASS);
            el.set_text_content(Some(&cell.label.to_string()));
            if cell.active {
                check(el.class_list().add_1(ON_CLASS), "activate cell");
            }
            check(self.matrix.append_child(&el), "append cell");
            self.cells_by_col[cell.col].push(el);
        }
    }

    fn set_cell_active(&mut self, row: usize, col: usize, active: bool) {
        let Some(el) = self.cells_by_col.get(col).and_then(|c| c.get(row)) else {
            return;
        };
        let classes = el.class_list();
        if active {
            check(classes.add_1(ON_CLASS), "activate cell");
        } else {
            check(classes.remove_1(ON_CLASS), "deactivate cell");
        }
    }

    fn show_overlay(&mut self) {
        check(self.body.class_list().add_1(LOADING_CLASS), "show overlay");
        check(self.overlay.class_list().remove_1(FADE_OUT_CLASS), "show overlay");
    }

    fn fade_overlay(&mut self) {
        check(self.overlay.class_list().add_1(FADE_OUT_CLASS), "fade overlay");
    }

    fn hide_overlay(&mut self) {
        check(self.body.class_list().remove_1(LOADING_CLASS), "hide overlay");
    }

    fn reset_location(&mut self) {
        let location = self.window.location();
        if !location.hash().unwrap_or_default().is_empty() {
            let url = format!(
                "{}{}",
                location.pathname().unwrap_or_default(),
                location.search().unwrap_or_default()
            );
            match self.window.history() {
                Ok(history) => check(
                    history.replace_state_with_url(&JsValue::NULL, "", Some(&url)),
                    "drop fragment",
                ),
                Err(err) => report("no history", &err),
            }
        }
        self.scroll_to_top();
    }

    fn scroll_to_top(&mut self) {
        self.window.scroll_to_with_x_and_y(0.0, 0.0);
    }

    fn navigate(&mut self, href: &str) {
        check(self.window.location().set_href(href), "navigate");
    }
}

/// Controller plus the one browser timeout that drives its timer queue.
struct Runtime {
    window: Window,
    controller: RefCell<Controller<DomHost, SmallRng>>,
    timeout: Cell<Option<i32>>,
    wake: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl Runtime {
    fn now(&self) -> u64 {
        self.window
            .performance()
            .map(|p| p.now())
            .unwrap_or(0.0)
            .max(0.0) as u64
    }

    /// Fire due timers, then sleep until the next deadline.
    fn pump(&self) {
        let now = self.now();
        self.controller.borrow_mut().advance_to(now);
        self.reschedule(now);
    }

    fn reschedule(&self, now: u64) {
        if let Some(id) = self.timeout.take() {
            self.window.clear_timeout_with_handle(id);
        }
        let Some(deadline) = self.controller.borrow().next_deadline() else {
            return;
        };
        let wake = self.wake.borrow();
        let Some(wake) = wake.as_ref() else {
            return;
        };
        let delay = deadline.saturating_sub(now).min(i32::MAX as u64) as i32;
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(wake.as_ref().unchecked_ref(), delay)
        {
            Ok(id) => self.timeout.set(Some(id)),
            Err(err) => report("failed to schedule timer", &err),
        }
    }

    fn on_load(&self) {
        let now = self.now();
        self.controller.borrow_mut().on_load(now);
        self.reschedule(now);
    }

    fn on_click(&self, event: &Event) {
        let anchor = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(PRELOAD_SELECTOR).ok().flatten());
        let Some(anchor) = anchor else {
            return;
        };
        let link = Link {
            href: anchor.get_attribute("href"),
            preload: true,
        };
        let now = self.now();
        let outcome = self.controller.borrow_mut().on_click(&link, now);
        if outcome == ClickOutcome::PreventDefault {
            event.prevent_default();
        }
        self.reschedule(now);
    }

    fn on_resize(&self) {
        let now = self.now();
        self.controller.borrow_mut().on_resize(now);
        self.reschedule(now);
    }
}

/// Attach the preloader to the page.
///
/// `options` is an optional JSON object (`word`, `resizePolicy`,
/// `timings`). Returns `false`, after logging to the console, when the page
/// lacks the overlay markup; the rest of the page is left untouched.
#[wasm_bindgen]
pub fn mount(options: Option<String>) -> bool {
    match try_mount(options.as_deref()) {
        Ok(()) => true,
        Err(err) => {
            let message = format!("preloader disabled: {err}");
            web_sys::console::error_1(&JsValue::from_str(&message));
            tracing::error!(%err, "preloader failed to mount");
            false
        }
    }
}

fn try_mount(options: Option<&str>) -> Result<(), MountError> {
    let options = WebOptions::parse(options)?;
    let host = DomHost::attach()?;
    let window = host.window.clone();
    let document = host.document.clone();

    let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
    let controller = Controller::new(host, options.engine_config(), SmallRng::seed_from_u64(seed))?;
    let runtime = Rc::new(Runtime {
        window: window.clone(),
        controller: RefCell::new(controller),
        timeout: Cell::new(None),
        wake: RefCell::new(None),
    });

    let weak = Rc::downgrade(&runtime);
    *runtime.wake.borrow_mut() = Some(Closure::new(move || {
        if let Some(runtime) = weak.upgrade() {
            runtime.pump();
        }
    }));

    let dom_err = |err: JsValue| MountError::Dom(format!("{err:?}"));

    let on_click = {
        let runtime = Rc::clone(&runtime);
        Closure::<dyn FnMut(Event)>::new(move |event: Event| runtime.on_click(&event))
    };
    document
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(dom_err)?;
    on_click.forget();

    let on_resize = {
        let runtime = Rc::clone(&runtime);
        Closure::<dyn FnMut()>::new(move || runtime.on_resize())
    };
    window
        .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
        .map_err(dom_err)?;
    on_resize.forget();

    // The module may finish loading after the page's load event.
    if document.ready_state() == "complete" {
        runtime.on_load();
        return Ok(());
    }
    let on_load = {
        let runtime = Rc::clone(&runtime);
        Closure::<dyn FnMut()>::new(move || runtime.on_load())
    };
    let once = AddEventListenerOptions::new();
    once.set_once(true);
    window
        .add_event_listener_with_callback_and_add_event_listener_options(
            "load",
            on_load.as_ref().unchecked_ref(),
            &once,
        )
        .map_err(dom_err)?;
    on_load.forget();
    Ok(())
}
