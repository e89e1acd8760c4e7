use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Document, Event, KeyboardEvent, ScrollToOptions, Window};

use crate::config::{Hooks, ScrollConfig};
use crate::scroll::{
    ButtonEvent, Direction, ScrollBehavior, ScrollController, ScrollDelta, ScrollMetrics,
    ScrollSurface, Ticker, BUTTON_EVENTS,
};
use crate::web::page::describe;

#[derive(Clone)]
pub struct ContainerSurface {
    window: Window,
    container: web_sys::Element,
}

impl ScrollSurface for ContainerSurface {
    fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            scroll_height: f64::from(self.container.scroll_height()),
            client_height: f64::from(self.container.client_height()),
            viewport_width: self
                .window
                .inner_width()
                .ok()
                .and_then(|w| w.as_f64())
                .unwrap_or(0.0),
        }
    }

    fn scroll_by(&self, delta: ScrollDelta) {
        let opts = ScrollToOptions::new();
        opts.set_top(delta.top);
        opts.set_left(delta.left);
        opts.set_behavior(match delta.behavior {
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Auto,
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        });
        self.container.scroll_by_with_scroll_to_options(&opts);
    }
}

/// `setInterval` through gloo; dropping the handle clears the interval.
pub struct IntervalTicker;

impl Ticker for IntervalTicker {
    type Handle = Interval;

    fn every(&mut self, period_ms: u32, mut tick: Box<dyn FnMut()>) -> Interval {
        Interval::new(period_ms, move || tick())
    }

    fn cancel(&mut self, handle: Interval) {
        drop(handle);
    }
}

type Controller = Rc<RefCell<ScrollController<ContainerSurface, IntervalTicker>>>;

/// Bind the arrow buttons to the project container. Skipped when any of the
/// three elements is missing.
pub fn attach(window: &Window, document: &Document, hooks: &Hooks, config: &ScrollConfig) {
    let (Some(container), Some(prev), Some(next)) = (
        document.get_element_by_id(&hooks.projects),
        document.get_element_by_id(&hooks.prev),
        document.get_element_by_id(&hooks.next),
    ) else {
        debug!("[scroll] Container or arrow buttons missing, scrolling not bound");
        return;
    };

    let surface = ContainerSurface {
        window: window.clone(),
        container,
    };
    let controller: Controller = Rc::new(RefCell::new(ScrollController::new(
        surface,
        IntervalTicker,
        config.clone(),
    )));

    bind_button(&prev, Direction::Prev, &controller);
    bind_button(&next, Direction::Next, &controller);

    // Catches drags that start on a button and end elsewhere.
    let ctl = controller.clone();
    let on_release = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
        if let Ok(mut c) = ctl.try_borrow_mut() {
            c.handle(Direction::Next, &ButtonEvent::DocumentMouseUp);
        }
    });
    if let Err(e) =
        document.add_event_listener_with_callback("mouseup", on_release.as_ref().unchecked_ref())
    {
        warn!("[scroll] Could not bind document mouseup: {}", describe(&e));
    }
    on_release.forget();
}

fn bind_button(button: &web_sys::Element, dir: Direction, controller: &Controller) {
    for name in BUTTON_EVENTS {
        let ctl = controller.clone();
        let listener = Closure::<dyn FnMut(Event)>::new(move |e: Event| {
            let key = e.dyn_ref::<KeyboardEvent>().map(|k| k.key());
            let Some(event) = ButtonEvent::from_dom(&e.type_(), key.as_deref()) else {
                return;
            };
            let prevent = match ctl.try_borrow_mut() {
                Ok(mut c) => c.handle(dir, &event),
                Err(_) => false,
            };
            if prevent {
                e.prevent_default();
            }
        });

        let bound = if *name == "touchstart" {
            let opts = AddEventListenerOptions::new();
            opts.set_passive(true);
            button.add_event_listener_with_callback_and_add_event_listener_options(
                name,
                listener.as_ref().unchecked_ref(),
                &opts,
            )
        } else {
            button.add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())
        };
        if let Err(e) = bound {
            warn!("[scroll] Could not bind {}: {}", name, describe(&e));
        }
        // Buttons live as long as the page.
        listener.forget();
    }
}
