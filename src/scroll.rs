//! Arrow-button scrolling for the project gallery.
//!
//! Each button supports three interactions: press-and-hold repeats a small
//! scroll step until release, a click nudges once with smooth scrolling, and
//! Enter/Space held on the focused button behaves like press-and-hold. The
//! controller owns its single repeating timer; starting a new repeat always
//! cancels the previous one first.

use crate::config::ScrollConfig;
use crate::dom::is_activation_key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Prev => -1.0,
            Direction::Next => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Container and viewport measurements, read fresh for every scroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_height: f64,
    pub client_height: f64,
    pub viewport_width: f64,
}

impl Orientation {
    /// Vertical only when the container overflows vertically and the
    /// viewport is at least `breakpoint` wide.
    pub fn detect(metrics: &ScrollMetrics, breakpoint: f64) -> Self {
        if metrics.scroll_height > metrics.client_height && metrics.viewport_width >= breakpoint {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollDelta {
    pub top: f64,
    pub left: f64,
    pub behavior: ScrollBehavior,
}

/// The scrollable container.
pub trait ScrollSurface {
    fn metrics(&self) -> ScrollMetrics;
    fn scroll_by(&self, delta: ScrollDelta);
}

/// Fixed-period repeating callbacks.
pub trait Ticker {
    type Handle;
    fn every(&mut self, period_ms: u32, tick: Box<dyn FnMut()>) -> Self::Handle;
    fn cancel(&mut self, handle: Self::Handle);
}

/// DOM events bound on each arrow button, plus the document-wide mouseup
/// that catches drags released outside the button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonEvent {
    MouseDown,
    TouchStart,
    MouseUp,
    MouseLeave,
    TouchEnd,
    TouchCancel,
    DocumentMouseUp,
    Click,
    KeyDown(String),
    KeyUp,
}

impl ButtonEvent {
    /// Map a DOM event type to a button event. `key` is only consulted for
    /// `keydown`.
    pub fn from_dom(event_type: &str, key: Option<&str>) -> Option<Self> {
        Some(match event_type {
            "mousedown" => ButtonEvent::MouseDown,
            "touchstart" => ButtonEvent::TouchStart,
            "mouseup" => ButtonEvent::MouseUp,
            "mouseleave" => ButtonEvent::MouseLeave,
            "touchend" => ButtonEvent::TouchEnd,
            "touchcancel" => ButtonEvent::TouchCancel,
            "click" => ButtonEvent::Click,
            "keydown" => ButtonEvent::KeyDown(key.unwrap_or_default().to_string()),
            "keyup" => ButtonEvent::KeyUp,
            _ => return None,
        })
    }
}

/// Event types bound on each button.
pub const BUTTON_EVENTS: &[&str] = &[
    "mousedown",
    "touchstart",
    "mouseup",
    "mouseleave",
    "touchend",
    "touchcancel",
    "click",
    "keydown",
    "keyup",
];

pub struct ScrollController<S, T: Ticker> {
    surface: S,
    ticker: T,
    config: ScrollConfig,
    active: Option<T::Handle>,
}

impl<S, T: Ticker> ScrollController<S, T> {
    /// Cancel the repeating scroll, if one is running.
    pub fn stop(&mut self) {
        if let Some(handle) = self.active.take() {
            self.ticker.cancel(handle);
        }
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }
}

impl<S, T> ScrollController<S, T>
where
    S: ScrollSurface + Clone + 'static,
    T: Ticker,
{
    pub fn new(surface: S, ticker: T, config: ScrollConfig) -> Self {
        ScrollController {
            surface,
            ticker,
            config,
            active: None,
        }
    }

    /// Start repeating small steps in `dir`, replacing any running repeat.
    pub fn start(&mut self, dir: Direction) {
        self.stop();
        let surface = self.surface.clone();
        let step = self.config.step_px;
        let breakpoint = self.config.vertical_breakpoint_px;
        let handle = self.ticker.every(
            self.config.tick_ms,
            Box::new(move || {
                scroll_toward(&surface, dir, step, breakpoint, ScrollBehavior::Instant)
            }),
        );
        self.active = Some(handle);
    }

    /// One larger smooth scroll, independent of the repeat.
    pub fn nudge(&self, dir: Direction) {
        scroll_toward(
            &self.surface,
            dir,
            self.config.nudge_px,
            self.config.vertical_breakpoint_px,
            ScrollBehavior::Smooth,
        );
    }

    /// Apply one button event. Returns `true` when the event's default
    /// action should be prevented.
    pub fn handle(&mut self, dir: Direction, event: &ButtonEvent) -> bool {
        match event {
            ButtonEvent::MouseDown | ButtonEvent::TouchStart => {
                self.start(dir);
                false
            }
            ButtonEvent::MouseUp
            | ButtonEvent::MouseLeave
            | ButtonEvent::TouchEnd
            | ButtonEvent::TouchCancel
            | ButtonEvent::DocumentMouseUp
            | ButtonEvent::KeyUp => {
                self.stop();
                false
            }
            ButtonEvent::Click => {
                self.nudge(dir);
                false
            }
            ButtonEvent::KeyDown(key) if is_activation_key(key) => {
                self.start(dir);
                true
            }
            ButtonEvent::KeyDown(_) => false,
        }
    }
}

impl<S, T: Ticker> Drop for ScrollController<S, T> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn scroll_toward<S: ScrollSurface>(
    surface: &S,
    dir: Direction,
    distance: f64,
    breakpoint: f64,
    behavior: ScrollBehavior,
) {
    let amount = dir.sign() * distance;
    let delta = match Orientation::detect(&surface.metrics(), breakpoint) {
        Orientation::Vertical => ScrollDelta {
            top: amount,
            left: 0.0,
            behavior,
        },
        Orientation::Horizontal => ScrollDelta {
            top: 0.0,
            left: amount,
            behavior,
        },
    };
    surface.scroll_by(delta);
}
