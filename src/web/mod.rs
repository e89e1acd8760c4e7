//! Browser binding: wires the pure core to live DOM through `web-sys`.

mod form;
mod page;
mod scroll;

use std::cell::RefCell;
use std::rc::Rc;

use log::error;
use wasm_bindgen::prelude::*;

use crate::app::{boot, App};
use crate::config::SiteConfig;
use crate::dom::Action;

pub use page::{BrowserPage, DispatchSlot, FetchSource, LoadingOverlay};

const SITE_TOML: &str = include_str!("../../folio.toml");

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    wasm_logger::init(wasm_logger::Config::new(log::Level::Trace));
    let config = SiteConfig::from_toml_or_default(SITE_TOML);
    log::set_max_level(config.log_level().to_level_filter());

    wasm_bindgen_futures::spawn_local(run(config));
}

/// Load, render, then bind the data-independent controls.
async fn run(config: SiteConfig) {
    let Some(window) = web_sys::window() else {
        error!("[app] No window; not running in a browser");
        return;
    };
    let Some(document) = window.document() else {
        error!("[app] Window has no document");
        return;
    };

    let slot = DispatchSlot::default();
    let page = BrowserPage::new(document.clone(), &config.hooks, slot.clone());
    let indicator = LoadingOverlay::new(document.clone(), &config.loading.text);
    let source = FetchSource::new(window.clone());

    let app = boot(&source, &indicator, page, &config).await;
    connect(&slot, app);

    scroll::attach(&window, &document, &config.hooks, &config.scroll);
    form::attach(&window, &document, &config.hooks, &config.form);
}

/// Route card activations into the app. The slot keeps the app alive for
/// the lifetime of the page.
fn connect(slot: &DispatchSlot, app: App<BrowserPage>) {
    let app = Rc::new(RefCell::new(app));
    *slot.borrow_mut() = Some(Rc::new(move |action: Action| {
        match app.try_borrow_mut() {
            Ok(mut app) => app.dispatch(action),
            Err(_) => log::debug!("[app] Dropping {:?}, app busy", action),
        }
    }));
}
