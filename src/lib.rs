//! folio: a single-page personal portfolio rendered client-side.
//!
//! The core (models, tree builder, renderers, loader, scroll controller,
//! form validator, app controller) is plain Rust and runs anywhere. The
//! `web` module binds it to the browser when built for `wasm32`.

pub mod app;
pub mod config;
pub mod dom;
pub mod form;
pub mod loader;
pub mod models;
pub mod render;
pub mod scroll;

#[cfg(target_arch = "wasm32")]
pub mod web;


pub use app::{boot, App, Page, Region};
pub use config::SiteConfig;
pub use models::{Document, Links, Profile, Project};
