use std::fmt;
use std::future::Future;

use log::{debug, error};

use crate::models::Document;

// ── Types ─────────────────────────────────────────────

#[derive(Debug)]
pub enum LoadError {
    /// The request never produced a response.
    Network(String),
    /// The server answered with a non-success status.
    Status(u16),
    /// The response body could not be read as text.
    Body(String),
    Parse(serde_json::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Network(e) => write!(f, "network error: {}", e),
            LoadError::Status(code) => write!(f, "unexpected status {}", code),
            LoadError::Body(e) => write!(f, "unreadable body: {}", e),
            LoadError::Parse(e) => write!(f, "invalid JSON: {}", e),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Parse(e)
    }
}

/// Where the data document comes from. The browser implementation fetches
/// with caching disabled; tests use canned responses.
pub trait DataSource {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<String, LoadError>>;
}

/// Something visible while the load is in flight.
pub trait LoadingIndicator {
    fn show(&self);
    fn hide(&self);
}

/// Shows the indicator on creation and hides it when dropped, so the
/// indicator goes away on every exit path of `load`.
pub struct LoadingGuard<'a, I: LoadingIndicator + ?Sized> {
    indicator: &'a I,
}

impl<'a, I: LoadingIndicator + ?Sized> LoadingGuard<'a, I> {
    pub fn acquire(indicator: &'a I) -> Self {
        indicator.show();
        LoadingGuard { indicator }
    }
}

impl<I: LoadingIndicator + ?Sized> Drop for LoadingGuard<'_, I> {
    fn drop(&mut self) {
        self.indicator.hide();
    }
}

// ── Loading ───────────────────────────────────────────

/// Fetch and parse the document. Never fails: any error is logged and an
/// empty document is returned instead.
pub async fn load<S, I>(source: &S, indicator: &I, path: &str) -> Document
where
    S: DataSource + ?Sized,
    I: LoadingIndicator + ?Sized,
{
    let _guard = LoadingGuard::acquire(indicator);
    match try_load(source, path).await {
        Ok(doc) => {
            debug!(
                "[loader] Loaded {} with {} project(s)",
                path,
                doc.projects.len()
            );
            doc
        }
        Err(e) => {
            error!("[loader] Failed loading data from {}: {}", path, e);
            Document::default()
        }
    }
}

async fn try_load<S>(source: &S, path: &str) -> Result<Document, LoadError>
where
    S: DataSource + ?Sized,
{
    let body = source.fetch(path).await?;
    Ok(Document::from_json(&body)?)
}
