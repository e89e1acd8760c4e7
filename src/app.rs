use log::{debug, warn};

use crate::config::{Hooks, SiteConfig};
use crate::dom::{Action, Node};
use crate::loader::{self, DataSource, LoadingIndicator};
use crate::models::{Document, Project};
use crate::render::{render_about, render_projects, render_spotlight};

/// Page regions the renderers write into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    About,
    Projects,
    Spotlight,
}

impl Region {
    pub const REQUIRED: [Region; 3] = [Region::About, Region::Projects, Region::Spotlight];

    /// Element id of this region in the page markup.
    pub fn hook<'a>(&self, hooks: &'a Hooks) -> &'a str {
        match self {
            Region::About => &hooks.about,
            Region::Projects => &hooks.projects,
            Region::Spotlight => &hooks.spotlight,
        }
    }
}

/// The host page as seen by the app.
pub trait Page {
    fn has_region(&self, region: Region) -> bool;
    /// Replace the region's children with `nodes`. Does nothing when the
    /// region is missing from the page.
    fn mount(&mut self, region: Region, nodes: Vec<Node>);
}

pub struct App<P: Page> {
    page: P,
    document: Document,
    selected: Option<usize>,
}

impl<P: Page> App<P> {
    /// Wrap the page, warning once about any missing required region.
    pub fn new(page: P, config: &SiteConfig) -> Self {
        let missing: Vec<String> = Region::REQUIRED
            .iter()
            .filter(|r| !page.has_region(**r))
            .map(|r| format!("#{}", r.hook(&config.hooks)))
            .collect();
        if !missing.is_empty() {
            warn!("[app] Missing required hooks: {}", missing.join(", "));
        }
        App {
            page,
            document: Document::default(),
            selected: None,
        }
    }

    /// Render everything for a freshly loaded document. The spotlight shows
    /// the first project, or stays untouched when there are none.
    pub fn show(&mut self, document: Document) {
        self.document = document;
        self.selected = None;
        self.page
            .mount(Region::About, render_about(&self.document.profile));
        self.page
            .mount(Region::Projects, render_projects(&self.document.projects));
        if self.document.first_project().is_some() {
            self.select(0);
        }
    }

    /// Show project `index` in the spotlight. Returns `false` for an index
    /// outside the project list.
    pub fn select(&mut self, index: usize) -> bool {
        match render_spotlight(self.document.projects.get(index)) {
            Some(nodes) => {
                self.page.mount(Region::Spotlight, nodes);
                self.selected = Some(index);
                true
            }
            None => {
                debug!("[app] Ignoring selection of missing project {}", index);
                false
            }
        }
    }

    /// Handle an activation raised by a rendered element.
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Spotlight(index) => {
                self.select(index);
            }
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.selected.and_then(|i| self.document.projects.get(i))
    }

    pub fn page(&self) -> &P {
        &self.page
    }
}

/// Load the document, then render it. Event bindings that do not depend on
/// the data are wired by the caller afterwards.
pub async fn boot<S, I, P>(source: &S, indicator: &I, page: P, config: &SiteConfig) -> App<P>
where
    S: DataSource + ?Sized,
    I: LoadingIndicator + ?Sized,
    P: Page,
{
    let mut app = App::new(page, config);
    let document = loader::load(source, indicator, &config.data_path).await;
    app.show(document);
    app
}
