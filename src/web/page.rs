use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::{error, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Event, HtmlElement, KeyboardEvent, Request, RequestCache, RequestInit, Response, Window};

use crate::app::{Page, Region};
use crate::config::Hooks;
use crate::dom::{build, is_activation_key, Action, Element, Node, Options};
use crate::loader::{DataSource, LoadError, LoadingIndicator};

/// Where rendered elements send their activations. Filled in once the app
/// exists; read each time a listener fires.
pub type DispatchSlot = Rc<RefCell<Option<Rc<dyn Fn(Action)>>>>;

type Listener = Closure<dyn FnMut(Event)>;

pub(crate) fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

// ── Tree to DOM ───────────────────────────────────────

/// Create live DOM for `el`. Elements carrying an action are collected so
/// the caller can attach listeners.
pub(crate) fn materialize(
    doc: &Document,
    el: &Element,
    actions: &mut Vec<(web_sys::Element, Action)>,
) -> Result<web_sys::Element, JsValue> {
    let node = doc.create_element(&el.tag)?;
    if let Some(class) = &el.class_name {
        node.set_class_name(class);
    }
    if let Some(id) = &el.id {
        node.set_id(id);
    }
    for (k, v) in &el.attrs {
        node.set_attribute(k, v)?;
    }
    if let Some(html) = node.dyn_ref::<HtmlElement>() {
        let style = html.style();
        for (k, v) in &el.styles {
            style.set_property(k, v)?;
        }
    }
    if let Some(text) = &el.text {
        node.set_text_content(Some(text));
    }
    for child in &el.children {
        match child {
            Node::Element(c) => {
                let c = materialize(doc, c, actions)?;
                node.append_child(&c)?;
            }
            Node::Text(t) => {
                node.append_child(&doc.create_text_node(t))?;
            }
        }
    }
    if let Some(action) = el.action {
        actions.push((node.clone(), action));
    }
    Ok(node)
}

// ── Page ──────────────────────────────────────────────

pub struct BrowserPage {
    document: Document,
    regions: HashMap<Region, web_sys::Element>,
    listeners: HashMap<Region, Vec<Listener>>,
    dispatch: DispatchSlot,
}

impl BrowserPage {
    pub fn new(document: Document, hooks: &Hooks, dispatch: DispatchSlot) -> Self {
        let regions = Region::REQUIRED
            .iter()
            .filter_map(|r| {
                document
                    .get_element_by_id(r.hook(hooks))
                    .map(|el| (*r, el))
            })
            .collect();
        BrowserPage {
            document,
            regions,
            listeners: HashMap::new(),
            dispatch,
        }
    }

    fn activation_listeners(&self, el: &web_sys::Element, action: Action) -> Vec<Listener> {
        let slot = self.dispatch.clone();
        let on_click = Listener::new(move |_: Event| fire(&slot, action));

        let slot = self.dispatch.clone();
        let on_key = Listener::new(move |e: Event| {
            let activates = e
                .dyn_ref::<KeyboardEvent>()
                .map(|k| is_activation_key(&k.key()))
                .unwrap_or(false);
            if activates {
                e.prevent_default();
                fire(&slot, action);
            }
        });

        for (name, listener) in [("click", &on_click), ("keydown", &on_key)] {
            if let Err(e) = el.add_event_listener_with_callback(name, listener.as_ref().unchecked_ref()) {
                warn!("[app] Could not bind {} on card: {}", name, describe(&e));
            }
        }
        vec![on_click, on_key]
    }
}

fn fire(slot: &DispatchSlot, action: Action) {
    let dispatch = slot.borrow().clone();
    if let Some(dispatch) = dispatch {
        dispatch(action);
    }
}

impl Page for BrowserPage {
    fn has_region(&self, region: Region) -> bool {
        self.regions.contains_key(&region)
    }

    fn mount(&mut self, region: Region, nodes: Vec<Node>) {
        let Some(root) = self.regions.get(&region).cloned() else {
            return;
        };
        root.set_text_content(None);

        let mut actions = Vec::new();
        for node in &nodes {
            let result = match node {
                Node::Element(el) => materialize(&self.document, el, &mut actions)
                    .and_then(|n| root.append_child(&n)),
                Node::Text(t) => root.append_child(&self.document.create_text_node(t)),
            };
            if let Err(e) = result {
                error!("[app] Failed rendering into {:?}: {}", region, describe(&e));
            }
        }

        let listeners = actions
            .iter()
            .flat_map(|(el, action)| self.activation_listeners(el, *action))
            .collect();
        // Replacing drops the listeners of the elements just removed.
        self.listeners.insert(region, listeners);
    }
}

// ── Loading overlay ───────────────────────────────────

pub struct LoadingOverlay {
    document: Document,
    text: String,
    element: RefCell<Option<web_sys::Element>>,
}

impl LoadingOverlay {
    pub fn new(document: Document, text: &str) -> Self {
        LoadingOverlay {
            document,
            text: text.to_string(),
            element: RefCell::new(None),
        }
    }
}

impl LoadingIndicator for LoadingOverlay {
    fn show(&self) {
        let Some(body) = self.document.body() else {
            return;
        };
        let tree = build(
            "div",
            Options::new().id("loading").class("loading").text(self.text.as_str()),
            vec![],
        );
        let mut actions = Vec::new();
        match materialize(&self.document, &tree, &mut actions)
            .and_then(|el| body.append_child(&el).map(|_| el))
        {
            Ok(el) => *self.element.borrow_mut() = Some(el),
            Err(e) => warn!("[loader] Could not show loading indicator: {}", describe(&e)),
        }
    }

    fn hide(&self) {
        if let Some(el) = self.element.borrow_mut().take() {
            el.remove();
        }
    }
}

// ── Fetch ─────────────────────────────────────────────

pub struct FetchSource {
    window: Window,
}

impl FetchSource {
    pub fn new(window: Window) -> Self {
        FetchSource { window }
    }
}

impl DataSource for FetchSource {
    async fn fetch(&self, path: &str) -> Result<String, LoadError> {
        let init = RequestInit::new();
        init.set_method("GET");
        init.set_cache(RequestCache::NoStore);
        let request = Request::new_with_str_and_init(path, &init)
            .map_err(|e| LoadError::Network(describe(&e)))?;

        let response = JsFuture::from(self.window.fetch_with_request(&request))
            .await
            .map_err(|e| LoadError::Network(describe(&e)))?;
        let response: Response = response
            .dyn_into()
            .map_err(|e| LoadError::Network(describe(&e)))?;
        if !response.ok() {
            return Err(LoadError::Status(response.status()));
        }

        let text = response.text().map_err(|e| LoadError::Body(describe(&e)))?;
        let text = JsFuture::from(text)
            .await
            .map_err(|e| LoadError::Body(describe(&e)))?;
        text.as_string()
            .ok_or_else(|| LoadError::Body("response text was not a string".to_string()))
    }
}
