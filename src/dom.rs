//! Element trees for rendered output.
//!
//! Renderers never produce markup strings. They build [`Element`] trees with
//! [`build`], and only the browser binding turns a tree into live DOM. Text
//! is always text content, and URLs taken from the data file go through
//! [`safe_url`] before they reach an `href` or a background style.

use std::fmt;

use log::warn;
use url::Url;

/// What activating an element should do. Carried on the tree so the
/// renderers stay free of closures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Show the project at this index in the spotlight.
    Spotlight(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub class_name: Option<String>,
    pub id: Option<String>,
    pub attrs: Vec<(String, String)>,
    pub styles: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<Node>,
    pub action: Option<Action>,
}

/// Everything `build` can set on an element besides its children.
#[derive(Debug, Clone, Default)]
pub struct Options {
    class_name: Option<String>,
    id: Option<String>,
    attrs: Vec<(String, Option<String>)>,
    styles: Vec<(String, String)>,
    text: Option<String>,
    action: Option<Action>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(mut self, class_name: &str) -> Self {
        self.class_name = Some(class_name.to_string());
        self
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attrs.push((key.to_string(), Some(value.into())));
        self
    }

    /// Attribute that is skipped entirely when `value` is `None`.
    pub fn attr_opt(mut self, key: &str, value: Option<impl Into<String>>) -> Self {
        self.attrs.push((key.to_string(), value.map(Into::into)));
        self
    }

    pub fn styles(mut self, styles: Vec<(String, String)>) -> Self {
        self.styles.extend(styles);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }
}

/// Build one element. Attributes with no value are dropped, and empty text
/// leaves the element without text content.
pub fn build(tag: &str, opts: Options, children: Vec<Node>) -> Element {
    Element {
        tag: tag.to_string(),
        class_name: opts.class_name,
        id: opts.id,
        attrs: opts
            .attrs
            .into_iter()
            .filter_map(|(k, v)| v.map(|v| (k, v)))
            .collect(),
        styles: opts.styles,
        text: opts.text.filter(|t| !t.is_empty()),
        children,
        action: opts.action,
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    /// Concatenated text of this node and its descendants, like the DOM's
    /// `textContent`.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(t) => t.clone(),
            Node::Element(el) => el.text_content(),
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl Element {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn style(&self, key: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_name
            .as_deref()
            .map(|c| c.split_whitespace().any(|name| name == class))
            .unwrap_or(false)
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// First descendant (depth-first, self included) carrying `class`.
    pub fn find_class(&self, class: &str) -> Option<&Element> {
        if self.has_class(class) {
            return Some(self);
        }
        self.child_elements().find_map(|c| c.find_class(class))
    }

    pub fn text_content(&self) -> String {
        let mut out = self.text.clone().unwrap_or_default();
        for child in &self.children {
            out.push_str(&child.text_content());
        }
        out
    }
}

// ── URL and style helpers ─────────────────────────────

/// Where a URL from the data file is about to be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlUse {
    Link,
    Image,
}

const LINK_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];
const IMAGE_SCHEMES: &[&str] = &["http", "https", "data"];

/// Accept relative URLs and absolute ones with a scheme allowed for `usage`.
/// Anything else (`javascript:`, `vbscript:`, unparseable hosts) is treated
/// as absent.
pub fn safe_url(raw: &str, usage: UrlUse) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match Url::parse(trimmed) {
        Ok(url) => {
            let allowed = match usage {
                UrlUse::Link => LINK_SCHEMES,
                UrlUse::Image => IMAGE_SCHEMES,
            };
            let scheme = url.scheme();
            let ok = allowed.contains(&scheme)
                && (scheme != "data" || url.path().starts_with("image/"));
            if ok {
                Some(trimmed.to_string())
            } else {
                warn!("[dom] Dropping {:?} URL with scheme {}", usage, scheme);
                None
            }
        }
        Err(url::ParseError::RelativeUrlWithoutBase) => Some(trimmed.to_string()),
        Err(e) => {
            warn!("[dom] Dropping unparseable URL: {}", e);
            None
        }
    }
}

/// Background image styles for a card or headshot. Empty when the URL is
/// missing or rejected.
pub fn background_image(raw: Option<&str>) -> Vec<(String, String)> {
    match raw.and_then(|u| safe_url(u, UrlUse::Image)) {
        Some(url) => vec![
            (
                "background-image".to_string(),
                format!("url(\"{}\")", css_string_escape(&url)),
            ),
            ("background-size".to_string(), "cover".to_string()),
            ("background-position".to_string(), "center".to_string()),
        ],
        None => Vec::new(),
    }
}

fn css_string_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\{:x} ", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Keys that activate a focused card or button.
pub fn is_activation_key(key: &str) -> bool {
    key == "Enter" || key == " "
}

// ── Serialization ─────────────────────────────────────

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        if let Some(class) = &self.class_name {
            write!(f, " class=\"{}\"", html_escape(class))?;
        }
        if let Some(id) = &self.id {
            write!(f, " id=\"{}\"", html_escape(id))?;
        }
        for (k, v) in &self.attrs {
            write!(f, " {}=\"{}\"", k, html_escape(v))?;
        }
        if !self.styles.is_empty() {
            let style = self
                .styles
                .iter()
                .map(|(k, v)| format!("{}:{}", k, v))
                .collect::<Vec<_>>()
                .join(";");
            write!(f, " style=\"{}\"", html_escape(&style))?;
        }
        write!(f, ">")?;
        if let Some(text) = &self.text {
            write!(f, "{}", html_escape(text))?;
        }
        for child in &self.children {
            write!(f, "{}", child)?;
        }
        write!(f, "</{}>", self.tag)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Element(el) => write!(f, "{}", el),
            Node::Text(t) => write!(f, "{}", html_escape(t)),
        }
    }
}
