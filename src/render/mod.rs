//! Pure renderers: data in, replacement children for one page region out.
//! Rendering the same input twice yields the same tree.

pub mod about;
pub mod projects;
pub mod spotlight;

pub use about::render_about;
pub use projects::render_projects;
pub use spotlight::render_spotlight;

use crate::dom::{build, safe_url, Node, Options, UrlUse};

/// Separator between two links on one line.
pub const LINK_SEPARATOR: &str = " · ";

/// A field counts as present only when it holds non-empty text.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// The field's text, or `fallback` when it is absent.
pub(crate) fn or_fallback(value: &Option<String>, fallback: &str) -> String {
    present(value).unwrap_or(fallback).to_string()
}

/// Anchor opening in a new tab, or `None` when the URL is absent or unsafe.
pub(crate) fn external_link(url: &Option<String>, label: &str) -> Option<Node> {
    let href = present(url).and_then(|u| safe_url(u, UrlUse::Link))?;
    Some(
        build(
            "a",
            Options::new()
                .attr("href", href)
                .attr("target", "_blank")
                .text(label),
            vec![],
        )
        .into(),
    )
}

/// Zero, one or two links, with the separator only between two.
pub(crate) fn join_links(first: Option<Node>, second: Option<Node>) -> Vec<Node> {
    match (first, second) {
        (Some(a), Some(b)) => vec![a, Node::text(LINK_SEPARATOR), b],
        (Some(a), None) | (None, Some(a)) => vec![a],
        (None, None) => Vec::new(),
    }
}
