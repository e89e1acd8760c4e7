use crate::dom::{background_image, build, Node, Options};
use crate::models::Project;
use crate::render::{external_link, join_links, or_fallback, present};

/// Render the spotlight panel for `project`. Returns `None` when there is
/// nothing to show, in which case the region is left untouched.
///
/// Unlike the gallery cards, the links line here is never empty: with no
/// repo and no demo it reads `Links: N/A`.
pub fn render_spotlight(project: Option<&Project>) -> Option<Vec<Node>> {
    let project = project?;

    let title = build(
        "h3",
        Options::new()
            .class("spotlight-title")
            .text(or_fallback(&project.title, "N/A")),
        vec![],
    );
    let desc = build(
        "p",
        Options::new()
            .class("spotlight-desc")
            .text(or_fallback(&project.desc, "No description")),
        vec![],
    );

    let mut link_nodes = join_links(
        external_link(&project.repo, "Repository"),
        external_link(&project.demo, "Demo"),
    );
    if link_nodes.is_empty() {
        link_nodes.push(build("span", Options::new().text("Links: N/A"), vec![]).into());
    }
    let links = build("p", Options::new().class("spotlight-links"), link_nodes);

    let content = build(
        "div",
        Options::new().class("spotlight-content"),
        vec![title.into(), desc.into(), links.into()],
    );

    let card = build(
        "article",
        Options::new()
            .class("spotlight-card")
            .attr("tabindex", "0")
            .attr(
                "aria-label",
                present(&project.title).unwrap_or("Selected project"),
            )
            .styles(background_image(present(&project.image))),
        vec![content.into()],
    );

    Some(vec![card.into()])
}
