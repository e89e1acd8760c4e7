use crate::dom::{background_image, build, Action, Node, Options};
use crate::models::Project;
use crate::render::{external_link, join_links, or_fallback, present};

/// Render the project gallery: one focusable card per project, in source
/// order. Activating a card carries `Action::Spotlight(index)`.
pub fn render_projects(projects: &[Project]) -> Vec<Node> {
    projects
        .iter()
        .enumerate()
        .map(|(idx, p)| project_card(idx, p))
        .collect()
}

fn project_card(idx: usize, p: &Project) -> Node {
    let label = present(&p.title)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Project {}", idx + 1));

    let title = build(
        "h4",
        Options::new()
            .class("projectCard__title")
            .text(or_fallback(&p.title, "Untitled Project")),
        vec![],
    );
    let desc = build(
        "p",
        Options::new()
            .class("projectCard__desc")
            .text(or_fallback(&p.desc, "")),
        vec![],
    );
    // Always present so every card has the same structure, even when empty.
    let links = build(
        "p",
        Options::new().class("projectCard__links"),
        join_links(external_link(&p.repo, "Repo"), external_link(&p.demo, "Demo")),
    );

    let content = build(
        "div",
        Options::new().class("projectCard__content"),
        vec![title.into(), desc.into(), links.into()],
    );

    build(
        "article",
        Options::new()
            .class("projectCard")
            .attr("tabindex", "0")
            .attr("aria-label", label)
            .styles(background_image(present(&p.image)))
            .action(Action::Spotlight(idx)),
        vec![content.into()],
    )
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;

    fn card(nodes: &[Node], i: usize) -> &Element {
        nodes[i].as_element().unwrap()
    }

    fn full() -> Project {
        Project {
            title: Some("Tracker".into()),
            desc: Some("Habit tracker".into()),
            image: Some("img/tracker.png".into()),
            repo: Some("https://github.com/jane/tracker".into()),
            demo: Some("https://tracker.dev".into()),
        }
    }

    #[test]
    fn one_card_per_project_in_order() {
        let mut second = full();
        second.title = Some("Second".into());
        let nodes = render_projects(&[full(), second]);
        assert_eq!(nodes.len(), 2);
        assert_eq!(
            card(&nodes, 1).find_class("projectCard__title").unwrap().text_content(),
            "Second"
        );
        assert_eq!(card(&nodes, 0).action, Some(Action::Spotlight(0)));
        assert_eq!(card(&nodes, 1).action, Some(Action::Spotlight(1)));
    }

    #[test]
    fn card_is_focusable_with_background() {
        let nodes = render_projects(&[full()]);
        let c = card(&nodes, 0);
        assert_eq!(c.tag, "article");
        assert!(c.has_class("projectCard"));
        assert_eq!(c.attr("tabindex"), Some("0"));
        assert_eq!(c.attr("aria-label"), Some("Tracker"));
        assert_eq!(c.style("background-image"), Some("url(\"img/tracker.png\")"));
        assert_eq!(c.style("background-size"), Some("cover"));
    }

    #[test]
    fn both_links_get_a_separator() {
        let nodes = render_projects(&[full()]);
        let links = card(&nodes, 0).find_class("projectCard__links").unwrap();
        assert_eq!(links.children.len(), 3);
        assert_eq!(links.text_content(), "Repo · Demo");
        let hrefs: Vec<_> = links.child_elements().map(|a| a.attr("href").unwrap()).collect();
        assert_eq!(hrefs, vec!["https://github.com/jane/tracker", "https://tracker.dev"]);
    }

    #[test]
    fn single_link_has_no_separator() {
        let mut p = full();
        p.repo = None;
        let nodes = render_projects(&[p]);
        let links = card(&nodes, 0).find_class("projectCard__links").unwrap();
        assert_eq!(links.children.len(), 1);
        assert_eq!(links.text_content(), "Demo");
    }

    #[test]
    fn missing_fields_use_fallbacks_and_empty_links() {
        let nodes = render_projects(&[Project::default(), Project::default()]);
        let c = card(&nodes, 1);
        assert_eq!(c.attr("aria-label"), Some("Project 2"));
        assert!(c.styles.is_empty());
        assert_eq!(c.find_class("projectCard__title").unwrap().text_content(), "Untitled Project");
        assert_eq!(c.find_class("projectCard__desc").unwrap().text_content(), "");
        let links = c.find_class("projectCard__links").unwrap();
        assert!(links.children.is_empty());
        assert_eq!(links.text_content(), "");
    }

    #[test]
    fn no_projects_renders_nothing() {
        assert!(render_projects(&[]).is_empty());
    }
}
