use crate::dom::{background_image, build, safe_url, Node, Options, UrlUse};
use crate::models::{Links, Profile};
use crate::render::{or_fallback, present};

/// Render the about region: heading, role, bio, headshot, and the contact
/// list. The contact list always has four entries; absent ones render as
/// disabled placeholders so the layout never shifts.
pub fn render_about(profile: &Profile) -> Vec<Node> {
    let heading = build(
        "h2",
        Options::new()
            .class("section-title")
            .text(or_fallback(&profile.name, "About Me")),
        vec![],
    );
    let role = build(
        "p",
        Options::new()
            .class("about-role")
            .text(or_fallback(&profile.role, "")),
        vec![],
    );
    let bio = build(
        "p",
        Options::new()
            .class("about-bio")
            .text(or_fallback(&profile.bio, "")),
        vec![],
    );

    let headshot = build(
        "div",
        Options::new()
            .class("about-headshot")
            .attr("role", "img")
            .attr(
                "aria-label",
                format!("{} headshot", or_fallback(&profile.name, "User")),
            )
            .styles(background_image(present(&profile.headshot))),
        vec![],
    );

    vec![
        heading.into(),
        role.into(),
        bio.into(),
        headshot.into(),
        contact_list(&profile.links).into(),
    ]
}

fn contact_list(links: &Links) -> crate::dom::Element {
    let phone = present(&links.phone);
    let email = present(&links.email);
    let items = vec![
        contact_item(
            phone.and_then(|p| safe_url(&format!("tel:{}", p), UrlUse::Link)),
            phone.unwrap_or("Phone: N/A"),
            None,
        ),
        contact_item(
            email.and_then(|e| safe_url(&format!("mailto:{}", e), UrlUse::Link)),
            email.unwrap_or("Email: N/A"),
            None,
        ),
        profile_link(&links.linkedin, "LinkedIn"),
        profile_link(&links.github, "GitHub"),
    ];
    build("ul", Options::new().class("about-links"), items)
}

fn profile_link(url: &Option<String>, label: &str) -> Node {
    let href = present(url).and_then(|u| safe_url(u, UrlUse::Link));
    let target = if href.is_some() { "_blank" } else { "_self" };
    contact_item(href, label, Some(target))
}

/// One `li > a`. A missing `href` points at `#` and is marked disabled.
fn contact_item(href: Option<String>, label: &str, target: Option<&str>) -> Node {
    let disabled = if href.is_some() { "false" } else { "true" };
    let anchor = build(
        "a",
        Options::new()
            .attr("href", href.unwrap_or_else(|| "#".to_string()))
            .attr_opt("target", target)
            .attr("aria-disabled", disabled)
            .text(label),
        vec![],
    );
    build("li", Options::new(), vec![anchor.into()]).into()
}
