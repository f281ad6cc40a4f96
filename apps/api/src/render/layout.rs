//! Page skeleton: the named containers the section renderers and UI controllers target.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::document::Document;
use super::node::{Element, Node};

pub const DEFAULT_TITLE: &str = "Interactive Résumé";

/// Which sections the skeleton carries. `Compact` drops the projects panel and footer links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageVariant {
    #[default]
    Full,
    Compact,
}

impl FromStr for PageVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(PageVariant::Full),
            "compact" => Ok(PageVariant::Compact),
            other => Err(format!("unknown page variant '{other}' (expected full or compact)")),
        }
    }
}

impl fmt::Display for PageVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageVariant::Full => write!(f, "full"),
            PageVariant::Compact => write!(f, "compact"),
        }
    }
}

struct Panel {
    id: &'static str,
    label: &'static str,
    compact: bool,
}

const PANELS: &[Panel] = &[
    Panel { id: "home", label: "About", compact: true },
    Panel { id: "projects", label: "Projects", compact: false },
    Panel { id: "experiences", label: "Experience", compact: true },
    Panel { id: "skills-education", label: "Skills & Education", compact: true },
];

impl PageVariant {
    fn includes(&self, panel: &Panel) -> bool {
        match self {
            PageVariant::Full => true,
            PageVariant::Compact => panel.compact,
        }
    }
}

/// Builds an empty page. The first panel and its tab start out active.
pub fn skeleton(variant: PageVariant) -> Document {
    let panels: Vec<&Panel> = PANELS.iter().filter(|p| variant.includes(p)).collect();

    let nav_links = Element::new("ul")
        .with_id("nav-links")
        .with_class("nav-links")
        .with_children(panels.iter().map(|p| {
            Node::from(
                Element::new("li").with_child(
                    Element::new("a")
                        .with_class("nav-link")
                        .with_attr("href", format!("#{}", p.id))
                        .with_text(p.label),
                ),
            )
        }));

    let sidebar = Element::new("aside")
        .with_class("sidebar")
        .with_child(Element::new("div").with_id("profile").with_class("profile"))
        .with_child(Element::new("nav").with_class("site-nav").with_child(nav_links));

    let tabs = Element::new("nav")
        .with_class("tabs")
        .with_children(panels.iter().enumerate().map(|(i, p)| {
            let mut tab = Element::new("a")
                .with_class("tab-link")
                .with_attr("href", format!("?tab={}", p.id))
                .with_attr("data-tab", p.id)
                .with_text(p.label);
            if i == 0 {
                tab.add_class("active");
            }
            Node::from(tab)
        }));

    let main = Element::new("main")
        .with_class("content")
        .with_child(tabs)
        .with_children(
            panels
                .iter()
                .enumerate()
                .map(|(i, p)| Node::from(panel(p, i == 0))),
        );

    let mut footer = Element::new("footer");
    if variant == PageVariant::Full {
        footer = footer.with_child(Element::new("div").with_class("footer-links"));
    }
    let footer = footer.with_child(
        Element::new("p")
            .with_class("copyright")
            .with_text("© ")
            .with_child(Element::new("span").with_id("year")),
    );

    let toggle = Element::new("a")
        .with_class("nav-toggle")
        .with_attr("href", "?nav=open")
        .with_attr("role", "button")
        .with_attr("aria-controls", "nav-links")
        .with_attr("aria-expanded", "false")
        .with_text("Menu");

    let body = Element::new("body")
        .with_child(toggle)
        .with_child(sidebar)
        .with_child(main)
        .with_child(footer);

    Document::new(DEFAULT_TITLE, body)
}

fn panel(panel: &Panel, active: bool) -> Element {
    let mut section = Element::new("section")
        .with_id(panel.id)
        .with_class("content-panel");
    if active {
        section.add_class("active");
    }
    let heading = |text: &str| Node::from(Element::new("h2").with_text(text));
    let container = |class: &str| Node::from(Element::new("div").with_class(class));

    let children = match panel.id {
        "home" => vec![
            heading("About Me"),
            Node::from(Element::new("p").with_class("about-me-summary")),
            container("key-info-grid"),
            container("contact-links"),
        ],
        "projects" => vec![heading("Projects"), container("projects-grid")],
        "experiences" => vec![heading("Experience"), container("experiences-container")],
        "skills-education" => vec![
            heading("Skills"),
            container("skills-grid"),
            heading("Education"),
            container("education-container"),
        ],
        _ => Vec::new(),
    };
    section.with_children(children)
}
