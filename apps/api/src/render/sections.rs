//! Section renderers: pure functions from a slice of the résumé to a [`Fragment`].
//!
//! None of these touch the page; [`Section::targets`] pairs each fragment with the
//! selector of the container it replaces, and the bootstrap commits them.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use super::node::{multiline_text, Element, Fragment, Node};
use crate::models::{
    Education, Experience, KeyInfoItem, Link, Profile, Project, ResumeDocument, SectionData,
    SkillCategory,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Profile,
    Home,
    Projects,
    Experience,
    Education,
    Skills,
    FooterLinks,
}

/// Render order. Matches the order containers appear to a reader.
pub const ALL_SECTIONS: [Section; 7] = [
    Section::Profile,
    Section::Home,
    Section::Projects,
    Section::Experience,
    Section::Education,
    Section::Skills,
    Section::FooterLinks,
];

/// A fragment and the container it replaces.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub selector: &'static str,
    pub fragment: Fragment,
}

/// Why a section produced no targets.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionFault {
    Missing,
    Malformed(String),
}

impl Section {
    pub fn name(&self) -> &'static str {
        match self {
            Section::Profile => "profile",
            Section::Home => "home",
            Section::Projects => "projects",
            Section::Experience => "experiences",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::FooterLinks => "footer-links",
        }
    }

    /// Containers this section writes to; the first one receives fault notices.
    pub fn selectors(&self) -> &'static [&'static str] {
        match self {
            Section::Profile => &["#profile"],
            Section::Home => &[
                "#home .about-me-summary",
                "#home .key-info-grid",
                "#home .contact-links",
            ],
            Section::Projects => &["#projects .projects-grid"],
            Section::Experience => &["#experiences .experiences-container"],
            Section::Education => &["#skills-education .education-container"],
            Section::Skills => &["#skills-education .skills-grid"],
            Section::FooterLinks => &["footer .footer-links"],
        }
    }

    /// Renders this section's fragments from the document.
    pub fn targets(&self, resume: &ResumeDocument) -> Result<Vec<Target>, SectionFault> {
        let selectors = self.selectors();
        let fragments = match self {
            Section::Profile => vec![profile_card(loaded(&resume.profile)?)],
            Section::Home => {
                let profile = loaded(&resume.profile)?;
                vec![
                    multiline_text(&profile.summary),
                    key_info_items(&profile.key_info),
                    external_links(&profile.links, "contact-link-btn"),
                ]
            }
            Section::Projects => vec![project_cards(loaded(&resume.projects)?)],
            Section::Experience => vec![experience_items(loaded(&resume.experiences)?)],
            Section::Education => vec![education_items(loaded(&resume.education)?)],
            Section::Skills => vec![skill_categories(loaded(&resume.skills)?)],
            Section::FooterLinks => {
                vec![external_links(&loaded(&resume.profile)?.links, "footer-link")]
            }
        };
        Ok(selectors
            .iter()
            .zip(fragments)
            .map(|(&selector, fragment)| Target { selector, fragment })
            .collect())
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_SECTIONS
            .iter()
            .copied()
            .find(|section| section.name() == s)
            .ok_or_else(|| format!("unknown section '{s}'"))
    }
}

fn loaded<T>(data: &SectionData<T>) -> Result<&T, SectionFault> {
    match data {
        SectionData::Loaded(value) => Ok(value),
        SectionData::Missing => Err(SectionFault::Missing),
        SectionData::Malformed(msg) => Err(SectionFault::Malformed(msg.clone())),
    }
}

/// An anchor that opens in a new tab without giving it `window.opener`.
pub fn external_link(url: &str, text: &str, class: &str) -> Element {
    Element::new("a")
        .with_attr("href", url)
        .with_class(class)
        .with_attr("target", "_blank")
        .with_attr("rel", "noopener noreferrer")
        .with_text(text)
}

pub fn profile_card(profile: &Profile) -> Fragment {
    let picture = Element::new("div").with_class("profile-picture").with_child(
        Element::new("img")
            .with_attr("src", profile.image_url.as_str())
            .with_attr("alt", profile.name.as_str()),
    );
    vec![
        Node::from(picture),
        Node::from(Element::new("h1").with_text(profile.name.as_str())),
        Node::from(
            Element::new("p")
                .with_class("title")
                .with_text(profile.title.as_str()),
        ),
    ]
}

pub fn key_info_items(items: &[KeyInfoItem]) -> Fragment {
    items
        .iter()
        .map(|info| {
            Element::new("div")
                .with_class("key-info-item")
                .with_child(Element::new("h4").with_text(info.title.as_str()))
                .with_child(Element::new("p").with_text(info.value.as_str()))
                .into()
        })
        .collect()
}

pub fn external_links(links: &[Link], class: &str) -> Fragment {
    links
        .iter()
        .map(|link| external_link(&link.url, &link.name, class).into())
        .collect()
}

fn tag_list(class: &str, labels: &[String]) -> Element {
    Element::new("div").with_class(class).with_children(
        labels
            .iter()
            .map(|label| Element::new("span").with_text(label.as_str()).into()),
    )
}

pub fn project_cards(projects: &[Project]) -> Fragment {
    projects
        .iter()
        .map(|project| {
            let mut card = Element::new("div")
                .with_class("project-card")
                .with_child(
                    Element::new("img")
                        .with_attr("src", project.image_url.as_str())
                        .with_attr("alt", format!("{} Logo", project.title)),
                )
                .with_child(Element::new("h3").with_text(project.title.as_str()))
                .with_child(Element::new("p").with_text(project.description.as_str()))
                .with_child(tag_list("project-technologies", &project.technologies));
            if let Some(url) = project.repo_link() {
                card = card.with_child(external_link(url, "Repository", "project-repo-link"));
            }
            card.into()
        })
        .collect()
}

pub fn experience_items(experiences: &[Experience]) -> Fragment {
    experiences
        .iter()
        .map(|exp| {
            let mut item = Element::new("div")
                .with_class("experience-item")
                .with_child(Element::new("p").with_class("company").with_text(exp.company.as_str()))
                .with_child(Element::new("p").with_class("role").with_text(exp.role.as_str()))
                .with_child(Element::new("p").with_class("date").with_text(exp.date.as_str()));
            if let Some(responsibilities) = &exp.responsibilities {
                item = item.with_child(
                    Element::new("ul").with_class("responsibilities").with_children(
                        responsibilities
                            .iter()
                            .map(|r| Element::new("li").with_text(r.as_str()).into()),
                    ),
                );
            }
            item.into()
        })
        .collect()
}

pub fn education_items(education: &[Education]) -> Fragment {
    education
        .iter()
        .map(|edu| {
            Element::new("div")
                .with_class("education-item")
                .with_child(
                    Element::new("p")
                        .with_class("institution")
                        .with_text(edu.institution.as_str()),
                )
                .with_child(Element::new("p").with_class("degree").with_text(edu.degree.as_str()))
                .with_child(Element::new("p").with_class("date").with_text(edu.date.as_str()))
                .into()
        })
        .collect()
}

pub fn skill_categories(skills: &[SkillCategory]) -> Fragment {
    skills
        .iter()
        .map(|category| {
            Element::new("div")
                .with_class("skill-category")
                .with_child(Element::new("h3").with_text(category.category.as_str()))
                .with_child(tag_list("skills-list", &category.items))
                .into()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::node::fragment_html;

    fn project(title: &str, repo_url: Option<&str>) -> Project {
        Project {
            title: title.to_string(),
            description: "desc".to_string(),
            image_url: "img/p.png".to_string(),
            technologies: vec!["Rust".to_string(), "Axum".to_string()],
            repo_url: repo_url.map(str::to_string),
        }
    }

    fn elements(fragment: &Fragment) -> Vec<&Element> {
        fragment.iter().filter_map(Node::as_element).collect()
    }

    fn find_class<'a>(el: &'a Element, class: &str) -> Vec<&'a Element> {
        let mut out = Vec::new();
        if el.has_class(class) {
            out.push(el);
        }
        for child in el.child_elements() {
            out.extend(find_class(child, class));
        }
        out
    }

    #[test]
    fn test_child_count_matches_input_length() {
        let projects = vec![project("a", None), project("b", None), project("c", None)];
        assert_eq!(project_cards(&projects).len(), 3);

        let education = vec![Education {
            institution: "MIT".into(),
            degree: "BSc".into(),
            date: "2010".into(),
        }];
        assert_eq!(education_items(&education).len(), 1);
    }

    #[test]
    fn test_empty_inputs_render_no_children() {
        assert!(project_cards(&[]).is_empty());
        assert!(experience_items(&[]).is_empty());
        assert!(education_items(&[]).is_empty());
        assert!(skill_categories(&[]).is_empty());
        assert!(key_info_items(&[]).is_empty());
        assert!(external_links(&[], "contact-link-btn").is_empty());
    }

    #[test]
    fn test_repo_link_only_when_url_present() {
        let cards = project_cards(&[
            project("none", None),
            project("empty", Some("")),
            project("some", Some("https://github.com/x/y")),
        ]);
        let cards = elements(&cards);
        assert!(find_class(cards[0], "project-repo-link").is_empty());
        assert!(find_class(cards[1], "project-repo-link").is_empty());
        let links = find_class(cards[2], "project-repo-link");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].attr("href"), Some("https://github.com/x/y"));
        assert_eq!(links[0].attr("rel"), Some("noopener noreferrer"));
    }

    #[test]
    fn test_project_image_alt_and_technologies_in_order() {
        let cards = project_cards(&[project("Folio", None)]);
        let html = fragment_html(&cards);
        assert!(html.contains("alt=\"Folio Logo\""));
        assert!(html.contains("<span>Rust</span><span>Axum</span>"));
    }

    #[test]
    fn test_contact_link_attributes() {
        let links = external_links(
            &[Link {
                name: "GitHub".into(),
                url: "https://github.com/x".into(),
            }],
            "contact-link-btn",
        );
        assert_eq!(links.len(), 1);
        let anchor = links[0].as_element().unwrap();
        assert_eq!(anchor.tag, "a");
        assert_eq!(anchor.attr("href"), Some("https://github.com/x"));
        assert_eq!(anchor.attr("target"), Some("_blank"));
        assert_eq!(anchor.attr("rel"), Some("noopener noreferrer"));
        assert_eq!(anchor.text_content(), "GitHub");
    }

    #[test]
    fn test_skills_preserve_item_order() {
        let grid = skill_categories(&[SkillCategory {
            category: "Languages".into(),
            items: vec!["Go".into(), "Rust".into()],
        }]);
        assert_eq!(grid.len(), 1);
        let block = grid[0].as_element().unwrap();
        let heading = block.child_elements().find(|el| el.tag == "h3").unwrap();
        assert_eq!(heading.text_content(), "Languages");
        let list = find_class(block, "skills-list")[0];
        let items: Vec<String> = list.child_elements().map(Element::text_content).collect();
        assert_eq!(items, vec!["Go", "Rust"]);
    }

    #[test]
    fn test_experience_list_only_when_responsibilities_given() {
        let mut exp = Experience {
            company: "Acme".into(),
            role: "Dev".into(),
            date: "2021".into(),
            responsibilities: None,
        };
        let without = experience_items(std::slice::from_ref(&exp));
        assert!(find_class(without[0].as_element().unwrap(), "responsibilities").is_empty());

        exp.responsibilities = Some(vec!["Ship".into(), "Fix".into()]);
        let with = experience_items(&[exp]);
        let list = find_class(with[0].as_element().unwrap(), "responsibilities")[0];
        assert_eq!(list.child_elements().count(), 2);
    }

    #[test]
    fn test_metacharacters_render_as_text() {
        let html = fragment_html(&education_items(&[Education {
            institution: "<script>x</script>".into(),
            degree: "R&D".into(),
            date: "2010".into(),
        }]));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(html.contains("R&amp;D"));
    }

    #[test]
    fn test_section_names_round_trip() {
        for section in ALL_SECTIONS {
            assert_eq!(section.name().parse::<Section>(), Ok(section));
        }
        assert!("sidebar".parse::<Section>().is_err());
    }

    #[test]
    fn test_missing_profile_faults_dependent_sections() {
        let resume = ResumeDocument::from_object(&serde_json::Map::new());
        assert_eq!(Section::Home.targets(&resume), Err(SectionFault::Missing));
        assert_eq!(Section::FooterLinks.targets(&resume), Err(SectionFault::Missing));
    }
}
