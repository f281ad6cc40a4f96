//! Page bootstrap: skeleton, then data, then UI state.
//!
//! One failure policy for the whole page. If the document cannot be loaded at all,
//! the body is replaced by a visible alert; if only a section is bad, that section
//! shows a notice and the rest of the page renders normally.

use tracing::{debug, info, warn};

use super::document::{Document, LoadErrorView};
use super::layout::{skeleton, PageVariant, DEFAULT_TITLE};
use super::node::{Element, Fragment, Node};
use super::sections::{Section, SectionFault, ALL_SECTIONS};
use crate::loader::{LoadError, DATA_PATH};
use crate::models::ResumeDocument;
use crate::ui::{stamp_year, UiController, UiEvent};

#[derive(Debug, Clone)]
pub struct PageOptions {
    pub variant: PageVariant,
    pub title_prefix: String,
    pub year: i32,
    /// Replayed against the page after rendering, in order.
    pub events: Vec<UiEvent>,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            variant: PageVariant::Full,
            title_prefix: DEFAULT_TITLE.to_string(),
            year: crate::ui::current_year(),
            events: Vec::new(),
        }
    }
}

/// What happened to each section during one render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderReport {
    pub rendered: Vec<Section>,
    /// Key absent from the document; containers left as they were.
    pub missing: Vec<Section>,
    pub malformed: Vec<(Section, String)>,
    /// Data was fine but this layout has none of the section's containers.
    pub no_container: Vec<Section>,
}

pub fn render_page(outcome: &Result<ResumeDocument, LoadError>, options: &PageOptions) -> Document {
    let mut doc = skeleton(options.variant);

    match outcome {
        Ok(resume) => {
            let report = render_resume(&mut doc, resume, &options.title_prefix);
            debug!(?report, title = doc.title(), "Rendered resume page");
        }
        Err(e) => {
            warn!("Rendering load error page: {e}");
            render_load_error(&mut doc, e, &options.title_prefix);
        }
    }

    stamp_year(&mut doc, options.year);

    let mut ui = UiController::attach(&doc);
    let changed = options
        .events
        .iter()
        .filter(|event| ui.handle((*event).clone()))
        .count();
    if changed > 0 {
        ui.apply(&mut doc);
    }

    doc
}

/// Runs every section renderer against `doc`.
pub fn render_resume(doc: &mut Document, resume: &ResumeDocument, title_prefix: &str) -> RenderReport {
    let mut report = RenderReport::default();

    for section in ALL_SECTIONS {
        match section.targets(resume) {
            Ok(targets) => {
                let mut committed = 0;
                for target in targets {
                    if doc.replace_children(target.selector, target.fragment) {
                        committed += 1;
                    }
                }
                if committed > 0 {
                    report.rendered.push(section);
                } else {
                    report.no_container.push(section);
                }
            }
            Err(SectionFault::Missing) => {
                warn!("Section '{section}' missing from resume data, skipping");
                report.missing.push(section);
            }
            Err(SectionFault::Malformed(msg)) => {
                warn!("Section '{section}' is malformed: {msg}");
                for (i, selector) in section.selectors().iter().enumerate() {
                    let fragment = if i == 0 { section_error(&msg) } else { Vec::new() };
                    doc.replace_children(selector, fragment);
                }
                report.malformed.push((section, msg));
            }
        }
    }

    if let Some(profile) = resume.profile.loaded() {
        doc.set_title(format!("{title_prefix} - {}", profile.name));
    }

    info!(
        "Rendered {} sections ({} missing, {} malformed, {} without a container)",
        report.rendered.len(),
        report.missing.len(),
        report.malformed.len(),
        report.no_container.len()
    );
    report
}

fn section_error(message: &str) -> Fragment {
    vec![Node::from(
        Element::new("div")
            .with_class("section-error")
            .with_attr("role", "alert")
            .with_text(format!("This section could not be displayed: {message}")),
    )]
}

/// Replaces the whole body with an accessible error state, drawn by the page template.
pub fn render_load_error(doc: &mut Document, error: &LoadError, title_prefix: &str) {
    doc.set_load_error(LoadErrorView {
        message: error.to_string(),
        data_path: DATA_PATH.to_string(),
    });
    doc.set_title(format!("{title_prefix} - Error"));
}
