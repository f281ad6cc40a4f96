//! JSON API for clients that commit fragments into their own DOM.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::render::{fragment_html, skeleton, Section, SectionFault};
use crate::state::AppState;
use crate::ui::{ActiveSectionTracker, RootMargin, SectionBounds, UiController, UiEvent, Viewport};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SectionResponse {
    pub section: Section,
    pub targets: Vec<TargetHtml>,
}

#[derive(Debug, Serialize)]
pub struct TargetHtml {
    pub selector: &'static str,
    /// Number of top-level nodes, i.e. the container's child count once committed.
    pub children: usize,
    pub html: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSectionRequest {
    pub entries: Vec<SectionBounds>,
    pub viewport: Viewport,
    #[serde(default)]
    pub root_margin: Option<RootMargin>,
    /// Section active before this batch.
    #[serde(default)]
    pub current: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ActiveSectionResponse {
    pub active: Option<String>,
    /// `href` of the navigation link to highlight; `None` when this layout has no such link.
    pub link: Option<String>,
    pub changed: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/sections/:section
pub async fn handle_get_section(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<SectionResponse>, AppError> {
    let section: Section = name.parse().map_err(AppError::NotFound)?;
    let resume = state.loader.load().await?;

    let targets = section.targets(&resume).map_err(|fault| match fault {
        SectionFault::Missing => {
            AppError::NotFound(format!("Section '{section}' is not present in the resume data"))
        }
        SectionFault::Malformed(msg) => AppError::UnprocessableEntity(msg),
    })?;

    Ok(Json(SectionResponse {
        section,
        targets: targets
            .into_iter()
            .map(|target| TargetHtml {
                selector: target.selector,
                children: target.fragment.len(),
                html: fragment_html(&target.fragment),
            })
            .collect(),
    }))
}

/// POST /api/v1/ui/active-section
///
/// Replays one observer batch against the configured layout and reports which
/// navigation link ends up highlighted.
pub async fn handle_active_section(
    State(state): State<AppState>,
    Json(req): Json<ActiveSectionRequest>,
) -> Result<Json<ActiveSectionResponse>, AppError> {
    if req.viewport.height <= 0.0 {
        return Err(AppError::Validation(
            "viewport.height must be positive".to_string(),
        ));
    }

    let mut doc = skeleton(state.config.page_variant);
    let mut ui = UiController::attach(&doc);
    ui.sections = ActiveSectionTracker::new(req.root_margin.unwrap_or_default())
        .with_active(req.current.clone());

    let changed = ui.handle(UiEvent::Intersections {
        entries: req.entries,
        viewport: req.viewport,
    });
    ui.apply(&mut doc);

    let link = doc
        .select(".nav-link.active")
        .and_then(|el| el.attr("href"))
        .map(str::to_string);

    Ok(Json(ActiveSectionResponse {
        active: ui.sections.active().map(str::to_string),
        link,
        changed,
    }))
}
