//! HTML page handlers. Query parameters stand in for the clicks a browser would send,
//! so tabs and the mobile menu work without client-side script.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::Config;
use crate::errors::{load_error_status, AppError};
use crate::loader::{DataLoader, LoadError, StaticDataLoader};
use crate::models::ResumeDocument;
use crate::render::{render_page, PageOptions};
use crate::state::AppState;
use crate::ui::{current_year, NavState, UiEvent};

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Panel id of the tab to show.
    pub tab: Option<String>,
    /// `open` or `closed`; anything else is ignored.
    pub nav: Option<String>,
}

impl PageQuery {
    fn events(&self) -> Vec<UiEvent> {
        let mut events = Vec::new();
        if let Some(tab) = &self.tab {
            events.push(UiEvent::TabClicked(tab.clone()));
        }
        match self.nav.as_deref().map(str::parse::<NavState>) {
            Some(Ok(NavState::Open)) => events.push(UiEvent::NavToggled),
            Some(Ok(NavState::Closed)) => events.push(UiEvent::NavLinkClicked),
            Some(Err(e)) => debug!("Ignoring nav parameter: {e}"),
            None => {}
        }
        events
    }
}

/// GET /
pub async fn handle_page(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Response {
    let outcome = state.loader.load().await;
    page_response(&state.config, outcome, query.events(), load_error_status)
}

/// POST /api/v1/preview
///
/// Renders the posted document in place of `data/data.json`. Content errors are the
/// caller's, so they come back as 422 rather than 500.
pub async fn handle_preview(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    Json(value): Json<Value>,
) -> Response {
    let loader = StaticDataLoader::new(value);
    info!("Rendering preview from {}", loader.location());
    let outcome = loader.load().await;
    page_response(&state.config, outcome, query.events(), |_| {
        StatusCode::UNPROCESSABLE_ENTITY
    })
}

fn page_response(
    config: &Config,
    outcome: Result<ResumeDocument, LoadError>,
    events: Vec<UiEvent>,
    error_status: impl Fn(&LoadError) -> StatusCode,
) -> Response {
    let status = match &outcome {
        Ok(_) => StatusCode::OK,
        Err(e) => error_status(e),
    };
    let options = PageOptions {
        variant: config.page_variant,
        title_prefix: config.title_prefix.clone(),
        year: current_year(),
        events,
    };
    let doc = render_page(&outcome, &options);
    match doc.to_html() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => AppError::Internal(anyhow::Error::new(e).context("rendering page template"))
            .into_response(),
    }
}
