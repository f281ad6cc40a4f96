pub mod api;
pub mod health;
pub mod pages;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Anything not routed here is served from the site directory (styles, images, `data/data.json`).
pub fn build_router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.config.site_dir);

    Router::new()
        .route("/", get(pages::handle_page))
        .route("/health", get(health::health_handler))
        .route("/api/v1/preview", post(pages::handle_preview))
        .route("/api/v1/sections/:section", get(api::handle_get_section))
        .route(
            "/api/v1/ui/active-section",
            post(api::handle_active_section),
        )
        .fallback_service(assets)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt; // for oneshot

    use crate::config::Config;
    use crate::loader::{DataLoader, FileDataLoader, StaticDataLoader};

    fn test_config(site_dir: &std::path::Path) -> Config {
        let mut config = Config::from_lookup(|_| None).unwrap();
        config.site_dir = site_dir.to_path_buf();
        config
    }

    fn app_with(loader: Arc<dyn DataLoader>) -> Router {
        let config = test_config(std::path::Path::new("does-not-exist"));
        build_router(AppState::new(config, loader))
    }

    fn sample() -> Value {
        json!({
            "profile": {
                "name": "Grace Hopper",
                "title": "Rear Admiral",
                "summary": "Compilers",
                "imageUrl": "img/grace.png",
                "keyInfo": [],
                "links": [{ "name": "GitHub", "url": "https://github.com/x" }]
            },
            "projects": [
                { "title": "COBOL", "description": "<b>Business</b>", "imageUrl": "img/c.png",
                  "technologies": [], "repoUrl": "" }
            ],
            "experiences": [],
            "education": [],
            "skills": [{ "category": "Languages", "items": ["Go", "Rust"] }]
        })
    }

    async fn body_string(response: Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        String::from_utf8(body.to_vec()).unwrap()
    }

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = app_with(Arc::new(StaticDataLoader::new(sample())));
        let response = get(app, "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "folio");
    }

    #[tokio::test]
    async fn test_page_renders_resume() {
        let app = app_with(Arc::new(StaticDataLoader::new(sample())));
        let response = get(app, "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("<title>Interactive Résumé - Grace Hopper</title>"));
        assert!(html.contains("&lt;b&gt;Business&lt;/b&gt;"));
        assert!(!html.contains("project-repo-link"));
        assert!(html.contains(
            "<a href=\"https://github.com/x\" class=\"contact-link-btn\" target=\"_blank\" rel=\"noopener noreferrer\">GitHub</a>"
        ));
    }

    #[tokio::test]
    async fn test_missing_data_file_renders_error_page() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_with(Arc::new(FileDataLoader::new(dir.path())));
        let response = get(app, "/").await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let html = body_string(response).await;
        assert!(html.contains("role=\"alert\""));
        assert!(html.contains("HTTP error! status: 404"));
        assert!(!html.contains("tab-link"));
    }

    #[tokio::test]
    async fn test_tab_query_switches_panel() {
        let app = app_with(Arc::new(StaticDataLoader::new(sample())));
        let html = body_string(get(app, "/?tab=projects&nav=open").await).await;
        assert!(html.contains("<section id=\"projects\" class=\"content-panel active\">"));
        assert!(html.contains("<section id=\"home\" class=\"content-panel\">"));
        assert!(html.contains("aria-expanded=\"true\""));
    }

    #[tokio::test]
    async fn test_nav_link_from_open_menu_closes_it() {
        let app = app_with(Arc::new(StaticDataLoader::new(sample())));
        let html = body_string(get(app.clone(), "/?nav=open").await).await;
        assert!(html.contains("nav-links open"));
        let marker = "class=\"nav-link\" href=\"";
        let start = html.find(marker).expect("nav link rendered") + marker.len();
        let href = &html[start..start + html[start..].find('"').unwrap()];
        assert_eq!(href, "?nav=closed#home");

        // The fragment stays in the browser; only the query reaches the server.
        let (query, _) = href.split_once('#').unwrap();
        let response = get(app, &format!("/{query}")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(!html.contains("nav-links open"));
        assert!(html.contains("aria-expanded=\"false\""));
        assert!(html.contains("class=\"nav-link\" href=\"#home\""));
    }

    #[tokio::test]
    async fn test_unknown_nav_value_renders_page() {
        let app = app_with(Arc::new(StaticDataLoader::new(sample())));
        let response = get(app, "/?nav=maybe").await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("<title>Interactive Résumé - Grace Hopper</title>"));
        assert!(html.contains("aria-expanded=\"false\""));
    }

    #[tokio::test]
    async fn test_preview_renders_posted_document() {
        let app = app_with(Arc::new(StaticDataLoader::new(json!({}))));
        let response = post_json(app, "/api/v1/preview", sample()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("Grace Hopper"));
    }

    #[tokio::test]
    async fn test_preview_rejects_non_object() {
        let app = app_with(Arc::new(StaticDataLoader::new(json!({}))));
        let response = post_json(app, "/api/v1/preview", json!([1, 2])).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_string(response).await.contains("load-error"));
    }

    #[tokio::test]
    async fn test_section_endpoint_returns_fragment() {
        let app = app_with(Arc::new(StaticDataLoader::new(sample())));
        let response = get(app, "/api/v1/sections/skills").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["section"], "skills");
        assert_eq!(body["targets"][0]["selector"], "#skills-education .skills-grid");
        assert_eq!(body["targets"][0]["children"], 1);
        assert_eq!(
            body["targets"][0]["html"],
            "<div class=\"skill-category\"><h3>Languages</h3><div class=\"skills-list\"><span>Go</span><span>Rust</span></div></div>"
        );
    }

    #[tokio::test]
    async fn test_section_endpoint_unknown_and_missing() {
        let app = app_with(Arc::new(StaticDataLoader::new(json!({ "skills": [] }))));
        let response = get(app.clone(), "/api/v1/sections/sidebar").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let response = get(app, "/api/v1/sections/education").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_section_endpoint_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_with(Arc::new(FileDataLoader::new(dir.path())));
        let response = get(app, "/api/v1/sections/skills").await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
    }

    #[tokio::test]
    async fn test_active_section_endpoint() {
        let app = app_with(Arc::new(StaticDataLoader::new(json!({}))));
        let request = json!({
            "entries": [
                { "id": "home", "top": 0.0, "height": 500.0 },
                { "id": "projects", "top": 500.0, "height": 800.0 }
            ],
            "viewport": { "scrollTop": 300.0, "height": 600.0 },
            "current": "home"
        });
        let response = post_json(app, "/api/v1/ui/active-section", request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["active"], "projects");
        assert_eq!(body["link"], "#projects");
        assert_eq!(body["changed"], true);
    }

    #[tokio::test]
    async fn test_active_section_without_link_in_compact_layout() {
        let mut config = test_config(std::path::Path::new("does-not-exist"));
        config.page_variant = crate::render::PageVariant::Compact;
        let app = build_router(AppState::new(
            config,
            Arc::new(StaticDataLoader::new(json!({}))),
        ));
        let request = json!({
            "entries": [{ "id": "projects", "top": 0.0, "height": 2000.0 }],
            "viewport": { "scrollTop": 0.0, "height": 600.0 }
        });
        let response = post_json(app, "/api/v1/ui/active-section", request).await;
        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["active"], "projects");
        assert!(body["link"].is_null());
    }

    #[tokio::test]
    async fn test_active_section_rejects_empty_viewport() {
        let app = app_with(Arc::new(StaticDataLoader::new(json!({}))));
        let request = json!({
            "entries": [],
            "viewport": { "scrollTop": 0.0, "height": 0.0 }
        });
        let response = post_json(app, "/api/v1/ui/active-section", request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_static_files_are_served_from_site_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("css")).unwrap();
        std::fs::write(dir.path().join("css/style.css"), "body{}").unwrap();
        let state = AppState::new(
            test_config(dir.path()),
            Arc::new(FileDataLoader::new(dir.path())),
        );
        let response = get(build_router(state), "/css/style.css").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "body{}");
    }
}
