//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/api/navigation", get(handlers::navigation::get_navigation))
        .route("/api/pages/", get(handlers::pages::get_root_page))
        .route("/api/pages/{*path}", get(handlers::pages::get_page));

    Router::new()
        .route("/", get(handlers::root::get_root))
        .merge(api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use doxen_core::DocTree;
    use doxen_decorator::{Decorator, ERROR_IMAGE_HEIGHT, ERROR_IMAGE_WIDTH, JPEG_CONTENT_TYPE};
    use image::{Rgb, RgbImage};
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;

    struct Fixture {
        _temp_dir: tempfile::TempDir,
        router: Router,
    }

    fn fixture() -> Fixture {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("index.md"), "# Welcome\n\nSee [guide](guide.md).\n").unwrap();
        fs::write(
            root.join("guide.md"),
            "# Guide\n\n![Flow](images/flow.png)\n\n![Chart](images/bar\\_chart.png)\n",
        )
        .unwrap();
        fs::create_dir_all(root.join("images")).unwrap();
        RgbImage::from_pixel(12, 6, Rgb([40, 80, 120]))
            .save(root.join("images/flow.png"))
            .unwrap();
        RgbImage::from_pixel(7, 3, Rgb([200, 10, 10]))
            .save(root.join("images/bar_chart.png"))
            .unwrap();
        fs::write(root.join("secret.png"), b"unused").unwrap();

        let state = AppState {
            tree: Arc::new(DocTree::load(root).unwrap()),
            decorator: Decorator::new(),
            component: "doxen".to_owned(),
            base_url: "/".to_owned(),
            version: "test".to_owned(),
        };
        Fixture {
            _temp_dir: temp_dir,
            router: create_router(Arc::new(state)),
        }
    }

    async fn get(router: &Router, uri: &str) -> axum::response::Response {
        router
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
    }

    /// `src` attributes of all images in `html`, entities decoded.
    fn image_sources(html: &str) -> Vec<String> {
        html.split(r#"<img src=""#)
            .skip(1)
            .filter_map(|rest| rest.split_once('"'))
            .map(|(src, _)| src.replace("&amp;", "&"))
            .collect()
    }

    #[tokio::test]
    async fn test_image_signal_returns_jpeg() {
        let fixture = fixture();

        let response = get(
            &fixture.router,
            "/?do=doxen-parsedown2image&page=guide&imageLink=images/flow.png",
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], JPEG_CONTENT_TYPE);
        let bytes = body_bytes(response).await;
        let image = image::load_from_memory(&bytes).unwrap();
        assert_eq!((image.width(), image.height()), (12, 6));
    }

    #[tokio::test]
    async fn test_image_signal_failure_returns_error_image() {
        let fixture = fixture();

        let response = get(
            &fixture.router,
            "/?do=doxen-parsedown2image&page=guide&imageLink=../secret.png",
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = body_bytes(response).await;
        let image = image::load_from_memory(&bytes).unwrap();
        assert_eq!(
            (image.width(), image.height()),
            (ERROR_IMAGE_WIDTH, ERROR_IMAGE_HEIGHT)
        );
    }

    #[tokio::test]
    async fn test_unknown_signal_is_not_found() {
        let fixture = fixture();

        let response = get(&fixture.router, "/?do=doxen-somethingElse&page=guide").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_foreign_component_is_bad_request() {
        let fixture = fixture();

        let response = get(&fixture.router, "/?do=other-parsedown2image&page=guide").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_page_render_links_images_through_signal() {
        let fixture = fixture();

        let response = get(&fixture.router, "/?page=guide").await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(html.contains("<title>Guide</title>"));
        assert!(html.contains(
            "/?do=doxen-parsedown2image&amp;page=guide&amp;imageLink=images/flow.png"
        ));
    }

    #[tokio::test]
    async fn test_rendered_escaped_image_link_serves_image() {
        let fixture = fixture();

        let response = get(&fixture.router, "/?page=guide").await;
        let html = String::from_utf8(body_bytes(response).await).unwrap();
        let src = image_sources(&html)
            .into_iter()
            .find(|src| src.contains("bar%5C_chart.png"))
            .unwrap();

        let response = get(&fixture.router, &src).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], JPEG_CONTENT_TYPE);
        let bytes = body_bytes(response).await;
        let image = image::load_from_memory(&bytes).unwrap();
        assert_eq!((image.width(), image.height()), (7, 3));
    }

    #[tokio::test]
    async fn test_concurrent_image_signals() {
        let fixture = fixture();
        let uri = "/?do=doxen-parsedown2image&page=guide&imageLink=images/flow.png";

        let (first, second) = tokio::join!(get(&fixture.router, uri), get(&fixture.router, uri));

        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(second.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_root_page_lists_children() {
        let fixture = fixture();

        let response = get(&fixture.router, "/").await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(html.contains("<title>Welcome</title>"));
        assert!(html.contains(r#"<a href="/?page=guide">guide</a>"#));
        assert!(html.contains(r#"<li><a href="/?page=guide">Guide</a></li>"#));
    }

    #[tokio::test]
    async fn test_missing_page_is_not_found() {
        let fixture = fixture();

        let response = get(&fixture.router, "/?page=missing").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_security_headers() {
        let fixture = fixture();

        let response = get(&fixture.router, "/").await;

        assert_eq!(response.headers()["x-content-type-options"], "nosniff");
        assert_eq!(response.headers()["x-frame-options"], "DENY");
        assert!(response.headers().contains_key("content-security-policy"));
    }

    #[tokio::test]
    async fn test_pages_api_and_etag() {
        let fixture = fixture();

        let response = get(&fixture.router, "/api/pages/guide").await;
        assert_eq!(response.status(), StatusCode::OK);
        let etag = response.headers()[header::ETAG].clone();
        let json: serde_json::Value =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(json["meta"]["title"], "Guide");
        assert_eq!(json["meta"]["path"], "/guide");
        assert_eq!(json["meta"]["sourceFile"], "guide.md");
        assert!(json["content"].as_str().unwrap().contains("<h1"));

        let response = fixture
            .router
            .clone()
            .oneshot(
                Request::get("/api/pages/guide")
                    .header(header::IF_NONE_MATCH, etag)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
    }

    #[tokio::test]
    async fn test_pages_api_root_and_missing() {
        let fixture = fixture();

        let response = get(&fixture.router, "/api/pages/").await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = get(&fixture.router, "/api/pages/missing").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_navigation() {
        let fixture = fixture();

        let response = get(&fixture.router, "/api/navigation").await;

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(json["items"][0]["title"], "Guide");
        assert_eq!(json["items"][0]["path"], "/guide");
    }
}
