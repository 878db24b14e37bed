//! Integration tests for the crawler and its HTTP API
//!
//! These tests use wiremock to stand in for the crawled site and drive the
//! axum router in-process with `tower::ServiceExt::oneshot`.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use font_crawl::config::{
    load_config, Config, CrawlerConfig, PopularConfig, ServerConfig, UserAgentConfig,
};
use font_crawl::server::{build_router, AppState};
use serde_json::{json, Value};
use std::io::Write;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration; the popular listing points at `popular_endpoint`
fn create_test_config(popular_endpoint: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3007,
            request_timeout_secs: 30,
        },
        crawler: CrawlerConfig {
            default_page_limit: 1,
            max_page_limit: 10,
            fetch_timeout_secs: 5,
            connect_timeout_secs: 2,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        popular: PopularConfig {
            endpoint: popular_endpoint.to_string(),
            pages: 2,
            page_size: 1,
            sort: "-popularOn".to_string(),
        },
    }
}

fn create_test_router(mock_server: &MockServer) -> Router {
    let config = create_test_config(&format!("{}/api/popular", mock_server.uri()));
    let state = AppState::from_config(&config).expect("Failed to build app state");
    build_router(state, Duration::from_secs(30))
}

async fn mount_html(mock_server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html"))
        .mount(mock_server)
        .await;
}

/// A page declaring `font` in its `<style>` block and linking to `links`
fn page(font: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();
    format!(
        r#"<html><head><style>p {{ font-family: {}; }}</style></head><body>{}</body></html>"#,
        font, anchors
    )
}

async fn post_parse_fonts(router: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/parseFonts")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, serde_json::from_slice(&bytes).unwrap())
}

fn font_names(body: &Value) -> Vec<String> {
    body["fontFamilies"]
        .as_array()
        .expect("fontFamilies should be an array")
        .iter()
        .map(|font| font["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_unreachable_seed_reports_http_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let (status, body) = post_parse_fonts(
        create_test_router(&mock_server),
        json!({ "url": format!("{}/missing", mock_server.uri()) }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "ok": false, "reason": "Page responded with HTTP status 404" })
    );
}

#[tokio::test]
async fn test_single_page_style_block() {
    let mock_server = MockServer::start().await;
    mount_html(
        &mock_server,
        "/",
        r#"<html><head><style>body { font-family: "Helvetica Neue", Arial, sans-serif; }</style></head>
           <body><a href="/elsewhere">Elsewhere</a></body></html>"#
            .to_string(),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/elsewhere"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (status, body) = post_parse_fonts(
        create_test_router(&mock_server),
        json!({ "url": format!("{}/", mock_server.uri()) }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(true));
    assert_eq!(
        font_names(&body),
        vec!["Helvetica Neue", "Arial", "sans-serif"]
    );

    let counts: Vec<&Value> = body["fontFamilies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|font| &font["characterCount"])
        .collect();
    assert!(counts[0].as_u64().unwrap() > 0);
    assert!(counts.iter().all(|count| *count == counts[0]));
}

#[tokio::test]
async fn test_inline_and_linked_styles() {
    let mock_server = MockServer::start().await;
    mount_html(
        &mock_server,
        "/",
        r#"<html><head>
            <link rel="stylesheet" href="/css/site.css">
            <link rel="stylesheet" href="/css/gone.css">
            <style>h1 { font-family: Lora; }</style>
           </head><body><p style="font-family: 'Open Sans'">Hi</p></body></html>"#
            .to_string(),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/css/site.css"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "@media print { body { font-family: Georgia, 'Open Sans'; } }",
            "text/css",
        ))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/css/gone.css"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let (_, body) = post_parse_fonts(
        create_test_router(&mock_server),
        json!({ "url": mock_server.uri() }),
    )
    .await;

    assert_eq!(body["ok"], json!(true));
    assert_eq!(font_names(&body), vec!["Open Sans", "Georgia", "Lora"]);
}

#[tokio::test]
async fn test_depth_first_ends_on_single_link_page() {
    let mock_server = MockServer::start().await;
    mount_html(&mock_server, "/", page("Root", &["/only"])).await;
    Mock::given(method("GET"))
        .and(path("/only"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (_, body) = post_parse_fonts(
        create_test_router(&mock_server),
        json!({
            "url": mock_server.uri(),
            "crawlRelative": "depth-first",
            "pageLimit": 5
        }),
    )
    .await;

    assert_eq!(font_names(&body), vec!["Root"]);
}

#[tokio::test]
async fn test_directory_seed_finds_relative_stylesheet() {
    let mock_server = MockServer::start().await;
    mount_html(
        &mock_server,
        "/docs/",
        r#"<html><head><link rel="stylesheet" href="site.css"></head><body></body></html>"#
            .to_string(),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/docs/site.css"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("p { font-family: DocsFont; }", "text/css"),
        )
        .mount(&mock_server)
        .await;

    let (_, body) = post_parse_fonts(
        create_test_router(&mock_server),
        json!({ "url": format!("{}/docs/", mock_server.uri()) }),
    )
    .await;

    assert_eq!(body["ok"], json!(true));
    assert_eq!(font_names(&body), vec!["DocsFont"]);
}

#[tokio::test]
async fn test_breadth_first_over_api() {
    let mock_server = MockServer::start().await;
    mount_html(&mock_server, "/", page("Root", &["/a", "/b"])).await;
    mount_html(&mock_server, "/a", page("PageA", &["/a/child"])).await;
    mount_html(&mock_server, "/b", page("PageB, Root", &[])).await;
    mount_html(&mock_server, "/a/child", page("Child", &[])).await;

    let (_, body) = post_parse_fonts(
        create_test_router(&mock_server),
        json!({
            "url": format!("{}/", mock_server.uri()),
            "crawlRelative": "breadth-first",
            "pageLimit": 4
        }),
    )
    .await;

    assert_eq!(body["ok"], json!(true));
    assert_eq!(font_names(&body), vec!["Root", "PageA", "PageB", "Child"]);
}

#[tokio::test]
async fn test_depth_first_over_api() {
    let mock_server = MockServer::start().await;
    mount_html(&mock_server, "/", page("Root", &["/a", "/b"])).await;
    mount_html(&mock_server, "/a", page("PageA", &["/a/child", "/b"])).await;
    mount_html(&mock_server, "/a/child", page("Child", &[])).await;
    mount_html(&mock_server, "/b", page("PageB", &[])).await;

    let (_, body) = post_parse_fonts(
        create_test_router(&mock_server),
        json!({
            "url": format!("{}/", mock_server.uri()),
            "crawlRelative": "depth-first",
            "pageLimit": 10
        }),
    )
    .await;

    assert_eq!(font_names(&body), vec!["Root", "PageA", "Child"]);
}

#[tokio::test]
async fn test_page_limit_is_clamped() {
    let mock_server = MockServer::start().await;
    let links: Vec<String> = (0..15).map(|i| format!("/p{}", i)).collect();
    let link_refs: Vec<&str> = links.iter().map(String::as_str).collect();
    mount_html(&mock_server, "/", page("Root", &link_refs)).await;
    for (i, link) in links.iter().enumerate() {
        mount_html(&mock_server, link, page(&format!("Font{}", i), &[])).await;
    }

    let (_, body) = post_parse_fonts(
        create_test_router(&mock_server),
        json!({
            "url": mock_server.uri(),
            "crawlRelative": "breadth-first",
            "pageLimit": 1000
        }),
    )
    .await;

    // max-page-limit is 10: the root plus nine linked pages
    assert_eq!(font_names(&body).len(), 10);
}

#[tokio::test]
async fn test_failed_page_aborts_crawl() {
    let mock_server = MockServer::start().await;
    mount_html(&mock_server, "/", page("Root", &["/broken"])).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let (status, body) = post_parse_fonts(
        create_test_router(&mock_server),
        json!({
            "url": mock_server.uri(),
            "crawlRelative": "breadth-first",
            "pageLimit": 5
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(false));
    let reason = body["reason"].as_str().unwrap();
    assert!(reason.contains("/broken"));
    assert!(reason.contains("HTTP status 500"));
}

#[tokio::test]
async fn test_unknown_strategy_is_rejected() {
    let mock_server = MockServer::start().await;

    let (status, _) = post_parse_fonts(
        create_test_router(&mock_server),
        json!({ "url": mock_server.uri(), "crawlRelative": "random-walk" }),
    )
    .await;

    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_invalid_seed_url() {
    let mock_server = MockServer::start().await;

    let (status, body) = post_parse_fonts(
        create_test_router(&mock_server),
        json!({ "url": "ftp://example.com/fonts" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(false));
}

#[tokio::test]
async fn test_most_popular() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/popular"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "title": "Portfolio",
            "description": "A portfolio",
            "author": { "firstName": "Grace", "lastName": "Hopper" },
            "thumbImg": "https://cdn.example.com/t.png",
            "views": 10
        }])))
        .expect(2)
        .mount(&mock_server)
        .await;

    let (status, body) = get_json(create_test_router(&mock_server), "/100MostPopular").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(
        body["data"][0],
        json!({
            "title": "Portfolio",
            "author": "Grace Hopper",
            "description": "A portfolio",
            "thumbImg": "https://cdn.example.com/t.png"
        })
    );
}

#[tokio::test]
async fn test_most_popular_upstream_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/popular"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let (status, body) = get_json(create_test_router(&mock_server), "/100MostPopular").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(false));
    assert!(body["reason"].is_string());
}

#[tokio::test]
async fn test_health() {
    let mock_server = MockServer::start().await;
    let (status, body) = get_json(create_test_router(&mock_server), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn test_router_from_config_file() {
    let mock_server = MockServer::start().await;
    mount_html(&mock_server, "/", page("FromFile", &[])).await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[server]
host = "127.0.0.1"
port = 3007
request-timeout-secs = 30

[crawler]
default-page-limit = 1
max-page-limit = 5
fetch-timeout-secs = 5
connect-timeout-secs = 2

[user-agent]
crawler-name = "TestBot"
crawler-version = "1.0"
contact-url = "https://example.com/about"
contact-email = "admin@example.com"
"#
    )
    .unwrap();

    let config = load_config(file.path()).unwrap();
    let router = build_router(
        AppState::from_config(&config).unwrap(),
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let (_, body) = post_parse_fonts(router, json!({ "url": mock_server.uri() })).await;
    assert_eq!(font_names(&body), vec!["FromFile"]);
}
