use std::sync::Arc;

use apex::middleware::matcher::PathFilter;
use apex::{App, Mode, Request, Response, Router, Scheme, SiteConfig, pages};
use bytes::Bytes;
use http::header::{CACHE_CONTROL, CONTENT_TYPE, LOCATION};
use http::{Method, StatusCode};
use http_body_util::{BodyExt, Full};

const APEX: &str = "cowboysafari.buzz";

fn config(mode: Mode) -> Arc<SiteConfig> {
    Arc::new(SiteConfig::new(APEX).unwrap().mode(mode))
}

/// Echoes the enrichment headers as `<x-pathname>|<x-forwarded-proto>`, `-`
/// for a missing one.
async fn echo(req: Request) -> Response {
    Response::text(format!(
        "{}|{}",
        req.header("x-pathname").unwrap_or("-"),
        req.forwarded_proto().map_or("-", Scheme::as_str),
    ))
}

fn echo_app(mode: Mode) -> App {
    let router = Router::new()
        .get("/", echo)
        .get("/privacy", echo)
        .get("/contact", echo)
        .get("/api/echo", echo)
        .get("/_next/static/app.js", echo)
        .get("/favicon.ico", echo);
    App::new(config(mode), router)
}

fn site(mode: Mode) -> App {
    let config = config(mode);
    App::new(Arc::clone(&config), pages::router(config))
}

/// Request as the edge proxy forwards it: plain http on the socket, original
/// scheme in `x-forwarded-proto`.
fn request(method: Method, url: &str) -> http::Request<()> {
    let uri: http::Uri = url.parse().unwrap();
    let scheme = uri.scheme_str().unwrap();
    let authority = uri.authority().unwrap().as_str();
    let path = uri.path_and_query().map(|p| p.as_str()).unwrap_or("/");

    http::Request::builder()
        .method(method)
        .uri(path)
        .header("host", authority)
        .header("x-forwarded-proto", scheme)
        .body(())
        .unwrap()
}

fn get(url: &str) -> http::Request<()> {
    request(Method::GET, url)
}

async fn body_string(res: http::Response<Full<Bytes>>) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(res: &http::Response<Full<Bytes>>) -> &str {
    res.headers()[LOCATION].to_str().unwrap()
}

#[tokio::test]
async fn test_www_http_redirects_once_to_https_apex() {
    let app = echo_app(Mode::Production);
    let res = app.handle(get("http://www.cowboysafari.buzz/contact")).await;

    assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(location(&res), "https://cowboysafari.buzz/contact");

    let followed = app.handle(get(location(&res))).await;
    assert_eq!(followed.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_www_https_redirects_to_apex() {
    let app = echo_app(Mode::Production);
    let res = app.handle(get("https://www.cowboysafari.buzz/privacy?lang=en")).await;

    assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(location(&res), "https://cowboysafari.buzz/privacy?lang=en");
}

#[tokio::test]
async fn test_development_www_keeps_scheme() {
    let app = echo_app(Mode::Development);
    let res = app.handle(get("http://www.cowboysafari.buzz/contact")).await;

    assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(location(&res), "http://cowboysafari.buzz/contact");
}

#[tokio::test]
async fn test_plain_http_upgrades_with_query() {
    let app = echo_app(Mode::Production);
    let res = app.handle(get("http://cowboysafari.buzz/privacy?utm_source=news&x=1")).await;

    assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(location(&res), "https://cowboysafari.buzz/privacy?utm_source=news&x=1");
    assert!(body_string(res).await.is_empty());
}

#[tokio::test]
async fn test_explicit_default_port_is_dropped_from_redirect() {
    let app = echo_app(Mode::Production);

    for url in ["http://cowboysafari.buzz:80/contact", "http://www.cowboysafari.buzz:80/contact"] {
        let res = app.handle(get(url)).await;
        assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY, "{url}");
        assert_eq!(location(&res), "https://cowboysafari.buzz/contact", "{url}");

        let followed = app.handle(get(location(&res))).await;
        assert_eq!(followed.status(), StatusCode::OK, "{url}");
    }
}

#[tokio::test]
async fn test_non_default_port_survives_redirect() {
    let app = echo_app(Mode::Production);
    let res = app.handle(get("http://www.cowboysafari.buzz:8080/contact")).await;

    assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(location(&res), "https://cowboysafari.buzz:8080/contact");
}

#[tokio::test]
async fn test_canonical_request_is_enriched() {
    let app = echo_app(Mode::Production);
    let res = app.handle(get("https://cowboysafari.buzz/")).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_string(res).await, "/|https");
}

#[tokio::test]
async fn test_localhost_passes_through_with_original_scheme() {
    let app = echo_app(Mode::Production);
    let res = app.handle(get("http://localhost:3000/privacy")).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_string(res).await, "/privacy|http");
}

#[tokio::test]
async fn test_spoofed_enrichment_is_replaced() {
    let app = echo_app(Mode::Production);
    let mut req = get("https://cowboysafari.buzz/contact");
    req.headers_mut().insert("x-pathname", "/elsewhere".parse().unwrap());

    let res = app.handle(req).await;
    assert_eq!(body_string(res).await, "/contact|https");
}

#[tokio::test]
async fn test_excluded_paths_skip_middleware() {
    let app = echo_app(Mode::Production);

    for url in [
        "http://www.cowboysafari.buzz/api/echo",
        "http://cowboysafari.buzz/_next/static/app.js",
        "http://www.cowboysafari.buzz/favicon.ico",
    ] {
        let mut req = get(url);
        req.headers_mut().remove("x-forwarded-proto");
        let res = app.handle(req).await;
        assert_eq!(res.status(), StatusCode::OK, "{url}");
        assert_eq!(body_string(res).await, "-|-", "{url}");
    }
}

#[tokio::test]
async fn test_canonical_requests_never_redirect() {
    let app = echo_app(Mode::Production);
    for url in ["https://cowboysafari.buzz/", "https://cowboysafari.buzz/privacy", "https://cowboysafari.buzz/contact"] {
        let res = app.handle(get(url)).await;
        assert_eq!(res.status(), StatusCode::OK, "{url}");
        assert!(res.headers().get(LOCATION).is_none(), "{url}");
    }
}

#[tokio::test]
async fn test_empty_filter_canonicalizes_everything() {
    let app = echo_app(Mode::Production).filter(PathFilter::none());
    let res = app.handle(get("http://www.cowboysafari.buzz/api/echo")).await;

    assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(location(&res), "https://cowboysafari.buzz/api/echo");
}

#[tokio::test]
async fn test_connection_scheme_applies_without_forwarded_header() {
    let mut req = get("https://cowboysafari.buzz/contact");
    req.headers_mut().remove("x-forwarded-proto");

    let res = echo_app(Mode::Production).handle(req).await;
    assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);

    let mut req = get("https://cowboysafari.buzz/contact");
    req.headers_mut().remove("x-forwarded-proto");
    let res = echo_app(Mode::Production)
        .connection_scheme(Scheme::Https)
        .handle(req)
        .await;
    assert_eq!(body_string(res).await, "/contact|https");
}

#[tokio::test]
async fn test_pages_render_https_canonical() {
    let app = site(Mode::Production);
    let html = body_string(app.handle(get("https://cowboysafari.buzz/privacy")).await).await;

    assert!(html.contains("<link rel=\"canonical\" href=\"https://cowboysafari.buzz/privacy\">"));
    assert!(html.contains("<title>Privacy Policy - Cowboy Safari</title>"));
}

#[tokio::test]
async fn test_dev_pages_still_use_https_canonical() {
    let app = site(Mode::Development);
    let res = app.handle(get("http://localhost:3000/terms")).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[CONTENT_TYPE], "text/html; charset=utf-8");
    let html = body_string(res).await;
    assert!(html.contains("href=\"https://cowboysafari.buzz/terms\""));
}

#[tokio::test]
async fn test_home_has_structured_data() {
    let app = site(Mode::Production);
    let html = body_string(app.handle(get("https://cowboysafari.buzz/")).await).await;

    assert!(html.contains("<link rel=\"canonical\" href=\"https://cowboysafari.buzz/\">"));
    assert!(html.contains("\"@type\":\"VideoGame\""));
    assert!(html.contains("\"ratingValue\":\"4.6\""));
    assert!(html.contains("<meta property=\"og:image\" content=\"https://cowboysafari.buzz/og-image.png\">"));
}

#[tokio::test]
async fn test_unknown_page_is_noindex_404() {
    let app = site(Mode::Production);
    let res = app.handle(get("https://cowboysafari.buzz/no-such-page")).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let html = body_string(res).await;
    assert!(html.contains("noindex, nofollow"));
    assert!(!html.contains("rel=\"canonical\""));
}

#[tokio::test]
async fn test_unknown_page_over_http_redirects_first() {
    let app = site(Mode::Production);
    let res = app.handle(get("http://cowboysafari.buzz/no-such-page")).await;

    assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(location(&res), "https://cowboysafari.buzz/no-such-page");
}

#[tokio::test]
async fn test_head_returns_headers_only() {
    let app = site(Mode::Production);
    let res = app.handle(request(Method::HEAD, "https://cowboysafari.buzz/contact")).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[CONTENT_TYPE], "text/html; charset=utf-8");
    assert!(body_string(res).await.is_empty());
}

#[tokio::test]
async fn test_sitemap_and_robots() {
    let app = site(Mode::Production);

    let res = app.handle(get("https://cowboysafari.buzz/sitemap.xml")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[CONTENT_TYPE], "application/xml");
    assert_eq!(res.headers()[CACHE_CONTROL], "public, max-age=3600");
    assert!(body_string(res).await.contains("<loc>https://cowboysafari.buzz/contact</loc>"));

    let robots = body_string(app.handle(get("https://cowboysafari.buzz/robots.txt")).await).await;
    assert!(robots.contains("Sitemap: https://cowboysafari.buzz/sitemap.xml"));
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = site(Mode::Production);
    let res = app.handle(get("http://localhost/healthz")).await;
    assert_eq!(body_string(res).await, "ok");
    let res = app.handle(get("http://localhost/readyz")).await;
    assert_eq!(body_string(res).await, "ready");
}

#[tokio::test]
async fn test_health_is_answered_for_any_host_and_scheme() {
    let app = site(Mode::Production);

    for url in ["http://10.0.0.7:3000/healthz", "http://10.0.0.7/healthz", "http://www.cowboysafari.buzz/healthz"] {
        let mut req = get(url);
        req.headers_mut().remove("x-forwarded-proto");
        let res = app.handle(req).await;
        assert_eq!(res.status(), StatusCode::OK, "{url}");
        assert_eq!(body_string(res).await, "ok", "{url}");
    }

    let res = app.handle(get("http://10.0.0.7/readyz")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_string(res).await, "ready");
}
