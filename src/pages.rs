//! Site pages.
//!
//! Every page is static HTML plus head metadata. The canonical URL is built
//! from the `x-pathname` the canonicalization middleware recorded, on the
//! configured host, always over https.

use std::future::{Ready, ready};
use std::sync::Arc;

use http::header::CACHE_CONTROL;
use http::{HeaderValue, StatusCode};
use serde_json::json;

use crate::config::SiteConfig;
use crate::health;
use crate::request::Request;
use crate::response::{ContentType, Response};
use crate::router::Router;
use crate::seo::{self, PageMeta, SITE_NAME, escape_html};
use crate::sitemap::{self, ChangeFreq, SitemapEntry};

/// One indexable page.
pub struct Page {
    pub path: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub heading: &'static str,
    pub body: &'static str,
    pub sitemap: Option<SitemapEntry>,
}

/// The indexable pages, in navigation order.
pub static PAGES: [Page; 4] = [
    Page {
        path: "/",
        title: "Cowboy Safari - Play Free Online | Lasso & Tame Animals",
        description: "Ride wild animals, lasso beasts, and build your Sky Zoo. Play Cowboy Safari free in your browser - endless runner game with animal taming gameplay.",
        heading: "Cowboy Safari",
        body: "",
        sitemap: Some(SitemapEntry { change_freq: ChangeFreq::Weekly, priority: 1.0 }),
    },
    Page {
        path: "/privacy",
        title: "Privacy Policy - Cowboy Safari",
        description: "Learn how Cowboy Safari handles your information. We are transparent about data collection, cookies, analytics, and third-party services.",
        heading: "Privacy Policy",
        body: "<p>Last updated: December 2025</p>\n\
<p>We automatically receive basic technical data such as device type, browser version, pages visited and approximate location. \
We do not collect personal information that identifies you, and we do not sell or share player information for marketing.</p>\n\
<h2>Cookies &amp; Analytics</h2>\n\
<p>We use analytics services to understand how the site is used. They may set cookies in your browser.</p>\n\
<h2>Third-Party Game Content</h2>\n\
<p>The game is embedded from a third-party provider whose own privacy policy applies to it.</p>\n",
        sitemap: Some(SitemapEntry { change_freq: ChangeFreq::Yearly, priority: 0.3 }),
    },
    Page {
        path: "/terms",
        title: "Terms of Service - Cowboy Safari",
        description: "Read the terms of service for Cowboy Safari. Understand your rights and responsibilities when playing our free browser game.",
        heading: "Terms of Service",
        body: "<p>Last updated: December 2025</p>\n\
<h2>Use of the Site</h2>\n<p>The site is provided for personal, non-commercial entertainment.</p>\n\
<h2>Third-Party Game Content</h2>\n<p>The game is owned and operated by a third party. We do not control its content or availability.</p>\n\
<h2>No Warranties</h2>\n<p>The site is provided \"as is\" without warranties of any kind.</p>\n\
<h2>Limitation of Liability</h2>\n<p>We are not liable for any damages arising from your use of the site.</p>\n\
<h2>Changes to These Terms</h2>\n<p>We may update these terms. Continued use of the site means you accept the current version.</p>\n",
        sitemap: Some(SitemapEntry { change_freq: ChangeFreq::Yearly, priority: 0.3 }),
    },
    Page {
        path: "/contact",
        title: "Contact Us - Cowboy Safari",
        description: "Get in touch with Cowboy Safari. Have questions, feedback, or need support? We're here to help!",
        heading: "Contact Us",
        body: "<p>Last updated: December 2025</p>\n\
<h2>Response Time</h2>\n<p>We usually reply within a few business days.</p>\n\
<h2>Third-Party Game Issues</h2>\n<p>Gameplay problems inside the embedded game are best reported to the game's publisher.</p>\n",
        sitemap: Some(SitemapEntry { change_freq: ChangeFreq::Yearly, priority: 0.3 }),
    },
];

const CRAWLER_CACHE: &str = "public, max-age=3600";

const FAQ: [(&str, &str); 4] = [
    (
        "What are the control options in Cowboy Safari?",
        "On desktop, press Spacebar to lasso or jump and use the arrow keys to steer. On mobile, tap to jump, tap and hold to aim your lasso, and drag to steer.",
    ),
    (
        "How do I unlock new animals?",
        "Lasso and tame them during runs, then upgrade your Sky Zoo habitats to unlock rarer species.",
    ),
    (
        "Can I download the game?",
        "No. Cowboy Safari runs entirely in your browser on desktop and mobile.",
    ),
    (
        "What happens if I fall off an animal?",
        "The run ends and you return to your Sky Zoo, where you can spend coins, upgrade, and start again.",
    ),
];

/// Router with every page, the sitemap, robots.txt, health checks and the
/// 404 fallback.
pub fn router(config: Arc<SiteConfig>) -> Router {
    let mut router = Router::new();

    for page in PAGES.iter() {
        let cfg = Arc::clone(&config);
        router = router.get(page.path, move |req: Request| -> Ready<Response> {
            ready(render_page(&cfg, page, &req))
        });
    }

    let cfg = Arc::clone(&config);
    router = router.get("/sitemap.xml", move |_req: Request| -> Ready<Response> {
        let today = chrono::Utc::now().date_naive();
        ready(
            Response::builder()
                .header(CACHE_CONTROL, HeaderValue::from_static(CRAWLER_CACHE))
                .bytes(ContentType::Xml, sitemap::render_sitemap(&cfg, today)),
        )
    });

    let cfg = Arc::clone(&config);
    router = router.get("/robots.txt", move |_req: Request| -> Ready<Response> {
        ready(
            Response::builder()
                .header(CACHE_CONTROL, HeaderValue::from_static(CRAWLER_CACHE))
                .bytes(ContentType::Text, sitemap::render_robots(&cfg)),
        )
    });

    let cfg = config;
    router
        .get("/healthz", health::liveness)
        .get("/readyz", health::readiness)
        .fallback(move |_req: Request| -> Ready<Response> { ready(not_found(&cfg)) })
}

/// Renders `page` for `req`.
pub fn render_page(config: &SiteConfig, page: &Page, req: &Request) -> Response {
    let meta = PageMeta::indexable(config, req.pathname(), page.title, page.description);

    let (extra_head, body) = if page.path == "/" {
        (structured_data(config), home_body(config))
    } else {
        let mut body = format!("<main>\n<h1>{}</h1>\n{}", escape_html(page.heading), page.body);
        if page.path == "/contact" {
            if let Some(email) = config.contact() {
                let email = escape_html(email);
                body.push_str(&format!(
                    "<h2>Contact Email</h2>\n<p><a href=\"mailto:{email}\">{email}</a></p>\n"
                ));
            }
        }
        body.push_str("</main>\n");
        (String::new(), body)
    };

    Response::html(seo::render_document(config, &meta, &extra_head, &body))
}

/// The 404 page. Not indexable, no canonical link.
pub fn not_found(config: &SiteConfig) -> Response {
    let meta = PageMeta::hidden("Page Not Found – Cowboy Safari");
    let body = "<main>\n<h1>404</h1>\n<h2>Page Not Found</h2>\n\
<p>The page you're looking for doesn't exist or has been moved.</p>\n\
<p><a href=\"/\">Return to Home</a></p>\n</main>\n";

    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .bytes(ContentType::Html, seo::render_document(config, &meta, "", body))
}

fn home_body(config: &SiteConfig) -> String {
    let mut body = String::from("<main>\n<h1>Cowboy Safari</h1>\n<section id=\"game\">\n");

    match config.game() {
        Some(url) => body.push_str(&format!(
            "<iframe src=\"{}\" title=\"{SITE_NAME}\" width=\"100%\" height=\"600\" \
             allow=\"fullscreen; autoplay\" loading=\"lazy\"></iframe>\n",
            escape_html(url)
        )),
        None => body.push_str("<p>The game will load here.</p>\n"),
    }
    body.push_str("</section>\n<section id=\"faq\">\n<h2>Frequently Asked Questions</h2>\n");

    for (q, a) in FAQ {
        body.push_str(&format!(
            "<details><summary>{}</summary><p>{}</p></details>\n",
            escape_html(q),
            escape_html(a)
        ));
    }
    body.push_str("</section>\n</main>\n");
    body
}

/// `VideoGame` JSON-LD for the home page.
fn structured_data(config: &SiteConfig) -> String {
    let data = json!({
        "@context": "https://schema.org",
        "@type": "VideoGame",
        "name": SITE_NAME,
        "description": "Free browser-based endless runner with animal taming and zoo building mechanics",
        "url": config.base_url(),
        "gameServer": "HTML5 Browser",
        "playMode": "SinglePlayer",
        "applicationCategory": "Game",
        "aggregateRating": {
            "@type": "AggregateRating",
            "ratingValue": "4.6",
            "bestRating": "5",
            "worstRating": "1",
            "ratingCount": "12450",
        },
    });
    // `</` inside a script element would end it early.
    let encoded = data.to_string().replace("</", "<\\/");
    format!("<script type=\"application/ld+json\">{encoded}</script>\n")
}
