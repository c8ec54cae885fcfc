//! SEO metadata and HTML document shell.
//!
//! Canonical and Open Graph URLs are always `https://<canonical host><path>`.
//! The forwarded scheme a page sees is informational and never changes them.

use crate::config::SiteConfig;

pub const SITE_NAME: &str = "Cowboy Safari";

const KEYWORDS: &str = "cowboy safari, free online game, browser game, animal taming, lasso game, endless runner";
const TWITTER_HANDLE: &str = "@cowboysafari";

/// Open Graph share image, served from the site root.
pub const OG_IMAGE_PATH: &str = "/og-image.png";
const OG_IMAGE_WIDTH: u32 = 1200;
const OG_IMAGE_HEIGHT: u32 = 630;
const OG_IMAGE_ALT: &str = "Cowboy Safari Game";

const ICON_LINKS: &str = "<link rel=\"icon\" href=\"/icon-light-32x32.png\" media=\"(prefers-color-scheme: light)\">\n\
<link rel=\"icon\" href=\"/icon-dark-32x32.png\" media=\"(prefers-color-scheme: dark)\">\n\
<link rel=\"icon\" href=\"/icon.svg\" type=\"image/svg+xml\">\n\
<link rel=\"apple-touch-icon\" href=\"/apple-icon.png\">\n";

/// Robots directive for a page.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Robots {
    Index,
    NoIndex,
}

impl Robots {
    fn as_str(self) -> &'static str {
        match self {
            Self::Index => "index, follow",
            Self::NoIndex => "noindex, nofollow",
        }
    }
}

/// Head metadata for one rendered page.
#[derive(Clone, Debug)]
pub struct PageMeta {
    pub title: String,
    pub description: Option<String>,
    /// Absolute canonical URL; `None` for pages that must not be indexed.
    pub canonical: Option<String>,
    /// Absolute URL of the share image.
    pub image: Option<String>,
    pub robots: Robots,
}

impl PageMeta {
    /// Metadata for an indexable page served at `pathname`.
    pub fn indexable(config: &SiteConfig, pathname: &str, title: &str, description: &str) -> Self {
        Self {
            title: title.to_owned(),
            description: Some(description.to_owned()),
            canonical: Some(config.canonical_url(pathname)),
            image: Some(config.canonical_url(OG_IMAGE_PATH)),
            robots: Robots::Index,
        }
    }

    /// Metadata for a page search engines should skip (the 404 page).
    pub fn hidden(title: &str) -> Self {
        Self {
            title: title.to_owned(),
            description: None,
            canonical: None,
            image: None,
            robots: Robots::NoIndex,
        }
    }

    /// `<head>` contents: title, description, keywords, robots, canonical
    /// link, icons and the Open Graph / Twitter card tags.
    pub fn render_head(&self) -> String {
        let mut out = String::with_capacity(1024);
        let title = escape_html(&self.title);

        out.push_str("<meta charset=\"utf-8\">\n");
        out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1, maximum-scale=5\">\n");
        out.push_str(&format!("<title>{title}</title>\n"));
        out.push_str(&format!("<meta name=\"robots\" content=\"{}\">\n", self.robots.as_str()));
        out.push_str(&format!("<meta name=\"application-name\" content=\"{SITE_NAME}\">\n"));
        out.push_str(&format!("<meta name=\"keywords\" content=\"{KEYWORDS}\">\n"));

        if let Some(description) = &self.description {
            let description = escape_html(description);
            out.push_str(&format!("<meta name=\"description\" content=\"{description}\">\n"));
            out.push_str(&format!("<meta property=\"og:description\" content=\"{description}\">\n"));
            out.push_str(&format!("<meta name=\"twitter:description\" content=\"{description}\">\n"));
        }

        if let Some(canonical) = &self.canonical {
            let canonical = escape_html(canonical);
            out.push_str(&format!("<link rel=\"canonical\" href=\"{canonical}\">\n"));
            out.push_str(&format!("<meta property=\"og:url\" content=\"{canonical}\">\n"));
        }

        out.push_str(&format!("<meta property=\"og:title\" content=\"{title}\">\n"));
        out.push_str("<meta property=\"og:type\" content=\"website\">\n");
        out.push_str("<meta property=\"og:locale\" content=\"en_US\">\n");
        out.push_str(&format!("<meta property=\"og:site_name\" content=\"{SITE_NAME}\">\n"));
        out.push_str("<meta name=\"twitter:card\" content=\"summary_large_image\">\n");
        out.push_str(&format!("<meta name=\"twitter:title\" content=\"{title}\">\n"));
        out.push_str(&format!("<meta name=\"twitter:creator\" content=\"{TWITTER_HANDLE}\">\n"));

        if let Some(image) = &self.image {
            let image = escape_html(image);
            out.push_str(&format!("<meta property=\"og:image\" content=\"{image}\">\n"));
            out.push_str(&format!("<meta property=\"og:image:width\" content=\"{OG_IMAGE_WIDTH}\">\n"));
            out.push_str(&format!("<meta property=\"og:image:height\" content=\"{OG_IMAGE_HEIGHT}\">\n"));
            out.push_str(&format!("<meta property=\"og:image:alt\" content=\"{OG_IMAGE_ALT}\">\n"));
            out.push_str(&format!("<meta name=\"twitter:image\" content=\"{image}\">\n"));
        }

        out.push_str(ICON_LINKS);
        out
    }
}

/// Tag-manager snippets for the configured analytics ids.
pub fn analytics_tags(config: &SiteConfig) -> String {
    let mut out = String::new();

    if let Some(id) = config.analytics() {
        let id = escape_js(id);
        out.push_str(&format!(
            "<script async src=\"https://www.googletagmanager.com/gtag/js?id={id}\"></script>\n\
             <script>window.dataLayer=window.dataLayer||[];function gtag(){{dataLayer.push(arguments);}}\
             gtag('js',new Date());gtag('config','{id}');</script>\n"
        ));
    }

    if let Some(id) = config.clarity() {
        let id = escape_js(id);
        out.push_str(&format!(
            "<script>(function(c,l,a,r,i,t,y){{c[a]=c[a]||function(){{(c[a].q=c[a].q||[]).push(arguments)}};\
             t=l.createElement(r);t.async=1;t.src=\"https://www.clarity.ms/tag/\"+i;\
             y=l.getElementsByTagName(r)[0];y.parentNode.insertBefore(t,y);}})(window,document,\"clarity\",\"script\",\"{id}\");</script>\n"
        ));
    }

    if let Some(key) = config.ahrefs() {
        out.push_str(&format!(
            "<script src=\"https://analytics.ahrefs.com/analytics.js\" data-key=\"{}\" async></script>\n",
            escape_html(key)
        ));
    }

    out
}

/// Full HTML document around `body`.
pub fn render_document(config: &SiteConfig, meta: &PageMeta, extra_head: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n{head}{extra_head}{tags}</head>\n<body>\n{nav}{body}{footer}</body>\n</html>\n",
        head = meta.render_head(),
        tags = analytics_tags(config),
        nav = NAVIGATION,
        footer = FOOTER,
    )
}

const NAVIGATION: &str = "<nav><a href=\"/\">Cowboy Safari</a> \
<a href=\"/privacy\">Privacy</a> <a href=\"/terms\">Terms</a> <a href=\"/contact\">Contact</a></nav>\n";

const FOOTER: &str = "<footer><p>&copy; Cowboy Safari. All rights reserved.</p>\
<p><a href=\"/privacy\">Privacy Policy</a> · <a href=\"/terms\">Terms of Service</a> · <a href=\"/contact\">Contact</a></p></footer>\n";

/// Escapes text for HTML element content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

// Analytics ids are alphanumeric in practice; anything else is dropped.
fn escape_js(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_').collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;

    #[test]
    fn test_canonical_is_https_in_any_mode() {
        let cfg = SiteConfig::new("cowboysafari.buzz").unwrap().mode(Mode::Development);
        let meta = PageMeta::indexable(&cfg, "/privacy", "Privacy Policy - Cowboy Safari", "How we handle data.");
        let head = meta.render_head();
        assert!(head.contains("<link rel=\"canonical\" href=\"https://cowboysafari.buzz/privacy\">"));
        assert!(head.contains("<meta property=\"og:url\" content=\"https://cowboysafari.buzz/privacy\">"));
        assert!(head.contains("content=\"index, follow\""));
    }

    #[test]
    fn test_hidden_page_has_no_canonical() {
        let head = PageMeta::hidden("Page Not Found").render_head();
        assert!(!head.contains("rel=\"canonical\""));
        assert!(head.contains("content=\"noindex, nofollow\""));
    }

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;");
        let cfg = SiteConfig::default();
        let meta = PageMeta::indexable(&cfg, "/\"><script>", "t", "d");
        assert!(!meta.render_head().contains("<script>"));
    }

    #[test]
    fn test_analytics_only_when_configured() {
        assert!(analytics_tags(&SiteConfig::default()).is_empty());

        let cfg = SiteConfig::default()
            .analytics_id(Some("G-ABC123".to_owned()))
            .clarity_id(Some("x');alert(1)//".to_owned()));
        let tags = analytics_tags(&cfg);
        assert!(tags.contains("gtag/js?id=G-ABC123"));
        assert!(tags.contains("gtag('config','G-ABC123')"));
        assert!(tags.contains("\"xalert1\""));
        assert!(!tags.contains("ahrefs"));
    }

    #[test]
    fn test_ahrefs_key_is_kept_verbatim_but_escaped() {
        let cfg = SiteConfig::default().ahrefs_key(Some("pq8wObY7BKVdAXCFC+hRuA".to_owned()));
        assert!(analytics_tags(&cfg).contains(
            "<script src=\"https://analytics.ahrefs.com/analytics.js\" data-key=\"pq8wObY7BKVdAXCFC+hRuA\" async></script>"
        ));

        let cfg = SiteConfig::default().ahrefs_key(Some("k\"><script>".to_owned()));
        let tags = analytics_tags(&cfg);
        assert!(tags.contains("data-key=\"k&quot;&gt;&lt;script&gt;\""));
        assert_eq!(tags.matches("<script").count(), 1);
    }

    #[test]
    fn test_share_image_and_site_tags() {
        let cfg = SiteConfig::new("cowboysafari.buzz").unwrap();
        let head = PageMeta::indexable(&cfg, "/", "Cowboy Safari", "Play free.").render_head();

        assert!(head.contains("<meta property=\"og:image\" content=\"https://cowboysafari.buzz/og-image.png\">"));
        assert!(head.contains("<meta property=\"og:image:width\" content=\"1200\">"));
        assert!(head.contains("<meta property=\"og:image:height\" content=\"630\">"));
        assert!(head.contains("<meta property=\"og:image:alt\" content=\"Cowboy Safari Game\">"));
        assert!(head.contains("<meta name=\"twitter:creator\" content=\"@cowboysafari\">"));
        assert!(head.contains(
            "<meta name=\"keywords\" content=\"cowboy safari, free online game, browser game, animal taming, lasso game, endless runner\">"
        ));
        assert!(head.contains("<meta name=\"application-name\" content=\"Cowboy Safari\">"));
    }

    #[test]
    fn test_icon_links_on_every_page() {
        let cfg = SiteConfig::default();
        for head in [
            PageMeta::indexable(&cfg, "/terms", "Terms", "d").render_head(),
            PageMeta::hidden("Page Not Found").render_head(),
        ] {
            assert!(head.contains("<link rel=\"icon\" href=\"/icon-light-32x32.png\" media=\"(prefers-color-scheme: light)\">"));
            assert!(head.contains("<link rel=\"icon\" href=\"/icon-dark-32x32.png\" media=\"(prefers-color-scheme: dark)\">"));
            assert!(head.contains("<link rel=\"icon\" href=\"/icon.svg\" type=\"image/svg+xml\">"));
            assert!(head.contains("<link rel=\"apple-touch-icon\" href=\"/apple-icon.png\">"));
        }
        assert!(!PageMeta::hidden("x").render_head().contains("og:image"));
    }
}
