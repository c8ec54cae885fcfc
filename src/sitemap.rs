//! `/sitemap.xml` and `/robots.txt`.

use chrono::NaiveDate;

use crate::config::SiteConfig;
use crate::pages::PAGES;
use crate::seo::escape_html;

/// How often a page is expected to change, as advertised in the sitemap.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChangeFreq {
    Weekly,
    Yearly,
}

impl ChangeFreq {
    fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Yearly => "yearly",
        }
    }
}

/// Sitemap entry for one page.
#[derive(Clone, Copy, Debug)]
pub struct SitemapEntry {
    pub change_freq: ChangeFreq,
    pub priority: f32,
}

/// Renders the sitemap for every listed page, stamped with `lastmod`.
pub fn render_sitemap(config: &SiteConfig, lastmod: NaiveDate) -> String {
    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for page in PAGES.iter() {
        let Some(entry) = page.sitemap else { continue };
        // The home page is listed without its trailing slash.
        let loc = if page.path == "/" { config.base_url() } else { config.canonical_url(page.path) };
        out.push_str(&format!(
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{:.1}</priority>\n  </url>\n",
            escape_html(&loc),
            lastmod.format("%Y-%m-%d"),
            entry.change_freq.as_str(),
            entry.priority,
        ));
    }

    out.push_str("</urlset>\n");
    out
}

pub fn render_robots(config: &SiteConfig) -> String {
    format!("User-agent: *\nAllow: /\n\nSitemap: {}\n", config.canonical_url("/sitemap.xml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sitemap_lists_indexable_pages() {
        let cfg = SiteConfig::new("cowboysafari.buzz").unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        let xml = render_sitemap(&cfg, date);

        assert!(xml.contains("<loc>https://cowboysafari.buzz</loc>"));
        assert!(xml.contains("<loc>https://cowboysafari.buzz/privacy</loc>"));
        assert!(xml.contains("<loc>https://cowboysafari.buzz/terms</loc>"));
        assert!(xml.contains("<loc>https://cowboysafari.buzz/contact</loc>"));
        assert_eq!(xml.matches("<url>").count(), 4);
        assert_eq!(xml.matches("<lastmod>2025-12-01</lastmod>").count(), 4);
        assert!(xml.contains("<changefreq>weekly</changefreq>\n    <priority>1.0</priority>"));
        assert_eq!(xml.matches("<priority>0.3</priority>").count(), 3);
    }

    #[test]
    fn test_robots_points_at_sitemap() {
        let cfg = SiteConfig::new("example.com").unwrap();
        assert!(render_robots(&cfg).ends_with("Sitemap: https://example.com/sitemap.xml\n"));
    }
}
