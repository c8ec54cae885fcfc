//! Site configuration.
//!
//! Built once at process start and shared read-only behind an `Arc`. Nothing
//! in the request path reads the process environment; every setting the
//! middleware and the pages need lives here.

use std::str::FromStr;

use crate::error::Error;

/// The production apex domain used when none is configured.
pub const DEFAULT_CANONICAL_HOST: &str = "cowboysafari.buzz";

/// Deployment mode. Development disables the forced upgrade to `https`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    Development,
    Production,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(Error::Config(format!("unknown environment `{other}`"))),
        }
    }
}

/// Immutable configuration for one running site.
#[derive(Clone, Debug)]
pub struct SiteConfig {
    canonical_host: String,
    mode: Mode,
    trust_forwarded_proto: bool,
    game_url: Option<String>,
    analytics_id: Option<String>,
    clarity_id: Option<String>,
    ahrefs_key: Option<String>,
    contact_email: Option<String>,
}

impl SiteConfig {
    /// Configuration for `canonical_host` in production mode.
    ///
    /// The host is lowercased. It must be a bare hostname: no scheme, port,
    /// path, or leading `www.`.
    pub fn new(canonical_host: &str) -> Result<Self, Error> {
        let host = canonical_host.trim().trim_end_matches('.').to_ascii_lowercase();

        if host.is_empty() {
            return Err(Error::Config("canonical host is empty".to_owned()));
        }
        if host.contains(['/', ':', '@', ' ']) {
            return Err(Error::Config(format!(
                "canonical host `{host}` must be a bare hostname"
            )));
        }
        if host.starts_with("www.") {
            return Err(Error::Config(format!(
                "canonical host `{host}` must not carry a `www.` prefix"
            )));
        }

        Ok(Self { canonical_host: host, ..Self::default() })
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Whether `x-forwarded-proto` from the edge proxy decides the request
    /// scheme. When false the scheme is the connection's own (plain http).
    pub fn trust_forwarded_proto(mut self, trust: bool) -> Self {
        self.trust_forwarded_proto = trust;
        self
    }

    pub fn game_url(mut self, url: Option<String>) -> Self {
        self.game_url = url.filter(|u| !u.is_empty());
        self
    }

    pub fn analytics_id(mut self, id: Option<String>) -> Self {
        self.analytics_id = id.filter(|i| !i.is_empty());
        self
    }

    pub fn clarity_id(mut self, id: Option<String>) -> Self {
        self.clarity_id = id.filter(|i| !i.is_empty());
        self
    }

    /// Site key for Ahrefs web analytics.
    pub fn ahrefs_key(mut self, key: Option<String>) -> Self {
        self.ahrefs_key = key.filter(|k| !k.is_empty());
        self
    }

    pub fn contact_email(mut self, email: Option<String>) -> Self {
        self.contact_email = email.filter(|e| !e.is_empty());
        self
    }

    pub fn canonical_host(&self) -> &str {
        &self.canonical_host
    }

    pub fn is_development(&self) -> bool {
        self.mode == Mode::Development
    }

    pub fn trusts_forwarded_proto(&self) -> bool {
        self.trust_forwarded_proto
    }

    pub fn game(&self) -> Option<&str> {
        self.game_url.as_deref()
    }

    pub fn analytics(&self) -> Option<&str> {
        self.analytics_id.as_deref()
    }

    pub fn clarity(&self) -> Option<&str> {
        self.clarity_id.as_deref()
    }

    pub fn ahrefs(&self) -> Option<&str> {
        self.ahrefs_key.as_deref()
    }

    pub fn contact(&self) -> Option<&str> {
        self.contact_email.as_deref()
    }

    /// `https://<canonical host>`, with no trailing slash.
    ///
    /// Canonical URLs are always https, whatever scheme the request arrived
    /// with.
    pub fn base_url(&self) -> String {
        format!("https://{}", self.canonical_host)
    }

    /// Absolute canonical URL for `path`.
    pub fn canonical_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url())
        } else {
            format!("{}/{path}", self.base_url())
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            canonical_host: DEFAULT_CANONICAL_HOST.to_owned(),
            mode: Mode::Production,
            trust_forwarded_proto: true,
            game_url: None,
            analytics_id: None,
            clarity_id: None,
            ahrefs_key: None,
            contact_email: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_is_normalized() {
        let cfg = SiteConfig::new("  CowboySafari.Buzz. ").unwrap();
        assert_eq!(cfg.canonical_host(), "cowboysafari.buzz");
    }

    #[test]
    fn test_rejects_unusable_hosts() {
        assert!(SiteConfig::new("").is_err());
        assert!(SiteConfig::new("https://example.com").is_err());
        assert!(SiteConfig::new("example.com:8080").is_err());
        assert!(SiteConfig::new("www.example.com").is_err());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("development".parse::<Mode>().unwrap(), Mode::Development);
        assert_eq!("PROD".parse::<Mode>().unwrap(), Mode::Production);
        assert!("staging".parse::<Mode>().is_err());
    }

    #[test]
    fn test_canonical_url_is_always_https() {
        let cfg = SiteConfig::new("example.com").unwrap().mode(Mode::Development);
        assert_eq!(cfg.canonical_url("/"), "https://example.com/");
        assert_eq!(cfg.canonical_url("/terms"), "https://example.com/terms");
        assert_eq!(cfg.canonical_url("terms"), "https://example.com/terms");
    }

    #[test]
    fn test_empty_optional_values_are_dropped() {
        let cfg = SiteConfig::default()
            .analytics_id(Some(String::new()))
            .clarity_id(Some("abc".to_owned()))
            .ahrefs_key(Some(String::new()));
        assert_eq!(cfg.analytics(), None);
        assert_eq!(cfg.clarity(), Some("abc"));
        assert_eq!(cfg.ahrefs(), None);
    }
}
