//! Applicability filter for the canonicalization middleware.
//!
//! API routes, built assets, image-optimization output and the favicon are
//! served as-is: no redirect, no enrichment headers. So are the health
//! endpoints, which the orchestrator calls over plain http on the pod address.

/// Prefixes excluded by default, relative to the leading `/`.
pub const DEFAULT_EXCLUDED: [&str; 6] =
    ["api", "_next/static", "_next/image", "favicon.ico", "healthz", "readyz"];

/// Path filter evaluated before canonicalization.
///
/// A path is excluded when the text after its leading `/` starts with one of
/// the prefixes. Matching is not segment-anchored: with the defaults,
/// `/apiary` is excluded as well as `/api/users`.
#[derive(Clone, Debug)]
pub struct PathFilter {
    excluded: Vec<String>,
}

impl PathFilter {
    /// A filter that excludes nothing.
    pub fn none() -> Self {
        Self { excluded: Vec::new() }
    }

    /// Adds an excluded prefix. A leading `/` is ignored.
    pub fn exclude(mut self, prefix: &str) -> Self {
        let prefix = prefix.trim_start_matches('/');
        if !prefix.is_empty() {
            self.excluded.push(prefix.to_owned());
        }
        self
    }

    /// Whether canonicalization runs for `path`.
    pub fn applies(&self, path: &str) -> bool {
        let rest = path.strip_prefix('/').unwrap_or(path);
        !self.excluded.iter().any(|p| rest.starts_with(p.as_str()))
    }
}

impl Default for PathFilter {
    fn default() -> Self {
        DEFAULT_EXCLUDED.iter().fold(Self::none(), |f, p| f.exclude(p))
    }
}
