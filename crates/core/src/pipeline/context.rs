//! Caller-owned search parameters.

use serde::{Deserialize, Serialize};

use crate::config::Config;

use super::PipelineError;

/// Everything the pipeline needs to know about one search. Owned by the
/// caller and passed by reference into each run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchContext {
    /// Site whose detail pages are probed, without trailing slash.
    pub site_url: String,
    /// Uploader identities to keep. Matched exactly.
    pub uploaders: Vec<String>,
    /// Search terms, one index query each.
    pub terms: Vec<String>,
}

impl SearchContext {
    /// Build a context from values that are already normalized.
    pub fn new(site_url: impl Into<String>, uploaders: Vec<String>, terms: Vec<String>) -> Self {
        Self {
            site_url: site_url.into(),
            uploaders,
            terms,
        }
    }

    /// Build a context from raw user input: capitalizes uploaders,
    /// lower-cases terms, drops blank entries and cleans up the site URL.
    pub fn normalized<U, T>(site_url: &str, uploaders: U, terms: T) -> Self
    where
        U: IntoIterator,
        U::Item: AsRef<str>,
        T: IntoIterator,
        T::Item: AsRef<str>,
    {
        Self {
            site_url: normalize_site_url(site_url),
            uploaders: uploaders
                .into_iter()
                .map(|u| normalize_uploader(u.as_ref()))
                .filter(|u| !u.is_empty())
                .collect(),
            terms: terms
                .into_iter()
                .map(|t| normalize_term(t.as_ref()))
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    /// Normalized context from the `[site]` and `[search]` config sections.
    pub fn from_config(config: &Config) -> Self {
        Self::normalized(
            &config.site.url,
            &config.search.usernames,
            &config.search.terms,
        )
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.site_url.is_empty() {
            return Err(PipelineError::NoSite);
        }
        if self.uploaders.is_empty() {
            return Err(PipelineError::NoUploaders);
        }
        if self.terms.is_empty() {
            return Err(PipelineError::NoTerms);
        }
        Ok(())
    }
}

/// Trim and capitalize: first character upper-case, the rest lower-case.
pub fn normalize_uploader(name: &str) -> String {
    let mut chars = name.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Trim and lower-case.
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Clean up a pasted site address: drop a leading `www.`, default to
/// `https://`, and strip a trailing `index.html` and slashes.
pub fn normalize_site_url(url: &str) -> String {
    let url = url.trim();
    let url = url.strip_prefix("www.").unwrap_or(url);

    let mut url = if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else if url.is_empty() {
        return String::new();
    } else {
        format!("https://{}", url)
    };

    if let Some(stripped) = url.strip_suffix("index.html") {
        url = stripped.to_string();
    }
    url.trim_end_matches('/').to_string()
}
