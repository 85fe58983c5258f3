use std::path::PathBuf;

use url::{form_urlencoded, Url};

/// The recognized query parameters of one page load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryParams {
    pub url: Option<String>,
    pub base64: Option<String>,
    pub title: Option<String>,
}

impl QueryParams {
    /// Parse a query string, with or without the leading `?`.
    ///
    /// Values are form-decoded, so a literal `+` arrives as a space. The first
    /// non-empty occurrence of each key wins; unknown keys are ignored.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            let slot = match key.as_ref() {
                "url" => &mut params.url,
                "base64" => &mut params.base64,
                "title" => &mut params.title,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }
}

/// Where the document text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRef {
    RemoteUrl(String),
    Base64Payload(String),
    LocalFile(PathBuf),
    None,
}

impl SourceRef {
    /// `url` takes precedence over `base64`. A local file is never selected
    /// from parameters; it only comes from an explicit pick.
    pub fn from_params(params: &QueryParams) -> Self {
        if let Some(url) = &params.url {
            return SourceRef::RemoteUrl(url.clone());
        }
        if let Some(payload) = &params.base64 {
            return SourceRef::Base64Payload(payload.clone());
        }
        SourceRef::None
    }
}

/// Resolve an absolute or relative reference against the page location.
pub fn resolve_against(location: &Url, raw: &str) -> Result<Url, url::ParseError> {
    location.join(raw.trim())
}

/// Directory form of `url`: final path segment, query and fragment removed.
///
/// Returns `None` for URLs without a hierarchical path (`data:`, `mailto:`).
pub fn directory_base(url: &Url) -> Option<Url> {
    if url.cannot_be_a_base() {
        return None;
    }
    let mut base = url.clone();
    base.set_query(None);
    base.set_fragment(None);
    let dir_end = base.path().rfind('/').map_or(0, |idx| idx + 1);
    let dir = base.path()[..dir_end].to_string();
    base.set_path(if dir.is_empty() { "/" } else { &dir });
    Some(base)
}
