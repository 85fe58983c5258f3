use std::fmt;

/// Which step of a load failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The `url` parameter could not be resolved.
    Input,
    /// Non-success status, network or cross-origin rejection.
    Fetch,
    /// Base64 payload malformed after normalization.
    Decode,
    /// Converter failure.
    Render,
    /// Local file I/O failure.
    Read,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Input => write!(f, "input error"),
            FailureKind::Fetch => write!(f, "fetch error"),
            FailureKind::Decode => write!(f, "decode error"),
            FailureKind::Render => write!(f, "render error"),
            FailureKind::Read => write!(f, "read error"),
        }
    }
}

/// A terminal failure for one load, shown in the content region as a titled
/// message block followed by the raw technical detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub kind: FailureKind,
    pub title: String,
    pub message: String,
    pub detail: String,
}

const FETCH_HINT: &str = "The server may be unreachable, may have answered with an error status, \
or may not allow cross-origin requests. Try a CORS-enabled mirror such as \
raw.githubusercontent.com or a raw gist link, or pass the document inline with the \
base64 parameter instead.";

impl LoadFailure {
    pub fn new(
        kind: FailureKind,
        title: impl Into<String>,
        message: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            detail: detail.into(),
        }
    }

    pub fn input(raw: &str, detail: impl Into<String>) -> Self {
        Self::new(
            FailureKind::Input,
            "Invalid document URL",
            format!("The url parameter \"{raw}\" is not a valid URL."),
            detail,
        )
    }

    /// `url` must be the resolved absolute address; it is quoted verbatim.
    pub fn fetch(url: &str, detail: impl Into<String>) -> Self {
        Self::new(
            FailureKind::Fetch,
            "Failed to load document",
            format!("Could not fetch {url}. {FETCH_HINT}"),
            detail,
        )
    }

    pub fn decode(detail: impl Into<String>) -> Self {
        Self::new(
            FailureKind::Decode,
            "Invalid base64 payload",
            "The base64 parameter could not be decoded. Check that the payload was not truncated.",
            detail,
        )
    }

    pub fn render(detail: impl Into<String>) -> Self {
        Self::new(
            FailureKind::Render,
            "Failed to render document",
            "The Markdown converter rejected this document.",
            detail,
        )
    }

    pub fn read(name: &str, detail: impl Into<String>) -> Self {
        Self::new(
            FailureKind::Read,
            "Failed to read local file",
            format!("Could not read \"{name}\"."),
            detail,
        )
    }
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.title, self.kind, self.detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_failure_quotes_url_and_suggests_alternatives() {
        let failure = LoadFailure::fetch("https://example.com/a.md", "http status 404");
        assert_eq!(failure.kind, FailureKind::Fetch);
        assert!(failure.message.contains("https://example.com/a.md"));
        assert!(failure.message.contains("CORS"));
        assert!(failure.message.contains("base64"));
        assert_eq!(failure.detail, "http status 404");
    }

    #[test]
    fn display_includes_kind_and_detail() {
        let failure = LoadFailure::decode("Invalid padding");
        assert_eq!(
            failure.to_string(),
            "Invalid base64 payload (decode error): Invalid padding"
        );
    }
}
