/// Text handed to the renderer, plus the title the source itself suggests
/// (a local file's name; remote and base64 sources carry none).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedDocument {
    pub text: String,
    pub title: Option<String>,
}

impl ResolvedDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Renderer output for a resolved document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub html: String,
    /// Text of the first `h1`..`h6` in document order, if any.
    pub first_heading: Option<String>,
    /// Carried over from [`ResolvedDocument::title`].
    pub source_title: Option<String>,
}
