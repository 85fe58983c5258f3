use url::Url;

use crate::view_model::{FilePicker, PageBody, PageView};
use crate::LoadFailure;

pub type LoadId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    /// A remote fetch is in flight.
    Loading,
    Rendered,
    Errored,
}

/// What the single content region currently holds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Content {
    #[default]
    Blank,
    Loading {
        url: String,
    },
    Welcome {
        html: String,
    },
    Document {
        html: String,
    },
    Failed(LoadFailure),
}

/// Everything the presentation layer shows: one content region, the page
/// title and the optional base reference. Only the current load writes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerState {
    location: Url,
    default_title: String,
    title_override: Option<String>,
    load_id: LoadId,
    phase: LoadPhase,
    title: String,
    base_href: Option<String>,
    content: Content,
}

impl ViewerState {
    /// `location` is the page's own address, used to resolve relative `url`
    /// parameters. `default_title` is shown until a document provides one.
    pub fn new(location: Url, default_title: impl Into<String>) -> Self {
        let default_title = default_title.into();
        Self {
            location,
            title: default_title.clone(),
            default_title,
            title_override: None,
            load_id: 0,
            phase: LoadPhase::Idle,
            base_href: None,
            content: Content::Blank,
        }
    }

    pub fn location(&self) -> &Url {
        &self.location
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn base_href(&self) -> Option<&str> {
        self.base_href.as_deref()
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn load_id(&self) -> LoadId {
        self.load_id
    }

    /// Rendered and Errored are terminal for the current load.
    pub fn is_settled(&self) -> bool {
        matches!(self.phase, LoadPhase::Rendered | LoadPhase::Errored)
    }

    pub fn view(&self) -> PageView {
        let body = match &self.content {
            Content::Blank => PageBody::Blank,
            Content::Loading { url } => PageBody::Loading { url: url.clone() },
            Content::Welcome { html } => PageBody::Welcome {
                html: html.clone(),
                picker: FilePicker::default(),
            },
            Content::Document { html } => PageBody::Document { html: html.clone() },
            Content::Failed(failure) => PageBody::Error {
                title: failure.title.clone(),
                message: failure.message.clone(),
                detail: failure.detail.clone(),
            },
        };
        PageView {
            title: self.title.clone(),
            base_href: self.base_href.clone(),
            phase: self.phase,
            body,
        }
    }

    /// Start a new load: bump the id, return to Idle and clear the content
    /// region. Results tagged with an older id are ignored from now on.
    pub(crate) fn begin_load(&mut self, title_override: Option<String>) -> LoadId {
        self.load_id += 1;
        self.title_override = title_override;
        self.phase = LoadPhase::Idle;
        self.content = Content::Blank;
        self.load_id
    }

    pub(crate) fn is_current(&self, load_id: LoadId) -> bool {
        load_id == self.load_id
    }

    pub(crate) fn title_override(&self) -> Option<&str> {
        self.title_override.as_deref()
    }

    pub(crate) fn set_base_href(&mut self, base_href: Option<String>) {
        self.base_href = base_href;
    }

    pub(crate) fn start_fetch(&mut self, url: &str) {
        self.phase = LoadPhase::Loading;
        self.content = Content::Loading {
            url: url.to_string(),
        };
    }

    pub(crate) fn apply_document(&mut self, html: String, title: Option<String>) {
        self.phase = LoadPhase::Rendered;
        self.content = Content::Document { html };
        self.title = title.unwrap_or_else(|| self.default_title.clone());
    }

    pub(crate) fn apply_welcome(&mut self, html: String) {
        self.phase = LoadPhase::Rendered;
        self.content = Content::Welcome { html };
        self.title = self
            .title_override
            .clone()
            .unwrap_or_else(|| self.default_title.clone());
    }

    pub(crate) fn apply_failure(&mut self, failure: LoadFailure) {
        self.phase = LoadPhase::Errored;
        self.title = format!("{} - {}", failure.title, self.default_title);
        self.content = Content::Failed(failure);
    }
}
