use std::path::PathBuf;

use crate::{LoadId, ResolvedDocument};

/// Work the core asks the outside world to perform. Every effect carries the
/// load it belongs to so its answer can be matched against the current load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// GET the absolute URL and answer with the body text.
    FetchRemote { load_id: LoadId, url: String },
    /// Normalize and decode a base64 payload synchronously.
    DecodeBase64 { load_id: LoadId, payload: String },
    /// Read a user-picked local file.
    ReadLocalFile { load_id: LoadId, path: PathBuf },
    /// Convert resolved Markdown to HTML.
    Render {
        load_id: LoadId,
        document: ResolvedDocument,
    },
    /// Render the built-in welcome document.
    RenderWelcome { load_id: LoadId },
}

impl Effect {
    pub fn load_id(&self) -> LoadId {
        match self {
            Effect::FetchRemote { load_id, .. }
            | Effect::DecodeBase64 { load_id, .. }
            | Effect::ReadLocalFile { load_id, .. }
            | Effect::Render { load_id, .. }
            | Effect::RenderWelcome { load_id } => *load_id,
        }
    }
}
