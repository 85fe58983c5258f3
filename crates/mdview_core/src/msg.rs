use std::path::PathBuf;

use crate::{LoadFailure, LoadId, RenderedDocument, ResolvedDocument};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Page (re)load with the given query string.
    Navigate { query: String },
    /// User picked a local file from the welcome page.
    LocalFilePicked { path: PathBuf },
    /// Raw text is available for the given load.
    DocumentResolved {
        load_id: LoadId,
        document: ResolvedDocument,
    },
    /// Renderer finished for the given load.
    DocumentRendered {
        load_id: LoadId,
        rendered: RenderedDocument,
    },
    /// Welcome document finished rendering.
    WelcomeRendered { load_id: LoadId, html: String },
    /// Any step of the given load failed.
    LoadFailed {
        load_id: LoadId,
        failure: LoadFailure,
    },
}
