//! Viewer core: pure state machine, source resolution rules and view-model helpers.
mod document;
mod effect;
mod failure;
mod msg;
mod source;
mod state;
mod update;
mod view_model;

pub use document::{RenderedDocument, ResolvedDocument};
pub use effect::Effect;
pub use failure::{FailureKind, LoadFailure};
pub use msg::Msg;
pub use source::{directory_base, resolve_against, QueryParams, SourceRef};
pub use state::{Content, LoadId, LoadPhase, ViewerState};
pub use update::update;
pub use view_model::{FilePicker, PageBody, PageView, ACCEPTED_EXTENSIONS};
