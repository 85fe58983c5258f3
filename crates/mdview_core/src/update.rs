use crate::source::{directory_base, resolve_against};
use crate::{Effect, LoadFailure, Msg, QueryParams, SourceRef, ViewerState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ViewerState, msg: Msg) -> (ViewerState, Vec<Effect>) {
    let effects = match msg {
        Msg::Navigate { query } => {
            let params = QueryParams::parse(&query);
            let load_id = state.begin_load(params.title.clone());
            match SourceRef::from_params(&params) {
                SourceRef::RemoteUrl(raw) => match resolve_against(state.location(), &raw) {
                    Ok(url) => {
                        // Base is in place before the fetch so that an error page
                        // still resolves relative to the requested document.
                        state.set_base_href(directory_base(&url).map(|base| base.to_string()));
                        state.start_fetch(url.as_str());
                        vec![Effect::FetchRemote {
                            load_id,
                            url: url.to_string(),
                        }]
                    }
                    Err(err) => {
                        state.set_base_href(None);
                        state.apply_failure(LoadFailure::input(&raw, err.to_string()));
                        Vec::new()
                    }
                },
                SourceRef::Base64Payload(payload) => {
                    state.set_base_href(None);
                    vec![Effect::DecodeBase64 { load_id, payload }]
                }
                SourceRef::LocalFile(path) => {
                    state.set_base_href(None);
                    vec![Effect::ReadLocalFile { load_id, path }]
                }
                SourceRef::None => {
                    state.set_base_href(None);
                    vec![Effect::RenderWelcome { load_id }]
                }
            }
        }
        Msg::LocalFilePicked { path } => {
            let title_override = state.title_override().map(ToOwned::to_owned);
            let load_id = state.begin_load(title_override);
            state.set_base_href(None);
            vec![Effect::ReadLocalFile { load_id, path }]
        }
        Msg::DocumentResolved { load_id, document } => {
            if !state.is_current(load_id) {
                return (state, Vec::new());
            }
            vec![Effect::Render { load_id, document }]
        }
        Msg::DocumentRendered { load_id, rendered } => {
            if !state.is_current(load_id) {
                return (state, Vec::new());
            }
            let title = state
                .title_override()
                .map(ToOwned::to_owned)
                .or(rendered.source_title)
                .or(rendered.first_heading);
            state.apply_document(rendered.html, title);
            Vec::new()
        }
        Msg::WelcomeRendered { load_id, html } => {
            if !state.is_current(load_id) {
                return (state, Vec::new());
            }
            state.apply_welcome(html);
            Vec::new()
        }
        Msg::LoadFailed { load_id, failure } => {
            if !state.is_current(load_id) {
                return (state, Vec::new());
            }
            state.apply_failure(failure);
            Vec::new()
        }
    };

    (state, effects)
}
