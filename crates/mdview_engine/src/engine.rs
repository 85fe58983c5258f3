use std::collections::VecDeque;
use std::sync::Arc;

use engine_logging::{engine_debug, engine_info, engine_warn};
use mdview_core::{
    update, Effect, LoadFailure, LoadId, Msg, RenderedDocument, ResolvedDocument, ViewerState,
};

use crate::decode::{decode_body, CharsetChain, DEFAULT_FALLBACK_ENCODINGS};
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::heading::first_heading;
use crate::local::read_local_file;
use crate::payload::decode_base64;
use crate::render::{MarkdownRenderer, Renderer, DEFAULT_MAX_RENDER_BYTES};
use crate::welcome::WELCOME_MARKDOWN;

/// Knobs for building the default runner.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub fetch: FetchSettings,
    pub max_render_bytes: usize,
    pub fallback_encodings: Vec<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            fetch: FetchSettings::default(),
            max_render_bytes: DEFAULT_MAX_RENDER_BYTES,
            fallback_encodings: DEFAULT_FALLBACK_ENCODINGS
                .iter()
                .map(|label| label.to_string())
                .collect(),
        }
    }
}

/// Executes core effects and answers each one with the message that feeds
/// back into `update`. Engine errors become [`LoadFailure`]s here.
pub struct EffectRunner {
    fetcher: Arc<dyn Fetcher>,
    renderer: Arc<dyn Renderer>,
    charsets: CharsetChain,
}

impl EffectRunner {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        renderer: Arc<dyn Renderer>,
        charsets: CharsetChain,
    ) -> Self {
        Self {
            fetcher,
            renderer,
            charsets,
        }
    }

    pub fn from_settings(settings: EngineSettings) -> Self {
        Self::new(
            Arc::new(ReqwestFetcher::new(settings.fetch)),
            Arc::new(MarkdownRenderer::with_max_bytes(settings.max_render_bytes)),
            CharsetChain::from_labels(settings.fallback_encodings.as_slice()),
        )
    }

    /// Apply `msg`, then run every resulting effect, feeding each answer back
    /// through `update`, until no effects remain. Effects run one at a time.
    pub async fn dispatch(&self, mut state: ViewerState, msg: Msg) -> ViewerState {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            let (next, effects) = update(state, msg);
            state = next;
            for effect in effects {
                inbox.push_back(self.execute(effect).await);
            }
        }
        engine_debug!("Load {} settled in {:?}", state.load_id(), state.phase());
        state
    }

    pub async fn execute(&self, effect: Effect) -> Msg {
        engine_debug!("Executing {} for load {}", effect_name(&effect), effect.load_id());
        match effect {
            Effect::FetchRemote { load_id, url } => self.fetch_remote(load_id, url).await,
            Effect::DecodeBase64 { load_id, payload } => self.decode_payload(load_id, &payload),
            Effect::ReadLocalFile { load_id, path } => match read_local_file(&path).await {
                Ok(document) => Msg::DocumentResolved { load_id, document },
                Err(err) => {
                    engine_warn!("Local file read failed: {}", err);
                    Msg::LoadFailed {
                        load_id,
                        failure: LoadFailure::read(err.file_name(), err.to_string()),
                    }
                }
            },
            Effect::Render { load_id, document } => self.render_document(load_id, document),
            Effect::RenderWelcome { load_id } => match self.renderer.render(WELCOME_MARKDOWN) {
                Ok(html) => Msg::WelcomeRendered { load_id, html },
                Err(err) => Msg::LoadFailed {
                    load_id,
                    failure: LoadFailure::render(err.to_string()),
                },
            },
        }
    }

    async fn fetch_remote(&self, load_id: LoadId, url: String) -> Msg {
        match self.fetcher.fetch(&url).await {
            Ok(output) => {
                engine_info!(
                    "Fetched {} ({} bytes, {} redirects)",
                    output.metadata.final_url,
                    output.metadata.byte_len,
                    output.metadata.redirect_count
                );
                let text = decode_body(&output.bytes, output.metadata.content_type.as_deref());
                Msg::DocumentResolved {
                    load_id,
                    document: ResolvedDocument::new(text),
                }
            }
            Err(err) => {
                engine_warn!("Fetch of {} failed: {}", url, err);
                Msg::LoadFailed {
                    load_id,
                    failure: LoadFailure::fetch(&url, err.to_string()),
                }
            }
        }
    }

    fn decode_payload(&self, load_id: LoadId, payload: &str) -> Msg {
        match decode_base64(payload) {
            Ok(bytes) => {
                let decoded = self.charsets.decode(&bytes);
                engine_info!(
                    "Decoded base64 payload: {} bytes as {}",
                    bytes.len(),
                    decoded.encoding_label
                );
                Msg::DocumentResolved {
                    load_id,
                    document: ResolvedDocument::new(decoded.text),
                }
            }
            Err(err) => {
                engine_warn!("Base64 decode failed: {}", err);
                Msg::LoadFailed {
                    load_id,
                    failure: LoadFailure::decode(err.to_string()),
                }
            }
        }
    }

    fn render_document(&self, load_id: LoadId, document: ResolvedDocument) -> Msg {
        match self.renderer.render(&document.text) {
            Ok(html) => Msg::DocumentRendered {
                load_id,
                rendered: RenderedDocument {
                    first_heading: first_heading(&html),
                    html,
                    source_title: document.title,
                },
            },
            Err(err) => {
                engine_warn!("Render failed: {}", err);
                Msg::LoadFailed {
                    load_id,
                    failure: LoadFailure::render(err.to_string()),
                }
            }
        }
    }
}

fn effect_name(effect: &Effect) -> &'static str {
    match effect {
        Effect::FetchRemote { .. } => "FetchRemote",
        Effect::DecodeBase64 { .. } => "DecodeBase64",
        Effect::ReadLocalFile { .. } => "ReadLocalFile",
        Effect::Render { .. } => "Render",
        Effect::RenderWelcome { .. } => "RenderWelcome",
    }
}
