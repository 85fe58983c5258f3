//! Viewer engine: IO pipeline, decoding, rendering and effect execution.
mod decode;
mod engine;
mod fetch;
mod filename;
mod heading;
mod local;
mod page;
mod payload;
mod persist;
mod render;
mod types;
mod welcome;

pub use decode::{
    decode_body, CharsetChain, DecodeStrategy, DecodedText, Latin1Widening, Permissive,
    StrictUtf8, DEFAULT_FALLBACK_ENCODINGS,
};
pub use engine::{EffectRunner, EngineSettings};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_ACCEPT};
pub use filename::deterministic_filename;
pub use heading::first_heading;
pub use local::{read_local_file, ReadError};
pub use page::present_page;
pub use payload::{decode_base64, normalize_base64, DecodeError};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use render::{MarkdownRenderer, RenderError, Renderer, DEFAULT_MAX_RENDER_BYTES};
pub use types::{FetchError, FetchFailure, FetchMetadata, FetchOutput};
pub use welcome::WELCOME_MARKDOWN;
