//! RON configuration for the viewer.
//!
//! Lives at `.mdview.ron` in the working directory unless `--config` names
//! another file. Missing keys fall back to defaults; CLI flags override file values.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use engine_logging::{engine_debug, engine_info};
use mdview_engine::{
    AtomicFileWriter, EngineSettings, FetchSettings, PersistError, DEFAULT_FALLBACK_ENCODINGS,
    DEFAULT_MAX_RENDER_BYTES,
};
use serde::{Deserialize, Serialize};
use url::Url;

pub(crate) const CONFIG_FILENAME: &str = ".mdview.ron";

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
    #[error("page_location {location:?} is not an absolute URL: {source}")]
    InvalidLocation {
        location: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to write config: {0}")]
    Write(#[from] PersistError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ViewerConfig {
    /// Address the page is considered to live at; relative `url` values resolve against it.
    pub page_location: String,
    /// Title shown when neither the query nor the document provides one.
    pub default_title: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_fetch_bytes: u64,
    pub max_render_bytes: usize,
    /// WHATWG encoding labels tried after strict UTF-8 for base64 payloads.
    pub fallback_encodings: Vec<String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            page_location: "http://localhost/".to_string(),
            default_title: "Markdown Viewer".to_string(),
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            max_fetch_bytes: fetch.max_bytes,
            max_render_bytes: DEFAULT_MAX_RENDER_BYTES,
            fallback_encodings: DEFAULT_FALLBACK_ENCODINGS
                .iter()
                .map(|label| label.to_string())
                .collect(),
        }
    }
}

impl ViewerConfig {
    pub(crate) fn location(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.page_location).map_err(|source| ConfigError::InvalidLocation {
            location: self.page_location.clone(),
            source,
        })
    }

    pub(crate) fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            fetch: FetchSettings {
                connect_timeout: Duration::from_secs(self.connect_timeout_secs),
                request_timeout: Duration::from_secs(self.request_timeout_secs),
                max_bytes: self.max_fetch_bytes,
                ..FetchSettings::default()
            },
            max_render_bytes: self.max_render_bytes,
            fallback_encodings: self.fallback_encodings.clone(),
        }
    }
}

pub(crate) fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(|| PathBuf::from(CONFIG_FILENAME), Path::to_path_buf)
}

/// Load the config. A missing default file yields defaults; a missing
/// explicitly named file is an error.
pub(crate) fn load_config(explicit: Option<&Path>) -> Result<ViewerConfig, ConfigError> {
    let path = config_path(explicit);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound && explicit.is_none() => {
            engine_debug!("No config at {:?}; using defaults", path);
            return Ok(ViewerConfig::default());
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    let config = ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;
    engine_info!("Loaded config from {:?}", path);
    Ok(config)
}

pub(crate) fn save_config(path: &Path, config: &ViewerConfig) -> Result<PathBuf, ConfigError> {
    let content = ron::ser::to_string_pretty(config, ron::ser::PrettyConfig::new())?;
    let (writer, filename) = AtomicFileWriter::for_target(path);
    let written = writer.write(&filename, &content)?;
    engine_info!("Wrote config to {:?}", written);
    Ok(written)
}
