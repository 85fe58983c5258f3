use std::io;
use std::path::Path;

use engine_logging::engine_info;
use mdview_core::{ResolvedDocument, ACCEPTED_EXTENSIONS};

#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("{name} is not a Markdown or text file (expected one of {expected})")]
    UnsupportedExtension { name: String, expected: String },
    #[error("failed to read {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
}

impl ReadError {
    pub fn file_name(&self) -> &str {
        match self {
            ReadError::UnsupportedExtension { name, .. } | ReadError::Io { name, .. } => name,
        }
    }
}

/// Read a picked file as text, titled with its file name.
///
/// Only the picker's extensions are accepted. Bytes are decoded as UTF-8 with
/// replacement characters for malformed sequences.
pub async fn read_local_file(path: &Path) -> Result<ResolvedDocument, ReadError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    if !has_accepted_extension(&name) {
        return Err(ReadError::UnsupportedExtension {
            name,
            expected: ACCEPTED_EXTENSIONS.join(", "),
        });
    }

    let bytes = tokio::fs::read(path).await.map_err(|source| ReadError::Io {
        name: name.clone(),
        source,
    })?;
    engine_info!("Read {} bytes from {}", bytes.len(), path.display());

    let text = String::from_utf8_lossy(&bytes).into_owned();
    Ok(ResolvedDocument::new(text).with_title(name))
}

fn has_accepted_extension(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    ACCEPTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}
