use std::path::PathBuf;

use clap::Parser;
use engine_logging::{level_from_verbosity, LogDestination};
use url::form_urlencoded;

/// Render a Markdown document into a standalone HTML page.
#[derive(Parser, Debug)]
#[command(
    name = "mdview",
    version,
    about = "Render a Markdown document from a URL, a base64 payload or a local file into an HTML page.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Query string as it would follow the page address, e.g. `?url=README.md&title=Docs`.
    pub query: Option<String>,

    /// Remote document (absolute, or relative to the page location).
    #[arg(long)]
    pub url: Option<String>,

    /// Inline document, standard or URL-safe base64.
    #[arg(long)]
    pub base64: Option<String>,

    /// Page title override.
    #[arg(long)]
    pub title: Option<String>,

    /// Local .md, .markdown or .txt file, opened after the initial page load.
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Page location used to resolve relative `url` values.
    #[arg(long, env = "MDVIEW_LOCATION")]
    pub location: Option<String>,

    /// Write the page to this file instead of stdout.
    #[arg(short, long, conflicts_with = "out_dir")]
    pub out: Option<PathBuf>,

    /// Write the page into this directory under a name derived from its title.
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Configuration file (defaults to `.mdview.ron` in the working directory).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Save the effective configuration to the configuration file.
    #[arg(long)]
    pub write_config: bool,

    /// Also write logs to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log only to `--log-file`, keeping the terminal silent.
    #[arg(long, requires = "log_file")]
    pub quiet: bool,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub(crate) fn init_logging(&self) {
        engine_logging::initialize(self.log_destination(), level_from_verbosity(self.verbose));
    }

    fn log_destination(&self) -> LogDestination {
        match (&self.log_file, self.quiet) {
            (Some(path), true) => LogDestination::File(path.clone()),
            (Some(path), false) => LogDestination::Both(path.clone()),
            (None, _) => LogDestination::Terminal,
        }
    }

    /// Flags first, then the positional query. The first occurrence of a key
    /// wins, so a flag overrides the same key in the positional query.
    pub(crate) fn query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in [
            ("url", &self.url),
            ("base64", &self.base64),
            ("title", &self.title),
        ] {
            if let Some(value) = value {
                serializer.append_pair(key, value);
            }
        }
        let flags = serializer.finish();

        let positional = self
            .query
            .as_deref()
            .map(|q| q.trim().trim_start_matches('?'))
            .unwrap_or_default();

        match (flags.is_empty(), positional.is_empty()) {
            (true, _) => positional.to_string(),
            (false, true) => flags,
            (false, false) => format!("{flags}&{positional}"),
        }
    }
}
