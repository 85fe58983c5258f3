use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use engine_logging::{engine_info, engine_warn};
use mdview_core::{LoadPhase, Msg, ViewerState};
use mdview_engine::{deterministic_filename, present_page, AtomicFileWriter, EffectRunner};

use crate::cli::Cli;
use crate::config::{config_path, load_config, save_config};

/// Resolve, render and write one page. Returns the phase the load settled in.
pub(crate) fn run(cli: &Cli) -> anyhow::Result<LoadPhase> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(location) = &cli.location {
        config.page_location = location.clone();
    }
    if cli.write_config {
        save_config(&config_path(cli.config.as_deref()), &config)?;
    }

    let location = config.location()?;
    let runner = EffectRunner::from_settings(config.engine_settings());
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let query = cli.query_string();
    engine_info!("Loading page {} with query {:?}", location, query);
    let initial = ViewerState::new(location, config.default_title.clone());
    let state = runtime.block_on(async {
        let state = runner.dispatch(initial, Msg::Navigate { query }).await;
        match &cli.file {
            Some(path) => {
                runner
                    .dispatch(state, Msg::LocalFilePicked { path: path.clone() })
                    .await
            }
            None => state,
        }
    });

    if !state.is_settled() {
        engine_warn!("Load {} ended without settling ({:?})", state.load_id(), state.phase());
    } else if state.phase() == LoadPhase::Errored {
        engine_warn!("Load failed: {}", state.title());
    }

    let page = present_page(&state.view());
    match output_target(cli, &state) {
        Some(target) => {
            let (writer, filename) = AtomicFileWriter::for_target(&target);
            let written = writer
                .write(&filename, &page)
                .with_context(|| format!("failed to write page to {}", target.display()))?;
            engine_info!("Wrote {}", written.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(page.as_bytes())
                .and_then(|()| stdout.flush())
                .context("failed to write page to stdout")?;
        }
    }

    Ok(state.phase())
}

fn output_target(cli: &Cli, state: &ViewerState) -> Option<PathBuf> {
    if let Some(out) = &cli.out {
        return Some(out.clone());
    }
    let dir = cli.out_dir.as_ref()?;
    let source = match &cli.file {
        Some(path) => path.display().to_string(),
        None => cli.query_string(),
    };
    Some(dir.join(deterministic_filename(Some(state.title()), &source, "html")))
}
