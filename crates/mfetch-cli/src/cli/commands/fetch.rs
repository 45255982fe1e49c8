//! `mfetch fetch` – make every manifest artifact present.

use std::io::{self, Write};

use anyhow::{Context, Result};
use mfetch_core::config::MfetchConfig;
use mfetch_core::transport::Transport;
use mfetch_core::{FetchEvent, Fetcher};

use crate::cli::ManifestArgs;

pub fn run_fetch(cfg: &MfetchConfig, source: &ManifestArgs) -> Result<()> {
    let fetcher = Fetcher::from_config(cfg);
    let stdout = io::stdout();
    fetch_to(&fetcher, cfg, source, &mut stdout.lock())
}

/// Runs the fetcher and writes the operator lines to `out`: one per artifact,
/// then `all <n> artifact(s) ready in <dir>` on success.
pub(crate) fn fetch_to<T, W>(
    fetcher: &Fetcher<T>,
    cfg: &MfetchConfig,
    source: &ManifestArgs,
    out: &mut W,
) -> Result<()>
where
    T: Transport,
    W: Write,
{
    let manifest = source.resolve(cfg)?;

    let mut write_err = None;
    let summary = fetcher.ensure_all(&manifest, |event| match event {
        // main prints the full cause chain for the failing artifact.
        FetchEvent::Failed { .. } => {}
        FetchEvent::Fetched { .. } => tracing::debug!("{}", event),
        _ => {
            if let Err(e) = writeln!(out, "{}", event) {
                write_err.get_or_insert(e);
            }
        }
    })?;
    if let Some(e) = write_err {
        return Err(e).context("failed to write progress");
    }

    writeln!(
        out,
        "all {} artifact(s) ready in {}",
        summary.total(),
        manifest.target_dir().display()
    )?;
    Ok(())
}
