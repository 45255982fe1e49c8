//! `mfetch status` – show which artifacts are already in the target directory.

use anyhow::Result;
use mfetch_core::config::MfetchConfig;
use mfetch_core::fetcher;

use crate::cli::ManifestArgs;

pub fn run_status(cfg: &MfetchConfig, source: &ManifestArgs, json: bool) -> Result<()> {
    let manifest = source.resolve(cfg)?;
    let report = fetcher::inspect(&manifest);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", manifest.target_dir().display());
    if report.is_empty() {
        println!("Manifest lists no artifacts.");
        return Ok(());
    }
    println!("{:<8} {:<12} {}", "STATE", "SIZE", "NAME");
    for s in &report {
        let size_str = s
            .size
            .map(|n| format!("{n}"))
            .unwrap_or_else(|| "-".to_string());
        let state = if s.present { "present" } else { "missing" };
        println!("{:<8} {:<12} {}", state, size_str, s.name);
    }
    let missing = report.iter().filter(|s| !s.present).count();
    if missing > 0 {
        println!("{missing} of {} artifact(s) missing", report.len());
    }
    Ok(())
}
