//! Where the manifest comes from: CLI flags, then config, then the built-in one.

use anyhow::{Context, Result};
use clap::Args;
use mfetch_core::config::MfetchConfig;
use mfetch_core::Manifest;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Args)]
pub struct ManifestArgs {
    /// TOML manifest to use instead of the configured or built-in one.
    #[arg(long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Directory that holds the artifacts.
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Remote prefix the artifact names are appended to.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
}

impl ManifestArgs {
    pub fn resolve(&self, cfg: &MfetchConfig) -> Result<Manifest> {
        let mut manifest = match self.manifest.as_ref().or(cfg.manifest_path.as_ref()) {
            Some(path) => Manifest::load(path)
                .with_context(|| format!("load manifest {}", path.display()))?,
            None => Manifest::builtin(),
        };
        if let Some(dir) = self.dir.as_ref().or(cfg.target_dir.as_ref()) {
            manifest = manifest.with_target_dir(dir);
        }
        if let Some(base_url) = &self.base_url {
            manifest = manifest.with_base_url(base_url);
        }
        Ok(manifest)
    }
}
