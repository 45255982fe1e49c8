//! Offline view of the local store.

use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::manifest::Manifest;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactStatus {
    pub name: String,
    pub path: PathBuf,
    pub present: bool,
    pub size: Option<u64>,
}

/// Presence of each manifest artifact, in manifest order. No network access.
pub fn inspect(manifest: &Manifest) -> Vec<ArtifactStatus> {
    manifest
        .artifacts()
        .iter()
        .map(|artifact| {
            let path = manifest.local_path(artifact);
            let size = fs::metadata(&path)
                .ok()
                .filter(|m| m.is_file())
                .map(|m| m.len());
            ArtifactStatus {
                name: artifact.name.clone(),
                present: size.is_some(),
                size,
                path,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_present_and_missing_in_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("beta.model"), b"12345").unwrap();
        let m = Manifest::new(
            "https://example.org/models",
            dir.path(),
            ["alpha.model", "beta.model"],
        );

        let report = inspect(&m);
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].name, "alpha.model");
        assert!(!report[0].present);
        assert_eq!(report[0].size, None);
        assert_eq!(report[1].name, "beta.model");
        assert!(report[1].present);
        assert_eq!(report[1].size, Some(5));
    }

    #[test]
    fn missing_directory_means_everything_missing() {
        let dir = tempfile::tempdir().unwrap();
        let m = Manifest::new("https://example.org", dir.path().join("nope"), ["a"]);
        assert!(inspect(&m).iter().all(|s| !s.present));
    }
}
