//! Manifest validation.

use std::collections::HashSet;
use url::Url;

use super::{Manifest, ManifestError};
use crate::storage::TEMP_SUFFIX;

pub(super) fn parse_base_url(base_url: &str) -> Result<Url, ManifestError> {
    let url = Url::parse(base_url).map_err(|source| ManifestError::BaseUrl {
        url: base_url.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ManifestError::UnsupportedScheme(base_url.to_string())),
    }
}

/// Checks that `name` is usable both as a single URL path segment and as a
/// plain file name inside the target directory.
pub fn validate_name(name: &str) -> Result<(), ManifestError> {
    let invalid = |reason| ManifestError::InvalidName {
        name: name.to_string(),
        reason,
    };
    if name.is_empty() {
        return Err(invalid("empty"));
    }
    if name == "." || name == ".." {
        return Err(invalid("not a file name"));
    }
    if name.contains(['/', '\\']) {
        return Err(invalid("contains a path separator"));
    }
    if name.chars().any(|c| c == '\0' || c.is_control()) {
        return Err(invalid("contains control characters"));
    }
    if name.ends_with(TEMP_SUFFIX) {
        return Err(invalid("uses the reserved .part suffix"));
    }
    Ok(())
}

fn is_sha256_hex(s: &str) -> bool {
    s.len() == 64 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

pub(super) fn validate(manifest: &Manifest) -> Result<(), ManifestError> {
    parse_base_url(&manifest.base_url)?;

    let mut seen = HashSet::with_capacity(manifest.artifacts.len());
    for artifact in &manifest.artifacts {
        validate_name(&artifact.name)?;
        if !seen.insert(artifact.name.as_str()) {
            return Err(ManifestError::DuplicateName(artifact.name.clone()));
        }
        if let Some(digest) = &artifact.sha256 {
            if !is_sha256_hex(digest) {
                return Err(ManifestError::InvalidChecksum {
                    name: artifact.name.clone(),
                });
            }
        }
    }
    Ok(())
}
