//! Derived fields: sort key and display version
//!
//! Versions come as `YEAR.MONTH` (`2020.08`) or `YEAR.MONTH.PATCH`
//! (`2020.08.1`). Sort keys are compared as plain strings, so two-segment
//! versions are padded to `YEAR.MONTH.0` before they enter a key.
//! Otherwise `2020.08` build 1 (`2020.081`) would outrank `2020.08.1`
//! build 1 (`2020.08.11`).

use tracing::debug;

use super::record::{ArtifactRecord, RawArtifact, SOURCE_PLATFORM};
use crate::config::PipelineOptions;

/// Separator between sort key components
pub const SORT_KEY_DELIMITER: &str = "-";

/// Length of a canonical three-segment version such as `2020.08.1`
const CANONICAL_VERSION_LEN: usize = "2020.08.1".len();

/// Pad a version to three segments for sort-key purposes
///
/// Only versions that are shorter than the canonical form *and* have fewer
/// than three segments get `.0` appended. Anything else (already three
/// segments, four or more, unusually long) passes through untouched.
pub fn canonical_version(version: &str) -> String {
    let segments = version.split('.').count();
    if version.len() < CANONICAL_VERSION_LEN && segments < 3 {
        format!("{version}.0")
    } else {
        version.to_string()
    }
}

/// `<canonical version><build rev>-<platform>-<arch>`
///
/// The build revision is glued to the version without a separator:
/// `2020.08.1` rev 2 on linux/x86_64 gives `2020.08.12-linux-x86_64`.
pub fn sort_key(version: &str, build_revision: u32, platform: &str, architecture: &str) -> String {
    let version_part = format!("{}{}", canonical_version(version), build_revision);
    [version_part.as_str(), platform, architecture].join(SORT_KEY_DELIMITER)
}

/// Human-facing version
///
/// Source distributions aren't build-revisioned and show the bare version.
/// Everything else gets a two-digit build suffix: `2020.08.1-03`.
pub fn display_version(version: &str, build_revision: u32, platform: &str) -> String {
    if platform == SOURCE_PLATFORM {
        version.to_string()
    } else {
        format!("{version}-{build_revision:02}")
    }
}

/// Build the normalized record for one raw artifact
///
/// Never fails. The stored `version` is carried over unchanged; padding
/// only shows up inside the sort key.
pub fn normalize(raw: RawArtifact, options: &PipelineOptions) -> ArtifactRecord {
    if !looks_like_release_version(&raw.version) {
        debug!(
            "Unexpected version shape '{}' for {}; ordering may be off",
            raw.version, raw.url
        );
    }

    let url = if options.upgrade_insecure_urls {
        upgrade_insecure_url(&raw.url)
    } else {
        raw.url.clone()
    };
    let sort_key = sort_key(
        &raw.version,
        raw.build_revision,
        &raw.platform,
        &raw.architecture,
    );
    let display_version = display_version(&raw.version, raw.build_revision, &raw.platform);

    ArtifactRecord::from_parts(raw, url, sort_key, display_version)
}

/// Rewrite a leading `http://` to `https://`, once
fn upgrade_insecure_url(url: &str) -> String {
    match url.strip_prefix("http://") {
        Some(rest) => format!("https://{rest}"),
        None => url.to_string(),
    }
}

/// Two or three all-digit segments
fn looks_like_release_version(version: &str) -> bool {
    let segments: Vec<&str> = version.split('.').collect();
    (2..=3).contains(&segments.len())
        && segments
            .iter()
            .all(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
}
