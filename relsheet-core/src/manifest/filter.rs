//! Report relevance filter

use super::record::{ArtifactRecord, SOURCE_PLATFORM};

/// Formats that accompany an artifact rather than being one
const EXCLUDED_FORMATS: [&str; 2] = ["txt", "asc"];

/// Artifact kind for platform installer packages
const INSTALLER_KIND: &str = "installer";

/// Whether a record belongs in the download report
///
/// Checksum/text files and detached signatures, source tarballs and
/// installers are all reported elsewhere.
pub fn is_reportable(record: &ArtifactRecord) -> bool {
    !EXCLUDED_FORMATS.contains(&record.format())
        && record.platform() != SOURCE_PLATFORM
        && record.kind() != INSTALLER_KIND
}

/// Drop records that don't belong in the report, keeping input order
pub fn filter(records: Vec<ArtifactRecord>) -> Vec<ArtifactRecord> {
    records.into_iter().filter(is_reportable).collect()
}
