//! Newest-first report ordering

use std::cmp::Ordering;

use super::record::ArtifactRecord;

/// Report order: `(sort_key, url)` descending
///
/// A larger sort key comes first; equal keys fall back to the larger URL.
pub fn compare(a: &ArtifactRecord, b: &ArtifactRecord) -> Ordering {
    b.order_key().cmp(&a.order_key())
}

/// Put records in report order
///
/// Takes ownership, so no collection a caller still holds gets reordered.
pub fn order(mut records: Vec<ArtifactRecord>) -> Vec<ArtifactRecord> {
    records.sort_by(compare);
    records
}
