//! Report rendering
//!
//! Reports are rendered completely into memory. Callers write the bytes
//! out only once rendering succeeded, so a failed run never leaves a
//! partial report on stdout.

use std::io::Write;

use crate::error::{ReleaseError, Result};
use crate::manifest::ArtifactRecord;

/// Render records as CSV with a fixed header row
///
/// The header is written even when there are no records.
pub fn to_csv(records: &[ArtifactRecord]) -> Result<Vec<u8>> {
    let render_error = |e: csv::Error| ReleaseError::Render {
        format: "csv",
        source: Box::new(e),
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer
        .write_record(ArtifactRecord::COLUMNS)
        .map_err(render_error)?;
    for record in records {
        writer.serialize(record).map_err(render_error)?;
    }

    writer.into_inner().map_err(|e| ReleaseError::Render {
        format: "csv",
        source: Box::new(e.into_error()),
    })
}

/// Render records as a pretty-printed JSON array
pub fn to_json(records: &[ArtifactRecord]) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(records).map_err(|e| ReleaseError::Render {
        format: "json",
        source: Box::new(e),
    })?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Write a fully rendered report and flush
pub fn emit(mut out: impl Write, rendered: &[u8]) -> Result<()> {
    out.write_all(rendered)
        .and_then(|()| out.flush())
        .map_err(|source| ReleaseError::Write { source })
}
