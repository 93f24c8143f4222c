//! The fetch-transform pipeline
//!
//! ```text
//! source.fetch() → decode → normalize → filter → order → Report
//! ```
//!
//! Single pass, fail-fast. The first error aborts the run and nothing is
//! returned for rendering.

use tracing::{debug, info};

use crate::config::PipelineOptions;
use crate::error::Result;
use crate::manifest::{self, ArtifactRecord, ManifestSource, RawArtifact};

/// Record counts for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Records in the manifest
    pub decoded: usize,
    /// Records dropped by the filter
    pub dropped: usize,
    /// Records in the report
    pub kept: usize,
}

/// The ordered result of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    records: Vec<ArtifactRecord>,
    stats: PipelineStats,
}

impl Report {
    /// Records in report order
    pub fn records(&self) -> &[ArtifactRecord] {
        &self.records
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    pub fn into_records(self) -> Vec<ArtifactRecord> {
        self.records
    }
}

/// Runs one fetch-transform cycle against a manifest source
pub struct Pipeline {
    source: Box<dyn ManifestSource>,
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(source: Box<dyn ManifestSource>, options: PipelineOptions) -> Self {
        Self { source, options }
    }

    /// Fetch, decode and transform the manifest
    pub async fn run(&self) -> Result<Report> {
        let bytes = self.source.fetch().await?;
        let raw = manifest::decode(&bytes)?;
        info!(
            "Decoded {} manifest records from {}",
            raw.len(),
            self.source.describe()
        );

        Ok(transform(raw, &self.options))
    }
}

/// Normalize, filter and order already-decoded records
///
/// Pure and infallible; the network-free half of [`Pipeline::run`].
pub fn transform(raw: Vec<RawArtifact>, options: &PipelineOptions) -> Report {
    let decoded = raw.len();

    let normalized: Vec<ArtifactRecord> = raw
        .into_iter()
        .map(|r| manifest::normalize(r, options))
        .collect();

    let kept = manifest::filter(normalized);
    let stats = PipelineStats {
        decoded,
        dropped: decoded - kept.len(),
        kept: kept.len(),
    };
    debug!(
        "Filter kept {} of {} records ({} dropped)",
        stats.kept, stats.decoded, stats.dropped
    );

    Report {
        records: manifest::order(kept),
        stats,
    }
}
