//! relsheet library exports
//!
//! Fetches a release manifest, normalizes every artifact record, drops the
//! ones that don't belong in the download report and orders the rest
//! newest-first.

pub mod config;
pub mod error;
pub mod manifest;
pub mod pipeline;
pub mod report;

pub use config::{Config, PipelineOptions, SourceConfig};
pub use error::ReleaseError;
pub use manifest::{ArtifactRecord, RawArtifact};
pub use pipeline::{transform, Pipeline, PipelineStats, Report};
