//! Release manifest handling
//!
//! # Overview
//!
//! A manifest is a JSON array of artifact records published by the
//! distribution's download site. This module turns it into the ordered
//! list of artifacts a download page should show.
//!
//! # Architecture
//!
//! ```text
//! ManifestSource (HTTP / file)
//!     │  raw bytes
//!     ▼
//! decode        → Vec<RawArtifact>
//!     ▼
//! normalize     → Vec<ArtifactRecord>   (sortKey, displayVersion derived)
//!     ▼
//! filter        → drops txt/asc, src, installers
//!     ▼
//! order         → (sortKey, url) descending
//! ```

mod filter;
mod normalize;
mod order;
mod record;
mod source;

pub use filter::{filter, is_reportable};
pub use normalize::{
    canonical_version, display_version, normalize, sort_key, SORT_KEY_DELIMITER,
};
pub use order::{compare, order};
pub use record::{decode, ArtifactRecord, RawArtifact, SOURCE_PLATFORM};
pub use source::{FileSource, ManifestSource};

#[cfg(feature = "http")]
pub use source::HttpSource;

#[cfg(test)]
pub(crate) use source::MockSource;
