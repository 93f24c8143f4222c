//! Artifact record types and manifest decoding

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ReleaseError, Result};

/// Platform value marking a source distribution
pub const SOURCE_PLATFORM: &str = "src";

/// One artifact entry exactly as the manifest publishes it
///
/// Field names follow the download site's JSON (`arch`, `build_rev`,
/// `type`, `ver`); the descriptive names are accepted as aliases. Derived
/// values the feed may carry (`sort_key`, `ver_with_build_rev`) are
/// ignored along with every other unknown field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawArtifact {
    /// Processor architecture (`x86_64`), empty when not arch-specific
    #[serde(default, rename = "arch", alias = "architecture", deserialize_with = "null_as_default")]
    pub architecture: String,

    /// Execution backend (`moar`), empty or null
    #[serde(default, deserialize_with = "null_as_default")]
    pub backend: String,

    /// Build number for repackaged releases of the same version
    #[serde(
        default,
        rename = "build_rev",
        alias = "buildRevision",
        deserialize_with = "null_as_default",
    )]
    pub build_revision: u32,

    /// File format (`tar.gz`, `zip`, `asc`, `txt`)
    #[serde(default, deserialize_with = "null_as_default")]
    pub format: String,

    /// Distribution name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Target platform (`linux`, `macos`, `win`) or `src`
    #[serde(default, deserialize_with = "null_as_default")]
    pub platform: String,

    /// Artifact role (`archive`, `sig`, `installer`)
    #[serde(default, rename = "type", alias = "kind", deserialize_with = "null_as_default")]
    pub kind: String,

    /// Download URL
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,

    /// `YEAR.MONTH` or `YEAR.MONTH.PATCH`
    #[serde(default, rename = "ver", alias = "version", deserialize_with = "null_as_default")]
    pub version: String,
}

/// A normalized artifact, one row of the report
///
/// Only [`normalize`](super::normalize) builds these. Every field is
/// read-only from the outside so ordering and rendering can't disturb a
/// record once its derived fields are set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactRecord {
    architecture: String,
    backend: String,
    build_revision: u32,
    format: String,
    name: String,
    platform: String,
    kind: String,
    url: String,
    version: String,
    sort_key: String,
    display_version: String,
}

impl ArtifactRecord {
    /// Column names in report order
    pub const COLUMNS: [&'static str; 11] = [
        "architecture",
        "backend",
        "buildRevision",
        "format",
        "name",
        "platform",
        "kind",
        "url",
        "version",
        "sortKey",
        "displayVersion",
    ];

    pub(crate) fn from_parts(
        raw: RawArtifact,
        url: String,
        sort_key: String,
        display_version: String,
    ) -> Self {
        Self {
            architecture: raw.architecture,
            backend: raw.backend,
            build_revision: raw.build_revision,
            format: raw.format,
            name: raw.name,
            platform: raw.platform,
            kind: raw.kind,
            url,
            version: raw.version,
            sort_key,
            display_version,
        }
    }

    pub fn architecture(&self) -> &str {
        &self.architecture
    }

    pub fn backend(&self) -> &str {
        &self.backend
    }

    pub fn build_revision(&self) -> u32 {
        self.build_revision
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Ordering key, meaningless on its own
    pub fn sort_key(&self) -> &str {
        &self.sort_key
    }

    /// Human-facing version, e.g. `2020.08.1-03`
    pub fn display_version(&self) -> &str {
        &self.display_version
    }

    /// `true` for source distributions
    pub fn is_source(&self) -> bool {
        self.platform == SOURCE_PLATFORM
    }

    /// Composite key the report is ordered by
    pub fn order_key(&self) -> (&str, &str) {
        (&self.sort_key, &self.url)
    }
}

/// Decode a manifest body into raw records
///
/// The body must be a JSON array of objects. An empty body is a decode
/// error like any other malformed input.
pub fn decode(bytes: &[u8]) -> Result<Vec<RawArtifact>> {
    serde_json::from_slice(bytes).map_err(|source| ReleaseError::Decode { source })
}

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_site_field_names() {
        let json = r#"[{
            "arch": "x86_64",
            "backend": "moar",
            "build_rev": 1,
            "format": "tar.gz",
            "name": "rakudo",
            "platform": "linux",
            "type": "archive",
            "url": "https://rakudo.org/dl/rakudo/rakudo-moar-2020.08-01-linux-x86_64.tar.gz",
            "ver": "2020.08"
        }]"#;

        let records = decode(json.as_bytes()).unwrap();
        assert_eq!(
            records,
            vec![RawArtifact {
                architecture: "x86_64".to_string(),
                backend: "moar".to_string(),
                build_revision: 1,
                format: "tar.gz".to_string(),
                name: "rakudo".to_string(),
                platform: "linux".to_string(),
                kind: "archive".to_string(),
                url: "https://rakudo.org/dl/rakudo/rakudo-moar-2020.08-01-linux-x86_64.tar.gz"
                    .to_string(),
                version: "2020.08".to_string(),
            }]
        );
    }

    #[test]
    fn test_decode_descriptive_aliases() {
        let json = r#"[{"architecture": "arm64", "buildRevision": 2, "kind": "sig", "version": "2021.02.1"}]"#;
        let records = decode(json.as_bytes()).unwrap();
        assert_eq!(records[0].architecture, "arm64");
        assert_eq!(records[0].build_revision, 2);
        assert_eq!(records[0].kind, "sig");
        assert_eq!(records[0].version, "2021.02.1");
    }

    #[test]
    fn test_nulls_and_missing_fields_default() {
        let json = r#"[{"backend": null, "build_rev": null, "platform": "src", "ver": "2020.08"}, {}]"#;
        let records = decode(json.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].backend, "");
        assert_eq!(records[0].build_revision, 0);
        assert_eq!(records[0].architecture, "");
        assert_eq!(records[1], RawArtifact::default());
    }

    #[test]
    fn test_derived_fields_in_input_are_ignored() {
        let json = r#"[{"ver": "2020.08", "sort_key": "9999", "ver_with_build_rev": "bogus", "padding": "", "extra": {"nested": true}}]"#;
        let records = decode(json.as_bytes()).unwrap();
        assert_eq!(records[0].version, "2020.08");
    }

    #[test]
    fn test_decode_rejects_non_array() {
        assert!(matches!(
            decode(br#"{"ver": "2020.08"}"#),
            Err(ReleaseError::Decode { .. })
        ));
        assert!(matches!(decode(b""), Err(ReleaseError::Decode { .. })));
        assert!(matches!(decode(b"<html>"), Err(ReleaseError::Decode { .. })));
    }

    #[test]
    fn test_decode_rejects_wrong_field_type() {
        let json = r#"[{"build_rev": "two"}]"#;
        assert!(matches!(
            decode(json.as_bytes()),
            Err(ReleaseError::Decode { .. })
        ));
    }

    #[test]
    fn test_decode_empty_array() {
        assert!(decode(b"[]").unwrap().is_empty());
    }
}
