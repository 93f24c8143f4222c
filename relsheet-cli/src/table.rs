//! Terminal table rendering for `--format table`

use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use relsheet_core::ArtifactRecord;

#[derive(Tabled)]
struct ArtifactRow {
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Platform")]
    platform: String,
    #[tabled(rename = "Arch")]
    architecture: String,
    #[tabled(rename = "Backend")]
    backend: String,
    #[tabled(rename = "Format")]
    format: String,
    #[tabled(rename = "URL")]
    url: String,
}

impl From<&ArtifactRecord> for ArtifactRow {
    fn from(record: &ArtifactRecord) -> Self {
        Self {
            version: record.display_version().to_string(),
            platform: record.platform().to_string(),
            architecture: dash_if_empty(record.architecture()),
            backend: dash_if_empty(record.backend()),
            format: record.format().to_string(),
            url: record.url().to_string(),
        }
    }
}

fn dash_if_empty(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

/// Render records as a rounded table, newline-terminated
pub fn render(records: &[ArtifactRecord]) -> Vec<u8> {
    if records.is_empty() {
        return b"No artifacts in manifest.\n".to_vec();
    }

    let rows: Vec<ArtifactRow> = records.iter().map(ArtifactRow::from).collect();
    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string();

    format!("{table}\n").into_bytes()
}
