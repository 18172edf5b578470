//! CSV serialization of the minimal coverage set.

use super::model::CoverageItem;

pub const COVERAGE_FILENAME: &str = "minimal_coverage_set.csv";
pub const CSV_MIME: &str = "text/csv;charset=utf-8";

const HEADER: [&str; 4] = ["Question", "Difficulty", "Source PDF", "Cluster Confidence"];

/// A serialized export, ready to hand to a download target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvArtifact {
    pub filename: &'static str,
    pub mime: &'static str,
    pub contents: String,
    /// Data rows, header excluded.
    pub rows: usize,
}

impl CsvArtifact {
    pub fn bytes(&self) -> &[u8] {
        self.contents.as_bytes()
    }
}

/// Serialize the coverage set. Absent or empty input produces no artifact.
///
/// Rows are joined with `\n` and there is no trailing newline. The question
/// text is always quoted; the remaining fields only when they contain a
/// delimiter, a quote or a line break.
pub fn serialize_coverage(coverage: Option<&[CoverageItem]>) -> Option<CsvArtifact> {
    let items = coverage.filter(|items| !items.is_empty())?;

    let mut lines = Vec::with_capacity(items.len() + 1);
    lines.push(HEADER.join(","));
    for item in items {
        let fields = [
            quote(&item.text),
            escape_csv(item.difficulty.as_str()),
            escape_csv(&item.source_document),
            escape_csv(&format_confidence(item.cluster_confidence)),
        ];
        lines.push(fields.join(","));
    }

    Some(CsvArtifact {
        filename: COVERAGE_FILENAME,
        mime: CSV_MIME,
        contents: lines.join("\n"),
        rows: items.len(),
    })
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn escape_csv(value: &str) -> String {
    let needs_quotes = value.contains([',', '"', '\n', '\r']);
    if needs_quotes {
        quote(value)
    } else {
        value.to_string()
    }
}

/// Shortest round-trip rendering: `0.9`, `1`, `0.857`.
fn format_confidence(value: f64) -> String {
    format!("{value}")
}
