use super::types::SquirrelRecord;
use crate::error::{Result, SquirrelError};

use regex::Regex;
use std::sync::OnceLock;

/// Output flavor for the record stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// `Белка <id>: орехов = <n>, мой ср. вес = <avg>, слева = <l>, справа = <r>`
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Formats a record as the fixed text line, four fractional digits per value.
pub fn format_record(record: &SquirrelRecord) -> String {
    format!(
        "Белка {}: орехов = {}, мой ср. вес = {:.4}, слева = {:.4}, справа = {:.4}",
        record.id, record.nuts, record.avg, record.left, record.right
    )
}

pub fn format_json(record: &SquirrelRecord) -> Result<String> {
    serde_json::to_string(record).map_err(|e| SquirrelError::Codec(e.to_string()))
}

/// Renders every record, one line each, in the given order.
pub fn render(records: &[SquirrelRecord], format: ReportFormat) -> Result<Vec<String>> {
    records
        .iter()
        .map(|record| match format {
            ReportFormat::Text => Ok(format_record(record)),
            ReportFormat::Json => format_json(record),
        })
        .collect()
}

fn record_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"Белка (\d+): орехов = (\d+), мой ср\. вес = ([-+0-9.eE]+), слева = ([-+0-9.eE]+), справа = ([-+0-9.eE]+)",
        )
        .expect("record pattern compiles")
    })
}

/// Extracts a record from a text line. Lines without a record yield `None`,
/// so mixed output (logs, diagnostics) can be scanned line by line.
pub fn parse_record(line: &str) -> Option<SquirrelRecord> {
    let caps = record_pattern().captures(line)?;

    Some(SquirrelRecord {
        id: caps[1].parse().ok()?,
        nuts: caps[2].parse().ok()?,
        avg: caps[3].parse().ok()?,
        left: caps[4].parse().ok()?,
        right: caps[5].parse().ok()?,
    })
}

/// Parses every record found in a block of output.
pub fn parse_output(output: &str) -> Vec<SquirrelRecord> {
    output.lines().filter_map(parse_record).collect()
}
