use std::path::Path;

use anyhow::{Context, Result};

use crate::ticket::{FlaggedRecord, Ticket};

const KEY_COLUMN: &str = "Issue key";
const DESCRIPTION_COLUMN: &str = "Description";

/// Read tickets from a tracker CSV export.
///
/// The key column header may carry a UTF-8 BOM from spreadsheet exports;
/// when no key header matches at all, the first column is used. A missing
/// description column or cell yields an empty description.
pub fn read_tickets(path: &Path) -> Result<Vec<Ticket>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read headers from {}", path.display()))?
        .clone();
    let key_idx = headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}') == KEY_COLUMN);
    let description_idx = headers.iter().position(|h| h == DESCRIPTION_COLUMN);

    let mut tickets = Vec::new();
    for row in reader.records() {
        let record = row.with_context(|| format!("Failed to read row from {}", path.display()))?;
        let issue_key = key_idx
            .and_then(|i| record.get(i))
            .or_else(|| record.get(0))
            .unwrap_or_default()
            .to_string();
        let description = description_idx
            .and_then(|i| record.get(i))
            .unwrap_or_default()
            .to_string();
        tickets.push(Ticket {
            issue_key,
            description,
        });
    }

    Ok(tickets)
}

/// Write flagged records with headers. Returns whether a file was written:
/// an empty batch produces no file at all.
pub fn write_flagged(path: &Path, records: &[FlaggedRecord]) -> Result<bool> {
    if records.is_empty() {
        return Ok(false);
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    for record in records {
        writer
            .serialize(record)
            .with_context(|| format!("Failed to write row for {}", record.issue_key))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;

    Ok(true)
}
