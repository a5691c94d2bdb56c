// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! CSV export of the records and stats tables
//!
//! Addresses are written in their canonical lowercase `0x` form and
//! timestamps as `YYYY-MM-DD HH:MM:SS` (UTC).

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::errors::ExportError;
use crate::normalize::TransferRecord;
use crate::pipeline::PipelineOutput;
use crate::stats::DistributionRow;

/// File name of the records table
pub const RECORDS_FILE_NAME: &str = "data.csv";
/// File name of the stats table
pub const STATS_FILE_NAME: &str = "stats.csv";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Serialize)]
struct RecordRow<'a> {
    timestamp: String,
    block_number: u64,
    from_address: String,
    to_address: String,
    value: f64,
    asset: &'a str,
    category: &'a str,
    contract_address: String,
    transaction_link: &'a str,
}

impl<'a> From<&'a TransferRecord> for RecordRow<'a> {
    fn from(record: &'a TransferRecord) -> Self {
        Self {
            timestamp: record.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            block_number: record.block_number,
            from_address: format!("{:#x}", record.from_address),
            to_address: format!("{:#x}", record.to_address),
            value: record.value,
            asset: &record.asset,
            category: &record.category,
            contract_address: format!("{:#x}", record.contract_address),
            transaction_link: &record.transaction_link,
        }
    }
}

/// Paths written by [`export_tables`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedTables {
    pub records: PathBuf,
    pub stats: PathBuf,
}

/// Write the records table with a header row
pub fn write_records_csv<W: io::Write>(
    writer: W,
    records: &[TransferRecord],
) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    if records.is_empty() {
        csv.write_record(RECORD_HEADERS)?;
    }
    for record in records {
        csv.serialize(RecordRow::from(record))?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write the stats table with a header row
pub fn write_distribution_csv<W: io::Write>(
    writer: W,
    rows: &[DistributionRow],
) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    if rows.is_empty() {
        csv.write_record(STATS_HEADERS)?;
    }
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

// serde only emits headers together with the first row
const RECORD_HEADERS: [&str; 9] = [
    "timestamp",
    "block_number",
    "from_address",
    "to_address",
    "value",
    "asset",
    "category",
    "contract_address",
    "transaction_link",
];
const STATS_HEADERS: [&str; 4] = ["index", "value", "owner_count", "percentage"];

/// Write `data.csv` and `stats.csv` into `dir`, creating it if needed
pub fn export_tables(dir: &Path, output: &PipelineOutput) -> Result<ExportedTables, ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let tables = ExportedTables {
        records: dir.join(RECORDS_FILE_NAME),
        stats: dir.join(STATS_FILE_NAME),
    };

    write_records_csv(create(&tables.records)?, &output.records)?;
    write_distribution_csv(create(&tables.stats)?, &output.distribution)?;

    info!(
        records = %tables.records.display(),
        stats = %tables.stats.display(),
        "Exported tables"
    );

    Ok(tables)
}

fn create(path: &Path) -> Result<File, ExportError> {
    File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
