// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for table export.

use std::path::PathBuf;

/// Errors raised while writing the records and stats tables.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Serializing or flushing a CSV row failed.
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Creating or writing an output file failed.
    #[error("Failed to write {path}")]
    Io {
        /// The file being written
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
