//! Error types for the transferscan library.
//!
//! Each pipeline stage has its own error type so callers can react to the
//! failure they care about:
//!
//! - [`CodecError`] - hex/decimal block conversions
//! - [`PaginationError`] - provider round-trips while following the cursor
//! - [`NormalizationError`] - decoding raw transfer entries into records
//! - [`ConfigError`] - credentials, endpoints and configuration values
//! - [`ExportError`] - writing the tabular outputs
//!
//! [`TransferscanError`] wraps all of them for callers that only need to
//! report the failure.
//!
//! # Examples
//!
//! ```rust,ignore
//! use transferscan::{run_pipeline, PaginationError, TransferscanError};
//!
//! match run_pipeline(&client, query, &config).await {
//!     Ok(output) => println!("{} records", output.records.len()),
//!     Err(TransferscanError::Pagination(PaginationError::ProviderRequest { page_index, status, .. })) => {
//!         eprintln!("page {page_index} failed with status {status:?}, re-run from scratch");
//!     }
//!     Err(e) => eprintln!("pipeline failed: {e}"),
//! }
//! ```

mod codec;
mod config;
mod export;
mod normalize;
mod pagination;

pub use codec::CodecError;
pub use config::ConfigError;
pub use export::ExportError;
pub use normalize::NormalizationError;
pub use pagination::PaginationError;

/// Unified error type for all transferscan operations.
///
/// Every stage error converts into `TransferscanError` via `From`, so `?`
/// propagates naturally across stage boundaries.
#[derive(Debug, thiserror::Error)]
pub enum TransferscanError {
    /// Error from block number encoding or decoding.
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Error while paginating over the provider.
    #[error("Pagination error: {0}")]
    Pagination(#[from] PaginationError),

    /// Error while normalizing raw transfer entries.
    #[error("Normalization error: {0}")]
    Normalization(#[from] NormalizationError),

    /// Error from configuration or credential loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error while exporting tables.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}
