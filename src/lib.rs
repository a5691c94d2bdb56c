//! # transferscan
//!
//! ERC-20 transfer scanning for a single token contract.
//!
//! A scan pages through the provider's `alchemy_getAssetTransfers` results,
//! flattens every entry into a [`TransferRecord`] and summarizes how transfer
//! values are distributed across the scan.
//!
//! ## Stages
//!
//! - [`TransferPaginator`]: cursor-driven page fetching, all-or-nothing
//! - [`Normalizer`]: strict decoding of raw entries into flat records
//! - [`value_distribution`]: frequency table of transfer values
//! - [`run_pipeline`]: all three in sequence
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use transferscan::config::ApiKey;
//! use transferscan::provider::{create_http_client, ProviderConfig};
//! use transferscan::{canonicalize_address, run_pipeline, TransferQuery, TransferscanConfig};
//!
//! let key = ApiKey::from_env("ALCHEMY_API_KEY")?;
//! let client = create_http_client(ProviderConfig::alchemy(&key, "eth-mainnet"))?;
//!
//! let contract = canonicalize_address("45804880De22913dAFE09f4980848ECE6EcbAf78")
//!     .expect("valid address");
//! let output = run_pipeline(&client, &TransferQuery::new(contract, 15_390_084), &TransferscanConfig::default()).await?;
//! println!("{} transfers in {} pages", output.records.len(), output.pages_fetched);
//! ```

pub mod bootstrap;
mod codec;
pub mod config;
mod errors;
mod export;
mod normalize;
mod pagination;
mod pipeline;
pub mod provider;
mod spans;
mod stats;
pub mod transport;

pub use codec::*;
pub use config::{TransferscanConfig, TransferscanConfigBuilder, TxLinkTemplate};
pub use errors::*;
pub use export::*;
pub use normalize::*;
pub use pagination::*;
pub use pipeline::*;
pub use stats::*;
