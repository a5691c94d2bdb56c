//! Provider method names, filter values and defaults
//!
//! Centralizes the magic strings used when talking to the transfers provider
//! and when rendering records.

use std::time::Duration;

/// JSON-RPC method returning paginated asset transfers.
pub const ASSET_TRANSFERS_METHOD: &str = "alchemy_getAssetTransfers";

/// Transfer category requested from the provider.
pub const ERC20_CATEGORY: &str = "erc20";

/// Block tag used as the upper bound of every scan.
pub const LATEST_BLOCK_TAG: &str = "latest";

/// Placeholder substituted with the transaction hash in link templates.
pub const HASH_PLACEHOLDER: &str = "{hash}";

/// Default transaction link template (Ethereum mainnet explorer).
pub const DEFAULT_TX_LINK_TEMPLATE: &str = "https://etherscan.io/tx/{hash}";

/// Default provider network subdomain.
pub const DEFAULT_NETWORK: &str = "eth-mainnet";

/// Environment variable holding the provider credential.
pub const API_KEY_ENV_VAR: &str = "ALCHEMY_API_KEY";

/// Default timeout for a single provider round-trip.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
