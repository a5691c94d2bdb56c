//! Binary wiring: environment settings, client construction and reporting.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;

use crate::config::constants::{API_KEY_ENV_VAR, DEFAULT_NETWORK, DEFAULT_REQUEST_TIMEOUT};
use crate::config::ApiKey;
use crate::provider::{create_http_client, ProviderConfig};
use crate::{
    canonicalize_address, export_tables, run_pipeline, ConfigError, DistributionRow,
    PipelineOutput, TransferQuery, TransferRecord, TransferscanConfigBuilder, TxLinkTemplate,
};

/// Settings read from the environment for one run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub api_key: ApiKey,
    pub query: TransferQuery,
    pub network: String,
    pub request_timeout: Duration,
    pub max_retries: u32,
    pub tx_link_template: Option<TxLinkTemplate>,
    pub export_dir: Option<PathBuf>,
}

impl RunSettings {
    /// Read settings from the process environment (after loading `.env`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| dotenvy::var(name).ok())
    }

    /// Read settings through `lookup`, which returns the value of a variable.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_key = get(API_KEY_ENV_VAR)
            .ok_or_else(|| ConfigError::MissingCredential {
                variable: API_KEY_ENV_VAR.to_string(),
            })
            .and_then(ApiKey::new)?;

        let raw_address = get("CONTRACT_ADDRESS").ok_or_else(|| ConfigError::missing("CONTRACT_ADDRESS"))?;
        let contract_address = canonicalize_address(raw_address.trim()).ok_or_else(|| {
            ConfigError::invalid(
                "CONTRACT_ADDRESS",
                format!("{raw_address:?} is not a 40-digit hex address"),
            )
        })?;

        let start_block = parse::<i64>("START_BLOCK", get("START_BLOCK"))?
            .ok_or_else(|| ConfigError::missing("START_BLOCK"))?;

        let request_timeout = parse::<u64>("RPC_TIMEOUT_SECS", get("RPC_TIMEOUT_SECS"))?
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        let max_retries = parse::<u32>("MAX_RETRIES", get("MAX_RETRIES"))?.unwrap_or(0);

        let tx_link_template = get("TX_LINK_TEMPLATE").map(TxLinkTemplate::new).transpose()?;

        Ok(Self {
            api_key,
            query: TransferQuery::new(contract_address, start_block),
            network: get("ALCHEMY_NETWORK").unwrap_or_else(|| DEFAULT_NETWORK.to_string()),
            request_timeout,
            max_retries,
            tx_link_template,
            export_dir: get("EXPORT_DIR").map(PathBuf::from),
        })
    }
}

fn parse<T>(field: &str, value: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ConfigError::invalid(field, format!("{raw:?}: {e}")))
        })
        .transpose()
}

/// Main entry point for the application.
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let settings = RunSettings::from_env()?;

    let provider = ProviderConfig::alchemy(&settings.api_key, &settings.network)
        .with_max_retries(settings.max_retries);
    let client = create_http_client(provider)?;

    let mut builder = TransferscanConfigBuilder::new().request_timeout(settings.request_timeout);
    if let Some(template) = settings.tx_link_template.clone() {
        builder = builder.tx_link_template(template);
    }
    let config = builder.build();

    info!(
        contract_address = %settings.query.contract_address,
        start_block = settings.query.start_block,
        network = %settings.network,
        "Starting transfer scan"
    );

    let output = run_pipeline(&client, &settings.query, &config)
        .await
        .context("transfer scan failed")?;

    print_summary(&output);

    if let Some(dir) = &settings.export_dir {
        export_tables(dir, &output)
            .with_context(|| format!("failed to export tables to {}", dir.display()))?;
    }

    Ok(())
}

fn print_summary(output: &PipelineOutput) {
    println!(
        "{} transfers across {} pages",
        output.records.len(),
        output.pages_fetched
    );
    println!();
    print!("{}", format_records(&output.records));
    println!();
    print!("{}", format_distribution(&output.distribution));
}

fn format_records(records: &[TransferRecord]) -> String {
    let mut table = format!(
        "{:<19}  {:>12}  {:<42}  {:<42}  {:>20}  {:<8}  {}\n",
        "timestamp", "block_number", "from_address", "to_address", "value", "asset", "transaction_link"
    );
    for record in records {
        table.push_str(&format!(
            "{:<19}  {:>12}  {:<42}  {:<42}  {:>20}  {:<8}  {}\n",
            record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            record.block_number,
            format!("{:#x}", record.from_address),
            format!("{:#x}", record.to_address),
            record.value,
            record.asset,
            record.transaction_link
        ));
    }
    table
}

fn format_distribution(rows: &[DistributionRow]) -> String {
    let mut table = format!("{:>5}  {:>20}  {:>11}  {:>10}\n", "index", "value", "owner_count", "percentage");
    for row in rows {
        table.push_str(&format!(
            "{:>5}  {:>20}  {:>11}  {:>10}\n",
            row.index, row.value, row.owner_count, row.percentage
        ));
    }
    table
}
