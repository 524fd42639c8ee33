//! Smart Send CLI - Command-line interface for the Smart Send SDK
//!
//! Reads a list of transfers from a JSON file, groups them into smart send
//! transactions and prints the unsigned transactions as JSON, ready to be
//! signed by a wallet.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use smart_send_sdk::account::LocalAccount;
use smart_send_sdk::address::parse_address;
use smart_send_sdk::config::BatchConfig;
use smart_send_sdk::smart_send::SmartSend;
use smart_send_sdk::types::utils::{format_amount, parse_amount, NATIVE_DECIMALS};
use smart_send_sdk::types::{Network, TransferKind};
use smart_send_sdk::{sum_amounts, TransferAmount, TransferDescriptor};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "smart-send-cli")]
#[command(about = "Smart Send SDK Command Line Interface", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Network to use (mainnet, testnet, devnet); overrides the config file
    #[arg(short, long)]
    network: Option<String>,

    /// Config file path (optional, defaults to standard location)
    #[arg(short = 'c', long = "config")]
    config_path: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build smart send transactions from a JSON list of transfers
    Build {
        /// Kind of transfer in the input file
        #[arg(value_enum)]
        kind: KindArg,
        /// JSON file with an array of {"address", "amount", "serial", "tokenId"} rows
        #[arg(short, long)]
        input: PathBuf,
        /// Sender address
        #[arg(short, long)]
        sender: String,
        /// Current nonce of the sender account
        #[arg(long)]
        nonce: u64,
        /// Smart send contract (defaults to the configured one)
        #[arg(long)]
        contract: Option<String>,
        /// Token identifier for rows that do not name one
        #[arg(long)]
        token_id: Option<String>,
        /// Token decimals used to read human amounts
        #[arg(long)]
        decimals: Option<u32>,
        /// Token serial (nonce) for rows that do not name one
        #[arg(long)]
        serial: Option<u64>,
        /// Amounts in the input are already in base units
        #[arg(long)]
        raw: bool,
        /// Maximum transfers per transaction
        #[arg(long)]
        chunk_limit: Option<usize>,
        /// Gas per transfer above the small batch threshold
        #[arg(long)]
        gas_per_item: Option<u64>,
        /// Write the transactions to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate an address
    Address {
        /// bech32 address
        address: String,
    },
    /// Config file commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a default config file
    Init {
        /// Default smart send contract
        #[arg(long)]
        contract: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Show the active configuration
    Show,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Native,
    Fungible,
    MetaToken,
    Nft,
    Sft,
}

impl From<KindArg> for TransferKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Native => TransferKind::Native,
            KindArg::Fungible => TransferKind::Fungible,
            KindArg::MetaToken => TransferKind::MetaToken,
            KindArg::Nft => TransferKind::NonFungible,
            KindArg::Sft => TransferKind::SemiFungible,
        }
    }
}

/// One row of the input file
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransferRow {
    address: String,
    #[serde(default)]
    amount: Option<String>,
    #[serde(default)]
    serial: Option<u64>,
    #[serde(default)]
    token_id: Option<String>,
}

/// Token details shared by every row unless the row overrides them
struct RowDefaults {
    token_id: Option<String>,
    decimals: u32,
    serial: Option<u64>,
    raw: bool,
}

impl RowDefaults {
    fn magnitude(&self, idx: usize, row: &TransferRow) -> anyhow::Result<num_bigint::BigUint> {
        let amount = row
            .amount
            .as_deref()
            .with_context(|| format!("row {} has no amount", idx))?;
        let decimals = if self.raw { 0 } else { self.decimals };
        parse_amount(amount, decimals).with_context(|| format!("row {} has a bad amount", idx))
    }

    fn token_id(&self, idx: usize, row: &TransferRow) -> anyhow::Result<String> {
        row.token_id
            .clone()
            .or_else(|| self.token_id.clone())
            .with_context(|| format!("row {} has no token id (use --token-id)", idx))
    }

    fn serial(&self, idx: usize, row: &TransferRow) -> anyhow::Result<u64> {
        row.serial
            .or(self.serial)
            .with_context(|| format!("row {} has no serial (use --serial)", idx))
    }
}

fn to_descriptor(
    kind: TransferKind,
    idx: usize,
    row: &TransferRow,
    defaults: &RowDefaults,
) -> anyhow::Result<TransferDescriptor> {
    let amount = match kind {
        TransferKind::Native => TransferAmount::native(defaults.magnitude(idx, row)?),
        TransferKind::Fungible => TransferAmount::fungible(
            defaults.token_id(idx, row)?,
            defaults.magnitude(idx, row)?,
            defaults.decimals,
        ),
        TransferKind::MetaToken => TransferAmount::meta_token(
            defaults.token_id(idx, row)?,
            defaults.serial(idx, row)?,
            defaults.magnitude(idx, row)?,
            defaults.decimals,
        ),
        TransferKind::NonFungible => {
            TransferAmount::non_fungible(defaults.token_id(idx, row)?, defaults.serial(idx, row)?)
        }
        TransferKind::SemiFungible => TransferAmount::semi_fungible(
            defaults.token_id(idx, row)?,
            defaults.serial(idx, row)?,
            defaults.magnitude(idx, row)?,
        ),
    };
    TransferDescriptor::new(&row.address, amount)
        .with_context(|| format!("row {} has an invalid address", idx))
}

fn config_path(cli: &Cli) -> anyhow::Result<PathBuf> {
    Ok(match cli.config_path {
        Some(ref path) => path.clone(),
        None => BatchConfig::default_path()?,
    })
}

fn apply_network(cli: &Cli, config: &mut BatchConfig) -> anyhow::Result<()> {
    if let Some(ref network) = cli.network {
        config.network = network.parse::<Network>()?;
    }
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<(PathBuf, BatchConfig)> {
    let path = config_path(cli)?;
    let mut config = BatchConfig::load_or_default(Some(&path))
        .with_context(|| format!("failed to load config {}", path.display()))?;
    apply_network(cli, &mut config)?;
    Ok((path, config))
}

/// Write a fresh config to `path`
///
/// The existing file is never read, so a corrupt one can be replaced with `force`.
fn init_config(path: &Path, cli: &Cli, contract: Option<&str>, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let mut config = BatchConfig::default();
    apply_network(cli, &mut config)?;
    config.contract_address = contract.map(str::to_string);
    config.validate()?;
    config.save(path)?;
    Ok(())
}

fn write_output(json: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{}", json),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays valid JSON
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Build {
            kind,
            input,
            sender,
            nonce,
            contract,
            token_id,
            decimals,
            serial,
            raw,
            chunk_limit,
            gas_per_item,
            output,
        } => {
            let (_, config) = load_config(&cli)?;
            let kind = TransferKind::from(*kind);

            let raw_rows = std::fs::read_to_string(input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let rows: Vec<TransferRow> = serde_json::from_str(&raw_rows)
                .with_context(|| format!("{} is not a JSON array of transfers", input.display()))?;

            let defaults = RowDefaults {
                token_id: token_id.clone(),
                decimals: decimals.unwrap_or(match kind {
                    TransferKind::SemiFungible => 0,
                    _ => NATIVE_DECIMALS,
                }),
                serial: *serial,
                raw: *raw,
            };
            let transfers = rows
                .iter()
                .enumerate()
                .map(|(idx, row)| to_descriptor(kind, idx, row, &defaults))
                .collect::<anyhow::Result<Vec<_>>>()?;

            let account = LocalAccount::new(parse_address(sender)?, *nonce);
            let mut builder = SmartSend::new(account, config.network_config());
            builder.set_chunk_limit(chunk_limit.unwrap_or(config.chunk_limit))?;
            if let Some(ref default_contract) = config.contract_address {
                builder.set_default_contract_address(default_contract)?;
            }

            let gas_per_item = gas_per_item.unwrap_or_else(|| config.gas_per_item(kind));
            let transactions =
                builder.build_transactions(kind, &transfers, gas_per_item, contract.as_deref())?;

            write_output(&serde_json::to_string_pretty(&transactions)?, output.as_deref())?;

            let total = sum_amounts(transfers.iter().filter_map(|t| t.amount.magnitude()));
            eprintln!(
                "✓ {} {} transfers in {} transactions (nonces {}..{})",
                transfers.len(),
                kind,
                transactions.len(),
                nonce,
                builder.account().nonce()
            );
            if kind.has_magnitude() {
                eprintln!(
                    "Total: {} ({} decimals)",
                    format_amount(&total, defaults.decimals)?,
                    defaults.decimals
                );
            }
        }
        Commands::Address { address } => match parse_address(address) {
            Ok(parsed) => {
                println!("✓ Valid address");
                println!("Hex: {}", parsed.to_hex());
                println!("Smart contract: {}", parsed.is_smart_contract());
            }
            Err(e) => {
                eprintln!("Invalid address: {}", e);
                std::process::exit(1);
            }
        },
        Commands::Config { action } => match action {
            ConfigAction::Init { contract, force } => {
                let path = config_path(&cli)?;
                init_config(&path, &cli, contract.as_deref(), *force)?;
                println!("✓ Wrote {}", path.display());
            }
            ConfigAction::Show => {
                let (path, config) = load_config(&cli)?;
                println!("Config file: {}", path.display());
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    const BOB: &str = "erd1qgpqyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqszqgpqjv7g5k";
    const CONTRACT: &str = "erd1qqqqqqqqqqqqqpgqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqcnjqwn";

    fn row(json: &str) -> TransferRow {
        serde_json::from_str(json).unwrap()
    }

    fn defaults(raw: bool) -> RowDefaults {
        RowDefaults {
            token_id: Some("USDC-c76f1f".to_string()),
            decimals: 6,
            serial: Some(4),
            raw,
        }
    }

    #[test]
    fn test_human_amount_uses_decimals() {
        let r = row(&format!(r#"{{ "address": "{}", "amount": "1.5" }}"#, BOB));
        let transfer = to_descriptor(TransferKind::Fungible, 0, &r, &defaults(false)).unwrap();
        assert_eq!(
            transfer.amount,
            TransferAmount::fungible("USDC-c76f1f", 1_500_000u32, 6)
        );
    }

    #[test]
    fn test_raw_amount_is_base_units() {
        let r = row(&format!(r#"{{ "address": "{}", "amount": "1500" }}"#, BOB));
        let transfer = to_descriptor(TransferKind::Fungible, 0, &r, &defaults(true)).unwrap();
        assert_eq!(transfer.amount.magnitude(), Some(&BigUint::from(1500u32)));
        // Decimals still describe the token
        assert_eq!(transfer.amount.decimals(), Some(6));

        let fractional = row(&format!(r#"{{ "address": "{}", "amount": "1.5" }}"#, BOB));
        assert!(to_descriptor(TransferKind::Fungible, 0, &fractional, &defaults(true)).is_err());
    }

    #[test]
    fn test_row_overrides_defaults() {
        let r = row(&format!(
            r#"{{ "address": "{}", "tokenId": "HEROES-3f2a1b", "serial": 9 }}"#,
            BOB
        ));
        let transfer = to_descriptor(TransferKind::NonFungible, 0, &r, &defaults(false)).unwrap();
        assert_eq!(transfer.amount, TransferAmount::non_fungible("HEROES-3f2a1b", 9));
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let r = row(&format!(r#"{{ "address": "{}", "amount": "3" }}"#, BOB));
        let mut sft = defaults(false);
        sft.decimals = 0;
        let transfer = to_descriptor(TransferKind::SemiFungible, 0, &r, &sft).unwrap();
        assert_eq!(transfer.amount, TransferAmount::semi_fungible("USDC-c76f1f", 4, 3u32));
    }

    #[test]
    fn test_missing_fields_name_the_row() {
        let no_amount = row(&format!(r#"{{ "address": "{}" }}"#, BOB));
        let err = to_descriptor(TransferKind::Native, 3, &no_amount, &defaults(false)).unwrap_err();
        assert!(err.to_string().contains("row 3"));

        let bare = RowDefaults {
            token_id: None,
            decimals: 0,
            serial: None,
            raw: false,
        };
        let nft = row(&format!(r#"{{ "address": "{}", "tokenId": "HEROES-3f2a1b" }}"#, BOB));
        let err = to_descriptor(TransferKind::NonFungible, 7, &nft, &bare).unwrap_err();
        assert!(err.to_string().contains("row 7 has no serial"));
    }

    #[test]
    fn test_bad_address_is_rejected() {
        let r = row(r#"{ "address": "erd1nope", "amount": "1" }"#);
        let err = to_descriptor(TransferKind::Native, 2, &r, &defaults(false)).unwrap_err();
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_init_replaces_corrupt_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        let cli = Cli::parse_from(["smart-send-cli", "--network", "devnet", "config", "show"]);

        let show = Cli::parse_from(["smart-send-cli", "-c", path.to_str().unwrap(), "config", "show"]);
        assert!(load_config(&show).is_err());
        assert!(init_config(&path, &cli, None, false).is_err());

        init_config(&path, &cli, Some(CONTRACT), true).unwrap();
        let config = BatchConfig::load(&path).unwrap();
        assert_eq!(config.network, Network::Devnet);
        assert_eq!(config.contract_address.as_deref(), Some(CONTRACT));
    }

    #[test]
    fn test_init_rejects_bad_contract() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let cli = Cli::parse_from(["smart-send-cli", "config", "show"]);
        assert!(init_config(&path, &cli, Some("erd1nope"), false).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_huge_decimals_are_rejected() {
        let r = row(&format!(r#"{{ "address": "{}", "amount": "1" }}"#, BOB));
        let mut huge = defaults(false);
        huge.decimals = 2_000_000_000;
        assert!(to_descriptor(TransferKind::Fungible, 0, &r, &huge).is_err());
    }
}
