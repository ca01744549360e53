// # ibxctl - A-record command-line front end
//
// A thin wrapper over `ibx-core`: it reads connection settings from the
// environment, builds a `WapiConnector` and an `ObjectManager`, runs one
// lifecycle operation and prints the result as JSON on stdout.
//
// All record logic lives in `ibx-core`; nothing here validates records.
//
// ## Configuration
//
// Connection and identity come from environment variables:
//
// - `IBX_HOST`: Grid master host name (required)
// - `IBX_USERNAME` / `IBX_PASSWORD`: Basic-auth credentials (required)
// - `IBX_PORT`: HTTPS port (default 443)
// - `IBX_WAPI_VERSION`: WAPI version (default 2.11)
// - `IBX_SSL_VERIFY`: Verify the TLS certificate (default true)
// - `IBX_HTTP_TIMEOUT_SECS`: Per-request timeout (default 30)
// - `IBX_CMP_TYPE`: "CMP Type" tag for owned records (default ibxctl)
// - `IBX_TENANT_ID`: "Tenant ID" tag for owned records (required)
// - `IBX_LOG_LEVEL`: trace, debug, info, warn or error (default warn)
//
// ## Example
//
// ```bash
// export IBX_HOST=gm.example.com
// export IBX_USERNAME=admin
// export IBX_PASSWORD=...
// export IBX_TENANT_ID=01234567890abcdef01234567890abcdef
//
// ibxctl create --name host1.example.com --cidr 10.0.0.0/24 --ea "VM Name=host1"
// ibxctl get --name host1.example.com --ip 10.0.0.5
// ibxctl delete 'record:a/ZG5z...:10.0.0.5/host1.example.com/default'
// ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use ibx_connector_wapi::WapiConnector;
use ibx_core::{ARecordUpdate, ConnectorConfig, Ea, ManagerConfig, NewARecord, ObjectManager};
use serde::Serialize;
use std::env;
use std::process::ExitCode;
use tracing::{Level, error};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for the different failure classes
///
/// - 0: Operation succeeded
/// - 1: Configuration or startup error
/// - 2: The operation itself failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IbxExitCode {
    Success = 0,
    ConfigError = 1,
    OperationError = 2,
}

impl From<IbxExitCode> for ExitCode {
    fn from(code: IbxExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Manage DNS A records over WAPI", rename_all = "kebab-case")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
#[command(rename_all = "kebab-case")]
enum Command {
    /// Create an A record, allocating an address from a CIDR if none is given
    Create(CreateArgs),

    /// Look up the A record matching view, name and address
    Get {
        #[arg(long, value_name = "VIEW", default_value = "default")]
        dns_view: String,

        #[arg(long, value_name = "FQDN")]
        name: String,

        #[arg(long, value_name = "ADDR")]
        ip: String,
    },

    /// Fetch an A record by reference
    GetRef {
        #[arg(value_name = "REF")]
        reference: String,
    },

    /// Update an A record
    Update(UpdateArgs),

    /// Delete an A record
    Delete {
        #[arg(value_name = "REF")]
        reference: String,
    },
}

/// Fields shared by create and update
#[derive(Args, Debug)]
struct RecordArgs {
    /// TTL in seconds; when omitted the zone default applies
    #[arg(long, value_name = "SECS")]
    ttl: Option<u32>,

    #[arg(long, value_name = "TEXT", default_value = "")]
    comment: String,

    /// Extensible attribute, repeatable
    #[arg(long = "ea", value_name = "KEY=VALUE", value_parser = parse_ea)]
    eas: Vec<(String, String)>,

    /// Tag the record with the cloud-ownership attributes (CMP type, tenant)
    #[arg(long)]
    cloud_owned: bool,
}

#[derive(Args, Debug)]
struct CreateArgs {
    #[arg(long, value_name = "FQDN")]
    name: String,

    /// Literal address; takes precedence over --cidr
    #[arg(long, value_name = "ADDR")]
    ip: Option<String>,

    /// Network to allocate the next free address from
    #[arg(long, value_name = "CIDR")]
    cidr: Option<String>,

    #[arg(long, value_name = "VIEW", default_value = "default")]
    network_view: String,

    #[arg(long, value_name = "VIEW", default_value = "default")]
    dns_view: String,

    #[command(flatten)]
    record: RecordArgs,
}

#[derive(Args, Debug)]
struct UpdateArgs {
    #[arg(value_name = "REF")]
    reference: String,

    /// Record name to store; the current name is not kept implicitly
    #[arg(long, value_name = "FQDN")]
    name: String,

    /// New literal address; takes precedence over --cidr
    #[arg(long, value_name = "ADDR")]
    ip: Option<String>,

    /// Network to allocate a new address from
    #[arg(long, value_name = "CIDR")]
    cidr: Option<String>,

    /// Network view for --cidr; defaults to the view in the reference
    #[arg(long, value_name = "VIEW")]
    network_view: Option<String>,

    #[command(flatten)]
    record: RecordArgs,
}

/// Parse a `KEY=VALUE` extensible attribute
fn parse_ea(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

/// Application configuration
struct Config {
    connector: ConnectorConfig,
    manager: ManagerConfig,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .with_context(|| format!("{} is required. Set it via: export {}=...", key, key))
        };

        let mut connector = ConnectorConfig::new(
            required("IBX_HOST")?,
            required("IBX_USERNAME")?,
            required("IBX_PASSWORD")?,
        );
        if let Some(port) = lookup("IBX_PORT") {
            connector.port = port
                .parse()
                .with_context(|| format!("IBX_PORT must be a port number. Got: {}", port))?;
        }
        if let Some(version) = lookup("IBX_WAPI_VERSION") {
            connector.wapi_version = version;
        }
        if let Some(verify) = lookup("IBX_SSL_VERIFY") {
            connector.ssl_verify = parse_bool(&verify)
                .with_context(|| format!("IBX_SSL_VERIFY must be true or false. Got: {}", verify))?;
        }
        if let Some(timeout) = lookup("IBX_HTTP_TIMEOUT_SECS") {
            connector.http_timeout_secs = timeout.parse().with_context(|| {
                format!("IBX_HTTP_TIMEOUT_SECS must be a number of seconds. Got: {}", timeout)
            })?;
        }

        let mut manager = ManagerConfig::new("ibxctl", required("IBX_TENANT_ID")?);
        if let Some(cmp_type) = lookup("IBX_CMP_TYPE") {
            manager.cmp_type = cmp_type;
        }

        Ok(Self {
            connector,
            manager,
            log_level: lookup("IBX_LOG_LEVEL").unwrap_or_else(|| "warn".to_string()),
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        self.connector.validate()?;
        self.manager.validate()?;
        parse_level(&self.log_level)?;
        Ok(())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_level(raw: &str) -> Result<Level> {
    match raw.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!(
            "IBX_LOG_LEVEL '{}' is not valid. \
            Valid levels: trace, debug, info, warn, error",
            raw
        ),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return IbxExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {:#}", e);
        return IbxExitCode::ConfigError.into();
    }

    // stdout carries only results
    let log_level = parse_level(&config.log_level).unwrap_or(Level::WARN);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return IbxExitCode::ConfigError.into();
    }

    let connector = match WapiConnector::new(&config.connector) {
        Ok(connector) => connector,
        Err(e) => {
            error!("Failed to create WAPI connector: {}", e);
            return IbxExitCode::ConfigError.into();
        }
    };
    let manager = ObjectManager::from_config(connector, &config.manager);

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return IbxExitCode::ConfigError.into();
        }
    };

    let result = rt.block_on(run(&manager, cli.command));
    match result {
        Ok(()) => IbxExitCode::Success.into(),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            IbxExitCode::OperationError.into()
        }
    }
}

/// Run one lifecycle operation and print its result
async fn run(manager: &ObjectManager<WapiConnector>, command: Command) -> Result<()> {
    match command {
        Command::Create(args) => {
            let ea = build_ea(manager, &args.record);
            let record = manager
                .create_a_record(NewARecord {
                    network_view: args.network_view,
                    dns_view: args.dns_view,
                    name: args.name,
                    cidr: args.cidr,
                    ipv4_addr: args.ip,
                    ttl: args.record.ttl.unwrap_or(0),
                    use_ttl: args.record.ttl.is_some(),
                    comment: args.record.comment,
                    ea,
                })
                .await
                .context("create failed")?;
            print_json(&record)
        }
        Command::Get { dns_view, name, ip } => {
            let record = manager
                .get_a_record(&dns_view, &name, &ip)
                .await
                .context("lookup failed")?;
            print_json(&record)
        }
        Command::GetRef { reference } => {
            let record = manager
                .get_a_record_by_ref(&reference)
                .await
                .context("fetch failed")?;
            print_json(&record)
        }
        Command::Update(args) => {
            let ea = build_ea(manager, &args.record);
            let record = manager
                .update_a_record(
                    &args.reference,
                    ARecordUpdate {
                        name: args.name,
                        ipv4_addr: args.ip,
                        cidr: args.cidr,
                        network_view: args.network_view,
                        ttl: args.record.ttl.unwrap_or(0),
                        use_ttl: args.record.ttl.is_some(),
                        comment: args.record.comment,
                        ea,
                    },
                )
                .await
                .context("update failed")?;
            print_json(&record)
        }
        Command::Delete { reference } => {
            let deleted = manager
                .delete_a_record(&reference)
                .await
                .context("delete failed")?;
            print_json(&deleted)
        }
    }
}

/// Extensible attributes from `--ea` flags, plus the ownership tags with `--cloud-owned`
fn build_ea<C: ibx_core::Connector>(manager: &ObjectManager<C>, args: &RecordArgs) -> Ea {
    let mut ea: Ea = args.eas.iter().cloned().collect();
    if args.cloud_owned {
        ea.merge(&manager.basic_ea());
    }
    ea
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
