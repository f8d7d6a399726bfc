use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::validate_scenario;
use crate::error::{Error, Result};
use crate::models::SimConfig;

pub const DEFAULT_CLIENTS: usize = 100;
pub const DEFAULT_ARRIVAL_RATE: f64 = 0.3;
pub const DEFAULT_SERVICE_RATE: f64 = 0.5;
pub const DEFAULT_COUNTERS: usize = 1;

#[derive(Parser, Debug)]
#[command(
    name = "queue-sim",
    version,
    about = "Discrete-event simulator for multi-counter FCFS queues",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one scenario, or a comparison when --compare is given
    Run(RunArgs),
    /// Print the resolved configuration without simulating
    ShowConfig(RunArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// TOML or JSON file; flags given explicitly override its values
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub clients: Option<usize>,
    /// Mean arrivals per minute (lambda)
    #[arg(long, alias = "arrival_rate", allow_negative_numbers = true)]
    pub arrival_rate: Option<f64>,
    /// Mean services per minute per counter (mu)
    #[arg(long, alias = "service_rate", allow_negative_numbers = true)]
    pub service_rate: Option<f64>,
    /// Number of parallel counters
    #[arg(long, aliases = ["multi-queues", "multi_queues"])]
    pub counters: Option<usize>,
    /// Comma-separated counter counts to compare, e.g. "1,2,3"
    #[arg(long)]
    pub compare: Option<String>,
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = FormatArg::Human)]
    pub format: FormatArg,
    #[arg(long, value_enum, default_value_t = ReportArg::None)]
    pub report: ReportArg,
    #[arg(long, default_value = "reports")]
    pub reports_dir: PathBuf,
    /// Append a text timeline of queue and busy counters
    #[arg(long)]
    pub viz: bool,
    /// Simulated minutes covered by --viz
    #[arg(long, default_value_t = 60.0)]
    pub duration: f64,
    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Human,
    Summary,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportArg {
    Detailed,
    None,
}

pub fn parse_args() -> Result<Cli> {
    Cli::try_parse().map_err(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
        _ => Error::Cli(e.to_string()),
    })
}

pub fn load_config(path: &Path) -> Result<SimConfig> {
    let contents = fs::read_to_string(path).map_err(|err| {
        Error::ConfigIo(format!(
            "failed to read config '{}': {}",
            path.display(),
            err
        ))
    })?;
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .unwrap_or("");

    match ext {
        "toml" => toml::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse TOML: {}", err))),
        "json" => serde_json::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse JSON: {}", err))),
        "" => Err(Error::UnsupportedConfigFormat("unknown".to_string())),
        _ => Err(Error::UnsupportedConfigFormat(ext.to_string())),
    }
}

/// Merges the config file (if any) with explicit flags and validates the
/// resulting scenarios.
pub fn build_config(args: &RunArgs) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SimConfig {
            clients: DEFAULT_CLIENTS,
            arrival_rate: DEFAULT_ARRIVAL_RATE,
            service_rate: DEFAULT_SERVICE_RATE,
            counters: DEFAULT_COUNTERS,
            seed: None,
            compare: Vec::new(),
        },
    };

    if let Some(clients) = args.clients {
        config.clients = clients;
    }
    if let Some(rate) = args.arrival_rate {
        config.arrival_rate = rate;
    }
    if let Some(rate) = args.service_rate {
        config.service_rate = rate;
    }
    if let Some(counters) = args.counters {
        config.counters = counters;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(list) = &args.compare {
        config.compare = parse_compare_list(list)?;
    }

    for scenario in config.scenarios() {
        validate_scenario(&scenario)?;
    }
    Ok(config)
}

/// Fills in a random seed when none was configured, so every scenario in a
/// comparison draws from the same stream and the run can be replayed.
pub fn resolve_seed(mut config: SimConfig) -> SimConfig {
    if config.seed.is_none() {
        config.seed = Some(rand::random());
    }
    config
}

pub fn parse_compare_list(input: &str) -> Result<Vec<usize>> {
    if input.trim().is_empty() {
        return Err(Error::EmptyCompareList);
    }

    input
        .split(',')
        .map(|entry| {
            let trimmed = entry.trim();
            if trimmed.is_empty() {
                return Err(Error::EmptyCompareEntry);
            }
            match trimmed.parse::<usize>() {
                Ok(counters) if counters > 0 => Ok(counters),
                _ => Err(Error::InvalidCompareEntry(trimmed.to_string())),
            }
        })
        .collect()
}

pub fn describe_config(config: &SimConfig) -> String {
    let mut out = String::new();
    out.push_str(&format!("Clients: {}\n", config.clients));
    out.push_str(&format!("Arrival rate: {}\n", config.arrival_rate));
    out.push_str(&format!("Service rate: {}\n", config.service_rate));
    if config.is_comparison() {
        let list = config
            .compare
            .iter()
            .map(|counters| counters.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("Compare: {}\n", list));
    } else {
        out.push_str(&format!("Counters: {}\n", config.counters));
    }
    match config.seed {
        Some(seed) => out.push_str(&format!("Seed: {}\n", seed)),
        None => out.push_str("Seed: random\n"),
    }
    out
}
