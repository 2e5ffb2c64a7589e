use crate::strategy::{BatchConfig, ReplayInputs};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Replay bank product transactions against seeded deposit accounts and credit lines
#[derive(Parser, Debug)]
#[command(name = "bank-products-engine")]
#[command(
    about = "Replay bank product transactions against seeded deposit accounts and credit lines",
    long_about = None
)]
pub struct CliArgs {
    /// Transactions CSV file (type,account,amount,description)
    #[arg(value_name = "TRANSACTIONS")]
    pub transactions_file: PathBuf,

    /// Products seed CSV file (kind,id,client,type,balance,interest_rate)
    #[arg(long = "products", value_name = "FILE")]
    pub products_file: PathBuf,

    /// Client directory CSV file (id,type,profile)
    #[arg(long = "clients", value_name = "FILE")]
    pub clients_file: PathBuf,

    /// Replay strategy to use
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Replay strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    /// Number of transactions per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of transactions per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of worker threads (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Number of worker threads (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// Log filter used when RUST_LOG is not set (trace, debug, info, warn, error)
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        env = "BANK_ENGINE_LOG_LEVEL",
        default_value = "info"
    )]
    pub log_level: String,
}

/// Available replay strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments, filling gaps with defaults
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }

    pub fn to_replay_inputs(&self) -> ReplayInputs {
        ReplayInputs {
            transactions: self.transactions_file.clone(),
            products: self.products_file.clone(),
            clients: self.clients_file.clone(),
        }
    }
}
