//! Replay strategy module
//!
//! A strategy is a complete replay pipeline: seed the client directory and
//! the products, submit every transaction from a CSV file, then write the
//! final product states. Synchronous and asynchronous batch implementations
//! are selected at runtime.

use crate::cli::StrategyType;
use crate::types::BankError;
use std::io::Write;
use std::path::PathBuf;

pub mod r#async;
pub mod services;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use services::{BankServices, ReplayStats};
pub use sync::SyncProcessingStrategy;

/// Files a replay reads
#[derive(Debug, Clone)]
pub struct ReplayInputs {
    /// Transactions to submit, in order
    pub transactions: PathBuf,

    /// Deposit accounts and credit lines to open first
    pub products: PathBuf,

    /// Client directory
    pub clients: PathBuf,
}

/// Processing strategy trait for complete replay pipelines
pub trait ProcessingStrategy: Send + Sync {
    /// Replay the inputs and write final product states to `output`
    ///
    /// Rejected rows and transactions are logged and skipped; they never fail
    /// the replay.
    ///
    /// # Errors
    ///
    /// Returns an error if an input file cannot be opened, the runtime cannot
    /// start, or the output cannot be written.
    fn process(&self, inputs: &ReplayInputs, output: &mut dyn Write) -> Result<ReplayStats, BankError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// `config` is only read by the async strategy.
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Async => Box::new(AsyncProcessingStrategy::new(config.unwrap_or_default())),
    }
}
