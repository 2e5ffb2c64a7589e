//! Asynchronous batch replay strategy
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     └── BatchProcessor (account partitioning + tokio tasks)
//!         └── TransactionProcessor (per-account locking)
//! ```
//!
//! Batches are processed one after another, so an account's transactions
//! keep file order even when they span several batches. Within a batch,
//! different accounts are processed in parallel on the tokio worker threads.

use crate::core::{BatchProcessor, SystemClock};
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::TransactionCsvRecord;
use crate::strategy::{BankServices, ProcessingStrategy, ReplayInputs, ReplayStats};
use crate::types::BankError;
use std::io::Write;
use std::sync::Arc;
use tracing::{info, warn};

/// Configuration for batch processing
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of transactions per batch
    pub batch_size: usize,

    /// Number of tokio worker threads
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a BatchConfig; zero values fall back to the defaults
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                default = default.batch_size,
                "invalid batch_size 0, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            warn!(
                default = default.max_concurrent_batches,
                "invalid max_concurrent_batches 0, using default"
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
///
/// Rows the reader cannot decode are counted as rejected, as in the sync
/// strategy.
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn process(&self, inputs: &ReplayInputs, output: &mut dyn Write) -> Result<ReplayStats, BankError> {
        let bank = BankServices::in_memory(Arc::new(SystemClock));
        bank.seed_clients(&inputs.clients)?;
        bank.seed_products(&inputs.products)?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| BankError::Io {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        let stats = runtime.block_on(async {
            let batch_processor = BatchProcessor::new(Arc::clone(&bank.processor));

            let file = tokio::fs::File::open(&inputs.transactions)
                .await
                .map_err(|e| BankError::Io {
                    message: format!(
                        "Failed to open file '{}': {}",
                        inputs.transactions.display(),
                        e
                    ),
                })?;
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            let mut stats = ReplayStats::default();
            loop {
                let batch = reader
                    .read_batch::<TransactionCsvRecord>(self.config.batch_size)
                    .await;
                if batch.is_empty() {
                    break;
                }

                for error in &batch.rejected {
                    stats.record_unreadable(error);
                }
                for outcome in batch_processor.process_batch(batch.rows).await {
                    stats.record(&outcome.request, &outcome.result);
                }
            }

            Ok::<_, BankError>(stats)
        })?;

        info!(
            processed = stats.processed,
            no_content = stats.no_content,
            rejected = stats.rejected,
            "async replay finished"
        );

        bank.write_products(output)?;
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn replay(config: BatchConfig, transactions: &str) -> Result<(ReplayStats, String), BankError> {
        let transactions = create_temp_csv(transactions);
        let products = create_temp_csv(
            "kind,id,client,type,balance,interest_rate\n\
             deposit,a1,c1,CURRENT,,\n\
             deposit,a2,c2,SAVINGS,,\n",
        );
        let clients = create_temp_csv("id,type,profile\nc1,BUSINESS,STANDARD\nc2,PERSONAL,STANDARD\n");
        let inputs = ReplayInputs {
            transactions: transactions.path().to_path_buf(),
            products: products.path().to_path_buf(),
            clients: clients.path().to_path_buf(),
        };

        let mut output = Vec::new();
        let stats = AsyncProcessingStrategy::new(config).process(&inputs, &mut output)?;
        Ok((stats, String::from_utf8(output).unwrap()))
    }

    #[test]
    fn test_async_strategy_maintains_ordering_across_batches() {
        let (stats, output) = replay(
            BatchConfig::new(2, num_cpus::get()),
            "type,account,amount,description\n\
             deposit,a1,100.0,x\n\
             deposit,a2,50.0,x\n\
             withdrawal,a1,30.0,x\n\
             deposit,a2,25.0,x\n\
             withdrawal,a1,20.0,x\n",
        )
        .unwrap();

        assert_eq!(stats.processed, 5);
        assert!(output.contains("deposit,a1,c1,CURRENT,50.0000,"));
        assert!(output.contains("deposit,a2,c2,SAVINGS,75.0000,"));
    }

    #[test]
    fn test_async_strategy_reports_rejections() {
        let (stats, output) = replay(
            BatchConfig::default(),
            "type,account,amount,description\n\
             withdrawal,a1,1,x\n\
             deposit,missing,1,x\n\
             deposit,a2,1,\n",
        )
        .unwrap();

        assert_eq!(
            stats,
            ReplayStats {
                processed: 0,
                no_content: 1,
                rejected: 2,
            }
        );
        assert!(output.contains("deposit,a1,c1,CURRENT,0.0000,"));
    }

    #[test]
    fn test_async_strategy_counts_undecodable_rows() {
        let (stats, output) = replay(
            BatchConfig::new(2, 2),
            "type,account,amount,description\n\
             refund,a1,1,x\n\
             deposit,a1,abc,x\n\
             deposit,a1,10,x\n",
        )
        .unwrap();

        assert_eq!(
            stats,
            ReplayStats {
                processed: 1,
                no_content: 0,
                rejected: 2,
            }
        );
        assert!(output.contains("deposit,a1,c1,CURRENT,10.0000,"));
    }

    #[test]
    fn test_async_strategy_handles_missing_file() {
        let result = AsyncProcessingStrategy::new(BatchConfig::default()).process(
            &ReplayInputs {
                transactions: PathBuf::from("nonexistent.csv"),
                products: PathBuf::from("nonexistent.csv"),
                clients: PathBuf::from("nonexistent.csv"),
            },
            &mut Vec::<u8>::new(),
        );
        assert!(matches!(result, Err(BankError::Io { .. })));
    }

    #[test]
    fn test_batch_config_zero_values_fall_back() {
        let config = BatchConfig::new(0, 0);
        assert_eq!(config.batch_size, 1000);
        assert_eq!(config.max_concurrent_batches, num_cpus::get());
    }
}
