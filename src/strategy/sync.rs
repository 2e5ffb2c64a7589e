//! Synchronous replay strategy
//!
//! Single-threaded pipeline: seed, then stream the transaction file through
//! `SyncReader` and submit each request in file order.

use crate::core::SystemClock;
use crate::io::csv_format::TransactionCsvRecord;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{BankServices, ProcessingStrategy, ReplayInputs, ReplayStats};
use crate::types::BankError;
use std::io::Write;
use std::sync::Arc;
use tracing::info;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use bank_products_engine::strategy::{ProcessingStrategy, ReplayInputs, SyncProcessingStrategy};
/// use std::io;
///
/// let inputs = ReplayInputs {
///     transactions: "transactions.csv".into(),
///     products: "products.csv".into(),
///     clients: "clients.csv".into(),
/// };
/// SyncProcessingStrategy
///     .process(&inputs, &mut io::stdout())
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(&self, inputs: &ReplayInputs, output: &mut dyn Write) -> Result<ReplayStats, BankError> {
        let bank = BankServices::in_memory(Arc::new(SystemClock));
        bank.seed_clients(&inputs.clients)?;
        bank.seed_products(&inputs.products)?;

        let reader = SyncReader::<TransactionCsvRecord>::new(&inputs.transactions)?;
        let mut stats = ReplayStats::default();

        for row in reader {
            match row {
                Ok(request) => {
                    let result = bank.processor.submit(request.clone());
                    stats.record(&request, &result);
                }
                Err(e) => stats.record_unreadable(&e),
            }
        }

        info!(
            processed = stats.processed,
            no_content = stats.no_content,
            rejected = stats.rejected,
            "sync replay finished"
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

    struct Files {
        transactions: NamedTempFile,
        products: NamedTempFile,
        clients: NamedTempFile,
    }

    impl Files {
        fn inputs(&self) -> ReplayInputs {
            ReplayInputs {
                transactions: self.transactions.path().to_path_buf(),
                products: self.products.path().to_path_buf(),
                clients: self.clients.path().to_path_buf(),
            }
        }
    }

    fn files(transactions: &str) -> Files {
        Files {
            transactions: create_temp_csv(transactions),
            products: create_temp_csv(
                "kind,id,client,type,balance,interest_rate\n\
                 deposit,a1,c1,SAVINGS,,\n\
                 credit,cr1,c1,PERSONAL,1000,10\n",
            ),
            clients: create_temp_csv("id,type,profile\nc1,PERSONAL,STANDARD\n"),
        }
    }

    #[test]
    fn test_sync_strategy_replays_in_file_order() {
        let files = files(
            "type,account,amount,description\n\
             withdrawal,a1,10,too early\n\
             deposit,a1,100,salary\n\
             withdrawal,a1,30,rent\n\
             purchase,cr1,100,tv\n",
        );

        let mut output = Vec::new();
        let stats = SyncProcessingStrategy
            .process(&files.inputs(), &mut output)
            .unwrap();

        assert_eq!(stats.processed, 3);
        assert_eq!(stats.rejected, 1);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "kind,id,client,type,balance,status\n\
             deposit,a1,c1,SAVINGS,70.0000,\n\
             credit,cr1,c1,PERSONAL,890.0000,ACTIVE\n"
        );
    }

    #[test]
    fn test_sync_strategy_counts_unknown_targets_and_bad_rows() {
        let files = files(
            "type,account,amount,description\n\
             deposit,ghost,5,nowhere\n\
             refund,a1,5,bad type\n\
             deposit,a1,0,zero\n",
        );

        let mut output = Vec::new();
        let stats = SyncProcessingStrategy
            .process(&files.inputs(), &mut output)
            .unwrap();

        assert_eq!(
            stats,
            ReplayStats {
                processed: 0,
                no_content: 1,
                rejected: 2,
            }
        );
    }

    #[test]
    fn test_sync_strategy_handles_missing_file() {
        let files = files("type,account,amount,description\n");
        let mut inputs = files.inputs();
        inputs.transactions = PathBuf::from("nonexistent.csv");

        let result = SyncProcessingStrategy.process(&inputs, &mut Vec::<u8>::new());
        assert!(matches!(result, Err(BankError::Io { .. })));
    }

    #[test]
    fn test_sync_strategy_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SyncProcessingStrategy>();
    }
}
