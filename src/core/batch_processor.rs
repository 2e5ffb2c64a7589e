//! Batch submission with account-based partitioning
//!
//! `BatchProcessor` splits a batch of transaction requests by target account
//! and submits each account's requests on its own tokio task. Requests for
//! different accounts run concurrently; requests for one account keep their
//! input order.
//!
//! # Architecture
//!
//! ```text
//! BatchProcessor
//!     └── Arc<TransactionProcessor>  (shared, per-account locking inside)
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use tracing::error;

use super::processor::{SubmitOutcome, TransactionProcessor};
use crate::types::{BankError, ProductId, TransactionRequest};

/// Outcome of submitting a single request
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// The request that was submitted
    pub request: TransactionRequest,

    pub result: Result<SubmitOutcome, BankError>,
}

/// Batch processor with account-based partitioning
#[derive(Clone)]
pub struct BatchProcessor {
    processor: Arc<TransactionProcessor>,
}

impl BatchProcessor {
    pub fn new(processor: Arc<TransactionProcessor>) -> Self {
        Self { processor }
    }

    /// Partition a batch by target account id
    ///
    /// Every request lands in exactly one partition, and each partition keeps
    /// the input order.
    pub fn partition_by_account(
        &self,
        batch: Vec<TransactionRequest>,
    ) -> HashMap<ProductId, Vec<TransactionRequest>> {
        let mut account_batches: HashMap<ProductId, Vec<TransactionRequest>> = HashMap::new();

        for request in batch {
            account_batches
                .entry(request.account_id.clone())
                .or_default()
                .push(request);
        }

        account_batches
    }

    /// Submit one account's requests sequentially, in order
    ///
    /// A failed request does not stop the ones after it.
    pub async fn process_account_requests(
        &self,
        requests: Vec<TransactionRequest>,
    ) -> Vec<ProcessingResult> {
        let mut results = Vec::with_capacity(requests.len());

        for request in requests {
            let result = self.processor.submit(request.clone());
            results.push(ProcessingResult { request, result });
        }

        results
    }

    /// Submit a batch, one tokio task per account
    ///
    /// Results are grouped by account, not in input order.
    pub async fn process_batch(&self, batch: Vec<TransactionRequest>) -> Vec<ProcessingResult> {
        let account_batches = self.partition_by_account(batch);

        let mut tasks = Vec::with_capacity(account_batches.len());
        for (_account_id, requests) in account_batches {
            let batch_processor = self.clone();
            tasks.push(tokio::spawn(async move {
                batch_processor.process_account_requests(requests).await
            }));
        }

        let mut results = Vec::new();
        for task in tasks {
            match task.await {
                Ok(account_results) => results.extend(account_results),
                Err(e) => error!(error = %e, "batch task panicked"),
            }
        }

        results
    }
}
