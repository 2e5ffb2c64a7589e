//! Engine components shared by the replay strategies
//!
//! Wires the in-memory collaborators to provisioning, the processor and the
//! catalog, and seeds them from the client and product files. Seeding goes
//! through `AccountProvisioning`, so every eligibility rule applies to seed
//! rows exactly as it would to a live request.

use crate::core::{
    AccountProvisioning, Clock, InMemoryClientDirectory, InMemoryProductStore,
    InMemoryTransactionStore, ProductCatalog, SubmitOutcome, TransactionProcessor,
};
use crate::io::csv_format::{write_products_csv, ClientCsvRecord, ProductCsvRecord, ProductSeed};
use crate::io::sync_reader::SyncReader;
use crate::types::{BankError, TransactionRequest};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Counters reported at the end of a replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub processed: usize,
    pub no_content: usize,
    pub rejected: usize,
}

impl ReplayStats {
    /// Count one submit result, logging rejections
    pub fn record(&mut self, request: &TransactionRequest, result: &Result<SubmitOutcome, BankError>) {
        match result {
            Ok(SubmitOutcome::Processed(_)) => self.processed += 1,
            Ok(SubmitOutcome::NoContent) => self.no_content += 1,
            Err(e) => {
                self.rejected += 1;
                warn!(account_id = %request.account_id, error = %e, "transaction rejected");
            }
        }
    }

    /// Count a row that never reached the processor
    pub fn record_unreadable(&mut self, error: &BankError) {
        self.rejected += 1;
        warn!(error = %error, "transaction row rejected");
    }
}

/// In-memory engine instance
pub struct BankServices {
    pub clients: Arc<InMemoryClientDirectory>,
    pub provisioning: AccountProvisioning,
    pub processor: Arc<TransactionProcessor>,
    pub catalog: ProductCatalog,
}

impl BankServices {
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        let products = Arc::new(InMemoryProductStore::new());
        let transactions = Arc::new(InMemoryTransactionStore::new());
        let clients = Arc::new(InMemoryClientDirectory::new());

        let processor = Arc::new(TransactionProcessor::new(
            products.clone(),
            transactions,
            clock,
        ));

        Self {
            provisioning: AccountProvisioning::new(products.clone(), clients.clone()),
            catalog: ProductCatalog::new(products, processor.account_locks()),
            processor,
            clients,
        }
    }

    /// Register every readable client row; bad rows are logged and skipped
    pub fn seed_clients(&self, path: &Path) -> Result<usize, BankError> {
        for row in SyncReader::<ClientCsvRecord>::new(path)? {
            match row {
                Ok((client_id, client)) => self.clients.register(client_id, client),
                Err(e) => warn!(error = %e, "client row rejected"),
            }
        }

        info!(clients = self.clients.len(), "client directory seeded");
        Ok(self.clients.len())
    }

    /// Open every product in the seed file
    ///
    /// Credit lines are opened before deposit accounts so that VIP and PYME
    /// eligibility does not depend on row order. Returns the number of
    /// products opened.
    pub fn seed_products(&self, path: &Path) -> Result<usize, BankError> {
        let mut deposits = Vec::new();
        let mut credits = Vec::new();

        for row in SyncReader::<ProductCsvRecord>::new(path)? {
            match row {
                Ok(ProductSeed::Deposit(account)) => deposits.push(account),
                Ok(ProductSeed::Credit(credit)) => credits.push(credit),
                Err(e) => warn!(error = %e, "product row rejected"),
            }
        }

        let mut opened = 0;
        for credit in credits {
            match self.provisioning.open_credit_line(credit) {
                Ok(_) => opened += 1,
                Err(e) => warn!(error = %e, "credit line not opened"),
            }
        }
        for account in deposits {
            match self.provisioning.open_deposit_account(account) {
                Ok(_) => opened += 1,
                Err(e) => warn!(error = %e, "deposit account not opened"),
            }
        }

        info!(opened, "products seeded");
        Ok(opened)
    }

    /// Write every product's final state as CSV
    pub fn write_products(&self, output: &mut dyn Write) -> Result<(), BankError> {
        let deposits = self.catalog.list_deposit_accounts()?;
        let credits = self.catalog.list_credit_lines()?;
        write_products_csv(&deposits, &credits, output)
    }
}
