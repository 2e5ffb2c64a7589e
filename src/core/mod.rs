//! Core business logic module
//!
//! This module contains the product and transaction components:
//! - `traits` - Collaborator contracts (product store, transaction log, client directory)
//! - `provisioning` - Opening deposit accounts and credit lines
//! - `router` - Resolving a transaction target to a product
//! - `processor` - Validating and applying transactions
//! - `catalog` - Administrative lookups and deletions
//! - `report` - Per-client product summary
//! - `batch_processor` - Concurrent submission partitioned by account
//! - `locks` - Per-key serialization
//! - `clock` - Processing date source
//! - `memory` - DashMap-backed collaborator implementations

pub mod batch_processor;
pub mod catalog;
pub mod clock;
pub mod locks;
pub mod memory;
pub mod processor;
pub mod provisioning;
pub mod report;
pub mod router;
pub mod traits;

pub use batch_processor::{BatchProcessor, ProcessingResult};
pub use catalog::ProductCatalog;
pub use clock::{Clock, FixedClock, SystemClock};
pub use locks::KeyedLocks;
pub use memory::{InMemoryClientDirectory, InMemoryProductStore, InMemoryTransactionStore};
pub use processor::{SubmitOutcome, TransactionProcessor};
pub use provisioning::AccountProvisioning;
pub use report::ProductReport;
pub use router::{Route, TransactionRouter};
pub use traits::{ClientDirectory, ProductStore, TransactionStore};
