//! In-memory implementations of the collaborator contracts
//!
//! These back the replay CLI and serve as test doubles. All of them use
//! `DashMap` for fine-grained locking, so they can be shared behind `Arc`
//! across worker threads.

pub mod client_directory;
pub mod product_store;
pub mod transaction_store;

pub use client_directory::InMemoryClientDirectory;
pub use product_store::InMemoryProductStore;
pub use transaction_store::InMemoryTransactionStore;
