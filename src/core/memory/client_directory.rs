//! In-memory client directory

use crate::core::traits::ClientDirectory;
use crate::types::{Client, StoreError};
use dashmap::DashMap;

/// DashMap-backed `ClientDirectory`, seeded with `register`
#[derive(Debug, Default)]
pub struct InMemoryClientDirectory {
    clients: DashMap<String, Client>,
}

impl InMemoryClientDirectory {
    pub fn new() -> Self {
        Self {
            clients: DashMap::new(),
        }
    }

    /// Add or replace a client
    pub fn register(&self, client_id: impl Into<String>, client: Client) {
        self.clients.insert(client_id.into(), client);
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl ClientDirectory for InMemoryClientDirectory {
    fn find_client(&self, client_id: &str) -> Result<Option<Client>, StoreError> {
        Ok(self.clients.get(client_id).map(|entry| entry.value().clone()))
    }
}
