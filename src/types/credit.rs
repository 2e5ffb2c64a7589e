//! Credit line types
//!
//! A credit line's balance is the credit still available to the client.
//! Draws are charged the requested amount plus interest.

use super::account::ProductId;
use super::client::ClientId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of credit line; a client holds at most one of each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreditType {
    Personal,
    Business,
}

impl CreditType {
    pub const ALL: [CreditType; 2] = [CreditType::Personal, CreditType::Business];
}

/// Lifecycle state of a credit line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreditStatus {
    Active,
    Closed,
}

/// Lending product owned by a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditLine {
    #[serde(default)]
    pub id: ProductId,

    pub client_id: ClientId,

    #[serde(rename = "type")]
    pub credit_type: CreditType,

    /// Credit still available to draw
    pub balance: Decimal,

    /// Interest charged on every draw, as a percentage
    pub interest_rate: Decimal,

    /// Forced to ACTIVE when the line is opened
    pub status: CreditStatus,
}

impl CreditLine {
    /// Create an opening request; status starts CLOSED until provisioning
    /// activates the line
    pub fn new(
        client_id: impl Into<ClientId>,
        credit_type: CreditType,
        balance: Decimal,
        interest_rate: Decimal,
    ) -> Self {
        CreditLine {
            id: ProductId::new(),
            client_id: client_id.into(),
            credit_type,
            balance,
            interest_rate,
            status: CreditStatus::Closed,
        }
    }

    pub fn with_id(mut self, id: impl Into<ProductId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == CreditStatus::Active
    }
}

impl fmt::Display for CreditType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreditType::Personal => f.write_str("PERSONAL"),
            CreditType::Business => f.write_str("BUSINESS"),
        }
    }
}

impl FromStr for CreditType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PERSONAL" => Ok(CreditType::Personal),
            "BUSINESS" => Ok(CreditType::Business),
            _ => Err(format!("Unknown credit type '{}'", s)),
        }
    }
}

impl fmt::Display for CreditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreditStatus::Active => f.write_str("ACTIVE"),
            CreditStatus::Closed => f.write_str("CLOSED"),
        }
    }
}
