//! Deposit account types
//!
//! This module defines the DepositAccount record, its product types, and the
//! fixed table of per-type defaults applied when an account is opened.

use super::client::ClientId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Product identifier shared by deposit accounts and credit lines
pub type ProductId = String;

/// Kind of deposit account a client can open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DepositAccountType {
    /// Interest-bearing account with a monthly movements limit
    Savings,

    /// Unlimited movements, charged a fixed commission
    Current,

    /// Locked deposit allowing a single movement
    FixedTerm,
}

impl DepositAccountType {
    /// Every deposit account type, in declaration order
    pub const ALL: [DepositAccountType; 3] = [
        DepositAccountType::Savings,
        DepositAccountType::Current,
        DepositAccountType::FixedTerm,
    ];

    /// Defaults applied to a new account of this type
    ///
    /// | type       | commission_free | movements_free | movements_limit | commission_amount |
    /// |------------|-----------------|----------------|-----------------|-------------------|
    /// | SAVINGS    | true            | false          | 10              | -                 |
    /// | CURRENT    | false           | true           | -               | 20.0              |
    /// | FIXED_TERM | true            | false          | 1               | -                 |
    pub fn defaults(self) -> AccountDefaults {
        match self {
            DepositAccountType::Savings => AccountDefaults {
                commission_free: true,
                commission_amount: None,
                movements_free: false,
                movements_limit: Some(10),
            },
            DepositAccountType::Current => AccountDefaults {
                commission_free: false,
                commission_amount: Some(Decimal::new(200, 1)),
                movements_free: true,
                movements_limit: None,
            },
            DepositAccountType::FixedTerm => AccountDefaults {
                commission_free: true,
                commission_amount: None,
                movements_free: false,
                movements_limit: Some(1),
            },
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            DepositAccountType::Savings => "SAVINGS",
            DepositAccountType::Current => "CURRENT",
            DepositAccountType::FixedTerm => "FIXED_TERM",
        }
    }
}

impl fmt::Display for DepositAccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DepositAccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SAVINGS" => Ok(DepositAccountType::Savings),
            "CURRENT" => Ok(DepositAccountType::Current),
            "FIXED_TERM" => Ok(DepositAccountType::FixedTerm),
            _ => Err(format!("Unknown account type '{}'", s)),
        }
    }
}

/// Commission and movement settings derived from the account type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccountDefaults {
    pub commission_free: bool,
    pub commission_amount: Option<Decimal>,
    pub movements_free: bool,
    pub movements_limit: Option<u32>,
}

/// Balance-holding product owned by a client
///
/// Invariant: `balance` never goes below zero once a transaction has been
/// committed against the account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositAccount {
    /// Opaque identifier, assigned at opening time when empty
    #[serde(default)]
    pub id: ProductId,

    /// Owning client
    pub client_id: ClientId,

    /// Product type, selects the defaults table row
    #[serde(rename = "type")]
    pub account_type: DepositAccountType,

    /// Current balance
    #[serde(default)]
    pub balance: Decimal,

    #[serde(default)]
    pub commission_free: bool,

    /// Present only for CURRENT accounts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission_amount: Option<Decimal>,

    #[serde(default)]
    pub movements_free: bool,

    /// Present only when `movements_free` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movements_limit: Option<u32>,
}

impl DepositAccount {
    /// Create an opening request for the given client and type
    ///
    /// The identifier is left empty and every derived field is zeroed;
    /// provisioning fills them in.
    pub fn new(client_id: impl Into<ClientId>, account_type: DepositAccountType) -> Self {
        DepositAccount {
            id: ProductId::new(),
            client_id: client_id.into(),
            account_type,
            balance: Decimal::ZERO,
            commission_free: false,
            commission_amount: None,
            movements_free: false,
            movements_limit: None,
        }
    }

    /// Builder-style identifier override
    pub fn with_id(mut self, id: impl Into<ProductId>) -> Self {
        self.id = id.into();
        self
    }

    /// Overwrite the commission and movement fields with the type defaults
    pub fn apply_defaults(&mut self) {
        let defaults = self.account_type.defaults();
        self.commission_free = defaults.commission_free;
        self.commission_amount = defaults.commission_amount;
        self.movements_free = defaults.movements_free;
        self.movements_limit = defaults.movements_limit;
    }
}
