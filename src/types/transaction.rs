//! Transaction-related types
//!
//! `TransactionRequest` is what a caller submits; `Transaction` is the
//! immutable record written to the transaction log once a request commits.

use super::account::ProductId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Transaction identifier
pub type TransactionId = String;

/// Operations a transaction can perform against a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Credit funds to a deposit account
    Deposit,

    /// Debit funds from a deposit account
    Withdrawal,

    /// Debit funds from a deposit account to pay for goods or services
    Purchase,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Deposit => f.write_str("DEPOSIT"),
            TransactionType::Withdrawal => f.write_str("WITHDRAWAL"),
            TransactionType::Purchase => f.write_str("PURCHASE"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEPOSIT" => Ok(TransactionType::Deposit),
            "WITHDRAWAL" => Ok(TransactionType::Withdrawal),
            "PURCHASE" => Ok(TransactionType::Purchase),
            _ => Err(s.trim().to_string()),
        }
    }
}

/// Which kind of product a transaction resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductKind {
    Deposit,
    Credit,
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductKind::Deposit => f.write_str("Deposit account"),
            ProductKind::Credit => f.write_str("Credit line"),
        }
    }
}

/// Transaction as submitted by a caller
///
/// Every field may be malformed; the processor validates them before any
/// store access. `tx_type` is optional because a missing type is a
/// validation failure rather than a decode failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    /// Target product (deposit account or credit line)
    pub account_id: ProductId,

    /// Requested amount, must be strictly positive
    pub amount: Decimal,

    #[serde(rename = "type")]
    pub tx_type: Option<TransactionType>,

    /// Free-text description, must not be blank
    pub description: String,
}

impl TransactionRequest {
    pub fn new(
        account_id: impl Into<ProductId>,
        amount: Decimal,
        tx_type: TransactionType,
        description: impl Into<String>,
    ) -> Self {
        TransactionRequest {
            account_id: account_id.into(),
            amount,
            tx_type: Some(tx_type),
            description: description.into(),
        }
    }
}

/// Committed transaction, append-only per account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,

    pub account_id: ProductId,

    /// Amount as requested; interest charged on credit draws is not included
    pub amount: Decimal,

    #[serde(rename = "type")]
    pub tx_type: TransactionType,

    pub description: String,

    /// Processing date, set at commit time
    pub date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("deposit", TransactionType::Deposit)]
    #[case("WITHDRAWAL", TransactionType::Withdrawal)]
    #[case(" Purchase ", TransactionType::Purchase)]
    fn test_parse_transaction_type(#[case] input: &str, #[case] expected: TransactionType) {
        assert_eq!(input.parse::<TransactionType>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_type_returns_trimmed_input() {
        assert_eq!(
            " refund ".parse::<TransactionType>().unwrap_err(),
            "refund".to_string()
        );
    }

    #[test]
    fn test_committed_transaction_serializes_date_as_iso() {
        let tx = Transaction {
            id: "t1".to_string(),
            account_id: "a1".to_string(),
            amount: Decimal::from(100),
            tx_type: TransactionType::Deposit,
            description: "salary".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        };

        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["date"], "2024-03-01");
        assert_eq!(json["type"], "DEPOSIT");
        assert_eq!(json["accountId"], "a1");
    }
}
