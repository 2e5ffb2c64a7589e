//! Error types for the bank products engine
//!
//! This module defines every error the engine can return from provisioning,
//! transaction processing, and the file layer used by the replay CLI.
//!
//! # Error Categories
//!
//! - **Input Errors**: Validation failures, unknown transaction types
//! - **Business Rule Errors**: Duplicate products, ineligible clients, insufficient funds
//! - **Collaborator Errors**: Storage failures, reported verbatim and never retried
//! - **File Errors**: I/O and CSV parsing failures in the replay pipeline
//!
//! An unknown transaction target is not an error; the processor reports it
//! as a distinct outcome.

use crate::types::ProductKind;
use thiserror::Error;

/// Main error type for the bank products engine
///
/// Every rejection is checked before any store write, so all variants except
/// `Storage` leave persisted state untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BankError {
    /// Malformed input; never touches storage
    #[error("Validation error: {reason}")]
    Validation {
        /// Human-readable reason
        reason: String,
    },

    /// The client already holds a product of the requested type, or is not
    /// allowed to hold it
    #[error("Conflict: {reason}")]
    Conflict {
        /// Human-readable reason
        reason: String,
    },

    /// Balance too low for the requested debit
    ///
    /// The product balance is left unchanged.
    #[error("Insufficient funds: {reason}")]
    InsufficientFunds {
        /// Human-readable reason
        reason: String,
    },

    /// Transaction type not supported
    #[error("Invalid transaction type '{tx_type}'")]
    InvalidTransactionType {
        /// The rejected type, as received
        tx_type: String,
    },

    /// Collaborator (store or directory) failure
    ///
    /// When raised during the write phase the transaction may or may not
    /// have been recorded.
    #[error("Storage failure: {cause}")]
    Storage {
        /// Collaborator error message
        cause: String,
    },

    /// The client directory has no record for the client
    #[error("Client {client_id} not found")]
    ClientNotFound {
        /// Client that was looked up
        client_id: String,
    },

    /// A product looked up by an administrative operation does not exist
    #[error("{kind} {id} not found")]
    ProductNotFound {
        /// Kind of product that was looked up
        kind: ProductKind,
        /// Identifier that was looked up
        id: String,
    },

    /// Decimal arithmetic would overflow
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Product identifier
        account: String,
    },

    /// I/O error while reading or writing files
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error
    ///
    /// Recoverable: the malformed row is skipped.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Parse {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },
}

/// Failure reported by a store or directory collaborator
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        StoreError {
            message: message.into(),
        }
    }
}

impl From<StoreError> for BankError {
    fn from(error: StoreError) -> Self {
        BankError::Storage {
            cause: error.message,
        }
    }
}

impl From<std::io::Error> for BankError {
    fn from(error: std::io::Error) -> Self {
        BankError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for BankError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        BankError::Parse {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl BankError {
    /// Create a Validation error
    pub fn validation(reason: impl Into<String>) -> Self {
        BankError::Validation {
            reason: reason.into(),
        }
    }

    /// Create a Conflict error
    pub fn conflict(reason: impl Into<String>) -> Self {
        BankError::Conflict {
            reason: reason.into(),
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(reason: impl Into<String>) -> Self {
        BankError::InsufficientFunds {
            reason: reason.into(),
        }
    }

    /// Create an InvalidTransactionType error
    pub fn invalid_transaction_type(tx_type: impl Into<String>) -> Self {
        BankError::InvalidTransactionType {
            tx_type: tx_type.into(),
        }
    }

    /// Create a ClientNotFound error
    pub fn client_not_found(client_id: &str) -> Self {
        BankError::ClientNotFound {
            client_id: client_id.to_string(),
        }
    }

    /// Create a ProductNotFound error
    pub fn product_not_found(kind: ProductKind, id: &str) -> Self {
        BankError::ProductNotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: &str) -> Self {
        BankError::ArithmeticOverflow {
            operation: operation.to_string(),
            account: account.to_string(),
        }
    }

    /// Create a Parse error
    pub fn parse(line: Option<u64>, message: impl Into<String>) -> Self {
        BankError::Parse {
            line,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::validation(
        BankError::Validation { reason: "Invalid amount".to_string() },
        "Validation error: Invalid amount"
    )]
    #[case::conflict(
        BankError::Conflict { reason: "The client already has an account of type SAVINGS".to_string() },
        "Conflict: The client already has an account of type SAVINGS"
    )]
    #[case::insufficient_funds(
        BankError::InsufficientFunds { reason: "Insufficient balance for withdrawal".to_string() },
        "Insufficient funds: Insufficient balance for withdrawal"
    )]
    #[case::invalid_transaction_type(
        BankError::InvalidTransactionType { tx_type: "REFUND".to_string() },
        "Invalid transaction type 'REFUND'"
    )]
    #[case::storage(
        BankError::Storage { cause: "connection reset".to_string() },
        "Storage failure: connection reset"
    )]
    #[case::client_not_found(
        BankError::ClientNotFound { client_id: "c9".to_string() },
        "Client c9 not found"
    )]
    #[case::product_not_found(
        BankError::ProductNotFound { kind: ProductKind::Credit, id: "cr1".to_string() },
        "Credit line cr1 not found"
    )]
    #[case::arithmetic_overflow(
        BankError::ArithmeticOverflow { operation: "deposit".to_string(), account: "a1".to_string() },
        "Arithmetic overflow in deposit for account a1"
    )]
    #[case::parse_error_with_line(
        BankError::Parse { line: Some(42), message: "Invalid field".to_string() },
        "CSV parse error at line 42: Invalid field"
    )]
    #[case::parse_error_without_line(
        BankError::Parse { line: None, message: "Invalid field".to_string() },
        "CSV parse error: Invalid field"
    )]
    fn test_error_display(#[case] error: BankError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::validation(
        BankError::validation("Invalid account"),
        BankError::Validation { reason: "Invalid account".to_string() }
    )]
    #[case::conflict(
        BankError::conflict("duplicate"),
        BankError::Conflict { reason: "duplicate".to_string() }
    )]
    #[case::product_not_found(
        BankError::product_not_found(ProductKind::Deposit, "a1"),
        BankError::ProductNotFound { kind: ProductKind::Deposit, id: "a1".to_string() }
    )]
    fn test_helper_functions(#[case] result: BankError, #[case] expected: BankError) {
        assert_eq!(result, expected);
    }

    #[test]
    fn test_store_error_becomes_storage_failure() {
        let error: BankError = StoreError::new("disk full").into();
        assert_eq!(
            error,
            BankError::Storage {
                cause: "disk full".to_string()
            }
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: BankError = io_error.into();
        assert!(matches!(error, BankError::Io { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
