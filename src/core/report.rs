//! Per-client product summary

use crate::core::traits::ProductStore;
use crate::types::{BankError, CreditLine, DepositAccount};
use rust_decimal::Decimal;
use serde::Serialize;

/// Products a client currently has in use
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductReport {
    /// Deposit accounts with a positive balance
    pub deposit_accounts: Vec<DepositAccount>,

    /// Credit lines with status ACTIVE
    pub credit_lines: Vec<CreditLine>,
}

pub(crate) fn build(products: &dyn ProductStore, client_id: &str) -> Result<ProductReport, BankError> {
    let deposit_accounts = products
        .list_deposits_by_client(client_id)?
        .into_iter()
        .filter(|account| account.balance > Decimal::ZERO)
        .collect();

    let credit_lines = products
        .list_credits_by_client(client_id)?
        .into_iter()
        .filter(CreditLine::is_active)
        .collect();

    Ok(ProductReport {
        deposit_accounts,
        credit_lines,
    })
}
