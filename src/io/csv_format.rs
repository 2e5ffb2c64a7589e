//! CSV format handling for seed files, transaction files and product output
//!
//! This module centralizes all CSV format concerns, providing:
//! - Row structures for deserialization (transactions, products, clients)
//! - Conversion from rows to domain types through the `CsvRow` trait
//! - Product state output serialization
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{
    BankError, Client, ClientId, ClientProfile, ClientType, CreditLine, CreditType,
    DepositAccount, DepositAccountType, ProductId, TransactionRequest, TransactionType,
};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// A CSV row that converts into a domain value
pub trait CsvRow: DeserializeOwned {
    type Output;

    /// Convert the raw row, rejecting unknown enum values and bad numbers
    fn into_domain(self) -> Result<Self::Output, BankError>;
}

/// Transaction file row: `type,account,amount,description`
///
/// Every column but `account` may be empty; emptiness is reported by the
/// processor's validation rather than at decode time.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TransactionCsvRecord {
    #[serde(rename = "type")]
    pub tx_type: String,
    pub account: ProductId,
    pub amount: Option<String>,
    pub description: Option<String>,
}

impl CsvRow for TransactionCsvRecord {
    type Output = TransactionRequest;

    /// An empty type becomes a missing type and an empty amount becomes
    /// zero, so both surface as validation failures on submit.
    ///
    /// # Errors
    ///
    /// - `InvalidTransactionType` for a type that is not DEPOSIT, WITHDRAWAL or PURCHASE
    /// - `Parse` for an amount that is not a decimal number
    fn into_domain(self) -> Result<TransactionRequest, BankError> {
        let tx_type = if self.tx_type.trim().is_empty() {
            None
        } else {
            Some(
                TransactionType::from_str(&self.tx_type)
                    .map_err(BankError::invalid_transaction_type)?,
            )
        };

        let amount = parse_decimal(self.amount.as_deref(), "amount", &self.account)?
            .unwrap_or(Decimal::ZERO);

        Ok(TransactionRequest {
            account_id: self.account,
            amount,
            tx_type,
            description: self.description.unwrap_or_default(),
        })
    }
}

/// Seed file row: `kind,id,client,type,balance,interest_rate`
///
/// `kind` is `deposit` or `credit`. `interest_rate` is only read for credit
/// lines; `balance` of a deposit row is handed to provisioning, which resets
/// it to zero.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ProductCsvRecord {
    pub kind: String,
    pub id: Option<ProductId>,
    pub client: ClientId,
    #[serde(rename = "type")]
    pub product_type: String,
    pub balance: Option<String>,
    pub interest_rate: Option<String>,
}

/// Product to open, decoded from a seed row
#[derive(Debug, Clone, PartialEq)]
pub enum ProductSeed {
    Deposit(DepositAccount),
    Credit(CreditLine),
}

impl CsvRow for ProductCsvRecord {
    type Output = ProductSeed;

    fn into_domain(self) -> Result<ProductSeed, BankError> {
        let id = self.id.unwrap_or_default();
        let balance = parse_decimal(self.balance.as_deref(), "balance", &id)?;

        match self.kind.trim().to_lowercase().as_str() {
            "deposit" => {
                let account_type: DepositAccountType = self
                    .product_type
                    .parse()
                    .map_err(|e: String| BankError::parse(None, e))?;
                let mut account = DepositAccount::new(self.client, account_type).with_id(id);
                account.balance = balance.unwrap_or(Decimal::ZERO);
                Ok(ProductSeed::Deposit(account))
            }
            "credit" => {
                let credit_type: CreditType = self
                    .product_type
                    .parse()
                    .map_err(|e: String| BankError::parse(None, e))?;
                let interest_rate =
                    parse_decimal(self.interest_rate.as_deref(), "interest_rate", &id)?
                        .unwrap_or(Decimal::ZERO);
                let credit = CreditLine::new(
                    self.client,
                    credit_type,
                    balance.unwrap_or(Decimal::ZERO),
                    interest_rate,
                )
                .with_id(id);
                Ok(ProductSeed::Credit(credit))
            }
            other => Err(BankError::parse(
                None,
                format!("Unknown product kind '{}'", other),
            )),
        }
    }
}

/// Client directory row: `id,type,profile`
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ClientCsvRecord {
    pub id: ClientId,
    #[serde(rename = "type")]
    pub client_type: String,
    pub profile: String,
}

impl CsvRow for ClientCsvRecord {
    type Output = (ClientId, Client);

    fn into_domain(self) -> Result<(ClientId, Client), BankError> {
        let client_type: ClientType = self
            .client_type
            .parse()
            .map_err(|e: String| BankError::parse(None, e))?;
        let profile: ClientProfile = self
            .profile
            .parse()
            .map_err(|e: String| BankError::parse(None, e))?;
        Ok((self.id, Client::new(client_type, profile)))
    }
}

fn parse_decimal(
    raw: Option<&str>,
    field: &str,
    id: &str,
) -> Result<Option<Decimal>, BankError> {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => Decimal::from_str(value).map(Some).map_err(|_| {
            BankError::parse(None, format!("Invalid {} '{}' for {}", field, value, id))
        }),
        _ => Ok(None),
    }
}

/// Balance column: four decimal places, or the exact value when it needs more
fn format_balance(balance: Decimal) -> String {
    let exact = balance.normalize();
    if exact.scale() > 4 {
        exact.to_string()
    } else {
        format!("{:.4}", balance)
    }
}

/// Write final product states as CSV
///
/// Columns: kind, id, client, type, balance, status. Deposit accounts come
/// first, then credit lines, each sorted by id. Deposit rows have an empty
/// status. Balances are never rounded.
pub fn write_products_csv(
    deposits: &[DepositAccount],
    credits: &[CreditLine],
    output: &mut dyn Write,
) -> Result<(), BankError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["kind", "id", "client", "type", "balance", "status"])?;

    let mut deposits = deposits.to_vec();
    deposits.sort_by(|a, b| a.id.cmp(&b.id));
    for account in deposits {
        writer.write_record(&[
            "deposit".to_string(),
            account.id,
            account.client_id,
            account.account_type.to_string(),
            format_balance(account.balance),
            String::new(),
        ])?;
    }

    let mut credits = credits.to_vec();
    credits.sort_by(|a, b| a.id.cmp(&b.id));
    for credit in credits {
        writer.write_record(&[
            "credit".to_string(),
            credit.id,
            credit.client_id,
            credit.credit_type.to_string(),
            format_balance(credit.balance),
            credit.status.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
