//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over the rows of a CSV file, converted to
//! domain values through `CsvRow`. The same reader serves transaction files,
//! product seed files and client seed files.
//!
//! ```no_run
//! use bank_products_engine::io::csv_format::TransactionCsvRecord;
//! use bank_products_engine::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::<TransactionCsvRecord>::new(Path::new("transactions.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(request) => println!("Submitting: {:?}", request),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual row errors are yielded as `Err` items carrying the line number
//!
//! Rows are read one at a time; the file is never loaded whole.

use crate::io::csv_format::CsvRow;
use crate::types::BankError;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::marker::PhantomData;
use std::path::Path;

/// Synchronous CSV reader yielding `T::Output` per row
#[derive(Debug)]
pub struct SyncReader<T> {
    reader: csv::Reader<File>,
    line_num: u64,
    _row: PhantomData<T>,
}

impl<T: CsvRow> SyncReader<T> {
    /// Open a CSV file for streaming iteration
    ///
    /// Fields are trimmed, rows may omit trailing optional columns, and reads
    /// go through an 8KB buffer.
    pub fn new(path: &Path) -> Result<Self, BankError> {
        let file = File::open(path).map_err(|e| BankError::Io {
            message: format!("Failed to open file '{}': {}", path.display(), e),
        })?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 1,
            _row: PhantomData,
        })
    }
}

impl<T: CsvRow> Iterator for SyncReader<T> {
    type Item = Result<T::Output, BankError>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.reader.deserialize::<T>().next()?;
        self.line_num += 1;
        let line = self.line_num;

        Some(match row {
            Ok(row) => row.into_domain().map_err(|e| match e {
                BankError::Parse { message, .. } => BankError::parse(Some(line), message),
                other => other,
            }),
            Err(e) => Err(BankError::parse(Some(line), e.to_string())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::csv_format::{ClientCsvRecord, ProductCsvRecord, ProductSeed, TransactionCsvRecord};
    use crate::types::TransactionType;
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn read_transactions(content: &str) -> Vec<Result<crate::types::TransactionRequest, BankError>> {
        let file = create_temp_csv(content);
        SyncReader::<TransactionCsvRecord>::new(file.path())
            .unwrap()
            .collect()
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = SyncReader::<TransactionCsvRecord>::new(Path::new("nonexistent.csv"));
        match result {
            Err(BankError::Io { message }) => assert!(message.contains("Failed to open file")),
            other => panic!("Expected I/O error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_reads_transactions_in_order() {
        let records = read_transactions(
            "type,account,amount,description\n\
             deposit,a1,100.0,salary\n\
             withdrawal,a1,50,atm\n\
             purchase,cr1,10,books\n",
        );

        assert_eq!(records.len(), 3);
        let first = records[0].as_ref().unwrap();
        assert_eq!(first.tx_type, Some(TransactionType::Deposit));
        assert_eq!(first.account_id, "a1");
        assert_eq!(first.amount, Decimal::new(1000, 1));
        assert_eq!(first.description, "salary");
        assert_eq!(
            records[2].as_ref().unwrap().tx_type,
            Some(TransactionType::Purchase)
        );
    }

    #[test]
    fn test_handles_whitespace_and_missing_trailing_column() {
        let records = read_transactions(
            "type,account,amount,description\n  DEPOSIT  ,  a1  ,  5  \n",
        );

        let request = records[0].as_ref().unwrap();
        assert_eq!(request.account_id, "a1");
        assert_eq!(request.amount, Decimal::from(5));
        assert!(request.description.is_empty());
    }

    #[test]
    fn test_errors_carry_line_numbers_and_reading_continues() {
        let records = read_transactions(
            "type,account,amount,description\n\
             deposit,a1,1,ok\n\
             deposit,a1,abc,bad amount\n\
             refund,a1,1,bad type\n\
             deposit,a1,2,ok\n",
        );

        assert_eq!(records.len(), 4);
        assert!(records[0].is_ok());
        match &records[1] {
            Err(BankError::Parse { line, message }) => {
                assert_eq!(*line, Some(3));
                assert!(message.contains("Invalid amount"));
            }
            other => panic!("Expected parse error, got {:?}", other),
        }
        assert_eq!(
            records[2],
            Err(BankError::invalid_transaction_type("refund"))
        );
        assert!(records[3].is_ok());
    }

    #[test]
    fn test_empty_file_after_header() {
        assert!(read_transactions("type,account,amount,description\n").is_empty());
    }

    #[test]
    fn test_reads_product_and_client_seeds() {
        let products = create_temp_csv(
            "kind,id,client,type,balance,interest_rate\n\
             credit,cr1,c1,PERSONAL,1000,10\n\
             deposit,a1,c1,SAVINGS,,\n",
        );
        let seeds: Vec<_> = SyncReader::<ProductCsvRecord>::new(products.path())
            .unwrap()
            .filter_map(Result::ok)
            .collect();
        assert_eq!(seeds.len(), 2);
        assert!(matches!(seeds[0], ProductSeed::Credit(_)));
        assert!(matches!(seeds[1], ProductSeed::Deposit(_)));

        let clients = create_temp_csv("id,type,profile\nc1,PERSONAL,VIP\nc2,BUSINESS,unknown\n");
        let rows: Vec<_> = SyncReader::<ClientCsvRecord>::new(clients.path())
            .unwrap()
            .collect();
        assert!(rows[0].is_ok());
        assert!(matches!(rows[1], Err(BankError::Parse { line: Some(3), .. })));
    }
}
