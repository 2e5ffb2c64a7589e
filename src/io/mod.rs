//! I/O module
//!
//! Handles CSV parsing and output.
//!
//! # Components
//!
//! - `csv_format` - Row formats (transactions, products, clients) and product output
//! - `sync_reader` - Synchronous CSV reader with iterator interface
//! - `async_reader` - Asynchronous CSV reader with batch reading interface

pub mod async_reader;
pub mod csv_format;
pub mod sync_reader;

pub use async_reader::{AsyncReader, RowBatch};
pub use csv_format::{
    write_products_csv, ClientCsvRecord, CsvRow, ProductCsvRecord, ProductSeed,
    TransactionCsvRecord,
};
pub use sync_reader::SyncReader;
