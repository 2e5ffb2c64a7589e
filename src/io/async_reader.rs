//! Asynchronous CSV reader with batch interface
//!
//! Reads transaction rows in batches for the async replay strategy.
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of domain values
//!                  ↓
//!           csv_format module
//!           (CsvRow rows)
//! ```

use crate::io::csv_format::CsvRow;
use crate::types::BankError;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;

/// One batch of rows: the decoded values and the errors for rows that could
/// not be decoded, each in file order
#[derive(Debug)]
pub struct RowBatch<O> {
    pub rows: Vec<O>,
    pub rejected: Vec<BankError>,
}

impl<O> RowBatch<O> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
            rejected: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len() + self.rejected.len()
    }

    /// An empty batch means the end of the input was reached
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.rejected.is_empty()
    }
}

/// Asynchronous CSV reader
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    line_num: u64,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self {
            csv_reader,
            line_num: 1,
        }
    }

    /// Read up to `batch_size` rows
    ///
    /// Rows that fail to parse or convert land in `rejected` with their line
    /// number, exactly as `SyncReader` yields them, and count toward the
    /// batch size.
    pub async fn read_batch<T: CsvRow + 'static>(
        &mut self,
        batch_size: usize,
    ) -> RowBatch<T::Output> {
        let mut batch = RowBatch::with_capacity(batch_size);
        let mut rows = self.csv_reader.deserialize::<T>();

        while batch.len() < batch_size {
            let Some(row) = rows.next().await else {
                break;
            };
            self.line_num += 1;
            let line = self.line_num;

            match row {
                Ok(row) => match row.into_domain() {
                    Ok(value) => batch.rows.push(value),
                    Err(BankError::Parse { message, .. }) => {
                        batch.rejected.push(BankError::parse(Some(line), message))
                    }
                    Err(e) => batch.rejected.push(e),
                },
                Err(e) => batch.rejected.push(BankError::parse(Some(line), e.to_string())),
            }
        }

        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::csv_format::TransactionCsvRecord;
    use crate::types::TransactionType;
    use futures::io::Cursor;
    use rust_decimal::Decimal;

    const HEADER: &str = "type,account,amount,description\n";

    fn reader(body: &str) -> AsyncReader<Cursor<Vec<u8>>> {
        AsyncReader::new(Cursor::new(format!("{}{}", HEADER, body).into_bytes()))
    }

    #[tokio::test]
    async fn test_read_batch_respects_size() {
        let mut async_reader = reader("deposit,a1,100.0,x\nwithdrawal,a1,50.0,y\ndeposit,a2,200.0,z\n");

        let batch = async_reader.read_batch::<TransactionCsvRecord>(2).await.rows;

        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].tx_type, Some(TransactionType::Deposit));
        assert_eq!(batch[0].amount, Decimal::new(1000, 1));
        assert_eq!(batch[1].tx_type, Some(TransactionType::Withdrawal));
    }

    #[tokio::test]
    async fn test_multiple_batches_until_exhausted() {
        let mut async_reader = reader(
            "deposit,a1,1,x\n\
             deposit,a2,2,x\n\
             deposit,a3,3,x\n",
        );

        let first = async_reader.read_batch::<TransactionCsvRecord>(2).await;
        let second = async_reader.read_batch::<TransactionCsvRecord>(2).await;
        let third = async_reader.read_batch::<TransactionCsvRecord>(2).await;

        assert_eq!(first.rows.len(), 2);
        assert_eq!(first.rows[1].account_id, "a2");
        assert_eq!(second.rows.len(), 1);
        assert_eq!(second.rows[0].account_id, "a3");
        assert!(third.is_empty());
    }

    #[tokio::test]
    async fn test_rejected_rows_are_reported_with_line_numbers() {
        let mut async_reader = reader(
            "deposit,a1,1,x\n\
             refund,a1,1,x\n\
             deposit,a1,nope,x\n\
             purchase,a1,1,x\n",
        );

        let batch = async_reader.read_batch::<TransactionCsvRecord>(10).await;

        assert_eq!(batch.rows.len(), 2);
        assert_eq!(batch.rows[1].tx_type, Some(TransactionType::Purchase));
        assert_eq!(batch.rejected.len(), 2);
        assert!(matches!(
            batch.rejected[0],
            BankError::InvalidTransactionType { .. }
        ));
        assert!(matches!(
            batch.rejected[1],
            BankError::Parse { line: Some(4), .. }
        ));
    }

    #[tokio::test]
    async fn test_rejected_rows_count_toward_batch_size() {
        let mut async_reader = reader(
            "refund,a1,1,x\n\
             refund,a1,1,x\n\
             deposit,a1,1,x\n",
        );

        let first = async_reader.read_batch::<TransactionCsvRecord>(2).await;
        let second = async_reader.read_batch::<TransactionCsvRecord>(2).await;

        assert!(first.rows.is_empty());
        assert_eq!(first.rejected.len(), 2);
        assert!(!first.is_empty());
        assert_eq!(second.rows.len(), 1);
        assert!(second.rejected.is_empty());
    }

    #[tokio::test]
    async fn test_whitespace_handling() {
        let mut async_reader = reader("  DEPOSIT  ,  a1  ,  7  ,  note  \n");

        let batch = async_reader.read_batch::<TransactionCsvRecord>(10).await.rows;

        assert_eq!(batch[0].account_id, "a1");
        assert_eq!(batch[0].description, "note");
    }
}
