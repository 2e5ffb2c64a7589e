//! Processing date source
//!
//! Committed transactions are stamped with the date the processor ran, never
//! a caller-supplied one.

use chrono::{Local, NaiveDate};
use std::fmt::Debug;

/// Source of the current processing date
pub trait Clock: Send + Sync + Debug {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the host
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always returns the same date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
