//! Calendar months and month ranges.
//!
//! RIF extracts are partitioned by year (database) and month (table suffix),
//! so every time-based iteration walks a closed range of `(year, month)`
//! pairs with December rolling over into January of the next year.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{ModelError, Result};

/// A validated `(year, month)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(ModelError::InvalidMonth { month });
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The following month, rolling December over to January.
    #[must_use]
    pub fn next(&self) -> YearMonth {
        if self.month == 12 {
            YearMonth {
                year: self.year + 1,
                month: 1,
            }
        } else {
            YearMonth {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    fn ordinal(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = ModelError;

    /// Parses `YYYY-MM` (a single-digit month is accepted).
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let (year, month) = trimmed
            .split_once('-')
            .ok_or_else(|| ModelError::InvalidPeriod(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| ModelError::InvalidPeriod(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| ModelError::InvalidPeriod(s.to_string()))?;
        YearMonth::new(year, month)
    }
}

/// Inclusive range of months, start not after end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MonthRange {
    start: YearMonth,
    end: YearMonth,
}

impl MonthRange {
    pub fn new(start: YearMonth, end: YearMonth) -> Result<Self> {
        if start > end {
            return Err(ModelError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Validate raw parts. Month values are checked before ordering.
    pub fn from_parts(
        start_year: i32,
        start_month: u32,
        end_year: i32,
        end_month: u32,
    ) -> Result<Self> {
        let start = YearMonth::new(start_year, start_month)?;
        let end = YearMonth::new(end_year, end_month)?;
        MonthRange::new(start, end)
    }

    pub fn start(&self) -> YearMonth {
        self.start
    }

    pub fn end(&self) -> YearMonth {
        self.end
    }

    pub fn total_months(&self) -> usize {
        usize::try_from(self.end.ordinal() - self.start.ordinal() + 1).unwrap_or(0)
    }

    /// Fresh iterator from the start of the range.
    pub fn iter(&self) -> MonthIter {
        MonthIter {
            next: Some(self.start),
            end: self.end,
        }
    }
}

impl fmt::Display for MonthRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MonthRange({} to {})", self.start, self.end)
    }
}

impl IntoIterator for &MonthRange {
    type Item = YearMonth;
    type IntoIter = MonthIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over the months of a [`MonthRange`].
#[derive(Debug, Clone)]
pub struct MonthIter {
    next: Option<YearMonth>,
    end: YearMonth,
}

impl Iterator for MonthIter {
    type Item = YearMonth;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = if current < self.end {
            Some(current.next())
        } else {
            None
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.next {
            Some(next) => {
                usize::try_from(self.end.ordinal() - next.ordinal() + 1).unwrap_or(0)
            }
            None => 0,
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MonthIter {}
