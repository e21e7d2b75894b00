//! Stock level type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Stock`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StockError {
    /// The count is below zero.
    #[error("stock must be non-negative")]
    Negative,
    /// The count does not fit the stored column.
    #[error("stock must be at most {max}")]
    TooLarge {
        /// Inclusive upper bound.
        max: i32,
    },
}

/// A non-negative count of units on hand.
///
/// Deserialization only accepts JSON integers (a fractional count is a type
/// error) and goes through [`Stock::new`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "i32")]
pub struct Stock(i32);

impl Stock {
    /// No units on hand.
    pub const ZERO: Self = Self(0);

    /// Create a stock level.
    ///
    /// # Errors
    ///
    /// Returns [`StockError::Negative`] for counts below zero and
    /// [`StockError::TooLarge`] for counts that overflow `i32`.
    pub fn new(count: i64) -> Result<Self, StockError> {
        if count < 0 {
            return Err(StockError::Negative);
        }
        i32::try_from(count)
            .map(Self)
            .map_err(|_| StockError::TooLarge { max: i32::MAX })
    }

    /// Returns the count as stored.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }
}

impl TryFrom<i64> for Stock {
    type Error = StockError;

    fn try_from(count: i64) -> Result<Self, Self::Error> {
        Self::new(count)
    }
}

impl From<Stock> for i32 {
    fn from(stock: Stock) -> Self {
        stock.0
    }
}

impl fmt::Display for Stock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
