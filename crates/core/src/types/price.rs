//! Product price using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is zero or negative.
    #[error("price must be positive")]
    NotPositive,
    /// The amount is positive but rounds to less than one cent.
    #[error("price must be at least {min}")]
    BelowMinimum {
        /// Smallest accepted amount.
        min: Decimal,
    },
    /// The amount does not fit the stored column (`NUMERIC(10, 2)`).
    #[error("price must be less than {max}")]
    TooLarge {
        /// Exclusive upper bound.
        max: Decimal,
    },
}

/// A strictly positive product price in the studio's currency.
///
/// Serialized as a decimal string (`"45.00"`) so no precision is lost on the
/// wire. Deserialization accepts both JSON numbers and strings, but always goes
/// through [`Price::new`], so a non-positive amount can never be constructed.
///
/// ```
/// use rust_decimal::Decimal;
/// use scalebreakers_core::Price;
///
/// assert!(Price::new(Decimal::new(4500, 2)).is_ok());
/// assert!(Price::new(Decimal::ZERO).is_err());
/// assert!(Price::new(Decimal::new(-1, 0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Exclusive upper bound, matching `NUMERIC(10, 2)`.
    pub const MAX: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

    /// One cent.
    pub const MIN: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

    /// Create a price from a decimal amount, rounded to cents.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotPositive`] if `amount <= 0`,
    /// [`PriceError::BelowMinimum`] if it rounds below one cent and
    /// [`PriceError::TooLarge`] if it does not fit the stored column.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount <= Decimal::ZERO {
            return Err(PriceError::NotPositive);
        }
        let mut amount = amount.round_dp(2);
        amount.rescale(2);
        if amount < Self::MIN {
            return Err(PriceError::BelowMinimum { min: Self::MIN });
        }
        if amount >= Self::MAX {
            return Err(PriceError::TooLarge { max: Self::MAX });
        }
        Ok(Self(amount))
    }

    /// Returns the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
