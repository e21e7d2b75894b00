//! Workshop listings.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use scalebreakers_core::WorkshopId;

/// A scheduled creative workshop.
///
/// Workshops are created by the seeding CLI; the API only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workshop {
    pub id: WorkshopId,
    pub title: String,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    /// Free-form start time as displayed, e.g. "6:30 PM".
    pub time: Option<String>,
    pub location: Option<String>,
    pub capacity: Option<i32>,
    pub price: Option<Decimal>,
    pub image_url: Option<String>,
    /// Image URL of a QR code linking to the ticket page.
    pub qr_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Workshop {
    /// Listing order: dated workshops first by date, then by title.
    #[must_use]
    pub fn listing_cmp(&self, other: &Self) -> std::cmp::Ordering {
        match (self.date, other.date) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }
        .then_with(|| self.title.cmp(&other.title))
    }
}
