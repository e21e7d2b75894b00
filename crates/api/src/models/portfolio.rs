//! Portfolio gallery items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use scalebreakers_core::PortfolioItemId;

/// A piece shown in the portfolio gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    pub id: PortfolioItemId,
    pub title: String,
    pub description: Option<String>,
    /// Free-form gallery grouping, e.g. "murals".
    pub category: String,
    pub image_url: Option<String>,
    /// Lower sorts first.
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

impl PortfolioItem {
    /// Gallery order: `display_order`, then newest first.
    #[must_use]
    pub fn gallery_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.display_order
            .cmp(&other.display_order)
            .then_with(|| other.created_at.cmp(&self.created_at))
    }
}
