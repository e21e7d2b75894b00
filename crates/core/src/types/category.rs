//! Product category enum.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a string is not a known [`ProductCategory`] slug.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown product category: {0}")]
pub struct CategoryError(pub String);

/// What kind of thing a product is.
///
/// The wire and database representation is the kebab-case slug
/// (`workshop-ticket`, `3d-model`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(type_name = "product_category"))]
pub enum ProductCategory {
    /// A seat at one of the studio's workshops.
    #[serde(rename = "workshop-ticket")]
    #[cfg_attr(feature = "postgres", sqlx(rename = "workshop-ticket"))]
    WorkshopTicket,
    /// A printed 3D model.
    #[serde(rename = "3d-model")]
    #[cfg_attr(feature = "postgres", sqlx(rename = "3d-model"))]
    ThreeDModel,
    #[serde(rename = "diorama")]
    #[cfg_attr(feature = "postgres", sqlx(rename = "diorama"))]
    Diorama,
    #[serde(rename = "canvas")]
    #[cfg_attr(feature = "postgres", sqlx(rename = "canvas"))]
    Canvas,
    /// A mural commission sold as a product.
    #[serde(rename = "mural")]
    #[cfg_attr(feature = "postgres", sqlx(rename = "mural"))]
    Mural,
}

impl ProductCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 5] = [
        Self::WorkshopTicket,
        Self::ThreeDModel,
        Self::Diorama,
        Self::Canvas,
        Self::Mural,
    ];

    /// The slug used on the wire and in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WorkshopTicket => "workshop-ticket",
            Self::ThreeDModel => "3d-model",
            Self::Diorama => "diorama",
            Self::Canvas => "canvas",
            Self::Mural => "mural",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| CategoryError(s.to_owned()))
    }
}
