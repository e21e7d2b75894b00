//! Product catalog types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use scalebreakers_core::{Price, PriceError, ProductCategory, ProductId, Stock, StockError};

use super::{optional_text, required_text};
use crate::error::ValidationError;

/// A product in the shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: ProductCategory,
    pub price: Price,
    pub stock: Stock,
    pub image_url: Option<String>,
    pub is_one_of_one: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Apply a validated partial update in place.
    pub fn apply(&mut self, changes: &ProductChanges, now: DateTime<Utc>) {
        if let Some(name) = &changes.name {
            self.name.clone_from(name);
        }
        if let Some(description) = &changes.description {
            self.description.clone_from(description);
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(stock) = changes.stock {
            self.stock = stock;
        }
        if let Some(image_url) = &changes.image_url {
            self.image_url = Some(image_url.clone());
        }
        if let Some(is_one_of_one) = changes.is_one_of_one {
            self.is_one_of_one = is_one_of_one;
        }
        self.updated_at = now;
    }
}

/// A validated product ready to be written. The id is assigned separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub category: ProductCategory,
    pub price: Price,
    pub stock: Stock,
    pub image_url: Option<String>,
    pub is_one_of_one: bool,
}

/// A validated partial update. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<ProductCategory>,
    pub price: Option<Price>,
    pub stock: Option<Stock>,
    pub image_url: Option<String>,
    pub is_one_of_one: Option<bool>,
}

/// `products.create` input.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductInput {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: Decimal,
    pub stock: i64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_one_of_one: bool,
}

impl CreateProductInput {
    /// Validate every field.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered, in field order.
    pub fn validate(self) -> Result<NewProduct, ValidationError> {
        Ok(NewProduct {
            name: required_text("name", "Name", &self.name)?,
            description: required_text_unbounded("description", "Description", &self.description)?,
            category: parse_category(&self.category)?,
            price: parse_price(self.price)?,
            stock: parse_stock(self.stock)?,
            image_url: optional_text(self.image_url),
            is_one_of_one: self.is_one_of_one,
        })
    }
}

/// `products.update` input: the id plus any subset of mutable fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductInput {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_one_of_one: Option<bool>,
}

impl UpdateProductInput {
    /// Validate the fields that are present, with the same rules as create.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered, in field order.
    pub fn validate(self) -> Result<ProductChanges, ValidationError> {
        Ok(ProductChanges {
            name: self
                .name
                .map(|v| required_text("name", "Name", &v))
                .transpose()?,
            description: self
                .description
                .map(|v| required_text_unbounded("description", "Description", &v))
                .transpose()?,
            category: self.category.as_deref().map(parse_category).transpose()?,
            price: self.price.map(parse_price).transpose()?,
            stock: self.stock.map(parse_stock).transpose()?,
            image_url: optional_text(self.image_url),
            is_one_of_one: self.is_one_of_one,
        })
    }
}

fn required_text_unbounded(
    field: &'static str,
    label: &str,
    value: &str,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, format!("{label} is required")));
    }
    Ok(trimmed.to_owned())
}

fn parse_category(value: &str) -> Result<ProductCategory, ValidationError> {
    value.parse().map_err(|_| {
        let allowed: Vec<&str> = ProductCategory::ALL.iter().map(ProductCategory::as_str).collect();
        ValidationError::new(
            "category",
            format!("Category must be one of: {}", allowed.join(", ")),
        )
    })
}

fn parse_price(amount: Decimal) -> Result<Price, ValidationError> {
    Price::new(amount).map_err(|e| match e {
        PriceError::NotPositive => ValidationError::new("price", "Price must be positive"),
        PriceError::BelowMinimum { min } => {
            ValidationError::new("price", format!("Price must be at least {min}"))
        }
        PriceError::TooLarge { max } => {
            ValidationError::new("price", format!("Price must be less than {max}"))
        }
    })
}

fn parse_stock(count: i64) -> Result<Stock, ValidationError> {
    Stock::new(count).map_err(|e| match e {
        StockError::Negative => ValidationError::new("stock", "Stock must be non-negative"),
        StockError::TooLarge { max } => {
            ValidationError::new("stock", format!("Stock must be at most {max}"))
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn owl_input() -> CreateProductInput {
        serde_json::from_value(serde_json::json!({
            "name": "Owl Diorama",
            "description": "Hand-painted",
            "category": "diorama",
            "price": 45.0,
            "stock": 3
        }))
        .unwrap()
    }

    #[test]
    fn test_create_defaults() {
        let product = owl_input().validate().unwrap();
        assert_eq!(product.name, "Owl Diorama");
        assert_eq!(product.category, ProductCategory::Diorama);
        assert_eq!(product.price.amount(), Decimal::new(45, 0));
        assert_eq!(product.stock.as_i32(), 3);
        assert_eq!(product.image_url, None);
        assert!(!product.is_one_of_one);
    }

    #[test]
    fn test_create_rejects_empty_name() {
        let input = CreateProductInput {
            name: " ".into(),
            ..owl_input()
        };
        assert_eq!(input.validate().unwrap_err().field, "name");
    }

    #[test]
    fn test_create_rejects_empty_description() {
        let input = CreateProductInput {
            description: String::new(),
            ..owl_input()
        };
        assert_eq!(input.validate().unwrap_err().field, "description");
    }

    #[test]
    fn test_create_rejects_unknown_category() {
        let input = CreateProductInput {
            category: "sculpture".into(),
            ..owl_input()
        };
        let err = input.validate().unwrap_err();
        assert_eq!(err.field, "category");
        assert!(err.message.contains("3d-model"));
    }

    #[test]
    fn test_create_rejects_non_positive_price() {
        for price in [Decimal::ZERO, Decimal::new(-5, 0)] {
            let input = CreateProductInput {
                price,
                ..owl_input()
            };
            let err = input.validate().unwrap_err();
            assert_eq!(err.field, "price");
            assert_eq!(err.message, "Price must be positive");
        }
    }

    #[test]
    fn test_create_rejects_sub_cent_price() {
        let input = CreateProductInput {
            price: Decimal::new(4, 3),
            ..owl_input()
        };
        let err = input.validate().unwrap_err();
        assert_eq!(err.field, "price");
        assert_eq!(err.message, "Price must be at least 0.01");
    }

    #[test]
    fn test_create_rejects_negative_stock() {
        let input = CreateProductInput {
            stock: -1,
            ..owl_input()
        };
        let err = input.validate().unwrap_err();
        assert_eq!(err.field, "stock");
        assert_eq!(err.message, "Stock must be non-negative");
    }

    #[test]
    fn test_fractional_stock_fails_to_decode() {
        let result = serde_json::from_value::<CreateProductInput>(serde_json::json!({
            "name": "Owl", "description": "d", "category": "diorama",
            "price": 1, "stock": 2.5
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_only_present_fields() {
        let input: UpdateProductInput = serde_json::from_value(serde_json::json!({
            "id": "5f1d7a4e-36a8-4c57-9a3b-6f3f3f3f3f3f",
            "stock": 0,
            "isOneOfOne": true
        }))
        .unwrap();
        let changes = input.validate().unwrap();
        assert_eq!(changes.stock, Some(Stock::ZERO));
        assert_eq!(changes.is_one_of_one, Some(true));
        assert_eq!(changes.name, None);
        assert_eq!(changes.price, None);
    }

    #[test]
    fn test_update_applies_create_rules() {
        let input: UpdateProductInput = serde_json::from_value(serde_json::json!({
            "id": "x",
            "price": -1
        }))
        .unwrap();
        assert_eq!(input.validate().unwrap_err().field, "price");

        let input: UpdateProductInput = serde_json::from_value(serde_json::json!({
            "id": "x",
            "name": ""
        }))
        .unwrap();
        assert_eq!(input.validate().unwrap_err().field, "name");
    }

    #[test]
    fn test_apply_changes() {
        let now = Utc::now();
        let new = owl_input().validate().unwrap();
        let mut product = Product {
            id: ProductId::generate(),
            name: new.name,
            description: new.description,
            category: new.category,
            price: new.price,
            stock: new.stock,
            image_url: None,
            is_one_of_one: false,
            created_at: now,
            updated_at: now,
        };

        let later = now + chrono::Duration::seconds(5);
        let changes = ProductChanges {
            category: Some(ProductCategory::Canvas),
            stock: Some(Stock::new(10).unwrap()),
            ..ProductChanges::default()
        };
        product.apply(&changes, later);

        assert_eq!(product.category, ProductCategory::Canvas);
        assert_eq!(product.stock.as_i32(), 10);
        assert_eq!(product.name, "Owl Diorama");
        assert_eq!(product.updated_at, later);
        assert_eq!(product.created_at, now);
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let now = Utc::now();
        let product = Product {
            id: ProductId::generate(),
            name: "Canvas".into(),
            description: "Acrylic".into(),
            category: ProductCategory::Canvas,
            price: Price::new(Decimal::new(12000, 2)).unwrap(),
            stock: Stock::ZERO,
            image_url: Some("https://cdn.example.com/c.jpg".into()),
            is_one_of_one: true,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["isOneOfOne"], true);
        assert_eq!(json["imageUrl"], "https://cdn.example.com/c.jpg");
        assert_eq!(json["category"], "canvas");
        assert_eq!(json["price"], "120.00");
        assert_eq!(json["stock"], 0);
    }
}
