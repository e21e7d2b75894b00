//! Seed workshops and portfolio items from YAML.
//!
//! The API exposes these records read-only, so this command is how they get
//! created and edited. Every record is upserted by id; an entry without an
//! `id` gets a fresh one, and the generated id is logged so it can be pasted
//! back into the file.
//!
//! ```yaml
//! - id: 3f0c2c1e-8a7d-4c55-9a8e-0f5b7c3d2e11   # optional
//!   title: Intro to Dioramas
//!   date: 2026-11-14
//!   time: "6:30 PM"
//!   capacity: 12
//!   price: "65.00"
//! ```

use std::path::Path;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use scalebreakers_api::db::{self, PgStore, RepositoryError};
use scalebreakers_api::models::{MAX_NAME_LENGTH, PortfolioItem, Workshop};
use scalebreakers_core::{PortfolioItemId, WorkshopId};

use super::{CommandError, database_url};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Entry {index}: {message}")]
    Invalid { index: usize, message: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WorkshopSeed {
    id: Option<WorkshopId>,
    title: String,
    description: Option<String>,
    date: Option<NaiveDate>,
    time: Option<String>,
    location: Option<String>,
    capacity: Option<i32>,
    price: Option<Decimal>,
    image_url: Option<String>,
    qr_code: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PortfolioSeed {
    id: Option<PortfolioItemId>,
    title: String,
    description: Option<String>,
    category: String,
    image_url: Option<String>,
    #[serde(default)]
    display_order: i32,
}

fn invalid(index: usize, message: impl Into<String>) -> SeedError {
    SeedError::Invalid {
        index,
        message: message.into(),
    }
}

fn check_title(index: usize, title: &str) -> Result<String, SeedError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(invalid(index, "title is required"));
    }
    if title.chars().count() > MAX_NAME_LENGTH {
        return Err(invalid(
            index,
            format!("title must be at most {MAX_NAME_LENGTH} characters"),
        ));
    }
    Ok(title.to_owned())
}

/// Parse and validate a workshops file.
fn parse_workshops(yaml: &str) -> Result<Vec<Workshop>, SeedError> {
    let seeds: Vec<WorkshopSeed> = serde_yaml::from_str(yaml)?;
    let now = Utc::now();

    seeds
        .into_iter()
        .enumerate()
        .map(|(index, seed)| {
            let title = check_title(index, &seed.title)?;
            if seed.capacity.is_some_and(|c| c < 0) {
                return Err(invalid(index, "capacity must be non-negative"));
            }
            if seed.price.is_some_and(|p| p.is_sign_negative()) {
                return Err(invalid(index, "price must be non-negative"));
            }

            Ok(Workshop {
                id: seed.id.unwrap_or_else(WorkshopId::generate),
                title,
                description: seed.description,
                date: seed.date,
                time: seed.time,
                location: seed.location,
                capacity: seed.capacity,
                price: seed.price,
                image_url: seed.image_url,
                qr_code: seed.qr_code,
                created_at: now,
                updated_at: now,
            })
        })
        .collect()
}

/// Parse and validate a portfolio file.
fn parse_portfolio(yaml: &str) -> Result<Vec<PortfolioItem>, SeedError> {
    let seeds: Vec<PortfolioSeed> = serde_yaml::from_str(yaml)?;
    let now = Utc::now();

    seeds
        .into_iter()
        .enumerate()
        .map(|(index, seed)| {
            let title = check_title(index, &seed.title)?;
            let category = seed.category.trim().to_owned();
            if category.is_empty() {
                return Err(invalid(index, "category is required"));
            }

            Ok(PortfolioItem {
                id: seed.id.unwrap_or_else(PortfolioItemId::generate),
                title,
                description: seed.description,
                category,
                image_url: seed.image_url,
                display_order: seed.display_order,
                created_at: now,
            })
        })
        .collect()
}

async fn read_file(file_path: &str) -> Result<String, SeedError> {
    info!(path = %file_path, "Loading seed file");
    tokio::fs::read_to_string(Path::new(file_path))
        .await
        .map_err(|source| SeedError::Read {
            path: file_path.to_owned(),
            source,
        })
}

async fn connect() -> Result<PgStore, SeedError> {
    let pool = db::create_pool(&database_url()?).await?;
    info!("Connected to database");
    Ok(PgStore::new(pool))
}

/// Upsert workshops from a YAML file.
///
/// # Errors
///
/// Returns an error if the file is invalid or a database write fails. The
/// whole file is validated before anything is written.
pub async fn workshops(file_path: &str) -> Result<(), SeedError> {
    let workshops = parse_workshops(&read_file(file_path).await?)?;
    info!(count = workshops.len(), "Parsed workshops");

    let store = connect().await?;
    for workshop in &workshops {
        let saved = store.upsert_workshop(workshop).await?;
        info!(id = %saved.id, title = %saved.title, "Workshop upserted");
    }

    info!("Seeding complete!");
    Ok(())
}

/// Upsert portfolio items from a YAML file.
///
/// # Errors
///
/// Returns an error if the file is invalid or a database write fails.
pub async fn portfolio(file_path: &str) -> Result<(), SeedError> {
    let items = parse_portfolio(&read_file(file_path).await?)?;
    info!(count = items.len(), "Parsed portfolio items");

    let store = connect().await?;
    for item in &items {
        let saved = store.upsert_portfolio_item(item).await?;
        info!(id = %saved.id, title = %saved.title, "Portfolio item upserted");
    }

    info!("Seeding complete!");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_workshops_keeps_or_generates_ids() {
        let yaml = r#"
- id: 3f0c2c1e-8a7d-4c55-9a8e-0f5b7c3d2e11
  title: Intro to Dioramas
  date: 2026-11-14
  time: "6:30 PM"
  capacity: 12
  price: "65.00"
- title: "  Open Studio  "
"#;
        let workshops = parse_workshops(yaml).unwrap();
        assert_eq!(workshops.len(), 2);
        assert_eq!(
            workshops[0].id.to_string(),
            "3f0c2c1e-8a7d-4c55-9a8e-0f5b7c3d2e11"
        );
        assert_eq!(workshops[0].date, NaiveDate::from_ymd_opt(2026, 11, 14));
        assert_eq!(workshops[0].price, Some(Decimal::new(6500, 2)));
        assert_eq!(workshops[1].title, "Open Studio");
        assert_ne!(workshops[0].id, workshops[1].id);
    }

    #[test]
    fn test_parse_workshops_rejects_negative_capacity() {
        let err = parse_workshops("- title: Paint Night\n  capacity: -1\n").unwrap_err();
        assert!(matches!(err, SeedError::Invalid { index: 0, .. }));
    }

    #[test]
    fn test_parse_workshops_rejects_unknown_fields() {
        assert!(matches!(
            parse_workshops("- title: Paint Night\n  seats: 4\n"),
            Err(SeedError::Yaml(_))
        ));
    }

    #[test]
    fn test_parse_portfolio() {
        let yaml = "
- title: Harbour Wall
  category: murals
  display_order: 2
- title: Owl
  category: dioramas
";
        let items = parse_portfolio(yaml).unwrap();
        assert_eq!(items[0].display_order, 2);
        assert_eq!(items[1].display_order, 0);
        assert_eq!(items[1].category, "dioramas");
    }

    #[test]
    fn test_parse_portfolio_requires_category() {
        let err = parse_portfolio("- title: Owl\n  category: ' '\n").unwrap_err();
        assert!(matches!(err, SeedError::Invalid { index: 0, ref message } if message == "category is required"));
    }
}
