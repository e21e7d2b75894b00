//! `portfolio` procedures. Read-only.

use axum::{Json, extract::State};
use tracing::instrument;

use super::extract::{ApiQuery, CategoryParams};
use crate::error::{ApiError, Result};
use crate::models::PortfolioItem;
use crate::state::AppState;

/// `portfolio.list`, optionally filtered by gallery category.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<CategoryParams>,
) -> Result<Json<Vec<PortfolioItem>>> {
    let items = state
        .store()
        .list_portfolio(params.category())
        .await
        .map_err(|e| ApiError::internal("Failed to load portfolio", e))?;
    Ok(Json(items))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use chrono::Utc;
    use scalebreakers_core::PortfolioItemId;

    use super::*;
    use crate::db::MemoryStore;
    use crate::routes::test_support::{app, get};

    fn item(title: &str, category: &str, display_order: i32) -> PortfolioItem {
        PortfolioItem {
            id: PortfolioItemId::generate(),
            title: title.into(),
            description: None,
            category: category.into(),
            image_url: None,
            display_order,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_list_filters_and_orders() {
        let store = Arc::new(MemoryStore::new());
        store.insert_portfolio_item(item("Harbour wall", "murals", 2)).await;
        store.insert_portfolio_item(item("Owl", "dioramas", 0)).await;
        store.insert_portfolio_item(item("Laneway", "murals", 1)).await;
        let app = app(store);

        let (status, body) = get(&app, "/api/portfolio.list", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 3);
        assert_eq!(body[0]["title"], "Owl");

        let (_, body) = get(&app, "/api/portfolio.list?category=murals", None).await;
        let titles: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, ["Laneway", "Harbour wall"]);
    }
}
