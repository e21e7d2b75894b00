//! `workshops.*` end to end.

use chrono::{NaiveDate, Utc};
use reqwest::StatusCode;
use rust_decimal::Decimal;

use scalebreakers_api::models::Workshop;
use scalebreakers_core::WorkshopId;
use scalebreakers_integration_tests::TestApp;

fn workshop(title: &str, date: Option<NaiveDate>) -> Workshop {
    let now = Utc::now();
    Workshop {
        id: WorkshopId::generate(),
        title: title.to_owned(),
        description: Some("Materials included".to_owned()),
        date,
        time: Some("6:30 PM".to_owned()),
        location: Some("Scalebreakers Studio".to_owned()),
        capacity: Some(12),
        price: Some(Decimal::new(6500, 2)),
        image_url: None,
        qr_code: Some("https://cdn.scalebreakers.test/qr/intro.png".to_owned()),
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn get_by_id_returns_exact_record() {
    let app = TestApp::spawn().await;
    let stored = workshop("Intro to Dioramas", NaiveDate::from_ymd_opt(2026, 11, 14));
    app.store.insert_workshop(stored.clone()).await;

    let (status, body) = app
        .anonymous()
        .query(&format!("workshops.getById?id={}", stored.id))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["qrCode"], "https://cdn.scalebreakers.test/qr/intro.png");

    let fetched: Workshop = serde_json::from_value(body).expect("workshop decodes");
    assert_eq!(fetched, stored);
}

#[tokio::test]
async fn get_by_id_unknown_is_not_found() {
    let app = TestApp::spawn().await;
    app.store.insert_workshop(workshop("Mural Basics", None)).await;

    let (status, body) = app
        .anonymous()
        .query(&format!("workshops.getById?id={}", WorkshopId::generate()))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["error"]["message"], "Workshop not found");
}

#[tokio::test]
async fn list_orders_by_date() {
    let app = TestApp::spawn().await;
    app.store.insert_workshop(workshop("Open Studio", None)).await;
    app.store
        .insert_workshop(workshop("Mural Basics", NaiveDate::from_ymd_opt(2026, 12, 5)))
        .await;
    app.store
        .insert_workshop(workshop("Intro to Dioramas", NaiveDate::from_ymd_opt(2026, 11, 14)))
        .await;

    let (status, body) = app.anonymous().query("workshops.list").await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .expect("list is an array")
        .iter()
        .map(|w| w["title"].as_str().expect("title is a string"))
        .collect();
    assert_eq!(titles, ["Intro to Dioramas", "Mural Basics", "Open Studio"]);
}
