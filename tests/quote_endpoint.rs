//! End-to-end tests for the quote endpoints against a mock upstream.

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

const QUOTE_PATH: &str = "/json/last/USD-BRL";

async fn mock_upstream(response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(QUOTE_PATH))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn nested_payload_serves_bid_and_persists() {
    let body = r#"{"USDBRL": {"code":"USD","codein":"BRL","name":"Dólar Americano/Real Brasileiro","high":"5.6","low":"5.4","varBid":"0.01","pctChange":"0.2","bid":"5.55","ask":"5.56","timestamp":"1736197196","create_date":"2025-01-06 17:59:56"}}"#;
    let upstream = mock_upstream(ResponseTemplate::new(200).set_body_string(body)).await;
    let app = common::spawn_app(&upstream.uri()).await;

    let res = reqwest::get(format!("{}/cotacao", app.base_url)).await.unwrap();
    assert_eq!(res.status(), 200);
    let payload: serde_json::Value = res.json().await.unwrap();
    assert_eq!(payload, serde_json::json!({"bid": "5.55"}));

    assert_eq!(common::wait_for_rows(&app).await, 1);

    let history: serde_json::Value = reqwest::get(format!("{}/get-data", app.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(history[0]["bid"], "5.55");
    assert_eq!(history[0]["code"], "USD");
    assert_eq!(history[0]["varBid"], "0.01");
}

#[tokio::test]
async fn bare_string_payload_serves_bid() {
    let upstream =
        mock_upstream(ResponseTemplate::new(200).set_body_string(r#"{"USDBRL": "5.50"}"#)).await;
    let app = common::spawn_app(&upstream.uri()).await;

    let payload: serde_json::Value = reqwest::get(format!("{}/cotacao", app.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(payload["bid"], "5.50");
}

#[tokio::test]
async fn unrecognizable_payload_serves_zero_bid() {
    let upstream = mock_upstream(ResponseTemplate::new(200).set_body_string("{}")).await;
    let app = common::spawn_app(&upstream.uri()).await;

    let res = reqwest::get(format!("{}/cotacao", app.base_url)).await.unwrap();
    assert_eq!(res.status(), 200);
    let payload: serde_json::Value = res.json().await.unwrap();
    assert_eq!(payload["bid"], "0");
}

#[tokio::test]
async fn malformed_payload_serves_zero_bid() {
    let upstream =
        mock_upstream(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>")).await;
    let app = common::spawn_app(&upstream.uri()).await;

    let res = reqwest::get(format!("{}/cotacao", app.base_url)).await.unwrap();
    assert_eq!(res.status(), 200);
    let payload: serde_json::Value = res.json().await.unwrap();
    assert_eq!(payload["bid"], "0");
}

#[tokio::test]
async fn upstream_error_body_still_serves_zero_bid() {
    let upstream =
        mock_upstream(ResponseTemplate::new(500).set_body_string(r#"{"error": "boom"}"#)).await;
    let app = common::spawn_app(&upstream.uri()).await;

    // A non-timeout upstream answer is normalized, not failed.
    let res = reqwest::get(format!("{}/cotacao", app.base_url)).await.unwrap();
    assert_eq!(res.status(), 200);
    let payload: serde_json::Value = res.json().await.unwrap();
    assert_eq!(payload["bid"], "0");
}

#[tokio::test]
async fn slow_upstream_is_a_500_with_no_row() {
    let upstream = mock_upstream(
        ResponseTemplate::new(200)
            .set_body_string(r#"{"USDBRL": "5.50"}"#)
            .set_delay(Duration::from_millis(500)),
    )
    .await;
    let app = common::spawn_app(&upstream.uri()).await;

    let res = reqwest::get(format!("{}/cotacao", app.base_url)).await.unwrap();
    assert_eq!(res.status(), 500);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(app.store.all_quotes().await.unwrap().is_empty());
}

#[tokio::test]
async fn unreachable_upstream_is_a_500() {
    // Nothing listens on this port; connection is refused immediately.
    let app = common::spawn_app("http://127.0.0.1:1").await;

    let res = reqwest::get(format!("{}/cotacao", app.base_url)).await.unwrap();
    assert_eq!(res.status(), 500);
}

#[tokio::test]
async fn post_is_rejected_before_any_upstream_call() {
    let upstream = MockServer::start().await;
    let app = common::spawn_app(&upstream.uri()).await;

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/cotacao", app.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 405);

    assert!(upstream.received_requests().await.unwrap().is_empty());
    assert!(app.store.all_quotes().await.unwrap().is_empty());
}

#[tokio::test]
async fn get_data_starts_empty_and_rejects_other_methods() {
    let upstream = MockServer::start().await;
    let app = common::spawn_app(&upstream.uri()).await;

    let history: serde_json::Value = reqwest::get(format!("{}/get-data", app.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(history, serde_json::json!([]));

    let client = reqwest::Client::new();
    let res = client
        .delete(format!("{}/get-data", app.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 405);
}
