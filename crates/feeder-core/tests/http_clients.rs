use axum::body::Body;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use feeder_core::engine::{FeedFetcher, StopReason};
use feeder_core::providers::images::{EveImageClient, FALLBACK_CONTENT_TYPE};
use feeder_core::providers::zkill::ZkillClient;
use feeder_core::providers::{FeedSource, PortraitSource};
use std::sync::Arc;

const PORTRAIT_BYTES: &[u8] = &[0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10];

/// Serves `router` on an ephemeral local port and returns its base URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind local listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("local server");
    });
    format!("http://{addr}")
}

async fn portrait(Path(id): Path<i64>) -> Response {
    match id {
        // bare body, no content-type header at all
        1 => Response::new(Body::from(PORTRAIT_BYTES)),
        2 => ([("content-type", "image/png")], PORTRAIT_BYTES).into_response(),
        3 => StatusCode::OK.into_response(),
        _ => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}

fn image_client(base: String) -> EveImageClient {
    EveImageClient::new(base, 64, reqwest::Client::new())
}

async fn image_server() -> String {
    serve(Router::new().route("/characters/{id}/portrait", get(portrait))).await
}

#[tokio::test]
async fn portrait_without_content_type_defaults_to_jpeg() {
    let client = image_client(image_server().await);

    let p = client.fetch_portrait(1).await.expect("portrait");
    assert_eq!(p.content_type, FALLBACK_CONTENT_TYPE);
    assert_eq!(p.bytes, PORTRAIT_BYTES);
}

#[tokio::test]
async fn portrait_keeps_upstream_content_type() {
    let client = image_client(image_server().await);

    let p = client.fetch_portrait(2).await.expect("portrait");
    assert_eq!(p.content_type, "image/png");
}

#[tokio::test]
async fn portrait_empty_body_is_a_failure() {
    let client = image_client(image_server().await);

    let err = client.fetch_portrait(3).await.unwrap_err();
    assert!(err.to_string().contains("empty body"), "{err}");
}

#[tokio::test]
async fn portrait_server_error_is_a_failure() {
    let client = image_client(image_server().await);

    let err = client.fetch_portrait(4).await.unwrap_err();
    assert!(err.to_string().contains("503"), "{err}");
}

fn killmails(ids: std::ops::Range<i64>) -> serde_json::Value {
    serde_json::Value::Array(
        ids.map(|id| serde_json::json!({"killmail_id": id, "zkb": {"totalValue": 1000.5}}))
            .collect(),
    )
}

/// Character 1: two full pages of two, then an error object instead of a list.
/// Character 2: always 503. Character 3: one short page.
async fn feed_page(Path((id, page)): Path<(i64, u32)>) -> Response {
    match (id, page) {
        (1, 1) => Json(killmails(0..2)).into_response(),
        (1, 2) => Json(killmails(2..4)).into_response(),
        (1, _) => Json(serde_json::json!({"error": "rate limited"})).into_response(),
        (3, _) => Json(killmails(0..1)).into_response(),
        _ => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}

async fn feed_server() -> String {
    serve(Router::new().route(
        "/characterID/{id}/abyssal/page/{page}/",
        get(feed_page),
    ))
    .await
}

#[tokio::test]
async fn feed_page_parses_record_array() {
    let client = ZkillClient::new(feed_server().await, reqwest::Client::new());

    let records = client.fetch_page(3, 1).await.expect("page");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].total_value(), 1000.5);
}

#[tokio::test]
async fn feed_page_non_array_body_is_a_failure() {
    let client = ZkillClient::new(feed_server().await, reqwest::Client::new());

    assert!(client.fetch_page(1, 3).await.is_err());
}

#[tokio::test]
async fn feed_page_server_error_is_a_failure() {
    let client = ZkillClient::new(feed_server().await, reqwest::Client::new());

    let err = client.fetch_page(2, 1).await.unwrap_err();
    assert!(err.to_string().contains("503"), "{err}");
}

#[tokio::test]
async fn undecodable_page_stops_pagination_and_keeps_earlier_records() {
    let source = Arc::new(ZkillClient::new(feed_server().await, reqwest::Client::new()));
    let fetcher = FeedFetcher {
        source,
        page_size: 2,
        max_pages: None,
    };

    let out = fetcher.fetch(1).await;
    assert_eq!(out.stop, StopReason::TransportError);
    assert_eq!(out.records.len(), 4);
    assert_eq!(out.pages_requested, 3);
}
