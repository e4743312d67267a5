//! Store-trigger adapter against an in-process trigger stub

mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use ingestion_clients::StoreTriggerClient;
use ingestion_core::models::{OperationStatus, WorkOrder};
use ingestion_core::ports::StoreTrigger;
use ingestion_core::IngestError;
use serde_json::{json, Value};
use uuid::Uuid;

#[derive(Clone, Default)]
struct Recorded {
    orders: Arc<Mutex<Vec<Value>>>,
    deletes: Arc<Mutex<Vec<Value>>>,
}

fn trigger_stub(recorded: Recorded, accept: bool) -> Router {
    Router::new()
        .route(
            "/ingestion",
            post(move |State(rec): State<Recorded>, Json(body): Json<Value>| async move {
                rec.orders.lock().unwrap().push(body);
                if accept {
                    Ok((
                        StatusCode::CREATED,
                        Json(json!({ "jobID": "job-42", "status": "In-Progress" })),
                    ))
                } else {
                    Err(StatusCode::SERVICE_UNAVAILABLE)
                }
            }),
        )
        .route(
            "/delete",
            post(|State(rec): State<Recorded>, Json(body): Json<Value>| async move {
                rec.deletes.lock().unwrap().push(body);
                StatusCode::ACCEPTED
            }),
        )
        .with_state(recorded)
}

fn work_order() -> WorkOrder {
    serde_json::from_value(json!({
        "modelId": Uuid::new_v4(),
        "pathToTileset": "/data/model",
        "tilesetFilename": "tileset.json",
        "metadata": {
            "productName": "Tel Aviv",
            "productSource": "/pv_in/data/model",
            "footprint": {
                "type": "Polygon",
                "coordinates": [[[34.0, 32.0], [35.0, 32.0], [35.0, 33.0], [34.0, 32.0]]]
            }
        }
    }))
    .unwrap()
}

#[tokio::test]
async fn test_submit_returns_job_handle() {
    let recorded = Recorded::default();
    let url = common::serve(trigger_stub(recorded.clone(), true)).await;
    let trigger = StoreTriggerClient::new(url, Duration::from_secs(1)).unwrap();

    let order = work_order();
    let handle = trigger.submit(&order).await.unwrap();

    assert_eq!(handle.job_id, "job-42");
    assert_eq!(handle.status, OperationStatus::InProgress);

    let orders = recorded.orders.lock().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["modelId"], json!(order.model_id.to_string()));
    assert_eq!(orders[0]["pathToTileset"], "/data/model");
    assert_eq!(orders[0]["metadata"]["productSource"], "/pv_in/data/model");
}

#[tokio::test]
async fn test_submit_error_status_is_trigger_error() {
    let recorded = Recorded::default();
    let url = common::serve(trigger_stub(recorded.clone(), false)).await;
    let trigger = StoreTriggerClient::new(url, Duration::from_secs(1)).unwrap();

    let err = trigger.submit(&work_order()).await.unwrap_err();
    assert!(matches!(err, IngestError::TriggerUnavailable { .. }));
    assert!(err.cause().unwrap().contains("503"));
    // Single shot, no retry
    assert_eq!(recorded.orders.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_submit_unreachable_is_trigger_error() {
    let trigger =
        StoreTriggerClient::new(common::unreachable_url().await, Duration::from_secs(1)).unwrap();

    let err = trigger.submit(&work_order()).await.unwrap_err();
    assert_eq!(err.to_string(), "store-trigger service is not available");
}

#[tokio::test]
async fn test_request_delete_posts_model_link() {
    let recorded = Recorded::default();
    let url = common::serve(trigger_stub(recorded.clone(), true)).await;
    let trigger = StoreTriggerClient::new(url, Duration::from_secs(1)).unwrap();

    let model_id = Uuid::new_v4();
    trigger.request_delete(model_id, "/store/data/model/tileset.json").await;

    let deletes = recorded.deletes.lock().unwrap();
    assert_eq!(deletes.len(), 1);
    assert_eq!(deletes[0]["modelId"], json!(model_id.to_string()));
    assert_eq!(deletes[0]["modelLink"], "/store/data/model/tileset.json");
}

#[tokio::test]
async fn test_request_delete_swallows_failures() {
    let trigger =
        StoreTriggerClient::new(common::unreachable_url().await, Duration::from_secs(1)).unwrap();

    // Completes without panicking or returning an error
    trigger.request_delete(Uuid::new_v4(), "/store/x").await;
}
