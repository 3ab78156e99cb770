//! Integration tests: the relay endpoint driven through the router against a
//! recording transport double. No network access needed.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use callpush::error::BODY_MISSING_PARAMETERS;
use callpush::models::{DeliveryPayload, Priority, TransportReceipt};
use callpush::{create_app, AppState, DeliveryError, PushTransport};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt;

const RECEIPT: &str = "projects/demo-project/messages/0:1700000000000000%abc123";

/// Records every payload it is asked to send and answers with a fixed result.
struct RecordingTransport {
    sent: Mutex<Vec<DeliveryPayload>>,
    answer: Result<TransportReceipt, DeliveryError>,
}

impl RecordingTransport {
    fn succeeding() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            answer: Ok(TransportReceipt(RECEIPT.to_string())),
        })
    }

    fn failing(err: DeliveryError) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            answer: Err(err),
        })
    }

    fn sent(&self) -> Vec<DeliveryPayload> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl PushTransport for RecordingTransport {
    async fn send(&self, payload: &DeliveryPayload) -> Result<TransportReceipt, DeliveryError> {
        self.sent.lock().unwrap().push(payload.clone());
        self.answer.clone()
    }
}

async fn call(
    transport: Arc<RecordingTransport>,
    method: &str,
    body: &str,
) -> (StatusCode, String) {
    let app = create_app(AppState::new(transport));
    let req = Request::builder()
        .method(method)
        .uri("/sendCallNotification")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn data(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
async fn well_formed_request_is_relayed_as_data_only_high_priority_push() {
    let transport = RecordingTransport::succeeding();
    let (status, body) = call(
        transport.clone(),
        "POST",
        r#"{"fcmToken":"tok1","callerId":"alice","channelId":"chan-7"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Call notification sent");
    assert!(!body.contains(RECEIPT));

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].target(), "tok1");
    assert_eq!(sent[0].priority(), Priority::High);
    assert_eq!(
        sent[0].data(),
        &data(&[
            ("callerId", "alice"),
            ("channelId", "chan-7"),
            ("callSessionId", "unknown_callkit_id"),
        ])
    );
}

#[tokio::test]
async fn callkit_id_is_forwarded_as_call_session_id() {
    let transport = RecordingTransport::succeeding();
    let (status, _) = call(
        transport.clone(),
        "POST",
        r#"{"fcmToken":"tok1","callerId":"alice","channelId":"chan-7","callkitId":"5F1C-77"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let sent = transport.sent();
    assert_eq!(
        sent[0].data().get("callSessionId").map(String::as_str),
        Some("5F1C-77")
    );
}

#[tokio::test]
async fn missing_channel_is_rejected_without_calling_transport() {
    let transport = RecordingTransport::succeeding();
    let (status, body) = call(
        transport.clone(),
        "POST",
        r#"{"fcmToken":"tok1","callerId":"alice"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, BODY_MISSING_PARAMETERS);
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn any_combination_of_missing_or_empty_fields_is_rejected() {
    let fields = ["fcmToken", "callerId", "channelId"];
    for mask in 1u8..8 {
        for blank in [None, Some(""), Some("null")] {
            let mut obj = serde_json::Map::new();
            for (i, name) in fields.iter().enumerate() {
                let dropped = mask & (1 << i) != 0;
                let value = match (dropped, blank) {
                    (false, _) => serde_json::Value::from("v"),
                    (true, None) => continue,
                    (true, Some("null")) => serde_json::Value::Null,
                    (true, Some(s)) => serde_json::Value::from(s),
                };
                obj.insert(name.to_string(), value);
            }
            let body = serde_json::Value::Object(obj).to_string();

            let transport = RecordingTransport::succeeding();
            let (status, _) = call(transport.clone(), "POST", &body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
            assert!(transport.sent().is_empty(), "body: {}", body);
        }
    }
}

#[tokio::test]
async fn malformed_body_is_rejected_without_calling_transport() {
    for body in ["", "{", "[]", r#"{"fcmToken":1,"callerId":"a","channelId":"c"}"#] {
        let transport = RecordingTransport::succeeding();
        let (status, _) = call(transport.clone(), "POST", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {:?}", body);
        assert!(transport.sent().is_empty());
    }
}

#[tokio::test]
async fn oversized_body_gets_405_or_400_never_413() {
    let padding = "x".repeat(3 * 1024 * 1024);
    let body = serde_json::json!({
        "fcmToken": "tok1",
        "callerId": "alice",
        "channelId": "chan-7",
        "padding": padding,
    })
    .to_string();

    let transport = RecordingTransport::succeeding();
    let (status, text) = call(transport.clone(), "GET", &body).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(text, "Method Not Allowed");

    let (status, text) = call(transport.clone(), "POST", &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(text, BODY_MISSING_PARAMETERS);
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn non_post_methods_get_405_regardless_of_body() {
    let valid = r#"{"fcmToken":"tok1","callerId":"alice","channelId":"chan-7"}"#;
    for method in ["GET", "PUT", "DELETE", "PATCH"] {
        for body in ["", valid] {
            let transport = RecordingTransport::succeeding();
            let (status, text) = call(transport.clone(), method, body).await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{}", method);
            assert_eq!(text, "Method Not Allowed");
            assert!(!text.contains("tok1"));
            assert!(transport.sent().is_empty());
        }
    }
}

#[tokio::test]
async fn transport_failure_is_500_with_detail_verbatim() {
    let transport = RecordingTransport::failing(DeliveryError::rejected("INVALID_ARGUMENT"));
    let (status, body) = call(
        transport.clone(),
        "POST",
        r#"{"fcmToken":"tok1","callerId":"alice","channelId":"chan-7"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("INVALID_ARGUMENT"), "body: {}", body);
    assert_eq!(transport.sent().len(), 1);
}

#[tokio::test]
async fn unreachable_transport_is_500() {
    let transport =
        RecordingTransport::failing(DeliveryError::unreachable("error sending request: connection refused"));
    let (status, body) = call(
        transport,
        "POST",
        r#"{"fcmToken":"tok1","callerId":"alice","channelId":"chan-7"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("error sending request: connection refused"));
}

#[tokio::test]
async fn one_failed_request_does_not_affect_the_next() {
    let failing = RecordingTransport::failing(DeliveryError::rejected("QUOTA_EXCEEDED"));
    let app = create_app(AppState::new(failing));
    let body = r#"{"fcmToken":"tok1","callerId":"alice","channelId":"chan-7"}"#;

    for _ in 0..2 {
        let req = Request::builder()
            .method("POST")
            .uri("/sendCallNotification")
            .body(Body::from(body))
            .unwrap();
        let res = app.clone().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    let ok = RecordingTransport::succeeding();
    let (status, _) = call(ok, "POST", body).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn health_returns_ok() {
    let app = create_app(AppState::new(RecordingTransport::succeeding()));
    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json.get("status").and_then(|v| v.as_str()), Some("ok"));
}
