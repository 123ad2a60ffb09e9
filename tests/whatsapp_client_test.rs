use axum::{extract::{Path, State}, http::{HeaderMap, StatusCode}, routing::post, Json, Router};
use serde_json::{json, Value};
use swagruha_backend::config::WhatsAppConfig;
use swagruha_backend::util::whatsapp::{WhatsAppCloudClient, WhatsAppError, WhatsAppSender};
use std::sync::{Arc, Mutex};

/// Initialize tracing for tests
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .try_init();
}

#[derive(Debug, Clone)]
struct Captured {
    phone_number_id: String,
    authorization: Option<String>,
    body: Value,
}

/// Fake Cloud API. Answers with the queued statuses in order, then 200.
#[derive(Default)]
struct StubProvider {
    requests: Mutex<Vec<Captured>>,
    statuses: Mutex<Vec<u16>>,
}

async fn stub_messages(
    State(stub): State<Arc<StubProvider>>,
    Path((_version, phone_number_id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    stub.requests.lock().unwrap().push(Captured {
        phone_number_id,
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string()),
        body,
    });
    let next = {
        let mut statuses = stub.statuses.lock().unwrap();
        if statuses.is_empty() { 200 } else { statuses.remove(0) }
    };
    if next == 200 {
        (StatusCode::OK, Json(json!({
            "messaging_product": "whatsapp",
            "contacts": [{ "input": "919900000000", "wa_id": "919900000000" }],
            "messages": [{ "id": "wamid.HBgM" }]
        })))
    } else {
        let status = StatusCode::from_u16(next).unwrap();
        (status, Json(json!({ "error": { "message": "stub failure", "code": next } })))
    }
}

async fn start_stub(statuses: Vec<u16>) -> (String, Arc<StubProvider>) {
    let stub = Arc::new(StubProvider { statuses: Mutex::new(statuses), ..Default::default() });
    let app = Router::new()
        .route("/{version}/{phone_number_id}/messages", post(stub_messages))
        .with_state(stub.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), stub)
}

fn client_for(base_url: &str, max_retries: u32) -> WhatsAppCloudClient {
    let mut config = WhatsAppConfig::from_test_env();
    config.api_base_url = base_url.to_string();
    config.max_retries = max_retries;
    WhatsAppCloudClient::new(config).expect("client")
}

#[tokio::test]
async fn test_send_text_posts_cloud_api_payload() {
    init_tracing();
    let (base_url, stub) = start_stub(vec![]).await;
    let client = client_for(&base_url, 0);

    let message_id = client.send_text("919900000000", "hello owner").await.unwrap();
    assert_eq!(message_id.as_deref(), Some("wamid.HBgM"));

    let requests = stub.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let captured = &requests[0];
    assert_eq!(captured.phone_number_id, "1234567890");
    assert_eq!(captured.authorization.as_deref(), Some("Bearer test-token"));
    assert_eq!(
        captured.body,
        json!({
            "messaging_product": "whatsapp",
            "to": "919900000000",
            "type": "text",
            "text": { "body": "hello owner" }
        })
    );
}

#[tokio::test]
async fn test_send_text_surfaces_api_error() {
    init_tracing();
    let (base_url, stub) = start_stub(vec![401]).await;
    let client = client_for(&base_url, 3);

    let err = client.send_text("919900000000", "hello").await.unwrap_err();
    match err {
        WhatsAppError::Api { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("stub failure"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    // 401 is not retried even with retries enabled
    assert_eq!(stub.requests.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_no_retry_by_default() {
    let (base_url, stub) = start_stub(vec![503]).await;
    let client = client_for(&base_url, 0);

    assert!(client.send_text("919900000000", "hello").await.is_err());
    assert_eq!(stub.requests.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_retries_provider_faults_when_enabled() {
    let (base_url, stub) = start_stub(vec![503, 429]).await;
    let client = client_for(&base_url, 2);

    let message_id = client.send_text("919900000000", "hello").await.unwrap();
    assert_eq!(message_id.as_deref(), Some("wamid.HBgM"));
    assert_eq!(stub.requests.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_unreachable_provider_is_http_error() {
    // Bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{}", addr), 0);
    let err = client.send_text("919900000000", "hello").await.unwrap_err();
    assert!(matches!(err, WhatsAppError::Http(_)));
}
