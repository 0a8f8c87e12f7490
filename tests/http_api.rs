//! Integration tests for the HTTP surface

use arc_swap::ArcSwap;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use car_cost_advisor::{
    advisory::{AdvisorClient, AnalysisPayload},
    calculator::{calculate, CalcInput},
    config::Config,
    handlers::AppState,
    server::create_router,
    snapshots::SnapshotStore,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn app_with_config(config: Config) -> Router {
    let state = AppState {
        config: Arc::new(ArcSwap::from_pointee(config)),
        advisor: AdvisorClient::default(),
        snapshots: Arc::new(SnapshotStore::in_memory()),
    };
    let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
    create_router(state, Some(Arc::new(recorder.handle())))
}

fn app() -> Router {
    app_with_config(Config::default())
}

fn advisor_config(base_url: String) -> Config {
    let mut config = Config::default();
    config.advisor.base_url = base_url;
    config.advisor.api_key = "sk-test-key".to_string();
    config
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn chat_reply(content: &str, reasoning: Option<&str>) -> Value {
    json!({
        "id": "chatcmpl-1",
        "model": "glm-4.6",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content, "reasoning_content": reasoning},
            "finish_reason": "stop"
        }]
    })
}

#[tokio::test]
async fn test_health_and_metrics() {
    let app = app();

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, get("/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["advisor"], false);

    let (status, _) = send(&app, get("/metrics")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_profiles_routes() {
    let app = app();

    let (status, body) = send(&app, get("/api/profiles")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 6);

    let (status, body) = send(&app, get("/api/profiles/G20_330E")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["key"], "G20_330E");

    let (status, body) = send(&app, get("/api/profiles/E46_330I")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["type"], "unknown_profile");
}

#[tokio::test]
async fn test_calculate_default_input() {
    let app = app();
    let input = serde_json::to_value(CalcInput::default()).unwrap();

    let (status, body) = send(&app, post_json("/api/calculate", &input)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["loan"]["principal"], 960000.0);
    let payment = body["loan"]["paymentPerMonth"].as_f64().unwrap();
    assert!((payment - 19200.0).abs() < 1e-6);
    let fuel = body["fuel"]["costPerMonth"].as_f64().unwrap();
    assert!((fuel - 2640.0).abs() < 1e-6);
    assert!(body["affordability"]["level"].is_string());
}

#[tokio::test]
async fn test_calculate_rejects_unknown_model() {
    let app = app();
    let mut input = serde_json::to_value(CalcInput::default()).unwrap();
    input["maintenance"]["profileKey"] = json!("E46_330I");

    let (status, body) = send(&app, post_json("/api/calculate", &input)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "invalid_request");
}

#[tokio::test]
async fn test_snapshot_lifecycle() {
    let app = app();
    let input = serde_json::to_value(CalcInput::default()).unwrap();

    let (status, saved) = send(&app, post_json("/api/snapshots", &json!({"input": input}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(saved["name"], "Save 1");
    let id = saved["id"].as_str().unwrap().to_string();

    let (status, list) = send(&app, get("/api/snapshots")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, fetched) = send(&app, get(&format!("/api/snapshots/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["input"], input);

    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/api/snapshots/{}", id))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, delete).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, get(&format!("/api/snapshots/{}", id))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["type"], "snapshot_not_found");
}

#[tokio::test]
async fn test_analyze_without_key_is_unavailable() {
    let app = app();
    let input = CalcInput::default();
    let payload = serde_json::to_value(AnalysisPayload::new(&input, &calculate(&input))).unwrap();

    let (status, body) = send(&app, post_json("/api/ai/analyze", &payload)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["type"], "advisory_unavailable");
}

#[tokio::test]
async fn test_analyze_parses_fenced_reply() {
    let server = MockServer::start().await;
    let content = "Here you go:\n```json\n{\"verdict\": \"reconsider\", \"confidence\": 65, \"summary\": \"Tight budget\", \"risks\": [\"EGR / DPF\"]}\n```";
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer sk-test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(content, None)))
        .mount(&server)
        .await;

    let app = app_with_config(advisor_config(server.uri()));
    let input = CalcInput::default();
    let payload = serde_json::to_value(AnalysisPayload::new(&input, &calculate(&input))).unwrap();

    let (status, body) = send(&app, post_json("/api/ai/analyze", &payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["analysisResult"]["verdict"], "reconsider");
    assert_eq!(body["analysisResult"]["confidence"], 65);
    assert_eq!(body["analysisResult"]["detailedAnalysis"], "");
    assert_eq!(body["model"], "glm-4.6");
    assert!(body.get("note").is_none());
}

#[tokio::test]
async fn test_analyze_reasoning_fallback_note() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_reply("", Some("The total is about a third of income."))),
        )
        .mount(&server)
        .await;

    let app = app_with_config(advisor_config(server.uri()));
    let input = CalcInput::default();
    let payload = serde_json::to_value(AnalysisPayload::new(&input, &calculate(&input))).unwrap();

    let (status, body) = send(&app, post_json("/api/ai/analyze", &payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["note"], "Parsed from reasoning");
    assert_eq!(body["analysisResult"]["confidence"], 50);
}

#[tokio::test]
async fn test_upstream_error_is_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let app = app_with_config(advisor_config(server.uri()));
    let payload = json!({
        "modelKey": "F30_320D",
        "year": 2016,
        "mileageKm": 120000,
        "kmPerMonth": 1200,
        "monthlyIncome": 40000,
        "carPrice": 1200000
    });

    let (status, body) = send(&app, post_json("/api/ai/prefill", &payload)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["type"], "upstream_error");
    assert!(body["error"]["message"].as_str().unwrap().contains("upstream exploded"));
}

#[tokio::test]
async fn test_prefill_scrapes_reasoning() {
    let server = MockServer::start().await;
    let reasoning = "A 10 year old diesel should do about 14.5 km/L. \
        insurancePerYear: 21,000. Depreciation around 9%. parkingTollPerMonth: 1,500";
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply("", Some(reasoning))))
        .mount(&server)
        .await;

    let app = app_with_config(advisor_config(server.uri()));
    let payload = json!({
        "modelKey": "F30_320D",
        "year": 2016,
        "mileageKm": 120000,
        "kmPerMonth": 1200,
        "monthlyIncome": 40000,
        "carPrice": 1200000,
        "carCondition": "poor"
    });

    let (status, body) = send(&app, post_json("/api/ai/prefill", &payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "reasoning_parsed");
    assert_eq!(body["suggestedInputs"]["kmPerLiter"], 14.5);
    assert_eq!(body["suggestedInputs"]["insurancePerYear"], 21000.0);
    assert_eq!(body["suggestedInputs"]["depreciationRatePerYear"], 9.0);
    assert_eq!(body["suggestedInputs"]["parkingTollPerMonth"], 1500.0);
    assert_eq!(body["suggestedInputs"]["explanation"], reasoning);
}
