use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_ok_for_health_check(ctx: &TestContext) {
    let response = ctx.client.get("/health").await.unwrap();

    response.assert_status(StatusCode::OK);

    // Health endpoint returns plain text
    let body = String::from_utf8(response.body_bytes.clone()).unwrap();
    assert_eq!(body, "OK");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_ready_status(ctx: &TestContext) {
    let response = ctx.client.get("/health/ready").await.unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("ready"));
    assert_eq!(body.get("tts").and_then(|v| v.as_str()), Some("fake"));
    assert_eq!(body.get("cached_segments").and_then(|v| v.as_u64()), Some(0));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_count_cached_segments(ctx: &TestContext) {
    ctx.client
        .post(
            "/api/dialogue/audio",
            &json!({
                "language": "en",
                "level": "A1",
                "turns": [
                    {"speaker": "A", "text": "Hi"},
                    {"speaker": "B", "text": "Hello"}
                ]
            }),
        )
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let response = ctx.client.get("/health/ready").await.unwrap();
    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("cached_segments").and_then(|v| v.as_u64()), Some(2));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_include_request_id_in_health_responses(ctx: &TestContext) {
    let response = ctx.client.get("/health").await.unwrap();
    response.assert_header_exists("x-request-id");

    let response = ctx.client.get("/health/ready").await.unwrap();
    response.assert_header_exists("x-request-id");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_echo_a_valid_incoming_request_id(ctx: &TestContext) {
    let id = "6b0d8f8e-2c4a-4e59-9a57-1d9c3f0a7b21";
    let response = ctx
        .client
        .get_with_headers("/health", &[("x-request-id", id)])
        .await
        .unwrap();

    response.assert_header("x-request-id", id);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_404_for_unknown_routes(ctx: &TestContext) {
    let response = ctx.client.get("/api/unknown").await.unwrap();
    response.assert_status(StatusCode::NOT_FOUND);
}
