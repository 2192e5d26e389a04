use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_voices_for_a_language(ctx: &TestContext) {
    let response = ctx.client.get("/api/voices/de").await.unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body["language"], "de");
    assert_eq!(body["default_a"], "onyx");
    assert_eq!(body["default_b"], "shimmer");
    assert!(body["voices"].as_array().unwrap().len() >= 2);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fall_back_to_default_voices_for_unknown_languages(ctx: &TestContext) {
    let response = ctx.client.get("/api/voices/tlh").await.unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body["language"], "en");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_a_cached_voice_demo(ctx: &TestContext) {
    let first = ctx.client.get("/api/voices/es/nova/demo").await.unwrap();
    first.assert_status(StatusCode::OK);
    first.assert_header("content-type", "audio/mpeg");
    assert!(!first.body_bytes.is_empty());

    let second = ctx.client.get("/api/voices/es/Nova/demo").await.unwrap();
    second.assert_status(StatusCode::OK);
    assert_eq!(first.body_bytes, second.body_bytes);

    let requests = ctx.speech.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].speed, 0.95);
    assert!(requests[0].text.contains("español"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_a_demo_for_an_unsupported_voice(ctx: &TestContext) {
    let response = ctx.client.get("/api/voices/en/robot/demo").await.unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("robot");
    assert_eq!(ctx.speech.call_count(), 0);
}
