use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use serde_json::json;
use test_context::test_context;

const GENERATE_PATH: &str = "/api/dialogue/generate";

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_generate_a_dialogue(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            GENERATE_PATH,
            &json!({"language": "fr", "level": "A1", "topic": "buying fruit", "turns": 3}),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body["language"], "fr");
    assert_eq!(body["level"], "A1");
    assert_eq!(body["title"], "Au marché");

    let turns = body["turns"].as_array().unwrap();
    assert_eq!(turns.len(), 3);
    assert_eq!(turns[0]["speaker"], "A");
    assert_eq!(turns[1]["speaker"], "B");

    let prompt = ctx.dialogue_model.last_prompt().unwrap();
    assert!(prompt.contains("French"));
    assert!(prompt.contains("buying fruit"));
    assert!(prompt.contains("exactly 3 turns"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_feed_a_generated_dialogue_into_the_audio_endpoint(ctx: &TestContext) {
    let generated = ctx
        .client
        .post(GENERATE_PATH, &json!({"language": "fr", "level": "B2"}))
        .await
        .unwrap();
    generated.assert_status(StatusCode::OK);
    let body = generated.body.as_ref().unwrap();

    let response = ctx
        .client
        .post(
            "/api/dialogue/audio",
            &json!({
                "language": body["language"],
                "level": body["level"],
                "turns": body["turns"],
                "settings": {"format": "wav"}
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    response.assert_header("x-segment-count", "3");
    assert!(response
        .header("content-disposition")
        .unwrap()
        .contains("dialogue_fr_B2.wav"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_an_unusable_model_answer_as_bad_gateway(ctx: &TestContext) {
    let response = ctx
        .client
        .post(GENERATE_PATH, &json!({"language": "it", "level": "B1", "topic": "[broken]"}))
        .await
        .unwrap();
    response.assert_status(StatusCode::BAD_GATEWAY);

    let response = ctx
        .client
        .post(GENERATE_PATH, &json!({"language": "it", "level": "B1", "topic": "[down]"}))
        .await
        .unwrap();
    response.assert_status(StatusCode::BAD_GATEWAY);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_an_unknown_level(ctx: &TestContext) {
    let response = ctx
        .client
        .post(GENERATE_PATH, &json!({"language": "it", "level": "Z9"}))
        .await
        .unwrap();

    // serde rejection from the JSON extractor
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}
