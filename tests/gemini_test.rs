mod common;

use serde_json::json;

use common::{alex, within, FakeGemini};
use insight_gateway::fallback;
use insight_gateway::model::{InsightKind, Priority};
use insight_gateway::{GatewayConfig, GatewayError, GeminiClient, InsightGateway, TextGenerator};

fn gateway_for(base: String) -> InsightGateway {
    let config = GatewayConfig::default()
        .with_api_key("test-key")
        .with_api_base(base);
    InsightGateway::from_config(config)
}

#[actix_web::test]
async fn sends_prompt_and_generation_parameters() {
    let fake = FakeGemini::replying_text(
        "Here you go:\n[{\"type\":\"opportunity\",\"title\":\"Science lab\",\"description\":\"Join the club\",\"confidence\":81,\"actionable\":true}]",
    );
    let client = GeminiClient::new(fake.spawn(), "test-key");

    let text = within(client.generate("hello model", "gemini-test", 1024))
        .await
        .unwrap();
    assert!(text.starts_with("Here you go:"));

    let requests = fake.requests();
    assert_eq!(requests.len(), 1);
    let (uri, body) = &requests[0];
    assert_eq!(uri, "/v1beta/models/gemini-test:generateContent?key=test-key");
    assert_eq!(body["contents"][0]["parts"][0]["text"], "hello model");

    let generation = &body["generationConfig"];
    assert_eq!(generation["topK"], 40);
    assert_eq!(generation["maxOutputTokens"], 1024);
    assert!((generation["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    assert!((generation["topP"].as_f64().unwrap() - 0.95).abs() < 1e-6);
}

#[actix_web::test]
async fn api_key_is_query_encoded() {
    let fake = FakeGemini::replying_text("[]");
    let client = GeminiClient::new(fake.spawn(), "a b&c=d");

    within(client.generate("prompt", "gemini-test", 1024))
        .await
        .unwrap();

    let requests = fake.requests();
    assert_eq!(
        requests[0].0,
        "/v1beta/models/gemini-test:generateContent?key=a+b%26c%3Dd"
    );
}

#[actix_web::test]
async fn error_status_is_a_transport_failure() {
    let fake = FakeGemini::with(500, json!({"error": {"message": "boom"}}));
    let client = GeminiClient::new(fake.spawn(), "test-key");

    let result = within(client.generate("prompt", "gemini-test", 1024)).await;
    assert!(matches!(result, Err(GatewayError::Transport { .. })));
}

#[actix_web::test]
async fn missing_text_is_an_empty_response() {
    let fake = FakeGemini::with(200, json!({"candidates": []}));
    let client = GeminiClient::new(fake.spawn(), "test-key");

    let result = within(client.generate("prompt", "gemini-test", 1024)).await;
    assert!(matches!(result, Err(GatewayError::EmptyResponse)));
}

#[actix_web::test]
async fn gateway_returns_parsed_insights() {
    let fake = FakeGemini::replying_text(
        "```json\n[{\"type\":\"opportunity\",\"title\":\"Science lab\",\"description\":\"Join the club\",\"confidence\":81,\"actionable\":true}]\n```",
    );
    let gateway = gateway_for(fake.spawn());

    let insights = within(gateway.generate_insights(&alex())).await.unwrap();
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].kind, InsightKind::Opportunity);
    assert_eq!(insights[0].title, "Science lab");

    let requests = fake.requests();
    let prompt = requests[0].1["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(prompt.contains("Name: Alex"));
    assert!(requests[0].0.contains(insight_gateway::config::DEFAULT_TEXT_MODEL));
}

#[actix_web::test]
async fn http_failure_yields_same_insights_as_missing_key() {
    let fake = FakeGemini::with(503, json!({}));
    let gateway = gateway_for(fake.spawn());

    let insights = within(gateway.generate_insights(&alex())).await.unwrap();
    assert_eq!(fake.requests().len(), 1);
    assert_eq!(insights, fallback::insights(&alex()));
}

#[actix_web::test]
async fn study_plan_requests_larger_budget_and_decodes_object() {
    let fake = FakeGemini::replying_text(
        r#"Plan below.
{"title":"Weekly plan","totalHours":6,"completedHours":0,"subjects":[
  {"name":"Mathematics","priority":"low","hours":6,"completed":0,
   "tasks":[{"task":"Proofs","duration":"2 hours","completed":false,"priority":"medium"}]}
]}
Good luck!"#,
    );
    let gateway = gateway_for(fake.spawn());

    let plan = within(gateway.create_study_plan(&alex(), "week"))
        .await
        .unwrap();
    assert_eq!(plan.title, "Weekly plan");
    assert_eq!(plan.subjects[0].priority, Priority::Low);
    assert_eq!(plan.subjects[0].tasks[0].duration, "2 hours");

    let requests = fake.requests();
    assert_eq!(requests[0].1["generationConfig"]["maxOutputTokens"], 2048);
}

#[actix_web::test]
async fn unparsable_prediction_falls_back() {
    let fake = FakeGemini::replying_text("The student will probably do fine.");
    let gateway = gateway_for(fake.spawn());

    let prediction = within(gateway.predict_outcome(&alex())).await.unwrap();
    assert_eq!(prediction, fallback::prediction(&alex()));
    assert_eq!(prediction.predicted_score, 93.0);
}
