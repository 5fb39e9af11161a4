//! Wiremock-driven tests for the Gemini client.

use base64::Engine as _;
use carousel_genai::{GenAiError, GeminiClient, GenerativeBackend};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEXT_PATH: &str = "/models/gemini-2.5-pro:generateContent";
const IMAGE_PATH: &str = "/models/gemini-2.5-flash-image:generateContent";

fn slide_json(n: usize) -> serde_json::Value {
    json!({
        "image_prompt": format!("visual {n}"),
        "header_text": format!("Header {n}"),
        "subheader_text": format!("Sub {n}")
    })
}

fn text_response(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }] }
        }]
    })
}

async fn client(server: &MockServer) -> GeminiClient {
    GeminiClient::with_base_url(&server.uri(), "test-key").expect("client")
}

#[tokio::test]
async fn plan_request_parses_five_slides() {
    let server = MockServer::start().await;
    let slides: Vec<_> = (0..5).map(slide_json).collect();
    let plan_text = json!({ "slides": slides }).to_string();

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response(&plan_text)))
        .expect(1)
        .mount(&server)
        .await;

    let plan = client(&server)
        .await
        .generate_slide_plan("5 tips for better sleep", "be viral", 0.9)
        .await
        .expect("plan");

    assert_eq!(plan.slides().len(), 5);
    assert_eq!(plan.get(0).expect("slide 0").header_text, "Header 0");
}

#[tokio::test]
async fn plan_with_four_slides_is_rejected() {
    let server = MockServer::start().await;
    let slides: Vec<_> = (0..4).map(slide_json).collect();
    let plan_text = json!({ "slides": slides }).to_string();

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response(&plan_text)))
        .mount(&server)
        .await;

    let err = client(&server)
        .await
        .generate_slide_plan("topic", "instruction", 0.9)
        .await
        .expect_err("short plan");
    assert!(matches!(err, GenAiError::PlanShape(_)), "got {err:?}");
}

#[tokio::test]
async fn plan_with_invalid_json_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("not json at all")))
        .mount(&server)
        .await;

    let err = client(&server)
        .await
        .generate_slide_plan("topic", "instruction", 0.9)
        .await
        .expect_err("bad json");
    assert!(matches!(err, GenAiError::PlanShape(_)));
}

#[tokio::test]
async fn caption_is_trimmed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(text_response("\n  A scroll-stopping hook  \n")),
        )
        .mount(&server)
        .await;

    let slides = (0..5).map(slide_json).collect::<Vec<_>>();
    let plan: carousel_core::SlidePlan =
        serde_json::from_value(json!(slides)).expect("plan");
    let caption = client(&server)
        .await
        .generate_caption(&plan, "write well", 0.9)
        .await
        .expect("caption");
    assert_eq!(caption, "A scroll-stopping hook");
}

#[tokio::test]
async fn image_inline_data_is_decoded() {
    let server = MockServer::start().await;
    let png_bytes = [137u8, 80, 78, 71, 13, 10, 26, 10];
    let encoded = base64::engine::general_purpose::STANDARD.encode(png_bytes);

    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .and(body_partial_json(json!({
            "generationConfig": { "responseModalities": ["IMAGE"] }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "parts": [{
                        "inlineData": { "mimeType": "image/png", "data": encoded }
                    }]
                }
            }]
        })))
        .mount(&server)
        .await;

    let image = client(&server)
        .await
        .generate_image("a starry sky")
        .await
        .expect("image");
    assert_eq!(image.bytes, png_bytes);
    assert_eq!(image.format, carousel_core::ImageFormat::Png);
}

#[tokio::test]
async fn image_without_inline_data_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("no image here")))
        .mount(&server)
        .await;

    let err = client(&server)
        .await
        .generate_image("a starry sky")
        .await
        .expect_err("no data");
    assert!(matches!(err, GenAiError::NoImageData));
}

#[tokio::test]
async fn api_error_status_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "code": 429, "message": "quota exceeded", "status": "RESOURCE_EXHAUSTED" }
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .await
        .generate_image("a starry sky")
        .await
        .expect_err("quota");
    match err {
        GenAiError::Api { status, message } => {
            assert_eq!(status, 429);
            assert_eq!(message, "quota exceeded");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert!(GenAiError::Api {
        status: 429,
        message: String::new()
    }
    .is_retryable());
}
