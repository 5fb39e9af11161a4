//! Client for the Generative Language REST API.
//!
//! Speaks `models/{model}:generateContent` for both text requests (slide
//! plan, caption) and image requests, and maps the wire shapes into the
//! carousel's domain types.

use base64::Engine as _;
use carousel_core::{ImageData, ImageFormat, SlidePlan, SlideSpec};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use url::Url;

use crate::backend::GenerativeBackend;
use crate::error::{GenAiError, GenAiResult};

/// Text model used for the slide plan and the caption.
pub const TEXT_MODEL: &str = "gemini-2.5-pro";
/// Image model used for slide artwork.
pub const IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// Default API base.
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/";

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini generateContent endpoints.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base: Url,
    api_key: String,
}

impl GeminiClient {
    /// Create a client against the public API.
    ///
    /// # Errors
    ///
    /// Returns [`GenAiError::InvalidUrl`] if the built-in base URL fails to
    /// parse (which would be a bug) — kept as an error for parity with
    /// [`GeminiClient::with_base_url`].
    pub fn new(api_key: impl Into<String>) -> GenAiResult<Self> {
        Self::with_base_url(DEFAULT_API_BASE, api_key)
    }

    /// Create a client against a custom base URL (self-hosted proxy, tests).
    ///
    /// # Errors
    ///
    /// Returns [`GenAiError::InvalidUrl`] if `base` is not a valid URL.
    pub fn with_base_url(base: &str, api_key: impl Into<String>) -> GenAiResult<Self> {
        // A trailing slash keeps Url::join from eating the last path segment
        let normalized = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{base}/")
        };
        let base = Url::parse(&normalized).map_err(|e| GenAiError::InvalidUrl(e.to_string()))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base,
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self, model: &str) -> GenAiResult<Url> {
        self.base
            .join(&format!("models/{model}:generateContent"))
            .map_err(|e| GenAiError::InvalidUrl(e.to_string()))
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> GenAiResult<GenerateContentResponse> {
        let url = self.endpoint(model)?;
        tracing::debug!(model, "issuing generateContent request");
        let response = self
            .http
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map_or(body, |parsed| parsed.error.message);
            tracing::warn!(model, status = status.as_u16(), "backend returned an error");
            return Err(GenAiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<GenerateContentResponse>().await?)
    }
}

#[async_trait::async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate_slide_plan(
        &self,
        topic: &str,
        system_instruction: &str,
        temperature: f32,
    ) -> GenAiResult<SlidePlan> {
        let request = GenerateContentRequest {
            contents: vec![Content::user_text(format!(
                "Apply the framework to this topic: \"{topic}\""
            ))],
            system_instruction: Some(Content::text(system_instruction)),
            generation_config: Some(GenerationConfig {
                temperature: Some(temperature),
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(plan_response_schema()),
                response_modalities: None,
            }),
        };

        let response = self.generate_content(TEXT_MODEL, &request).await?;
        let text = response
            .text()
            .ok_or_else(|| GenAiError::MalformedResponse("no text candidate".to_string()))?;
        let envelope: PlanEnvelope = serde_json::from_str(&text)
            .map_err(|e| GenAiError::PlanShape(format!("plan was not valid JSON: {e}")))?;
        SlidePlan::new(envelope.slides).map_err(|e| GenAiError::PlanShape(e.to_string()))
    }

    async fn generate_caption(
        &self,
        plan: &SlidePlan,
        system_instruction: &str,
        temperature: f32,
    ) -> GenAiResult<String> {
        let request = GenerateContentRequest {
            contents: vec![Content::user_text(caption_context(plan))],
            system_instruction: Some(Content::text(system_instruction)),
            generation_config: Some(GenerationConfig {
                temperature: Some(temperature),
                response_mime_type: None,
                response_schema: None,
                response_modalities: None,
            }),
        };

        let response = self.generate_content(TEXT_MODEL, &request).await?;
        let text = response
            .text()
            .ok_or_else(|| GenAiError::MalformedResponse("no text candidate".to_string()))?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(GenAiError::MalformedResponse(
                "caption candidate was empty".to_string(),
            ));
        }
        Ok(trimmed.to_string())
    }

    async fn generate_image(&self, prompt: &str) -> GenAiResult<ImageData> {
        let request = GenerateContentRequest {
            contents: vec![Content::user_text(prompt)],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                temperature: None,
                response_mime_type: None,
                response_schema: None,
                response_modalities: Some(vec!["IMAGE".to_string()]),
            }),
        };

        let response = self.generate_content(IMAGE_MODEL, &request).await?;
        let inline = response.inline_data().ok_or(GenAiError::NoImageData)?;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(inline.data.as_bytes())
            .map_err(|e| GenAiError::MalformedResponse(format!("invalid base64 payload: {e}")))?;
        let format = ImageFormat::from_mime(&inline.mime_type).unwrap_or(ImageFormat::Png);
        Ok(ImageData::new(format, bytes))
    }
}

/// Format the 5 slides into the caption request's user content.
fn caption_context(plan: &SlidePlan) -> String {
    plan.slides()
        .iter()
        .enumerate()
        .map(|(i, slide)| {
            format!(
                "Slide {} Content:\n- Visuals: {}\n- Text: \"{} - {}\"",
                i + 1,
                slide.image_prompt,
                slide.header_text,
                slide.subheader_text
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Structured-output schema forcing `{"slides": [5 x slide object]}`.
fn plan_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "slides": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "image_prompt": { "type": "STRING" },
                        "header_text": { "type": "STRING" },
                        "subheader_text": { "type": "STRING" }
                    },
                    "required": ["image_prompt", "header_text", "subheader_text"]
                }
            }
        },
        "required": ["slides"]
    })
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Deserialization envelope matching the structured-output schema
/// `{"slides": [...]}` returned by the text model.
#[derive(Debug, Clone, Deserialize)]
struct PlanEnvelope {
    slides: Vec<SlideSpec>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part {
                text: Some(text.into()),
                inline_data: None,
            }],
        }
    }

    fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            ..Self::text(text)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's text parts.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// First inline image payload of the first candidate.
    fn inline_data(&self) -> Option<&InlineData> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|part| part.inline_data.as_ref())
    }
}

#[derive(Debug, Clone, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
}
