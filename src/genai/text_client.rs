use crate::{
    config::GeminiConfig,
    error::{GenerationError, Result},
    genai::invoke_model,
    models::{
        Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Idea,
        ModelCategory, ModelInfo, Part, TextGenerationRequest, TextGenerationResponse,
    },
};
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Clone)]
pub struct TextClient {
    http: reqwest::Client,
    config: Arc<GeminiConfig>,
}

impl TextClient {
    pub fn new(http: reqwest::Client, config: Arc<GeminiConfig>) -> Self {
        Self { http, config }
    }

    pub fn supported_models() -> Vec<ModelInfo> {
        vec![
            ModelInfo::new("gemini-2.5-flash", "Gemini 2.5 Flash", "Google", ModelCategory::Text),
            ModelInfo::new("gemini-2.5-pro", "Gemini 2.5 Pro", "Google", ModelCategory::Text),
            ModelInfo::new("gemini-2.0-flash", "Gemini 2.0 Flash", "Google", ModelCategory::Text),
        ]
    }

    /// JSON schema of the idea batch: an array of objects with three required strings.
    pub fn idea_schema() -> Value {
        json!({
            "type": "ARRAY",
            "items": {
                "type": "OBJECT",
                "properties": {
                    "title": { "type": "STRING" },
                    "description": { "type": "STRING" },
                    "image_prompt": { "type": "STRING" }
                },
                "required": ["title", "description", "image_prompt"]
            }
        })
    }

    pub async fn generate(&self, request: TextGenerationRequest) -> Result<TextGenerationResponse> {
        let model_id = request
            .model_id
            .as_deref()
            .unwrap_or(self.config.text_model.as_str())
            .to_string();

        let generation_config = request.response_schema.map(|schema| GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(schema),
        });
        let payload = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(request.prompt),
                }],
            }],
            generation_config,
        };

        log::info!("Invoking text model: {}", model_id);

        let response: GenerateContentResponse =
            invoke_model(&self.http, &self.config, &model_id, "generateContent", &payload).await?;

        let finish_reason = response
            .candidates
            .first()
            .and_then(|candidate| candidate.finish_reason.clone());
        let text = response.first_text().ok_or_else(|| {
            GenerationError::Schema(format!(
                "{} returned no text (finish reason: {})",
                model_id,
                finish_reason.as_deref().unwrap_or("none")
            ))
        })?;

        Ok(TextGenerationResponse {
            text,
            model: model_id,
            finish_reason,
        })
    }

    /// Asks for a batch of ideas constrained to [`TextClient::idea_schema`].
    pub async fn generate_ideas(&self, prompt: &str) -> Result<Vec<Idea>> {
        let response = self
            .generate(TextGenerationRequest {
                prompt: prompt.to_string(),
                model_id: None,
                response_schema: Some(Self::idea_schema()),
            })
            .await?;

        log::debug!("Idea batch raw response: {}", response.text);

        parse_ideas(&response.text)
    }
}

pub fn parse_ideas(raw: &str) -> Result<Vec<Idea>> {
    serde_json::from_str(raw.trim())
        .map_err(|e| GenerationError::Schema(format!("idea batch does not match schema: {}", e)))
}
