use crate::{
    config::GeminiConfig,
    error::{GenerationError, Result},
    genai::invoke_model,
    models::{
        GeneratedImage, ImageGenerationRequest, ImageOptions, ModelCategory, ModelInfo,
        PredictInstance, PredictParameters, PredictRequest, PredictResponse,
    },
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::sync::Arc;

#[derive(Clone)]
pub struct ImageClient {
    http: reqwest::Client,
    config: Arc<GeminiConfig>,
}

impl ImageClient {
    pub fn new(http: reqwest::Client, config: Arc<GeminiConfig>) -> Self {
        Self { http, config }
    }

    pub fn supported_models() -> Vec<ModelInfo> {
        vec![
            ModelInfo::new("imagen-3.0-generate-002", "Imagen 3", "Google", ModelCategory::Image),
            ModelInfo::new("imagen-4.0-generate-001", "Imagen 4", "Google", ModelCategory::Image),
        ]
    }

    pub async fn generate(&self, request: ImageGenerationRequest) -> Result<GeneratedImage> {
        let model_id = request
            .model_id
            .as_deref()
            .unwrap_or(self.config.image_model.as_str())
            .to_string();

        let payload = PredictRequest {
            instances: vec![PredictInstance {
                prompt: request.prompt,
            }],
            parameters: PredictParameters::from(&request.options),
        };

        log::info!("Generating image with model: {}", model_id);

        let response: PredictResponse =
            invoke_model(&self.http, &self.config, &model_id, "predict", &payload).await?;

        let prediction = response
            .predictions
            .into_iter()
            .find(|p| p.bytes_base64_encoded.is_some())
            .ok_or_else(|| GenerationError::Schema("No images generated".into()))?;

        let encoded = prediction.bytes_base64_encoded.unwrap_or_default();
        let bytes = STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| GenerationError::Decode(e.to_string()))?;
        let mime_type = prediction
            .mime_type
            .unwrap_or_else(|| request.options.output_format.mime_type().to_string());

        Ok(GeneratedImage::new(bytes, mime_type))
    }

    pub async fn generate_with(&self, prompt: &str, options: &ImageOptions) -> Result<GeneratedImage> {
        self.generate(ImageGenerationRequest {
            prompt: prompt.to_string(),
            model_id: None,
            options: options.clone(),
        })
        .await
    }
}
