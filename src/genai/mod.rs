pub mod image_client;
pub mod text_client;

use crate::{
    config::GeminiConfig,
    error::{GenerationError, Result},
    models::{GeneratedImage, Idea, ImageOptions, ServiceErrorEnvelope},
};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

pub use image_client::ImageClient;
pub use text_client::TextClient;

/// The two capabilities the pipeline needs from a generation service.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate_ideas(&self, prompt: &str) -> Result<Vec<Idea>>;

    async fn generate_image(&self, prompt: &str, options: &ImageOptions)
        -> Result<GeneratedImage>;
}

#[derive(Clone)]
pub struct GenAiClient {
    text_client: TextClient,
    image_client: ImageClient,
}

impl GenAiClient {
    /// Builds the client. A missing API key is not rejected here; each call
    /// fails with [`GenerationError::Config`] instead.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| GenerationError::Config(format!("HTTP client: {}", e)))?;
        let config = Arc::new(config);

        Ok(Self {
            text_client: TextClient::new(http.clone(), config.clone()),
            image_client: ImageClient::new(http, config),
        })
    }

    pub fn text(&self) -> &TextClient {
        &self.text_client
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }
}

#[async_trait]
impl Generator for GenAiClient {
    async fn generate_ideas(&self, prompt: &str) -> Result<Vec<Idea>> {
        self.text_client.generate_ideas(prompt).await
    }

    async fn generate_image(
        &self,
        prompt: &str,
        options: &ImageOptions,
    ) -> Result<GeneratedImage> {
        self.image_client.generate_with(prompt, options).await
    }
}

/// POSTs `body` to `{base_url}/v1beta/models/{model}:{method}` and decodes the
/// JSON answer. Non-2xx answers become [`GenerationError::Service`].
pub(crate) async fn invoke_model<B, R>(
    http: &reqwest::Client,
    config: &GeminiConfig,
    model: &str,
    method: &str,
    body: &B,
) -> Result<R>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let api_key = config
        .api_key
        .as_deref()
        .ok_or_else(|| GenerationError::Config("GEMINI_API_KEY is not set".into()))?;

    let url = format!("{}/v1beta/models/{}:{}", config.base_url, model, method);
    let payload =
        serde_json::to_vec(body).map_err(|e| GenerationError::Serialization(e.to_string()))?;

    log::debug!("POST {} ({} bytes)", url, payload.len());

    let response = http
        .post(&url)
        .header("x-goog-api-key", api_key)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(payload)
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ServiceErrorEnvelope>(&text)
            .map(|envelope| envelope.error.message)
            .unwrap_or(text);
        log::error!("{} answered {}: {}", model, status, message);
        return Err(GenerationError::Service {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&text).map_err(|e| {
        GenerationError::Schema(format!("unexpected response from {}: {}", model, e))
    })
}
