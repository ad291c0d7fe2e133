use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::application::ports::{
    ModelLoadError, TranslationModel, TranslationModelError, TranslationModelLoader,
};
use crate::domain::LanguagePair;

pub const DEFAULT_MODEL_TEMPLATE: &str = "Helsinki-NLP/opus-mt-{src}-{trg}";
pub const DEFAULT_HUB_URL: &str = "https://huggingface.co";
pub const DEFAULT_INFERENCE_URL: &str = "https://router.huggingface.co/hf-inference";

pub struct HuggingFaceModelLoader {
    client: reqwest::Client,
    hub_url: String,
    inference_url: String,
    model_template: String,
    api_token: Option<String>,
}

impl HuggingFaceModelLoader {
    pub fn new(
        hub_url: Option<String>,
        inference_url: Option<String>,
        model_template: Option<String>,
        api_token: Option<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            hub_url: hub_url.unwrap_or_else(|| DEFAULT_HUB_URL.to_string()),
            inference_url: inference_url.unwrap_or_else(|| DEFAULT_INFERENCE_URL.to_string()),
            model_template: model_template.unwrap_or_else(|| DEFAULT_MODEL_TEMPLATE.to_string()),
            api_token: api_token.filter(|t| !t.is_empty()),
        }
    }

    pub fn model_id_for(&self, pair: &LanguagePair) -> String {
        self.model_template
            .replace("{src}", pair.source().primary())
            .replace("{trg}", pair.target().primary())
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl TranslationModelLoader for HuggingFaceModelLoader {
    async fn load(&self, pair: &LanguagePair) -> Result<Arc<dyn TranslationModel>, ModelLoadError> {
        let model_id = self.model_id_for(pair);
        let url = format!("{}/api/models/{}", self.hub_url.trim_end_matches('/'), model_id);

        tracing::debug!(model = %model_id, "Resolving translation model on hub");

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| ModelLoadError::LoadFailed(format!("request: {}", e)))?;

        match response.status() {
            status if status.is_success() => {}
            // The hub answers 401 for repositories that do not exist.
            StatusCode::NOT_FOUND | StatusCode::UNAUTHORIZED => {
                return Err(ModelLoadError::Unsupported(model_id));
            }
            status => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "unknown error".to_string());
                return Err(ModelLoadError::LoadFailed(format!(
                    "status {}: {}",
                    status, body
                )));
            }
        }

        let endpoint = format!(
            "{}/models/{}",
            self.inference_url.trim_end_matches('/'),
            model_id
        );

        Ok(Arc::new(HuggingFaceTranslationModel {
            client: self.client.clone(),
            endpoint,
            model_id,
            api_token: self.api_token.clone(),
        }))
    }
}

pub struct HuggingFaceTranslationModel {
    client: reqwest::Client,
    endpoint: String,
    model_id: String,
    api_token: Option<String>,
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    options: InferenceOptions,
}

#[derive(Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Deserialize)]
struct TranslationOutput {
    translation_text: String,
}

#[async_trait]
impl TranslationModel for HuggingFaceTranslationModel {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate(&self, text: &str) -> Result<String, TranslationModelError> {
        let body = InferenceRequest {
            inputs: text,
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TranslationModelError::GenerationFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranslationModelError::GenerationFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let outputs: Vec<TranslationOutput> = response
            .json()
            .await
            .map_err(|e| TranslationModelError::InvalidResponse(format!("parse response: {}", e)))?;

        outputs
            .into_iter()
            .next()
            .map(|o| o.translation_text)
            .ok_or_else(|| TranslationModelError::InvalidResponse("empty output list".to_string()))
    }
}
