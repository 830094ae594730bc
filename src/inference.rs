use async_trait::async_trait;
use llmapi::{LLMClient, LLMMessage, LLMMessageType, first_text_part, send_generate_request};

use crate::config::Config;
use crate::error::AnalysisError;
use crate::models::UploadedImage;

/// A hosted model that answers an instruction about an image with free text.
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Returns the first text the model produced, `EmptyResponse` when it
    /// produced none, or `RemoteCall` when the call itself failed.
    async fn describe(&self, instruction: &str, image: &UploadedImage) -> Result<String, AnalysisError>;

    fn name(&self) -> &str;
}

pub struct GeminiVisionModel {
    client: LLMClient,
}

impl GeminiVisionModel {
    pub fn new(client: LLMClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(LLMClient::new(
            config.api_key.clone(),
            config.endpoint.clone(),
            config.model.clone(),
        ))
    }
}

#[async_trait]
impl VisionModel for GeminiVisionModel {
    async fn describe(&self, instruction: &str, image: &UploadedImage) -> Result<String, AnalysisError> {
        let messages = vec![LLMMessage::user(vec![
            LLMMessageType::text(instruction),
            LLMMessageType::image_bytes(&image.bytes, image.mime_type.clone()),
        ])];

        let response = send_generate_request(&self.client, messages)
            .await
            .map_err(AnalysisError::RemoteCall)?;

        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref())
        {
            tracing::warn!(block_reason = reason, "prompt was blocked by the model");
        }

        first_text_part(&response)
            .map(str::to_string)
            .ok_or(AnalysisError::EmptyResponse)
    }

    fn name(&self) -> &str {
        self.client.default_model()
    }
}
