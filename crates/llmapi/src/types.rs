use reqwest::Client;
use std::fmt;

use crate::utils;

#[derive(Clone, Debug)]
pub enum LLMMessageType {
    TEXT(String),
    IMAGE { data_b64: String, mime_type: String },
}

impl LLMMessageType {
    pub fn text(text: impl Into<String>) -> Self {
        LLMMessageType::TEXT(text.into())
    }

    pub fn image_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        LLMMessageType::IMAGE {
            data_b64: utils::encode_byte_to_base64(bytes),
            mime_type: mime_type.into(),
        }
    }
}

/// One `user` turn. The app never sends model or system turns.
#[derive(Clone, Debug)]
pub struct LLMMessage {
    pub content: Vec<LLMMessageType>,
}

impl LLMMessage {
    pub fn user(content: Vec<LLMMessageType>) -> Self {
        Self { content }
    }
}

/// Connection details for one Gemini model. Cloning shares the underlying
/// HTTP connection pool.
#[derive(Clone)]
pub struct LLMClient {
    pub(crate) http: Client,
    pub(crate) api_key: String,
    pub(crate) endpoint: String,
    pub(crate) default_model: String,
}

impl LLMClient {
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        default_model: impl Into<String>,
    ) -> Self {
        let default_model: String = default_model.into();
        let default_model = default_model
            .trim()
            .strip_prefix("models/")
            .unwrap_or(default_model.trim())
            .to_string();

        Self {
            http: Client::new(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            default_model,
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub fn generate_url(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.default_model
        )
    }
}

impl fmt::Debug for LLMClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LLMClient")
            .field("endpoint", &self.endpoint)
            .field("default_model", &self.default_model)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
