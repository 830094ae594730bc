use anyhow::{Context, Result};
use serde_json::{Value, json};

use crate::types::{LLMClient, LLMMessage, LLMMessageType};

use super::models::GeminiResponse;

pub fn convert_body_parts_gemini(body_part: Vec<LLMMessageType>) -> Vec<Value> {
    body_part
        .into_iter()
        .map(|part| match part {
            LLMMessageType::TEXT(text) => json!({ "text": text }),
            LLMMessageType::IMAGE {
                data_b64,
                mime_type,
            } => json!({
                "inlineData": {
                    "mimeType": mime_type,
                    "data": data_b64
                }
            }),
        })
        .collect()
}

pub fn convert_messages_to_gemini_contents(messages: Vec<LLMMessage>) -> Vec<Value> {
    messages
        .into_iter()
        .map(|m| {
            json!({
                "role": "user",
                "parts": convert_body_parts_gemini(m.content)
            })
        })
        .collect()
}

/// Calls `{endpoint}/{model}:generateContent` once. No retry and no timeout
/// beyond what the transport imposes.
pub async fn send_generate_request(
    api_client: &LLMClient,
    messages: Vec<LLMMessage>,
) -> Result<GeminiResponse> {
    let url = api_client.generate_url();
    let body = json!({
        "contents": convert_messages_to_gemini_contents(messages)
    });

    tracing::debug!(%url, "sending Gemini generateContent request");

    let response = api_client
        .http
        .post(&url)
        .header("x-goog-api-key", api_client.api_key())
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await
        .context("HTTP request (generateContent) failed")?;

    let status = response.status();
    let response_text = response
        .text()
        .await
        .context("Reading generateContent response body failed")?;

    if !status.is_success() {
        return Err(anyhow::anyhow!(
            "Gemini generateContent failed: status {} body {}",
            status,
            response_text
        ));
    }

    let response: GeminiResponse = serde_json::from_str(&response_text).with_context(|| {
        format!(
            "Failed to decode Gemini response JSON. Raw response: {}",
            response_text
        )
    })?;

    tracing::debug!(
        candidates = response.candidates.len(),
        model_version = response.model_version.as_deref().unwrap_or("unknown"),
        "received Gemini response"
    );

    Ok(response)
}

/// Text of the first part of the first candidate, exactly as returned. An
/// empty string counts as absent.
pub fn first_text_part(response: &GeminiResponse) -> Option<&str> {
    response
        .candidates
        .first()?
        .content
        .parts
        .first()?
        .text
        .as_deref()
        .filter(|text| !text.is_empty())
}
