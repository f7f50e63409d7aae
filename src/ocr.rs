//! Text extraction through a vision-language model.
//!
//! Each call sends exactly one user message: the OCR instruction followed by
//! the image inlined as a `data:` URI. The answer is read from the first
//! completion choice.

use crate::{
    Result,
    llm::{ChatCompletionRequest, ChatMessage, ContentPart, LlmClient},
};
use std::sync::Arc;
use tracing::debug;

pub const OCR_INSTRUCTION: &str = "Perform OCR on this image and extract all text content.";

/// Returned when the model answers without any text.
pub const NO_TEXT_FOUND: &str = "No OCR text found.";

/// Base64 image data with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime_type: String,
    pub data: String,
}

impl EncodedImage {
    pub fn new(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

#[derive(Debug, Clone)]
pub struct OcrRequestPayload {
    pub instruction: String,
    pub image: EncodedImage,
}

impl OcrRequestPayload {
    pub fn new(image: EncodedImage) -> Self {
        Self {
            instruction: OCR_INSTRUCTION.to_string(),
            image,
        }
    }

    pub fn to_message(&self) -> ChatMessage {
        ChatMessage::user(vec![
            ContentPart::Text(self.instruction.clone()),
            ContentPart::ImageUrl(self.image.data_uri()),
        ])
    }
}

pub struct OcrClient {
    llm: Arc<dyn LlmClient>,
    system_prompt: Option<String>,
    max_tokens: Option<u32>,
}

impl OcrClient {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            system_prompt: None,
            max_tokens: None,
        }
    }

    pub fn with_system_prompt(mut self, prompt: Option<String>) -> Self {
        self.system_prompt = prompt.filter(|p| !p.trim().is_empty());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn build_request(&self, payload: &OcrRequestPayload) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(2);
        if let Some(ref prompt) = self.system_prompt {
            messages.push(ChatMessage::system(prompt.clone()));
        }
        messages.push(payload.to_message());

        ChatCompletionRequest {
            messages,
            max_tokens: self.max_tokens,
            temperature: None,
        }
    }

    /// Runs OCR on `image`. Falls back to [`NO_TEXT_FOUND`] when the model
    /// returns no choices or empty content; client and API failures are
    /// returned as errors.
    pub async fn extract_text(&self, image: EncodedImage) -> Result<String> {
        let payload = OcrRequestPayload::new(image);
        let request = self.build_request(&payload);

        debug!(
            "Sending OCR request: {} message(s), {} image ({} base64 chars)",
            request.messages.len(),
            payload.image.mime_type,
            payload.image.data.len()
        );

        let response = self.llm.create_chat_completion(request).await?;

        debug!(
            "OCR response {} from {}: {} choice(s), usage {:?}",
            response.id,
            response.model,
            response.choices.len(),
            response.usage
        );

        Ok(response
            .first_content()
            .unwrap_or(NO_TEXT_FOUND)
            .to_string())
    }
}
