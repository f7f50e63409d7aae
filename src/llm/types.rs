use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImageArgs,
    ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessageArgs,
    ChatCompletionRequestUserMessageContent, ChatCompletionRequestUserMessageContentPart,
    ImageUrlArgs,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    Text(String),
    /// Image reference, either a remote URL or a `data:` URI.
    ImageUrl(String),
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: Role,
    pub parts: Vec<ContentPart>,
}

#[derive(Debug, Clone, Default)]
pub struct ChatCompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub model: String,
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone)]
pub struct Choice {
    pub index: u32,
    pub content: Option<String>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            parts: vec![ContentPart::Text(text.into())],
        }
    }

    pub fn user(parts: Vec<ContentPart>) -> Self {
        Self {
            role: Role::User,
            parts,
        }
    }

    pub fn to_openai_message(&self) -> crate::Result<ChatCompletionRequestMessage> {
        match self.role {
            Role::System => {
                let mut text = String::new();
                for part in &self.parts {
                    match part {
                        ContentPart::Text(t) => text.push_str(t),
                        ContentPart::ImageUrl(_) => {
                            return Err(crate::Error::llm(
                                "System messages cannot contain images",
                            ));
                        }
                    }
                }
                let msg = ChatCompletionRequestSystemMessageArgs::default()
                    .content(ChatCompletionRequestSystemMessageContent::Text(text))
                    .build()
                    .map_err(|e| {
                        crate::Error::llm(format!("Failed to build system message: {}", e))
                    })?;
                Ok(msg.into())
            }
            Role::User => {
                let parts = self
                    .parts
                    .iter()
                    .map(ContentPart::to_openai_part)
                    .collect::<crate::Result<Vec<_>>>()?;
                let msg = ChatCompletionRequestUserMessageArgs::default()
                    .content(ChatCompletionRequestUserMessageContent::Array(parts))
                    .build()
                    .map_err(|e| {
                        crate::Error::llm(format!("Failed to build user message: {}", e))
                    })?;
                Ok(msg.into())
            }
        }
    }
}

impl ContentPart {
    fn to_openai_part(&self) -> crate::Result<ChatCompletionRequestUserMessageContentPart> {
        let part = match self {
            Self::Text(text) => ChatCompletionRequestMessageContentPartTextArgs::default()
                .text(text.as_str())
                .build()?
                .into(),
            Self::ImageUrl(url) => ChatCompletionRequestMessageContentPartImageArgs::default()
                .image_url(ImageUrlArgs::default().url(url.as_str()).build()?)
                .build()?
                .into(),
        };
        Ok(part)
    }
}

impl ChatCompletionResponse {
    /// Content of the first choice, if it has any non-empty text.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.content.as_deref())
            .filter(|content| !content.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn response_with(choices: Vec<Choice>) -> ChatCompletionResponse {
        ChatCompletionResponse {
            id: "chatcmpl-1".to_string(),
            model: "vision".to_string(),
            choices,
            usage: None,
        }
    }

    fn choice(content: Option<&str>) -> Choice {
        Choice {
            index: 0,
            content: content.map(str::to_string),
            finish_reason: Some("Stop".to_string()),
        }
    }

    #[test]
    fn test_user_message_serializes_text_and_image_parts() {
        let msg = ChatMessage::user(vec![
            ContentPart::Text("Read this".to_string()),
            ContentPart::ImageUrl("data:image/png;base64,AAAA".to_string()),
        ]);

        let openai_msg = msg.to_openai_message().unwrap();
        assert!(matches!(openai_msg, ChatCompletionRequestMessage::User(_)));

        let value: Value = serde_json::to_value(&openai_msg).unwrap();
        assert_eq!(value["role"], "user");
        assert_eq!(
            value["content"][0],
            json!({ "type": "text", "text": "Read this" })
        );
        assert_eq!(value["content"][1]["type"], "image_url");
        assert_eq!(
            value["content"][1]["image_url"]["url"],
            "data:image/png;base64,AAAA"
        );
    }

    #[test]
    fn test_system_message() {
        let openai_msg = ChatMessage::system("Be precise.")
            .to_openai_message()
            .unwrap();
        assert!(matches!(
            openai_msg,
            ChatCompletionRequestMessage::System(_)
        ));
    }

    #[test]
    fn test_system_message_rejects_images() {
        let msg = ChatMessage {
            role: Role::System,
            parts: vec![ContentPart::ImageUrl("https://example.com/a.png".to_string())],
        };
        let err = msg.to_openai_message().unwrap_err();
        assert!(err.to_string().contains("cannot contain images"));
    }

    #[test]
    fn test_first_content() {
        let response = response_with(vec![choice(Some("INVOICE #1")), choice(Some("other"))]);
        assert_eq!(response.first_content(), Some("INVOICE #1"));
    }

    #[test]
    fn test_first_content_missing_or_empty() {
        assert_eq!(response_with(vec![]).first_content(), None);
        assert_eq!(response_with(vec![choice(None)]).first_content(), None);
        assert_eq!(response_with(vec![choice(Some(""))]).first_content(), None);
    }
}
