use async_trait::async_trait;
use ocr_gateway::{
    Error, Result,
    llm::{ChatCompletionRequest, ChatCompletionResponse, Choice, LlmClient, Usage},
};
use std::sync::{Arc, Mutex};

/// Mock LLM client for testing
#[derive(Debug)]
pub struct MockLlmClient {
    pub content: Option<String>,
    pub requests: Arc<Mutex<Vec<ChatCompletionRequest>>>,
    pub error: Option<String>,
}

impl MockLlmClient {
    /// Answers every request with `content` in the first choice.
    pub fn with_content(content: &str) -> Arc<Self> {
        Arc::new(Self {
            content: Some(content.to_string()),
            requests: Arc::new(Mutex::new(Vec::new())),
            error: None,
        })
    }

    /// Answers with a choice that has no content.
    pub fn empty() -> Arc<Self> {
        Arc::new(Self {
            content: None,
            requests: Arc::new(Mutex::new(Vec::new())),
            error: None,
        })
    }

    pub fn with_error(error: &str) -> Arc<Self> {
        Arc::new(Self {
            content: None,
            requests: Arc::new(Mutex::new(Vec::new())),
            error: Some(error.to_string()),
        })
    }

    pub fn get_requests(&self) -> Vec<ChatCompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        self.requests.lock().unwrap().push(request);

        if let Some(ref error) = self.error {
            return Err(Error::llm(error.clone()));
        }

        Ok(ChatCompletionResponse {
            id: "chatcmpl-mock".to_string(),
            model: "mock-vision".to_string(),
            choices: vec![Choice {
                index: 0,
                content: self.content.clone(),
                finish_reason: Some("Stop".to_string()),
            }],
            usage: Some(Usage {
                prompt_tokens: 12,
                completion_tokens: 4,
                total_tokens: 16,
            }),
        })
    }
}
