//! LlmClient trait definition

use async_trait::async_trait;

use super::{ChatRequest, ChatResponse, LlmError};

/// Stateless LLM client - each call is independent
///
/// This is the core abstraction the quality loop runs against. Each
/// completion request is a fresh conversation: the loop threads context
/// forward explicitly (research, gathered data, reviewer feedback) rather
/// than relying on provider-side conversation state.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single completion request (blocking until complete)
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, LlmError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock LLM client that replays scripted responses in order
    pub struct MockLlmClient {
        responses: Vec<ChatResponse>,
        call_count: AtomicUsize,
    }

    impl MockLlmClient {
        pub fn new(responses: Vec<ChatResponse>) -> Self {
            Self {
                responses,
                call_count: AtomicUsize::new(0),
            }
        }

        /// Convenience constructor from plain strings
        pub fn from_texts(texts: Vec<&str>) -> Self {
            Self::new(texts.into_iter().map(ChatResponse::text).collect())
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LlmClient for MockLlmClient {
        async fn complete(&self, _request: ChatRequest) -> Result<ChatResponse, LlmError> {
            let idx = self.call_count.fetch_add(1, Ordering::SeqCst);
            self.responses
                .get(idx)
                .cloned()
                .ok_or_else(|| LlmError::InvalidResponse("No more mock responses".to_string()))
        }
    }

    /// Mock client that fails every call, for error-path tests
    pub struct FailingLlmClient {
        call_count: AtomicUsize,
    }

    impl FailingLlmClient {
        pub fn new() -> Self {
            Self {
                call_count: AtomicUsize::new(0),
            }
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    impl Default for FailingLlmClient {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl LlmClient for FailingLlmClient {
        async fn complete(&self, _request: ChatRequest) -> Result<ChatResponse, LlmError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            Err(LlmError::ApiError {
                status: 500,
                message: "upstream unavailable".to_string(),
            })
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::llm::Message;

        fn request() -> ChatRequest {
            ChatRequest {
                system_prompt: "Test".to_string(),
                messages: vec![Message::user("Hello")],
                max_tokens: 100,
                temperature: 0.7,
            }
        }

        #[tokio::test]
        async fn test_mock_client_returns_responses_in_order() {
            let client = MockLlmClient::from_texts(vec!["Response 1", "Response 2"]);

            let resp1 = client.complete(request()).await.unwrap();
            assert_eq!(resp1.content.as_deref(), Some("Response 1"));

            let resp2 = client.complete(request()).await.unwrap();
            assert_eq!(resp2.content.as_deref(), Some("Response 2"));

            assert!(client.complete(request()).await.is_err());
            assert_eq!(client.call_count(), 3);
        }

        #[tokio::test]
        async fn test_failing_client_always_errors() {
            let client = FailingLlmClient::new();
            let err = client.complete(request()).await.unwrap_err();
            assert!(matches!(err, LlmError::ApiError { status: 500, .. }));
            assert_eq!(client.call_count(), 1);
        }
    }
}
