//! The chat-completion backend seam.
//!
//! Technique operations speak [ChatMsg]/[CompletionRequest]/[Completion] only, so the
//! remote service stays an opaque collaborator behind the [Complete] trait. The stock
//! implementation is [OpenAiBackend], backed by `async_openai`; tests substitute their
//! own scripted implementations.

use anyhow::Result;
use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::PlaygroundConfig;

/// Role tag of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role-tagged message of a completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMsg {
    pub role: Role,
    pub content: String,
}

impl ChatMsg {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// One chat-completion round trip, as the operations describe it.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub temperature: Option<f32>,
    pub messages: Vec<ChatMsg>,
}

/// Generated text plus usage accounting extracted from a backend response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub total_tokens: u32,
}

/// A chat-completion backend. Implementations must be thread-safe; anything that can
/// turn a message sequence into text plus token usage qualifies, including test
/// doubles.
#[async_trait]
pub trait Complete: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion>;
}

/// Blanket impl of Complete for Arc, so one backend handle can be shared.
#[async_trait]
impl<T: Complete + ?Sized> Complete for std::sync::Arc<T> {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion> {
        (**self).complete(request).await
    }
}

/// Stock backend talking to an OpenAI-compatible chat API.
pub struct OpenAiBackend {
    client: Client<OpenAIConfig>,
}

impl OpenAiBackend {
    /// Build a backend from the playground configuration. A missing API key defers
    /// to `async_openai`'s environment lookup (`OPENAI_API_KEY`).
    pub fn from_config(config: &PlaygroundConfig) -> Self {
        let mut openai_config = OpenAIConfig::new();
        if let Some(api_key) = &config.api_key {
            openai_config = openai_config.with_api_key(api_key);
        }
        if let Some(api_base) = &config.api_base {
            openai_config = openai_config.with_api_base(api_base.as_str().trim_end_matches('/'));
        }
        Self { client: Client::with_config(openai_config) }
    }
}

fn to_openai_message(msg: &ChatMsg) -> Result<ChatCompletionRequestMessage> {
    let message = match msg.role {
        Role::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(msg.content.as_str())
            .build()?
            .into(),
        Role::User => ChatCompletionRequestUserMessageArgs::default()
            .content(msg.content.as_str())
            .build()?
            .into(),
        Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(msg.content.as_str())
            .build()?
            .into(),
    };
    Ok(message)
}

#[async_trait]
impl Complete for OpenAiBackend {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion> {
        let messages = request.messages.iter()
            .map(to_openai_message)
            .collect::<Result<Vec<_>>>()?;
        let mut request_args = CreateChatCompletionRequestArgs::default();
        request_args.model(&request.model).messages(messages);
        if let Some(temperature) = request.temperature {
            request_args.temperature(temperature);
        }
        let response = self.client.chat().create(request_args.build()?).await?;
        let text = response.choices.into_iter().next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();
        let total_tokens = response.usage.map_or(0, |usage| usage.total_tokens);
        Ok(Completion { text, total_tokens })
    }
}

#[cfg(test)]
mod test_backend {
    use super::*;

    #[test]
    fn test_msg_constructors() {
        assert_eq!(ChatMsg { role: Role::System, content: "a".to_string() }, ChatMsg::system("a"));
        assert_eq!(ChatMsg { role: Role::User, content: "b".to_string() }, ChatMsg::user("b"));
        assert_eq!(ChatMsg { role: Role::Assistant, content: "c".to_string() }, ChatMsg::assistant("c"));
    }

    #[test]
    fn test_role_serialization() {
        let msg = ChatMsg::user("hi");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!("user", json["role"]);
        assert_eq!("hi", json["content"]);
    }

    #[test]
    fn test_message_conversion() {
        for msg in [ChatMsg::system("s"), ChatMsg::user("u"), ChatMsg::assistant("a")] {
            to_openai_message(&msg).unwrap();
        }
    }
}
