//! services/api/src/adapters/chat_llm.rs
//!
//! This module contains the adapter for the chat companion LLM.
//! It implements the `ChatCompanionService` port from the `core` crate.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use mindgarden_core::{
    domain::{ChatMessage, ChatRole},
    ports::{ChatCompanionService, PortError, PortResult},
};

/// The fixed persona. It forbids clinical and medical claims and keeps
/// replies at a conversational length; the handler returns whatever comes
/// back verbatim.
const SYSTEM_INSTRUCTIONS: &str = "You are a friendly, supportive wellness companion. \
Answer the user's questions WITHOUT ever mentioning medicines, psychiatrists, therapists, \
or medical treatments. If the user asks for medical advice, respond: \
\"I'm not able to give medical advice, but I can help with general tips or guidance.\" \
Focus only on general wellness, lifestyle, motivation, and safe advice. \
Keep replies warm and short: a few sentences, never a long essay.";

/// How many trailing history messages are forwarded with each turn.
const HISTORY_WINDOW: usize = 10;

const MAX_REPLY_TOKENS: u32 = 400;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `ChatCompanionService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiChatAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiChatAdapter {
    /// Creates a new `OpenAiChatAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }
}

//=========================================================================================
// `ChatCompanionService` Trait Implementation
//=========================================================================================

#[async_trait]
impl ChatCompanionService for OpenAiChatAdapter {
    /// Forwards the user's message plus a short rolling history and returns
    /// the provider's reply verbatim.
    async fn reply(&self, message: &str, history: &[ChatMessage]) -> PortResult<String> {
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::new();
        messages.push(
            ChatCompletionRequestSystemMessageArgs::default()
                .content(SYSTEM_INSTRUCTIONS)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        );

        let start = history.len().saturating_sub(HISTORY_WINDOW);
        for turn in &history[start..] {
            let msg = match turn.role {
                ChatRole::User => ChatCompletionRequestUserMessageArgs::default()
                    .content(turn.text.clone())
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?
                    .into(),
                ChatRole::Bot => ChatCompletionRequestAssistantMessageArgs::default()
                    .content(turn.text.clone())
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?
                    .into(),
            };
            messages.push(msg);
        }

        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(message.to_string())
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .max_completion_tokens(MAX_REPLY_TOKENS)
            .n(1)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        // Call the API and manually map the error if it occurs, which respects the orphan rule.
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        // Extract the text content from the first choice in the response.
        if let Some(choice) = response.choices.into_iter().next() {
            if let Some(content) = choice.message.content {
                Ok(content)
            } else {
                Err(PortError::Unexpected(
                    "Chat companion response contained no text content.".to_string(),
                ))
            }
        } else {
            Err(PortError::Unexpected(
                "Chat companion returned no choices in its response.".to_string(),
            ))
        }
    }
}
