use serde::{Deserialize, Serialize};

// https://platform.openai.com/docs/api-reference/chat

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChatCompletionCreateParams {
    /// Model ID used to generate the response, like `gpt-4.1-nano`.
    /// Compatible endpoints accept their own identifiers here.
    pub model: String,

    /// A list of messages comprising the conversation so far.
    pub messages: Vec<ChatCompletionMessageParam>,
}

/// A message in the conversation sent to the model. The `role` field
/// selects the variant on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum ChatCompletionMessageParam {
    System(ChatCompletionTextMessageParam),
    User(ChatCompletionTextMessageParam),
}

impl ChatCompletionMessageParam {
    pub fn user(content: impl Into<String>) -> Self {
        Self::User(ChatCompletionTextMessageParam {
            content: content.into(),
        })
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::System(ChatCompletionTextMessageParam {
            content: content.into(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCompletionTextMessageParam {
    /// The contents of the message.
    pub content: String,
}

/// Represents a chat completion response returned by model, based on the
/// provided input.
///
/// Only `choices` is required; OpenAI-compatible services routinely leave
/// the rest out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletion {
    /// A unique identifier for the chat completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The object type, which is always `chat.completion`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,

    /// The Unix timestamp (in seconds) of when the chat completion was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,

    /// The model used for the chat completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// A list of chat completion choices. Can be more than one if `n` is
    /// greater than 1, and may be empty on some endpoints.
    pub choices: Vec<ChatCompletionChoice>,

    /// Usage statistics for the completion request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<CompletionUsage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionChoice {
    /// The index of the choice in the list of choices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,

    /// A chat completion message generated by the model.
    pub message: ChatCompletionMessage,

    /// The reason the model stopped generating tokens (`stop`, `length`,
    /// `content_filter`, ...). Kept as a string since compatible services
    /// add their own values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// A chat completion message generated by the model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatCompletionMessage {
    /// The role of the author of this message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// The contents of the message.
    #[serde(default)]
    pub content: Option<String>,

    /// The refusal message generated by the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refusal: Option<String>,
}

/// Usage statistics for the completion request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionUsage {
    /// Number of tokens in the prompt.
    #[serde(default)]
    pub prompt_tokens: u32,

    /// Number of tokens in the generated completion.
    #[serde(default)]
    pub completion_tokens: u32,

    /// Total number of tokens used in the request (prompt + completion).
    #[serde(default)]
    pub total_tokens: u32,
}
