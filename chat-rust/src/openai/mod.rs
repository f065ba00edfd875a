mod api;
mod chat_model;

pub use api::{
    ChatCompletion, ChatCompletionChoice, ChatCompletionCreateParams, ChatCompletionMessage,
    ChatCompletionMessageParam, ChatCompletionTextMessageParam, CompletionUsage,
};
pub use chat_model::{OpenAIChatModel, OpenAIChatModelOptions};
