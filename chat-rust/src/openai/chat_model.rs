use super::api::{ChatCompletion, ChatCompletionCreateParams, ChatCompletionMessageParam};
use crate::{
    client_utils,
    config::{ChatConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS},
    telemetry, ChatError, ChatResult,
};
use reqwest::{
    header::{self, HeaderMap, HeaderName, HeaderValue},
    Client, Url,
};
use std::{collections::HashMap, time::Duration};

const PROVIDER: &str = "openai-compatible";

/// A chat completion endpoint that speaks the `OpenAI` wire format.
pub struct OpenAIChatModel {
    model_id: String,
    api_key: String,
    base_url: String,
    client: Client,
    headers: HashMap<String, String>,
}

#[derive(Clone, Default)]
pub struct OpenAIChatModelOptions {
    pub base_url: Option<String>,
    pub api_key: String,
    pub headers: Option<HashMap<String, String>>,
    /// Ignored when `client` is given.
    pub timeout: Option<Duration>,
    pub client: Option<Client>,
}

impl OpenAIChatModel {
    pub fn new(model_id: impl Into<String>, options: OpenAIChatModelOptions) -> ChatResult<Self> {
        let OpenAIChatModelOptions {
            base_url,
            api_key,
            headers,
            timeout,
            client,
        } = options;

        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        validate_base_url(&base_url)?;
        let client = match client {
            Some(client) => client,
            None => Client::builder()
                .timeout(timeout.unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)))
                .build()?,
        };
        let headers = headers.unwrap_or_default();

        Ok(Self {
            model_id: model_id.into(),
            api_key,
            base_url,
            client,
            headers,
        })
    }

    pub fn from_config(config: &ChatConfig) -> ChatResult<Self> {
        config.validate()?;

        Self::new(
            config.model.clone(),
            OpenAIChatModelOptions {
                base_url: Some(config.base_url.clone()),
                api_key: config.api_key.clone(),
                timeout: Some(config.timeout),
                ..Default::default()
            },
        )
    }

    #[must_use]
    pub fn provider(&self) -> &'static str {
        PROVIDER
    }

    #[must_use]
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_headers(&self) -> ChatResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        let auth_header =
            HeaderValue::from_str(&format!("Bearer {}", self.api_key)).map_err(|error| {
                ChatError::InvalidInput(format!("Invalid API key header value: {error}"))
            })?;
        headers.insert(header::AUTHORIZATION, auth_header);

        for (key, value) in &self.headers {
            let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|error| {
                ChatError::InvalidInput(format!("Invalid header name '{key}': {error}"))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|error| {
                ChatError::InvalidInput(format!("Invalid header value for '{key}': {error}"))
            })?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }

    async fn send(&self, params: &ChatCompletionCreateParams) -> ChatResult<ChatCompletion> {
        let headers = self.request_headers()?;

        client_utils::send_json::<_, ChatCompletion>(
            &self.client,
            &format!("{}/chat/completions", self.base_url),
            params,
            headers,
        )
        .await
    }

    /// Send one chat completion request and return the decoded response
    /// as-is, however many choices it holds.
    pub async fn create(&self, params: &ChatCompletionCreateParams) -> ChatResult<ChatCompletion> {
        telemetry::trace_generate(self.provider(), &params.model, |span| async move {
            let response = self.send(params).await?;
            span.on_response(&response);
            Ok(response)
        })
        .await
    }

    /// Send `messages` and return the text of the first choice.
    pub async fn generate_reply(
        &self,
        messages: Vec<ChatCompletionMessageParam>,
    ) -> ChatResult<String> {
        let params = ChatCompletionCreateParams {
            model: self.model_id.clone(),
            messages,
        };

        telemetry::trace_generate(self.provider(), &self.model_id, |span| async move {
            let response = self.send(&params).await?;
            span.on_response(&response);
            first_choice_text(response)
        })
        .await
    }

    /// Ask for a reply to a single user message.
    pub async fn generate_text(&self, prompt: &str) -> ChatResult<String> {
        self.generate_reply(vec![ChatCompletionMessageParam::user(prompt)])
            .await
    }
}

fn validate_base_url(base_url: &str) -> ChatResult<()> {
    let url = Url::parse(base_url).map_err(|error| {
        ChatError::InvalidInput(format!("Invalid base URL '{base_url}': {error}"))
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ChatError::InvalidInput(format!(
            "Invalid base URL '{base_url}': unsupported scheme '{scheme}'"
        ))),
    }
}

fn first_choice_text(response: ChatCompletion) -> ChatResult<String> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(ChatError::EmptyChoices)?;

    let message = choice.message;

    match message.content {
        Some(content) => Ok(content),
        None => match message.refusal {
            Some(refusal) if !refusal.is_empty() => Err(ChatError::Refusal(refusal)),
            _ => Err(ChatError::MissingContent),
        },
    }
}
