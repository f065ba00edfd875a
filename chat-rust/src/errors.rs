use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The request could not be sent or the connection failed before a
    /// response arrived (including timeouts).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The request returns a non-2xx status code
    #[error("Status error: {1} (Status {0})")]
    StatusCode(reqwest::StatusCode, String),
    /// The endpoint answered 2xx but the body is not a chat completion.
    #[error("Malformed response body: {0}")]
    MalformedBody(String),
    #[error("Invariant: no choices in response")]
    EmptyChoices,
    #[error("Invariant: first choice has no text content")]
    MissingContent,
    /// The model refused to answer. (e.g. `OpenAI` refusal)
    #[error("Refusal: {0}")]
    Refusal(String),
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChatError {
    /// Stable label used in log fields.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::Transport(_) => "transport",
            Self::StatusCode(..) => "status",
            Self::MalformedBody(_) => "malformed_body",
            Self::EmptyChoices => "empty_choices",
            Self::MissingContent => "missing_content",
            Self::Refusal(_) => "refusal",
            Self::Io(_) => "io",
        }
    }
}

pub type ChatResult<T> = Result<T, ChatError>;
