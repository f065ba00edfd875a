use crate::{openai::ChatCompletion, ChatError, ChatResult};
use std::time::Instant;
use tracing::{field, info_span, Span};
use tracing_futures::Instrument;
use tracing_subscriber::{fmt, EnvFilter};

/// Span around one chat completion call. Fields are declared up front so
/// they can be filled in once the outcome is known.
#[derive(Clone)]
pub struct ChatSpan {
    span: Span,
    start_time: Instant,
}

impl ChatSpan {
    pub fn new(provider: &str, model_id: &str) -> Self {
        let span = info_span!(
            "llm_chat.generate",
            gen_ai.provider.name = provider,
            gen_ai.request.model = model_id,
            gen_ai.response.model = field::Empty,
            gen_ai.usage.input_tokens = field::Empty,
            gen_ai.usage.output_tokens = field::Empty,
            llm_chat.duration_secs = field::Empty,
            error.kind = field::Empty,
        );

        Self {
            span,
            start_time: Instant::now(),
        }
    }

    pub async fn instrument_future<F>(&self, future: F) -> F::Output
    where
        F: std::future::Future,
    {
        future.instrument(self.span.clone()).await
    }

    pub fn on_response(&self, response: &ChatCompletion) {
        if let Some(model) = &response.model {
            self.span.record("gen_ai.response.model", model.as_str());
        }
        if let Some(usage) = &response.usage {
            self.span
                .record("gen_ai.usage.input_tokens", usage.prompt_tokens);
            self.span
                .record("gen_ai.usage.output_tokens", usage.completion_tokens);
        }
        self.span.in_scope(|| {
            tracing::debug!(choices = response.choices.len(), "received chat completion");
        });
    }

    pub fn on_error(&self, error: &ChatError) {
        self.span.record("error.kind", error.kind());
        self.span.in_scope(|| {
            tracing::warn!(error = %error, "chat completion failed");
        });
    }

    pub fn on_end(&self) {
        self.span
            .record("llm_chat.duration_secs", self.start_time.elapsed().as_secs_f64());
    }
}

/// Run `f` inside a `llm_chat.generate` span. `f` gets a handle to the span
/// so it can record the response before converting it; any error it returns
/// is recorded on the span.
pub async fn trace_generate<T, F, Fut>(provider: &str, model_id: &str, f: F) -> ChatResult<T>
where
    F: FnOnce(ChatSpan) -> Fut,
    Fut: std::future::Future<Output = ChatResult<T>>,
{
    let span = ChatSpan::new(provider, model_id);
    let result = span.instrument_future(f(span.clone())).await;

    if let Err(error) = &result {
        span.on_error(error);
    }

    span.on_end();
    result
}

/// Install a `fmt` subscriber on stderr, filtered by `RUST_LOG` (default
/// `warn`). Stdout stays reserved for the model's reply.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // A subscriber may already be set, e.g. by a test harness.
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
