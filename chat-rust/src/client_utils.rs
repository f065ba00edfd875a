use crate::ChatError;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};

/// Create a JSON request, parse the response.
/// Throws error on non-2xx status code, and on a 2xx body that does not
/// decode into `R`.
pub async fn send_json<T: Serialize, R: DeserializeOwned>(
    client: &Client,
    url: &str,
    data: &T,
    headers: reqwest::header::HeaderMap,
) -> Result<R, ChatError> {
    let response = client.post(url).headers(headers).json(data).send().await?;
    let status = response.status();

    if !status.is_success() {
        return Err(ChatError::StatusCode(
            status,
            response.text().await.unwrap_or_default(),
        ));
    }

    let body = response.text().await?;
    tracing::debug!(%url, body = %body, "raw chat completion response");
    serde_json::from_str::<R>(&body).map_err(|error| ChatError::MalformedBody(error.to_string()))
}
