use super::gemini_types::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};
use super::{GenerationError, TextGenerator};
use crate::credential::ApiCredential;

/// Blocking HTTP client for the Generative Language API.
///
/// Sends exactly one `generateContent` call per `generate`; failures are
/// classified and returned, never retried. The underlying blocking HTTP
/// client is built per call so it is created and dropped on the calling
/// (blocking) thread.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    base_url: String,
    model: String,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            timeout_secs,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    fn http_client(&self) -> Result<reqwest::blocking::Client, GenerationError> {
        reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| GenerationError::Transport(format!("Failed to create HTTP client: {e}")))
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, credential: &ApiCredential, request: &str) -> Result<String, GenerationError> {
        let url = self.endpoint();
        let body = GenerateContentRequest::single_prompt(request);

        tracing::info!(model = %self.model, request_chars = request.chars().count(), "Sending generation request");

        let response = self
            .http_client()?
            .post(&url)
            .header("x-goog-api-key", credential.expose())
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    GenerationError::Transport(format!("cannot connect to {}", self.base_url))
                } else if e.is_timeout() {
                    GenerationError::Transport(format!(
                        "request timed out after {}s",
                        self.timeout_secs
                    ))
                } else {
                    GenerationError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| GenerationError::ResponseParsing(e.to_string()))?;

        if !status.is_success() {
            let err = classify_failure(status.as_u16(), &text);
            tracing::warn!(status = status.as_u16(), error = %err, "Generation request failed");
            return Err(err);
        }

        let report = parse_response(&text)?;
        tracing::info!(report_chars = report.chars().count(), "Generation complete");
        Ok(report)
    }
}

/// Map a non-success HTTP response onto the error taxonomy, keeping the
/// backend's own message verbatim.
pub fn classify_failure(status: u16, body: &str) -> GenerationError {
    let (message, api_status) = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => (envelope.error.message, envelope.error.status),
        Err(_) => (body.trim().to_string(), None),
    };
    let api_status = api_status.unwrap_or_default();

    match status {
        401 | 403 => GenerationError::Authentication { status, message },
        400 if api_status == "INVALID_ARGUMENT" && message.contains("API key") => {
            GenerationError::Authentication { status, message }
        }
        429 => GenerationError::Quota { message },
        _ if api_status == "RESOURCE_EXHAUSTED" => GenerationError::Quota { message },
        500..=599 => GenerationError::Unavailable { status, message },
        _ => GenerationError::Backend { status, message },
    }
}

/// Extract the report text from a successful response body.
pub fn parse_response(body: &str) -> Result<String, GenerationError> {
    let parsed: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| GenerationError::ResponseParsing(e.to_string()))?;

    if let Some(reason) = parsed.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(GenerationError::ContentBlocked(format!("prompt blocked: {reason}")));
    }

    let candidate = parsed
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| GenerationError::ContentBlocked("no candidates returned".into()))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate
            .finish_reason
            .unwrap_or_else(|| "empty response".to_string());
        return Err(GenerationError::ContentBlocked(reason));
    }

    Ok(text)
}
