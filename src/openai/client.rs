//! Text-completion collaborator.
//!
//! `CompletionClient` is the seam between the suggestion requester and the network.
//! The production implementation talks to OpenAI through `async-openai`; tests
//! substitute canned clients.

use std::future::Future;
use std::time::Duration;

use async_openai::config::OpenAIConfig as ApiConfig;
use async_openai::error::{ApiError, OpenAIError};
use async_openai::Client;
use color_eyre::Result;
use reqwest::StatusCode;
use tracing::{debug, info, instrument};

use crate::config::Config;
use crate::error::SuggestionError;
use crate::lottery::Credential;

use super::request::build_chat_request;

/// One system + user exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
}

pub trait CompletionClient {
    /// Returns the assistant's text. Failures are already classified as
    /// `Auth` (key rejected) or `Request` (everything else); an absent
    /// message body is a `Parse` failure.
    fn complete(
        &self,
        credential: &Credential,
        request: &CompletionRequest,
    ) -> impl Future<Output = std::result::Result<String, SuggestionError>> + Send;
}

/// OpenAI chat completions. A fresh API client is built per call so the key
/// only lives as long as the request.
#[derive(Debug, Clone)]
pub struct OpenAiCompletionClient {
    http: reqwest::Client,
    api_base: Option<String>,
}

impl OpenAiCompletionClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self { http, api_base: config.api_base.clone() })
    }

    fn api_client(&self, credential: &Credential) -> Client<ApiConfig> {
        let mut api_config = ApiConfig::new().with_api_key(credential.expose());
        if let Some(base) = &self.api_base {
            api_config = api_config.with_api_base(base);
        }
        Client::with_config(api_config).with_http_client(self.http.clone())
    }
}

impl CompletionClient for OpenAiCompletionClient {
    #[instrument(name = "openai_complete", skip_all, fields(model = %request.model))]
    async fn complete(
        &self,
        credential: &Credential,
        request: &CompletionRequest,
    ) -> std::result::Result<String, SuggestionError> {
        let req = build_chat_request(request).map_err(classify_openai_error)?;
        info!(target: "openai", "chat_request: model={}, max_tokens={}", request.model, request.max_tokens);

        let resp = self
            .api_client(credential)
            .chat()
            .create(req)
            .await
            .map_err(classify_openai_error)?;
        debug!(target: "openai", "chat_response_choices: {}", resp.choices.len());

        resp.choices
            .first()
            .and_then(|c| c.message.content.clone())
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| SuggestionError::Parse("the model returned an empty answer".to_string()))
    }
}

/// Maps SDK failures onto the suggestion taxonomy.
pub fn classify_openai_error(err: OpenAIError) -> SuggestionError {
    match err {
        OpenAIError::ApiError(api) if is_key_rejection(&api) => SuggestionError::Auth(api.message),
        OpenAIError::ApiError(api) => SuggestionError::Request(api.message),
        OpenAIError::Reqwest(e) if e.status() == Some(StatusCode::UNAUTHORIZED) => {
            SuggestionError::Auth(e.to_string())
        }
        OpenAIError::Reqwest(e) if e.is_timeout() => {
            SuggestionError::Request(format!("OpenAI did not answer in time: {e}"))
        }
        other => SuggestionError::Request(other.to_string()),
    }
}

// The SDK drops the HTTP status of API errors, so 401s are recognized by their body.
fn is_key_rejection(api: &ApiError) -> bool {
    api.code.as_deref() == Some("invalid_api_key")
        || api.r#type.as_deref() == Some("authentication_error")
        || api.message.contains("Incorrect API key")
        || api.message.contains("provide an API key")
}
