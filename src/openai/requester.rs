//! AI suggestion: prompt in, validated numbers and reason out.

use serde::Deserialize;
use tokio::runtime::Runtime;
use tracing::{debug, info, instrument};

use crate::config::Config;
use crate::error::SuggestionError;
use crate::lottery::{Credential, Game};

use super::client::{CompletionClient, CompletionRequest};
use super::prompt::{build_prompt, SYSTEM_INSTRUCTION};

/// Numbers and rationale returned by the model.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Suggestion {
    pub reason: String,
    pub numbers: Vec<u32>,
}

/// Asks the model for a set of numbers for `game`.
///
/// An absent or blank credential fails before any network traffic.
#[instrument(name = "request_suggestion", skip_all, fields(game = %game.name))]
pub async fn request_suggestion<C: CompletionClient>(
    client: &C,
    game: &Game,
    credential: Option<&Credential>,
    config: &Config,
) -> Result<Suggestion, SuggestionError> {
    let credential = match credential {
        Some(c) if !c.is_blank() => c,
        _ => return Err(SuggestionError::MissingCredential),
    };
    let request = CompletionRequest {
        model: config.model.clone(),
        system: SYSTEM_INSTRUCTION.to_string(),
        user: build_prompt(game),
        max_tokens: config.max_tokens,
    };
    debug!(target: "openai", prompt = %request.user, "suggestion_prompt");

    let text = client.complete(credential, &request).await?;
    info!(target: "openai", "suggestion_response: {}", text);
    parse_suggestion(&text, game)
}

/// ランタイムを内部で作成してブロッキングで1回の提案を取得するヘルパー
pub fn request_suggestion_blocking<C: CompletionClient>(
    client: &C,
    game: &Game,
    credential: Option<&Credential>,
    config: &Config,
) -> Result<Suggestion, SuggestionError> {
    let rt = Runtime::new()
        .map_err(|e| SuggestionError::Request(format!("could not start async runtime: {e}")))?;
    rt.block_on(request_suggestion(client, game, credential, config))
}

/// Parses the model text into a `Suggestion` and checks it against `game`.
///
/// The text must be a JSON object with `reason` (string) and `numbers`
/// (array of non-negative integers), optionally inside a markdown code fence.
pub fn parse_suggestion(text: &str, game: &Game) -> Result<Suggestion, SuggestionError> {
    let body = strip_code_fence(text);
    let suggestion: Suggestion = serde_json::from_str(body)
        .map_err(|e| SuggestionError::Parse(format!("{e} in {body:?}")))?;
    game.check_draw(&suggestion.numbers).map_err(SuggestionError::Parse)?;
    Ok(suggestion)
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    // language tag such as "json", with or without a newline after it
    rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()).trim()
}
