//! OpenAI連携のモジュール

pub mod client;
pub mod prompt;
pub mod request;
pub mod requester;
pub mod worker;

// 代表的な公開APIを再エクスポート
pub use client::{classify_openai_error, CompletionClient, CompletionRequest, OpenAiCompletionClient};
pub use prompt::{build_prompt, SYSTEM_INSTRUCTION};
pub use requester::{parse_suggestion, request_suggestion, request_suggestion_blocking, Suggestion};
pub use worker::{start_suggestion_worker, SuggestionOutcome};
