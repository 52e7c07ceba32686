//! ライブラリ層の型付きエラー

use thiserror::Error;

/// 乱数生成の失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("invalid bounds: min {min} is greater than max {max}")]
    InvalidBounds { min: u32, max: u32 },
    #[error("at least one number must be drawn")]
    InvalidCount,
    #[error("cannot draw {count} distinct numbers between {min} and {max}")]
    Impossible { min: u32, max: u32, count: usize },
    #[error("cannot draw {count} numbers at once (limit {limit})")]
    TooMany { count: usize, limit: usize },
}

/// AI 提案リクエストの失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuggestionError {
    #[error("Please enter your OpenAI API Key")]
    MissingCredential,
    #[error("OpenAI rejected the API key: {0}")]
    Auth(String),
    #[error("could not read the suggestion: {0}")]
    Parse(String),
    #[error("suggestion request failed: {0}")]
    Request(String),
}

impl SuggestionError {
    /// 保持している API キーを破棄すべき失敗かどうか
    pub fn resets_credential(&self) -> bool {
        matches!(self, SuggestionError::MissingCredential | SuggestionError::Auth(_))
    }
}
