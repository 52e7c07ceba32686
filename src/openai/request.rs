use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequest,
    CreateChatCompletionRequestArgs,
};
use tracing::debug;

use super::client::CompletionRequest;

/// トークン制限戦略を表現する列挙型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenLimitStrategy {
    /// `max_tokens` を使用（3.5 / 4 系のチャットモデル向け）
    MaxTokens,
    /// `max_completion_tokens` を使用（5系・o系の推論モデル向け）
    MaxCompletionTokens,
}

/// モデル名からトークン制限戦略を判定する
pub fn determine_token_limit_strategy(model: &str) -> TokenLimitStrategy {
    let reasoning = model.starts_with("gpt-5")
        || (model.starts_with('o') && model[1..].starts_with(|c: char| c.is_ascii_digit()));
    let strategy = if reasoning {
        TokenLimitStrategy::MaxCompletionTokens
    } else {
        TokenLimitStrategy::MaxTokens
    };
    debug!(target: "openai", model = %model, ?strategy, "token_limit_strategy");
    strategy
}

/// system + user の2メッセージで ChatCompletion リクエストを構築する
pub fn build_chat_request(request: &CompletionRequest) -> Result<CreateChatCompletionRequest, OpenAIError> {
    let system = ChatCompletionRequestSystemMessageArgs::default()
        .content(request.system.as_str())
        .build()?;
    let user = ChatCompletionRequestUserMessageArgs::default()
        .content(request.user.as_str())
        .build()?;

    let messages: Vec<ChatCompletionRequestMessage> = vec![system.into(), user.into()];

    let mut builder = CreateChatCompletionRequestArgs::default();
    builder.model(&request.model).messages(messages);

    let req = match determine_token_limit_strategy(&request.model) {
        TokenLimitStrategy::MaxTokens => builder.max_tokens(request.max_tokens).build()?,
        TokenLimitStrategy::MaxCompletionTokens => {
            builder.max_completion_tokens(request.max_tokens).build()?
        }
    };
    Ok(req)
}
