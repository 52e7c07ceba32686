//! アプリケーション設定

use std::path::PathBuf;

/// アプリケーション設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// OpenAI APIモデル名
    pub model: String,
    /// 最大トークン数
    pub max_tokens: u32,
    /// イベントポーリング間隔（ミリ秒）
    pub poll_interval_ms: u64,
    /// OpenAI 呼び出しのタイムアウト（秒）
    pub request_timeout_secs: u64,
    /// API ベースURL（未指定なら公式エンドポイント）
    pub api_base: Option<String>,
    /// ゲームカタログ JSON のパス（未指定なら組み込みカタログ）
    pub catalog_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            // NOTE: Keep in sync with tests (tests/config_tests.rs).
            max_tokens: 256,
            poll_interval_ms: 100,
            request_timeout_secs: 60,
            api_base: None,
            catalog_path: None,
        }
    }
}

impl Config {
    /// 新しい設定インスタンスを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 環境変数から設定を読み込む（未設定・不正値はデフォルトのまま）
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意のキー検索関数から設定を構築する
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(model) = lookup("LOTTO_MODEL").filter(|m| !m.trim().is_empty()) {
            config.model = model.trim().to_string();
        }
        if let Some(v) = lookup("LOTTO_MAX_TOKENS").and_then(|v| v.trim().parse().ok()) {
            config.max_tokens = v;
        }
        if let Some(v) = lookup("LOTTO_POLL_INTERVAL_MS").and_then(|v| v.trim().parse().ok()) {
            config.poll_interval_ms = v;
        }
        if let Some(v) = lookup("LOTTO_REQUEST_TIMEOUT_SECS").and_then(|v| v.trim().parse().ok()) {
            config.request_timeout_secs = v;
        }
        config.api_base = lookup("OPENAI_BASE_URL").filter(|v| !v.trim().is_empty());
        config.catalog_path = lookup("LOTTO_CATALOG")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        config
    }
}
