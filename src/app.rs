//! アプリケーション全体で共有する状態

use color_eyre::Result;

use crate::config::Config;
use crate::lottery::{catalog_from_config, Credential, Game, DEFAULT_CATALOG};

/// 各モードが参照する読み取り専用コンテキスト
#[derive(Debug, Clone)]
pub struct AppContext {
    /// アプリケーション設定
    pub config: Config,
    /// 選択可能なゲーム一覧（空にはならない）
    pub catalog: Vec<Game>,
    /// 起動時に環境から与えられた API キー（メモリ上のみ）
    pub initial_credential: Option<Credential>,
}

impl AppContext {
    /// 設定からカタログを読み込んでコンテキストを作成
    pub fn from_config(config: Config) -> Result<Self> {
        let catalog = catalog_from_config(&config)?;
        Ok(Self { config, catalog, initial_credential: None })
    }

    /// `OPENAI_API_KEY` が設定されていれば初期キーとして保持する
    pub fn with_env_credential(mut self) -> Self {
        self.initial_credential = std::env::var("OPENAI_API_KEY")
            .ok()
            .map(Credential::new)
            .filter(|c| !c.is_blank());
        self
    }

    /// カタログ内で `name` の次のゲーム（末尾なら先頭に戻る）
    pub fn next_game(&self, name: &str) -> &Game {
        let idx = self.catalog.iter().position(|g| g.name == name).map_or(0, |i| i + 1);
        &self.catalog[idx % self.catalog.len()]
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self {
            config: Config::default(),
            catalog: DEFAULT_CATALOG.clone(),
            initial_credential: None,
        }
    }
}
