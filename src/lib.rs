//! lotto_pick
//!
//! 宝くじ番号をローカルの乱数、または OpenAI による推測で生成し、
//! 結果を一覧表示するターミナルアプリ。

pub mod app;
pub mod config;
pub mod error;
pub mod lottery;
pub mod modes; // Mode system for the menu and the game screen
pub mod openai;

pub use app::AppContext;
pub use config::Config;
pub use error::{GenerationError, SuggestionError};

use color_eyre::Result;
use crossterm::event::{self as crossterm_event, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use std::sync::Arc;
use std::time::Duration;

// Ensure .env is loaded for tests before anything else runs in the test process.
#[cfg(test)]
#[ctor::ctor]
fn load_dotenv_for_tests() {
    let _ = dotenvy::dotenv();
}

/// アプリケーションのメインループを実行
pub fn run(mut terminal: DefaultTerminal, ctx: Arc<AppContext>) -> Result<()> {
    let poll_interval = Duration::from_millis(ctx.config.poll_interval_ms);
    let mut current_mode = modes::AppMode::Menu(modes::MenuMode::new(ctx.clone()));

    loop {
        // 現在のモードで更新処理を実行
        current_mode.update();

        // 画面を描画
        terminal.draw(|f| current_mode.render(f))?;

        if crossterm_event::poll(poll_interval)? {
            match crossterm_event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match current_mode.handle_key(key) {
                        Ok(Some(next_mode)) => {
                            // モード遷移またはExit
                            if matches!(next_mode, modes::AppMode::Exit) {
                                break;
                            }
                            current_mode = next_mode;
                        }
                        Ok(None) => {
                            // 同じモード継続
                        }
                        Err(e) => {
                            // エラーが発生した場合はメニューに戻す
                            tracing::error!("Error in mode: {:?}", e);
                            current_mode = modes::AppMode::Menu(modes::MenuMode::new(ctx.clone()));
                        }
                    }
                }
                Event::Resize(_, _) => {
                    // 次ループで再描画されるので特別な処理なし
                }
                _ => {}
            }
        }
    }
    Ok(())
}
