//! メニューモード: 起動時のゲーム選択画面

use std::str::FromStr;
use std::sync::Arc;

use super::{AppMode, GameScreenMode, Mode};
use crate::app::AppContext;
use crate::lottery::Credential;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use tracing::info;

/// メニューモード状態
pub struct MenuMode {
    ctx: Arc<AppContext>,
    selected: usize,
    /// ゲーム画面から戻ってきた場合に引き継ぐ API キー
    carried_credential: Option<Credential>,
}

impl MenuMode {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        let carried_credential = ctx.initial_credential.clone();
        Self { ctx, selected: 0, carried_credential }
    }

    /// ゲーム画面で保存されたキーを次のゲームへ引き継ぐ
    pub fn carrying(mut self, credential: Option<Credential>) -> Self {
        self.carried_credential = credential;
        self
    }

    /// 現在選択中のゲーム名
    pub fn selected_name(&self) -> &str {
        &self.ctx.catalog[self.selected].name
    }

    fn next(&mut self) {
        self.selected = (self.selected + 1) % self.ctx.catalog.len();
    }

    fn prev(&mut self) {
        let len = self.ctx.catalog.len();
        self.selected = (self.selected + len - 1) % len;
    }
}

impl Mode for MenuMode {
    fn update(&mut self) {
        // メニューには定期更新は不要
    }

    fn render(&self, f: &mut Frame) {
        let area = f.area();

        let block = Block::default()
            .title("Lotto Pick - Game Selection")
            .borders(Borders::ALL);
        f.render_widget(block, area);

        // コンテンツエリア（パディング考慮）
        let content_area = Rect {
            x: area.x + 2,
            y: area.y + 2,
            width: area.width.saturating_sub(4),
            height: area.height.saturating_sub(4),
        };

        let title = Paragraph::new("Select Game")
            .style(Style::default().fg(Color::Cyan).bold());
        f.render_widget(title, Rect { height: 2.min(content_area.height), ..content_area });

        let menu_start_y = content_area.y + 3;
        for (index, game) in self.ctx.catalog.iter().enumerate() {
            let y = menu_start_y + index as u16;
            if y >= content_area.y + content_area.height {
                break;
            }
            let is_selected = self.selected == index;
            let prefix = if is_selected { "▶ " } else { "  " };
            let accent = Color::from_str(&game.color).unwrap_or(Color::White);
            let line = Line::from(vec![
                Span::raw(prefix),
                Span::styled(format!("{:<8}", game.name), Style::default().fg(accent).bold()),
                Span::raw(format!(
                    "  {} of {}..={}  top prize {}",
                    game.result_num_count, game.min, game.max, game.win
                )),
            ]);
            let style = if is_selected {
                Style::default().bg(Color::Blue)
            } else {
                Style::default()
            };
            f.render_widget(
                Paragraph::new(line).style(style),
                Rect { x: content_area.x, y, width: content_area.width, height: 1 },
            );
        }

        // フッター（操作説明）
        let footer = Paragraph::new("↑/↓: Navigate | Enter: Play | Esc/q: Exit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(footer, Rect {
            x: area.x,
            y: area.height.saturating_sub(2),
            width: area.width,
            height: 1,
        });
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<AppMode>> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Ok(Some(AppMode::Exit)),
            KeyCode::Up | KeyCode::Char('k') => {
                self.prev();
                Ok(None)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.next();
                Ok(None)
            }
            KeyCode::Enter => {
                let game = self.ctx.catalog[self.selected].clone();
                info!(target: "app", game = %game.name, "menu: game selected");
                let screen = GameScreenMode::new(self.ctx.clone(), game, self.carried_credential.take())?;
                Ok(Some(AppMode::Game(screen)))
            }
            KeyCode::Esc | KeyCode::Char('q') => Ok(Some(AppMode::Exit)),
            _ => Ok(None),
        }
    }
}
