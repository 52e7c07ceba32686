//! ゲーム画面モード: 乱数生成 / AI 提案 / 結果一覧

use std::str::FromStr;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use super::{AppMode, MenuMode, Mode};
use crate::app::AppContext;
use crate::lottery::{Credential, DrawSource, Game, Session, SuggestionTicket};
use crate::openai::{start_suggestion_worker, CompletionClient, OpenAiCompletionClient, SuggestionOutcome};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::Stylize,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};
use tracing::{info, warn};

/// 画面下部に表示する通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
}

/// ゲーム画面モード状態
pub struct GameScreenMode {
    ctx: Arc<AppContext>,
    /// 台帳・キー・処理中フラグの唯一の持ち主
    session: Session,
    /// キー入力中のバッファ（None なら通常操作）
    key_input: Option<String>,
    notice: Option<Notice>,
    /// 提案チケット送信用チャンネル
    tx: Sender<SuggestionTicket>,
    /// 提案結果受信用チャンネル
    rx: Receiver<SuggestionOutcome>,
}

impl GameScreenMode {
    /// OpenAI クライアント付きでゲーム画面を作成
    pub fn new(ctx: Arc<AppContext>, game: Game, credential: Option<Credential>) -> Result<Self> {
        let client = OpenAiCompletionClient::new(&ctx.config)?;
        Ok(Self::with_client(ctx, game, credential, client))
    }

    /// 任意のクライアントでゲーム画面を作成
    pub fn with_client<C>(ctx: Arc<AppContext>, game: Game, credential: Option<Credential>, client: C) -> Self
    where
        C: CompletionClient + Send + 'static,
    {
        let (tx_ticket, rx_ticket) = mpsc::channel::<SuggestionTicket>();
        let (tx_outcome, rx_outcome) = mpsc::channel::<SuggestionOutcome>();

        // 提案ワーカーをバックグラウンドで開始
        start_suggestion_worker(client, rx_ticket, tx_outcome, ctx.config.clone());

        Self {
            session: Session::new(game).with_credential(credential),
            ctx,
            key_input: None,
            notice: None,
            tx: tx_ticket,
            rx: rx_outcome,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_editing_key(&self) -> bool {
        self.key_input.is_some()
    }

    fn info(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice { text: text.into(), is_error: false });
    }

    fn error(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice { text: text.into(), is_error: true });
    }

    fn generate_random(&mut self) {
        match self.session.generate_random().map(|r| r.numbers().to_vec()) {
            Ok(numbers) => {
                info!(target: "app", ?numbers, "random generated");
                let msg = format!("Random numbers generated ({} total)", self.session.results().len());
                self.info(msg);
            }
            Err(e) => self.error(e.to_string()),
        }
    }

    /// AI 提案を開始（処理中なら無視）
    fn request_suggestion(&mut self) {
        match self.session.begin_suggestion() {
            Ok(Some(ticket)) => {
                let id = ticket.id();
                if self.tx.send(ticket).is_err() {
                    // ワーカーが終了している
                    let e = crate::SuggestionError::Request("suggestion worker is not running".into());
                    let _ = self.session.finish_suggestion(id, Err(e.clone()));
                    self.error(e.to_string());
                } else {
                    self.info("Asking the AI...");
                }
            }
            Ok(None) => self.info("Already processing a suggestion"),
            Err(e) => self.error(e.to_string()),
        }
    }

    /// AI 回答をチェックして台帳に反映
    pub fn check_ai_response(&mut self) {
        while let Ok(outcome) = self.rx.try_recv() {
            match self.session.finish_suggestion(outcome.ticket_id, outcome.result) {
                Ok(Some(_)) => self.info("AI suggestion added"),
                Ok(None) => {}
                Err(e) => {
                    warn!(target: "app", error = %e, "suggestion failed");
                    self.error(e.to_string());
                }
            }
        }
    }

    fn handle_key_entry(&mut self, key: KeyEvent) {
        let Some(buf) = self.key_input.as_mut() else { return };
        match key.code {
            KeyCode::Esc => {
                self.key_input = None;
                self.info("Key entry cancelled");
            }
            KeyCode::Enter => match Credential::from_input(buf) {
                Some(c) => {
                    self.key_input = None;
                    self.session.set_credential(c);
                    self.info("API key saved for this session");
                }
                None => self.error("API key looks too short"),
            },
            KeyCode::Backspace => {
                buf.pop();
            }
            KeyCode::Char(ch) => buf.push(ch),
            _ => {}
        }
    }
}

impl Mode for GameScreenMode {
    fn update(&mut self) {
        // AI回答の非ブロッキングチェック
        self.check_ai_response();
    }

    fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // タイトル + 賞金
                Constraint::Length(4), // AI / 乱数
                Constraint::Min(5),    // 結果一覧
                Constraint::Length(1), // 通知
                Constraint::Length(1), // 操作説明
            ])
            .split(f.area());

        self.render_title(f, chunks[0]);
        self.render_actions(f, chunks[1]);
        self.render_results(f, chunks[2]);
        self.render_notice(f, chunks[3]);
        self.render_footer(f, chunks[4]);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<AppMode>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(AppMode::Exit));
        }
        if self.key_input.is_some() {
            self.handle_key_entry(key);
            return Ok(None);
        }
        match key.code {
            KeyCode::Esc => {
                info!(target: "app", "game screen: returning to menu");
                let menu = MenuMode::new(self.ctx.clone()).carrying(self.session.credential().cloned());
                return Ok(Some(AppMode::Menu(menu)));
            }
            KeyCode::Char('g') => self.generate_random(),
            KeyCode::Char('a') => self.request_suggestion(),
            KeyCode::Char('k') => {
                self.key_input = Some(String::new());
                self.info("Type your OpenAI API key, Enter to save, Esc to cancel");
            }
            KeyCode::Char('x') => {
                self.session.clear_credential();
                self.info("API key cleared");
            }
            KeyCode::Char('c') => {
                self.session.clear_results();
                self.info("Results cleared");
            }
            KeyCode::Tab => {
                let next = self.ctx.next_game(&self.session.game().name).clone();
                let name = next.name.clone();
                self.session.select_game(next);
                self.info(format!("Switched to {name}"));
            }
            _ => {}
        }
        Ok(None)
    }
}

// ===== Private render methods =====

impl GameScreenMode {
    fn accent(&self) -> Color {
        Color::from_str(&self.session.game().color).unwrap_or(Color::White)
    }

    fn render_title(&self, f: &mut Frame, area: Rect) {
        let game = self.session.game();
        let line = Line::from(vec![
            Span::styled(game.name.clone(), Style::default().fg(self.accent()).bold()),
            Span::raw(format!("   {} numbers, {}..={}   ", game.result_num_count, game.min, game.max)),
            Span::raw("Top Prize: "),
            Span::styled(game.win.clone(), Style::default().fg(self.accent())),
        ]);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded);
        f.render_widget(Paragraph::new(line).block(block), area);
    }

    fn render_actions(&self, f: &mut Frame, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        let key_line = match (&self.key_input, self.session.credential()) {
            (Some(buf), _) => Line::from(format!("OpenAI API Key: {}_", "*".repeat(buf.chars().count()))),
            (None, Some(_)) => Line::from("Key saved  [a] AI-Generate  [x] Clear Key"),
            (None, None) => Line::from("No key  [k] Enter OpenAI API Key"),
        };
        let status = if self.session.is_processing() {
            Line::from("Processing...".yellow())
        } else {
            Line::from("Idle".dark_gray())
        };
        let ai = Paragraph::new(vec![key_line, status])
            .block(Block::default().title(" AI Generated ").borders(Borders::ALL));
        f.render_widget(ai, cols[0]);

        let random = Paragraph::new(vec![
            Line::from("Generate a random set of numbers."),
            Line::from("[g] Generate"),
        ])
        .block(Block::default().title(" Random Generated ").borders(Borders::ALL));
        f.render_widget(random, cols[1]);
    }

    fn render_results(&self, f: &mut Frame, area: Rect) {
        let results = self.session.results();
        let title = if results.is_empty() {
            " Results will show here... ".to_string()
        } else {
            format!(" Generated Numbers ({}) [c] Clear list ", results.len())
        };
        let mut lines = Vec::new();
        for (i, r) in results.iter().enumerate() {
            let tag = match r.source() {
                DrawSource::Random => "RNG",
                DrawSource::Suggested => "AI ",
            };
            let numbers = r.numbers().iter().map(u32::to_string).collect::<Vec<_>>().join(" - ");
            lines.push(Line::from(vec![
                Span::raw(format!("{:>3}. [{tag}] ", i + 1)),
                Span::styled(numbers, Style::default().fg(self.accent()).bold()),
            ]));
            if let Some(reason) = r.reason() {
                lines.push(Line::from(format!("       {reason}")).italic());
            }
        }
        // 新しい結果が見えるよう末尾側を表示
        let visible = area.height.saturating_sub(2) as usize;
        let skip = lines.len().saturating_sub(visible);
        let paragraph = Paragraph::new(lines.split_off(skip))
            .wrap(Wrap { trim: false })
            .block(Block::default().title(title).borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_notice(&self, f: &mut Frame, area: Rect) {
        if let Some(n) = &self.notice {
            let color = if n.is_error { Color::Red } else { Color::Green };
            f.render_widget(Paragraph::new(n.text.clone()).style(Style::default().fg(color)), area);
        }
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let footer = Paragraph::new("g: Random | a: AI | k: Key | x: Clear Key | c: Clear list | Tab: Next game | Esc: Menu")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(footer, area);
    }
}
