// メニューとゲーム画面モードのキー操作テスト
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use lotto_pick::lottery::{DrawSource, Game};
use lotto_pick::modes::{AppMode, GameScreenMode, MenuMode, Mode};
use lotto_pick::{AppContext, SuggestionError};
mod common;
use common::{test_key, CannedClient};

#[ctor::ctor]
fn _init() { common::init(); }

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

fn type_text(mode: &mut GameScreenMode, text: &str) {
    for ch in text.chars() {
        mode.handle_key(press(KeyCode::Char(ch))).unwrap();
    }
}

fn screen(client: CannedClient) -> GameScreenMode {
    let ctx = Arc::new(AppContext::default());
    GameScreenMode::with_client(ctx, Game::new("mini3", 1, 10, 3), None, client)
}

/// Polls the worker channel until the session leaves `Requesting`.
fn wait_idle(mode: &mut GameScreenMode) {
    for _ in 0..200 {
        mode.update();
        if !mode.session().is_processing() {
            return;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    panic!("suggestion never completed");
}

#[test]
fn test_menu_navigation() {
    let mut menu = MenuMode::new(Arc::new(AppContext::default()));
    assert_eq!(menu.selected_name(), "pick3");

    menu.handle_key(press(KeyCode::Down)).unwrap();
    assert_eq!(menu.selected_name(), "match4");
    menu.handle_key(press(KeyCode::Up)).unwrap();
    menu.handle_key(press(KeyCode::Up)).unwrap();
    assert_eq!(menu.selected_name(), "lotto");

    let result = menu.handle_key(press(KeyCode::Esc));
    assert!(matches!(result, Ok(Some(AppMode::Exit))), "Esc should result in Exit mode");
}

#[test]
fn test_menu_enter_opens_game_screen() {
    let mut menu = MenuMode::new(Arc::new(AppContext::default()));
    menu.handle_key(press(KeyCode::Char('j'))).unwrap();
    match menu.handle_key(press(KeyCode::Enter)) {
        Ok(Some(AppMode::Game(g))) => assert_eq!(g.session().game().name, "match4"),
        _ => panic!("Enter should open the game screen"),
    }
}

#[test]
fn random_generate_and_clear_list() {
    let mut mode = screen(CannedClient::text("{}"));
    mode.handle_key(press(KeyCode::Char('g'))).unwrap();
    mode.handle_key(press(KeyCode::Char('g'))).unwrap();
    assert_eq!(mode.session().results().len(), 2);
    assert!(mode.session().results().iter().all(|r| r.source() == DrawSource::Random));

    mode.handle_key(press(KeyCode::Char('c'))).unwrap();
    assert!(mode.session().results().is_empty());
}

#[test]
fn ai_without_key_shows_notice() {
    let mut mode = screen(CannedClient::text("{}"));
    mode.handle_key(press(KeyCode::Char('a'))).unwrap();
    let notice = mode.notice().unwrap();
    assert!(notice.is_error);
    assert_eq!(notice.text, SuggestionError::MissingCredential.to_string());
    assert!(!mode.session().is_processing());
}

#[test]
fn key_entry_rejects_short_keys_and_saves_long_ones() {
    let mut mode = screen(CannedClient::text("{}"));
    mode.handle_key(press(KeyCode::Char('k'))).unwrap();
    assert!(mode.is_editing_key());

    type_text(&mut mode, "sk-short");
    mode.handle_key(press(KeyCode::Enter)).unwrap();
    assert!(mode.is_editing_key());
    assert!(!mode.session().has_credential());

    type_text(&mut mode, "-but-now-long-enough");
    mode.handle_key(press(KeyCode::Backspace)).unwrap();
    mode.handle_key(press(KeyCode::Enter)).unwrap();
    assert!(!mode.is_editing_key());
    assert_eq!(
        mode.session().credential().map(|c| c.expose()),
        Some("sk-short-but-now-long-enoug")
    );

    // 'x' clears the key again
    mode.handle_key(press(KeyCode::Char('x'))).unwrap();
    assert!(!mode.session().has_credential());
}

#[test]
fn ai_suggestion_flows_through_worker() {
    let ctx = Arc::new(AppContext::default());
    let client = CannedClient::text(r#"{"reason":"because","numbers":[1,2,3]}"#);
    let mut mode = GameScreenMode::with_client(ctx, Game::new("mini3", 1, 10, 3), Some(test_key()), client);

    mode.handle_key(press(KeyCode::Char('a'))).unwrap();
    // second trigger while requesting is ignored
    mode.handle_key(press(KeyCode::Char('a'))).unwrap();
    wait_idle(&mut mode);

    let results = mode.session().results();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].numbers(), &[1, 2, 3]);
    assert_eq!(results[0].reason(), Some("because"));
}

#[test]
fn auth_failure_through_worker_clears_key() {
    let ctx = Arc::new(AppContext::default());
    let client = CannedClient::failing(SuggestionError::Auth("Incorrect API key provided".into()));
    let mut mode = GameScreenMode::with_client(ctx, Game::new("mini3", 1, 10, 3), Some(test_key()), client);

    mode.handle_key(press(KeyCode::Char('a'))).unwrap();
    wait_idle(&mut mode);

    assert!(!mode.session().has_credential());
    assert!(mode.session().results().is_empty());
    assert!(mode.notice().unwrap().is_error);
}

#[test]
fn tab_switches_game_and_esc_returns_to_menu_with_key() {
    let ctx = Arc::new(AppContext::default());
    let mut mode = GameScreenMode::with_client(ctx, Game::new("pick3", 0, 9, 3), Some(test_key()), CannedClient::text("{}"));
    mode.handle_key(press(KeyCode::Char('g'))).unwrap();

    mode.handle_key(press(KeyCode::Tab)).unwrap();
    assert_eq!(mode.session().game().name, "match4");
    assert!(mode.session().results().is_empty());

    match mode.handle_key(press(KeyCode::Esc)) {
        Ok(Some(AppMode::Menu(mut menu))) => {
            // the key follows into the next game screen
            match menu.handle_key(press(KeyCode::Enter)) {
                Ok(Some(AppMode::Game(g))) => assert!(g.session().has_credential()),
                _ => panic!("Enter should open the game screen"),
            }
        }
        _ => panic!("Esc should return to Menu mode"),
    }
}

#[test]
fn ctrl_c_exits() {
    let mut mode = screen(CannedClient::text("{}"));
    let r = mode.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(matches!(r, Ok(Some(AppMode::Exit))));
}
