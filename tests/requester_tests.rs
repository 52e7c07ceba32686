use lotto_pick::lottery::{Credential, Game};
use lotto_pick::openai::{parse_suggestion, request_suggestion, request_suggestion_blocking, SYSTEM_INSTRUCTION};
use lotto_pick::{Config, SuggestionError};
mod common;
use common::{test_key, CannedClient};

#[ctor::ctor]
fn _init() { common::init(); }

fn hit5() -> Game {
    Game::new("hit5", 1, 42, 5)
}

#[tokio::test]
async fn sends_fixed_system_and_game_prompt() {
    let client = CannedClient::text(r#"{"reason":"frequent","numbers":[3,9,17,28,40]}"#);
    let mut config = Config::new();
    config.model = "gpt-4o-mini".into();
    config.max_tokens = 99;

    let key = test_key();
    let s = request_suggestion(&client, &hit5(), Some(&key), &config).await.unwrap();
    assert_eq!(s.numbers, vec![3, 9, 17, 28, 40]);
    assert_eq!(s.reason, "frequent");

    let seen = client.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].model, "gpt-4o-mini");
    assert_eq!(seen[0].max_tokens, 99);
    assert_eq!(seen[0].system, SYSTEM_INSTRUCTION);
    assert!(seen[0].user.starts_with("Select 5 numbers between 1 and 42"));
    assert!(seen[0].user.contains("gamename=hit5"));
    assert!(seen[0].user.ends_with("cannot be repeated"));
}

#[tokio::test]
async fn missing_or_blank_credential_never_calls_out() {
    let client = CannedClient::text("{}");
    let blank = Credential::new("");
    for cred in [None, Some(&blank)] {
        let err = request_suggestion(&client, &hit5(), cred, &Config::new()).await.unwrap_err();
        assert_eq!(err, SuggestionError::MissingCredential);
    }
    assert_eq!(client.calls(), 0);
}

#[test]
fn blocking_helper_matches_async() {
    let client = CannedClient::failing(SuggestionError::Auth("no".into()));
    let key = test_key();
    let err = request_suggestion_blocking(&client, &hit5(), Some(&key), &Config::new()).unwrap_err();
    assert!(err.resets_credential());
}

#[test]
fn parses_plain_and_fenced_json() {
    let g = hit5();
    let plain = parse_suggestion(r#"{"reason":"r","numbers":[1,2,3,4,5]}"#, &g).unwrap();
    let fenced = parse_suggestion("```json\n{\"numbers\": [1,2,3,4,5], \"reason\": \"r\"}\n```", &g).unwrap();
    assert_eq!(plain, fenced);
    let inline = parse_suggestion(r#"```json{"reason":"r","numbers":[1,2,3,4,5]}```"#, &g).unwrap();
    assert_eq!(plain, inline);
}

#[test]
fn structural_mismatches_are_parse_errors() {
    let g = hit5();
    let bad = [
        "not json at all",
        r#"{"reason":"r"}"#,
        r#"{"numbers":[1,2,3,4,5]}"#,
        r#"{"reason":"r","numbers":"1,2,3,4,5"}"#,
        r#"{"reason":"r","numbers":[1,2,3,4,-5]}"#,
        r#"{"reason":"r","numbers":[1,2,3,4,5.5]}"#,
        r#"{"reason":7,"numbers":[1,2,3,4,5]}"#,
        r#"[1,2,3,4,5]"#,
    ];
    for text in bad {
        assert!(matches!(parse_suggestion(text, &g), Err(SuggestionError::Parse(_))), "{text}");
    }
}

#[test]
fn numbers_breaking_game_rules_are_parse_errors() {
    let g = hit5();
    for text in [
        r#"{"reason":"r","numbers":[1,2,3,4]}"#,
        r#"{"reason":"r","numbers":[1,2,3,4,43]}"#,
        r#"{"reason":"r","numbers":[1,2,3,4,4]}"#,
    ] {
        assert!(matches!(parse_suggestion(text, &g), Err(SuggestionError::Parse(_))), "{text}");
    }

    // repeats are fine when the game starts at zero
    let pick3 = Game::new("pick3", 0, 9, 3);
    assert!(parse_suggestion(r#"{"reason":"r","numbers":[7,7,7]}"#, &pick3).is_ok());
}
