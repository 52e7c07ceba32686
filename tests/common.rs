#![allow(dead_code)]

use lotto_pick::lottery::Credential;
use lotto_pick::openai::{CompletionClient, CompletionRequest};
use lotto_pick::SuggestionError;
use once_cell::sync::Lazy;
use std::sync::{Mutex, Once};
use tracing_appender::rolling;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static START: Once = Once::new();
static _GUARD: Lazy<Mutex<Option<tracing_appender::non_blocking::WorkerGuard>>> = Lazy::new(|| Mutex::new(None));

/// Initialize test environment: dotenv and tracing (stderr + file).
/// Idempotent: safe to call multiple times.
pub fn init() {
    START.call_once(|| {
        let _ = dotenvy::dotenv();
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("info"))
            .expect("env filter");

        // Daily rotating log file separate from app runtime logs
        let file_appender = rolling::daily("logs", "tests.log");
        let (file_nb, guard) = tracing_appender::non_blocking(file_appender);
        *_GUARD.lock().unwrap() = Some(guard); // retain guard for lifetime

        let stderr_layer = fmt::layer()
            .with_target(true)
            .with_thread_names(true)
            .with_writer(std::io::stderr);

        let file_layer = fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_thread_names(true)
            .with_writer(file_nb);

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .with(file_layer)
            .try_init();

        tracing::info!(target: "test_init", "Test tracing initialized (stderr + rotating file)");
    });
}

pub fn test_key() -> Credential {
    Credential::new("sk-test-0123456789abcdef")
}

/// Answers every request with the same canned result and records what it was asked.
pub struct CannedClient {
    answer: Result<String, SuggestionError>,
    pub seen: Mutex<Vec<CompletionRequest>>,
}

impl CannedClient {
    pub fn text(text: &str) -> Self {
        Self { answer: Ok(text.to_string()), seen: Mutex::new(Vec::new()) }
    }

    pub fn failing(err: SuggestionError) -> Self {
        Self { answer: Err(err), seen: Mutex::new(Vec::new()) }
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

impl CompletionClient for CannedClient {
    async fn complete(
        &self,
        _credential: &Credential,
        request: &CompletionRequest,
    ) -> Result<String, SuggestionError> {
        self.seen.lock().unwrap().push(request.clone());
        self.answer.clone()
    }
}
