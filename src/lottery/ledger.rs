//! Ordered record of realized draws for the current game.

use super::Game;

/// Where a draw came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawSource {
    Random,
    Suggested,
}

/// One realized outcome for a game. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawResult {
    game: Game,
    numbers: Vec<u32>,
    reason: Option<String>,
    source: DrawSource,
}

impl DrawResult {
    pub fn random(game: Game, numbers: Vec<u32>) -> Self {
        Self { game, numbers, reason: None, source: DrawSource::Random }
    }

    pub fn suggested(game: Game, numbers: Vec<u32>, reason: impl Into<String>) -> Self {
        Self { game, numbers, reason: Some(reason.into()), source: DrawSource::Suggested }
    }

    pub fn game(&self) -> &Game { &self.game }
    pub fn numbers(&self) -> &[u32] { &self.numbers }
    pub fn reason(&self) -> Option<&str> { self.reason.as_deref() }
    pub fn source(&self) -> DrawSource { self.source }
}

/// In-memory history of draws for the active game.
///
/// Append-only apart from `clear`; insertion order is preserved (oldest first).
#[derive(Debug, Default, Clone)]
pub struct Ledger {
    results: Vec<DrawResult>,
}

impl Ledger {
    pub fn new() -> Self { Self::default() }

    /// Adds to the end and hands back the stored result.
    pub fn append(&mut self, result: DrawResult) -> &DrawResult {
        self.results.push(result);
        &self.results[self.results.len() - 1]
    }

    pub fn clear(&mut self) { self.results.clear(); }

    pub fn all(&self) -> &[DrawResult] { &self.results }

    pub fn last(&self) -> Option<&DrawResult> { self.results.last() }

    pub fn len(&self) -> usize { self.results.len() }

    pub fn is_empty(&self) -> bool { self.results.is_empty() }
}
