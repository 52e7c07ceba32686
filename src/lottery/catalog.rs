//! Built-in game catalog and JSON catalog loading.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{eyre, Result};
use lazy_static::lazy_static;
use tracing::info;

use super::Game;

lazy_static! {
    /// Washington Lottery draw games.
    pub static ref DEFAULT_CATALOG: Vec<Game> = vec![
        Game::new("pick3", 0, 9, 3).with_display("#ff9800", "$500"),
        Game::new("match4", 1, 24, 4).with_display("#e91e63", "$100,000"),
        Game::new("hit5", 1, 42, 5).with_display("#4caf50", "$100,000+"),
        Game::new("keno", 1, 80, 10).with_display("#9c27b0", "$250,000"),
        Game::new("cashPop", 1, 15, 1).with_display("#00bcd4", "$2,500"),
        Game::new("lotto", 1, 49, 6).with_display("#2196f3", "$1 Million+"),
    ];
}

/// Reads a JSON array of games. Games that could never be drawn are rejected up front.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<Game>> {
    let raw = fs::read_to_string(&path)?;
    let games: Vec<Game> = serde_json::from_str(&raw)?;
    if games.is_empty() {
        return Err(eyre!("catalog {:?} has no games", path.as_ref()));
    }
    for g in &games {
        crate::lottery::generator::check_request(g.min, g.max, g.result_num_count)
            .map_err(|e| eyre!("game {} in catalog is not drawable: {e}", g.name))?;
    }
    info!(target: "lottery", "loaded {} games from {:?}", games.len(), path.as_ref());
    Ok(games)
}

/// Configured catalog, or the built-in one when no path is set.
pub fn catalog_from_config(config: &crate::Config) -> Result<Vec<Game>> {
    match &config.catalog_path {
        Some(p) => load_catalog(p),
        None => Ok(DEFAULT_CATALOG.clone()),
    }
}

pub fn find_game<'a>(catalog: &'a [Game], name: &str) -> Option<&'a Game> {
    catalog.iter().find(|g| g.name == name)
}
