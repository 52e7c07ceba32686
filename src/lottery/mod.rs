pub mod catalog;
pub mod credential;
pub mod game;
pub mod generator;
pub mod ledger;
pub mod session;

pub use catalog::{catalog_from_config, find_game, load_catalog, DEFAULT_CATALOG};
pub use credential::Credential;
pub use game::Game;
pub use generator::{generate, generate_with_rng, MAX_DRAW_COUNT};
pub use ledger::{DrawResult, DrawSource, Ledger};
pub use session::{Session, SuggestionTicket};
