//! Session: the single owner of the results ledger, the selected game,
//! the ephemeral credential and the in-flight suggestion flag.

use rand::{thread_rng, Rng};
use tracing::{debug, info, warn};

use super::credential::Credential;
use super::generator::generate_with_rng;
use super::ledger::{DrawResult, Ledger};
use super::Game;
use crate::config::Config;
use crate::error::{GenerationError, SuggestionError};
use crate::openai::{request_suggestion, CompletionClient, Suggestion};

/// Identity of the one suggestion request allowed in flight.
/// Carries what the worker needs so it never touches session state.
#[derive(Debug, Clone)]
pub struct SuggestionTicket {
    id: u64,
    game: Game,
    credential: Credential,
}

impl SuggestionTicket {
    pub fn id(&self) -> u64 { self.id }
    pub fn game(&self) -> &Game { &self.game }
    pub fn credential(&self) -> &Credential { &self.credential }
}

#[derive(Debug)]
pub struct Session {
    game: Game,
    ledger: Ledger,
    credential: Option<Credential>,
    in_flight: Option<u64>,
    next_ticket: u64,
}

impl Session {
    pub fn new(game: Game) -> Self {
        Self { game, ledger: Ledger::new(), credential: None, in_flight: None, next_ticket: 1 }
    }

    pub fn with_credential(mut self, credential: Option<Credential>) -> Self {
        self.credential = credential;
        self
    }

    pub fn game(&self) -> &Game { &self.game }
    pub fn ledger(&self) -> &Ledger { &self.ledger }
    pub fn results(&self) -> &[DrawResult] { self.ledger.all() }
    pub fn credential(&self) -> Option<&Credential> { self.credential.as_ref() }
    pub fn has_credential(&self) -> bool { self.credential.is_some() }

    /// A suggestion request is in flight.
    pub fn is_processing(&self) -> bool { self.in_flight.is_some() }

    pub fn set_credential(&mut self, credential: Credential) {
        info!(target: "lottery", "credential saved");
        self.credential = Some(credential);
    }

    /// Drops the key. A request already sent with it is no longer current.
    pub fn clear_credential(&mut self) {
        if self.credential.take().is_some() {
            info!(target: "lottery", "credential cleared");
        }
        self.invalidate_in_flight("credential cleared");
    }

    /// Switches the active game. The ledger is scoped to one selection, so it starts empty.
    pub fn select_game(&mut self, game: Game) {
        info!(target: "lottery", from = %self.game.name, to = %game.name, "select_game");
        self.invalidate_in_flight("game switched");
        self.ledger.clear();
        self.game = game;
    }

    pub fn clear_results(&mut self) {
        debug!(target: "lottery", cleared = self.ledger.len(), "clear_results");
        self.ledger.clear();
    }

    /// Draws locally for the current game. Never waits on an AI request.
    pub fn generate_random(&mut self) -> Result<&DrawResult, GenerationError> {
        self.generate_random_with(&mut thread_rng())
    }

    pub fn generate_random_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<&DrawResult, GenerationError> {
        let g = &self.game;
        let numbers = generate_with_rng(rng, g.min, g.max, g.result_num_count)?;
        debug!(target: "lottery", game = %g.name, ?numbers, "random_draw");
        Ok(self.ledger.append(DrawResult::random(self.game.clone(), numbers)))
    }

    /// Moves to `Requesting`.
    ///
    /// Returns `Ok(None)` when a request is already in flight; the trigger is ignored.
    /// Without a credential the (possibly blank) key is discarded and
    /// `MissingCredential` is returned.
    pub fn begin_suggestion(&mut self) -> Result<Option<SuggestionTicket>, SuggestionError> {
        if let Some(id) = self.in_flight {
            debug!(target: "lottery", id, "suggestion already in flight; trigger ignored");
            return Ok(None);
        }
        let credential = match &self.credential {
            Some(c) if !c.is_blank() => c.clone(),
            _ => {
                self.credential = None;
                return Err(SuggestionError::MissingCredential);
            }
        };
        let id = self.next_ticket;
        self.next_ticket += 1;
        self.in_flight = Some(id);
        info!(target: "lottery", id, game = %self.game.name, "suggestion_requested");
        Ok(Some(SuggestionTicket { id, game: self.game.clone(), credential }))
    }

    /// Moves back to `Idle` with the outcome of ticket `ticket_id`.
    ///
    /// Outcomes of tickets that are no longer current are dropped (`Ok(None)`).
    /// Failures never touch the ledger; credential failures also drop the key.
    /// Numbers that do not fit the current game are a `Parse` failure.
    pub fn finish_suggestion(
        &mut self,
        ticket_id: u64,
        outcome: Result<Suggestion, SuggestionError>,
    ) -> Result<Option<&DrawResult>, SuggestionError> {
        if self.in_flight != Some(ticket_id) {
            warn!(target: "lottery", ticket_id, "stale suggestion discarded");
            return Ok(None);
        }
        self.in_flight = None;
        match outcome {
            Ok(s) => {
                if let Err(why) = self.game.check_draw(&s.numbers) {
                    warn!(target: "lottery", ticket_id, error = %why, "suggestion_rejected");
                    return Err(SuggestionError::Parse(why));
                }
                info!(target: "lottery", ticket_id, numbers = ?s.numbers, "suggestion_appended");
                let result = DrawResult::suggested(self.game.clone(), s.numbers, s.reason);
                Ok(Some(self.ledger.append(result)))
            }
            Err(e) => {
                warn!(target: "lottery", ticket_id, error = %e, "suggestion_failed");
                if e.resets_credential() {
                    self.credential = None;
                }
                Err(e)
            }
        }
    }

    /// Begin, request and finish in one go.
    pub async fn suggest<C: CompletionClient>(
        &mut self,
        client: &C,
        config: &Config,
    ) -> Result<Option<&DrawResult>, SuggestionError> {
        let Some(ticket) = self.begin_suggestion()? else {
            return Ok(None);
        };
        let outcome = request_suggestion(client, &ticket.game, Some(&ticket.credential), config).await;
        self.finish_suggestion(ticket.id, outcome)
    }

    fn invalidate_in_flight(&mut self, why: &str) {
        if let Some(id) = self.in_flight.take() {
            info!(target: "lottery", id, why, "in-flight suggestion invalidated");
        }
    }
}
