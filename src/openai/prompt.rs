//! Prompt text sent to the chat model.

use crate::lottery::Game;

/// Fixed system instruction: short reason plus a numeric array, as a JSON object.
pub const SYSTEM_INSTRUCTION: &str = "You are a helpful assistant/data analyst that only gives the exact answer when asked a question. \
Your job is to give an educated guess on what the day's winning numbers will be based on the lottery's previous winning numbers found on their website. \
For every answer, give a one sentence response on why you chose that answer. \
Respond with a JSON object only: the key 'reason' holds your short reason for the guess and the key 'numbers' holds the numbers you chose as a JSON array of integers.";

/// Builds the user instruction for `game`.
pub fn build_prompt(game: &Game) -> String {
    format!(
        "Select {} numbers between {} and {} that will most likely be correct base on the previous winning data found {}, the numbers {} be repeated",
        game.result_num_count,
        game.min,
        game.max,
        game.history_url(),
        if game.allows_repeats() { "can" } else { "cannot" },
    )
}
