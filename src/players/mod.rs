// Players module - automatic opponents built on the move graph
//
// Policies only decide; the caller applies the decision through the
// game's mutation API.

use crate::enums::Move;
use crate::errors::QuoridorResult;
use crate::game::Quoridor;

pub mod greedy;
pub mod weighted_random;

pub use self::greedy::GreedyPlayer;
pub use self::weighted_random::WeightedRandomPlayer;

/// Decision interface for automatic opponents.
pub trait BotPlayer {
    /// Short policy name, for logs and prompts.
    fn name(&self) -> &str;

    /// Picks the next move for `player` without mutating the game.
    fn decide(&self, game: &Quoridor, player: u8) -> QuoridorResult<Move>;
}

/// Asks `policy` for a move and applies it to the game.
pub fn play_turn(game: &mut Quoridor, player: u8, policy: &dyn BotPlayer) -> QuoridorResult<Move> {
    let chosen = policy.decide(game, player)?;
    game.apply(player, chosen)?;
    Ok(chosen)
}
