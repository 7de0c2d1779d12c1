use log::info;

use crate::enums::{Cell, Move, Orientation};
use crate::errors::{MoveError, QuoridorError, QuoridorResult};
use crate::game::{opponent_of, Quoridor};
use crate::graph::{shortest_path, Node};

use super::BotPlayer;

/// Direct-block opponent.
///
/// Walks its own shortest path while it is not behind; once the
/// opponent's path is shorter, drops a wall across the opponent's next
/// step, trying the primary slot and one shifted fallback before giving
/// up and advancing anyway. Fully deterministic for a given state.
pub struct GreedyPlayer;

impl GreedyPlayer {
    pub fn new() -> Self {
        GreedyPlayer
    }

    fn next_cell(path: &[Node]) -> QuoridorResult<Cell> {
        match path.get(1) {
            Some(Node::Cell(cell)) => Ok(*cell),
            _ => Err(QuoridorError::Internal(
                "shortest path has no next cell".to_string(),
            )),
        }
    }

    /// The two wall slots covering the opponent's step from `from` to
    /// `next`: the slot directly across the step, then the same slot
    /// shifted one cell against the step's axis.
    fn wall_candidates(from: Cell, next: Cell) -> (Orientation, [(i16, i16); 2]) {
        let dx = next.x as i16 - from.x as i16;
        let dy = next.y as i16 - from.y as i16;
        if dx != 0 {
            let x = next.x as i16 - dx.min(0);
            let y = next.y as i16;
            (Orientation::Vertical, [(x, y), (x, y - 1)])
        } else {
            let x = next.x as i16;
            let y = next.y as i16 - dy.min(0);
            (Orientation::Horizontal, [(x, y), (x - 1, y)])
        }
    }
}

impl Default for GreedyPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl BotPlayer for GreedyPlayer {
    fn name(&self) -> &str {
        "greedy"
    }

    fn decide(&self, game: &Quoridor, player: u8) -> QuoridorResult<Move> {
        if game.winner().is_some() {
            return Err(QuoridorError::GameFinished);
        }
        let me = game
            .player(player)
            .ok_or(MoveError::InvalidPlayer(player))?;
        let opponent = opponent_of(player);
        let other = game
            .player(opponent)
            .ok_or(MoveError::InvalidPlayer(opponent))?;

        let graph = game.graph();
        let path_self = shortest_path(&graph, Node::Cell(me.position), Node::goal(player))
            .ok_or_else(|| {
                QuoridorError::Internal(format!("player {player} has no path to its goal"))
            })?;
        let path_opp = shortest_path(&graph, Node::Cell(other.position), Node::goal(opponent))
            .ok_or_else(|| {
                QuoridorError::Internal(format!("player {opponent} has no path to its goal"))
            })?;

        let opponent_mobility = graph
            .neighbors(Node::Cell(other.position))
            .filter(|node| matches!(node, Node::Cell(_)))
            .count();

        if path_self.len() <= path_opp.len() || opponent_mobility < 2 {
            let destination = Self::next_cell(&path_self)?;
            info!("player {player} advances to {destination}");
            return Ok(Move::Token(destination));
        }

        let next_opp = Self::next_cell(&path_opp)?;
        let (orientation, candidates) = Self::wall_candidates(other.position, next_opp);
        for (x, y) in candidates {
            let (Ok(x), Ok(y)) = (u8::try_from(x), u8::try_from(y)) else {
                continue;
            };
            let position = Cell::new(x, y);
            if game.can_place(player, position, orientation).is_ok() {
                info!("player {player} blocks with a {orientation} wall at {position}");
                return Ok(Move::Wall(position, orientation));
            }
        }

        let destination = Self::next_cell(&path_self)?;
        info!("player {player} cannot block, advances to {destination}");
        Ok(Move::Token(destination))
    }
}
