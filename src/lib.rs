// Quoridor engine library - core module organization
//
// The core owns the board rules: the admissible-move graph, wall
// legality, game-state mutation, and the automatic opponents. Render
// and CLI adapters only consume the snapshot and the mutation API.

pub mod enums;
pub mod errors;
pub mod game;
pub mod graph;
pub mod players;
pub mod render;

// Re-export common types for convenient access
pub use crate::enums::{Cell, Move, Orientation, PlayerSpec};
pub use crate::errors::{
    MoveError, MoveParseError, QuoridorError, QuoridorResult, StateError, WallError,
};
pub use crate::game::{GameSnapshot, Player, Quoridor, WallLayout};
pub use crate::graph::{build_graph, shortest_path, MoveGraph, Node};
pub use crate::players::{play_turn, BotPlayer, GreedyPlayer, WeightedRandomPlayer};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
