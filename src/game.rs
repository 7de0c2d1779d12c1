use std::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::{
    Cell, Move, Orientation, PlayerSpec, BOARD_SIZE, STARTING_POSITIONS, STARTING_WALLS,
    TOTAL_WALLS,
};
use crate::errors::{MoveError, QuoridorResult, StateError, WallError};
use crate::graph::{self, has_path_connecting, MoveGraph, Node};
use crate::render;

/// Rows that win the match, indexed by seat.
const WINNING_ROWS: [u8; 2] = [BOARD_SIZE, 1];

/// One player record, also the shape exposed in snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub walls_remaining: u8,
    pub position: Cell,
}

/// Horizontal and vertical wall lists, in placement order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallLayout {
    pub horizontal: Vec<Cell>,
    pub vertical: Vec<Cell>,
}

/// The canonical serializable state consumed by renderer and transport
/// adapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub players: [Player; 2],
    pub walls: WallLayout,
}

/// A Quoridor match: two players and the walls on the board.
///
/// Every mutation validates first and commits only on acceptance, so
/// the state invariants hold between any two calls.
#[derive(Debug, Clone)]
pub struct Quoridor {
    players: [Player; 2],
    walls_h: Vec<Cell>,
    walls_v: Vec<Cell>,
}

/// The other player id.
pub fn opponent_of(player: u8) -> u8 {
    3 - player
}

fn seat(player: u8) -> Option<usize> {
    match player {
        1 => Some(0),
        2 => Some(1),
        _ => None,
    }
}

impl Quoridor {
    /// Starts or resumes a match.
    ///
    /// Bare names take the standard defaults (10 walls, starting
    /// cells); full records plus an optional wall layout resume a
    /// match received from elsewhere. This is the only place an
    /// already-inconsistent snapshot can be rejected, so the full set
    /// of invariants is checked here: wall totals, wall and player
    /// ranges, overlaps, and that nobody is already imprisoned.
    pub fn new(specs: [PlayerSpec; 2], walls: Option<WallLayout>) -> QuoridorResult<Self> {
        let layout = walls.unwrap_or_default();
        let [first, second] = specs;
        let players = [resolve_spec(first, 0)?, resolve_spec(second, 1)?];

        let held: usize = players.iter().map(|p| p.walls_remaining as usize).sum();
        let placed = layout.horizontal.len() + layout.vertical.len();
        if held + placed != TOTAL_WALLS {
            return Err(StateError::WallCount(held + placed).into());
        }

        let mut game = Quoridor {
            players,
            walls_h: Vec::with_capacity(layout.horizontal.len()),
            walls_v: Vec::with_capacity(layout.vertical.len()),
        };
        for (cells, orientation) in [
            (layout.horizontal, Orientation::Horizontal),
            (layout.vertical, Orientation::Vertical),
        ] {
            for cell in cells {
                if !orientation.admits(cell) {
                    return Err(StateError::WallPosition {
                        x: cell.x,
                        y: cell.y,
                        orientation,
                    }
                    .into());
                }
                if game.overlaps(cell, orientation) {
                    return Err(StateError::WallOverlap { x: cell.x, y: cell.y }.into());
                }
                match orientation {
                    Orientation::Horizontal => game.walls_h.push(cell),
                    Orientation::Vertical => game.walls_v.push(cell),
                }
            }
        }

        let graph = game.graph();
        for (index, player) in game.players.iter().enumerate() {
            let goal = Node::goal(index as u8 + 1);
            if !has_path_connecting(&graph, Node::Cell(player.position), goal, None) {
                return Err(StateError::PlayerImprisoned {
                    name: player.name.clone(),
                }
                .into());
            }
        }

        Ok(game)
    }

    /// Rebuilds a match from a snapshot taken earlier.
    pub fn from_snapshot(snapshot: &GameSnapshot) -> QuoridorResult<Self> {
        let specs = snapshot.players.clone().map(|player| PlayerSpec::Full {
            name: player.name,
            walls_remaining: player.walls_remaining,
            position: player.position,
        });
        Self::new(specs, Some(snapshot.walls.clone()))
    }

    /// Immutable view of the current state.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            players: self.players.clone(),
            walls: WallLayout {
                horizontal: self.walls_h.clone(),
                vertical: self.walls_v.clone(),
            },
        }
    }

    /// Record for a player id, if the id is valid.
    pub fn player(&self, player: u8) -> Option<&Player> {
        seat(player).map(|index| &self.players[index])
    }

    /// Both token positions, player 1 first.
    pub fn positions(&self) -> [Cell; 2] {
        [self.players[0].position, self.players[1].position]
    }

    pub fn walls_h(&self) -> &[Cell] {
        &self.walls_h
    }

    pub fn walls_v(&self) -> &[Cell] {
        &self.walls_v
    }

    /// The admissible-move graph for the current state.
    pub fn graph(&self) -> MoveGraph {
        graph::build_graph(self.positions(), &self.walls_h, &self.walls_v)
    }

    /// Name of the winner, if any; player 1 is evaluated first.
    pub fn winner(&self) -> Option<&str> {
        for (index, player) in self.players.iter().enumerate() {
            if player.position.y == WINNING_ROWS[index] {
                return Some(&player.name);
            }
        }
        None
    }

    /// Moves a token one hop along the admissible-move graph.
    pub fn move_token(&mut self, player: u8, destination: Cell) -> QuoridorResult<()> {
        let index = seat(player).ok_or(MoveError::InvalidPlayer(player))?;
        if !destination.on_board() {
            return Err(MoveError::InvalidPosition(destination.x, destination.y).into());
        }

        let graph = self.graph();
        let from = Node::Cell(self.players[index].position);
        if !graph.contains_edge(from, Node::Cell(destination)) {
            return Err(MoveError::IllegalMove(destination.x, destination.y).into());
        }

        self.players[index].position = destination;
        Ok(())
    }

    /// Checks a candidate wall without mutating anything.
    ///
    /// Checks run in order and the first failure wins: player id,
    /// walls remaining, placement range, overlap, and finally the
    /// imprisonment probe on a tentative rebuild of the graph.
    pub fn can_place(
        &self,
        player: u8,
        position: Cell,
        orientation: Orientation,
    ) -> Result<(), WallError> {
        let index = seat(player).ok_or(WallError::InvalidPlayer(player))?;
        if self.players[index].walls_remaining == 0 {
            return Err(WallError::NoWallsLeft(player));
        }
        if !orientation.admits(position) {
            return Err(WallError::OutOfBounds {
                x: position.x,
                y: position.y,
                orientation,
            });
        }
        if self.overlaps(position, orientation) {
            return Err(WallError::Overlap {
                x: position.x,
                y: position.y,
                orientation,
            });
        }

        let (walls_h, walls_v) = self.with_candidate(position, orientation);
        let graph = graph::build_graph(self.positions(), &walls_h, &walls_v);
        for (other, player_record) in self.players.iter().enumerate() {
            let goal = Node::goal(other as u8 + 1);
            if !has_path_connecting(&graph, Node::Cell(player_record.position), goal, None) {
                return Err(WallError::WouldImprison {
                    x: position.x,
                    y: position.y,
                    player: player_record.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Places a wall for a player and spends one of its walls.
    pub fn place_wall(
        &mut self,
        player: u8,
        position: Cell,
        orientation: Orientation,
    ) -> QuoridorResult<()> {
        self.can_place(player, position, orientation)?;
        match orientation {
            Orientation::Horizontal => self.walls_h.push(position),
            Orientation::Vertical => self.walls_v.push(position),
        }
        self.players[(player - 1) as usize].walls_remaining -= 1;
        Ok(())
    }

    /// Applies a decoded move for a player.
    pub fn apply(&mut self, player: u8, mv: Move) -> QuoridorResult<()> {
        match mv {
            Move::Token(destination) => self.move_token(player, destination),
            Move::Wall(position, orientation) => self.place_wall(player, position, orientation),
        }
    }

    /// Wall lists with `candidate` tentatively added.
    pub(crate) fn with_candidate(
        &self,
        candidate: Cell,
        orientation: Orientation,
    ) -> (Vec<Cell>, Vec<Cell>) {
        let mut walls_h = self.walls_h.clone();
        let mut walls_v = self.walls_v.clone();
        match orientation {
            Orientation::Horizontal => walls_h.push(candidate),
            Orientation::Vertical => walls_v.push(candidate),
        }
        (walls_h, walls_v)
    }

    /// Geometric conflict with the walls already on the board: two
    /// same-orientation walls may not sit within one cell of each other
    /// on the shared axis, and a horizontal wall at (x, y) crosses a
    /// vertical wall at (x+1, y-1).
    fn overlaps(&self, cell: Cell, orientation: Orientation) -> bool {
        match orientation {
            Orientation::Horizontal => {
                self.walls_h
                    .iter()
                    .any(|wall| wall.y == cell.y && wall.x.abs_diff(cell.x) <= 1)
                    || self.walls_v.contains(&Cell::new(cell.x + 1, cell.y - 1))
            }
            Orientation::Vertical => {
                self.walls_v
                    .iter()
                    .any(|wall| wall.x == cell.x && wall.y.abs_diff(cell.y) <= 1)
                    || self.walls_h.contains(&Cell::new(cell.x - 1, cell.y + 1))
            }
        }
    }
}

fn resolve_spec(spec: PlayerSpec, index: usize) -> Result<Player, StateError> {
    match spec {
        PlayerSpec::Name(name) => Ok(Player {
            name,
            walls_remaining: STARTING_WALLS,
            position: STARTING_POSITIONS[index],
        }),
        PlayerSpec::Full {
            name,
            walls_remaining,
            position,
        } => {
            if walls_remaining > STARTING_WALLS {
                return Err(StateError::PlayerWalls {
                    name,
                    walls: walls_remaining,
                });
            }
            if !position.on_board() {
                return Err(StateError::PlayerPosition {
                    name,
                    x: position.x,
                    y: position.y,
                });
            }
            Ok(Player {
                name,
                walls_remaining,
                position,
            })
        }
    }
}

impl fmt::Display for Quoridor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render::render_board(&self.snapshot()))
    }
}
