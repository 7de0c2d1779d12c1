use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::MoveParseError;

/// Side length of the board.
pub const BOARD_SIZE: u8 = 9;

/// Walls handed to each player at the start of a match.
pub const STARTING_WALLS: u8 = 10;

/// Walls in play across both players and the board, at all times.
pub const TOTAL_WALLS: usize = 20;

/// Default starting cells for players 1 and 2.
pub const STARTING_POSITIONS: [Cell; 2] = [Cell { x: 5, y: 1 }, Cell { x: 5, y: 9 }];

/// A board square, 1..=9 on each axis.
///
/// Serializes as a two-element array so snapshots keep the `[x, y]`
/// shape consumed by external collaborators.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "(u8, u8)", into = "(u8, u8)")]
pub struct Cell {
    pub x: u8,
    pub y: u8,
}

impl Cell {
    pub const fn new(x: u8, y: u8) -> Self {
        Cell { x, y }
    }

    /// True when the cell lies on the board.
    pub fn on_board(self) -> bool {
        (1..=BOARD_SIZE).contains(&self.x) && (1..=BOARD_SIZE).contains(&self.y)
    }
}

impl From<(u8, u8)> for Cell {
    fn from((x, y): (u8, u8)) -> Self {
        Cell { x, y }
    }
}

impl From<Cell> for (u8, u8) {
    fn from(cell: Cell) -> Self {
        (cell.x, cell.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Orientation of a two-cell wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Valid placement range for this orientation.
    ///
    /// A horizontal wall at (x, y) spans columns x and x+1 between rows
    /// y-1 and y; a vertical wall at (x, y) spans rows y and y+1
    /// between columns x-1 and x.
    pub fn admits(self, cell: Cell) -> bool {
        match self {
            Orientation::Horizontal => {
                (1..BOARD_SIZE).contains(&cell.x) && (2..=BOARD_SIZE).contains(&cell.y)
            }
            Orientation::Vertical => {
                (2..=BOARD_SIZE).contains(&cell.x) && (1..BOARD_SIZE).contains(&cell.y)
            }
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => write!(f, "horizontal"),
            Orientation::Vertical => write!(f, "vertical"),
        }
    }
}

/// Boundary encoding of a move: `("D" | "MH" | "MV", x, y)`.
type MoveCode = (String, u8, u8);

/// A decoded move, either a token displacement or a wall placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MoveCode", into = "MoveCode")]
pub enum Move {
    Token(Cell),
    Wall(Cell, Orientation),
}

impl Move {
    /// Wire code for this move kind.
    pub fn code(self) -> &'static str {
        match self {
            Move::Token(_) => "D",
            Move::Wall(_, Orientation::Horizontal) => "MH",
            Move::Wall(_, Orientation::Vertical) => "MV",
        }
    }

    /// Target cell of the move.
    pub fn cell(self) -> Cell {
        match self {
            Move::Token(cell) | Move::Wall(cell, _) => cell,
        }
    }
}

impl From<Move> for MoveCode {
    fn from(mv: Move) -> Self {
        let cell = mv.cell();
        (mv.code().to_string(), cell.x, cell.y)
    }
}

impl TryFrom<MoveCode> for Move {
    type Error = MoveParseError;

    fn try_from((code, x, y): MoveCode) -> Result<Self, Self::Error> {
        let cell = Cell::new(x, y);
        match code.as_str() {
            "D" => Ok(Move::Token(cell)),
            "MH" => Ok(Move::Wall(cell, Orientation::Horizontal)),
            "MV" => Ok(Move::Wall(cell, Orientation::Vertical)),
            _ => Err(MoveParseError(code)),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell = self.cell();
        write!(f, "{} {} {}", self.code(), cell.x, cell.y)
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    /// Parses the textual form entered by a human: `D 5 2`, `MH 3 4`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(code), Some(x), Some(y), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(MoveParseError(s.to_string()));
        };
        let x: u8 = x.parse().map_err(|_| MoveParseError(s.to_string()))?;
        let y: u8 = y.parse().map_err(|_| MoveParseError(s.to_string()))?;
        Move::try_from((code.to_string(), x, y)).map_err(|_| MoveParseError(s.to_string()))
    }
}

/// Player description accepted at construction: a bare name takes the
/// standard defaults, a full record resumes an existing match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlayerSpec {
    Name(String),
    Full {
        name: String,
        walls_remaining: u8,
        position: Cell,
    },
}

impl From<&str> for PlayerSpec {
    fn from(name: &str) -> Self {
        PlayerSpec::Name(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_move_serializes_as_wire_tuple() {
        let wall = Move::Wall(Cell::new(5, 5), Orientation::Horizontal);
        assert_eq!(serde_json::to_value(wall).unwrap(), json!(["MH", 5, 5]));

        let token = Move::Token(Cell::new(5, 2));
        assert_eq!(serde_json::to_value(token).unwrap(), json!(["D", 5, 2]));

        let back: Move = serde_json::from_value(json!(["MV", 3, 4])).unwrap();
        assert_eq!(back, Move::Wall(Cell::new(3, 4), Orientation::Vertical));
    }

    #[test]
    fn test_move_text_round_trip() {
        for text in ["D 5 2", "MH 3 4", "MV 9 1"] {
            let mv: Move = text.parse().unwrap();
            assert_eq!(mv.to_string(), text);
        }
    }

    #[test]
    fn test_move_parse_rejects_garbage() {
        assert!("".parse::<Move>().is_err());
        assert!("X 5 2".parse::<Move>().is_err());
        assert!("D five two".parse::<Move>().is_err());
        assert!("D 5".parse::<Move>().is_err());
        assert!("D 5 2 9".parse::<Move>().is_err());
    }

    #[test]
    fn test_cell_serializes_as_pair() {
        assert_eq!(serde_json::to_value(Cell::new(5, 1)).unwrap(), json!([5, 1]));
        let cell: Cell = serde_json::from_value(json!([2, 7])).unwrap();
        assert_eq!(cell, Cell::new(2, 7));
    }

    #[test]
    fn test_orientation_ranges() {
        assert!(Orientation::Horizontal.admits(Cell::new(1, 2)));
        assert!(Orientation::Horizontal.admits(Cell::new(8, 9)));
        assert!(!Orientation::Horizontal.admits(Cell::new(9, 5)));
        assert!(!Orientation::Horizontal.admits(Cell::new(5, 1)));

        assert!(Orientation::Vertical.admits(Cell::new(2, 1)));
        assert!(Orientation::Vertical.admits(Cell::new(9, 8)));
        assert!(!Orientation::Vertical.admits(Cell::new(1, 5)));
        assert!(!Orientation::Vertical.admits(Cell::new(5, 9)));
    }

    #[test]
    fn test_player_spec_accepts_name_or_record() {
        let bare: PlayerSpec = serde_json::from_value(json!("alice")).unwrap();
        assert_eq!(bare, PlayerSpec::Name("alice".to_string()));

        let full: PlayerSpec = serde_json::from_value(json!({
            "name": "bob",
            "walls_remaining": 7,
            "position": [4, 6],
        }))
        .unwrap();
        assert_eq!(
            full,
            PlayerSpec::Full {
                name: "bob".to_string(),
                walls_remaining: 7,
                position: Cell::new(4, 6),
            }
        );
    }
}
