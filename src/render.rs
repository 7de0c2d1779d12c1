use crate::enums::BOARD_SIZE;
use crate::game::GameSnapshot;

// Cells sit every 4 columns and every 2 rows of the character grid;
// walls occupy the gaps in between.
const GRID_WIDTH: usize = BOARD_SIZE as usize * 4 - 3;
const GRID_HEIGHT: usize = BOARD_SIZE as usize * 2 - 1;

fn grid_row(y: u8) -> usize {
    ((BOARD_SIZE - y) * 2) as usize
}

fn grid_col(x: u8) -> usize {
    ((x - 1) * 4) as usize
}

/// Draws a snapshot as an ASCII board, row 9 on top.
pub fn render_board(snapshot: &GameSnapshot) -> String {
    let mut grid = vec![vec![' '; GRID_WIDTH]; GRID_HEIGHT];

    for y in 1..=BOARD_SIZE {
        for x in 1..=BOARD_SIZE {
            grid[grid_row(y)][grid_col(x)] = '.';
        }
    }

    for (index, player) in snapshot.players.iter().enumerate() {
        grid[grid_row(player.position.y)][grid_col(player.position.x)] =
            char::from(b'1' + index as u8);
    }

    // A horizontal wall fills the gap row under its board row, across
    // its own column and the next.
    for wall in &snapshot.walls.horizontal {
        let row = grid_row(wall.y) + 1;
        for col in grid_col(wall.x)..=grid_col(wall.x) + 6 {
            grid[row][col] = '-';
        }
    }

    // A vertical wall fills the gap column left of its own column,
    // across its row and the next one up.
    for wall in &snapshot.walls.vertical {
        let col = grid_col(wall.x) - 2;
        for row in grid_row(wall.y + 1)..=grid_row(wall.y) {
            grid[row][col] = '|';
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Legend: 1={} 2={}\n",
        snapshot.players[0].name, snapshot.players[1].name
    ));
    out.push_str(&format!("   {}\n", "-".repeat(GRID_WIDTH + 2)));
    for (index, cells) in grid.iter().enumerate() {
        let body: String = cells.iter().collect();
        if index % 2 == 0 {
            let y = BOARD_SIZE - index as u8 / 2;
            out.push_str(&format!("{} | {} |\n", y, body));
        } else {
            out.push_str(&format!("  | {} |\n", body));
        }
    }
    out.push_str(&format!("--|{}\n", "-".repeat(GRID_WIDTH + 2)));
    let mut footer = String::from("  | ");
    for x in 1..=BOARD_SIZE {
        footer.push_str(&format!("{:<4}", x));
    }
    out.push_str(footer.trim_end());
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::{Cell, PlayerSpec};
    use crate::game::Quoridor;

    // Output line layout: legend, top border, 17 grid lines, bottom
    // border, column footer. Grid line i starts its body at column 4.
    const FIRST_GRID_LINE: usize = 2;

    fn board_lines(game: &Quoridor) -> Vec<String> {
        render_board(&game.snapshot())
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn fresh_game() -> Quoridor {
        Quoridor::new([PlayerSpec::from("alice"), PlayerSpec::from("bob")], None).unwrap()
    }

    #[test]
    fn test_renders_pawns_on_their_rows() {
        let lines = board_lines(&fresh_game());

        assert_eq!(lines[0], "Legend: 1=alice 2=bob");
        assert_eq!(
            lines[FIRST_GRID_LINE],
            "9 | .   .   .   .   2   .   .   .   . |"
        );
        assert_eq!(
            lines[FIRST_GRID_LINE + 16],
            "1 | .   .   .   .   1   .   .   .   . |"
        );
        assert_eq!(lines.len(), 21);
    }

    #[test]
    fn test_renders_horizontal_wall() {
        let mut game = fresh_game();
        game.place_wall(1, Cell::new(5, 5), crate::enums::Orientation::Horizontal)
            .unwrap();
        let lines = board_lines(&game);

        // Gap row below board row 5, dashes across columns 5 and 6.
        let expected = format!("  | {}{}{} |", " ".repeat(16), "-".repeat(7), " ".repeat(10));
        assert_eq!(lines[FIRST_GRID_LINE + grid_row(5) + 1], expected);
    }

    #[test]
    fn test_renders_vertical_wall() {
        let mut game = fresh_game();
        game.place_wall(2, Cell::new(5, 5), crate::enums::Orientation::Vertical)
            .unwrap();
        let lines = board_lines(&game);

        let col = 4 + grid_col(5) - 2;
        for row in grid_row(6)..=grid_row(5) {
            let line = &lines[FIRST_GRID_LINE + row];
            assert_eq!(line.chars().nth(col), Some('|'), "row {row}: {line}");
        }
    }

    #[test]
    fn test_display_delegates_to_renderer() {
        let game = fresh_game();
        assert_eq!(game.to_string(), render_board(&game.snapshot()));
    }
}
