use std::collections::{HashMap, VecDeque};

use petgraph::graphmap::DiGraphMap;

pub use petgraph::algo::has_path_connecting;

use crate::enums::{Cell, BOARD_SIZE};

/// The admissible-move graph, rebuilt from scratch on every query.
pub type MoveGraph = DiGraphMap<Node, ()>;

/// A graph node: a board cell or one of the two goal sinks.
///
/// `Goal1` is entered from every cell on row 9, `Goal2` from every cell
/// on row 1. Goal sinks have no outgoing edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Node {
    Cell(Cell),
    Goal1,
    Goal2,
}

impl Node {
    /// Goal sink assigned to a player id (1 or 2).
    pub fn goal(player: u8) -> Node {
        if player == 1 {
            Node::Goal1
        } else {
            Node::Goal2
        }
    }
}

/// Builds the directed admissible-move graph for the given token
/// positions and wall sets.
///
/// Wall coordinates must already be inside the ranges enforced by the
/// legality checker; positions must be on the board.
pub fn build_graph(positions: [Cell; 2], walls_h: &[Cell], walls_v: &[Cell]) -> MoveGraph {
    let mut graph = base_grid(walls_h, walls_v);

    let (first, second) = (Node::Cell(positions[0]), Node::Cell(positions[1]));
    if graph.contains_edge(first, second) || graph.contains_edge(second, first) {
        graph.remove_edge(first, second);
        graph.remove_edge(second, first);
        add_jump_edges(&mut graph, positions[0], positions[1]);
        add_jump_edges(&mut graph, positions[1], positions[0]);
    }

    for x in 1..=BOARD_SIZE {
        graph.add_edge(Node::Cell(Cell::new(x, BOARD_SIZE)), Node::Goal1, ());
        graph.add_edge(Node::Cell(Cell::new(x, 1)), Node::Goal2, ());
    }

    graph
}

/// Grid adjacency with wall-severed edges, before the jump rule and the
/// goal sinks are applied.
fn base_grid(walls_h: &[Cell], walls_v: &[Cell]) -> MoveGraph {
    let mut graph = MoveGraph::new();

    for x in 1..=BOARD_SIZE {
        for y in 1..=BOARD_SIZE {
            let here = Node::Cell(Cell::new(x, y));
            if x > 1 {
                graph.add_edge(here, Node::Cell(Cell::new(x - 1, y)), ());
            }
            if x < BOARD_SIZE {
                graph.add_edge(here, Node::Cell(Cell::new(x + 1, y)), ());
            }
            if y > 1 {
                graph.add_edge(here, Node::Cell(Cell::new(x, y - 1)), ());
            }
            if y < BOARD_SIZE {
                graph.add_edge(here, Node::Cell(Cell::new(x, y + 1)), ());
            }
        }
    }

    // A horizontal wall at (x, y) cuts vertical movement between rows
    // y-1 and y for columns x and x+1.
    for &wall in walls_h {
        sever(&mut graph, Cell::new(wall.x, wall.y - 1), Cell::new(wall.x, wall.y));
        sever(
            &mut graph,
            Cell::new(wall.x + 1, wall.y - 1),
            Cell::new(wall.x + 1, wall.y),
        );
    }

    // A vertical wall at (x, y) cuts horizontal movement between
    // columns x-1 and x for rows y and y+1.
    for &wall in walls_v {
        sever(&mut graph, Cell::new(wall.x - 1, wall.y), Cell::new(wall.x, wall.y));
        sever(
            &mut graph,
            Cell::new(wall.x - 1, wall.y + 1),
            Cell::new(wall.x, wall.y + 1),
        );
    }

    graph
}

fn sever(graph: &mut MoveGraph, a: Cell, b: Cell) {
    graph.remove_edge(Node::Cell(a), Node::Cell(b));
    graph.remove_edge(Node::Cell(b), Node::Cell(a));
}

/// Adds the jump edges for one ordered (jumper, blocker) pair.
///
/// The straight jump continues past the blocker in the same direction;
/// when a wall or the board edge blocks it, the jumper may instead
/// sidestep to any remaining outgoing neighbor of the blocker.
fn add_jump_edges(graph: &mut MoveGraph, jumper: Cell, blocker: Cell) {
    let straight_x = 2 * blocker.x as i16 - jumper.x as i16;
    let straight_y = 2 * blocker.y as i16 - jumper.y as i16;

    if (1..=BOARD_SIZE as i16).contains(&straight_x)
        && (1..=BOARD_SIZE as i16).contains(&straight_y)
    {
        let straight = Node::Cell(Cell::new(straight_x as u8, straight_y as u8));
        if graph.contains_edge(Node::Cell(blocker), straight) {
            graph.add_edge(Node::Cell(jumper), straight, ());
            return;
        }
    }

    let sidesteps: Vec<Node> = graph.neighbors(Node::Cell(blocker)).collect();
    for target in sidesteps {
        graph.add_edge(Node::Cell(jumper), target, ());
    }
}

/// Shortest path by hop count from `from` to `to`, both endpoints
/// included, or `None` when `to` is unreachable.
///
/// Ties are broken by edge insertion order, so the result is
/// deterministic for a given board state.
pub fn shortest_path(graph: &MoveGraph, from: Node, to: Node) -> Option<Vec<Node>> {
    if from == to {
        return Some(vec![from]);
    }

    let mut parents: HashMap<Node, Node> = HashMap::new();
    let mut queue = VecDeque::from([from]);

    while let Some(node) = queue.pop_front() {
        for next in graph.neighbors(node) {
            if next == from || parents.contains_key(&next) {
                continue;
            }
            parents.insert(next, node);
            if next == to {
                let mut path = vec![to];
                let mut cursor = to;
                while let Some(&previous) = parents.get(&cursor) {
                    path.push(previous);
                    cursor = previous;
                }
                path.reverse();
                return Some(path);
            }
            queue.push_back(next);
        }
    }

    None
}
