//! Maze carving and obstacle scattering.
//!
//! A maze of `cols × rows` rooms lives on a `(2·cols + 1) × (2·rows + 1)`
//! board: rooms sit on odd coordinates and the squares between two rooms
//! are the walls that carving knocks down.

use log::debug;
use mazepath_core::{Cell, CellState, Grid};
use rand::{Rng, RngExt};

/// Two-square jumps between neighbouring rooms: North, East, South, West.
const JUMPS: [Cell; 4] = [
    Cell::new(0, -2),
    Cell::new(2, 0),
    Cell::new(0, 2),
    Cell::new(-2, 0),
];

/// Board width and height for a maze of `cols × rows` rooms, saturating at
/// `i32::MAX`.
pub fn board_size(cols: i32, rows: i32) -> (i32, i32) {
    let side = |n: i32| n.max(1).saturating_mul(2).saturating_add(1);
    (side(cols), side(rows))
}

/// A carved maze and its two openings in the outer wall.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Maze {
    pub grid: Grid,
    /// Gap in the top wall, above the top-left room.
    pub entrance: Cell,
    /// Gap in the bottom wall, below the bottom-right room.
    pub exit: Cell,
}

/// Board generator driven by a random number generator.
pub struct MazeGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> MazeGen<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Carve a perfect maze (exactly one route between any two rooms) of
    /// `cols × rows` rooms using an iterative depth-first backtracker.
    ///
    /// Dimensions below one room are raised to one.
    ///
    /// # Panics
    ///
    /// Panics if the board area does not fit in an `i32`
    /// (see [`Grid::try_new`]).
    pub fn carve(&mut self, cols: i32, rows: i32) -> Maze {
        let (cols, rows) = (cols.max(1), rows.max(1));
        let (w, h) = board_size(cols, rows);
        let mut grid = Grid::new(w, h);
        grid.fill(CellState::Wall);

        let origin = Cell::new(
            2 * self.rng.random_range(0..cols) + 1,
            2 * self.rng.random_range(0..rows) + 1,
        );
        grid.mark(origin, CellState::Open);

        let is_room = |c: Cell| c.x > 0 && c.x < w - 1 && c.y > 0 && c.y < h - 1;
        let mut stack = vec![origin];
        let mut choices = Vec::with_capacity(JUMPS.len());
        while let Some(&cur) = stack.last() {
            choices.clear();
            choices.extend(
                JUMPS
                    .iter()
                    .copied()
                    .filter(|&d| is_room(cur + d) && grid.get(cur + d) == CellState::Wall),
            );
            if choices.is_empty() {
                stack.pop();
                continue;
            }
            let d = choices[self.rng.random_range(0..choices.len())];
            grid.mark(cur + Cell::new(d.x / 2, d.y / 2), CellState::Open);
            grid.mark(cur + d, CellState::Open);
            stack.push(cur + d);
        }

        let entrance = Cell::new(1, 0);
        let exit = Cell::new(w - 2, h - 1);
        grid.mark(entrance, CellState::Open);
        grid.mark(exit, CellState::Open);
        debug!("carved {cols}x{rows} maze on {w}x{h} board from {origin}");

        Maze {
            grid,
            entrance,
            exit,
        }
    }

    /// Turn each open square into a wall with probability `density`
    /// (clamped to 0.0–1.0), leaving the squares in `keep` alone.
    ///
    /// Returns the number of walls added.
    pub fn scatter(&mut self, grid: &mut Grid, density: f64, keep: &[Cell]) -> usize {
        let density = density.clamp(0.0, 1.0);
        let mut added = 0;
        for c in grid.bounds() {
            if grid.get(c) != CellState::Open || keep.contains(&c) {
                continue;
            }
            let r: f64 = self.rng.random();
            if r < density {
                grid.set_wall(c);
                added += 1;
            }
        }
        debug!("scattered {added} walls over {}x{} board", grid.width(), grid.height());
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn open_region(grid: &Grid, from: Cell) -> usize {
        let mut seen = vec![false; grid.len()];
        let mut stack = vec![from];
        seen[grid.index(from)] = true;
        let mut n = 0;
        while let Some(c) = stack.pop() {
            n += 1;
            for nb in grid.neighbors(c) {
                let i = grid.index(nb);
                if !seen[i] {
                    seen[i] = true;
                    stack.push(nb);
                }
            }
        }
        n
    }

    #[test]
    fn board_dimensions() {
        assert_eq!(board_size(4, 3), (9, 7));
        assert_eq!(board_size(0, -2), (3, 3));
        assert_eq!(board_size(i32::MAX, 1), (i32::MAX, 3));
        let (w, h) = board_size(40_000, 40_000);
        assert!(Grid::try_new(w, h).is_err());
    }

    #[test]
    fn carve_opens_entrance_and_exit() {
        let maze = MazeGen::new(StdRng::seed_from_u64(1)).carve(6, 4);
        assert_eq!((maze.grid.width(), maze.grid.height()), (13, 9));
        assert_eq!(maze.entrance, Cell::new(1, 0));
        assert_eq!(maze.exit, Cell::new(11, 8));
        assert_eq!(maze.grid.get(maze.entrance), CellState::Open);
        assert_eq!(maze.grid.get(maze.exit), CellState::Open);
        assert_eq!(maze.grid.get(Cell::new(0, 0)), CellState::Wall);
    }

    #[test]
    fn carved_maze_is_perfect() {
        for seed in 0..8 {
            let (cols, rows) = (7, 5);
            let maze = MazeGen::new(StdRng::seed_from_u64(seed)).carve(cols, rows);
            let rooms = (cols * rows) as usize;
            // Every room, the rooms - 1 passages of a spanning tree, and the
            // two openings.
            let open = maze.grid.count(CellState::Open);
            assert_eq!(open, rooms + (rooms - 1) + 2, "seed {seed}");
            assert_eq!(open_region(&maze.grid, maze.entrance), open, "seed {seed}");
            for y in (1..2 * rows).step_by(2) {
                for x in (1..2 * cols).step_by(2) {
                    assert_eq!(maze.grid.get(Cell::new(x, y)), CellState::Open);
                }
            }
        }
    }

    #[test]
    fn carving_is_reproducible() {
        let a = MazeGen::new(StdRng::seed_from_u64(42)).carve(10, 10);
        let b = MazeGen::new(StdRng::seed_from_u64(42)).carve(10, 10);
        assert_eq!(a, b);
    }

    #[test]
    fn single_room_maze() {
        let maze = MazeGen::new(StdRng::seed_from_u64(5)).carve(1, 1);
        assert_eq!(maze.grid.to_string(), "#.#\n#.#\n#.#\n");
    }

    #[test]
    fn scatter_respects_keep_and_density() {
        let mut mg = MazeGen::new(StdRng::seed_from_u64(9));
        let keep = [Cell::new(0, 0), Cell::new(9, 9)];

        let mut grid = Grid::new(10, 10);
        assert_eq!(mg.scatter(&mut grid, 0.0, &keep), 0);
        assert_eq!(grid.count(CellState::Open), 100);

        let added = mg.scatter(&mut grid, 1.0, &keep);
        assert_eq!(added, 98);
        assert_eq!(grid.get(keep[0]), CellState::Open);
        assert_eq!(grid.get(keep[1]), CellState::Open);

        let mut grid = Grid::new(20, 20);
        let added = mg.scatter(&mut grid, 0.3, &[]);
        assert!(added > 40 && added < 200, "added {added}");
        assert_eq!(grid.count(CellState::Wall), added);
    }

    #[test]
    fn scatter_leaves_existing_walls() {
        let mut grid = Grid::bordered(6, 6);
        let walls = grid.count(CellState::Wall);
        let added = MazeGen::new(StdRng::seed_from_u64(2)).scatter(&mut grid, 0.5, &[]);
        assert_eq!(grid.count(CellState::Wall), walls + added);
    }
}
