//! Board generators for mazepath.
//!
//! [`MazeGen`] produces the grids the search engine consumes: perfect mazes
//! carved by depth-first search, and open boards sprinkled with random
//! obstacles.

pub mod maze;

pub use maze::{Maze, MazeGen, board_size};
