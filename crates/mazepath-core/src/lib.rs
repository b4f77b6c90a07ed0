//! **mazepath-core**: core types for the mazepath grid pathfinding engine.
//!
//! This crate provides the geometry primitives ([`Cell`], [`Range`]) and the
//! [`Grid`] of [`CellState`] values that searches read from and mark up.

pub mod geom;
pub mod grid;

pub use geom::{Cell, Range, RangeIter};
pub use grid::{CellState, Grid, GridError};
