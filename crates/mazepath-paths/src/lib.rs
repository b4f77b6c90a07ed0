//! Step-driven grid search.
//!
//! This crate finds routes across a [`Grid`](mazepath_core::Grid) with six
//! search variants that share one driver:
//!
//! | [`Algorithm`] | Queue priority | Directions |
//! |---|---|---|
//! | `Dijkstra` | cost so far | 1 |
//! | `AStar` | cost so far + heuristic | 1 |
//! | `Greedy` | heuristic | 1 |
//! | `Bidirectional*` | as above | 2, alternating |
//!
//! Costs and heuristics come from a [`SearchConfig`] (Manhattan or
//! Euclidean metrics plus a per-bend [turn penalty](SearchConfig::turn_penalty)).
//! Open lists are [`IndexedPriorityQueue`]s with O(log n) decrease-key.
//!
//! Use [`find_path`] (or one of the per-algorithm shorthands) to run a
//! search to completion, or drive a [`Search`] one [`step`](Search::step)
//! at a time to animate it. Every Visited, Frontier and PathMarker mark the
//! engine writes onto the grid is also sent to an optional
//! [`ProgressReporter`].

mod config;
mod error;
mod metric;
mod path;
mod queue;
mod reporter;
mod search;
mod strategy;

pub use config::{DEFAULT_TURN_PENALTY, SearchConfig};
pub use error::SearchError;
pub use metric::{Metric, euclidean, manhattan};
pub use path::Path;
pub use queue::IndexedPriorityQueue;
pub use reporter::{ProgressReporter, Recorder};
pub use search::{
    Search, Step, astar, bidirectional_astar, bidirectional_dijkstra, bidirectional_greedy,
    dijkstra, find_path, greedy,
};
pub use strategy::{Algorithm, PriorityRule, Strategy};
