use mazepath_core::Cell;
use thiserror::Error;

/// Contract violations detected by the search engine.
///
/// An unreachable goal is not an error: it is reported as `Ok(None)` by the
/// run-to-completion entry points and as
/// [`Step::Unreachable`](crate::Step::Unreachable) by [`Search::step`](crate::Search::step).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// A start or goal coordinate lies outside the grid.
    #[error("cell {0} is outside the grid")]
    OutOfBounds(Cell),
    /// A start or goal coordinate lies on a wall.
    #[error("start or goal {0} is a wall")]
    StartOrGoalBlocked(Cell),
    /// `extract_min` was called on an empty queue.
    #[error("extract_min on an empty priority queue")]
    EmptyQueueUnderflow,
    /// The configured turn penalty is negative or not finite.
    #[error("turn penalty must be finite and non-negative, got {0}")]
    InvalidTurnPenalty(f64),
    /// A deserialized path holds no cells.
    #[error("a path must hold at least one cell")]
    EmptyPath,
}
