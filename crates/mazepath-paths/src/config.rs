use mazepath_core::Cell;

use crate::error::SearchError;
use crate::metric::Metric;

/// Turn penalty used by [`SearchConfig::default`].
///
/// Small enough that it only separates routes of equal length.
pub const DEFAULT_TURN_PENALTY: f64 = 0.01;

/// Cost and heuristic model for a search.
///
/// The cost of stepping from `cur` to `next` is `cost.distance(cur, next)`
/// plus [`turn_penalty`](Self::turn_penalty) when the step bends away from
/// the direction `cur` was entered from.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Metric for edge costs.
    pub cost: Metric,
    /// Metric for the heuristic estimate of the remaining distance.
    pub heuristic: Metric,
    /// Extra cost charged for every bend in a route.
    pub turn_penalty: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            cost: Metric::Manhattan,
            heuristic: Metric::Manhattan,
            turn_penalty: DEFAULT_TURN_PENALTY,
        }
    }
}

impl SearchConfig {
    /// Manhattan costs and heuristic with no turn penalty: plain shortest
    /// paths.
    pub fn shortest() -> Self {
        Self {
            turn_penalty: 0.0,
            ..Self::default()
        }
    }

    pub fn with_cost(mut self, cost: Metric) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_heuristic(mut self, heuristic: Metric) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_turn_penalty(mut self, penalty: f64) -> Self {
        self.turn_penalty = penalty;
        self
    }

    /// Reject penalties that would make edge costs negative or undefined.
    pub fn validate(&self) -> Result<(), SearchError> {
        if !self.turn_penalty.is_finite() || self.turn_penalty < 0.0 {
            return Err(SearchError::InvalidTurnPenalty(self.turn_penalty));
        }
        Ok(())
    }

    /// Cost of the edge between adjacent cells `a` and `b`.
    #[inline]
    pub fn cost(&self, a: Cell, b: Cell) -> f64 {
        self.cost.distance(a, b)
    }

    /// Estimated remaining cost from `a` to `goal`.
    #[inline]
    pub fn heuristic(&self, a: Cell, goal: Cell) -> f64 {
        self.heuristic.distance(a, goal)
    }

    /// Penalty for the move `prev -> cur -> next`: zero when the three cells
    /// are collinear or when there is no `prev`, the configured penalty
    /// otherwise.
    #[inline]
    pub fn turn_penalty(&self, prev: Option<Cell>, cur: Cell, next: Cell) -> f64 {
        match prev {
            Some(p) if !p.in_line(cur, next) => self.turn_penalty,
            _ => 0.0,
        }
    }

    /// Total cost of a route: edge costs plus a penalty per bend.
    pub fn path_cost(&self, cells: &[Cell]) -> f64 {
        let edges: f64 = cells.windows(2).map(|w| self.cost(w[0], w[1])).sum();
        let turns: f64 = cells
            .windows(3)
            .map(|w| self.turn_penalty(Some(w[0]), w[1], w[2]))
            .sum();
        edges + turns
    }
}
