use std::fmt;
use std::str::FromStr;

/// How a frontier cell's queue priority is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriorityRule {
    /// Cost so far (uniform-cost search).
    CostSoFar,
    /// Cost so far plus the heuristic estimate (A*).
    CostPlusHeuristic,
    /// Heuristic estimate only (greedy best-first).
    HeuristicOnly,
}

impl PriorityRule {
    /// Queue priority for a cell with cost so far `g` and estimate `h`.
    #[inline]
    pub fn priority(self, g: f64, h: f64) -> f64 {
        match self {
            PriorityRule::CostSoFar => g,
            PriorityRule::CostPlusHeuristic => g + h,
            PriorityRule::HeuristicOnly => h,
        }
    }
}

/// Tagged configuration selecting one search variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Strategy {
    pub priority: PriorityRule,
    pub uses_heuristic: bool,
    pub bidirectional: bool,
}

/// The six supported search variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Algorithm {
    Dijkstra,
    AStar,
    Greedy,
    BidirectionalDijkstra,
    BidirectionalAStar,
    BidirectionalGreedy,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Dijkstra,
        Algorithm::AStar,
        Algorithm::Greedy,
        Algorithm::BidirectionalDijkstra,
        Algorithm::BidirectionalAStar,
        Algorithm::BidirectionalGreedy,
    ];

    pub const fn strategy(self) -> Strategy {
        let (priority, bidirectional) = match self {
            Algorithm::Dijkstra => (PriorityRule::CostSoFar, false),
            Algorithm::AStar => (PriorityRule::CostPlusHeuristic, false),
            Algorithm::Greedy => (PriorityRule::HeuristicOnly, false),
            Algorithm::BidirectionalDijkstra => (PriorityRule::CostSoFar, true),
            Algorithm::BidirectionalAStar => (PriorityRule::CostPlusHeuristic, true),
            Algorithm::BidirectionalGreedy => (PriorityRule::HeuristicOnly, true),
        };
        Strategy {
            priority,
            uses_heuristic: !matches!(priority, PriorityRule::CostSoFar),
            bidirectional,
        }
    }

    /// Whether paths from this variant are guaranteed shortest (given an
    /// admissible heuristic and no turn penalty).
    pub const fn is_optimal(self) -> bool {
        matches!(self, Algorithm::Dijkstra | Algorithm::AStar)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
            Algorithm::Greedy => "greedy",
            Algorithm::BidirectionalDijkstra => "bi-dijkstra",
            Algorithm::BidirectionalAStar => "bi-astar",
            Algorithm::BidirectionalGreedy => "bi-greedy",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut key = s
            .to_ascii_lowercase()
            .replace(['_', ' '], "-")
            .replace("a*", "astar");
        if let Some(rest) = key.strip_prefix("bidirectional-").map(str::to_owned) {
            key = format!("bi-{rest}");
        }
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == key)
            .ok_or_else(|| format!("unknown algorithm \u{201c}{s}\u{201d}"))
    }
}
