use std::fmt;
use std::str::FromStr;

use mazepath_core::Cell;

/// Manhattan (L1) distance between two cells.
#[inline]
pub fn manhattan(a: Cell, b: Cell) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Euclidean (L2) distance between two cells.
#[inline]
pub fn euclidean(a: Cell, b: Cell) -> f64 {
    let dx = f64::from(a.x - b.x);
    let dy = f64::from(a.y - b.y);
    (dx * dx + dy * dy).sqrt()
}

/// Distance function used for edge costs and heuristic estimates.
///
/// On the 4-connected grid both metrics give every edge a cost of 1. As a
/// heuristic, Euclidean never exceeds Manhattan, so either metric is
/// admissible under Manhattan costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Metric {
    #[default]
    Manhattan,
    Euclidean,
}

impl Metric {
    /// Distance from `a` to `b` under this metric.
    #[inline]
    pub fn distance(self, a: Cell, b: Cell) -> f64 {
        match self {
            Metric::Manhattan => f64::from(manhattan(a, b)),
            Metric::Euclidean => euclidean(a, b),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Metric::Manhattan => "manhattan",
            Metric::Euclidean => "euclidean",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "manhattan" | "l1" => Ok(Metric::Manhattan),
            "euclidean" | "l2" => Ok(Metric::Euclidean),
            other => Err(format!("unknown metric \u{201c}{other}\u{201d}")),
        }
    }
}
