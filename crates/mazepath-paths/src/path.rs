use mazepath_core::Cell;

#[cfg(feature = "serde")]
use crate::error::SearchError;

/// A route from start to goal, both inclusive.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawPath"))]
pub struct Path {
    cells: Vec<Cell>,
    cost: f64,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawPath {
    cells: Vec<Cell>,
    cost: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPath> for Path {
    type Error = SearchError;

    fn try_from(raw: RawPath) -> Result<Self, SearchError> {
        if raw.cells.is_empty() {
            return Err(SearchError::EmptyPath);
        }
        Ok(Path::new(raw.cells, raw.cost))
    }
}

impl Path {
    pub(crate) fn new(cells: Vec<Cell>, cost: f64) -> Self {
        debug_assert!(!cells.is_empty());
        Self { cells, cost }
    }

    /// The cells of the route in walking order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    /// Number of cells, including both endpoints.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: an unreachable goal yields no `Path` at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Edge costs plus turn penalties, as computed by
    /// [`SearchConfig::path_cost`](crate::SearchConfig::path_cost).
    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn start(&self) -> Cell {
        self.cells[0]
    }

    pub fn goal(&self) -> Cell {
        self.cells[self.cells.len() - 1]
    }

    /// Number of bends along the route.
    pub fn turns(&self) -> usize {
        self.cells
            .windows(3)
            .filter(|w| !w[0].in_line(w[1], w[2]))
            .count()
    }

    /// Whether every consecutive pair of cells is axis-adjacent.
    pub fn is_contiguous(&self) -> bool {
        self.cells
            .windows(2)
            .all(|w| (w[0].x - w[1].x).abs() + (w[0].y - w[1].y).abs() == 1)
    }
}

impl AsRef<[Cell]> for Path {
    fn as_ref(&self) -> &[Cell] {
        &self.cells
    }
}
