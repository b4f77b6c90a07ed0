//! The board grid searched by the engine.
//!
//! [`Grid`] is a fixed-size, row-major array of [`CellState`] values. Walls
//! are the only state that blocks movement; the other non-open states are
//! marks left behind by a search and can be wiped with
//! [`Grid::clear_search_marks`].
//!
//! Boards can be written as ASCII art and parsed with [`Grid::from_ascii`]:
//!
//! ```text
//! #####
//! #...#
//! #.#.#
//! #####
//! ```

use std::fmt;

use thiserror::Error;

use crate::geom::{Cell, Range};

/// State of one board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Open,
    Wall,
    PathMarker,
    Visited,
    Frontier,
}

impl CellState {
    /// Whether a search may step onto a square in this state.
    #[inline]
    pub fn is_passable(self) -> bool {
        self != CellState::Wall
    }

    /// Whether this state was written by a search rather than by the board
    /// author.
    #[inline]
    pub fn is_search_mark(self) -> bool {
        matches!(
            self,
            CellState::PathMarker | CellState::Visited | CellState::Frontier
        )
    }

    /// ASCII representation used by [`Grid::from_ascii`] and `Display`.
    pub const fn as_char(self) -> char {
        match self {
            CellState::Open => '.',
            CellState::Wall => '#',
            CellState::PathMarker => 'o',
            CellState::Visited => ',',
            CellState::Frontier => '+',
        }
    }

    /// Inverse of [`as_char`](Self::as_char).
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(CellState::Open),
            '#' => Some(CellState::Wall),
            'o' => Some(CellState::PathMarker),
            ',' => Some(CellState::Visited),
            '+' => Some(CellState::Frontier),
            _ => None,
        }
    }
}

/// Errors raised while building a [`Grid`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Dimensions are zero, negative, or too large to index.
    #[error("grid: invalid size {width}x{height}")]
    InvalidSize { width: i32, height: i32 },
    /// ASCII lines have different widths.
    #[error("grid: line {line} is {found} wide, expected {expected}")]
    InconsistentSize {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A character outside the board alphabet was found.
    #[error("grid: invalid character \u{201c}{ch}\u{201d} at {pos}")]
    InvalidChar { ch: char, pos: Cell },
    /// The cell vector does not cover `width × height` squares.
    #[error("grid: {found} cells for a board of {expected}")]
    CellCount { expected: usize, found: usize },
}

/// Number of squares on a `width × height` board, if both dimensions are
/// positive and every index fits in an `i32`.
fn board_len(width: i32, height: i32) -> Result<usize, GridError> {
    match width.checked_mul(height) {
        Some(n) if width > 0 && height > 0 => Ok(n as usize),
        _ => Err(GridError::InvalidSize { width, height }),
    }
}

/// A 2D board of [`CellState`] values with fixed dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGrid"))]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<CellState>,
}

/// Unchecked wire form of a [`Grid`]; deserialized boards go through
/// [`Grid::from_cells`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGrid {
    width: i32,
    height: i32,
    cells: Vec<CellState>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGrid> for Grid {
    type Error = GridError;

    fn try_from(raw: RawGrid) -> Result<Self, GridError> {
        Grid::from_cells(raw.width, raw.height, raw.cells)
    }
}

impl Grid {
    /// Create an all-open grid.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not positive. Use
    /// [`try_new`](Self::try_new) for a checked version.
    pub fn new(width: i32, height: i32) -> Self {
        match Self::try_new(width, height) {
            Ok(g) => g,
            Err(e) => panic!("{e}"),
        }
    }

    /// Create an all-open grid, rejecting non-positive dimensions and
    /// boards whose area overflows an `i32`.
    pub fn try_new(width: i32, height: i32) -> Result<Self, GridError> {
        let len = board_len(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![CellState::Open; len],
        })
    }

    /// Build a grid from row-major `cells`, which must hold exactly
    /// `width × height` states.
    pub fn from_cells(width: i32, height: i32, cells: Vec<CellState>) -> Result<Self, GridError> {
        let expected = board_len(width, height)?;
        if cells.len() != expected {
            return Err(GridError::CellCount {
                expected,
                found: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Create a grid with an open interior and a one-square wall border.
    pub fn bordered(width: i32, height: i32) -> Self {
        let mut g = Self::new(width, height);
        for c in g.bounds() {
            if c.x == 0 || c.y == 0 || c.x == width - 1 || c.y == height - 1 {
                g.set_wall(c);
            }
        }
        g
    }

    /// Parse an ASCII board. Surrounding whitespace is trimmed from the
    /// whole string and from each line; all lines must then have the same
    /// width.
    pub fn from_ascii(s: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = s.trim().lines().map(str::trim).collect();
        let width = lines.first().map_or(0, |l| l.chars().count());
        let mut cells = Vec::with_capacity(width * lines.len());
        for (y, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(GridError::InconsistentSize {
                    line: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in line.chars().enumerate() {
                let state = CellState::from_char(ch).ok_or(GridError::InvalidChar {
                    ch,
                    pos: Cell::new(x as i32, y as i32),
                })?;
                cells.push(state);
            }
        }
        let width = i32::try_from(width).unwrap_or(i32::MAX);
        let height = i32::try_from(lines.len()).unwrap_or(i32::MAX);
        Self::from_cells(width, height, cells)
    }

    /// Width in squares.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in squares.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The rectangle covered by this grid, anchored at the origin.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    /// Whether (x, y) lies on the board.
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Whether `c` lies on the board.
    #[inline]
    pub fn contains(&self, c: Cell) -> bool {
        self.in_bounds(c.x, c.y)
    }

    /// Flat row-major index of `c`.
    ///
    /// # Panics
    ///
    /// Panics if `c` is outside the board.
    #[inline]
    pub fn index(&self, c: Cell) -> usize {
        assert!(
            self.contains(c),
            "cell {c} outside {}x{} grid",
            self.width,
            self.height
        );
        (c.y * self.width + c.x) as usize
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn cell(&self, idx: usize) -> Cell {
        let w = self.width as usize;
        Cell::new((idx % w) as i32, (idx / w) as i32)
    }

    /// Number of squares on the board.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: grids have positive dimensions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// State of `c`, or `None` if it is off the board.
    #[inline]
    pub fn at(&self, c: Cell) -> Option<CellState> {
        if !self.contains(c) {
            return None;
        }
        Some(self.cells[(c.y * self.width + c.x) as usize])
    }

    /// State of `c`.
    ///
    /// # Panics
    ///
    /// Panics if `c` is outside the board.
    #[inline]
    pub fn get(&self, c: Cell) -> CellState {
        self.cells[self.index(c)]
    }

    /// Overwrite the state of `c`.
    ///
    /// # Panics
    ///
    /// Panics if `c` is outside the board.
    #[inline]
    pub fn mark(&mut self, c: Cell, state: CellState) {
        let idx = self.index(c);
        self.cells[idx] = state;
    }

    /// Shorthand for marking `c` as a wall.
    #[inline]
    pub fn set_wall(&mut self, c: Cell) {
        self.mark(c, CellState::Wall);
    }

    /// Whether `c` is on the board and not a wall.
    #[inline]
    pub fn is_passable(&self, c: Cell) -> bool {
        self.at(c).is_some_and(CellState::is_passable)
    }

    /// Passable axis-aligned neighbours of `c`, in South, East, North, West
    /// order.
    pub fn neighbors(&self, c: Cell) -> impl Iterator<Item = Cell> + '_ {
        c.neighbors_4()
            .into_iter()
            .filter(move |&n| self.is_passable(n))
    }

    /// Set every square to `state`.
    pub fn fill(&mut self, state: CellState) {
        self.cells.fill(state);
    }

    /// Return every Visited, Frontier and PathMarker square to Open. Walls
    /// are left untouched.
    pub fn clear_search_marks(&mut self) {
        for s in self.cells.iter_mut() {
            if s.is_search_mark() {
                *s = CellState::Open;
            }
        }
    }

    /// Count the squares in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&s| s == state).count()
    }

    /// Iterate over `(Cell, CellState)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &s)| (self.cell(i), s))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width as usize) {
            for s in row {
                write!(f, "{}", s.as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
