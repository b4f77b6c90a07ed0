use mazepath_core::{Cell, CellState};

/// Observer notified whenever a search writes a mark onto the grid.
///
/// Reporting never influences the search: the same grid, endpoints and
/// configuration produce the same path whether or not a reporter is
/// attached. Any `FnMut(Cell, CellState)` closure is a reporter.
pub trait ProgressReporter {
    fn report(&mut self, cell: Cell, state: CellState);
}

impl<F: FnMut(Cell, CellState)> ProgressReporter for F {
    #[inline]
    fn report(&mut self, cell: Cell, state: CellState) {
        self(cell, state)
    }
}

/// A reporter that keeps every event, in order.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub events: Vec<(Cell, CellState)>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events carrying `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.events.iter().filter(|(_, s)| *s == state).count()
    }
}

impl ProgressReporter for Recorder {
    fn report(&mut self, cell: Cell, state: CellState) {
        self.events.push((cell, state));
    }
}
