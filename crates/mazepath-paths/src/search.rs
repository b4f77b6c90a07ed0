use log::{debug, trace};
use mazepath_core::{Cell, CellState, Grid};

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::path::Path;
use crate::queue::IndexedPriorityQueue;
use crate::reporter::ProgressReporter;
use crate::strategy::{Algorithm, Strategy};

const NO_PARENT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// Per-direction search state
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct Node {
    g: f64,
    parent: usize,
    closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: f64::INFINITY,
            parent: NO_PARENT,
            closed: false,
        }
    }
}

enum Expansion {
    Continue,
    Reached(Cell),
    Exhausted,
}

/// Best known costs and predecessors for one search direction, plus its
/// open list.
struct SearchState {
    source: Cell,
    target: Cell,
    nodes: Vec<Node>,
    open: IndexedPriorityQueue<Cell>,
}

impl SearchState {
    fn new(
        grid: &Grid,
        source: Cell,
        target: Cell,
        strategy: Strategy,
        config: &SearchConfig,
    ) -> Self {
        let mut state = Self {
            source,
            target,
            nodes: vec![Node::default(); grid.len()],
            open: IndexedPriorityQueue::new(),
        };
        let si = grid.index(source);
        state.nodes[si].g = 0.0;
        let h = if strategy.uses_heuristic {
            config.heuristic(source, target)
        } else {
            0.0
        };
        state.open.insert(source, strategy.priority.priority(0.0, h));
        state
    }

    #[inline]
    fn is_closed(&self, grid: &Grid, c: Cell) -> bool {
        self.nodes[grid.index(c)].closed
    }

    /// Pop one cell, finalize it, and relax its neighbours.
    ///
    /// With `other` set (bidirectional mode) the search is done as soon as a
    /// popped cell is already closed on the other side; otherwise when the
    /// popped cell is the target.
    fn expand<'r>(
        &mut self,
        grid: &mut Grid,
        strategy: Strategy,
        config: &SearchConfig,
        other: Option<&SearchState>,
        reporter: &mut Option<&mut (dyn ProgressReporter + 'r)>,
        nbuf: &mut Vec<Cell>,
    ) -> Result<Expansion, SearchError> {
        if self.open.is_empty() {
            return Ok(Expansion::Exhausted);
        }
        let cur = self.open.extract_min()?;
        let ci = grid.index(cur);
        self.nodes[ci].closed = true;
        emit(grid, reporter, cur, CellState::Visited);
        trace!("expand {cur} from {} (g = {})", self.source, self.nodes[ci].g);

        let done = match other {
            Some(o) => o.is_closed(grid, cur),
            None => cur == self.target,
        };
        if done {
            return Ok(Expansion::Reached(cur));
        }

        let g = self.nodes[ci].g;
        let prev = match self.nodes[ci].parent {
            NO_PARENT => None,
            pi => Some(grid.cell(pi)),
        };

        nbuf.clear();
        nbuf.extend(grid.neighbors(cur));
        for &n in nbuf.iter() {
            let ni = grid.index(n);
            let node = &mut self.nodes[ni];
            if node.closed {
                continue;
            }
            let tentative = g + config.cost(cur, n) + config.turn_penalty(prev, cur, n);
            if tentative >= node.g {
                continue;
            }
            node.g = tentative;
            node.parent = ci;

            let h = if strategy.uses_heuristic {
                config.heuristic(n, self.target)
            } else {
                0.0
            };
            self.open.insert(n, strategy.priority.priority(tentative, h));
            emit(grid, reporter, n, CellState::Frontier);
        }
        Ok(Expansion::Continue)
    }

    /// Predecessor chain from `from` back to this direction's source, both
    /// inclusive.
    fn trace_back(&self, grid: &Grid, from: Cell) -> Vec<Cell> {
        let mut chain = Vec::new();
        let mut i = grid.index(from);
        while i != NO_PARENT {
            chain.push(grid.cell(i));
            i = self.nodes[i].parent;
        }
        chain
    }
}

fn emit<'r>(
    grid: &mut Grid,
    reporter: &mut Option<&mut (dyn ProgressReporter + 'r)>,
    cell: Cell,
    state: CellState,
) {
    grid.mark(cell, state);
    if let Some(r) = reporter {
        r.report(cell, state);
    }
}

// ---------------------------------------------------------------------------
// Search driver
// ---------------------------------------------------------------------------

/// Result of one [`Search::step`].
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// A node was expanded; the search is not finished.
    Pending,
    /// The goal was reached (or, bidirectionally, the two frontiers met).
    Found(Path),
    /// The frontier ran dry without reaching the goal.
    Unreachable,
}

impl Step {
    pub fn is_finished(&self) -> bool {
        !matches!(self, Step::Pending)
    }
}

/// A search in progress, advanced one expansion at a time.
///
/// All six [`Algorithm`]s share this driver: the [`Strategy`] decides how
/// queue priorities are computed and whether a second search runs backwards
/// from the goal. Bidirectional searches alternate between the forward and
/// backward side on successive steps, and stop at the first cell one side
/// pops that the other side has already closed. The two predecessor chains
/// are spliced at that cell. The meeting cell is not guaranteed to lie on a
/// globally shortest route, so bidirectional A* (like greedy search) is not
/// guaranteed to be optimal.
///
/// A `Search` owns all of its state and may be dropped between steps to
/// abandon it. It must always be stepped with the grid it was created for,
/// and that grid must not be searched by anything else until this search
/// finishes or is dropped.
pub struct Search {
    algorithm: Algorithm,
    strategy: Strategy,
    config: SearchConfig,
    start: Cell,
    goal: Cell,
    forward: SearchState,
    backward: Option<SearchState>,
    backward_turn: bool,
    expanded: usize,
    nbuf: Vec<Cell>,
    done: Option<Step>,
}

impl Search {
    /// Validate the endpoints and configuration and seed the frontier(s).
    pub fn new(
        grid: &Grid,
        start: Cell,
        goal: Cell,
        algorithm: Algorithm,
        config: SearchConfig,
    ) -> Result<Self, SearchError> {
        config.validate()?;
        check_endpoint(grid, start)?;
        check_endpoint(grid, goal)?;

        let strategy = algorithm.strategy();
        let forward = SearchState::new(grid, start, goal, strategy, &config);
        let backward = strategy
            .bidirectional
            .then(|| SearchState::new(grid, goal, start, strategy, &config));
        debug!("{algorithm} search {start} -> {goal} on {}x{} grid", grid.width(), grid.height());

        Ok(Self {
            algorithm,
            strategy,
            config,
            start,
            goal,
            forward,
            backward,
            backward_turn: false,
            expanded: 0,
            nbuf: Vec::with_capacity(4),
            done: None,
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn goal(&self) -> Cell {
        self.goal
    }

    /// Number of cells popped and finalized so far, over both directions.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    pub fn is_finished(&self) -> bool {
        self.done.is_some()
    }

    /// Expand one frontier node.
    ///
    /// Marks written to `grid` (Visited on pop, Frontier on relaxation,
    /// PathMarker along the final path) are also sent to `reporter`. Once
    /// the search has finished, further calls return the same outcome
    /// without touching the grid.
    pub fn step<'r>(
        &mut self,
        grid: &mut Grid,
        mut reporter: Option<&mut (dyn ProgressReporter + 'r)>,
    ) -> Result<Step, SearchError> {
        if let Some(done) = &self.done {
            return Ok(done.clone());
        }
        if self.start == self.goal {
            return Ok(self.finish(grid, &mut reporter, Some(vec![self.start])));
        }

        let Self {
            strategy,
            ref config,
            ref mut forward,
            ref mut backward,
            backward_turn,
            ref mut nbuf,
            ..
        } = *self;
        let expansion = match backward {
            Some(back) if backward_turn => back.expand(
                grid,
                strategy,
                config,
                Some(&*forward),
                &mut reporter,
                nbuf,
            )?,
            _ => forward.expand(grid, strategy, config, backward.as_ref(), &mut reporter, nbuf)?,
        };

        match expansion {
            Expansion::Continue => {
                self.expanded += 1;
                if self.backward.is_some() {
                    self.backward_turn = !self.backward_turn;
                }
                Ok(Step::Pending)
            }
            Expansion::Reached(meet) => {
                self.expanded += 1;
                let cells = self.splice(grid, meet);
                Ok(self.finish(grid, &mut reporter, Some(cells)))
            }
            Expansion::Exhausted => Ok(self.finish(grid, &mut reporter, None)),
        }
    }

    /// Step until the search finishes.
    ///
    /// Returns `Ok(None)` if the goal is unreachable from the start.
    pub fn run(
        mut self,
        grid: &mut Grid,
        mut reporter: Option<&mut dyn ProgressReporter>,
    ) -> Result<Option<Path>, SearchError> {
        loop {
            match self.step(grid, reporter.as_deref_mut())? {
                Step::Pending => {}
                Step::Found(path) => return Ok(Some(path)),
                Step::Unreachable => return Ok(None),
            }
        }
    }

    /// Start-to-goal cells through `meet`.
    fn splice(&self, grid: &Grid, meet: Cell) -> Vec<Cell> {
        let mut cells = self.forward.trace_back(grid, meet);
        cells.reverse();
        if let Some(back) = &self.backward {
            // The backward chain runs meet -> goal; `meet` is already present.
            cells.extend(back.trace_back(grid, meet).into_iter().skip(1));
        }
        cells
    }

    fn finish<'r>(
        &mut self,
        grid: &mut Grid,
        reporter: &mut Option<&mut (dyn ProgressReporter + 'r)>,
        cells: Option<Vec<Cell>>,
    ) -> Step {
        let step = match cells {
            Some(cells) => {
                for &c in &cells {
                    emit(grid, reporter, c, CellState::PathMarker);
                }
                let cost = self.config.path_cost(&cells);
                debug!(
                    "{} found {} -> {}: {} cells, cost {cost}, {} expansions",
                    self.algorithm,
                    self.start,
                    self.goal,
                    cells.len(),
                    self.expanded
                );
                Step::Found(Path::new(cells, cost))
            }
            None => {
                debug!(
                    "{} exhausted after {} expansions: {} unreachable from {}",
                    self.algorithm, self.expanded, self.goal, self.start
                );
                Step::Unreachable
            }
        };
        self.done = Some(step.clone());
        step
    }
}

fn check_endpoint(grid: &Grid, c: Cell) -> Result<(), SearchError> {
    match grid.at(c) {
        None => Err(SearchError::OutOfBounds(c)),
        Some(CellState::Wall) => Err(SearchError::StartOrGoalBlocked(c)),
        Some(_) => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Run `algorithm` from `start` to `goal` to completion.
///
/// Returns `Ok(None)` when the goal is unreachable, and an error when an
/// endpoint is off the grid or on a wall.
pub fn find_path(
    grid: &mut Grid,
    start: Cell,
    goal: Cell,
    algorithm: Algorithm,
    config: &SearchConfig,
    reporter: Option<&mut dyn ProgressReporter>,
) -> Result<Option<Path>, SearchError> {
    Search::new(grid, start, goal, algorithm, *config)?.run(grid, reporter)
}

/// Uniform-cost search.
pub fn dijkstra(
    grid: &mut Grid,
    start: Cell,
    goal: Cell,
    config: &SearchConfig,
    reporter: Option<&mut dyn ProgressReporter>,
) -> Result<Option<Path>, SearchError> {
    find_path(grid, start, goal, Algorithm::Dijkstra, config, reporter)
}

/// A* search.
pub fn astar(
    grid: &mut Grid,
    start: Cell,
    goal: Cell,
    config: &SearchConfig,
    reporter: Option<&mut dyn ProgressReporter>,
) -> Result<Option<Path>, SearchError> {
    find_path(grid, start, goal, Algorithm::AStar, config, reporter)
}

/// Greedy best-first search.
pub fn greedy(
    grid: &mut Grid,
    start: Cell,
    goal: Cell,
    config: &SearchConfig,
    reporter: Option<&mut dyn ProgressReporter>,
) -> Result<Option<Path>, SearchError> {
    find_path(grid, start, goal, Algorithm::Greedy, config, reporter)
}

pub fn bidirectional_dijkstra(
    grid: &mut Grid,
    start: Cell,
    goal: Cell,
    config: &SearchConfig,
    reporter: Option<&mut dyn ProgressReporter>,
) -> Result<Option<Path>, SearchError> {
    find_path(grid, start, goal, Algorithm::BidirectionalDijkstra, config, reporter)
}

pub fn bidirectional_astar(
    grid: &mut Grid,
    start: Cell,
    goal: Cell,
    config: &SearchConfig,
    reporter: Option<&mut dyn ProgressReporter>,
) -> Result<Option<Path>, SearchError> {
    find_path(grid, start, goal, Algorithm::BidirectionalAStar, config, reporter)
}

pub fn bidirectional_greedy(
    grid: &mut Grid,
    start: Cell,
    goal: Cell,
    config: &SearchConfig,
    reporter: Option<&mut dyn ProgressReporter>,
) -> Result<Option<Path>, SearchError> {
    find_path(grid, start, goal, Algorithm::BidirectionalGreedy, config, reporter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::{Metric, manhattan};
    use crate::reporter::Recorder;
    use mazepath_gen::MazeGen;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::{HashSet, VecDeque};

    fn c(x: i32, y: i32) -> Cell {
        Cell::new(x, y)
    }

    fn run(
        grid: &mut Grid,
        algorithm: Algorithm,
        config: &SearchConfig,
        start: Cell,
        goal: Cell,
    ) -> Option<Path> {
        find_path(grid, start, goal, algorithm, config, None).unwrap()
    }

    /// Unweighted shortest distance, for cross-checking.
    fn bfs_distance(grid: &Grid, start: Cell, goal: Cell) -> Option<usize> {
        let mut dist = vec![usize::MAX; grid.len()];
        let mut queue = VecDeque::from([start]);
        dist[grid.index(start)] = 0;
        while let Some(cur) = queue.pop_front() {
            let d = dist[grid.index(cur)];
            if cur == goal {
                return Some(d);
            }
            for n in grid.neighbors(cur) {
                let ni = grid.index(n);
                if dist[ni] == usize::MAX {
                    dist[ni] = d + 1;
                    queue.push_back(n);
                }
            }
        }
        None
    }

    fn assert_valid(grid: &Grid, path: &Path, start: Cell, goal: Cell) {
        assert_eq!(path.start(), start);
        assert_eq!(path.goal(), goal);
        assert!(path.is_contiguous(), "gap in {:?}", path.cells());
        let unique: HashSet<Cell> = path.cells().iter().copied().collect();
        assert_eq!(unique.len(), path.len(), "repeated cell in {:?}", path.cells());
        for &cell in path.cells() {
            assert!(grid.is_passable(cell), "{cell} is a wall");
        }
    }

    // -----------------------------------------------------------------------
    // Concrete scenarios
    // -----------------------------------------------------------------------

    #[test]
    fn open_5x5_corner_to_corner() {
        let cfg = SearchConfig::default();
        let (start, goal) = (c(0, 0), c(4, 4));

        let mut grid = Grid::new(5, 5);
        let d = run(&mut grid, Algorithm::Dijkstra, &cfg, start, goal).unwrap();
        assert_eq!(d.len(), 9);
        assert!(d.turns() <= 1, "dijkstra turned {} times", d.turns());

        let mut grid = Grid::new(5, 5);
        let a = run(&mut grid, Algorithm::AStar, &cfg, start, goal).unwrap();
        assert_eq!(a.len(), 9);
        assert!(a.turns() <= 1, "astar turned {} times", a.turns());
        assert_eq!(a.cost(), d.cost());

        let mut grid = Grid::new(5, 5);
        let g = run(&mut grid, Algorithm::Greedy, &cfg, start, goal).unwrap();
        assert!(g.len() >= 9);
        assert!(g.cost() >= d.cost());
    }

    #[test]
    fn wall_row_separates_regions() {
        let board = "
            .....
            .....
            #####
            .....
            .....
        ";
        for algorithm in Algorithm::ALL {
            let mut grid = Grid::from_ascii(board).unwrap();
            let res = run(&mut grid, algorithm, &SearchConfig::default(), c(0, 0), c(4, 4));
            assert_eq!(res, None, "{algorithm} found a path through a wall");
            assert_eq!(grid.count(CellState::PathMarker), 0);
        }
    }

    #[test]
    fn enclosed_goal_is_unreachable() {
        let board = "
            .......
            .......
            ...#...
            ..#.#..
            ...#...
            .......
        ";
        for algorithm in Algorithm::ALL {
            let mut grid = Grid::from_ascii(board).unwrap();
            let res = run(&mut grid, algorithm, &SearchConfig::default(), c(0, 0), c(3, 3));
            assert_eq!(res, None, "{algorithm}");
        }
    }

    #[test]
    fn start_equals_goal() {
        for algorithm in Algorithm::ALL {
            let mut grid = Grid::new(3, 3);
            let p = run(&mut grid, algorithm, &SearchConfig::default(), c(1, 1), c(1, 1)).unwrap();
            assert_eq!(p.cells(), &[c(1, 1)]);
            assert_eq!(p.cost(), 0.0);
            assert_eq!(grid.get(c(1, 1)), CellState::PathMarker);
        }
    }

    #[test]
    fn adjacent_endpoints() {
        for algorithm in Algorithm::ALL {
            for (start, goal) in [(c(2, 2), c(2, 3)), (c(2, 2), c(1, 2)), (c(0, 4), c(0, 3))] {
                let mut grid = Grid::new(5, 5);
                let p = run(&mut grid, algorithm, &SearchConfig::default(), start, goal).unwrap();
                assert_eq!(p.cells(), &[start, goal], "{algorithm}");
                assert_eq!(p.len(), manhattan(start, goal) as usize + 1);
            }
        }
    }

    #[test]
    fn open_grid_paths_are_manhattan_length() {
        let cases = [
            (c(0, 0), c(7, 5)),
            (c(7, 0), c(0, 5)),
            (c(3, 2), c(6, 5)),
            (c(6, 4), c(1, 1)),
        ];
        for algorithm in Algorithm::ALL {
            for (start, goal) in cases {
                let mut grid = Grid::new(8, 6);
                let p = run(&mut grid, algorithm, &SearchConfig::default(), start, goal).unwrap();
                assert_valid(&grid, &p, start, goal);
                assert_eq!(
                    p.len(),
                    manhattan(start, goal) as usize + 1,
                    "{algorithm} {start} -> {goal}: {:?}",
                    p.cells()
                );
            }
        }
    }

    #[test]
    fn detour_around_wall() {
        let board = "
            .......
            .#####.
            .#...#.
            .#.#.#.
            ...#...
        ";
        let mut grid = Grid::from_ascii(board).unwrap();
        let (start, goal) = (c(2, 2), c(4, 4));
        let expected = bfs_distance(&grid, start, goal).unwrap() + 1;
        for algorithm in Algorithm::ALL {
            grid.clear_search_marks();
            let p = run(&mut grid, algorithm, &SearchConfig::shortest(), start, goal).unwrap();
            assert_valid(&grid, &p, start, goal);
            if algorithm.is_optimal() {
                assert_eq!(p.len(), expected, "{algorithm}");
            } else {
                assert!(p.len() >= expected, "{algorithm}");
            }
        }
    }

    // -----------------------------------------------------------------------
    // Input validation
    // -----------------------------------------------------------------------

    #[test]
    fn out_of_bounds_endpoints_are_rejected() {
        let grid = Grid::new(4, 4);
        let cfg = SearchConfig::default();
        for algorithm in Algorithm::ALL {
            let err = Search::new(&grid, c(-1, 0), c(3, 3), algorithm, cfg).err();
            assert_eq!(err, Some(SearchError::OutOfBounds(c(-1, 0))));
            let err = Search::new(&grid, c(0, 0), c(4, 3), algorithm, cfg).err();
            assert_eq!(err, Some(SearchError::OutOfBounds(c(4, 3))));
        }
    }

    #[test]
    fn wall_endpoints_are_rejected() {
        let mut grid = Grid::from_ascii("#..\n...\n..#").unwrap();
        let cfg = SearchConfig::default();
        assert_eq!(
            dijkstra(&mut grid, c(0, 0), c(1, 1), &cfg, None),
            Err(SearchError::StartOrGoalBlocked(c(0, 0)))
        );
        assert_eq!(
            bidirectional_astar(&mut grid, c(1, 1), c(2, 2), &cfg, None),
            Err(SearchError::StartOrGoalBlocked(c(2, 2)))
        );
        // Nothing was marked.
        assert_eq!(grid.to_string(), "#..\n...\n..#\n");
    }

    #[test]
    fn invalid_turn_penalty_is_rejected() {
        let mut grid = Grid::new(3, 3);
        let cfg = SearchConfig::default().with_turn_penalty(-1.0);
        assert_eq!(
            greedy(&mut grid, c(0, 0), c(2, 2), &cfg, None),
            Err(SearchError::InvalidTurnPenalty(-1.0))
        );
    }

    // -----------------------------------------------------------------------
    // Step-driven interface and reporting
    // -----------------------------------------------------------------------

    #[test]
    fn step_advances_one_expansion_at_a_time() {
        let mut grid = Grid::new(6, 6);
        let cfg = SearchConfig::default();
        let mut search = Search::new(&grid, c(0, 0), c(5, 5), Algorithm::Dijkstra, cfg).unwrap();
        assert_eq!(search.expanded(), 0);
        assert_eq!(search.step(&mut grid, None), Ok(Step::Pending));
        assert_eq!(search.expanded(), 1);
        assert_eq!(grid.get(c(0, 0)), CellState::Visited);
        assert_eq!(grid.get(c(0, 1)), CellState::Frontier);
        assert_eq!(grid.get(c(1, 0)), CellState::Frontier);
        assert!(!search.is_finished());

        let mut steps = 1;
        let path = loop {
            steps += 1;
            match search.step(&mut grid, None).unwrap() {
                Step::Pending => {}
                Step::Found(p) => break p,
                Step::Unreachable => panic!("open grid reported unreachable"),
            }
        };
        assert_eq!(path.len(), 11);
        assert_eq!(search.expanded(), steps);
        assert!(search.is_finished());

        // Finished searches keep answering without touching the grid.
        let snapshot = grid.clone();
        assert_eq!(search.step(&mut grid, None), Ok(Step::Found(path)));
        assert_eq!(grid, snapshot);
    }

    #[test]
    fn bidirectional_alternates_sides() {
        let mut grid = Grid::new(7, 1);
        let mut search = Search::new(
            &grid,
            c(0, 0),
            c(6, 0),
            Algorithm::BidirectionalDijkstra,
            SearchConfig::default(),
        )
        .unwrap();
        assert_eq!(search.step(&mut grid, None), Ok(Step::Pending));
        assert_eq!(grid.get(c(0, 0)), CellState::Visited);
        assert_eq!(grid.get(c(6, 0)), CellState::Open);
        assert_eq!(search.step(&mut grid, None), Ok(Step::Pending));
        assert_eq!(grid.get(c(6, 0)), CellState::Visited);
        assert_eq!(grid.get(c(5, 0)), CellState::Frontier);

        let path = search.run(&mut grid, None).unwrap().unwrap();
        assert_eq!(path.len(), 7);
        assert_eq!(path.start(), c(0, 0));
        assert_eq!(path.goal(), c(6, 0));
    }

    #[test]
    #[should_panic(expected = "outside 2x2 grid")]
    fn stepping_with_a_smaller_grid_panics() {
        let grid = Grid::new(5, 5);
        let cfg = SearchConfig::default();
        let mut search = Search::new(&grid, c(4, 4), c(0, 0), Algorithm::Dijkstra, cfg).unwrap();
        let mut other = Grid::new(2, 2);
        let _ = search.step(&mut other, None);
    }

    #[test]
    fn abandoned_search_leaves_grid_usable() {
        let mut grid = Grid::new(10, 10);
        let cfg = SearchConfig::default();
        let mut search = Search::new(&grid, c(0, 0), c(9, 9), Algorithm::AStar, cfg).unwrap();
        for _ in 0..5 {
            search.step(&mut grid, None).unwrap();
        }
        drop(search);
        assert!(grid.count(CellState::Visited) > 0);
        grid.clear_search_marks();
        assert_eq!(grid.count(CellState::Open), 100);
        let p = astar(&mut grid, c(0, 0), c(9, 9), &SearchConfig::default(), None).unwrap();
        assert_eq!(p.map(|p| p.len()), Some(19));
    }

    #[test]
    fn reporter_sees_every_mark() {
        for algorithm in Algorithm::ALL {
            let mut grid = Grid::from_ascii(
                "
                ......
                .##.#.
                ...#..
                .#....
                ",
            )
            .unwrap();
            let mut replay = grid.clone();
            let mut recorder = Recorder::new();
            let path = find_path(
                &mut grid,
                c(0, 0),
                c(5, 3),
                algorithm,
                &SearchConfig::default(),
                Some(&mut recorder),
            )
            .unwrap()
            .unwrap();

            assert_eq!(recorder.count(CellState::PathMarker), path.len());
            assert!(recorder.count(CellState::Visited) > 0);
            for &(cell, state) in &recorder.events {
                replay.mark(cell, state);
            }
            assert_eq!(replay, grid, "{algorithm}");
        }
    }

    #[test]
    fn reporting_does_not_change_the_outcome() {
        let maze = MazeGen::new(StdRng::seed_from_u64(11)).carve(8, 6);
        for algorithm in Algorithm::ALL {
            let mut quiet = maze.grid.clone();
            let mut loud = maze.grid.clone();
            let mut events = 0usize;
            let mut count = |_: Cell, _: CellState| events += 1;
            let a = run(&mut quiet, algorithm, &SearchConfig::default(), maze.entrance, maze.exit);
            let b = find_path(
                &mut loud,
                maze.entrance,
                maze.exit,
                algorithm,
                &SearchConfig::default(),
                Some(&mut count),
            )
            .unwrap();
            assert_eq!(a, b, "{algorithm}");
            assert_eq!(quiet, loud);
            assert!(events > 0);
        }
    }

    #[test]
    fn clearing_and_rerunning_is_idempotent() {
        let maze = MazeGen::new(StdRng::seed_from_u64(3)).carve(7, 7);
        let cfg = SearchConfig::default();
        let (start, goal) = (maze.entrance, maze.exit);
        for algorithm in Algorithm::ALL {
            let mut grid = maze.grid.clone();
            let first = run(&mut grid, algorithm, &cfg, start, goal);
            let marked = grid.clone();
            grid.clear_search_marks();
            assert_eq!(grid, maze.grid);
            let second = run(&mut grid, algorithm, &cfg, start, goal);
            assert_eq!(first, second, "{algorithm}");
            assert_eq!(grid, marked);
        }
    }

    // -----------------------------------------------------------------------
    // Cross-algorithm properties
    // -----------------------------------------------------------------------

    #[test]
    fn maze_paths_agree() {
        for seed in 0..12 {
            let maze = MazeGen::new(StdRng::seed_from_u64(seed)).carve(9, 7);
            let (start, goal) = (maze.entrance, maze.exit);
            let cfg = SearchConfig::shortest();
            let shortest = bfs_distance(&maze.grid, start, goal).unwrap() + 1;

            let mut grid = maze.grid.clone();
            let d = run(&mut grid, Algorithm::Dijkstra, &cfg, start, goal).unwrap();
            assert_eq!(d.len(), shortest);

            // A perfect maze has exactly one simple route, so every variant
            // must find it.
            for algorithm in Algorithm::ALL {
                let mut grid = maze.grid.clone();
                let p = run(&mut grid, algorithm, &cfg, start, goal).unwrap();
                assert_valid(&maze.grid, &p, start, goal);
                assert_eq!(p.cells(), d.cells(), "{algorithm}, seed {seed}");
            }
        }
    }

    #[test]
    fn scattered_grids_respect_optimality() {
        let heuristics = [Metric::Manhattan, Metric::Euclidean];
        for seed in 0..40 {
            let mut grid = Grid::new(14, 10);
            let (start, goal) = (c(0, 0), c(13, 9));
            MazeGen::new(StdRng::seed_from_u64(seed)).scatter(&mut grid, 0.3, &[start, goal]);
            let expected = bfs_distance(&grid, start, goal);

            for h in heuristics {
                let cfg = SearchConfig::shortest().with_heuristic(h);
                let mut scratch = grid.clone();
                let d = run(&mut scratch, Algorithm::Dijkstra, &cfg, start, goal);
                assert_eq!(d.as_ref().map(Path::len), expected.map(|n| n + 1));

                for algorithm in Algorithm::ALL {
                    let mut scratch = grid.clone();
                    let p = run(&mut scratch, algorithm, &cfg, start, goal);
                    match (&d, p) {
                        (None, None) => {}
                        (Some(d), Some(p)) => {
                            assert_valid(&grid, &p, start, goal);
                            if algorithm.is_optimal() {
                                assert_eq!(p.cost(), d.cost(), "{algorithm}, seed {seed}");
                            } else {
                                assert!(p.cost() >= d.cost(), "{algorithm}, seed {seed}");
                            }
                        }
                        (d, p) => panic!("{algorithm} disagrees on reachability: {d:?} vs {p:?}"),
                    }
                }
            }
        }
    }

    #[test]
    fn euclidean_costs_match_manhattan_on_unit_edges() {
        let maze = MazeGen::new(StdRng::seed_from_u64(99)).carve(6, 6);
        let l1 = SearchConfig::shortest();
        let l2 = SearchConfig::shortest()
            .with_cost(Metric::Euclidean)
            .with_heuristic(Metric::Manhattan);
        let mut a = maze.grid.clone();
        let mut b = maze.grid.clone();
        let pa = astar(&mut a, maze.entrance, maze.exit, &l1, None).unwrap().unwrap();
        let pb = astar(&mut b, maze.entrance, maze.exit, &l2, None).unwrap().unwrap();
        assert_eq!(pa.cost(), pb.cost());
    }

    #[test]
    fn turn_penalty_straightens_routes() {
        let cfg = SearchConfig::default().with_turn_penalty(0.1);
        let mut grid = Grid::new(9, 9);
        let p = dijkstra(&mut grid, c(0, 0), c(8, 8), &cfg, None).unwrap().unwrap();
        assert_eq!(p.len(), 17);
        assert_eq!(p.turns(), 1);
        assert!((p.cost() - 16.1).abs() < 1e-9);
    }

    #[test]
    fn path_cells_are_marked() {
        let mut grid = Grid::new(5, 5);
        let p = bidirectional_greedy(&mut grid, c(0, 0), c(4, 4), &SearchConfig::default(), None)
            .unwrap()
            .unwrap();
        assert_eq!(grid.count(CellState::PathMarker), p.len());
        for &cell in p.cells() {
            assert_eq!(grid.get(cell), CellState::PathMarker);
        }
    }
}
