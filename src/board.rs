//! An editable board: the grid together with the designated start and end cells and a
//! [CellState] for every cell, kept up to date while a search runs on it.
use core::fmt;
use std::ops::ControlFlow;

use log::debug;

use crate::{find_path, Cell, CellState, PathError, PathResult, PathingGrid, Result, SearchEvent};

#[derive(Clone, Debug)]
pub struct Board {
    grid: PathingGrid,
    states: Vec<CellState>,
    start: Option<Cell>,
    end: Option<Cell>,
}

impl Default for Board {
    fn default() -> Board {
        Board::from_grid(PathingGrid::default())
    }
}

impl Board {
    pub fn new(size: usize) -> Board {
        Board::from_grid(PathingGrid::new(size))
    }

    fn from_grid(grid: PathingGrid) -> Board {
        let size = grid.size();
        Board {
            grid,
            states: vec![CellState::Empty; size * size],
            start: None,
            end: None,
        }
    }

    pub fn grid(&self) -> &PathingGrid {
        &self.grid
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn start(&self) -> Option<Cell> {
        self.start
    }

    pub fn end(&self) -> Option<Cell> {
        self.end
    }

    fn get_ix(&self, cell: Cell) -> Result<usize> {
        if self.grid.in_bounds(cell) {
            Ok(cell.row * self.size() + cell.col)
        } else {
            Err(PathError::OutOfRange {
                cell,
                size: self.size(),
            })
        }
    }

    pub fn state(&self, cell: Cell) -> Result<CellState> {
        Ok(self.states[self.get_ix(cell)?])
    }

    /// Number of cells currently in the given state.
    pub fn count(&self, state: CellState) -> usize {
        self.states.iter().filter(|&&s| s == state).count()
    }

    fn set_state(&mut self, cell: Cell, state: CellState) -> Result<()> {
        let ix = self.get_ix(cell)?;
        self.grid.set_passable(cell, state.is_passable())?;
        self.states[ix] = state;
        Ok(())
    }

    /// Designates a cell: the first placement becomes the start, the next one the end, and any
    /// further placement turns the cell into a barrier. The start and end cells themselves are
    /// left alone. Returns the state the cell ends up in.
    pub fn place(&mut self, cell: Cell) -> Result<CellState> {
        let is_start = self.start == Some(cell);
        let is_end = self.end == Some(cell);
        if self.start.is_none() && !is_end {
            self.set_state(cell, CellState::Start)?;
            self.start = Some(cell);
        } else if self.end.is_none() && !is_start {
            self.set_state(cell, CellState::End)?;
            self.end = Some(cell);
        } else if !is_start && !is_end {
            self.set_state(cell, CellState::Barrier)?;
        }
        self.state(cell)
    }

    /// Makes a cell empty and passable again, dropping its start or end designation.
    pub fn erase(&mut self, cell: Cell) -> Result<()> {
        self.set_state(cell, CellState::Empty)?;
        if self.start == Some(cell) {
            self.start = None;
        } else if self.end == Some(cell) {
            self.end = None;
        }
        Ok(())
    }

    /// Starts over with an empty board of the same size.
    pub fn clear(&mut self) {
        *self = Board::new(self.size());
    }

    /// Forgets the marks left behind by a previous search.
    pub fn clear_search_marks(&mut self) {
        for state in self.states.iter_mut().filter(|s| s.is_search_mark()) {
            *state = CellState::Empty;
        }
    }

    /// Searches from the start to the end cell. Every [SearchEvent] is first applied to the
    /// cell states and then handed to `on_step`, whose [ControlFlow] is passed on to the search.
    /// The start and end cells keep their states throughout.
    pub fn run<F>(&mut self, mut on_step: F) -> Result<PathResult>
    where
        F: FnMut(&SearchEvent) -> ControlFlow<()>,
    {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Err(PathError::InvalidEndpoints(
                "start and end must both be placed before searching".to_owned(),
            ));
        };
        self.clear_search_marks();
        debug!("Running search on board from {} to {}", start, end);
        let size = self.size();
        let Board { grid, states, .. } = self;
        find_path(grid, start, end, |event| {
            let (cell, mark) = match event {
                SearchEvent::Opened(cell) => (cell, CellState::Open),
                SearchEvent::Closed(cell) => (cell, CellState::Closed),
                SearchEvent::Path(cell) => (cell, CellState::Path),
                SearchEvent::Iteration { .. } => return on_step(&event),
            };
            let state = &mut states[cell.row * size + cell.col];
            if !matches!(*state, CellState::Start | CellState::End) {
                *state = mark;
            }
            on_step(&event)
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.states.chunks(self.size().max(1)) {
            let line = row.iter().map(CellState::symbol).collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
