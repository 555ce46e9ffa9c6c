use grid_astar::{
    find_path, AstarSolver, Board, Cell, CellState, GridSolver, PathError, PathResult,
    PathingGrid, SearchEvent,
};
use std::ops::ControlFlow;

fn keep_going(_: SearchEvent) -> ControlFlow<()> {
    ControlFlow::Continue(())
}

fn cells(coords: &[(usize, usize)]) -> Vec<Cell> {
    coords.iter().map(|&c| Cell::from(c)).collect()
}

#[test]
fn open_grid_goes_down_then_right() {
    let grid = PathingGrid::new(5);
    let result = find_path(&grid, Cell::new(0, 0), Cell::new(4, 4), keep_going).unwrap();
    assert_eq!(
        result,
        PathResult::Found(cells(&[
            (1, 0),
            (2, 0),
            (3, 0),
            (4, 0),
            (4, 1),
            (4, 2),
            (4, 3),
            (4, 4)
        ]))
    );
}

#[test]
fn open_grid_length_is_manhattan_distance() {
    let grid = PathingGrid::new(7);
    let solver = AstarSolver::new();
    let corners: [(usize, usize); 6] = [(0, 0), (0, 6), (6, 0), (6, 6), (3, 3), (2, 5)];
    for &a in &corners {
        for &b in &corners {
            let (start, end) = (Cell::from(a), Cell::from(b));
            if start == end {
                continue;
            }
            let path = solver
                .find_path_unobserved(&grid, start, end)
                .unwrap()
                .into_path()
                .unwrap();
            assert_eq!(path.len() as u32, start.manhattan_distance(&end));
            assert_eq!(solver.get_path_cost(&path), start.manhattan_distance(&end));
        }
    }
}

/// Blocking the cell directly between start and end forces a detour through the other columns.
#[test]
fn detour_around_barrier() {
    let mut grid = PathingGrid::new(3);
    grid.set_passable(Cell::new(1, 0), false).unwrap();
    let start = Cell::new(0, 0);
    let end = Cell::new(2, 0);
    let path = find_path(&grid, start, end, keep_going)
        .unwrap()
        .into_path()
        .unwrap();
    assert_eq!(path, cells(&[(0, 1), (1, 1), (2, 1), (2, 0)]));
    assert!(grid.is_valid_path(start, &path));
    assert!(path.iter().any(|c| c.col > 0));
}

#[test]
fn wall_means_not_found() {
    let mut grid = PathingGrid::new(5);
    grid.set_rect(Cell::new(1, 0), 1, 5, false).unwrap();
    let mut events = Vec::new();
    let result = find_path(&grid, Cell::new(0, 0), Cell::new(4, 4), |event| {
        events.push(event);
        ControlFlow::Continue(())
    })
    .unwrap();
    assert_eq!(result, PathResult::NotFound);
    // Only the row above the wall was ever looked at
    assert!(events.iter().all(|event| match event {
        SearchEvent::Opened(c) | SearchEvent::Closed(c) => c.row == 0,
        SearchEvent::Path(_) => false,
        SearchEvent::Iteration { .. } => true,
    }));
    assert_eq!(
        events.last(),
        Some(&SearchEvent::Iteration {
            expanded: 5,
            open: 0
        })
    );
}

#[test]
fn identical_endpoints_are_rejected() {
    let grid = PathingGrid::new(5);
    let cell = Cell::new(2, 2);
    assert!(matches!(
        find_path(&grid, cell, cell, keep_going),
        Err(PathError::InvalidEndpoints(_))
    ));
}

#[test]
fn barrier_end_is_rejected() {
    let mut grid = PathingGrid::new(5);
    grid.set_passable(Cell::new(4, 4), false).unwrap();
    assert!(matches!(
        find_path(&grid, Cell::new(0, 0), Cell::new(4, 4), keep_going),
        Err(PathError::InvalidEndpoints(_))
    ));
}

#[test]
fn cancellation_stops_callbacks() {
    let grid = PathingGrid::new(20);
    let mut calls = 0;
    let mut after_break = 0;
    let mut stopped = false;
    let result = find_path(&grid, Cell::new(0, 0), Cell::new(19, 19), |event| {
        if stopped {
            after_break += 1;
        }
        calls += 1;
        if let SearchEvent::Iteration { expanded: 10, .. } = event {
            stopped = true;
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    })
    .unwrap();
    assert_eq!(result, PathResult::Cancelled);
    assert!(stopped);
    assert_eq!(after_break, 0);
    assert!(calls > 10);
}

#[test]
fn path_events_match_result() {
    let mut grid = PathingGrid::new(6);
    grid.set_rect(Cell::new(0, 2), 5, 1, false).unwrap();
    let mut reported = Vec::new();
    let result = find_path(&grid, Cell::new(0, 0), Cell::new(0, 5), |event| {
        if let SearchEvent::Path(cell) = event {
            reported.push(cell);
        }
        ControlFlow::Continue(())
    })
    .unwrap();
    assert_eq!(result.path(), Some(reported.as_slice()));
    assert_eq!(reported.len(), 15);
}

#[test]
fn board_run_leaves_grid_untouched() {
    let mut board = Board::new(6);
    for cell in [(0usize, 0usize), (5, 5), (2, 2), (2, 3), (3, 2)] {
        board.place(cell.into()).unwrap();
    }
    let before = board.grid().to_string();
    let result = board.run(|_| ControlFlow::Continue(())).unwrap();
    assert!(result.is_found());
    assert_eq!(before, board.grid().to_string());
    assert_eq!(board.state(Cell::new(0, 0)).unwrap(), CellState::Start);
    assert_eq!(board.state(Cell::new(5, 5)).unwrap(), CellState::End);
    assert_eq!(board.count(CellState::Path), 9);
}

#[test]
fn cancelling_while_opening_neighbours() {
    let grid = PathingGrid::new(5);
    let mut events = Vec::new();
    let result = find_path(&grid, Cell::new(2, 2), Cell::new(4, 4), |event| {
        let stop = matches!(event, SearchEvent::Opened(_));
        events.push(event);
        if stop {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })
    .unwrap();
    assert_eq!(result, PathResult::Cancelled);
    assert_eq!(events, vec![SearchEvent::Opened(Cell::new(3, 2))]);
}

#[test]
fn cancelling_while_reporting_path() {
    let grid = PathingGrid::new(5);
    let mut path_events = 0;
    let mut calls_after_stop = 0;
    let result = find_path(&grid, Cell::new(0, 0), Cell::new(4, 4), |event| {
        if path_events > 0 {
            calls_after_stop += 1;
        }
        if let SearchEvent::Path(_) = event {
            path_events += 1;
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    })
    .unwrap();
    assert_eq!(result, PathResult::Cancelled);
    assert_eq!(path_events, 1);
    assert_eq!(calls_after_stop, 0);
}
