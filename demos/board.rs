use grid_astar::{Board, Cell, SearchEvent};
use std::ops::ControlFlow;

// Edits a board the way an interactive front end would: the first placement is the start, the
// second the end, every following one a barrier. The search is stopped after a fixed number of
// expansions when a limit is given as the first argument.

fn main() {
    env_logger::init();
    let limit = std::env::args().nth(1).and_then(|arg| arg.parse::<usize>().ok());
    let mut board = Board::new(12);
    board.place(Cell::new(1, 1)).unwrap();
    board.place(Cell::new(10, 10)).unwrap();
    for i in 0..10 {
        board.place(Cell::new(5, i)).unwrap();
        board.place(Cell::new(i + 2, 7)).unwrap();
    }
    println!("{}", board);
    let result = board
        .run(|event| match event {
            SearchEvent::Iteration { expanded, .. } if Some(*expanded) == limit => {
                ControlFlow::Break(())
            }
            _ => ControlFlow::Continue(()),
        })
        .unwrap();
    println!("{}", board);
    println!("{:?}", result);
}
