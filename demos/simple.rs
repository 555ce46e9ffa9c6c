use grid_astar::{find_path, Cell, PathResult, PathingGrid};
use std::ops::ControlFlow;

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks a barrier
// - S marks the start
// - E marks the end
//
// Cells have a 4-neighborhood

fn main() {
    env_logger::init();
    let mut pathing_grid = PathingGrid::new(3);
    pathing_grid.set_passable(Cell::new(1, 1), false).unwrap();
    println!("{}", pathing_grid);
    let start = Cell::new(0, 0);
    let end = Cell::new(2, 2);
    let result = find_path(&pathing_grid, start, end, |event| {
        println!("{:?}", event);
        ControlFlow::Continue(())
    })
    .unwrap();
    match result {
        PathResult::Found(path) => {
            println!("Path:");
            for c in path {
                println!("{}", c);
            }
        }
        other => println!("{:?}", other),
    }
}
