use grid_best_first::{Grid, NullObserver, Point, Policy, RouteOrchestrator};

// In this example a path is found on a 5x5 grid with shape
// S....
// .#...
// .#.#.
// ...#.
// ...#G
// where
// - # marks an obstacle
// - S marks the start
// - G marks the goal
//
// After the search, o marks the frontier, x visited cells and * the path.

fn main() {
    let mut grid = Grid::new(5, 50);
    grid.set_start(Point::new(0, 0)).unwrap();
    grid.set_goal(Point::new(4, 4)).unwrap();
    for (x, y) in [(1, 1), (1, 2), (3, 2), (3, 3), (3, 4)] {
        grid.set_obstacle(Point::new(x, y)).unwrap();
    }
    println!("{}", grid);
    let mut orchestrator = RouteOrchestrator::new(grid, Policy::AStar);
    let route = orchestrator.run(&mut NullObserver).unwrap();
    println!("{}", orchestrator.grid());
    println!("Path:");
    for p in route.path() {
        println!("{:?}", p);
    }
}
