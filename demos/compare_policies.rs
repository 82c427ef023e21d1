use grid_best_first::{Grid, NullObserver, Point, Policy, RouteOrchestrator};

// Runs every policy on the same grid and compares path length with the number of expansions.
// Weighting the heuristic (weighted A*) or dropping the path cost (greedy) tends to expand fewer
// cells at the price of longer paths.

fn main() {
    const N: i32 = 30;
    let mut grid = Grid::new(N as usize, 600);
    grid.set_start(Point::new(1, 1)).unwrap();
    grid.set_goal(Point::new(N - 3, N - 3)).unwrap();
    for i in 0..20 {
        grid.set_obstacle(Point::new(8, i)).unwrap();
        grid.set_obstacle(Point::new(i + 8, 20)).unwrap();
    }

    let mut orchestrator = RouteOrchestrator::new(grid, Policy::AStar);
    for _ in Policy::ALL {
        orchestrator.grid_mut().soft_clear();
        let route = orchestrator.run(&mut NullObserver).unwrap();
        println!(
            "{:<32} path {:>3}, expanded {:>4}",
            orchestrator.policy().name(),
            route.path_len(),
            route.expanded()
        );
        orchestrator.next_policy();
    }
}
