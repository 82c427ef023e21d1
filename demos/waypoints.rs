use grid_best_first::{Grid, GridConfig, Point, Policy, RouteOrchestrator};

// Routes from the top left corner to the bottom right one, visiting two waypoints on the way.
// Every step of the search is printed, which is what a renderer would draw.

fn main() {
    let config = GridConfig::new(20, 400).unwrap();
    let mut grid = config.build();
    grid.set_start(Point::new(0, 0)).unwrap();
    grid.set_goal(Point::new(19, 19)).unwrap();
    grid.add_waypoint(Point::new(15, 2)).unwrap();
    grid.add_waypoint(Point::new(3, 16)).unwrap();
    for y in 0..15 {
        grid.set_obstacle(Point::new(9, y)).unwrap();
    }

    let mut orchestrator = RouteOrchestrator::new(grid, Policy::AStar);
    let mut step = 0;
    let result = orchestrator.run(&mut |grid: &Grid| {
        step += 1;
        println!("Step {step}:\n{grid}");
    });
    match result {
        Ok(route) => println!(
            "Route of {} legs, {} steps long",
            route.legs.len(),
            route.path_len()
        ),
        Err(e) => println!("No route: {e}"),
    }
}
