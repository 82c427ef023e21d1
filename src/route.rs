use grid_util::point::Point;
use log::{info, warn};

use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::observer::SearchObserver;
use crate::policy::{CostPolicy, Policy};
use crate::search::{best_first_search, SearchTrace};

/// Splits a route into legs: start to the first waypoint, waypoint to waypoint, and the last
/// waypoint to the goal. Without waypoints there is the single leg start to goal.
pub fn legs(start: Point, waypoints: &[Point], goal: Point) -> Vec<(Point, Point)> {
    std::iter::once(start)
        .chain(waypoints.iter().copied())
        .zip(waypoints.iter().copied().chain(std::iter::once(goal)))
        .collect()
}

/// A completed route, one trace per leg.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Route {
    pub legs: Vec<SearchTrace>,
}

impl Route {
    /// The full path from start to goal. Waypoints shared by consecutive legs appear once.
    pub fn path(&self) -> Vec<Point> {
        let mut path: Vec<Point> = Vec::new();
        for leg in &self.legs {
            let skip = usize::from(!path.is_empty());
            path.extend(leg.path.iter().skip(skip));
        }
        path
    }

    /// Number of edges over all legs.
    pub fn path_len(&self) -> usize {
        self.legs.iter().map(SearchTrace::path_len).sum()
    }

    /// Number of expansions over all legs.
    pub fn expanded(&self) -> usize {
        self.legs.iter().map(|l| l.expanded.len()).sum()
    }
}

/// Runs the legs from `start` through the `waypoints` to `goal` one after another on `grid`.
/// Every leg protects the full waypoint list. The neighbour lists are recomputed once before the
/// first leg. The first leg that fails stops the route and its error is returned; the grid keeps
/// the colouring up to that point.
pub fn plan_route<P, O>(
    grid: &mut Grid,
    start: Point,
    waypoints: &[Point],
    goal: Point,
    policy: &P,
    observer: &mut O,
) -> Result<Route>
where
    P: CostPolicy + ?Sized,
    O: SearchObserver + ?Sized,
{
    for point in std::iter::once(&start)
        .chain(waypoints)
        .chain(std::iter::once(&goal))
    {
        if !grid.in_bounds(*point) {
            return Err(Error::OutOfBounds(*point));
        }
    }
    grid.recompute_neighbours();

    let pairs = legs(start, waypoints, goal);
    let n_legs = pairs.len();
    let mut route = Route::default();
    for (i, (from, to)) in pairs.into_iter().enumerate() {
        info!("Leg {}/{}: {:?} -> {:?}", i + 1, n_legs, from, to);
        match best_first_search(grid, from, to, waypoints, policy, observer) {
            Ok(trace) => route.legs.push(trace),
            Err(e) => {
                warn!("Leg {}/{} stopped: {}", i + 1, n_legs, e);
                return Err(e);
            }
        }
    }
    info!(
        "Route of {} legs found: {} steps, {} expansions",
        n_legs,
        route.path_len(),
        route.expanded()
    );
    Ok(route)
}

/// Owns the [Grid] together with the selected [Policy] and runs routes between the start, the
/// waypoints and the goal placed on it.
#[derive(Clone, Debug)]
pub struct RouteOrchestrator {
    grid: Grid,
    policy: Policy,
}

impl RouteOrchestrator {
    pub fn new(grid: Grid, policy: Policy) -> RouteOrchestrator {
        RouteOrchestrator { grid, policy }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }
    /// Editing access for the input layer. Must not be used while a route runs, which the
    /// borrow in [run](Self::run) already rules out.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }
    pub fn set_policy(&mut self, policy: Policy) {
        info!("Policy: {}", policy);
        self.policy = policy;
    }
    pub fn next_policy(&mut self) -> Policy {
        self.set_policy(self.policy.next());
        self.policy
    }
    pub fn previous_policy(&mut self) -> Policy {
        self.set_policy(self.policy.previous());
        self.policy
    }

    /// Runs the route currently placed on the grid with the selected policy. Fails without
    /// touching the grid if the start or the goal is missing.
    pub fn run<O>(&mut self, observer: &mut O) -> Result<Route>
    where
        O: SearchObserver + ?Sized,
    {
        let start = self.grid.start().ok_or(Error::MissingStart)?;
        let goal = self.grid.goal().ok_or(Error::MissingGoal)?;
        let waypoints = self.grid.waypoints().to_vec();
        info!(
            "Running {} from {:?} to {:?} through {} waypoints",
            self.policy,
            start,
            goal,
            waypoints.len()
        );
        self.grid.touch();
        plan_route(
            &mut self.grid,
            start,
            &waypoints,
            goal,
            &self.policy,
            observer,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellState;
    use crate::observer::NullObserver;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn leg_decomposition() {
        let (s, g) = (p(0, 0), p(9, 9));
        assert_eq!(legs(s, &[], g), vec![(s, g)]);
        assert_eq!(legs(s, &[p(1, 1)], g), vec![(s, p(1, 1)), (p(1, 1), g)]);
        assert_eq!(
            legs(s, &[p(1, 1), p(2, 2), p(3, 3)], g),
            vec![
                (s, p(1, 1)),
                (p(1, 1), p(2, 2)),
                (p(2, 2), p(3, 3)),
                (p(3, 3), g)
            ]
        );
    }

    #[test]
    fn missing_endpoints_leave_grid_untouched() {
        let mut orchestrator = RouteOrchestrator::new(Grid::new(5, 50), Policy::AStar);
        assert_eq!(orchestrator.run(&mut NullObserver), Err(Error::MissingStart));
        orchestrator.grid_mut().set_start(p(0, 0)).unwrap();
        let before = orchestrator.grid().states();
        assert_eq!(orchestrator.run(&mut NullObserver), Err(Error::MissingGoal));
        assert_eq!(orchestrator.grid().states(), before);
        assert!(orchestrator.grid().neighbours_dirty());
    }

    #[test]
    fn route_through_waypoint() {
        let mut grid = Grid::new(5, 50);
        grid.set_start(p(0, 0)).unwrap();
        grid.set_goal(p(4, 0)).unwrap();
        grid.add_waypoint(p(2, 4)).unwrap();
        let mut orchestrator = RouteOrchestrator::new(grid, Policy::AStar);
        let route = orchestrator.run(&mut NullObserver).unwrap();
        assert_eq!(route.legs.len(), 2);
        assert_eq!(route.path_len(), 6 + 6);
        let path = route.path();
        assert_eq!(path.len(), 13);
        assert_eq!(path[6], p(2, 4));

        let grid = orchestrator.grid();
        assert_eq!(grid.state(p(0, 0)), Some(CellState::Start));
        assert_eq!(grid.state(p(4, 0)), Some(CellState::Goal));
        assert_eq!(grid.state(p(2, 4)), Some(CellState::Waypoint(1)));
    }

    #[test]
    fn policy_switch_keeps_grid() {
        let mut grid = Grid::new(5, 50);
        grid.set_start(p(0, 0)).unwrap();
        grid.set_goal(p(4, 4)).unwrap();
        let mut orchestrator = RouteOrchestrator::new(grid, Policy::AStar);
        orchestrator.run(&mut NullObserver).unwrap();
        let coloured = orchestrator.grid().states();
        assert_eq!(orchestrator.next_policy(), Policy::Greedy);
        assert_eq!(orchestrator.grid().states(), coloured);
        assert_eq!(orchestrator.previous_policy(), Policy::AStar);
    }
}
