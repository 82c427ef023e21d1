//! # grid_best_first
//!
//! Generalized best-first search on a 4-connected grid with unit edge costs. The variant is picked
//! by a [CostPolicy]: uniform-cost (Dijkstra), greedy best-first, A* and weighted A*, all using the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as heuristic. Ties in
//! priority are broken by insertion order, so runs are reproducible.
//!
//! The search colours the [Cell]s of the [Grid] as it goes (frontier, visited, path) and hands the
//! grid to a [SearchObserver] after every step, which can render it or abort the search. A
//! [RouteOrchestrator] chains searches from the start through an ordered list of waypoints to
//! the goal.
//!
//! ```
//! use grid_best_first::{Grid, NullObserver, Point, Policy, RouteOrchestrator};
//!
//! let mut grid = Grid::new(5, 50);
//! grid.set_start(Point::new(0, 0)).unwrap();
//! grid.set_goal(Point::new(4, 4)).unwrap();
//! grid.set_obstacle(Point::new(1, 1)).unwrap();
//! let mut orchestrator = RouteOrchestrator::new(grid, Policy::AStar);
//! let route = orchestrator.run(&mut NullObserver).unwrap();
//! assert_eq!(route.path_len(), 8);
//! ```
pub mod cell;
pub mod config;
pub mod error;
pub mod grid;
pub mod observer;
pub mod policy;
pub mod route;
pub mod search;

pub use cell::{Cell, CellState};
pub use config::{GridConfig, DEFAULT_WIDTH};
pub use error::{Error, Result};
pub use grid::Grid;
pub use grid_util::point::Point;
pub use observer::{NullObserver, SearchObserver, StepLimit};
pub use policy::{CostPolicy, Policy, Weight};
pub use route::{legs, plan_route, Route, RouteOrchestrator};
pub use search::{best_first_search, SearchTrace};

/// Smallest grid accepted by [GridConfig].
pub const MIN_GRID_SIZE: usize = 20;
/// Largest grid accepted by [GridConfig].
pub const MAX_GRID_SIZE: usize = 100;
/// Cells have at most four neighbours: down, up, right and left.
pub const NEIGHBOURHOOD_SIZE: usize = 4;
