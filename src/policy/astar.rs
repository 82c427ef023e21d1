use grid_util::point::Point;

use crate::policy::CostPolicy;

/// `g + heuristic_factor * h` with `h` the Manhattan distance. A factor of 1 is plain A*;
/// larger factors give weighted A*, which is no longer guaranteed to find a shortest path.
#[derive(Clone, Debug)]
pub struct AstarPolicy {
    pub heuristic_factor: i32,
}

impl AstarPolicy {
    pub fn new() -> AstarPolicy {
        AstarPolicy {
            heuristic_factor: 1,
        }
    }
    pub fn weighted(heuristic_factor: i32) -> AstarPolicy {
        AstarPolicy { heuristic_factor }
    }
}

impl Default for AstarPolicy {
    fn default() -> Self {
        AstarPolicy::new()
    }
}

impl CostPolicy for AstarPolicy {
    fn priority(&self, g: i32, node: &Point, target: &Point) -> i32 {
        g + self.heuristic_factor * node.manhattan_distance(target)
    }
    fn optimal(&self) -> bool {
        self.heuristic_factor <= 1
    }
}
