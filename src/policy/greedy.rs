use grid_util::point::Point;

use crate::policy::CostPolicy;

/// Greedy best-first search: the priority is the heuristic alone.
#[derive(Clone, Debug)]
pub struct GreedyPolicy;

impl CostPolicy for GreedyPolicy {
    fn priority(&self, _: i32, node: &Point, target: &Point) -> i32 {
        node.manhattan_distance(target)
    }
    fn optimal(&self) -> bool {
        false
    }
}
