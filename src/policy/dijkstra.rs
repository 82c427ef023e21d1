use grid_util::point::Point;

use crate::policy::CostPolicy;

/// Uniform-cost search (Dijkstra): the priority is just the accumulated cost.
#[derive(Clone, Debug)]
pub struct UniformCostPolicy;

impl CostPolicy for UniformCostPolicy {
    fn priority(&self, g: i32, _: &Point, _: &Point) -> i32 {
        g
    }
    fn optimal(&self) -> bool {
        true
    }
}
