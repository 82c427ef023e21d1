use core::fmt;
use std::str::FromStr;

use grid_util::point::Point;

use crate::error::Error;

pub mod astar;
pub mod dijkstra;
pub mod greedy;

use astar::AstarPolicy;
use dijkstra::UniformCostPolicy;
use greedy::GreedyPolicy;

/// Maps the accumulated cost `g` of reaching `node` to the priority under which it is queued.
/// Lower priorities are expanded first. The built-in policies use the
/// [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as heuristic, which is
/// admissible and consistent on a 4-connected grid with unit edge costs.
pub trait CostPolicy {
    fn priority(&self, g: i32, node: &Point, target: &Point) -> i32;

    /// Whether the first path found is guaranteed to be a shortest one.
    fn optimal(&self) -> bool;
}

impl<P: CostPolicy + ?Sized> CostPolicy for &P {
    fn priority(&self, g: i32, node: &Point, target: &Point) -> i32 {
        (**self).priority(g, node, target)
    }
    fn optimal(&self) -> bool {
        (**self).optimal()
    }
}

/// Heuristic weight of the weighted A* variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Weight {
    Two,
    Ten,
    TwentyFive,
}

impl Weight {
    pub fn factor(&self) -> i32 {
        match self {
            Weight::Two => 2,
            Weight::Ten => 10,
            Weight::TwentyFive => 25,
        }
    }
}

/// Selects one of the built-in priority functions. Can be switched between routes without
/// touching the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Policy {
    #[default]
    AStar,
    /// Ignores the accumulated cost. Fast, but the path found is not necessarily the shortest.
    Greedy,
    UniformCost,
    /// A* with the heuristic scaled up. Trades path length for fewer expansions.
    WeightedAStar(Weight),
}

impl Policy {
    /// All policies in selection order.
    pub const ALL: [Policy; 6] = [
        Policy::AStar,
        Policy::Greedy,
        Policy::UniformCost,
        Policy::WeightedAStar(Weight::Two),
        Policy::WeightedAStar(Weight::Ten),
        Policy::WeightedAStar(Weight::TwentyFive),
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Policy::AStar => "A-star",
            Policy::Greedy => "Greedy best first search",
            Policy::UniformCost => "Uniform cost search",
            Policy::WeightedAStar(Weight::Two) => "Weighted A-star with weight 2",
            Policy::WeightedAStar(Weight::Ten) => "Weighted A-star with weight 10",
            Policy::WeightedAStar(Weight::TwentyFive) => "Weighted A-star with weight 25",
        }
    }

    fn position(&self) -> usize {
        Policy::ALL.iter().position(|p| p == self).unwrap_or(0)
    }

    /// The next policy in selection order, staying put at the last one.
    pub fn next(&self) -> Policy {
        Policy::ALL[(self.position() + 1).min(Policy::ALL.len() - 1)]
    }

    /// The previous policy in selection order, staying put at the first one.
    pub fn previous(&self) -> Policy {
        Policy::ALL[self.position().saturating_sub(1)]
    }
}

impl CostPolicy for Policy {
    fn priority(&self, g: i32, node: &Point, target: &Point) -> i32 {
        match self {
            Policy::AStar => AstarPolicy::new().priority(g, node, target),
            Policy::Greedy => GreedyPolicy.priority(g, node, target),
            Policy::UniformCost => UniformCostPolicy.priority(g, node, target),
            Policy::WeightedAStar(w) => AstarPolicy::weighted(w.factor()).priority(g, node, target),
        }
    }
    fn optimal(&self) -> bool {
        match self {
            Policy::AStar => AstarPolicy::new().optimal(),
            Policy::Greedy => GreedyPolicy.optimal(),
            Policy::UniformCost => UniformCostPolicy.optimal(),
            Policy::WeightedAStar(w) => AstarPolicy::weighted(w.factor()).optimal(),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Policy {
    type Err = Error;

    /// Accepts the display name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Policy::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownPolicy(s.to_owned()))
    }
}
