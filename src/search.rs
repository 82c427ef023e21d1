//! Generalized best-first search. The priority function decides which variant runs: uniform-cost
//! (Dijkstra), greedy best-first, A* or weighted A*. Bookkeeping follows
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html):
//! nodes are stored once in an insertion-ordered map and the heap refers to them by index.
use fxhash::{FxBuildHasher, FxHashSet};
use grid_util::point::Point;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::{debug, warn};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::observer::SearchObserver;
use crate::policy::CostPolicy;
use crate::NEIGHBOURHOOD_SIZE;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Every edge of the grid has the same cost.
const EDGE_COST: i32 = 1;

struct QueueEntry {
    priority: i32,
    sequence: usize,
    index: usize,
}

impl Eq for QueueEntry {}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.sequence == other.sequence
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for the max-heap: lowest priority first, ties go to the earliest insertion
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

#[derive(Clone, Copy, Debug)]
struct NodeRecord {
    parent: usize,
    g: i32,
    f: i32,
}

/// What a successful search leaves behind besides the cell colouring.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchTrace {
    /// From start to target, both included.
    pub path: Vec<Point>,
    /// Nodes in the order they were popped from the queue.
    pub expanded: Vec<Point>,
    /// Nodes in the order they were queued; the position is the tie-break sequence number.
    pub enqueued: Vec<Point>,
}

impl SearchTrace {
    /// Number of edges on the path.
    pub fn path_len(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

fn reverse_path(parents: &FxIndexMap<Point, NodeRecord>, start: usize) -> Vec<Point> {
    let mut path: Vec<Point> = itertools::unfold(start, |i| {
        parents.get_index(*i).map(|(node, record)| {
            *i = record.parent;
            *node
        })
    })
    .collect();
    path.reverse();
    path
}

/// Whether a search may recolour the cell at `point` as frontier, visited or path.
fn recolourable(grid: &Grid, point: Point, start: Point, protected: &[Point]) -> bool {
    point != start
        && !protected.contains(&point)
        && grid
            .cell(point)
            .map_or(false, |cell| !cell.is_path() && !cell.is_landmark())
}

/// Puts a leg endpoint back into its role: protected cells keep their waypoint state, other cells
/// become the goal or the start. Cells that already are a start, goal or waypoint are left alone.
fn restore_endpoint(grid: &mut Grid, point: Point, protected: &[Point], goal: bool) {
    if protected.contains(&point) {
        return;
    }
    if let Some(cell) = grid.cell_mut(point) {
        if cell.is_landmark() {
            return;
        }
        if goal {
            cell.make_goal();
        } else {
            cell.make_start();
        }
    }
}

/// Marks the path found, walking from the target back towards the start, and calls the observer
/// for every cell it marks. Landmarks and protected cells on the path keep their state and are
/// not reported.
fn mark_path<O>(grid: &mut Grid, path: &[Point], protected: &[Point], observer: &mut O)
where
    O: SearchObserver + ?Sized,
{
    let n = path.len();
    if n < 3 {
        return;
    }
    for &point in path[1..n - 1].iter().rev() {
        if protected.contains(&point) {
            continue;
        }
        let marked = match grid.cell_mut(point) {
            Some(cell) if !cell.is_landmark() => {
                cell.make_path();
                true
            }
            _ => false,
        };
        if marked {
            observer.observe(grid);
        }
    }
}

/// Runs a single best-first search from `start` to `target`, colouring cells as it goes.
///
/// Nodes are popped by `(priority, sequence)` where the sequence number increases with every
/// insertion, so equal priorities are expanded in insertion order. A neighbour is only queued if
/// it is not in the queue already; an improvement on a queued node updates its cost and parent
/// but keeps its queue position. `protected` cells (the waypoints of a route) are never
/// recoloured. The observer sees the grid after every expansion and once for every cell marked as
/// path; path cells that are landmarks or protected are not marked and not reported. It is polled
/// for an abort before each expansion.
///
/// Fails with [Error::NoPathFound] once the queue runs dry and with [Error::AbortedByCaller] when
/// the observer asks to stop; in both cases the colouring done so far is kept.
pub fn best_first_search<P, O>(
    grid: &mut Grid,
    start: Point,
    target: Point,
    protected: &[Point],
    policy: &P,
    observer: &mut O,
) -> Result<SearchTrace>
where
    P: CostPolicy + ?Sized,
    O: SearchObserver + ?Sized,
{
    for point in [start, target] {
        if !grid.in_bounds(point) {
            return Err(Error::OutOfBounds(point));
        }
    }
    grid.update();

    let mut trace = SearchTrace::default();
    if grid.cell(start).map_or(false, Cell::is_obstacle) {
        warn!("Search started on obstacle {:?}", start);
        return Err(Error::NoPathFound {
            from: start,
            to: target,
        });
    }

    let mut parents: FxIndexMap<Point, NodeRecord> = FxIndexMap::default();
    let start_priority = policy.priority(0, &start, &target);
    parents.insert(
        start,
        NodeRecord {
            parent: usize::MAX,
            g: 0,
            f: start_priority,
        },
    );
    let mut open: FxHashSet<Point> = FxHashSet::default();
    open.insert(start);
    let mut sequence = 0;
    let mut to_see = BinaryHeap::new();
    to_see.push(QueueEntry {
        priority: start_priority,
        sequence,
        index: 0,
    });
    trace.enqueued.push(start);

    while let Some(QueueEntry { index, .. }) = to_see.pop() {
        if observer.should_abort() {
            warn!(
                "Search from {:?} to {:?} aborted after {} expansions",
                start,
                target,
                trace.expanded.len()
            );
            return Err(Error::AbortedByCaller);
        }
        let (node, g) = match parents.get_index(index) {
            Some((node, record)) => (*node, record.g),
            None => break,
        };
        open.remove(&node);
        trace.expanded.push(node);

        if node == target {
            restore_endpoint(grid, target, protected, true);
            trace.path = reverse_path(&parents, index);
            mark_path(grid, &trace.path, protected, observer);
            restore_endpoint(grid, start, protected, false);
            debug!(
                "Reached {:?} from {:?} in {} steps: {} expanded, {} enqueued",
                target,
                start,
                trace.path_len(),
                trace.expanded.len(),
                trace.enqueued.len()
            );
            return Ok(trace);
        }

        let successors: SmallVec<[Point; NEIGHBOURHOOD_SIZE]> = grid
            .cell(node)
            .map(|cell| SmallVec::from_slice(cell.neighbours()))
            .unwrap_or_default();
        for successor in successors {
            let new_g = g + EDGE_COST;
            let n = match parents.entry(successor) {
                Vacant(e) => {
                    let f = policy.priority(new_g, e.key(), &target);
                    let n = e.index();
                    e.insert(NodeRecord {
                        parent: index,
                        g: new_g,
                        f,
                    });
                    n
                }
                Occupied(mut e) => {
                    if e.get().g > new_g {
                        let f = policy.priority(new_g, e.key(), &target);
                        e.insert(NodeRecord {
                            parent: index,
                            g: new_g,
                            f,
                        });
                        e.index()
                    } else {
                        continue;
                    }
                }
            };
            if open.insert(successor) {
                sequence += 1;
                to_see.push(QueueEntry {
                    priority: parents[n].f,
                    sequence,
                    index: n,
                });
                trace.enqueued.push(successor);
                if recolourable(grid, successor, start, protected) {
                    if let Some(cell) = grid.cell_mut(successor) {
                        cell.make_frontier();
                    }
                }
            }
        }
        observer.observe(grid);

        if recolourable(grid, node, start, protected) {
            if let Some(cell) = grid.cell_mut(node) {
                cell.make_visited();
            }
        }
    }
    warn!(
        "No path from {:?} to {:?} after {} expansions",
        start,
        target,
        trace.expanded.len()
    );
    Err(Error::NoPathFound {
        from: start,
        to: target,
    })
}
