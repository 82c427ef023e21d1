use grid_util::point::Point;
use smallvec::SmallVec;

use crate::grid::Grid;
use crate::NEIGHBOURHOOD_SIZE;

/// Semantic state of a [Cell]. Rendering is left to whoever observes the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Empty,
    Obstacle,
    Start,
    Goal,
    /// Carries the ordinal the waypoint was assigned when it was placed.
    Waypoint(u32),
    /// In the open set of the running search.
    Frontier,
    /// Expanded (closed) by the running search.
    Visited,
    Path,
}

impl CellState {
    /// Start, goal and waypoint cells. These are placed by the user and are never
    /// recoloured by a search.
    pub fn is_landmark(&self) -> bool {
        matches!(
            self,
            CellState::Start | CellState::Goal | CellState::Waypoint(_)
        )
    }

    /// States left behind by a search, wiped by a soft clear.
    pub fn is_search_mark(&self) -> bool {
        matches!(
            self,
            CellState::Frontier | CellState::Visited | CellState::Path
        )
    }

    pub fn symbol(&self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::Obstacle => '#',
            CellState::Start => 'S',
            CellState::Goal => 'G',
            CellState::Waypoint(_) => 'W',
            CellState::Frontier => 'o',
            CellState::Visited => 'x',
            CellState::Path => '*',
        }
    }
}

/// A single square of the [Grid]. Position is stored as row and column; [Cell::position]
/// returns it as a [Point] with `x` the column and `y` the row.
#[derive(Clone, Debug, Default)]
pub struct Cell {
    row: usize,
    col: usize,
    width: u32,
    state: CellState,
    neighbours: SmallVec<[Point; NEIGHBOURHOOD_SIZE]>,
}

impl Cell {
    pub fn new(row: usize, col: usize, width: u32) -> Cell {
        Cell {
            row,
            col,
            width,
            state: CellState::Empty,
            neighbours: SmallVec::new(),
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }
    pub fn col(&self) -> usize {
        self.col
    }
    pub fn position(&self) -> Point {
        Point::new(self.col as i32, self.row as i32)
    }
    /// Pixel origin and side length of the square this cell covers.
    pub fn bounds(&self) -> (u32, u32, u32) {
        (
            self.col as u32 * self.width,
            self.row as u32 * self.width,
            self.width,
        )
    }

    pub fn state(&self) -> CellState {
        self.state
    }
    pub fn waypoint_ordinal(&self) -> Option<u32> {
        match self.state {
            CellState::Waypoint(ordinal) => Some(ordinal),
            _ => None,
        }
    }
    pub fn is_obstacle(&self) -> bool {
        self.state == CellState::Obstacle
    }
    pub fn is_path(&self) -> bool {
        self.state == CellState::Path
    }
    pub fn is_landmark(&self) -> bool {
        self.state.is_landmark()
    }

    /// Traversable neighbours as of the last [Grid::recompute_neighbours].
    pub fn neighbours(&self) -> &[Point] {
        &self.neighbours
    }

    pub fn make_obstacle(&mut self) {
        self.state = CellState::Obstacle;
    }
    pub fn make_start(&mut self) {
        self.state = CellState::Start;
    }
    pub fn make_goal(&mut self) {
        self.state = CellState::Goal;
    }
    pub fn make_waypoint(&mut self, ordinal: u32) {
        self.state = CellState::Waypoint(ordinal);
    }
    pub fn make_frontier(&mut self) {
        self.state = CellState::Frontier;
    }
    pub fn make_visited(&mut self) {
        self.state = CellState::Visited;
    }
    pub fn make_path(&mut self) {
        self.state = CellState::Path;
    }
    pub fn reset(&mut self) {
        self.state = CellState::Empty;
    }

    /// Lists the neighbours that lie on `grid` and are not obstacles, in the order down, up,
    /// right, left.
    pub fn traversable_neighbours(&self, grid: &Grid) -> SmallVec<[Point; NEIGHBOURHOOD_SIZE]> {
        let (x, y) = (self.col as i32, self.row as i32);
        [
            Point::new(x, y + 1),
            Point::new(x, y - 1),
            Point::new(x + 1, y),
            Point::new(x - 1, y),
        ]
        .into_iter()
        .filter(|p| grid.cell(*p).map_or(false, |cell| !cell.is_obstacle()))
        .collect()
    }

    /// Replaces the cached neighbour list with the current traversable neighbours.
    pub fn recompute_neighbours(&mut self, grid: &Grid) {
        self.neighbours = self.traversable_neighbours(grid);
    }

    pub(crate) fn set_neighbours(&mut self, neighbours: SmallVec<[Point; NEIGHBOURHOOD_SIZE]>) {
        self.neighbours = neighbours;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_is_idempotent() {
        let mut cell = Cell::new(2, 3, 10);
        cell.make_waypoint(4);
        cell.reset();
        let once = cell.state();
        cell.reset();
        assert_eq!(once, cell.state());
        assert_eq!(cell.state(), CellState::Empty);
    }

    #[test]
    fn position_is_column_then_row() {
        let cell = Cell::new(2, 3, 10);
        assert_eq!((cell.row(), cell.col()), (2, 3));
        assert_eq!(cell.position(), Point::new(3, 2));
        assert_eq!(cell.bounds(), (30, 20, 10));
    }

    #[test]
    fn landmarks() {
        assert!(CellState::Start.is_landmark());
        assert!(CellState::Waypoint(1).is_landmark());
        assert!(!CellState::Path.is_landmark());
        assert!(CellState::Path.is_search_mark());
        assert!(!CellState::Obstacle.is_search_mark());
    }

    /// Neighbours of an interior cell come out as down, up, right, left.
    #[test]
    fn neighbour_order() {
        let grid = Grid::new(3, 30);
        let cell = grid.cell(Point::new(1, 1)).unwrap();
        let neighbours = cell.traversable_neighbours(&grid);
        assert_eq!(
            neighbours.as_slice(),
            &[
                Point::new(1, 2),
                Point::new(1, 0),
                Point::new(2, 1),
                Point::new(0, 1)
            ]
        );
    }

    #[test]
    fn obstacles_are_not_neighbours() {
        let mut grid = Grid::new(3, 30);
        grid.set_obstacle(Point::new(1, 2)).unwrap();
        let mut cell = grid.cell(Point::new(1, 1)).unwrap().clone();
        cell.recompute_neighbours(&grid);
        assert_eq!(cell.neighbours().len(), 3);
        assert!(!cell.neighbours().contains(&Point::new(1, 2)));

        let corner = grid.cell(Point::new(0, 0)).unwrap();
        assert_eq!(corner.traversable_neighbours(&grid).len(), 2);
    }

    /// A cell taken from a larger grid only sees the neighbours that exist on the smaller one.
    #[test]
    fn neighbours_on_smaller_grid() {
        let large = Grid::new(5, 50);
        let small = Grid::new(3, 30);
        let cell = large.cell(Point::new(2, 2)).unwrap();
        assert_eq!(
            cell.traversable_neighbours(&small).as_slice(),
            &[Point::new(2, 1), Point::new(1, 2)]
        );
        let mut far = large.cell(Point::new(4, 4)).unwrap().clone();
        far.recompute_neighbours(&small);
        assert!(far.neighbours().is_empty());
    }
}
