use core::fmt;
use grid_util::grid::{Grid as _, SimpleGrid};
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::cell::{Cell, CellState};
use crate::error::{Error, Result};
use crate::NEIGHBOURHOOD_SIZE;

/// [Grid] owns an N×N arena of [Cell]s stored in a [SimpleGrid], so a cell's index is
/// `row * N + col`. Besides the cells it keeps track of the start, goal and the ordered
/// waypoints, and maintains connected components using a [UnionFind] structure which is
/// regenerated together with the neighbour lists.
///
/// Editing goes through [Grid::set_start], [Grid::set_goal], [Grid::add_waypoint],
/// [Grid::set_obstacle] and [Grid::erase], which keep cell states mutually exclusive. Any change to
/// obstacles marks the neighbour lists as dirty; they have to be recomputed with
/// [Grid::recompute_neighbours] before the next search.
#[derive(Clone, Debug)]
pub struct Grid {
    cell_width: u32,
    cells: SimpleGrid<Cell>,
    start: Option<Point>,
    goal: Option<Point>,
    waypoints: Vec<Point>,
    next_ordinal: u32,
    components: UnionFind<usize>,
    neighbours_dirty: bool,
    cleared: bool,
}

impl Grid {
    /// Creates a `size`×`size` grid covering `width` pixels. The width is split into `size` equal
    /// spans by integer division, any remainder is dropped.
    pub fn new(size: usize, width: u32) -> Grid {
        let cell_width = if size == 0 { 0 } else { width / size as u32 };
        let mut cells: SimpleGrid<Cell> = SimpleGrid::new(size, size, Cell::default());
        for row in 0..size {
            for col in 0..size {
                if let Some(cell) = cells.get_point_mut(Point::new(col as i32, row as i32)) {
                    *cell = Cell::new(row, col, cell_width);
                }
            }
        }
        Grid {
            cell_width,
            cells,
            start: None,
            goal: None,
            waypoints: Vec::new(),
            next_ordinal: 1,
            components: UnionFind::new(size * size),
            neighbours_dirty: true,
            cleared: false,
        }
    }

    pub fn size(&self) -> usize {
        self.cells.width()
    }
    pub fn cell_width(&self) -> u32 {
        self.cell_width
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        self.cells.point_in_bounds(point)
    }
    pub fn index(&self, point: Point) -> Option<usize> {
        if self.in_bounds(point) {
            Some(self.cells.get_ix_point(&point))
        } else {
            None
        }
    }

    /// Every position in index order.
    fn points(&self) -> impl Iterator<Item = Point> {
        let n = self.size() as i32;
        (0..n).flat_map(move |y| (0..n).map(move |x| Point::new(x, y)))
    }

    pub fn cell(&self, point: Point) -> Option<&Cell> {
        if self.in_bounds(point) {
            self.cells.get_point(point)
        } else {
            None
        }
    }
    pub(crate) fn cell_mut(&mut self, point: Point) -> Option<&mut Cell> {
        if self.in_bounds(point) {
            self.cells.get_point_mut(point)
        } else {
            None
        }
    }
    fn checked_cell_mut(&mut self, point: Point) -> Result<&mut Cell> {
        self.cell_mut(point).ok_or(Error::OutOfBounds(point))
    }
    fn checked_state(&self, point: Point) -> Result<CellState> {
        self.state(point).ok_or(Error::OutOfBounds(point))
    }

    /// Cells in index order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.points().filter_map(move |p| self.cells.get_point(p))
    }
    fn for_each_cell_mut<F: FnMut(&mut Cell)>(&mut self, mut f: F) {
        for point in self.points().collect::<Vec<_>>() {
            if let Some(cell) = self.cells.get_point_mut(point) {
                f(cell);
            }
        }
    }
    pub fn state(&self, point: Point) -> Option<CellState> {
        self.cell(point).map(Cell::state)
    }
    /// Snapshot of every cell state in index order.
    pub fn states(&self) -> Vec<CellState> {
        self.cells().map(Cell::state).collect()
    }
    pub fn count(&self, state: CellState) -> usize {
        self.cells().filter(|c| c.state() == state).count()
    }

    pub fn start(&self) -> Option<Point> {
        self.start
    }
    pub fn goal(&self) -> Option<Point> {
        self.goal
    }
    /// Waypoints in the order they were placed.
    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    /// Places the start, moving it if one already exists.
    pub fn set_start(&mut self, point: Point) -> Result<()> {
        match self.checked_state(point)? {
            CellState::Start => return Ok(()),
            state @ (CellState::Obstacle | CellState::Goal | CellState::Waypoint(_)) => {
                return Err(Error::CellOccupied { point, state })
            }
            _ => {}
        }
        if let Some(old) = self.start.replace(point) {
            self.checked_cell_mut(old)?.reset();
        }
        self.checked_cell_mut(point)?.make_start();
        self.cleared = false;
        Ok(())
    }

    /// Places the goal, moving it if one already exists.
    pub fn set_goal(&mut self, point: Point) -> Result<()> {
        match self.checked_state(point)? {
            CellState::Goal => return Ok(()),
            state @ (CellState::Obstacle | CellState::Start | CellState::Waypoint(_)) => {
                return Err(Error::CellOccupied { point, state })
            }
            _ => {}
        }
        if let Some(old) = self.goal.replace(point) {
            self.checked_cell_mut(old)?.reset();
        }
        self.checked_cell_mut(point)?.make_goal();
        self.cleared = false;
        Ok(())
    }

    /// Appends a waypoint and returns its ordinal. Ordinals keep increasing until a hard clear,
    /// so removing a waypoint never changes the ordinal of another one.
    pub fn add_waypoint(&mut self, point: Point) -> Result<u32> {
        let state = self.checked_state(point)?;
        if state.is_landmark() || state == CellState::Obstacle {
            return Err(Error::CellOccupied { point, state });
        }
        let ordinal = self.next_ordinal;
        self.checked_cell_mut(point)?.make_waypoint(ordinal);
        self.next_ordinal += 1;
        self.waypoints.push(point);
        self.cleared = false;
        Ok(ordinal)
    }

    pub fn set_obstacle(&mut self, point: Point) -> Result<()> {
        let state = self.checked_state(point)?;
        if state.is_landmark() {
            return Err(Error::CellOccupied { point, state });
        }
        if state != CellState::Obstacle {
            self.checked_cell_mut(point)?.make_obstacle();
            self.neighbours_dirty = true;
        }
        self.cleared = false;
        Ok(())
    }

    /// Resets a single cell to [CellState::Empty], dropping it from the start, goal or
    /// waypoint bookkeeping.
    pub fn erase(&mut self, point: Point) -> Result<()> {
        match self.checked_state(point)? {
            CellState::Start => self.start = None,
            CellState::Goal => self.goal = None,
            CellState::Waypoint(_) => self.waypoints.retain(|w| *w != point),
            CellState::Obstacle => self.neighbours_dirty = true,
            _ => {}
        }
        self.checked_cell_mut(point)?.reset();
        self.cleared = false;
        Ok(())
    }

    /// Wipes what previous searches left behind. Start, goal, waypoints and obstacles survive.
    pub fn soft_clear(&mut self) {
        self.for_each_cell_mut(|cell| {
            if cell.state().is_search_mark() {
                cell.reset();
            }
        });
    }

    /// Resets every cell and forgets start, goal and waypoints.
    pub fn hard_clear(&mut self) {
        self.for_each_cell_mut(Cell::reset);
        self.start = None;
        self.goal = None;
        self.waypoints.clear();
        self.next_ordinal = 1;
        self.neighbours_dirty = true;
    }

    /// The first call does a [soft clear](Self::soft_clear); calling again without any edit in
    /// between does a [hard clear](Self::hard_clear).
    pub fn clear(&mut self) {
        if self.cleared {
            self.hard_clear();
        } else {
            self.soft_clear();
        }
        self.cleared = true;
    }

    pub(crate) fn touch(&mut self) {
        self.cleared = false;
    }

    pub fn neighbours_dirty(&self) -> bool {
        self.neighbours_dirty
    }

    /// Recomputes the neighbour list of every cell and regenerates the connected components.
    /// Not incremental; must run after obstacles change and before a search.
    pub fn recompute_neighbours(&mut self) {
        let neighbours: Vec<(Point, SmallVec<[Point; NEIGHBOURHOOD_SIZE]>)> = self
            .cells()
            .map(|cell| (cell.position(), cell.traversable_neighbours(self)))
            .collect();
        for (point, n) in neighbours {
            if let Some(cell) = self.cells.get_point_mut(point) {
                cell.set_neighbours(n);
            }
        }
        self.generate_components();
        self.neighbours_dirty = false;
    }

    /// Recomputes the neighbours if they are marked as dirty.
    pub fn update(&mut self) {
        if self.neighbours_dirty {
            info!("Neighbours are dirty: recomputing");
            self.recompute_neighbours();
        }
    }

    /// Generates a new [UnionFind] structure and links up traversable cells to the same components.
    fn generate_components(&mut self) {
        let n = self.size();
        let mut components = UnionFind::new(n * n);
        for cell in self.cells().filter(|c| !c.is_obstacle()) {
            let parent_ix = self.cells.get_ix_point(&cell.position());
            for p in cell.neighbours() {
                components.union(parent_ix, self.cells.get_ix_point(p));
            }
        }
        self.components = components;
    }

    /// Checks if `a` and `b` lie on the same 4-connected component. Only meaningful while the
    /// neighbours are not dirty.
    pub fn reachable(&self, a: Point, b: Point) -> bool {
        match (self.cell(a), self.cell(b)) {
            (Some(cell_a), Some(cell_b)) => {
                !cell_a.is_obstacle()
                    && !cell_b.is_obstacle()
                    && self
                        .components
                        .equiv(self.cells.get_ix_point(&a), self.cells.get_ix_point(&b))
            }
            _ => false,
        }
    }

    /// Maps a pixel to the cell covering it. Pixels in the remainder dropped by the floor
    /// division map to nothing.
    pub fn cell_at_pixel(&self, x: u32, y: u32) -> Option<Point> {
        if self.cell_width == 0 {
            return None;
        }
        let point = Point::new((x / self.cell_width) as i32, (y / self.cell_width) as i32);
        if self.in_bounds(point) {
            Some(point)
        } else {
            None
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let n = self.size() as i32;
        for y in 0..n {
            let line: String = (0..n)
                .filter_map(|x| self.state(Point::new(x, y)))
                .map(|state| state.symbol())
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn floor_divided_partition() {
        let grid = Grid::new(30, 800);
        assert_eq!(grid.cell_width(), 26);
        assert_eq!(grid.cells().count(), 900);
        assert_eq!(grid.cell_at_pixel(0, 0), Some(p(0, 0)));
        assert_eq!(grid.cell_at_pixel(27, 53), Some(p(1, 2)));
        // 30 * 26 = 780, the last 20 pixels belong to no cell
        assert_eq!(grid.cell_at_pixel(790, 10), None);
        assert_eq!(grid.cell(p(29, 29)).unwrap().bounds(), (754, 754, 26));
    }

    #[test]
    fn index_is_row_major() {
        let grid = Grid::new(7, 70);
        assert_eq!(grid.index(p(3, 5)), Some(5 * 7 + 3));
        assert_eq!(grid.index(p(-1, 0)), None);
        assert_eq!(grid.index(p(0, 7)), None);
        assert!(grid.cell(p(7, 0)).is_none());
        let positions: Vec<Point> = grid.cells().map(Cell::position).take(8).collect();
        assert_eq!(positions[6], p(6, 0));
        assert_eq!(positions[7], p(0, 1));
        assert_eq!(grid.cell(p(3, 5)).map(|c| (c.row(), c.col())), Some((5, 3)));
    }

    #[test]
    fn single_start_and_goal() {
        let mut grid = Grid::new(5, 50);
        grid.set_start(p(0, 0)).unwrap();
        grid.set_start(p(1, 0)).unwrap();
        assert_eq!(grid.count(CellState::Start), 1);
        assert_eq!(grid.start(), Some(p(1, 0)));
        assert_eq!(grid.state(p(0, 0)), Some(CellState::Empty));

        assert_eq!(
            grid.set_goal(p(1, 0)),
            Err(Error::CellOccupied {
                point: p(1, 0),
                state: CellState::Start
            })
        );
        grid.set_goal(p(4, 4)).unwrap();
        grid.set_goal(p(3, 4)).unwrap();
        assert_eq!(grid.count(CellState::Goal), 1);
    }

    #[test]
    fn obstacles_exclude_landmarks() {
        let mut grid = Grid::new(5, 50);
        grid.set_start(p(0, 0)).unwrap();
        assert!(grid.set_obstacle(p(0, 0)).is_err());
        grid.set_obstacle(p(2, 2)).unwrap();
        assert!(grid.set_start(p(2, 2)).is_err());
        assert!(grid.add_waypoint(p(2, 2)).is_err());
        assert_eq!(grid.set_obstacle(p(9, 9)), Err(Error::OutOfBounds(p(9, 9))));
    }

    #[test]
    fn waypoint_ordinals_are_stable() {
        let mut grid = Grid::new(5, 50);
        assert_eq!(grid.add_waypoint(p(1, 1)).unwrap(), 1);
        assert_eq!(grid.add_waypoint(p(2, 2)).unwrap(), 2);
        grid.erase(p(1, 1)).unwrap();
        assert_eq!(grid.add_waypoint(p(3, 3)).unwrap(), 3);
        assert_eq!(grid.waypoints(), &[p(2, 2), p(3, 3)]);
        assert_eq!(grid.state(p(2, 2)), Some(CellState::Waypoint(2)));
        assert_eq!(grid.cell(p(3, 3)).and_then(Cell::waypoint_ordinal), Some(3));
        assert!(grid.add_waypoint(p(2, 2)).is_err());
    }

    #[test]
    fn soft_then_hard_clear_equals_hard_clear() {
        let mut grid = Grid::new(5, 50);
        grid.set_start(p(0, 0)).unwrap();
        grid.set_goal(p(4, 4)).unwrap();
        grid.add_waypoint(p(2, 0)).unwrap();
        grid.set_obstacle(p(2, 2)).unwrap();
        grid.cell_mut(p(1, 1)).unwrap().make_visited();
        grid.cell_mut(p(2, 1)).unwrap().make_path();

        let mut hard_only = grid.clone();
        hard_only.hard_clear();

        grid.soft_clear();
        assert_eq!(grid.count(CellState::Visited), 0);
        assert_eq!(grid.count(CellState::Path), 0);
        assert_eq!(grid.count(CellState::Obstacle), 1);
        assert_eq!(grid.state(p(2, 0)), Some(CellState::Waypoint(1)));
        grid.hard_clear();

        assert_eq!(grid.states(), hard_only.states());
        assert_eq!(grid.start(), None);
        assert!(grid.waypoints().is_empty());
    }

    #[test]
    fn clear_toggles_soft_then_hard() {
        let mut grid = Grid::new(5, 50);
        grid.set_start(p(0, 0)).unwrap();
        grid.cell_mut(p(3, 0)).unwrap().make_frontier();
        grid.clear();
        assert_eq!(grid.start(), Some(p(0, 0)));
        assert_eq!(grid.count(CellState::Frontier), 0);
        grid.clear();
        assert_eq!(grid.start(), None);
        assert_eq!(grid.count(CellState::Empty), 25);
    }

    #[test]
    fn edit_between_clears_keeps_soft() {
        let mut grid = Grid::new(5, 50);
        grid.set_start(p(0, 0)).unwrap();
        grid.clear();
        grid.set_goal(p(4, 4)).unwrap();
        grid.clear();
        assert_eq!(grid.start(), Some(p(0, 0)));
        assert_eq!(grid.goal(), Some(p(4, 4)));
    }

    /// Tests whether points are correctly mapped to different connected components
    #[test]
    fn component_generation() {
        // .#.
        // .#.
        // .#.
        let mut grid = Grid::new(3, 30);
        for y in 0..3 {
            grid.set_obstacle(p(1, y)).unwrap();
        }
        assert!(grid.neighbours_dirty());
        grid.update();
        assert!(!grid.neighbours_dirty());
        assert!(grid.reachable(p(0, 0), p(0, 2)));
        assert!(!grid.reachable(p(0, 0), p(2, 0)));
        assert!(!grid.reachable(p(0, 0), p(1, 1)));

        grid.erase(p(1, 2)).unwrap();
        grid.update();
        assert!(grid.reachable(p(0, 0), p(2, 0)));
    }

    #[test]
    fn display() {
        let mut grid = Grid::new(3, 30);
        grid.set_start(p(0, 0)).unwrap();
        grid.set_goal(p(2, 2)).unwrap();
        grid.set_obstacle(p(1, 1)).unwrap();
        grid.add_waypoint(p(2, 0)).unwrap();
        assert_eq!(format!("{}", grid), "S.W\n.#.\n..G\n");
    }
}
