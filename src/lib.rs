//! # maze_pathfinding
//!
//! Generates rectangular mazes with randomly placed obstacles and finds
//! shortest paths between cells using
//! [A* search](https://en.wikipedia.org/wiki/A*_search_algorithm) with a
//! Manhattan heuristic. Movement is axis-aligned with uniform step cost.
//! Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! to avoid flood-filling behaviour if no path exists.
mod astar;

use grid_util::grid::{BoolGrid, ValueGrid};
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;
use rand::Rng;

use crate::astar::astar;
use core::fmt;
use std::error::Error;

/// Candidate steps in fixed right, down, left, up order. The order decides
/// which of several equal-cost paths wins, so it is part of the contract.
const NEIGHBOUR_ORDER: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Errors reported by maze construction and path queries.
///
/// An unreachable goal is deliberately not represented here: dense random
/// mazes are frequently unsolvable, so [find_path](MazeGrid::find_path)
/// reports that case as an `Ok(None)` result instead.
#[derive(Debug, Clone, PartialEq)]
pub enum MazeError {
    /// The grid would have zero rows or zero columns.
    InvalidShape { width: usize, height: usize },
    /// The obstacle density lies outside `[0, 1]`.
    InvalidDensity(f64),
    /// A start or goal coordinate lies outside the grid.
    OutOfBounds(Point),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MazeError::InvalidShape { width, height } => {
                write!(f, "invalid grid shape {}x{}", width, height)
            }
            MazeError::InvalidDensity(density) => {
                write!(f, "obstacle density {} outside [0, 1]", density)
            }
            MazeError::OutOfBounds(point) => {
                write!(f, "coordinate {:?} outside the grid", point)
            }
        }
    }
}

impl Error for MazeError {}

/// Manhattan distance between two cells, the heuristic used by
/// [find_path](MazeGrid::find_path). Admissible and consistent under
/// unit-cost orthogonal movement.
pub fn manhattan_distance(a: &Point, b: &Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// [MazeGrid] couples the raw [bool] obstacle values in a [BoolGrid]
/// ([true] marking a blocked cell) with a [UnionFind] structure recording
/// which open cells are connected. The grid is fixed after construction:
/// components are generated once and reused by every
/// [find_path](MazeGrid::find_path) call, and search bookkeeping is allocated
/// fresh per call, so a single grid can be solved repeatedly.
#[derive(Clone, Debug)]
pub struct MazeGrid {
    grid: BoolGrid,
    components: UnionFind<usize>,
}

/// Two mazes are equal when their obstacle grids are identical; the
/// `components` field is derived from the grid and carries no extra state.
impl PartialEq for MazeGrid {
    fn eq(&self, other: &Self) -> bool {
        self.grid.width == other.grid.width
            && self.grid.height == other.grid.height
            && self.grid.values == other.grid.values
    }
}

impl MazeGrid {
    /// Creates a maze from an explicit blocked predicate.
    pub fn from_fn<F>(width: usize, height: usize, mut blocked: F) -> Result<MazeGrid, MazeError>
    where
        F: FnMut(Point) -> bool,
    {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidShape { width, height });
        }
        let mut grid = BoolGrid::new(width, height, false);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                grid.set(x, y, blocked(Point::new(x, y)));
            }
        }
        Ok(MazeGrid::from_grid(grid))
    }

    /// Generates a random maze: every cell except the start corner `(0, 0)`
    /// and the goal corner `(width - 1, height - 1)` is blocked with
    /// independent probability `density`. The two corner cells are always
    /// open. No attempt is made to guarantee the maze is solvable.
    pub fn generate<R: Rng>(
        width: usize,
        height: usize,
        density: f64,
        rng: &mut R,
    ) -> Result<MazeGrid, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidShape { width, height });
        }
        if !(0.0..=1.0).contains(&density) {
            return Err(MazeError::InvalidDensity(density));
        }
        let start = Point::new(0, 0);
        let goal = Point::new(width as i32 - 1, height as i32 - 1);
        MazeGrid::from_fn(width, height, |p| {
            p != start && p != goal && rng.gen_bool(density)
        })
    }

    fn from_grid(grid: BoolGrid) -> MazeGrid {
        let cells = grid.width() * grid.height();
        let mut maze = MazeGrid {
            grid,
            components: UnionFind::new(cells),
        };
        maze.link_components();
        maze
    }

    /// Links orthogonally adjacent open cells into the same component.
    fn link_components(&mut self) {
        info!("Generating connected components");
        let w = self.grid.width();
        let h = self.grid.height();
        for y in 0..h as i32 {
            for x in 0..w as i32 {
                if !self.grid.get(x, y) {
                    let point = Point::new(x, y);
                    let ix = self.grid.get_ix_point(&point);
                    let neighbours = [
                        Point::new(point.x + 1, point.y),
                        Point::new(point.x, point.y + 1),
                    ];
                    for p in neighbours {
                        if self.can_move_to(p) {
                            self.components.union(ix, self.grid.get_ix_point(&p));
                        }
                    }
                }
            }
        }
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// The fixed extents of the grid as `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.grid.width(), self.grid.height())
    }

    /// Whether the given in-bounds cell holds an obstacle.
    pub fn is_blocked(&self, point: Point) -> bool {
        self.grid.get_point(point)
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.grid.index_in_bounds(x, y)
    }

    fn can_move_to(&self, pos: Point) -> bool {
        self.in_bounds(pos.x, pos.y) && !self.grid.get_point(pos)
    }

    /// Open in-bounds orthogonal neighbours of a cell, in fixed
    /// right, down, left, up order.
    pub fn neighbours(&self, point: Point) -> Vec<Point> {
        NEIGHBOUR_ORDER
            .iter()
            .map(|&(dx, dy)| Point::new(point.x + dx, point.y + dy))
            .filter(|p| self.can_move_to(*p))
            .collect()
    }

    fn pathfinding_neighbourhood(&self, pos: &Point) -> Vec<(Point, i32)> {
        self.neighbours(*pos).into_iter().map(|p| (p, 1)).collect()
    }

    fn cell_ix(&self, point: &Point) -> usize {
        self.grid.get_ix_point(point)
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.cell_ix(point))
    }

    /// Checks if start and goal are on different components. Blocked cells are
    /// singleton components, so this also holds when either endpoint is a wall
    /// (unless both are the same cell).
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.in_bounds(start.x, start.y) && self.in_bounds(goal.x, goal.y) {
            let start_ix = self.cell_ix(start);
            let goal_ix = self.cell_ix(goal);
            if self.components.equiv(start_ix, goal_ix) {
                false
            } else {
                info!("{} and {} are not equivalent components", start_ix, goal_ix);
                true
            }
        } else {
            true
        }
    }

    /// Computes a shortest path from `start` to `goal`, both inclusive, using
    /// A* with the [Manhattan distance](manhattan_distance) heuristic.
    /// Consecutive path cells differ by exactly one orthogonal step.
    ///
    /// Returns `Ok(None)` when the goal cannot be reached, including when an
    /// endpoint is itself a wall. Coordinates outside the grid are rejected
    /// with [MazeError::OutOfBounds] before any search runs.
    pub fn find_path(&self, start: Point, goal: Point) -> Result<Option<Vec<Point>>, MazeError> {
        if !self.in_bounds(start.x, start.y) {
            return Err(MazeError::OutOfBounds(start));
        }
        if !self.in_bounds(goal.x, goal.y) {
            return Err(MazeError::OutOfBounds(goal));
        }
        if self.is_blocked(start) || self.is_blocked(goal) {
            info!("Start or goal is a wall, no path exists");
            return Ok(None);
        }
        if self.unreachable(&start, &goal) {
            info!("{:?} is not reachable from {:?}", goal, start);
            return Ok(None);
        }
        info!("{:?} is reachable from {:?}, computing path", goal, start);
        let result = astar(
            &start,
            |node| self.pathfinding_neighbourhood(node),
            |point| manhattan_distance(point, &goal),
            |point| *point == goal,
        );
        Ok(result.map(|(path, _cost)| path))
    }
}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Maze:")?;
        for y in 0..self.grid.height() as i32 {
            let values = (0..self.grid.width() as i32)
                .map(|x| self.grid.get(x, y) as i32)
                .collect::<Vec<i32>>();
            writeln!(f, "{:?}", values)?;
        }
        Ok(())
    }
}
