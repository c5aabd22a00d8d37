//! # Pathfinding Algorithms
//!
//! Weighted-grid A* used by monster AI. Each cell carries a movement cost where
//! zero means impassable; stepping into a cell costs its weight times 2 for a
//! cardinal step and times 3 for a diagonal one.

use crate::game::{Direction, Position};
use ::pathfinding::prelude::astar;

const CARDINAL_COST: u32 = 2;
const DIAGONAL_COST: u32 = 3;

/// Movement cost per cell for one path query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostGrid {
    width: i32,
    height: i32,
    costs: Vec<u32>,
}

impl CostGrid {
    /// Creates a grid where every cell is impassable.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            costs: vec![0; (width.max(0) * height.max(0)) as usize],
        }
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.width || pos.y >= self.height {
            None
        } else {
            Some((pos.y * self.width + pos.x) as usize)
        }
    }

    /// Returns the cost of entering `pos`; out-of-bounds cells cost 0.
    pub fn cost(&self, pos: Position) -> u32 {
        self.index(pos).map_or(0, |i| self.costs[i])
    }

    pub fn set_cost(&mut self, pos: Position, cost: u32) {
        if let Some(i) = self.index(pos) {
            self.costs[i] = cost;
        }
    }

    /// Raises the cost of a passable cell. Impassable cells stay impassable.
    pub fn add_cost(&mut self, pos: Position, extra: u32) {
        if let Some(i) = self.index(pos) {
            if self.costs[i] > 0 {
                self.costs[i] += extra;
            }
        }
    }

    /// Finds the cheapest 8-way path from `start` to `goal`.
    ///
    /// The returned waypoints exclude `start` and end at `goal`. An empty vector
    /// means no path exists (or `start == goal`).
    ///
    /// # Examples
    ///
    /// ```
    /// use tombs::{CostGrid, Position};
    ///
    /// let mut grid = CostGrid::new(5, 1);
    /// for x in 0..5 {
    ///     grid.set_cost(Position::new(x, 0), 1);
    /// }
    /// let path = grid.path(Position::new(0, 0), Position::new(4, 0));
    /// assert_eq!(path.len(), 4);
    /// assert_eq!(path.last(), Some(&Position::new(4, 0)));
    /// ```
    pub fn path(&self, start: Position, goal: Position) -> Vec<Position> {
        if start == goal || self.cost(goal) == 0 {
            return Vec::new();
        }

        let successors = |pos: &Position| {
            let pos = *pos;
            Direction::all()
                .into_iter()
                .filter_map(move |direction| {
                    let next = pos + direction.to_delta();
                    let cell = self.cost(next);
                    if cell == 0 {
                        return None;
                    }
                    let step = if direction.is_diagonal() {
                        DIAGONAL_COST
                    } else {
                        CARDINAL_COST
                    };
                    Some((next, cell * step))
                })
                .collect::<Vec<_>>()
        };
        let heuristic = |pos: &Position| pos.chebyshev_distance(goal) as u32 * CARDINAL_COST;

        match astar(&start, successors, heuristic, |pos| *pos == goal) {
            Some((mut path, _cost)) => {
                path.remove(0);
                path
            }
            None => Vec::new(),
        }
    }
}
