//! Walkability grid and breadth-first path queries.
//!
//! Nearest-source lookup and per-step movement both ride on plain
//! breadth-first search over the four-connected grid, so "nearest" always
//! means path distance, never straight-line distance. At room scale the
//! full search per query is cheap enough that no distance cache is kept.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use colony_types::Position;

use crate::error::SimError;

/// A rectangular grid of walkable and blocked cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    blocked: BTreeSet<Position>,
}

impl Grid {
    /// Create a fully walkable grid.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidDimensions`] when either dimension is
    /// zero.
    pub fn new(width: u32, height: u32) -> Result<Self, SimError> {
        if width == 0 || height == 0 {
            return Err(SimError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            blocked: BTreeSet::new(),
        })
    }

    /// Grid width in cells.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Whether `pos` lies inside the grid.
    pub const fn in_bounds(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Mark a cell as impassable.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::OutOfBounds`] for cells outside the grid.
    pub fn block(&mut self, pos: Position) -> Result<(), SimError> {
        if !self.in_bounds(pos) {
            return Err(SimError::OutOfBounds(pos));
        }
        self.blocked.insert(pos);
        Ok(())
    }

    /// Mark a cell as walkable again.
    pub fn unblock(&mut self, pos: Position) {
        self.blocked.remove(&pos);
    }

    /// Whether an agent may stand on `pos`.
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.in_bounds(pos) && !self.blocked.contains(&pos)
    }

    /// Number of walkable cells in the grid.
    pub fn walkable_cells(&self) -> Vec<Position> {
        let mut cells = Vec::new();
        for x in 0..self.width {
            for y in 0..self.height {
                let pos = Position::new(x, y);
                if self.is_walkable(pos) {
                    cells.push(pos);
                }
            }
        }
        cells
    }

    /// The four orthogonal neighbor candidates of `pos` (may be out of
    /// bounds; callers filter through [`Grid::is_walkable`]).
    fn neighbors(pos: Position) -> [Option<Position>; 4] {
        [
            pos.x.checked_sub(1).map(|x| Position::new(x, pos.y)),
            pos.x.checked_add(1).map(|x| Position::new(x, pos.y)),
            pos.y.checked_sub(1).map(|y| Position::new(pos.x, y)),
            pos.y.checked_add(1).map(|y| Position::new(pos.x, y)),
        ]
    }

    /// Nearest goal cell from `from` by path distance.
    ///
    /// Breadth-first expansion guarantees the first goal dequeued is at
    /// minimal path distance. Returns `None` when no goal is reachable.
    pub fn nearest_by_path(&self, from: Position, goals: &BTreeSet<Position>) -> Option<Position> {
        if goals.is_empty() || !self.is_walkable(from) {
            return None;
        }

        let mut visited = BTreeSet::from([from]);
        let mut frontier = VecDeque::from([from]);
        while let Some(pos) = frontier.pop_front() {
            if goals.contains(&pos) {
                return Some(pos);
            }
            for next in Self::neighbors(pos).into_iter().flatten() {
                if self.is_walkable(next) && visited.insert(next) {
                    frontier.push_back(next);
                }
            }
        }
        None
    }

    /// First cell of a shortest path from `from` to `to`.
    ///
    /// Returns `None` when already there or when `to` is unreachable.
    pub fn next_step_toward(&self, from: Position, to: Position) -> Option<Position> {
        if from == to || !self.is_walkable(from) || !self.is_walkable(to) {
            return None;
        }

        let mut parents: BTreeMap<Position, Position> = BTreeMap::new();
        let mut visited = BTreeSet::from([from]);
        let mut frontier = VecDeque::from([from]);
        while let Some(pos) = frontier.pop_front() {
            if pos == to {
                // Walk the parent chain back to the cell after `from`.
                let mut step = to;
                while let Some(&parent) = parents.get(&step) {
                    if parent == from {
                        return Some(step);
                    }
                    step = parent;
                }
                return None;
            }
            for next in Self::neighbors(pos).into_iter().flatten() {
                if self.is_walkable(next) && visited.insert(next) {
                    parents.insert(next, pos);
                    frontier.push_back(next);
                }
            }
        }
        None
    }
}
