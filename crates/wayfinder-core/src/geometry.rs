#![forbid(unsafe_code)]

//! Grid coordinates and navigation directions.
//!
//! Positions are 0-based everywhere inside Wayfinder. Only spoken output
//! converts to 1-based ranks.

use std::fmt;

/// Direction of a single navigation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavDirection {
    Up,
    Down,
    Left,
    Right,
}

impl NavDirection {
    /// All four directions.
    pub const ALL: [NavDirection; 4] = [
        NavDirection::Up,
        NavDirection::Down,
        NavDirection::Left,
        NavDirection::Right,
    ];

    /// The direction that undoes this one.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Whether this direction moves between rows.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }
}

impl fmt::Display for NavDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// A cell in a navigation grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPos {
    pub row: usize,
    pub column: usize,
}

impl GridPos {
    #[must_use]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Step one cell in `dir` inside a `rows` x `columns` grid.
    ///
    /// Leaving the grid either cycles to the opposite edge (`wrap`) or stays
    /// on the boundary. Degenerate grids (zero rows or columns) return `self`.
    #[must_use]
    pub fn step(self, dir: NavDirection, rows: usize, columns: usize, wrap: bool) -> Self {
        if rows == 0 || columns == 0 {
            return self;
        }
        let (value, len) = if dir.is_vertical() {
            (self.row, rows)
        } else {
            (self.column, columns)
        };
        let next = match dir {
            NavDirection::Up | NavDirection::Left => {
                if value == 0 {
                    if wrap { len - 1 } else { 0 }
                } else {
                    value - 1
                }
            }
            NavDirection::Down | NavDirection::Right => {
                if value + 1 >= len {
                    if wrap { 0 } else { len - 1 }
                } else {
                    value + 1
                }
            }
        };
        if dir.is_vertical() {
            Self::new(next, self.column)
        } else {
            Self::new(self.row, next)
        }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}
