use crate::Position;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Position {0:?} is out of bounds")]
    OutOfBounds(Position),
    #[error("Grid must have at least one row and one column, got {rows}x{columns}")]
    EmptyGrid { rows: usize, columns: usize },
    #[error("Too many mines ({mines}) for {available} available cells")]
    TooManyMines { mines: usize, available: usize },
    #[error("No unrevealed and unflagged cells left")]
    NoEligibleCells,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Population size must be at least 2, got {0}")]
    PopulationTooSmall(usize),
    #[error("{name} must lie in [{min}, {max}], got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Solve did not finish within {0:?}")]
    Timeout(Duration),
}
