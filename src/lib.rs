pub mod cancel;
pub mod cell;
pub mod driver;
pub mod error;
pub mod grid;
pub mod position;
pub mod solver;

pub use cancel::CancelToken;
pub use cell::{Cell, CellEvent, MarkOutcome, NeighborCounts, RevealOutcome};
pub use driver::{
    run_batch, run_solver, BatchStats, SolveOptions, SolveOutcome, SolveSession, StepStatus,
};
pub use error::{ConfigError, GridError, SolveError};
pub use grid::Grid;
pub use position::Position;
