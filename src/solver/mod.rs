mod board;
mod chromosome;
mod constraint;
mod evolutionary;
mod population;
#[cfg(feature = "test-utils")]
pub mod test_utils;
mod traits;

pub use board::{MineOracle, SolverBoard, SolverCell};
pub use chromosome::Chromosome;
pub use constraint::ConstraintSolver;
pub use evolutionary::{
    select_move, EvolutionConfig, EvolutionarySolver, RunSummary, Termination,
};
pub use population::{FitnessStats, Population};
pub use traits::{Certainty, Solver, SolverAction, SolverResult};

use crate::{CancelToken, ConfigError, Grid, SolveError};
use rand::RngCore;

// Factory method for the constraint-first, evolutionary-fallback chain
pub fn create_hybrid_solver(config: EvolutionConfig) -> Result<ChainSolver, ConfigError> {
    Ok(ChainSolver::new(vec![
        Box::new(ConstraintSolver::without_guess()),
        Box::new(EvolutionarySolver::new(config)?),
    ]))
}

/// Asks each solver in turn and returns the first non-empty result.
pub struct ChainSolver {
    solvers: Vec<Box<dyn Solver>>,
}

impl ChainSolver {
    pub fn new(solvers: Vec<Box<dyn Solver>>) -> Self {
        Self { solvers }
    }
}

impl Solver for ChainSolver {
    fn name(&self) -> &str {
        "Chain Solver"
    }

    fn next_move(
        &mut self,
        grid: &Grid,
        rng: &mut dyn RngCore,
        cancel: &CancelToken,
    ) -> Result<SolverResult, SolveError> {
        for solver in &mut self.solvers {
            if cancel.is_cancelled() {
                break;
            }
            let result = solver.next_move(grid, rng, cancel)?;
            if !result.is_empty() {
                log::trace!("{} produced {} actions", solver.name(), result.actions.len());
                return Ok(result);
            }
        }
        Ok(SolverResult::empty())
    }

    fn is_deterministic(&self) -> bool {
        self.solvers.iter().all(|solver| solver.is_deterministic())
    }
}
