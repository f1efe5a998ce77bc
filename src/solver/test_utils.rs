use super::traits::{Certainty, Solver, SolverAction, SolverResult};
use crate::{CancelToken, ConfigError, Grid, Position, SolveError};
use rand::prelude::*;

/// Configuration for test board generation
#[derive(Debug, Clone)]
pub struct TestBoardConfig {
    pub rows: usize,
    pub columns: usize,
    pub mine_density: f64,
    pub revealed_percentage: f64,
}

impl Default for TestBoardConfig {
    fn default() -> Self {
        Self {
            rows: 8,
            columns: 8,
            mine_density: 0.15,
            revealed_percentage: 0.3,
        }
    }
}

impl TestBoardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 {
            return Err(ConfigError::Zero("rows"));
        }
        if self.columns == 0 {
            return Err(ConfigError::Zero("columns"));
        }
        for (name, value) in [
            ("mine_density", self.mine_density),
            ("revealed_percentage", self.revealed_percentage),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange {
                    name,
                    value,
                    min: 0.0,
                    max: 1.0,
                });
            }
        }
        Ok(())
    }

    fn mine_count(&self) -> usize {
        let total = self.rows * self.columns;
        ((total as f64 * self.mine_density) as usize).min(total - 1)
    }
}

/// Generates partially revealed grids with known layouts
pub struct TestBoardGenerator {
    config: TestBoardConfig,
    rng: StdRng,
}

impl TestBoardGenerator {
    pub fn new(config: TestBoardConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: StdRng::from_entropy(),
        })
    }

    pub fn with_seed(config: TestBoardConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Generates a grid with some safe cells revealed.
    ///
    /// Reveals cascade, so at least `revealed_percentage` of the cells end up
    /// open (or every safe cell, on dense boards).
    pub fn generate(&mut self) -> Result<Grid, SolveError> {
        let mut grid = Grid::new(self.config.rows, self.config.columns)?;
        grid.generate_map(self.config.mine_count(), None, &mut self.rng)?;

        let target = (grid.total_cells() as f64 * self.config.revealed_percentage) as usize;
        let mut safe: Vec<Position> = grid.unrevealed().filter(|&pos| !grid.is_mine(pos)).collect();
        safe.shuffle(&mut self.rng);

        for pos in safe {
            if grid.revealed_count() >= target {
                break;
            }
            grid.reveal(pos)?;
        }
        Ok(grid)
    }

    /// Generates multiple test cases
    pub fn generate_batch(&mut self, count: usize) -> Result<Vec<Grid>, SolveError> {
        (0..count).map(|_| self.generate()).collect()
    }
}

/// Checks a solver result against the grid it was computed from.
///
/// Every action must target an in-bounds, unrevealed cell. Deterministic results
/// must also be sound: reveals are safe and flags are mines.
pub fn validate_solver_result(name: &str, result: &SolverResult, grid: &Grid) -> bool {
    for action in &result.actions {
        let pos = action.position();
        if !grid.contains(pos) || grid.is_revealed(pos) {
            println!("Solver {} targeted unavailable position {}", name, pos);
            return false;
        }
        if result.certainty != Certainty::Deterministic {
            continue;
        }
        match action {
            SolverAction::Reveal(pos) if grid.is_mine(*pos) => {
                println!("Solver {} incorrectly identified mine {} as safe", name, pos);
                return false;
            }
            SolverAction::Flag(pos) if !grid.is_mine(*pos) => {
                println!(
                    "Solver {} incorrectly identified safe position {} as mine",
                    name, pos
                );
                return false;
            }
            _ => {}
        }
    }

    if let Certainty::Probabilistic(p) = result.certainty {
        if !(0.0..=1.0).contains(&p) {
            println!("Solver {} produced invalid probability: {}", name, p);
            return false;
        }
    }
    true
}

/// Runs one move of `solver` on `grid` and validates it.
pub fn validate_solver<S: Solver + ?Sized>(
    solver: &mut S,
    grid: &Grid,
    rng: &mut StdRng,
) -> Result<bool, SolveError> {
    let result = solver.next_move(grid, rng, &CancelToken::new())?;
    Ok(validate_solver_result(solver.name(), &result, grid))
}
