use super::board::{MineOracle, SolverBoard};
use super::population::{FitnessStats, Population};
use super::traits::{Certainty, Solver, SolverAction, SolverResult};
use crate::{CancelToken, ConfigError, Grid, SolveError};
use itertools::{Itertools, MinMaxResult};
#[cfg(test)]
use minesweeper_solver_derive::SolverTest;
use ndarray::Array2;
use rand::RngCore;

/// Tuning knobs for the evolutionary solver.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub max_generations: usize,
    /// Cells scored per evaluation; never more than the board's mine count.
    /// `None` means "as many as there are mines". A fresh sample is drawn for
    /// every evaluation.
    pub sample_size: Option<usize>,
    /// Initial probabilities are drawn from `[0, initial_probability_max)`.
    pub initial_probability_max: f64,
    /// Breeding pairs per generation, as a fraction of the population.
    pub parent_fraction: f64,
    /// Tournament size as a fraction of the population (at least two entrants).
    pub tournament_fraction: f64,
    pub wisdom_of_crowds: bool,
    pub crowd_size: usize,
    pub mutation_strength: f64,
    pub convergence_threshold: f64,
    /// A cell is flagged only above this probability.
    pub flag_threshold: f64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            max_generations: 10_000,
            sample_size: None,
            initial_probability_max: 0.1,
            parent_fraction: 0.3,
            tournament_fraction: 0.1,
            wisdom_of_crowds: true,
            crowd_size: 5,
            mutation_strength: 1.0,
            convergence_threshold: 0.05,
            flag_threshold: 0.5,
        }
    }
}

impl EvolutionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        if self.sample_size == Some(0) {
            return Err(ConfigError::Zero("sample_size"));
        }
        if self.wisdom_of_crowds && self.crowd_size == 0 {
            return Err(ConfigError::Zero("crowd_size"));
        }
        if self.initial_probability_max <= 0.0 {
            return Err(ConfigError::Zero("initial_probability_max"));
        }

        let ranges = [
            ("initial_probability_max", self.initial_probability_max, 1.0),
            ("parent_fraction", self.parent_fraction, 1.0),
            ("tournament_fraction", self.tournament_fraction, 1.0),
            ("mutation_strength", self.mutation_strength, 2.0),
            ("convergence_threshold", self.convergence_threshold, 1.0),
            ("flag_threshold", self.flag_threshold, 1.0),
        ];
        for (name, value, max) in ranges {
            if !(0.0..=max).contains(&value) {
                return Err(ConfigError::OutOfRange {
                    name,
                    value,
                    min: 0.0,
                    max,
                });
            }
        }
        Ok(())
    }
}

/// Why a generation loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Converged,
    Exhausted,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub generations: usize,
    pub fitness: FitnessStats,
    pub termination: Termination,
}

/// Estimates per-cell mine probabilities with a genetic search, then reveals
/// the least likely mine and flags the most likely one.
///
/// Every call to [`Solver::next_move`] starts a fresh population; nothing is
/// carried between moves or grids apart from the last run's summary.
#[derive(Debug, Clone, Default)]
#[cfg_attr(test, derive(SolverTest))]
pub struct EvolutionarySolver {
    config: EvolutionConfig,
    last_run: Option<RunSummary>,
}

impl EvolutionarySolver {
    pub fn new(config: EvolutionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            last_run: None,
        })
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn last_run(&self) -> Option<&RunSummary> {
        self.last_run.as_ref()
    }

    /// Runs generations until convergence, the generation cap, or cancellation.
    pub fn evolve(
        &self,
        grid: &Grid,
        rng: &mut dyn RngCore,
        cancel: &CancelToken,
    ) -> Result<(Population, Termination), ConfigError> {
        self.config.validate()?;
        let oracle = MineOracle::new(grid);
        let mut population = Population::new(&self.config, grid.shape(), &oracle, rng);

        let termination = loop {
            if population.is_converged(&self.config, &oracle) {
                break Termination::Converged;
            }
            if cancel.is_cancelled() {
                break Termination::Cancelled;
            }
            if population.generation() >= self.config.max_generations {
                break Termination::Exhausted;
            }

            population.evolve(&self.config, &oracle, rng);
            let stats = population.stats();
            log::trace!(
                "generation {}: fitness min {:.4} mean {:.4} max {:.4}",
                population.generation(),
                stats.min,
                stats.mean,
                stats.max
            );
        };

        log::debug!(
            "evolution stopped after {} generations ({:?}), best fitness {:.4}",
            population.generation(),
            termination,
            population.fitness_min()
        );
        Ok((population, termination))
    }
}

/// Picks the reveal and optional flag from a probability map.
///
/// Only the public board view and the map are consulted here.
pub fn select_move(
    board: &SolverBoard,
    probabilities: &Array2<f64>,
    flag_threshold: f64,
) -> SolverResult {
    let candidates = board
        .covered()
        .map(|pos| (pos, probabilities[pos.nd_index()]));

    let (safest, riskiest) = match candidates.minmax_by(|a, b| a.1.total_cmp(&b.1)) {
        MinMaxResult::NoElements => return SolverResult::empty(),
        MinMaxResult::OneElement(only) => (only, only),
        MinMaxResult::MinMax(min, max) => (min, max),
    };

    let mut actions = Vec::with_capacity(2);
    if riskiest.1 > flag_threshold && riskiest.0 != safest.0 {
        actions.push(SolverAction::Flag(riskiest.0));
    }
    actions.push(SolverAction::Reveal(safest.0));

    SolverResult {
        actions,
        certainty: Certainty::Probabilistic(1.0 - safest.1),
    }
}

impl Solver for EvolutionarySolver {
    fn name(&self) -> &str {
        "Evolutionary Solver"
    }

    fn next_move(
        &mut self,
        grid: &Grid,
        rng: &mut dyn RngCore,
        cancel: &CancelToken,
    ) -> Result<SolverResult, SolveError> {
        if grid.unrevealed_unflagged_count() == 0 {
            return Ok(SolverResult::empty());
        }

        let (population, termination) = self.evolve(grid, rng, cancel)?;
        self.last_run = Some(RunSummary {
            generations: population.generation(),
            fitness: population.stats(),
            termination,
        });

        if termination == Termination::Cancelled {
            return Ok(SolverResult::empty());
        }

        Ok(select_move(
            &SolverBoard::new(grid),
            &population.best().probabilities,
            self.config.flag_threshold,
        ))
    }
}
