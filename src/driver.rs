use crate::solver::{Solver, SolverAction, SolverResult};
use crate::{CancelToken, Grid, Position, SolveError};
use rand::{rngs::StdRng, SeedableRng};
use std::time::{Duration, Instant};

/// How a single solve is set up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveOptions {
    /// On the first tick, clear the layout and place `target_mine_count` mines
    /// once the first reveal is known, so the first click is always safe. When
    /// false the grid is played from its current state.
    pub regenerate_map: bool,
    /// Seed for the run's RNG; `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Wall-clock limit, checked between steps.
    pub timeout: Option<Duration>,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            regenerate_map: true,
            seed: None,
            timeout: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveOutcome {
    Solved,
    Failed,
    /// The solver had nothing left to suggest on an unfinished grid.
    Stalled,
    Cancelled,
}

impl SolveOutcome {
    pub fn is_success(self) -> bool {
        self == SolveOutcome::Solved
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Running,
    Finished(SolveOutcome),
}

/// A solve in progress, advanced one solver move per [`SolveSession::tick`].
///
/// The session holds the only mutable borrow of the grid until it is dropped.
pub struct SolveSession<'a> {
    grid: &'a mut Grid,
    solver: &'a mut dyn Solver,
    rng: StdRng,
    cancel: CancelToken,
    timeout: Option<Duration>,
    started: Instant,
    awaiting_first_move: bool,
    steps: usize,
    outcome: Option<SolveOutcome>,
}

impl<'a> SolveSession<'a> {
    pub fn new(
        grid: &'a mut Grid,
        solver: &'a mut dyn Solver,
        options: &SolveOptions,
        cancel: CancelToken,
    ) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            grid,
            solver,
            rng,
            cancel,
            timeout: options.timeout,
            started: Instant::now(),
            awaiting_first_move: options.regenerate_map,
            steps: 0,
            outcome: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &*self.grid
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn outcome(&self) -> Option<SolveOutcome> {
        self.outcome
    }

    /// Asks the solver for one move and applies it.
    pub fn tick(&mut self) -> Result<StepStatus, SolveError> {
        if let Some(outcome) = self.outcome {
            return Ok(StepStatus::Finished(outcome));
        }
        if self.cancel.is_cancelled() {
            return Ok(self.finish(SolveOutcome::Cancelled));
        }
        if let Some(timeout) = self.timeout {
            if self.started.elapsed() >= timeout {
                return Err(SolveError::Timeout(timeout));
            }
        }
        if !self.awaiting_first_move && self.grid.is_cleared() {
            return Ok(self.finish(SolveOutcome::Solved));
        }

        let result = if self.awaiting_first_move {
            self.first_move()?
        } else {
            self.solver
                .next_move(self.grid, &mut self.rng, &self.cancel)?
        };
        self.steps += 1;

        if result.is_empty() {
            if self.cancel.is_cancelled() {
                return Ok(self.finish(SolveOutcome::Cancelled));
            }
            log::warn!(
                "{} stalled after {} steps with {} cells covered",
                self.solver.name(),
                self.steps,
                self.grid.unrevealed_unflagged_count()
            );
            return Ok(self.finish(SolveOutcome::Stalled));
        }

        if self.apply(&result)? {
            return Ok(self.finish(SolveOutcome::Failed));
        }
        if self.grid.is_cleared() {
            return Ok(self.finish(SolveOutcome::Solved));
        }
        Ok(StepStatus::Running)
    }

    /// Ticks until the solve finishes.
    pub fn run(&mut self) -> Result<SolveOutcome, SolveError> {
        loop {
            if let StepStatus::Finished(outcome) = self.tick()? {
                return Ok(outcome);
            }
        }
    }

    /// Asks for the opening move on a mine-free board, then places the mines
    /// around its reveal. Without a move the previous layout is put back.
    fn first_move(&mut self) -> Result<SolverResult, SolveError> {
        let layout: Vec<Position> = self.grid.mine_positions().collect();
        let target = self.grid.target_mine_count();
        self.grid.clear_mines();

        let result = self
            .solver
            .next_move(self.grid, &mut self.rng, &self.cancel);
        match &result {
            Ok(first) if !first.is_empty() => {
                self.grid
                    .generate_map(target, first.primary_reveal(), &mut self.rng)?;
                self.awaiting_first_move = false;
            }
            _ => {
                self.grid.set_mines(&layout)?;
                self.grid.set_target_mine_count(target);
            }
        }
        result
    }

    /// Returns true when a reveal hit a mine.
    fn apply(&mut self, result: &SolverResult) -> Result<bool, SolveError> {
        for action in &result.actions {
            match *action {
                SolverAction::Flag(pos) => {
                    if !self.grid.is_flagged(pos) && !self.grid.is_revealed(pos) {
                        self.grid.flag(pos)?;
                    }
                }
                SolverAction::Reveal(pos) => {
                    if self.grid.reveal(pos)?.hit_mine() {
                        log::debug!("{} hit a mine at {}", self.solver.name(), pos);
                        return Ok(true);
                    }
                }
            }
        }
        Ok(false)
    }

    fn finish(&mut self, outcome: SolveOutcome) -> StepStatus {
        self.grid.reveal_mines();
        self.outcome = Some(outcome);
        log::debug!(
            "{} finished: {:?} after {} steps",
            self.solver.name(),
            outcome,
            self.steps
        );
        StepStatus::Finished(outcome)
    }
}

/// Runs `solver` on `grid` to completion.
pub fn run_solver(
    grid: &mut Grid,
    solver: &mut dyn Solver,
    options: &SolveOptions,
    cancel: &CancelToken,
) -> Result<SolveOutcome, SolveError> {
    SolveSession::new(grid, solver, options, cancel.clone()).run()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchStats {
    pub wins: usize,
    pub losses: usize,
    pub cancelled: usize,
}

impl BatchStats {
    pub fn played(&self) -> usize {
        self.wins + self.losses
    }

    pub fn success_rate(&self) -> f64 {
        if self.played() == 0 {
            return 0.0;
        }
        self.wins as f64 / self.played() as f64
    }
}

/// Plays `runs` games of `mine_count` mines on `grid`. Run `i` uses seed
/// `seed + i` when a seed is given. Stops early once cancelled.
pub fn run_batch(
    grid: &mut Grid,
    solver: &mut dyn Solver,
    runs: usize,
    mine_count: usize,
    options: &SolveOptions,
    cancel: &CancelToken,
) -> Result<BatchStats, SolveError> {
    grid.set_target_mine_count(mine_count);
    let mut stats = BatchStats::default();

    for run in 0..runs {
        let run_options = SolveOptions {
            seed: options.seed.map(|seed| seed.wrapping_add(run as u64)),
            ..options.clone()
        };
        if !run_options.regenerate_map {
            grid.reset_grid();
        }

        match run_solver(grid, solver, &run_options, cancel)? {
            SolveOutcome::Solved => stats.wins += 1,
            SolveOutcome::Failed | SolveOutcome::Stalled => stats.losses += 1,
            SolveOutcome::Cancelled => {
                stats.cancelled += 1;
                break;
            }
        }
    }

    log::debug!(
        "{}: {} wins, {} losses over {} runs",
        solver.name(),
        stats.wins,
        stats.losses,
        stats.played()
    );
    Ok(stats)
}
