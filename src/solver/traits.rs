use crate::{CancelToken, Grid, Position, SolveError};
use rand::RngCore;

/// A single action a solver asks the driver to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverAction {
    Reveal(Position),
    Flag(Position),
}

impl SolverAction {
    pub fn position(&self) -> Position {
        match *self {
            SolverAction::Reveal(pos) | SolverAction::Flag(pos) => pos,
        }
    }
}

/// How much the solver trusts the actions it returned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Certainty {
    /// Proven by local deduction
    Deterministic,
    /// Read off an estimated probability map; carries the estimated chance
    /// that the reveal target is safe
    Probabilistic(f64),
    /// Forced pick without a certain deduction behind it
    Guess,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolverResult {
    pub actions: Vec<SolverAction>,
    pub certainty: Certainty,
}

impl SolverResult {
    pub fn empty() -> Self {
        Self {
            actions: Vec::new(),
            certainty: Certainty::Deterministic,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// The first reveal in the result, the move the driver treats as "the" move.
    pub fn primary_reveal(&self) -> Option<Position> {
        self.actions.iter().find_map(|action| match action {
            SolverAction::Reveal(pos) => Some(*pos),
            SolverAction::Flag(_) => None,
        })
    }

    pub fn reveals(&self) -> impl Iterator<Item = Position> + '_ {
        self.actions.iter().filter_map(|action| match action {
            SolverAction::Reveal(pos) => Some(*pos),
            SolverAction::Flag(_) => None,
        })
    }

    pub fn flags(&self) -> impl Iterator<Item = Position> + '_ {
        self.actions.iter().filter_map(|action| match action {
            SolverAction::Flag(pos) => Some(*pos),
            SolverAction::Reveal(_) => None,
        })
    }
}

/// Capability shared by every solver: look at the grid, propose the next move.
///
/// Solvers never mutate the grid; the driver applies the returned actions.
/// Implementations must stay stateless across unrelated grids.
pub trait Solver {
    fn name(&self) -> &str;

    fn next_move(
        &mut self,
        grid: &Grid,
        rng: &mut dyn RngCore,
        cancel: &CancelToken,
    ) -> Result<SolverResult, SolveError>;

    fn is_deterministic(&self) -> bool {
        false
    }
}

impl<S: Solver + ?Sized> Solver for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn next_move(
        &mut self,
        grid: &Grid,
        rng: &mut dyn RngCore,
        cancel: &CancelToken,
    ) -> Result<SolverResult, SolveError> {
        (**self).next_move(grid, rng, cancel)
    }

    fn is_deterministic(&self) -> bool {
        (**self).is_deterministic()
    }
}
