use super::board::{SolverBoard, SolverCell};
use super::traits::{Certainty, Solver, SolverAction, SolverResult};
use crate::{CancelToken, Grid, Position, SolveError};
#[cfg(test)]
use minesweeper_solver_derive::SolverTest;
use rand::RngCore;
use std::collections::HashSet;

/// Single-step constraint propagation over every revealed number:
/// - If a numbered cell already touches as many flags as its number, all other covered neighbors are safe
/// - If its unaccounted mines equal its covered neighbors, they must all be mines
///
/// When neither rule fires anywhere it guesses the frontier cell under the least
/// mine pressure, or a random covered cell when there is no frontier. The
/// guess fallback can be disabled (as inside a solver chain).
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(SolverTest), solver_test(deterministic))]
pub struct ConstraintSolver {
    pub guess_fallback: bool,
}

impl Default for ConstraintSolver {
    fn default() -> Self {
        Self {
            guess_fallback: true,
        }
    }
}

impl ConstraintSolver {
    pub fn without_guess() -> Self {
        Self {
            guess_fallback: false,
        }
    }

    /// Mines around a revealed number not yet matched by a flag.
    fn unaccounted(&self, board: &SolverBoard, pos: Position) -> Option<usize> {
        match board.get(pos) {
            Some(SolverCell::Revealed(Some(n))) => {
                Some((n as usize).saturating_sub(board.neighbor_counts(pos).flagged))
            }
            _ => None,
        }
    }

    fn analyze_cell(&self, board: &SolverBoard, pos: Position) -> Vec<SolverAction> {
        // Only revealed, nonzero numbers constrain anything
        let cost = match board.get(pos) {
            Some(SolverCell::Revealed(Some(n))) if n > 0 => n as usize,
            _ => return Vec::new(),
        };

        let covered = board.covered_neighbors(pos);
        if covered.is_empty() {
            return Vec::new();
        }

        let flagged_count = board.neighbor_counts(pos).flagged;
        if flagged_count == cost {
            return covered.into_iter().map(SolverAction::Reveal).collect();
        }

        let unaccounted = cost.saturating_sub(flagged_count);
        if unaccounted == covered.len() {
            return covered.into_iter().map(SolverAction::Flag).collect();
        }

        Vec::new()
    }

    /// Covered frontier cell with the lowest mine pressure.
    ///
    /// A cell's pressure is the sum of unaccounted mines over its revealed
    /// neighbors, divided by its own covered neighbor count. Cells with no
    /// pressure are skipped; ties go to the first cell in board order.
    pub fn weighted_guess(&self, board: &SolverBoard) -> Option<Position> {
        board
            .covered()
            .filter_map(|pos| {
                let hidden = board.neighbor_counts(pos).unrevealed_unflagged;
                if hidden == 0 {
                    return None;
                }
                let pressure: usize = board
                    .neighbors(pos)
                    .filter_map(|n| self.unaccounted(board, n))
                    .sum();
                (pressure > 0).then(|| (pos, pressure as f64 / hidden as f64))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(pos, _)| pos)
    }

    /// Runs both rules over every revealed cell, dropping repeated actions.
    pub fn deduce(&self, board: &SolverBoard) -> Vec<SolverAction> {
        let mut seen = HashSet::new();
        let mut actions = Vec::new();
        for pos in board.revealed() {
            for action in self.analyze_cell(board, pos) {
                if seen.insert(action.position()) {
                    actions.push(action);
                }
            }
        }
        actions
    }
}

impl Solver for ConstraintSolver {
    fn name(&self) -> &str {
        "Constraint Solver"
    }

    fn next_move(
        &mut self,
        grid: &Grid,
        rng: &mut dyn RngCore,
        _cancel: &CancelToken,
    ) -> Result<SolverResult, SolveError> {
        let board = SolverBoard::new(grid);
        let actions = self.deduce(&board);
        if !actions.is_empty() {
            return Ok(SolverResult {
                actions,
                certainty: Certainty::Deterministic,
            });
        }

        if !self.guess_fallback || board.covered_count() == 0 {
            return Ok(SolverResult::empty());
        }

        let guess = match self.weighted_guess(&board) {
            Some(pos) => pos,
            None => grid.random_unrevealed_unflagged(rng)?,
        };
        log::debug!("no deduction available, guessing {}", guess);
        Ok(SolverResult {
            actions: vec![SolverAction::Reveal(guess)],
            certainty: Certainty::Guess,
        })
    }

    fn is_deterministic(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn solve(grid: &Grid) -> SolverResult {
        let mut rng = StdRng::seed_from_u64(3);
        ConstraintSolver::default()
            .next_move(grid, &mut rng, &CancelToken::new())
            .unwrap()
    }

    #[test]
    fn flags_lone_hidden_neighbor_of_corner() {
        // Revealing the whole grid except (1, 1) leaves a corner 1 whose only
        // hidden neighbor is the mine.
        let mut grid = Grid::with_mines(3, 3, &[Position::new(1, 1)]).unwrap();
        for y in 0..3 {
            for x in 0..3 {
                if (x, y) != (1, 1) {
                    grid.reveal(Position::new(x, y)).unwrap();
                }
            }
        }

        let result = solve(&grid);

        assert_eq!(result.certainty, Certainty::Deterministic);
        assert_eq!(result.actions, vec![SolverAction::Flag(Position::new(1, 1))]);
    }

    #[test]
    fn single_revealed_corner_with_one_hidden_neighbor_is_flagged() {
        let mut grid = Grid::with_mines(3, 3, &[Position::new(1, 0)]).unwrap();
        grid.reveal(Position::new(0, 0)).unwrap();
        grid.reveal(Position::new(0, 1)).unwrap();
        grid.reveal(Position::new(1, 1)).unwrap();

        let result = solve(&grid);

        assert!(result.actions.contains(&SolverAction::Flag(Position::new(1, 0))));
        assert!(result.flags().all(|pos| grid.is_mine(pos)));
    }

    #[test]
    fn satisfied_number_reveals_remaining_neighbors() {
        let mut grid = Grid::with_mines(3, 3, &[Position::new(0, 0)]).unwrap();
        grid.reveal(Position::new(1, 1)).unwrap();
        grid.flag(Position::new(0, 0)).unwrap();

        let result = solve(&grid);

        assert_eq!(result.certainty, Certainty::Deterministic);
        assert_eq!(result.reveals().count(), 7);
        assert!(result.reveals().all(|pos| !grid.is_mine(pos)));
        assert_eq!(result.flags().count(), 0);
    }

    #[test]
    fn guesses_when_nothing_is_deducible() {
        let grid = Grid::with_mines(3, 3, &[Position::new(0, 0)]).unwrap();

        let result = solve(&grid);

        assert_eq!(result.certainty, Certainty::Guess);
        assert_eq!(result.actions.len(), 1);
        assert!(result.primary_reveal().is_some());
    }

    #[test]
    fn guess_prefers_least_pressured_frontier_cell() {
        // The lone 1 at (1, 1) touches eight covered cells. (2, 1) shares that
        // pressure with the most covered neighbors.
        let mut grid =
            Grid::with_mines(3, 4, &[Position::new(0, 2), Position::new(3, 2)]).unwrap();
        grid.reveal(Position::new(1, 1)).unwrap();
        assert_eq!(grid.revealed_count(), 1);

        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = ConstraintSolver::default()
                .next_move(&grid, &mut rng, &CancelToken::new())
                .unwrap();

            assert_eq!(result.certainty, Certainty::Guess);
            assert_eq!(result.actions, vec![SolverAction::Reveal(Position::new(2, 1))]);
        }
    }

    #[test]
    fn guess_skips_cells_away_from_numbers() {
        // A flag walls the revealed zero off from every covered cell.
        let mut grid = Grid::with_mines(1, 5, &[Position::new(4, 0)]).unwrap();
        grid.flag(Position::new(1, 0)).unwrap();
        grid.reveal(Position::new(0, 0)).unwrap();
        let board = SolverBoard::new(&grid);

        assert!(ConstraintSolver::default().deduce(&board).is_empty());
        assert_eq!(ConstraintSolver::default().weighted_guess(&board), None);

        let result = solve(&grid);
        assert_eq!(result.certainty, Certainty::Guess);
        assert!(result.reveals().all(|pos| pos.x >= 2));
    }

    #[test]
    fn chain_member_returns_nothing_instead_of_guessing() {
        let grid = Grid::with_mines(3, 3, &[Position::new(0, 0)]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let result = ConstraintSolver::without_guess()
            .next_move(&grid, &mut rng, &CancelToken::new())
            .unwrap();

        assert!(result.is_empty());
    }

    #[test]
    fn deductions_are_not_repeated() {
        // Two numbers share the same hidden mine; it must be flagged once.
        let mut grid = Grid::with_mines(1, 3, &[Position::new(1, 0)]).unwrap();
        grid.reveal(Position::new(0, 0)).unwrap();
        grid.reveal(Position::new(2, 0)).unwrap();

        let result = solve(&grid);

        assert_eq!(result.actions, vec![SolverAction::Flag(Position::new(1, 0))]);
    }
}
