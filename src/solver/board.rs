use crate::{Grid, NeighborCounts, Position};

/// A view of the grid that hides information the solver shouldn't have access to
#[derive(Debug, Clone, Copy)]
pub struct SolverBoard<'a> {
    grid: &'a Grid,
}

impl<'a> SolverBoard<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    /// Gets cell state without revealing mine information
    pub fn get(&self, pos: Position) -> Option<SolverCell> {
        self.grid.cell(pos).ok().map(|cell| {
            if cell.is_revealed() {
                SolverCell::Revealed(cell.adjacent_mine_count())
            } else if cell.is_flagged() {
                SolverCell::Flagged
            } else {
                SolverCell::Covered
            }
        })
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        self.grid.shape()
    }

    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + 'a {
        self.grid.iter_neighbors(pos)
    }

    /// Neighbor tally by visible state
    pub fn neighbor_counts(&self, pos: Position) -> NeighborCounts {
        self.grid.neighbor_counts(pos)
    }

    pub fn covered_neighbors(&self, pos: Position) -> Vec<Position> {
        self.grid.unrevealed_unflagged_neighbors(pos)
    }

    pub fn revealed(&self) -> impl Iterator<Item = Position> + 'a {
        self.grid.revealed()
    }

    pub fn covered(&self) -> impl ExactSizeIterator<Item = Position> + 'a {
        self.grid.unrevealed_unflagged()
    }

    pub fn covered_count(&self) -> usize {
        self.grid.unrevealed_unflagged_count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolverCell {
    Covered,              // Unknown and unflagged cell
    Revealed(Option<u8>), // Number of neighboring mines, None for an exploded mine
    Flagged,              // Marked as a mine
}

/// Ground-truth access for scoring candidate probability maps.
///
/// Only fitness evaluation and convergence tests receive one; move selection
/// works from [`SolverBoard`] alone.
#[derive(Debug, Clone, Copy)]
pub struct MineOracle<'a> {
    grid: &'a Grid,
}

impl<'a> MineOracle<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    pub fn is_mine(&self, pos: Position) -> bool {
        self.grid.is_mine(pos)
    }

    pub fn mine_count(&self) -> usize {
        self.grid.mine_count()
    }

    pub fn total_cells(&self) -> usize {
        self.grid.total_cells()
    }

    pub fn position(&self, idx: usize) -> Position {
        self.grid.position(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_hides_mines() {
        let mut grid = Grid::with_mines(2, 2, &[Position::new(1, 1)]).unwrap();
        grid.reveal(Position::new(0, 0)).unwrap();
        grid.flag(Position::new(1, 1)).unwrap();
        let board = SolverBoard::new(&grid);

        assert_eq!(board.get(Position::new(0, 0)), Some(SolverCell::Revealed(Some(1))));
        assert_eq!(board.get(Position::new(1, 0)), Some(SolverCell::Covered));
        assert_eq!(board.get(Position::new(1, 1)), Some(SolverCell::Flagged));
        assert_eq!(board.get(Position::new(5, 5)), None);
        assert_eq!(board.covered_count(), 2);
        assert_eq!(
            board.covered_neighbors(Position::new(0, 0)),
            vec![Position::new(1, 0), Position::new(0, 1)]
        );
        assert_eq!(board.neighbor_counts(Position::new(0, 0)).flagged, 1);
    }
}
