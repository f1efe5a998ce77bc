use crate::Position;

/// State of a single grid position.
///
/// Mine identity is fixed by map generation; `revealed` only moves from false to
/// true until the grid is reset, and `flagged` is only ever set on unrevealed cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub(crate) mine: bool,
    pub(crate) revealed: bool,
    pub(crate) flagged: bool,
    pub(crate) adjacent_mines: u8,
}

impl Cell {
    pub fn is_mine(&self) -> bool {
        self.mine
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn is_flagged(&self) -> bool {
        self.flagged
    }

    pub fn is_unrevealed_unflagged(&self) -> bool {
        !self.revealed && !self.flagged
    }

    /// Number of mines among the neighbors, `None` when the cell is itself a mine.
    pub fn adjacent_mine_count(&self) -> Option<u8> {
        if self.mine {
            None
        } else {
            Some(self.adjacent_mines)
        }
    }
}

/// Tally of a cell's neighbors by visible state. Flagged cells count as unrevealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NeighborCounts {
    pub revealed: usize,
    pub unrevealed: usize,
    pub flagged: usize,
    pub unrevealed_unflagged: usize,
}

/// Transition reported to the grid observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellEvent {
    Revealed(Position),
    Flagged(Position),
    Unflagged(Position),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    /// Number of cells opened, including the cascade.
    Revealed(usize),
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, RevealOutcome::NoChange)
    }

    pub const fn hit_mine(self) -> bool {
        matches!(self, RevealOutcome::HitMine)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mine_has_no_adjacent_count() {
        let cell = Cell {
            mine: true,
            adjacent_mines: 3,
            ..Default::default()
        };
        assert_eq!(cell.adjacent_mine_count(), None);
    }

    #[test]
    fn reveal_outcome_updates() {
        assert!(!RevealOutcome::NoChange.has_update());
        assert!(RevealOutcome::Revealed(4).has_update());
        assert!(RevealOutcome::HitMine.hit_mine());
    }
}
