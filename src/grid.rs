use crate::{Cell, CellEvent, GridError, MarkOutcome, NeighborCounts, Position, RevealOutcome};
use rand::Rng;
use std::collections::VecDeque;
use std::fmt;

/// Set of cell indices with O(1) insert, remove and random access.
#[derive(Debug, Clone)]
struct CellSet {
    items: Vec<usize>,
    slots: Vec<Option<usize>>,
}

impl CellSet {
    fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            slots: vec![None; capacity],
        }
    }

    fn fill(&mut self) {
        self.items = (0..self.slots.len()).collect();
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            *slot = Some(idx);
        }
    }

    fn clear(&mut self) {
        self.items.clear();
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    fn insert(&mut self, idx: usize) -> bool {
        if self.slots[idx].is_some() {
            return false;
        }
        self.slots[idx] = Some(self.items.len());
        self.items.push(idx);
        true
    }

    fn remove(&mut self, idx: usize) -> bool {
        let Some(slot) = self.slots[idx].take() else {
            return false;
        };
        self.items.swap_remove(slot);
        if let Some(&moved) = self.items.get(slot) {
            self.slots[moved] = Some(slot);
        }
        true
    }

    fn contains(&self, idx: usize) -> bool {
        self.slots[idx].is_some()
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn iter(&self) -> impl ExactSizeIterator<Item = usize> + '_ {
        self.items.iter().copied()
    }
}

type Observer = Box<dyn FnMut(CellEvent)>;

/// Rectangular minesweeper board with maintained index sets.
///
/// Cells live in a flat arena indexed `y * columns + x`. The neighbor table is
/// computed once at construction; resetting or regenerating the map never
/// touches it. Every mutation updates the `unrevealed`, `revealed` and
/// `unrevealed_unflagged` sets in the same call, so they always agree with
/// the cell array.
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
    adjacency: Vec<[Option<usize>; 8]>,
    unrevealed: CellSet,
    revealed: CellSet,
    unrevealed_unflagged: CellSet,
    target_mine_count: usize,
    observer: Option<Observer>,
}

impl Grid {
    pub fn new(rows: usize, columns: usize) -> Result<Self, GridError> {
        if rows == 0 || columns == 0 {
            return Err(GridError::EmptyGrid { rows, columns });
        }

        let total = rows * columns;
        let mut grid = Self {
            rows,
            columns,
            cells: vec![Cell::default(); total],
            adjacency: Vec::with_capacity(total),
            unrevealed: CellSet::new(total),
            revealed: CellSet::new(total),
            unrevealed_unflagged: CellSet::new(total),
            target_mine_count: 0,
            observer: None,
        };
        let adjacency: Vec<[Option<usize>; 8]> = (0..total)
            .map(|idx| {
                let mut slots = [None; 8];
                for (slot, neighbor) in slots.iter_mut().zip(grid.position(idx).neighbors()) {
                    *slot = grid.checked_index(neighbor);
                }
                slots
            })
            .collect();
        grid.adjacency = adjacency;
        grid.reset_grid();
        Ok(grid)
    }

    /// Builds a grid with mines at exactly the given positions.
    pub fn with_mines(rows: usize, columns: usize, mines: &[Position]) -> Result<Self, GridError> {
        let mut grid = Self::new(rows, columns)?;
        grid.set_mines(mines)?;
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// `(rows, columns)`, the shape used for probability maps.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.checked_index(pos).is_some()
    }

    pub fn cell(&self, pos: Position) -> Result<&Cell, GridError> {
        let idx = self.index(pos)?;
        Ok(&self.cells[idx])
    }

    pub fn is_revealed(&self, pos: Position) -> bool {
        self.cell(pos).map(Cell::is_revealed).unwrap_or(false)
    }

    pub fn is_flagged(&self, pos: Position) -> bool {
        self.cell(pos).map(Cell::is_flagged).unwrap_or(false)
    }

    pub fn is_mine(&self, pos: Position) -> bool {
        self.cell(pos).map(Cell::is_mine).unwrap_or(false)
    }

    /// Neighbor slots in row-major order, `None` past the edges.
    pub fn neighbors(&self, pos: Position) -> Result<[Option<Position>; 8], GridError> {
        let idx = self.index(pos)?;
        Ok(self.adjacency[idx].map(|slot| slot.map(|n| self.position(n))))
    }

    /// In-bounds neighbors of `pos`; empty when `pos` itself is out of bounds.
    pub fn iter_neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        self.checked_index(pos)
            .into_iter()
            .flat_map(move |idx| self.adjacency[idx].into_iter().flatten())
            .map(move |n| self.position(n))
    }

    pub fn neighbor_counts(&self, pos: Position) -> NeighborCounts {
        self.iter_neighbors(pos)
            .map(|n| &self.cells[self.flat(n)])
            .fold(NeighborCounts::default(), |mut counts, cell| {
                if cell.revealed {
                    counts.revealed += 1;
                } else {
                    counts.unrevealed += 1;
                    if cell.flagged {
                        counts.flagged += 1;
                    } else {
                        counts.unrevealed_unflagged += 1;
                    }
                }
                counts
            })
    }

    pub fn unrevealed_unflagged_neighbors(&self, pos: Position) -> Vec<Position> {
        self.iter_neighbors(pos)
            .filter(|&n| self.cells[self.flat(n)].is_unrevealed_unflagged())
            .collect()
    }

    pub fn unrevealed(&self) -> impl ExactSizeIterator<Item = Position> + '_ {
        self.unrevealed.iter().map(|idx| self.position(idx))
    }

    pub fn revealed(&self) -> impl ExactSizeIterator<Item = Position> + '_ {
        self.revealed.iter().map(|idx| self.position(idx))
    }

    pub fn unrevealed_unflagged(&self) -> impl ExactSizeIterator<Item = Position> + '_ {
        self.unrevealed_unflagged.iter().map(|idx| self.position(idx))
    }

    pub fn unrevealed_count(&self) -> usize {
        self.unrevealed.len()
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }

    pub fn unrevealed_unflagged_count(&self) -> usize {
        self.unrevealed_unflagged.len()
    }

    pub fn flagged_count(&self) -> usize {
        self.unrevealed.len() - self.unrevealed_unflagged.len()
    }

    pub fn mine_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.mine).count()
    }

    /// Mine count requested by the last `generate_map` call.
    pub fn target_mine_count(&self) -> usize {
        self.target_mine_count
    }

    pub fn set_target_mine_count(&mut self, mines: usize) {
        self.target_mine_count = mines;
    }

    pub fn mine_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.mine)
            .map(|(idx, _)| self.position(idx))
    }

    /// Every unrevealed cell is a mine and no revealed cell is.
    pub fn is_cleared(&self) -> bool {
        self.unrevealed.iter().all(|idx| self.cells[idx].mine)
            && self.revealed.iter().all(|idx| !self.cells[idx].mine)
    }

    pub fn all_mines_flagged(&self) -> bool {
        self.cells.iter().all(|cell| cell.flagged == cell.mine)
    }

    /// Registers the hook called on every reveal/flag transition.
    pub fn set_observer(&mut self, observer: impl FnMut(CellEvent) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Reveals `pos`, cascading through zero-cost regions.
    ///
    /// Revealed and flagged cells are left untouched. The cascade never opens
    /// flagged cells and stops at cells with a nonzero count.
    pub fn reveal(&mut self, pos: Position) -> Result<RevealOutcome, GridError> {
        let idx = self.index(pos)?;
        let cell = self.cells[idx];
        if cell.revealed || cell.flagged {
            return Ok(RevealOutcome::NoChange);
        }

        self.mark_revealed(idx);
        if cell.mine {
            return Ok(RevealOutcome::HitMine);
        }

        let mut opened = 1;
        if cell.adjacent_mines == 0 {
            let mut frontier = VecDeque::from([idx]);
            while let Some(current) = frontier.pop_front() {
                for neighbor in self.adjacency[current].into_iter().flatten() {
                    let next = self.cells[neighbor];
                    if next.revealed || next.flagged {
                        continue;
                    }
                    self.mark_revealed(neighbor);
                    opened += 1;
                    if next.adjacent_mines == 0 && !next.mine {
                        frontier.push_back(neighbor);
                    }
                }
            }
        }

        Ok(RevealOutcome::Revealed(opened))
    }

    /// Toggles the flag on an unrevealed cell.
    pub fn flag(&mut self, pos: Position) -> Result<MarkOutcome, GridError> {
        let idx = self.index(pos)?;
        let cell = &mut self.cells[idx];
        if cell.revealed {
            return Ok(MarkOutcome::NoChange);
        }

        cell.flagged = !cell.flagged;
        if cell.flagged {
            self.unrevealed_unflagged.remove(idx);
            self.notify(CellEvent::Flagged(pos));
            Ok(MarkOutcome::Flagged)
        } else {
            self.unrevealed_unflagged.insert(idx);
            self.notify(CellEvent::Unflagged(pos));
            Ok(MarkOutcome::Unflagged)
        }
    }

    /// Resets the grid and places exactly `mine_count` mines uniformly at random,
    /// never on `exclude`.
    pub fn generate_map<R: Rng + ?Sized>(
        &mut self,
        mine_count: usize,
        exclude: Option<Position>,
        rng: &mut R,
    ) -> Result<(), GridError> {
        let excluded = exclude.map(|pos| self.index(pos)).transpose()?;
        let available = self.total_cells() - usize::from(excluded.is_some());
        if mine_count > available {
            return Err(GridError::TooManyMines {
                mines: mine_count,
                available,
            });
        }

        self.target_mine_count = mine_count;
        self.reset_grid();
        self.cells.iter_mut().for_each(|cell| cell.mine = false);

        for pick in rand::seq::index::sample(rng, available, mine_count).iter() {
            let idx = match excluded {
                Some(skip) if pick >= skip => pick + 1,
                _ => pick,
            };
            self.cells[idx].mine = true;
        }
        self.compute_adjacent_counts();

        log::debug!(
            "generated {}x{} map with {} mines, excluding {:?}",
            self.rows,
            self.columns,
            mine_count,
            exclude
        );
        Ok(())
    }

    /// Replaces the mine layout with exactly `mines` and resets per-cell state.
    pub fn set_mines(&mut self, mines: &[Position]) -> Result<(), GridError> {
        let indices = mines
            .iter()
            .map(|&pos| self.index(pos))
            .collect::<Result<Vec<_>, _>>()?;

        self.reset_grid();
        self.cells.iter_mut().for_each(|cell| cell.mine = false);
        for idx in indices {
            self.cells[idx].mine = true;
        }
        self.compute_adjacent_counts();
        self.target_mine_count = self.mine_count();
        Ok(())
    }

    /// Removes every mine without touching the requested mine count.
    pub fn clear_mines(&mut self) {
        self.reset_grid();
        for cell in &mut self.cells {
            cell.mine = false;
            cell.adjacent_mines = 0;
        }
    }

    /// Clears revealed and flagged state and repopulates the index sets.
    /// Topology and the mine layout are kept.
    pub fn reset_grid(&mut self) {
        for cell in &mut self.cells {
            cell.revealed = false;
            cell.flagged = false;
        }
        self.revealed.clear();
        self.unrevealed.fill();
        self.unrevealed_unflagged.fill();
    }

    /// Opens every mine, removing flags from them first. No cascade.
    pub fn reveal_mines(&mut self) {
        let mines: Vec<usize> = self
            .unrevealed
            .iter()
            .filter(|&idx| self.cells[idx].mine)
            .collect();
        for idx in mines {
            self.cells[idx].flagged = false;
            self.mark_revealed(idx);
        }
    }

    pub fn reveal_all(&mut self) {
        let hidden: Vec<usize> = self.unrevealed.iter().collect();
        for idx in hidden {
            self.cells[idx].flagged = false;
            self.mark_revealed(idx);
        }
    }

    /// Picks a uniformly random unrevealed, unflagged cell.
    pub fn random_unrevealed_unflagged<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Position, GridError> {
        if self.unrevealed_unflagged.is_empty() {
            return Err(GridError::NoEligibleCells);
        }
        let pick = rng.gen_range(0..self.unrevealed_unflagged.len());
        Ok(self.position(self.unrevealed_unflagged.items[pick]))
    }

    pub fn position(&self, idx: usize) -> Position {
        Position::new((idx % self.columns) as i32, (idx / self.columns) as i32)
    }

    fn index(&self, pos: Position) -> Result<usize, GridError> {
        self.checked_index(pos).ok_or(GridError::OutOfBounds(pos))
    }

    fn checked_index(&self, pos: Position) -> Option<usize> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        (x < self.columns && y < self.rows).then(|| y * self.columns + x)
    }

    fn flat(&self, pos: Position) -> usize {
        pos.y as usize * self.columns + pos.x as usize
    }

    fn mark_revealed(&mut self, idx: usize) {
        debug_assert!(!self.revealed.contains(idx));
        self.cells[idx].revealed = true;
        self.unrevealed.remove(idx);
        self.unrevealed_unflagged.remove(idx);
        self.revealed.insert(idx);
        self.notify(CellEvent::Revealed(self.position(idx)));
    }

    fn compute_adjacent_counts(&mut self) {
        for idx in 0..self.cells.len() {
            let count = self.adjacency[idx]
                .into_iter()
                .flatten()
                .filter(|&n| self.cells[n].mine)
                .count();
            self.cells[idx].adjacent_mines = count as u8;
        }
    }

    fn notify(&mut self, event: CellEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer(event);
        }
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("rows", &self.rows)
            .field("columns", &self.columns)
            .field("mines", &self.mine_count())
            .field("revealed", &self.revealed.len())
            .field("flagged", &self.flagged_count())
            .finish()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.rows {
            for x in 0..self.columns {
                let cell = &self.cells[y * self.columns + x];
                let symbol = match (cell.revealed, cell.flagged, cell.mine) {
                    (true, _, true) => '*',
                    (true, _, false) if cell.adjacent_mines == 0 => ' ',
                    (true, _, false) => char::from(b'0' + cell.adjacent_mines),
                    (false, true, _) => '⚑',
                    (false, false, _) => '□',
                };
                if x > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn grid(rows: usize, columns: usize, mines: &[(i32, i32)]) -> Grid {
        let mines: Vec<Position> = mines.iter().map(|&(x, y)| Position::new(x, y)).collect();
        Grid::with_mines(rows, columns, &mines).unwrap()
    }

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(
            Grid::new(0, 3).unwrap_err(),
            GridError::EmptyGrid {
                rows: 0,
                columns: 3
            }
        );
    }

    #[test]
    fn corner_has_three_neighbors() {
        let grid = Grid::new(3, 3).unwrap();
        let slots = grid.neighbors(Position::new(0, 0)).unwrap();

        assert_eq!(slots.iter().flatten().count(), 3);
        assert_eq!(grid.iter_neighbors(Position::new(1, 1)).count(), 8);
        assert!(grid.neighbors(Position::new(3, 0)).is_err());
    }

    #[test]
    fn neighbor_counts_split_by_state() {
        let mut grid = grid(3, 3, &[(1, 1)]);
        grid.flag(Position::new(0, 1)).unwrap();
        grid.reveal(Position::new(0, 0)).unwrap();

        let corner = grid.neighbor_counts(Position::new(0, 0));
        assert_eq!(
            corner,
            NeighborCounts {
                revealed: 0,
                unrevealed: 3,
                flagged: 1,
                unrevealed_unflagged: 2,
            }
        );
        let edge = grid.neighbor_counts(Position::new(1, 0));
        assert_eq!((edge.revealed, edge.unrevealed, edge.flagged), (1, 4, 1));
        assert_eq!(edge.unrevealed_unflagged, 3);
        let center = grid.neighbor_counts(Position::new(1, 1));
        assert_eq!((center.revealed, center.unrevealed, center.flagged), (1, 7, 1));
        assert_eq!(center.unrevealed_unflagged, 6);
        assert_eq!(grid.neighbor_counts(Position::new(9, 9)), NeighborCounts::default());

        assert_eq!(
            grid.unrevealed_unflagged_neighbors(Position::new(0, 0)),
            vec![Position::new(1, 0), Position::new(1, 1)]
        );
    }

    #[test]
    fn all_mines_flagged_needs_exact_flags() {
        let mut grid = grid(2, 2, &[(1, 1)]);
        assert!(!grid.all_mines_flagged());

        grid.flag(Position::new(1, 1)).unwrap();
        assert!(grid.all_mines_flagged());

        grid.flag(Position::new(0, 0)).unwrap();
        assert!(!grid.all_mines_flagged());

        grid.flag(Position::new(0, 0)).unwrap();
        assert!(grid.all_mines_flagged());
    }

    #[test]
    fn adjacent_counts_follow_layout() {
        let grid = grid(3, 3, &[(0, 0), (2, 2)]);

        assert_eq!(grid.cell(Position::new(1, 1)).unwrap().adjacent_mine_count(), Some(2));
        assert_eq!(grid.cell(Position::new(2, 0)).unwrap().adjacent_mine_count(), Some(0));
        assert_eq!(grid.cell(Position::new(0, 0)).unwrap().adjacent_mine_count(), None);
    }

    #[test]
    fn reveal_mine_reports_hit() {
        let mut grid = grid(2, 2, &[(0, 0)]);

        assert_eq!(grid.reveal(Position::new(0, 0)).unwrap(), RevealOutcome::HitMine);
        assert!(grid.is_revealed(Position::new(0, 0)));
        assert_eq!(grid.revealed_count(), 1);
    }

    #[test]
    fn cascade_stops_at_numbers_and_flags() {
        // Mine in the far corner; flag guards (0, 2) from the cascade.
        let mut grid = grid(3, 4, &[(3, 2)]);
        grid.flag(Position::new(0, 2)).unwrap();

        let outcome = grid.reveal(Position::new(0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::Revealed(10));
        assert!(!grid.is_revealed(Position::new(0, 2)));
        assert!(!grid.is_revealed(Position::new(3, 2)));
        assert!(grid.is_revealed(Position::new(2, 1)));
        assert_eq!(grid.unrevealed_count(), 2);
        assert_eq!(grid.unrevealed_unflagged_count(), 1);
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut grid = grid(2, 2, &[(1, 1)]);

        grid.reveal(Position::new(0, 0)).unwrap();
        let before = grid.revealed_count();

        assert_eq!(grid.reveal(Position::new(0, 0)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(grid.revealed_count(), before);
    }

    #[test]
    fn flag_twice_restores_state() {
        let mut grid = grid(2, 2, &[(1, 1)]);
        let pos = Position::new(1, 1);

        assert_eq!(grid.flag(pos).unwrap(), MarkOutcome::Flagged);
        assert_eq!(grid.unrevealed_unflagged_count(), 3);
        assert_eq!(grid.flag(pos).unwrap(), MarkOutcome::Unflagged);
        assert!(!grid.is_flagged(pos));
        assert_eq!(grid.unrevealed_unflagged_count(), 4);
    }

    #[test]
    fn flagged_cell_cannot_be_revealed() {
        let mut grid = grid(2, 2, &[(1, 1)]);
        let pos = Position::new(1, 1);
        grid.flag(pos).unwrap();

        assert_eq!(grid.reveal(pos).unwrap(), RevealOutcome::NoChange);
        assert!(!grid.is_revealed(pos));
    }

    #[test]
    fn flag_on_revealed_is_no_change() {
        let mut grid = grid(2, 2, &[(1, 1)]);
        grid.reveal(Position::new(0, 0)).unwrap();

        assert_eq!(grid.flag(Position::new(0, 0)).unwrap(), MarkOutcome::NoChange);
    }

    #[test]
    fn generate_map_respects_exclusion() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = Grid::new(3, 3).unwrap();
        let exclude = Position::new(1, 1);

        for _ in 0..50 {
            grid.generate_map(8, Some(exclude), &mut rng).unwrap();
            assert_eq!(grid.mine_count(), 8);
            assert!(!grid.is_mine(exclude));
        }
    }

    #[test]
    fn generate_map_rejects_overfull_board() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = Grid::new(2, 2).unwrap();

        let err = grid
            .generate_map(4, Some(Position::new(0, 0)), &mut rng)
            .unwrap_err();
        assert_eq!(
            err,
            GridError::TooManyMines {
                mines: 4,
                available: 3
            }
        );
    }

    #[test]
    fn reset_keeps_mines_and_repopulates_indexes() {
        let mut grid = grid(3, 3, &[(2, 2)]);
        grid.reveal(Position::new(0, 0)).unwrap();
        grid.flag(Position::new(2, 2)).unwrap();

        grid.reset_grid();

        assert_eq!(grid.unrevealed_count(), 9);
        assert_eq!(grid.unrevealed_unflagged_count(), 9);
        assert_eq!(grid.revealed_count(), 0);
        assert!(grid.is_mine(Position::new(2, 2)));
    }

    #[test]
    fn random_cell_on_exhausted_board_is_an_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut grid = grid(1, 2, &[]);
        grid.reveal(Position::new(0, 0)).unwrap();

        assert_eq!(
            grid.random_unrevealed_unflagged(&mut rng),
            Err(GridError::NoEligibleCells)
        );
    }

    #[test]
    fn cleared_when_only_mines_remain() {
        let mut grid = grid(2, 2, &[(1, 1)]);
        assert!(!grid.is_cleared());

        for pos in [(0, 0), (1, 0), (0, 1)] {
            grid.reveal(Position::new(pos.0, pos.1)).unwrap();
        }
        assert!(grid.is_cleared());

        grid.reveal_mines();
        assert_eq!(grid.unrevealed_count(), 0);
    }

    #[test]
    fn observer_sees_transitions() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let mut grid = grid(1, 3, &[(2, 0)]);
        grid.set_observer(move |event| sink.borrow_mut().push(event));

        grid.flag(Position::new(2, 0)).unwrap();
        grid.reveal(Position::new(0, 0)).unwrap();

        assert_eq!(
            *events.borrow(),
            vec![
                CellEvent::Flagged(Position::new(2, 0)),
                CellEvent::Revealed(Position::new(0, 0)),
                CellEvent::Revealed(Position::new(1, 0)),
            ]
        );
    }

    #[test]
    fn display_renders_states() {
        let mut grid = grid(1, 3, &[(2, 0)]);
        grid.reveal(Position::new(0, 0)).unwrap();
        grid.flag(Position::new(2, 0)).unwrap();

        assert_eq!(grid.to_string(), "  1 ⚑\n");
    }
}
