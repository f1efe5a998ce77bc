use std::fmt;

/// Cell coordinates: `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The eight surrounding positions in row-major order, unclipped.
    pub fn neighbors(&self) -> impl Iterator<Item = Position> + '_ {
        (-1..=1).flat_map(move |dy| {
            (-1..=1).filter_map(move |dx| {
                if dx == 0 && dy == 0 {
                    None
                } else {
                    Some(Position::new(self.x + dx, self.y + dy))
                }
            })
        })
    }

    /// Index into an `Array2` shaped `(rows, columns)`.
    pub fn nd_index(self) -> [usize; 2] {
        [self.y as usize, self.x as usize]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_creation() {
        let pos = Position::new(5, 10);
        assert_eq!(pos.x, 5);
        assert_eq!(pos.y, 10);
    }

    #[test]
    fn test_neighbors() {
        let pos = Position::new(1, 1);
        let neighbors: Vec<Position> = pos.neighbors().collect();

        assert_eq!(neighbors.len(), 8);
        assert!(neighbors.contains(&Position::new(0, 0))); // Top-left
        assert!(neighbors.contains(&Position::new(2, 0))); // Top-right
        assert!(neighbors.contains(&Position::new(0, 2))); // Bottom-left
        assert!(neighbors.contains(&Position::new(2, 2))); // Bottom-right
        assert!(!neighbors.contains(&pos));
    }

    #[test]
    fn test_nd_index_is_row_major() {
        assert_eq!(Position::new(3, 1).nd_index(), [1, 3]);
    }
}
