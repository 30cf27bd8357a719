//! Compact set of cells used for highlighting candidate destinations.

use std::iter::FromIterator;

use crate::board::Cell;

/// A set of [`Cell`]s, one bit per square.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct CellSet(u64);

impl CellSet {
    /// The empty set.
    pub fn new() -> Self {
        Self(0)
    }

    /// Add a cell. Returns true if it was not already present.
    pub fn insert(&mut self, cell: Cell) -> bool {
        let was = self.contains(cell);
        self.0 |= Self::bit(cell);
        !was
    }

    /// Whether the set holds `cell`.
    pub fn contains(&self, cell: Cell) -> bool {
        self.0 & Self::bit(cell) != 0
    }

    /// Remove every cell.
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Whether the set holds no cells.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of cells in the set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate the cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Cell> {
        let bits = self.0;
        (0..64)
            .filter(move |&idx| bits & (1 << idx) != 0)
            .map(Cell::un_linearize)
    }

    #[inline]
    fn bit(cell: Cell) -> u64 {
        1 << cell.linearize()
    }
}

impl Extend<Cell> for CellSet {
    fn extend<T: IntoIterator<Item = Cell>>(&mut self, iter: T) {
        for cell in iter {
            self.insert(cell);
        }
    }
}

impl FromIterator<Cell> for CellSet {
    fn from_iter<T: IntoIterator<Item = Cell>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership() {
        let mut set = CellSet::new();
        assert!(set.insert(Cell::new(2, 3)));
        assert!(!set.insert(Cell::new(2, 3)));
        assert!(set.insert(Cell::new(7, 7)));
        assert!(set.contains(Cell::new(2, 3)));
        assert!(!set.contains(Cell::new(0, 0)));
        assert_eq!(set.len(), 2);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Cell::new(2, 3), Cell::new(7, 7)]
        );
        set.clear();
        assert!(set.is_empty());
        assert!(Cell::all().all(|cell| !set.contains(cell)));
    }
}
