//! Rectangular cell regions in `(column display index, row index)` space.

use serde::{Deserialize, Serialize};

/// A half-open block of cells: columns `left..left + width`, rows
/// `top..top + height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellRegion {
    pub left: usize,
    pub top: usize,
    pub width: usize,
    pub height: usize,
}

impl CellRegion {
    pub const fn new(left: usize, top: usize, width: usize, height: usize) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// The single cell at `(column, row)`.
    pub const fn cell(column: usize, row: usize) -> Self {
        Self::new(column, row, 1, 1)
    }

    /// One past the last column.
    #[inline]
    pub const fn right(&self) -> usize {
        self.left + self.width
    }

    /// One past the last row.
    #[inline]
    pub const fn bottom(&self) -> usize {
        self.top + self.height
    }

    #[inline]
    pub const fn area(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub const fn contains(&self, column: usize, row: usize) -> bool {
        column >= self.left && column < self.right() && row >= self.top && row < self.bottom()
    }

    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        (left < right && top < bottom).then(|| Self::new(left, top, right - left, bottom - top))
    }

    pub fn intersects(&self, other: &Self) -> bool {
        self.intersection(other).is_some()
    }

    /// Smallest region containing both.
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let left = self.left.min(other.left);
        let top = self.top.min(other.top);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(left, top, right - left, bottom - top)
    }

    /// `self` minus `other`, as at most four disjoint pieces.
    ///
    /// Full-width bands above and below the overlap come first, then the
    /// pieces left and right of it.
    pub fn subtract(&self, other: &Self) -> Vec<Self> {
        let Some(overlap) = self.intersection(other) else {
            return if self.is_empty() { Vec::new() } else { vec![*self] };
        };
        let mut pieces = Vec::with_capacity(4);
        if overlap.top > self.top {
            pieces.push(Self::new(self.left, self.top, self.width, overlap.top - self.top));
        }
        if overlap.bottom() < self.bottom() {
            pieces.push(Self::new(
                self.left,
                overlap.bottom(),
                self.width,
                self.bottom() - overlap.bottom(),
            ));
        }
        if overlap.left > self.left {
            pieces.push(Self::new(
                self.left,
                overlap.top,
                overlap.left - self.left,
                overlap.height,
            ));
        }
        if overlap.right() < self.right() {
            pieces.push(Self::new(
                overlap.right(),
                overlap.top,
                self.right() - overlap.right(),
                overlap.height,
            ));
        }
        pieces
    }

    /// Merge two regions when their union is exactly a rectangle.
    pub fn try_merge(&self, other: &Self) -> Option<Self> {
        let stacked = self.left == other.left
            && self.width == other.width
            && (self.bottom() == other.top || other.bottom() == self.top);
        let side_by_side = self.top == other.top
            && self.height == other.height
            && (self.right() == other.left || other.right() == self.left);
        (stacked || side_by_side).then(|| self.union(other))
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.top..self.bottom()).flat_map(move |row| (self.left..self.right()).map(move |col| (col, row)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtract_center_leaves_four_pieces() {
        let outer = CellRegion::new(0, 0, 3, 3);
        let pieces = outer.subtract(&CellRegion::cell(1, 1));
        assert_eq!(pieces.len(), 4);
        assert_eq!(pieces.iter().map(CellRegion::area).sum::<usize>(), 8);
        for piece in &pieces {
            assert!(!piece.contains(1, 1));
        }
    }

    #[test]
    fn subtract_disjoint_is_identity() {
        let a = CellRegion::new(0, 0, 2, 2);
        assert_eq!(a.subtract(&CellRegion::new(5, 5, 1, 1)), vec![a]);
        assert!(a.subtract(&CellRegion::new(0, 0, 4, 4)).is_empty());
    }

    #[test]
    fn merge_requires_exact_rectangle() {
        let a = CellRegion::new(0, 0, 2, 1);
        assert_eq!(
            a.try_merge(&CellRegion::new(0, 1, 2, 3)),
            Some(CellRegion::new(0, 0, 2, 4))
        );
        assert_eq!(a.try_merge(&CellRegion::new(1, 1, 2, 1)), None);
        assert_eq!(
            a.try_merge(&CellRegion::new(2, 0, 1, 1)),
            Some(CellRegion::new(0, 0, 3, 1))
        );
    }

    #[test]
    fn cells_are_row_major() {
        let cells: Vec<_> = CellRegion::new(1, 2, 2, 2).cells().collect();
        assert_eq!(cells, vec![(1, 2), (2, 2), (1, 3), (2, 3)]);
    }
}
