//! What the selection model needs from a grid.
//!
//! The grid control itself lives elsewhere. Cell identity and selection only
//! need to map between items and row indices and between columns and
//! display indices; [`GridOwner`] is that contract. [`GridModel`] is a plain
//! in-memory implementation.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Stable identity of a grid column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnId(pub u64);

/// A row item together with its row index, when known.
///
/// Equality is structural: an info that knows its index never equals one
/// that does not. [`ItemInfo::matches`] is the looser comparison that only
/// checks indices both sides know.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemInfo<T> {
    item: T,
    index: Option<usize>,
}

impl<T> ItemInfo<T> {
    pub fn new(item: T) -> Self {
        Self { item, index: None }
    }

    pub fn with_index(item: T, index: Option<usize>) -> Self {
        Self { item, index }
    }

    pub fn item(&self) -> &T {
        &self.item
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn into_item(self) -> T {
        self.item
    }

    /// Same item, and the same index if both sides know it.
    ///
    /// Not transitive, so it is not `PartialEq`.
    pub fn matches(&self, other: &Self) -> bool
    where
        T: PartialEq,
    {
        self.item == other.item
            && match (self.index, other.index) {
                (Some(a), Some(b)) => a == b,
                _ => true,
            }
    }
}

/// The grid contract consumed by cells and selection.
pub trait GridOwner {
    type Item: Clone + PartialEq;

    fn column_count(&self) -> usize;

    /// Display index of `column`, `None` if it is not in the grid.
    fn column_display_index(&self, column: ColumnId) -> Option<usize>;

    fn column_at_display_index(&self, index: usize) -> Option<ColumnId>;

    fn row_count(&self) -> usize;

    /// Row index of `item`, `None` if it is not in the grid.
    fn row_index_of(&self, item: &Self::Item) -> Option<usize>;

    fn item_at(&self, row: usize) -> Option<&Self::Item>;

    fn new_item_info(&self, item: Self::Item) -> ItemInfo<Self::Item> {
        let index = self.row_index_of(&item);
        ItemInfo::with_index(item, index)
    }
}

/// A realized cell that knows its own item, column, and owner.
pub trait CellContainer<T> {
    fn item(&self) -> &T;

    fn column(&self) -> ColumnId;

    fn owner(&self) -> Option<crate::owner::OwnerHandle>;

    fn row_index(&self) -> Option<usize> {
        None
    }
}

/// In-memory grid: items in row order, columns in display order.
#[derive(Debug, Clone)]
pub struct GridModel<T> {
    items: Vec<T>,
    columns: Vec<ColumnId>,
    display_index: FxHashMap<ColumnId, usize>,
}

impl<T> Default for GridModel<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            columns: Vec::new(),
            display_index: FxHashMap::default(),
        }
    }
}

impl<T: Clone + PartialEq> GridModel<T> {
    pub fn new(columns: impl IntoIterator<Item = ColumnId>, items: impl IntoIterator<Item = T>) -> Self {
        let mut model = Self {
            items: items.into_iter().collect(),
            columns: columns.into_iter().collect(),
            display_index: FxHashMap::default(),
        };
        model.reindex_columns();
        model
    }

    fn reindex_columns(&mut self) {
        self.display_index.clear();
        for (index, column) in self.columns.iter().enumerate() {
            self.display_index.insert(*column, index);
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn columns(&self) -> &[ColumnId] {
        &self.columns
    }

    /// Insert `item` at row `index`; `index == row_count()` appends.
    pub fn insert_item(&mut self, index: usize, item: T) -> Result<(), GridError> {
        check_index(index, self.items.len() + 1, self.items.len())?;
        self.items.insert(index, item);
        Ok(())
    }

    pub fn remove_item(&mut self, index: usize) -> Result<T, GridError> {
        check_index(index, self.items.len(), self.items.len())?;
        Ok(self.items.remove(index))
    }

    /// Insert `column` at display `index`; `index == column_count()` appends.
    pub fn insert_column(&mut self, index: usize, column: ColumnId) -> Result<(), GridError> {
        check_index(index, self.columns.len() + 1, self.columns.len())?;
        self.columns.insert(index, column);
        self.reindex_columns();
        Ok(())
    }

    pub fn remove_column(&mut self, index: usize) -> Result<ColumnId, GridError> {
        check_index(index, self.columns.len(), self.columns.len())?;
        let column = self.columns.remove(index);
        self.reindex_columns();
        Ok(column)
    }
}

fn check_index(index: usize, bound: usize, len: usize) -> Result<(), GridError> {
    if index >= bound {
        return Err(GridError::IndexOutOfRange { index, len });
    }
    Ok(())
}

impl<T: Clone + PartialEq> GridOwner for GridModel<T> {
    type Item = T;

    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn column_display_index(&self, column: ColumnId) -> Option<usize> {
        self.display_index.get(&column).copied()
    }

    fn column_at_display_index(&self, index: usize) -> Option<ColumnId> {
        self.columns.get(index).copied()
    }

    fn row_count(&self) -> usize {
        self.items.len()
    }

    fn row_index_of(&self, item: &T) -> Option<usize> {
        self.items.iter().position(|candidate| candidate == item)
    }

    fn item_at(&self, row: usize) -> Option<&T> {
        self.items.get(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_info_equality_is_strict_and_matches_is_tolerant() {
        let two = ItemInfo::with_index("a", Some(2));
        let unknown = ItemInfo::new("a");
        let three = ItemInfo::with_index("a", Some(3));

        assert_ne!(two, unknown);
        assert_ne!(two, three);
        assert_eq!(two, ItemInfo::with_index("a", Some(2)));

        assert!(two.matches(&unknown));
        assert!(unknown.matches(&three));
        assert!(!two.matches(&three));
        assert!(!unknown.matches(&ItemInfo::new("b")));
    }

    #[test]
    fn model_tracks_display_indices() {
        let mut grid = GridModel::new([ColumnId(10), ColumnId(20)], ["x", "y"]);
        assert_eq!(grid.column_display_index(ColumnId(20)), Some(1));
        grid.insert_column(0, ColumnId(5)).unwrap();
        assert_eq!(grid.column_display_index(ColumnId(20)), Some(2));
        assert_eq!(grid.column_at_display_index(0), Some(ColumnId(5)));
        assert_eq!(grid.remove_column(0), Ok(ColumnId(5)));
        assert_eq!(grid.column_display_index(ColumnId(5)), None);
    }

    #[test]
    fn out_of_range_edits_are_rejected() {
        let mut grid = GridModel::new([ColumnId(1)], ["x"]);
        assert_eq!(
            grid.insert_item(2, "y"),
            Err(GridError::IndexOutOfRange { index: 2, len: 1 })
        );
        assert_eq!(
            grid.remove_item(1),
            Err(GridError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(
            grid.insert_column(3, ColumnId(2)),
            Err(GridError::IndexOutOfRange { index: 3, len: 1 })
        );
        assert_eq!(
            grid.remove_column(1),
            Err(GridError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(grid.items(), &["x"]);
        assert_eq!(grid.columns(), &[ColumnId(1)]);

        grid.insert_item(1, "y").unwrap();
        assert_eq!(grid.remove_item(0), Ok("x"));
        assert_eq!(grid.items(), &["y"]);
    }

    #[test]
    fn new_item_info_records_row() {
        let grid = GridModel::new([ColumnId(1)], ["x", "y"]);
        assert_eq!(grid.new_item_info("y").index(), Some(1));
        assert_eq!(grid.new_item_info("z").index(), None);
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.item_at(0), Some(&"x"));
    }
}
