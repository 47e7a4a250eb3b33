//! Cell identity.
//!
//! A [`CellInfo`] names one cell by row item and column, optionally bound to
//! the grid that owns it. The owner is an [`OwnerHandle`], so a long-lived
//! cell never keeps a torn-down grid alive; once the grid is released the
//! handle simply stops resolving.
//!
//! # Invariants
//!
//! 1. The unset cell has neither item nor column and is the only cell with
//!    `is_set() == false`.
//! 2. `is_valid()` requires an item and a column. `is_valid_for` adds the
//!    expensive checks that both still belong to the grid.
//! 3. [`CellInfo::same_cell`] compares owners by liveness: a released owner
//!    compares as absent.

use std::hash::{Hash, Hasher};

use crate::error::GridError;
use crate::grid::{CellContainer, ColumnId, GridOwner, ItemInfo};
use crate::owner::{OwnerHandle, OwnerRegistry};

/// Identity of one grid cell.
///
/// `PartialEq` is structural on the item, its recorded row index, and the
/// stored owner handle. Use [`CellInfo::same_cell`] to compare against the
/// current set of live grids.
#[derive(Debug, Clone)]
pub struct CellInfo<T> {
    item: Option<ItemInfo<T>>,
    column: Option<ColumnId>,
    owner: Option<OwnerHandle>,
}

impl<T> CellInfo<T> {
    /// The "no cell" sentinel.
    pub const fn unset() -> Self {
        Self {
            item: None,
            column: None,
            owner: None,
        }
    }

    /// A cell not bound to any grid.
    pub fn new(item: T, column: ColumnId) -> Self {
        Self {
            item: Some(ItemInfo::new(item)),
            column: Some(column),
            owner: None,
        }
    }

    /// Build from optional parts. An item is required; so is a column.
    pub fn try_new(item: Option<T>, column: Option<ColumnId>) -> Result<Self, GridError> {
        let item = item.ok_or(GridError::UnsetCell)?;
        let column = column.ok_or(GridError::MissingColumn)?;
        Ok(Self::new(item, column))
    }

    /// A cell bound to `owner`, with its row index looked up in `grid`.
    pub fn bound<G>(item: T, column: ColumnId, owner: OwnerHandle, grid: &G) -> Self
    where
        G: GridOwner<Item = T>,
    {
        Self {
            item: Some(grid.new_item_info(item)),
            column: Some(column),
            owner: Some(owner),
        }
    }

    /// The cell a realized container currently shows.
    pub fn from_container<C>(container: &C) -> Self
    where
        C: CellContainer<T>,
        T: Clone,
    {
        Self {
            item: Some(ItemInfo::with_index(
                container.item().clone(),
                container.row_index(),
            )),
            column: Some(container.column()),
            owner: container.owner(),
        }
    }

    pub fn item(&self) -> Option<&T> {
        self.item.as_ref().map(ItemInfo::item)
    }

    pub fn item_info(&self) -> Option<&ItemInfo<T>> {
        self.item.as_ref()
    }

    pub fn column(&self) -> Option<ColumnId> {
        self.column
    }

    pub fn owner(&self) -> Option<OwnerHandle> {
        self.owner
    }

    pub fn is_set(&self) -> bool {
        self.item.is_some()
    }

    pub fn is_valid(&self) -> bool {
        self.item.is_some() && self.column.is_some()
    }

    /// The owning grid, if the cell is bound and the grid is alive.
    pub fn resolve_owner<'r, G>(&self, registry: &'r OwnerRegistry<G>) -> Option<&'r G> {
        registry.get(self.owner?)
    }

    /// Equality that treats a released owner as no owner and ignores a row
    /// index only one side knows.
    pub fn same_cell<G>(&self, other: &Self, registry: &OwnerRegistry<G>) -> bool
    where
        T: PartialEq,
    {
        let live = |owner: Option<OwnerHandle>| owner.filter(|h| registry.is_alive(*h));
        let items_match = match (&self.item, &other.item) {
            (Some(a), Some(b)) => a.matches(b),
            (None, None) => true,
            _ => false,
        };
        items_match
            && self.column == other.column
            && live(self.owner) == live(other.owner)
    }

    /// Strict validity: the item and column both currently belong to `grid`.
    pub fn is_valid_for<G>(&self, grid: &G) -> bool
    where
        G: GridOwner<Item = T>,
    {
        match (&self.item, self.column) {
            (Some(info), Some(column)) => {
                grid.column_display_index(column).is_some()
                    && grid.row_index_of(info.item()).is_some()
            }
            _ => false,
        }
    }

    /// Strict validity against the cell's own owner, which must be alive.
    pub fn is_valid_in<G>(&self, registry: &OwnerRegistry<G>) -> bool
    where
        G: GridOwner<Item = T>,
    {
        self.resolve_owner(registry)
            .is_some_and(|grid| self.is_valid_for(grid))
    }

    /// `(column display index, row index)` of this cell in `grid`.
    pub fn coordinates<G>(&self, grid: &G) -> Result<(usize, usize), GridError>
    where
        T: PartialEq,
        G: GridOwner<Item = T>,
    {
        let info = self.item.as_ref().ok_or(GridError::UnsetCell)?;
        let column = self.column.ok_or(GridError::MissingColumn)?;
        let column_index = grid
            .column_display_index(column)
            .ok_or(GridError::UnknownColumn(column))?;
        let row = match info.index() {
            Some(row) if grid.item_at(row) == Some(info.item()) => row,
            _ => grid.row_index_of(info.item()).ok_or(GridError::UnknownItem)?,
        };
        Ok((column_index, row))
    }
}

impl<T> Default for CellInfo<T> {
    fn default() -> Self {
        Self::unset()
    }
}

impl<T: PartialEq> PartialEq for CellInfo<T> {
    fn eq(&self, other: &Self) -> bool {
        self.item == other.item && self.column == other.column && self.owner == other.owner
    }
}

impl<T: Eq> Eq for CellInfo<T> {}

impl<T: Hash> Hash for CellInfo<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.item.hash(state);
        self.column.hash(state);
        self.owner.hash(state);
    }
}
