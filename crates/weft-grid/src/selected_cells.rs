//! Region-compressed cell selection.
//!
//! # Design
//!
//! Selected cells are stored as disjoint [`CellRegion`]s in
//! `(column display index, row index)` space, so selecting a whole block
//! costs one entry rather than one per cell. Adjacent regions are merged
//! when their union is a rectangle.
//!
//! Mutators return the net [`SelectedCellsChanged`] they caused. Between
//! [`SelectedCells::begin_update`] and [`SelectedCells::end_update`] they
//! return nothing; `end_update` reports the net difference against the
//! selection as it was when the outermost update began, so a cell added and
//! removed again inside the bracket is never reported.
//!
//! Row and column collection changes shift regions. Cells whose row or
//! column disappears are reported as removed straight away, in coordinates
//! from before the change, even inside an update bracket. Inside a bracket
//! the report covers the cells the observer was last told about (the
//! selection as the bracket opened), not the pending edits, so adds minus
//! removes over all reports always equals the current selection.
//!
//! # Invariants
//!
//! 1. Stored regions are non-empty and pairwise disjoint.
//! 2. `len()` equals the number of distinct selected cells.
//! 3. An empty selection has no bounding region.

use tracing::debug;
use weft_core::collection::CollectionChange;

use crate::cell_info::CellInfo;
use crate::error::GridError;
use crate::grid::GridOwner;
use crate::owner::OwnerHandle;
use crate::region::CellRegion;

/// Net selection delta.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedCellsChanged {
    pub added: Vec<CellRegion>,
    pub removed: Vec<CellRegion>,
}

impl SelectedCellsChanged {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    pub fn added_count(&self) -> usize {
        self.added.iter().map(CellRegion::area).sum()
    }

    pub fn removed_count(&self) -> usize {
        self.removed.iter().map(CellRegion::area).sum()
    }
}

/// Inclusive bounds of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    pub min_column: usize,
    pub max_column: usize,
    pub min_row: usize,
    pub max_row: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Column,
    Row,
}

impl Axis {
    fn span(self, region: &CellRegion) -> (usize, usize) {
        match self {
            Self::Column => (region.left, region.right()),
            Self::Row => (region.top, region.bottom()),
        }
    }

    fn with_span(self, region: &CellRegion, start: usize, end: usize) -> CellRegion {
        let mut out = *region;
        match self {
            Self::Column => {
                out.left = start;
                out.width = end - start;
            }
            Self::Row => {
                out.top = start;
                out.height = end - start;
            }
        }
        out
    }

    /// Every cell whose coordinate on this axis lies in `start..end`.
    fn band(self, start: usize, end: usize) -> CellRegion {
        match self {
            Self::Column => CellRegion::new(start, 0, end - start, usize::MAX),
            Self::Row => CellRegion::new(0, start, usize::MAX, end - start),
        }
    }
}

fn difference(from: &[CellRegion], minus: &[CellRegion]) -> Vec<CellRegion> {
    let mut out = Vec::new();
    for region in from {
        let mut pieces = vec![*region];
        for cut in minus {
            pieces = pieces.iter().flat_map(|piece| piece.subtract(cut)).collect();
            if pieces.is_empty() {
                break;
            }
        }
        out.extend(pieces);
    }
    out
}

fn compact(regions: &mut Vec<CellRegion>) {
    'restart: loop {
        for i in 0..regions.len() {
            for j in (i + 1)..regions.len() {
                if let Some(merged) = regions[i].try_merge(&regions[j]) {
                    regions[i] = merged;
                    regions.swap_remove(j);
                    continue 'restart;
                }
            }
        }
        return;
    }
}

fn insert_lines(regions: &mut Vec<CellRegion>, axis: Axis, index: usize, count: usize) {
    if count == 0 {
        return;
    }
    let mut out = Vec::with_capacity(regions.len());
    for region in regions.iter() {
        let (start, end) = axis.span(region);
        if start >= index {
            out.push(axis.with_span(region, start + count, end + count));
        } else if end > index {
            out.push(axis.with_span(region, start, index));
            out.push(axis.with_span(region, index + count, end + count));
        } else {
            out.push(*region);
        }
    }
    *regions = out;
}

/// Delete lines `index..index + count`, returning the cells that held.
fn remove_lines(
    regions: &mut Vec<CellRegion>,
    axis: Axis,
    index: usize,
    count: usize,
) -> Vec<CellRegion> {
    if count == 0 {
        return Vec::new();
    }
    let band = axis.band(index, index + count);
    let dropped: Vec<CellRegion> = regions
        .iter()
        .filter_map(|region| region.intersection(&band))
        .collect();
    let map = |p: usize| {
        if p <= index {
            p
        } else if p >= index + count {
            p - count
        } else {
            index
        }
    };
    let mut out = Vec::with_capacity(regions.len());
    for region in regions.iter() {
        let (start, end) = axis.span(region);
        let (start, end) = (map(start), map(end));
        if end > start {
            out.push(axis.with_span(region, start, end));
        }
    }
    *regions = out;
    compact(regions);
    dropped
}

fn move_lines(regions: &mut Vec<CellRegion>, axis: Axis, from: usize, to: usize, count: usize) {
    let carried = remove_lines(regions, axis, from, count);
    insert_lines(regions, axis, to, count);
    for piece in carried {
        let (start, end) = axis.span(&piece);
        regions.push(axis.with_span(&piece, start - from + to, end - from + to));
    }
    compact(regions);
}

/// The selected cells of one grid.
#[derive(Debug, Clone, Default)]
pub struct SelectedCells {
    regions: Vec<CellRegion>,
    owner: Option<OwnerHandle>,
    update_depth: usize,
    snapshot: Vec<CellRegion>,
}

impl SelectedCells {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A selection that only accepts cells bound to `owner` (or unbound).
    #[must_use]
    pub fn for_owner(owner: OwnerHandle) -> Self {
        Self {
            owner: Some(owner),
            ..Self::default()
        }
    }

    pub fn owner(&self) -> Option<OwnerHandle> {
        self.owner
    }

    pub fn regions(&self) -> &[CellRegion] {
        &self.regions
    }

    /// Number of selected cells.
    pub fn len(&self) -> usize {
        self.regions.iter().map(CellRegion::area).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn contains(&self, column: usize, row: usize) -> bool {
        self.regions.iter().any(|region| region.contains(column, row))
    }

    pub fn is_updating(&self) -> bool {
        self.update_depth > 0
    }

    fn report(&self, added: Vec<CellRegion>, removed: Vec<CellRegion>) -> Option<SelectedCellsChanged> {
        if self.is_updating() || (added.is_empty() && removed.is_empty()) {
            return None;
        }
        Some(SelectedCellsChanged { added, removed })
    }

    pub fn add(&mut self, column: usize, row: usize) -> Option<SelectedCellsChanged> {
        self.add_region(CellRegion::cell(column, row))
    }

    /// Select every cell of `region`.
    pub fn add_region(&mut self, region: CellRegion) -> Option<SelectedCellsChanged> {
        if region.is_empty() {
            return None;
        }
        let added = difference(&[region], &self.regions);
        self.regions.extend(added.iter().copied());
        compact(&mut self.regions);
        self.report(added, Vec::new())
    }

    pub fn remove(&mut self, column: usize, row: usize) -> Option<SelectedCellsChanged> {
        self.remove_region(CellRegion::cell(column, row))
    }

    /// Deselect every cell of `region`.
    pub fn remove_region(&mut self, region: CellRegion) -> Option<SelectedCellsChanged> {
        let removed: Vec<CellRegion> = self
            .regions
            .iter()
            .filter_map(|r| r.intersection(&region))
            .collect();
        if removed.is_empty() {
            return None;
        }
        self.regions = difference(&self.regions, &[region]);
        compact(&mut self.regions);
        self.report(Vec::new(), removed)
    }

    pub fn clear(&mut self) -> Option<SelectedCellsChanged> {
        let removed = std::mem::take(&mut self.regions);
        self.report(Vec::new(), removed)
    }

    fn check_owner<T>(&self, cell: &CellInfo<T>) -> Result<(), GridError> {
        match (self.owner, cell.owner()) {
            (Some(mine), Some(theirs)) if mine != theirs => Err(GridError::ForeignOwner),
            _ => Ok(()),
        }
    }

    /// Select `cell`, locating it in `grid`.
    pub fn add_cell<G: GridOwner>(
        &mut self,
        cell: &CellInfo<G::Item>,
        grid: &G,
    ) -> Result<Option<SelectedCellsChanged>, GridError> {
        self.check_owner(cell)?;
        let (column, row) = cell.coordinates(grid)?;
        Ok(self.add(column, row))
    }

    pub fn remove_cell<G: GridOwner>(
        &mut self,
        cell: &CellInfo<G::Item>,
        grid: &G,
    ) -> Result<Option<SelectedCellsChanged>, GridError> {
        self.check_owner(cell)?;
        let (column, row) = cell.coordinates(grid)?;
        Ok(self.remove(column, row))
    }

    /// Whether `cell` is selected. Cells not in `grid` never are.
    pub fn contains_cell<G: GridOwner>(&self, cell: &CellInfo<G::Item>, grid: &G) -> bool {
        self.check_owner(cell).is_ok()
            && cell
                .coordinates(grid)
                .is_ok_and(|(column, row)| self.contains(column, row))
    }

    /// The selected cells as identities, in region order.
    ///
    /// Coordinates that no longer map to a row or column of `grid` are
    /// skipped.
    pub fn cells<G: GridOwner>(&self, grid: &G) -> Vec<CellInfo<G::Item>> {
        let mut out = Vec::with_capacity(self.len());
        for region in &self.regions {
            for (column, row) in region.cells() {
                let (Some(column), Some(item)) =
                    (grid.column_at_display_index(column), grid.item_at(row))
                else {
                    continue;
                };
                out.push(match self.owner {
                    Some(owner) => CellInfo::bound(item.clone(), column, owner, grid),
                    None => CellInfo::new(item.clone(), column),
                });
            }
        }
        out
    }

    /// Smallest region containing every selected cell.
    pub fn bounding_region(&self) -> Option<CellRegion> {
        let (first, rest) = self.regions.split_first()?;
        Some(rest.iter().fold(*first, |acc, region| acc.union(region)))
    }

    /// Inclusive column and row bounds, `None` when nothing is selected.
    pub fn selection_range(&self) -> Option<SelectionRange> {
        self.bounding_region().map(|bounds| SelectionRange {
            min_column: bounds.left,
            max_column: bounds.right() - 1,
            min_row: bounds.top,
            max_row: bounds.bottom() - 1,
        })
    }

    /// Start deferring change reports. Brackets nest.
    pub fn begin_update(&mut self) {
        if self.update_depth == 0 {
            self.snapshot = self.regions.clone();
        }
        self.update_depth += 1;
    }

    /// Close a bracket. The outermost close reports the net change.
    pub fn end_update(&mut self) -> Result<Option<SelectedCellsChanged>, GridError> {
        if self.update_depth == 0 {
            return Err(GridError::NoPendingUpdate);
        }
        self.update_depth -= 1;
        if self.update_depth > 0 {
            return Ok(None);
        }
        let before = std::mem::take(&mut self.snapshot);
        let added = difference(&self.regions, &before);
        let removed = difference(&before, &self.regions);
        debug!(
            message = "selection.end_update",
            added = added.iter().map(CellRegion::area).sum::<usize>(),
            removed = removed.iter().map(CellRegion::area).sum::<usize>(),
            regions = self.regions.len()
        );
        Ok(self.report(added, removed))
    }

    /// Follow a change to the grid's rows.
    pub fn on_rows_changed<T>(&mut self, change: &CollectionChange<T>) -> Option<SelectedCellsChanged> {
        self.on_axis_changed(Axis::Row, change)
    }

    /// Follow a change to the grid's columns (in display order).
    pub fn on_columns_changed<T>(
        &mut self,
        change: &CollectionChange<T>,
    ) -> Option<SelectedCellsChanged> {
        self.on_axis_changed(Axis::Column, change)
    }

    fn on_axis_changed<T>(
        &mut self,
        axis: Axis,
        change: &CollectionChange<T>,
    ) -> Option<SelectedCellsChanged> {
        // Inside a bracket the observer last heard about `snapshot`, so that
        // is what a structural change takes away from them.
        let updating = self.is_updating();
        let dropped = match change {
            CollectionChange::Add { index, items } => {
                insert_lines(&mut self.regions, axis, *index, items.len());
                if updating {
                    insert_lines(&mut self.snapshot, axis, *index, items.len());
                }
                Vec::new()
            }
            CollectionChange::Remove { index, items } => {
                let dropped = remove_lines(&mut self.regions, axis, *index, items.len());
                if updating {
                    remove_lines(&mut self.snapshot, axis, *index, items.len())
                } else {
                    dropped
                }
            }
            CollectionChange::Replace {
                index,
                old_items,
                new_items,
            } => {
                let dropped = remove_lines(&mut self.regions, axis, *index, old_items.len());
                insert_lines(&mut self.regions, axis, *index, new_items.len());
                if updating {
                    let dropped = remove_lines(&mut self.snapshot, axis, *index, old_items.len());
                    insert_lines(&mut self.snapshot, axis, *index, new_items.len());
                    dropped
                } else {
                    dropped
                }
            }
            CollectionChange::Move {
                old_index,
                new_index,
                items,
            } => {
                move_lines(&mut self.regions, axis, *old_index, *new_index, items.len());
                if updating {
                    move_lines(&mut self.snapshot, axis, *old_index, *new_index, items.len());
                }
                Vec::new()
            }
            CollectionChange::Reset => {
                let dropped = std::mem::take(&mut self.regions);
                if updating {
                    std::mem::take(&mut self.snapshot)
                } else {
                    dropped
                }
            }
        };
        debug!(
            message = "selection.structural_change",
            axis = ?axis,
            action = ?change.action(),
            dropped = dropped.iter().map(CellRegion::area).sum::<usize>()
        );
        (!dropped.is_empty()).then(|| SelectedCellsChanged {
            added: Vec::new(),
            removed: dropped,
        })
    }
}
