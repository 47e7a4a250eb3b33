#![forbid(unsafe_code)]

//! Grid selection model: cell identity, selected cells, mirrored columns.
//!
//! # Role in weft
//! The grid control itself is outside this crate. What lives here is the
//! bookkeeping it leans on:
//!
//! - [`CellInfo`] names a cell by row item and column, bound to its grid
//!   through an [`OwnerHandle`] into an [`OwnerRegistry`] so that a stale
//!   cell never keeps a grid alive.
//! - [`SelectedCells`] stores a selection as disjoint [`CellRegion`]s and
//!   reports net [`SelectedCellsChanged`] deltas.
//! - [`MultipleCopiesCollection`] echoes a source collection's structure
//!   with one shared item, e.g. one header per column.
//!
//! # Example
//!
//! ```
//! use weft_grid::{CellInfo, ColumnId, GridModel, SelectedCells};
//!
//! let grid = GridModel::new([ColumnId(1), ColumnId(2)], ["a", "b", "c"]);
//! let mut selection = SelectedCells::new();
//! selection.add_cell(&CellInfo::new("b", ColumnId(2)), &grid)?;
//! let range = selection.selection_range().expect("one cell selected");
//! assert_eq!((range.min_column, range.min_row), (1, 1));
//! # Ok::<(), weft_grid::GridError>(())
//! ```

pub mod cell_info;
pub mod error;
pub mod grid;
pub mod mirror;
pub mod owner;
pub mod region;
pub mod selected_cells;

pub use cell_info::CellInfo;
pub use error::GridError;
pub use grid::{CellContainer, ColumnId, GridModel, GridOwner, ItemInfo};
pub use mirror::MultipleCopiesCollection;
pub use owner::{OwnerHandle, OwnerRegistry};
pub use region::CellRegion;
pub use selected_cells::{SelectedCells, SelectedCellsChanged, SelectionRange};
