#![forbid(unsafe_code)]

//! weft public facade crate.
//!
//! Re-exports the layout engine and the grid selection model, and unifies
//! their errors under [`Error`]. Most code only needs the [`prelude`].

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use weft_core::collection::{ChangeAction, ChangeNotifier, CollectionChange, Subscription};
pub use weft_core::geometry::{Orientation, Point, Rect, Size};

// --- Layout re-exports -----------------------------------------------------

pub use weft_layout::{
    AdornedElementPlaceholder, Canvas, CanvasOffsets, ConfiguredPanel, Decorator, Dock, DockPanel,
    Element, LayoutError, LayoutOverride, LayoutSlot, Leaf, Panel, PanelConfig, SharedElement,
    WrapPanel,
};

// --- Grid re-exports -------------------------------------------------------

pub use weft_grid::{
    CellInfo, CellRegion, ColumnId, GridError, GridModel, GridOwner, MultipleCopiesCollection,
    OwnerHandle, OwnerRegistry, SelectedCells, SelectedCellsChanged, SelectionRange,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for weft.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Measure/arrange or panel property failure.
    Layout(LayoutError),
    /// Cell identity, selection, or mirrored collection failure.
    Grid(GridError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(err) => write!(f, "layout: {err}"),
            Self::Grid(err) => write!(f, "grid: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Layout(err) => Some(err),
            Self::Grid(err) => Some(err),
        }
    }
}

impl From<LayoutError> for Error {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

impl From<GridError> for Error {
    fn from(err: GridError) -> Self {
        Self::Grid(err)
    }
}

/// Standard result type for weft APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CellInfo, CellRegion, ColumnId, Dock, DockPanel, Element, Error, GridOwner, Leaf,
        Orientation, Panel, Rect, Result, SelectedCells, Size, WrapPanel,
    };

    pub use crate::{core, grid, layout};
}

pub use weft_core as core;
pub use weft_grid as grid;
pub use weft_layout as layout;
