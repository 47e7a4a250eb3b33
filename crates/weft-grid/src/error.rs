use std::fmt;

use crate::grid::ColumnId;

/// Failures surfaced by cell identity, selection, and mirrored collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The unset cell was used where a real cell is required.
    UnsetCell,
    /// A cell has an item but no column.
    MissingColumn,
    /// The column is not part of the grid's column collection.
    UnknownColumn(ColumnId),
    /// The item is not one of the grid's rows.
    UnknownItem,
    /// An index was past the end of a collection.
    IndexOutOfRange { index: usize, len: usize },
    /// External mutation of a collection that only mirrors its source.
    ReadOnlyCollection,
    /// `end_update` without a matching `begin_update`.
    NoPendingUpdate,
    /// A cell bound to a different grid than the one being asked.
    ForeignOwner,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsetCell => write!(f, "cell is unset"),
            Self::MissingColumn => write!(f, "cell has no column"),
            Self::UnknownColumn(column) => write!(f, "column {} is not in the grid", column.0),
            Self::UnknownItem => write!(f, "item is not in the grid"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range (len {len})")
            }
            Self::ReadOnlyCollection => write!(f, "collection is read-only"),
            Self::NoPendingUpdate => write!(f, "end_update called without begin_update"),
            Self::ForeignOwner => write!(f, "cell belongs to a different grid"),
        }
    }
}

impl std::error::Error for GridError {}
