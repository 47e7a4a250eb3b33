use std::fmt;

use weft_core::geometry::{Rect, Size};

/// Failures surfaced by the measure/arrange protocol and panel properties.
///
/// All of these are programming errors: layout never retries, and panels do
/// not swallow a child's failure.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// A measure constraint had a NaN component.
    NanConstraint { constraint: Size },
    /// A measure constraint had a negative component.
    NegativeConstraint { constraint: Size },
    /// An arrange rect was NaN, infinite, or negative in extent.
    InvalidArrangeRect { rect: Rect },
    /// A measure override produced a size that is not finite and non-negative.
    InvalidDesiredSize { desired: Size },
    /// A child index was past the end of the child list.
    ChildIndexOutOfRange { index: usize, len: usize },
    /// A dock value outside `left`/`top`/`right`/`bottom`.
    InvalidDock(String),
    /// An item slot size that is negative, infinite, or NaN.
    InvalidItemSize { property: &'static str, value: f64 },
    /// A single-child container already has its child.
    SingleChildOnly,
    /// Non-whitespace text content was added where only elements are allowed.
    ChildrenMustBeElements { text: String },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NanConstraint { constraint } => write!(
                f,
                "measure constraint must not be NaN (got {}x{})",
                constraint.width, constraint.height
            ),
            Self::NegativeConstraint { constraint } => write!(
                f,
                "measure constraint must not be negative (got {}x{})",
                constraint.width, constraint.height
            ),
            Self::InvalidArrangeRect { rect } => write!(
                f,
                "arrange rect must have finite non-negative extents (got {}x{} at {},{})",
                rect.width, rect.height, rect.x, rect.y
            ),
            Self::InvalidDesiredSize { desired } => write!(
                f,
                "measure produced an invalid desired size {}x{}",
                desired.width, desired.height
            ),
            Self::ChildIndexOutOfRange { index, len } => {
                write!(f, "child index {index} out of range (len {len})")
            }
            Self::InvalidDock(value) => write!(f, "'{value}' is not a valid dock value"),
            Self::InvalidItemSize { property, value } => {
                write!(f, "{property} must be unset or finite and non-negative (got {value})")
            }
            Self::SingleChildOnly => write!(f, "only one child allowed"),
            Self::ChildrenMustBeElements { text } => {
                write!(f, "children must be elements, found text {text:?}")
            }
        }
    }
}

impl std::error::Error for LayoutError {}
