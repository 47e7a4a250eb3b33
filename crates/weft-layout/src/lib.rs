#![forbid(unsafe_code)]

//! Two-pass layout: the measure/arrange protocol and the panels built on it.
//!
//! A parent first *measures* each child against an upper-bound constraint
//! (positive infinity meaning unconstrained) and reads back its desired
//! size, then *arranges* each child into a final rect. Every element gets
//! validation and result caching from [`Element`]'s blanket impl over
//! [`LayoutOverride`].
//!
//! # Panels
//!
//! | Panel | Sizing | Placement |
//! |-------|--------|-----------|
//! | [`Decorator`] | child's desired size | child fills the rect |
//! | [`AdornedElementPlaceholder`] | adorned element's render size | child fills the rect |
//! | [`Canvas`] | zero | per-child [`CanvasOffsets`] |
//! | [`DockPanel`] | edge-accumulated | per-child [`Dock`] edge, last child fills |
//! | [`WrapPanel`] | packed lines | lines along `u`, stacked along `v` |
//!
//! # Example
//!
//! ```
//! use weft_core::geometry::{Rect, Size};
//! use weft_layout::{Dock, DockPanel, Element, Leaf, Panel};
//!
//! let mut panel = DockPanel::new();
//! panel.add_child_with(Leaf::new().width(20.0), Dock::Left);
//! panel.add_child(Leaf::new());
//! panel.measure(Size::new(100.0, 50.0))?;
//! panel.arrange(Rect::new(0.0, 0.0, 100.0, 50.0))?;
//! assert_eq!(
//!     panel.child(1).and_then(|c| c.layout_rect()),
//!     Some(Rect::new(20.0, 0.0, 80.0, 50.0))
//! );
//! # Ok::<(), weft_layout::LayoutError>(())
//! ```

pub mod canvas;
pub mod children;
pub mod config;
pub mod decorator;
pub mod dock;
pub mod element;
pub mod error;
pub mod uv;
pub mod wrap;

pub use canvas::{Canvas, CanvasOffsets};
pub use children::{ChildSlot, Children, Panel};
pub use config::{ConfiguredPanel, PanelConfig};
pub use decorator::{AdornedElementPlaceholder, Decorator};
pub use dock::{Dock, DockPanel};
pub use element::{Element, LayoutFlags, LayoutOverride, LayoutSlot, Leaf, SharedElement, WeakElement};
pub use error::LayoutError;
pub use uv::UvSize;
pub use wrap::{WrapLine, WrapPanel, break_lines};
