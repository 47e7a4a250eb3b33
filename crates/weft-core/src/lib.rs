#![forbid(unsafe_code)]

//! Core: geometry, change notification, and logging for weft.
//!
//! # Role in weft
//! `weft-core` holds the value types every other crate speaks in. The layout
//! engine (`weft-layout`) sizes and places elements in [`geometry::Size`] and
//! [`geometry::Rect`] units, and the grid selection model (`weft-grid`)
//! consumes and produces [`collection::CollectionChange`] events.
//!
//! # Primary responsibilities
//! - **Geometry**: `Size`, `Point`, `Rect`, and `Orientation` in device
//!   independent `f64` units, with positive infinity meaning "unconstrained".
//! - **Tolerant comparison**: epsilon-aware float helpers used by line
//!   breaking so accumulated rounding never flips a layout decision.
//! - **Collection change**: a closed sum type for structural list changes and
//!   a subscriber list that delivers them.

pub mod collection;
pub mod float;
pub mod geometry;
pub mod logging;

pub use collection::{ChangeNotifier, CollectionChange, Subscription};
pub use geometry::{Orientation, Point, Rect, Size};
