//! Absolute positioning.
//!
//! Each child is placed by up to four offsets attached to it. Left wins over
//! Right and Top wins over Bottom; an axis with neither set places the child
//! at zero. Offsets never affect sizing, so changing them invalidates only
//! arrange.

use serde::{Deserialize, Serialize};
use tracing::debug_span;
use weft_core::geometry::{Rect, Size};

use crate::children::{Children, Panel};
use crate::element::{LayoutOverride, LayoutSlot};
use crate::error::LayoutError;

/// Offsets a [`Canvas`] attaches to each child.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasOffsets {
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
}

/// NaN reads as "unset".
fn offset(value: f64) -> Option<f64> {
    (!value.is_nan()).then_some(value)
}

impl CanvasOffsets {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn left(mut self, value: f64) -> Self {
        self.left = offset(value);
        self
    }

    #[must_use]
    pub fn top(mut self, value: f64) -> Self {
        self.top = offset(value);
        self
    }

    #[must_use]
    pub fn right(mut self, value: f64) -> Self {
        self.right = offset(value);
        self
    }

    #[must_use]
    pub fn bottom(mut self, value: f64) -> Self {
        self.bottom = offset(value);
        self
    }

    /// Position of a child of `desired` size inside `arrange_size`.
    pub fn resolve(&self, arrange_size: Size, desired: Size) -> (f64, f64) {
        let x = match (self.left, self.right) {
            (Some(left), _) => left,
            (None, Some(right)) => arrange_size.width - desired.width - right,
            (None, None) => 0.0,
        };
        let y = match (self.top, self.bottom) {
            (Some(top), _) => top,
            (None, Some(bottom)) => arrange_size.height - desired.height - bottom,
            (None, None) => 0.0,
        };
        (x, y)
    }
}

/// A panel that places children at explicit offsets.
///
/// Children are measured unconstrained. The canvas itself always wants zero
/// size: it does not grow to fit its children.
#[derive(Debug, Default)]
pub struct Canvas {
    slot: LayoutSlot,
    children: Children<CanvasOffsets>,
}

impl Canvas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offsets(&self, index: usize) -> Option<CanvasOffsets> {
        self.children.attached(index).copied()
    }

    /// Replace the offsets of child `index`. Invalidates arrange only.
    pub fn set_offsets(&mut self, index: usize, offsets: CanvasOffsets) -> Result<(), LayoutError> {
        let len = self.children.len();
        let attached = self
            .children
            .attached_mut(index)
            .ok_or(LayoutError::ChildIndexOutOfRange { index, len })?;
        *attached = offsets;
        self.slot.invalidate_arrange();
        Ok(())
    }
}

impl Panel for Canvas {
    type Attached = CanvasOffsets;

    fn children(&self) -> &Children<CanvasOffsets> {
        &self.children
    }

    fn children_raw_mut(&mut self) -> &mut Children<CanvasOffsets> {
        &mut self.children
    }
}

impl LayoutOverride for Canvas {
    fn slot(&self) -> &LayoutSlot {
        &self.slot
    }

    fn slot_mut(&mut self) -> &mut LayoutSlot {
        &mut self.slot
    }

    fn measure_override(&mut self, _constraint: Size) -> Result<Size, LayoutError> {
        let _span = debug_span!("canvas.measure", children = self.children.len()).entered();
        self.children.measure_all(Size::INFINITY)?;
        Ok(Size::ZERO)
    }

    fn arrange_override(&mut self, final_size: Size) -> Result<Size, LayoutError> {
        let _span = debug_span!("canvas.arrange", children = self.children.len()).entered();
        for slot in self.children.slots_mut() {
            let Some(child) = slot.element.as_deref_mut() else {
                continue;
            };
            let desired = child.desired_size();
            let (x, y) = slot.attached.resolve(final_size, desired);
            child.arrange(Rect::new(x, y, desired.width, desired.height))?;
        }
        Ok(final_size)
    }

    fn element_name(&self) -> &'static str {
        "canvas"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Element, Leaf};

    fn arrange(canvas: &mut Canvas, width: f64, height: f64) {
        canvas.measure(Size::new(width, height)).unwrap();
        canvas.arrange(Rect::new(0.0, 0.0, width, height)).unwrap();
    }

    #[test]
    fn canvas_wants_nothing() {
        let mut canvas = Canvas::new();
        canvas.add_child(Leaf::fixed(500.0, 500.0));
        canvas.measure(Size::new(100.0, 100.0)).unwrap();
        assert_eq!(canvas.desired_size(), Size::ZERO);
        assert_eq!(
            canvas.child(0).unwrap().desired_size(),
            Size::new(500.0, 500.0)
        );
    }

    #[test]
    fn left_wins_over_right() {
        let mut canvas = Canvas::new();
        canvas.add_child_with(
            Leaf::fixed(20.0, 10.0),
            CanvasOffsets::new().left(10.0).right(50.0),
        );
        arrange(&mut canvas, 100.0, 100.0);
        let rect = canvas.child(0).unwrap().layout_rect().unwrap();
        assert_eq!(rect, Rect::new(10.0, 0.0, 20.0, 10.0));
    }

    #[test]
    fn right_and_bottom_measure_from_far_edge() {
        let mut canvas = Canvas::new();
        canvas.add_child_with(
            Leaf::fixed(20.0, 10.0),
            CanvasOffsets::new().right(50.0).bottom(5.0),
        );
        arrange(&mut canvas, 100.0, 60.0);
        let rect = canvas.child(0).unwrap().layout_rect().unwrap();
        assert_eq!(rect, Rect::new(30.0, 45.0, 20.0, 10.0));
    }

    #[test]
    fn nan_offset_is_unset() {
        let offsets = CanvasOffsets::new().left(f64::NAN).top(3.0);
        assert_eq!(offsets.left, None);
        assert_eq!(
            offsets.resolve(Size::new(10.0, 10.0), Size::new(1.0, 1.0)),
            (0.0, 3.0)
        );
    }

    #[test]
    fn placeholders_are_skipped() {
        let mut canvas = Canvas::new();
        canvas.add_placeholder();
        canvas.add_child(Leaf::fixed(5.0, 5.0));
        arrange(&mut canvas, 50.0, 50.0);
        assert!(canvas.child(0).is_none());
        assert_eq!(
            canvas.child(1).unwrap().layout_rect(),
            Some(Rect::new(0.0, 0.0, 5.0, 5.0))
        );
    }

    #[test]
    fn offset_change_invalidates_arrange_only() {
        let mut canvas = Canvas::new();
        canvas.add_child(Leaf::fixed(5.0, 5.0));
        arrange(&mut canvas, 50.0, 50.0);
        assert!(canvas.is_measure_valid() && canvas.is_arrange_valid());

        canvas
            .set_offsets(0, CanvasOffsets::new().left(7.0).top(8.0))
            .unwrap();
        assert!(canvas.is_measure_valid());
        assert!(!canvas.is_arrange_valid());

        canvas.arrange(Rect::new(0.0, 0.0, 50.0, 50.0)).unwrap();
        assert_eq!(
            canvas.child(0).unwrap().layout_rect(),
            Some(Rect::new(7.0, 8.0, 5.0, 5.0))
        );
    }

    #[test]
    fn set_offsets_out_of_range() {
        let mut canvas = Canvas::new();
        assert_eq!(
            canvas.set_offsets(2, CanvasOffsets::new()),
            Err(LayoutError::ChildIndexOutOfRange { index: 2, len: 0 })
        );
    }
}
