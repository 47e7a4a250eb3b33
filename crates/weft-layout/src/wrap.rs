//! Line-packing layout.
//!
//! # Design
//!
//! Children flow along `u` (width for horizontal panels, height for vertical
//! ones) until the next child would exceed the available `u`; then a new line
//! starts further along `v`. A child whose own `u` exceeds the available
//! extent gets a line to itself and is not clipped.
//!
//! Both passes partition children with the same routine, [`break_lines`],
//! so measure and arrange agree on every line break for the same child
//! sizes and the same available `u`.
//!
//! # Invariants
//!
//! 1. Lines cover every live child exactly once, in child order.
//! 2. A line either fits within the available `u` or holds exactly one
//!    oversized child.
//! 3. Fits are judged with [`weft_core::float::greater_than`], so rounding
//!    never pushes a child that exactly fills the line onto the next one.

use tracing::{debug, debug_span};
use weft_core::float::greater_than;
use weft_core::geometry::{Orientation, Size};
use web_time::Instant;

use crate::children::{ChildSlot, Children, Panel};
use crate::element::{LayoutOverride, LayoutSlot};
use crate::error::LayoutError;
use crate::uv::{UvSize, uv_rect};

/// A packed line: child slots `start..end` and the line's extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrapLine {
    pub start: usize,
    pub end: usize,
    /// Sum of the slot extents along `u`.
    pub u: f64,
    /// Largest slot extent along `v`.
    pub v: f64,
}

/// Partition slot sizes into lines no longer than `limit_u`.
///
/// `None` entries are placeholders: they occupy an index but no space.
pub fn break_lines(sizes: &[Option<UvSize>], limit_u: f64) -> Vec<WrapLine> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut line_u = 0.0;
    let mut line_v: f64 = 0.0;
    let mut line_items = 0usize;

    for (index, size) in sizes.iter().enumerate() {
        let Some(size) = size else {
            continue;
        };
        if greater_than(line_u + size.u, limit_u) {
            if line_items > 0 {
                lines.push(WrapLine {
                    start,
                    end: index,
                    u: line_u,
                    v: line_v,
                });
            }
            if greater_than(size.u, limit_u) {
                lines.push(WrapLine {
                    start: index,
                    end: index + 1,
                    u: size.u,
                    v: size.v,
                });
                start = index + 1;
                line_u = 0.0;
                line_v = 0.0;
                line_items = 0;
            } else {
                start = index;
                line_u = size.u;
                line_v = size.v;
                line_items = 1;
            }
        } else {
            line_u += size.u;
            line_v = line_v.max(size.v);
            line_items += 1;
        }
    }
    if line_items > 0 {
        lines.push(WrapLine {
            start,
            end: sizes.len(),
            u: line_u,
            v: line_v,
        });
    }
    lines
}

/// NaN means "unset"; anything else must be finite and non-negative.
fn item_size(property: &'static str, value: f64) -> Result<Option<f64>, LayoutError> {
    if value.is_nan() {
        Ok(None)
    } else if value.is_finite() && value >= 0.0 {
        Ok(Some(value))
    } else {
        Err(LayoutError::InvalidItemSize { property, value })
    }
}

/// A panel that packs children into lines.
#[derive(Debug, Default)]
pub struct WrapPanel {
    slot: LayoutSlot,
    children: Children<()>,
    orientation: Orientation,
    item_width: Option<f64>,
    item_height: Option<f64>,
    measured_lines: Vec<WrapLine>,
    arranged_lines: Vec<WrapLine>,
}

impl WrapPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Fix every slot's width. NaN leaves it unset.
    pub fn item_width(mut self, width: f64) -> Result<Self, LayoutError> {
        self.item_width = item_size("item_width", width)?;
        Ok(self)
    }

    /// Fix every slot's height. NaN leaves it unset.
    pub fn item_height(mut self, height: f64) -> Result<Self, LayoutError> {
        self.item_height = item_size("item_height", height)?;
        Ok(self)
    }

    pub fn get_orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn get_item_width(&self) -> Option<f64> {
        self.item_width
    }

    pub fn get_item_height(&self) -> Option<f64> {
        self.item_height
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        if self.orientation != orientation {
            self.orientation = orientation;
            self.slot.invalidate_measure();
        }
    }

    pub fn set_item_width(&mut self, width: Option<f64>) -> Result<(), LayoutError> {
        self.item_width = match width {
            Some(value) => item_size("item_width", value)?,
            None => None,
        };
        self.slot.invalidate_measure();
        Ok(())
    }

    pub fn set_item_height(&mut self, height: Option<f64>) -> Result<(), LayoutError> {
        self.item_height = match height {
            Some(value) => item_size("item_height", value)?,
            None => None,
        };
        self.slot.invalidate_measure();
        Ok(())
    }

    /// Lines decided by the last measure.
    pub fn measured_lines(&self) -> &[WrapLine] {
        &self.measured_lines
    }

    /// Lines decided by the last arrange.
    pub fn arranged_lines(&self) -> &[WrapLine] {
        &self.arranged_lines
    }

    fn slot_sizes(&self) -> Vec<Option<UvSize>> {
        slot_sizes(
            self.children.slots(),
            self.orientation,
            self.item_width,
            self.item_height,
        )
    }
}

fn slot_sizes(
    slots: &[ChildSlot<()>],
    orientation: Orientation,
    item_width: Option<f64>,
    item_height: Option<f64>,
) -> Vec<Option<UvSize>> {
    slots
        .iter()
        .map(|slot| {
            slot.element.as_deref().map(|child| {
                let desired = child.desired_size();
                UvSize::new(
                    orientation,
                    item_width.unwrap_or(desired.width),
                    item_height.unwrap_or(desired.height),
                )
            })
        })
        .collect()
}

impl Panel for WrapPanel {
    type Attached = ();

    fn children(&self) -> &Children<()> {
        &self.children
    }

    fn children_raw_mut(&mut self) -> &mut Children<()> {
        &mut self.children
    }
}

impl LayoutOverride for WrapPanel {
    fn slot(&self) -> &LayoutSlot {
        &self.slot
    }

    fn slot_mut(&mut self) -> &mut LayoutSlot {
        &mut self.slot
    }

    fn measure_override(&mut self, constraint: Size) -> Result<Size, LayoutError> {
        let _span = debug_span!("wrap.measure", children = self.children.len()).entered();
        let started = Instant::now();

        let child_constraint = Size::new(
            self.item_width.unwrap_or(constraint.width),
            self.item_height.unwrap_or(constraint.height),
        );
        self.children.measure_all(child_constraint)?;

        let limit = UvSize::from_size(self.orientation, constraint).u;
        let lines = break_lines(&self.slot_sizes(), limit);
        let mut panel = UvSize::zero(self.orientation);
        for line in &lines {
            panel.u = panel.u.max(line.u);
            panel.v += line.v;
        }

        debug!(
            message = "wrap.measure",
            orientation = ?self.orientation,
            limit_u = limit,
            lines = lines.len(),
            desired_u = panel.u,
            desired_v = panel.v,
            duration_us = started.elapsed().as_micros() as u64
        );
        self.measured_lines = lines;
        Ok(panel.to_size())
    }

    fn arrange_override(&mut self, final_size: Size) -> Result<Size, LayoutError> {
        let _span = debug_span!("wrap.arrange", children = self.children.len()).entered();
        let orientation = self.orientation;
        let limit = UvSize::from_size(orientation, final_size).u;
        let lines = break_lines(&self.slot_sizes(), limit);
        let item_u = match orientation {
            Orientation::Horizontal => self.item_width,
            Orientation::Vertical => self.item_height,
        };

        let slots = self.children.slots_mut();
        let mut accumulated_v = 0.0;
        for line in &lines {
            let mut u = 0.0;
            for slot in &mut slots[line.start..line.end] {
                let Some(child) = slot.element.as_deref_mut() else {
                    continue;
                };
                let child_u = UvSize::from_size(orientation, child.desired_size()).u;
                let slot_u = item_u.unwrap_or(child_u);
                child.arrange(uv_rect(orientation, u, accumulated_v, slot_u, line.v))?;
                u += slot_u;
            }
            accumulated_v += line.v;
        }

        self.arranged_lines = lines;
        Ok(final_size)
    }

    fn element_name(&self) -> &'static str {
        "wrap_panel"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Element, Leaf};
    use weft_core::geometry::Rect;

    fn uv(u: f64, v: f64) -> Option<UvSize> {
        let mut size = UvSize::zero(Orientation::Horizontal);
        size.u = u;
        size.v = v;
        Some(size)
    }

    fn rect_of(panel: &WrapPanel, index: usize) -> Rect {
        panel.child(index).unwrap().layout_rect().unwrap()
    }

    #[test]
    fn break_lines_packs_until_full() {
        let sizes = [uv(40.0, 5.0), uv(40.0, 8.0), uv(40.0, 3.0)];
        let lines = break_lines(&sizes, 100.0);
        assert_eq!(
            lines,
            vec![
                WrapLine {
                    start: 0,
                    end: 2,
                    u: 80.0,
                    v: 8.0
                },
                WrapLine {
                    start: 2,
                    end: 3,
                    u: 40.0,
                    v: 3.0
                },
            ]
        );
    }

    #[test]
    fn break_lines_isolates_oversized() {
        let sizes = [uv(30.0, 1.0), uv(150.0, 2.0), uv(30.0, 3.0), uv(30.0, 4.0)];
        let lines = break_lines(&sizes, 100.0);
        let ranges: Vec<(usize, usize)> = lines.iter().map(|l| (l.start, l.end)).collect();
        assert_eq!(ranges, vec![(0, 1), (1, 2), (2, 4)]);
        assert_eq!(lines[2].u, 60.0);
        assert_eq!(lines[2].v, 4.0);
    }

    #[test]
    fn break_lines_oversized_first_child() {
        let sizes = [uv(150.0, 2.0), uv(10.0, 1.0)];
        let ranges: Vec<(usize, usize)> = break_lines(&sizes, 100.0)
            .iter()
            .map(|l| (l.start, l.end))
            .collect();
        assert_eq!(ranges, vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn break_lines_tolerates_rounding() {
        let sizes = [uv(0.1, 1.0), uv(0.2, 1.0)];
        assert_eq!(break_lines(&sizes, 0.3).len(), 1);
    }

    #[test]
    fn break_lines_skips_placeholders() {
        let sizes = [uv(60.0, 1.0), None, uv(60.0, 1.0)];
        let ranges: Vec<(usize, usize)> = break_lines(&sizes, 100.0)
            .iter()
            .map(|l| (l.start, l.end))
            .collect();
        assert_eq!(ranges, vec![(0, 2), (2, 3)]);
    }

    #[test]
    fn fixed_item_width_breaks_after_three() {
        let mut panel = WrapPanel::new().item_width(30.0).unwrap();
        for height in [10.0, 12.0, 8.0, 6.0, 5.0] {
            panel.add_child(Leaf::new().height(height));
        }
        panel.measure(Size::new(100.0, f64::INFINITY)).unwrap();
        assert_eq!(panel.desired_size(), Size::new(90.0, 18.0));

        panel.arrange(Rect::new(0.0, 0.0, 100.0, 18.0)).unwrap();
        assert_eq!(panel.measured_lines(), panel.arranged_lines());
        for index in 0..3 {
            assert_eq!(rect_of(&panel, index).y, 0.0);
        }
        assert_eq!(rect_of(&panel, 1), Rect::new(30.0, 0.0, 30.0, 12.0));
        assert_eq!(rect_of(&panel, 3), Rect::new(0.0, 12.0, 30.0, 6.0));
        assert_eq!(rect_of(&panel, 4), Rect::new(30.0, 12.0, 30.0, 6.0));
    }

    #[test]
    fn oversized_child_gets_its_own_line() {
        let mut panel = WrapPanel::new();
        panel.add_child(Leaf::fixed(40.0, 10.0));
        panel.add_child(Leaf::fixed(150.0, 20.0));
        panel.add_child(Leaf::fixed(40.0, 10.0));
        panel.add_child(Leaf::fixed(40.0, 10.0));
        panel.measure(Size::new(100.0, 200.0)).unwrap();
        assert_eq!(panel.desired_size(), Size::new(150.0, 40.0));

        panel.arrange(Rect::new(0.0, 0.0, 100.0, 200.0)).unwrap();
        assert_eq!(rect_of(&panel, 0), Rect::new(0.0, 0.0, 40.0, 10.0));
        assert_eq!(rect_of(&panel, 1), Rect::new(0.0, 10.0, 150.0, 20.0));
        assert_eq!(rect_of(&panel, 2), Rect::new(0.0, 30.0, 40.0, 10.0));
        assert_eq!(rect_of(&panel, 3), Rect::new(40.0, 30.0, 40.0, 10.0));
    }

    #[test]
    fn vertical_orientation_flows_down_then_across() {
        let mut panel = WrapPanel::new().orientation(Orientation::Vertical);
        for _ in 0..3 {
            panel.add_child(Leaf::fixed(10.0, 40.0));
        }
        panel.measure(Size::new(200.0, 100.0)).unwrap();
        assert_eq!(panel.desired_size(), Size::new(20.0, 80.0));

        panel.arrange(Rect::new(0.0, 0.0, 200.0, 100.0)).unwrap();
        assert_eq!(rect_of(&panel, 1), Rect::new(0.0, 40.0, 10.0, 40.0));
        assert_eq!(rect_of(&panel, 2), Rect::new(10.0, 0.0, 10.0, 40.0));
    }

    #[test]
    fn unconstrained_never_wraps() {
        let mut panel = WrapPanel::new();
        for _ in 0..10 {
            panel.add_child(Leaf::fixed(50.0, 5.0));
        }
        panel.measure(Size::INFINITY).unwrap();
        assert_eq!(panel.desired_size(), Size::new(500.0, 5.0));
        assert_eq!(panel.measured_lines().len(), 1);
    }

    #[test]
    fn item_size_validation() {
        assert!(WrapPanel::new().item_width(f64::NAN).is_ok());
        assert_eq!(
            WrapPanel::new().item_width(-1.0).unwrap_err(),
            LayoutError::InvalidItemSize {
                property: "item_width",
                value: -1.0
            }
        );
        let mut panel = WrapPanel::new();
        assert!(panel.set_item_height(Some(f64::INFINITY)).is_err());
        assert!(panel.set_item_height(Some(4.0)).is_ok());
        assert_eq!(panel.get_item_height(), Some(4.0));
    }

    #[test]
    fn property_changes_invalidate_measure() {
        let mut panel = WrapPanel::new();
        panel.add_child(Leaf::fixed(5.0, 5.0));
        panel.measure(Size::new(10.0, 10.0)).unwrap();
        panel.set_orientation(Orientation::Vertical);
        assert!(!panel.is_measure_valid());
    }
}
