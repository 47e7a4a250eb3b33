//! The two-pass measure/arrange protocol.
//!
//! # Design
//!
//! [`Element`] is the object-safe contract a parent sees: it can measure a
//! child against a constraint, read back the child's desired size, and
//! arrange it into a final rect. Concrete elements implement the narrower
//! [`LayoutOverride`] (their own sizing logic plus access to a
//! [`LayoutSlot`]) and get `Element` through a blanket impl that owns
//! argument validation and result caching.
//!
//! # Invariants
//!
//! 1. A NaN or negative constraint is rejected before any override runs.
//! 2. A measure override may not report a NaN, infinite, or negative size.
//! 3. Measuring with the previous constraint while measure is valid is a
//!    no-op; re-measuring invalidates arrange.
//! 4. Arrange on a never-measured element measures it first with the arrange
//!    size; arrange on an element with invalid measure re-measures it with
//!    its previous constraint.
//!
//! # Failure Modes
//!
//! - **Shared cycles**: a [`SharedElement`] placed inside its own subtree
//!   panics on the nested `RefCell` borrow. Trees are acyclic by contract.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};

use bitflags::bitflags;
use tracing::trace;
use weft_core::geometry::{Rect, Size};

use crate::error::LayoutError;

bitflags! {
    /// Validity bits for an element's cached layout results.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LayoutFlags: u8 {
        /// `desired_size` reflects the previous constraint.
        const MEASURE_VALID = 1 << 0;
        /// `render_size` reflects the previous arrange rect.
        const ARRANGE_VALID = 1 << 1;
    }
}

/// Per-element layout bookkeeping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutSlot {
    flags: LayoutFlags,
    previous_constraint: Option<Size>,
    desired_size: Size,
    previous_rect: Option<Rect>,
    render_size: Size,
}

impl LayoutSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flags(&self) -> LayoutFlags {
        self.flags
    }

    pub fn desired_size(&self) -> Size {
        self.desired_size
    }

    pub fn render_size(&self) -> Size {
        self.render_size
    }

    /// Constraint passed to the last completed measure.
    pub fn previous_constraint(&self) -> Option<Size> {
        self.previous_constraint
    }

    /// Rect passed to the last completed arrange.
    pub fn layout_rect(&self) -> Option<Rect> {
        self.previous_rect
    }

    pub fn is_measure_valid(&self) -> bool {
        self.flags.contains(LayoutFlags::MEASURE_VALID)
    }

    pub fn is_arrange_valid(&self) -> bool {
        self.flags.contains(LayoutFlags::ARRANGE_VALID)
    }

    pub fn invalidate_measure(&mut self) {
        self.flags.remove(LayoutFlags::MEASURE_VALID);
    }

    pub fn invalidate_arrange(&mut self) {
        self.flags.remove(LayoutFlags::ARRANGE_VALID);
    }

    fn record_measure(&mut self, constraint: Size, desired: Size) {
        self.previous_constraint = Some(constraint);
        self.desired_size = desired;
        self.flags.insert(LayoutFlags::MEASURE_VALID);
        self.flags.remove(LayoutFlags::ARRANGE_VALID);
    }

    fn record_arrange(&mut self, rect: Rect, render_size: Size) {
        self.previous_rect = Some(rect);
        self.render_size = render_size;
        self.flags.insert(LayoutFlags::ARRANGE_VALID);
    }
}

/// A participant in the measure/arrange protocol.
pub trait Element: fmt::Debug {
    /// Compute and cache the desired size for `constraint`.
    ///
    /// Components of `constraint` may be `f64::INFINITY`.
    fn measure(&mut self, constraint: Size) -> Result<(), LayoutError>;

    /// Position the element at `final_rect` (parent coordinates) and arrange
    /// its children.
    fn arrange(&mut self, final_rect: Rect) -> Result<(), LayoutError>;

    /// Size reported by the last measure.
    fn desired_size(&self) -> Size;

    /// Size reported by the last arrange.
    fn render_size(&self) -> Size;

    /// Rect of the last arrange, `None` before the first.
    fn layout_rect(&self) -> Option<Rect>;

    fn invalidate_measure(&mut self);

    fn invalidate_arrange(&mut self);

    fn is_measure_valid(&self) -> bool;

    fn is_arrange_valid(&self) -> bool;

    /// Short name used in log events.
    fn name(&self) -> &'static str {
        "element"
    }
}

/// Sizing logic of a concrete element.
///
/// Implementors only compute sizes; validation and caching come from the
/// blanket [`Element`] impl.
pub trait LayoutOverride: fmt::Debug {
    fn slot(&self) -> &LayoutSlot;

    fn slot_mut(&mut self) -> &mut LayoutSlot;

    /// Measure children as needed and return this element's desired size.
    fn measure_override(&mut self, constraint: Size) -> Result<Size, LayoutError>;

    /// Arrange children within `final_size` and return the size actually used.
    fn arrange_override(&mut self, final_size: Size) -> Result<Size, LayoutError>;

    fn element_name(&self) -> &'static str {
        "element"
    }
}

fn validate_arrange_rect(rect: Rect) -> Result<(), LayoutError> {
    let size = rect.size();
    if rect.has_nan()
        || !rect.x.is_finite()
        || !rect.y.is_finite()
        || !size.is_finite()
        || size.has_negative()
    {
        return Err(LayoutError::InvalidArrangeRect { rect });
    }
    Ok(())
}

impl<T: LayoutOverride> Element for T {
    fn measure(&mut self, constraint: Size) -> Result<(), LayoutError> {
        if constraint.has_nan() {
            return Err(LayoutError::NanConstraint { constraint });
        }
        if constraint.has_negative() {
            return Err(LayoutError::NegativeConstraint { constraint });
        }
        let slot = self.slot();
        if slot.is_measure_valid() && slot.previous_constraint() == Some(constraint) {
            return Ok(());
        }

        let desired = self.measure_override(constraint)?;
        if !desired.is_finite() || desired.has_negative() {
            return Err(LayoutError::InvalidDesiredSize { desired });
        }
        trace!(
            message = "layout.measure",
            element = self.element_name(),
            constraint_w = constraint.width,
            constraint_h = constraint.height,
            desired_w = desired.width,
            desired_h = desired.height
        );
        self.slot_mut().record_measure(constraint, desired);
        Ok(())
    }

    fn arrange(&mut self, final_rect: Rect) -> Result<(), LayoutError> {
        validate_arrange_rect(final_rect)?;
        match self.slot().previous_constraint() {
            None => self.measure(final_rect.size())?,
            Some(previous) if !self.slot().is_measure_valid() => self.measure(previous)?,
            Some(_) => {}
        }
        let slot = self.slot();
        if slot.is_arrange_valid() && slot.layout_rect() == Some(final_rect) {
            return Ok(());
        }

        let render_size = self.arrange_override(final_rect.size())?;
        trace!(
            message = "layout.arrange",
            element = self.element_name(),
            x = final_rect.x,
            y = final_rect.y,
            w = final_rect.width,
            h = final_rect.height
        );
        self.slot_mut().record_arrange(final_rect, render_size);
        Ok(())
    }

    fn desired_size(&self) -> Size {
        self.slot().desired_size()
    }

    fn render_size(&self) -> Size {
        self.slot().render_size()
    }

    fn layout_rect(&self) -> Option<Rect> {
        self.slot().layout_rect()
    }

    fn invalidate_measure(&mut self) {
        self.slot_mut().invalidate_measure();
    }

    fn invalidate_arrange(&mut self) {
        self.slot_mut().invalidate_arrange();
    }

    fn is_measure_valid(&self) -> bool {
        self.slot().is_measure_valid()
    }

    fn is_arrange_valid(&self) -> bool {
        self.slot().is_arrange_valid()
    }

    fn name(&self) -> &'static str {
        self.element_name()
    }
}

/// A childless element with an optional preferred size.
///
/// An unset dimension stretches to a finite constraint and collapses to zero
/// when unconstrained. A set dimension is reported as-is, even when it
/// exceeds the constraint.
#[derive(Debug, Clone, Default)]
pub struct Leaf {
    slot: LayoutSlot,
    width: Option<f64>,
    height: Option<f64>,
}

impl Leaf {
    /// A leaf that stretches in both dimensions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A leaf with a fixed preferred size.
    #[must_use]
    pub fn fixed(width: f64, height: f64) -> Self {
        Self::new().width(width).height(height)
    }

    #[must_use]
    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    /// Change the preferred size, invalidating measure.
    pub fn set_preferred(&mut self, width: Option<f64>, height: Option<f64>) {
        self.width = width;
        self.height = height;
        self.slot.invalidate_measure();
    }

    pub fn preferred(&self) -> (Option<f64>, Option<f64>) {
        (self.width, self.height)
    }
}

fn stretch(preferred: Option<f64>, available: f64) -> f64 {
    match preferred {
        Some(value) => value,
        None if available.is_finite() => available,
        None => 0.0,
    }
}

impl LayoutOverride for Leaf {
    fn slot(&self) -> &LayoutSlot {
        &self.slot
    }

    fn slot_mut(&mut self) -> &mut LayoutSlot {
        &mut self.slot
    }

    fn measure_override(&mut self, constraint: Size) -> Result<Size, LayoutError> {
        Ok(Size::new(
            stretch(self.width, constraint.width),
            stretch(self.height, constraint.height),
        ))
    }

    fn arrange_override(&mut self, final_size: Size) -> Result<Size, LayoutError> {
        Ok(final_size)
    }

    fn element_name(&self) -> &'static str {
        "leaf"
    }
}

/// An element shared between the tree and other observers.
///
/// The tree holds one `SharedElement` as a child; observers keep a
/// [`WeakElement`] that does not keep the element alive.
#[derive(Debug, Clone)]
pub struct SharedElement(Rc<RefCell<dyn Element>>);

impl SharedElement {
    pub fn new<E: Element + 'static>(element: E) -> Self {
        let inner: Rc<RefCell<dyn Element>> = Rc::new(RefCell::new(element));
        Self(inner)
    }

    #[must_use]
    pub fn downgrade(&self) -> WeakElement {
        WeakElement(Rc::downgrade(&self.0))
    }

    pub fn borrow(&self) -> Ref<'_, dyn Element> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, dyn Element> {
        self.0.borrow_mut()
    }

    /// True if both handles point at the same element.
    pub fn ptr_eq(&self, other: &SharedElement) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Element for SharedElement {
    fn measure(&mut self, constraint: Size) -> Result<(), LayoutError> {
        self.0.borrow_mut().measure(constraint)
    }

    fn arrange(&mut self, final_rect: Rect) -> Result<(), LayoutError> {
        self.0.borrow_mut().arrange(final_rect)
    }

    fn desired_size(&self) -> Size {
        self.0.borrow().desired_size()
    }

    fn render_size(&self) -> Size {
        self.0.borrow().render_size()
    }

    fn layout_rect(&self) -> Option<Rect> {
        self.0.borrow().layout_rect()
    }

    fn invalidate_measure(&mut self) {
        self.0.borrow_mut().invalidate_measure();
    }

    fn invalidate_arrange(&mut self) {
        self.0.borrow_mut().invalidate_arrange();
    }

    fn is_measure_valid(&self) -> bool {
        self.0.borrow().is_measure_valid()
    }

    fn is_arrange_valid(&self) -> bool {
        self.0.borrow().is_arrange_valid()
    }

    fn name(&self) -> &'static str {
        self.0.borrow().name()
    }
}

/// Non-owning handle to a [`SharedElement`].
#[derive(Debug, Clone)]
pub struct WeakElement(Weak<RefCell<dyn Element>>);

impl WeakElement {
    pub fn upgrade(&self) -> Option<SharedElement> {
        self.0.upgrade().map(SharedElement)
    }

    /// Render size of the element, or `None` if it was dropped or is
    /// currently mid-layout.
    pub fn render_size(&self) -> Option<Size> {
        let strong = self.0.upgrade()?;
        let element = strong.try_borrow().ok()?;
        Some(element.render_size())
    }
}
