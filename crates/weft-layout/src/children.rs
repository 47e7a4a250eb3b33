//! Ordered child lists with per-child attached data.
//!
//! A panel stores each child next to the values a parent attaches to it
//! (dock edge, canvas offsets). Order is significant: it is z-order and, for
//! docking, consumption order. A slot may hold no element; such placeholders
//! keep their index but are skipped by layout.

use weft_core::geometry::Size;

use crate::element::{Element, LayoutOverride};
use crate::error::LayoutError;

/// One entry of a [`Children`] list.
#[derive(Debug)]
pub struct ChildSlot<A> {
    pub element: Option<Box<dyn Element>>,
    pub attached: A,
}

/// Ordered child slots.
#[derive(Debug)]
pub struct Children<A> {
    slots: Vec<ChildSlot<A>>,
}

impl<A> Default for Children<A> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<A> Children<A> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn check_index(&self, index: usize, len: usize) -> Result<(), LayoutError> {
        if index >= len {
            return Err(LayoutError::ChildIndexOutOfRange {
                index,
                len: self.slots.len(),
            });
        }
        Ok(())
    }

    /// Append a child, returning its index.
    pub fn push(&mut self, element: Box<dyn Element>, attached: A) -> usize {
        self.slots.push(ChildSlot {
            element: Some(element),
            attached,
        });
        self.slots.len() - 1
    }

    /// Append an empty slot, returning its index.
    pub fn push_placeholder(&mut self, attached: A) -> usize {
        self.slots.push(ChildSlot {
            element: None,
            attached,
        });
        self.slots.len() - 1
    }

    /// Insert a child at `index` (which may equal `len()`).
    pub fn insert(
        &mut self,
        index: usize,
        element: Box<dyn Element>,
        attached: A,
    ) -> Result<(), LayoutError> {
        self.check_index(index, self.slots.len() + 1)?;
        self.slots.insert(
            index,
            ChildSlot {
                element: Some(element),
                attached,
            },
        );
        Ok(())
    }

    /// Remove and return the slot at `index`.
    pub fn remove(&mut self, index: usize) -> Result<ChildSlot<A>, LayoutError> {
        self.check_index(index, self.slots.len())?;
        Ok(self.slots.remove(index))
    }

    /// Move the slot at `from` so it ends up at `to`.
    pub fn move_slot(&mut self, from: usize, to: usize) -> Result<(), LayoutError> {
        self.check_index(from, self.slots.len())?;
        self.check_index(to, self.slots.len())?;
        let slot = self.slots.remove(from);
        self.slots.insert(to, slot);
        Ok(())
    }

    /// Element at `index`, `None` if out of range or a placeholder.
    pub fn get(&self, index: usize) -> Option<&dyn Element> {
        self.slots.get(index)?.element.as_deref()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut (dyn Element + 'static)> {
        self.slots.get_mut(index)?.element.as_deref_mut()
    }

    pub fn attached(&self, index: usize) -> Option<&A> {
        self.slots.get(index).map(|slot| &slot.attached)
    }

    pub fn attached_mut(&mut self, index: usize) -> Option<&mut A> {
        self.slots.get_mut(index).map(|slot| &mut slot.attached)
    }

    pub fn slots(&self) -> &[ChildSlot<A>] {
        &self.slots
    }

    pub fn slots_mut(&mut self) -> &mut [ChildSlot<A>] {
        &mut self.slots
    }

    /// Live elements with their attached data, skipping placeholders.
    pub fn iter(&self) -> impl Iterator<Item = (&(dyn Element + 'static), &A)> {
        self.slots
            .iter()
            .filter_map(|slot| slot.element.as_deref().map(|e| (e, &slot.attached)))
    }

    /// Measure every live child against the same constraint.
    pub fn measure_all(&mut self, constraint: Size) -> Result<(), LayoutError> {
        for slot in &mut self.slots {
            if let Some(child) = slot.element.as_deref_mut() {
                child.measure(constraint)?;
            }
        }
        Ok(())
    }
}

/// A layout container whose children carry attached data of type
/// [`Panel::Attached`].
///
/// The provided mutators keep the panel's own layout validity in step with
/// its children: any structural change invalidates measure.
pub trait Panel: LayoutOverride {
    type Attached: Default;

    fn children(&self) -> &Children<Self::Attached>;

    /// Raw access to the child list. Does not invalidate layout.
    fn children_raw_mut(&mut self) -> &mut Children<Self::Attached>;

    /// Append a child with default attached data.
    fn add_child<E: Element + 'static>(&mut self, child: E) -> usize
    where
        Self: Sized,
    {
        self.add_child_with(child, Self::Attached::default())
    }

    /// Append a child with explicit attached data.
    fn add_child_with<E: Element + 'static>(&mut self, child: E, attached: Self::Attached) -> usize
    where
        Self: Sized,
    {
        self.slot_mut().invalidate_measure();
        self.children_raw_mut().push(Box::new(child), attached)
    }

    /// Append an empty slot that layout skips.
    fn add_placeholder(&mut self) -> usize {
        self.slot_mut().invalidate_measure();
        self.children_raw_mut()
            .push_placeholder(Self::Attached::default())
    }

    fn insert_child(
        &mut self,
        index: usize,
        child: Box<dyn Element>,
        attached: Self::Attached,
    ) -> Result<(), LayoutError> {
        self.children_raw_mut().insert(index, child, attached)?;
        self.slot_mut().invalidate_measure();
        Ok(())
    }

    fn remove_child(&mut self, index: usize) -> Result<ChildSlot<Self::Attached>, LayoutError> {
        let slot = self.children_raw_mut().remove(index)?;
        self.slot_mut().invalidate_measure();
        Ok(slot)
    }

    fn move_child(&mut self, from: usize, to: usize) -> Result<(), LayoutError> {
        self.children_raw_mut().move_slot(from, to)?;
        self.slot_mut().invalidate_measure();
        Ok(())
    }

    fn child(&self, index: usize) -> Option<&dyn Element> {
        self.children().get(index)
    }

    /// Mutable access to a child. The panel's measure is invalidated since
    /// the caller may change the child's size.
    fn child_mut(&mut self, index: usize) -> Option<&mut (dyn Element + 'static)> {
        self.slot_mut().invalidate_measure();
        self.children_raw_mut().get_mut(index)
    }

    fn child_count(&self) -> usize {
        self.children().len()
    }
}
