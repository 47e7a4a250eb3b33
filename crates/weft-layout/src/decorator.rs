//! Single-child containers.
//!
//! [`Decorator`] passes its child's natural size straight through.
//! [`AdornedElementPlaceholder`] instead takes its size from a separately
//! tracked adorned element, so decoration drawn around the placeholder's
//! child lines up exactly with the element it annotates.

use weft_core::geometry::{Rect, Size};

use crate::element::{Element, LayoutOverride, LayoutSlot, SharedElement, WeakElement};
use crate::error::LayoutError;

/// Reject text content that is not pure whitespace.
pub(crate) fn check_text_content(text: &str) -> Result<(), LayoutError> {
    if text.trim().is_empty() {
        Ok(())
    } else {
        Err(LayoutError::ChildrenMustBeElements {
            text: text.to_owned(),
        })
    }
}

fn arrange_single(
    child: Option<&mut Box<dyn Element>>,
    final_size: Size,
) -> Result<Size, LayoutError> {
    if let Some(child) = child {
        child.arrange(Rect::from_size(final_size))?;
    }
    Ok(final_size)
}

/// Hosts at most one child and sizes to it.
#[derive(Debug, Default)]
pub struct Decorator {
    slot: LayoutSlot,
    child: Option<Box<dyn Element>>,
}

impl Decorator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_child<E: Element + 'static>(child: E) -> Self {
        Self {
            slot: LayoutSlot::new(),
            child: Some(Box::new(child)),
        }
    }

    pub fn child(&self) -> Option<&dyn Element> {
        self.child.as_deref()
    }

    /// Mutable access to the child; invalidates this decorator's measure.
    pub fn child_mut(&mut self) -> Option<&mut (dyn Element + 'static)> {
        self.slot.invalidate_measure();
        self.child.as_deref_mut()
    }

    /// Replace the child, returning the previous one.
    pub fn set_child(&mut self, child: Option<Box<dyn Element>>) -> Option<Box<dyn Element>> {
        self.slot.invalidate_measure();
        std::mem::replace(&mut self.child, child)
    }

    /// Add the child. Fails if one is already present.
    pub fn add_child<E: Element + 'static>(&mut self, child: E) -> Result<(), LayoutError> {
        if self.child.is_some() {
            return Err(LayoutError::SingleChildOnly);
        }
        self.set_child(Some(Box::new(child)));
        Ok(())
    }

    /// Add text content. Only whitespace is accepted, and it is ignored.
    pub fn add_text(&mut self, text: &str) -> Result<(), LayoutError> {
        check_text_content(text)
    }
}

impl LayoutOverride for Decorator {
    fn slot(&self) -> &LayoutSlot {
        &self.slot
    }

    fn slot_mut(&mut self) -> &mut LayoutSlot {
        &mut self.slot
    }

    fn measure_override(&mut self, constraint: Size) -> Result<Size, LayoutError> {
        match self.child.as_deref_mut() {
            Some(child) => {
                child.measure(constraint)?;
                Ok(child.desired_size())
            }
            None => Ok(Size::ZERO),
        }
    }

    fn arrange_override(&mut self, final_size: Size) -> Result<Size, LayoutError> {
        arrange_single(self.child.as_mut(), final_size)
    }

    fn element_name(&self) -> &'static str {
        "decorator"
    }
}

/// Stands in for an adorned element inside its decoration.
///
/// The placeholder ignores its constraint and reports the adorned element's
/// render size. The adorned element is held weakly; once it is gone the
/// placeholder sizes to zero.
#[derive(Debug)]
pub struct AdornedElementPlaceholder {
    slot: LayoutSlot,
    child: Option<Box<dyn Element>>,
    adorned: WeakElement,
}

impl AdornedElementPlaceholder {
    /// Create a placeholder bound to `adorned`.
    #[must_use]
    pub fn new(adorned: &SharedElement) -> Self {
        Self {
            slot: LayoutSlot::new(),
            child: None,
            adorned: adorned.downgrade(),
        }
    }

    /// The adorned element, if it is still alive.
    pub fn adorned_element(&self) -> Option<SharedElement> {
        self.adorned.upgrade()
    }

    pub fn child(&self) -> Option<&dyn Element> {
        self.child.as_deref()
    }

    pub fn set_child(&mut self, child: Option<Box<dyn Element>>) -> Option<Box<dyn Element>> {
        self.slot.invalidate_measure();
        std::mem::replace(&mut self.child, child)
    }

    /// Add the child. Fails if one is already present.
    pub fn add_child<E: Element + 'static>(&mut self, child: E) -> Result<(), LayoutError> {
        if self.child.is_some() {
            return Err(LayoutError::SingleChildOnly);
        }
        self.set_child(Some(Box::new(child)));
        Ok(())
    }

    /// Add text content. Only whitespace is accepted, and it is ignored.
    pub fn add_text(&mut self, text: &str) -> Result<(), LayoutError> {
        check_text_content(text)
    }
}

impl LayoutOverride for AdornedElementPlaceholder {
    fn slot(&self) -> &LayoutSlot {
        &self.slot
    }

    fn slot_mut(&mut self) -> &mut LayoutSlot {
        &mut self.slot
    }

    fn measure_override(&mut self, _constraint: Size) -> Result<Size, LayoutError> {
        let desired = self.adorned.render_size().unwrap_or(Size::ZERO);
        if let Some(child) = self.child.as_deref_mut() {
            child.measure(desired)?;
        }
        Ok(desired)
    }

    fn arrange_override(&mut self, final_size: Size) -> Result<Size, LayoutError> {
        arrange_single(self.child.as_mut(), final_size)
    }

    fn element_name(&self) -> &'static str {
        "adorned_element_placeholder"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Leaf;

    #[test]
    fn decorator_passes_child_size_through() {
        let mut decorator = Decorator::with_child(Leaf::fixed(30.0, 12.0));
        decorator.measure(Size::new(100.0, 100.0)).unwrap();
        assert_eq!(decorator.desired_size(), Size::new(30.0, 12.0));

        decorator.arrange(Rect::new(7.0, 9.0, 80.0, 40.0)).unwrap();
        let child = decorator.child().unwrap();
        assert_eq!(child.layout_rect(), Some(Rect::new(0.0, 0.0, 80.0, 40.0)));
    }

    #[test]
    fn empty_decorator_is_zero() {
        let mut decorator = Decorator::new();
        decorator.measure(Size::INFINITY).unwrap();
        assert_eq!(decorator.desired_size(), Size::ZERO);
        decorator.arrange(Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
    }

    #[test]
    fn second_child_rejected() {
        let mut decorator = Decorator::new();
        decorator.add_child(Leaf::new()).unwrap();
        assert_eq!(
            decorator.add_child(Leaf::new()),
            Err(LayoutError::SingleChildOnly)
        );
    }

    #[test]
    fn text_content_must_be_whitespace() {
        let mut decorator = Decorator::new();
        assert!(decorator.add_text("  \n\t").is_ok());
        assert!(matches!(
            decorator.add_text("hello"),
            Err(LayoutError::ChildrenMustBeElements { .. })
        ));
    }

    #[test]
    fn set_child_replaces_and_invalidates() {
        let mut decorator = Decorator::with_child(Leaf::fixed(1.0, 1.0));
        decorator.measure(Size::new(5.0, 5.0)).unwrap();
        let old = decorator.set_child(Some(Box::new(Leaf::fixed(2.0, 3.0))));
        assert!(old.is_some());
        assert!(!decorator.is_measure_valid());
        decorator.measure(Size::new(5.0, 5.0)).unwrap();
        assert_eq!(decorator.desired_size(), Size::new(2.0, 3.0));
    }

    #[test]
    fn placeholder_sizes_to_adorned_element() {
        let mut adorned = SharedElement::new(Leaf::fixed(40.0, 20.0));
        adorned.arrange(Rect::new(0.0, 0.0, 40.0, 20.0)).unwrap();

        let mut placeholder = AdornedElementPlaceholder::new(&adorned);
        placeholder.add_child(Leaf::new()).unwrap();
        placeholder.measure(Size::new(5.0, 5.0)).unwrap();
        assert_eq!(placeholder.desired_size(), Size::new(40.0, 20.0));
        assert_eq!(
            placeholder.child().unwrap().desired_size(),
            Size::new(40.0, 20.0)
        );

        placeholder.arrange(Rect::new(3.0, 3.0, 40.0, 20.0)).unwrap();
        assert_eq!(
            placeholder.child().unwrap().layout_rect(),
            Some(Rect::new(0.0, 0.0, 40.0, 20.0))
        );
    }

    #[test]
    fn placeholder_collapses_when_adorned_is_dropped() {
        let adorned = SharedElement::new(Leaf::fixed(40.0, 20.0));
        let mut placeholder = AdornedElementPlaceholder::new(&adorned);
        drop(adorned);
        assert!(placeholder.adorned_element().is_none());
        placeholder.measure(Size::new(5.0, 5.0)).unwrap();
        assert_eq!(placeholder.desired_size(), Size::ZERO);
        placeholder.add_child(Leaf::new()).unwrap();
        assert_eq!(
            placeholder.add_child(Leaf::new()),
            Err(LayoutError::SingleChildOnly)
        );
    }
}
