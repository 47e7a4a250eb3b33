//! Edge-consuming sequential layout.
//!
//! Children are visited in order. Each docked child takes a strip off the
//! remaining space along its edge; with `last_child_fill` (the default) the
//! final child gets whatever is left.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};
use weft_core::geometry::{Rect, Size};

use crate::children::{Children, Panel};
use crate::element::{LayoutOverride, LayoutSlot};
use crate::error::LayoutError;

/// The edge a [`DockPanel`] child is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dock {
    #[default]
    Left,
    Top,
    Right,
    Bottom,
}

impl Dock {
    /// Left and Right consume width; Top and Bottom consume height.
    #[inline]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
        }
    }
}

impl fmt::Display for Dock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dock {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "top" => Ok(Self::Top),
            "right" => Ok(Self::Right),
            "bottom" => Ok(Self::Bottom),
            _ => Err(LayoutError::InvalidDock(s.to_owned())),
        }
    }
}

impl TryFrom<u8> for Dock {
    type Error = LayoutError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Left),
            1 => Ok(Self::Top),
            2 => Ok(Self::Right),
            3 => Ok(Self::Bottom),
            _ => Err(LayoutError::InvalidDock(value.to_string())),
        }
    }
}

/// A panel that docks children against its edges.
#[derive(Debug)]
pub struct DockPanel {
    slot: LayoutSlot,
    children: Children<Dock>,
    last_child_fill: bool,
}

impl Default for DockPanel {
    fn default() -> Self {
        Self {
            slot: LayoutSlot::new(),
            children: Children::new(),
            last_child_fill: true,
        }
    }
}

impl DockPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn last_child_fill(mut self, fill: bool) -> Self {
        self.last_child_fill = fill;
        self
    }

    pub fn fills_last_child(&self) -> bool {
        self.last_child_fill
    }

    pub fn set_last_child_fill(&mut self, fill: bool) {
        if self.last_child_fill != fill {
            self.last_child_fill = fill;
            self.slot.invalidate_measure();
        }
    }

    pub fn dock(&self, index: usize) -> Option<Dock> {
        self.children.attached(index).copied()
    }

    /// Change the edge of child `index`. Invalidates measure.
    pub fn set_dock(&mut self, index: usize, dock: Dock) -> Result<(), LayoutError> {
        let len = self.children.len();
        let attached = self
            .children
            .attached_mut(index)
            .ok_or(LayoutError::ChildIndexOutOfRange { index, len })?;
        if *attached != dock {
            *attached = dock;
            self.slot.invalidate_measure();
        }
        Ok(())
    }
}

impl Panel for DockPanel {
    type Attached = Dock;

    fn children(&self) -> &Children<Dock> {
        &self.children
    }

    fn children_raw_mut(&mut self) -> &mut Children<Dock> {
        &mut self.children
    }
}

impl LayoutOverride for DockPanel {
    fn slot(&self) -> &LayoutSlot {
        &self.slot
    }

    fn slot_mut(&mut self) -> &mut LayoutSlot {
        &mut self.slot
    }

    fn measure_override(&mut self, constraint: Size) -> Result<Size, LayoutError> {
        let _span = debug_span!("dock.measure", children = self.children.len()).entered();
        let mut parent_width: f64 = 0.0;
        let mut parent_height: f64 = 0.0;
        let mut accumulated_width = 0.0;
        let mut accumulated_height = 0.0;

        for slot in self.children.slots_mut() {
            let Some(child) = slot.element.as_deref_mut() else {
                continue;
            };
            child.measure(constraint.deflate(accumulated_width, accumulated_height))?;
            let desired = child.desired_size();

            if slot.attached.is_horizontal() {
                parent_height = parent_height.max(accumulated_height + desired.height);
                accumulated_width += desired.width;
            } else {
                parent_width = parent_width.max(accumulated_width + desired.width);
                accumulated_height += desired.height;
            }
        }

        Ok(Size::new(
            parent_width.max(accumulated_width),
            parent_height.max(accumulated_height),
        ))
    }

    fn arrange_override(&mut self, final_size: Size) -> Result<Size, LayoutError> {
        let _span = debug_span!("dock.arrange", children = self.children.len()).entered();
        let count = self.children.len();
        let non_fill_count = if self.last_child_fill {
            count.saturating_sub(1)
        } else {
            count
        };

        let mut left = 0.0;
        let mut top = 0.0;
        let mut right = 0.0;
        let mut bottom = 0.0;

        for (index, slot) in self.children.slots_mut().iter_mut().enumerate() {
            let Some(child) = slot.element.as_deref_mut() else {
                continue;
            };
            let desired = child.desired_size();
            let mut rect = Rect::new(
                left,
                top,
                (final_size.width - (left + right)).max(0.0),
                (final_size.height - (top + bottom)).max(0.0),
            );

            if index < non_fill_count {
                match slot.attached {
                    Dock::Left => {
                        left += desired.width;
                        rect.width = desired.width;
                    }
                    Dock::Right => {
                        right += desired.width;
                        rect.x = (final_size.width - right).max(0.0);
                        rect.width = desired.width;
                    }
                    Dock::Top => {
                        top += desired.height;
                        rect.height = desired.height;
                    }
                    Dock::Bottom => {
                        bottom += desired.height;
                        rect.y = (final_size.height - bottom).max(0.0);
                        rect.height = desired.height;
                    }
                }
            } else {
                debug!(
                    message = "dock.fill",
                    index,
                    x = rect.x,
                    y = rect.y,
                    w = rect.width,
                    h = rect.height
                );
            }
            child.arrange(rect)?;
        }
        Ok(final_size)
    }

    fn element_name(&self) -> &'static str {
        "dock_panel"
    }
}
