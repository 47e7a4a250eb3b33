//! Serializable panel configuration.
//!
//! Panels are normally built in code with their chained setters. A
//! [`PanelConfig`] holds the same properties as plain data so they can be
//! persisted and loaded:
//!
//! ```json
//! { "kind": "wrap", "orientation": "vertical", "item_width": 30.0 }
//! ```
//!
//! Loading applies the same checks as the setters.

use serde::{Deserialize, Serialize};
use weft_core::geometry::Orientation;

use crate::canvas::Canvas;
use crate::children::Panel;
use crate::dock::DockPanel;
use crate::element::Element;
use crate::error::LayoutError;
use crate::wrap::WrapPanel;

fn default_last_child_fill() -> bool {
    true
}

/// Properties of one panel, tagged by panel kind.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PanelConfig {
    #[default]
    Canvas,
    Dock {
        #[serde(default = "default_last_child_fill")]
        last_child_fill: bool,
    },
    Wrap {
        #[serde(default)]
        orientation: Orientation,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        item_width: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        item_height: Option<f64>,
    },
}

/// A panel built from a [`PanelConfig`], ready to receive children.
#[derive(Debug)]
pub enum ConfiguredPanel {
    Canvas(Canvas),
    Dock(DockPanel),
    Wrap(WrapPanel),
}

impl ConfiguredPanel {
    pub fn child_count(&self) -> usize {
        match self {
            Self::Canvas(panel) => panel.child_count(),
            Self::Dock(panel) => panel.child_count(),
            Self::Wrap(panel) => panel.child_count(),
        }
    }

    /// Erase the panel type.
    pub fn into_element(self) -> Box<dyn Element> {
        match self {
            Self::Canvas(panel) => Box::new(panel),
            Self::Dock(panel) => Box::new(panel),
            Self::Wrap(panel) => Box::new(panel),
        }
    }
}

impl PanelConfig {
    /// Check property values without building anything.
    pub fn validate(&self) -> Result<(), LayoutError> {
        self.build().map(|_| ())
    }

    pub fn build(&self) -> Result<ConfiguredPanel, LayoutError> {
        Ok(match *self {
            Self::Canvas => ConfiguredPanel::Canvas(Canvas::new()),
            Self::Dock { last_child_fill } => {
                ConfiguredPanel::Dock(DockPanel::new().last_child_fill(last_child_fill))
            }
            Self::Wrap {
                orientation,
                item_width,
                item_height,
            } => ConfiguredPanel::Wrap(
                WrapPanel::new()
                    .orientation(orientation)
                    .item_width(item_width.unwrap_or(f64::NAN))?
                    .item_height(item_height.unwrap_or(f64::NAN))?,
            ),
        })
    }

    /// Capture the properties of an existing panel.
    pub fn from_panel(panel: &ConfiguredPanel) -> Self {
        match panel {
            ConfiguredPanel::Canvas(_) => Self::Canvas,
            ConfiguredPanel::Dock(dock) => Self::Dock {
                last_child_fill: dock.fills_last_child(),
            },
            ConfiguredPanel::Wrap(wrap) => Self::Wrap {
                orientation: wrap.get_orientation(),
                item_width: wrap.get_item_width(),
                item_height: wrap.get_item_height(),
            },
        }
    }
}
