//! Orientation-relative sizes.
//!
//! A line-packing panel thinks in two axes: `u`, the axis a line grows along,
//! and `v`, the axis lines stack along. [`UvSize`] carries both together with
//! the orientation that maps them onto width and height:
//!
//! | Orientation  | u      | v      |
//! |--------------|--------|--------|
//! | `Horizontal` | width  | height |
//! | `Vertical`   | height | width  |

use weft_core::geometry::{Orientation, Rect, Size};

/// A size expressed in line-growth (`u`) and line-stacking (`v`) terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvSize {
    pub u: f64,
    pub v: f64,
    orientation: Orientation,
}

impl UvSize {
    /// The empty size for `orientation`.
    #[inline]
    pub const fn zero(orientation: Orientation) -> Self {
        Self {
            u: 0.0,
            v: 0.0,
            orientation,
        }
    }

    /// Build from physical width and height.
    #[inline]
    pub fn new(orientation: Orientation, width: f64, height: f64) -> Self {
        let mut uv = Self::zero(orientation);
        uv.set_width(width);
        uv.set_height(height);
        uv
    }

    #[inline]
    pub fn from_size(orientation: Orientation, size: Size) -> Self {
        Self::new(orientation, size.width, size.height)
    }

    #[inline]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[inline]
    pub fn width(&self) -> f64 {
        match self.orientation {
            Orientation::Horizontal => self.u,
            Orientation::Vertical => self.v,
        }
    }

    #[inline]
    pub fn height(&self) -> f64 {
        match self.orientation {
            Orientation::Horizontal => self.v,
            Orientation::Vertical => self.u,
        }
    }

    #[inline]
    pub fn set_width(&mut self, width: f64) {
        match self.orientation {
            Orientation::Horizontal => self.u = width,
            Orientation::Vertical => self.v = width,
        }
    }

    #[inline]
    pub fn set_height(&mut self, height: f64) {
        match self.orientation {
            Orientation::Horizontal => self.v = height,
            Orientation::Vertical => self.u = height,
        }
    }

    #[inline]
    pub fn to_size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
}

/// Map a slot given in `(u, v)` coordinates back to a physical rect.
#[inline]
pub fn uv_rect(orientation: Orientation, u: f64, v: f64, u_extent: f64, v_extent: f64) -> Rect {
    match orientation {
        Orientation::Horizontal => Rect::new(u, v, u_extent, v_extent),
        Orientation::Vertical => Rect::new(v, u, v_extent, u_extent),
    }
}
