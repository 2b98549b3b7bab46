#![forbid(unsafe_code)]

//! Dirty rectangle primitives.
//!
//! A canvas keeps exactly one bounding rectangle of everything that changed
//! since a display driver last reset it. Two disjoint changes coalesce into
//! their bounding union; precision is traded for O(1) tracking cost.
//!
//! # Encoding
//!
//! Bounds are inclusive. `xmin > xmax` or `ymin > ymax` means empty; the
//! engine always normalizes empties to `xmin = width, xmax = -1,
//! ymin = height, ymax = -1`. A non-empty rectangle is always a subset of
//! `[0, width) x [0, height)`.

/// A coalesced dirty rectangle with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRect {
    /// Leftmost changed column (inclusive).
    pub xmin: i32,
    /// Rightmost changed column (inclusive).
    pub xmax: i32,
    /// Topmost changed row (inclusive).
    pub ymin: i32,
    /// Bottommost changed row (inclusive).
    pub ymax: i32,
}

impl DirtyRect {
    /// Create a rectangle from raw bounds.
    #[inline]
    pub const fn new(xmin: i32, xmax: i32, ymin: i32, ymax: i32) -> Self {
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }

    /// The canonical empty rectangle for a `width x height` canvas.
    #[inline]
    pub const fn empty(width: i32, height: i32) -> Self {
        Self::new(width, -1, height, -1)
    }

    /// Whether the rectangle covers no cells.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.xmin > self.xmax || self.ymin > self.ymax
    }

    /// Degenerate, or entirely outside a `width x height` canvas.
    ///
    /// Such rectangles are silently ignored by the tracker.
    #[inline]
    pub const fn is_ignorable(&self, width: i32, height: i32) -> bool {
        self.is_empty()
            || self.xmax < 0
            || self.xmin >= width
            || self.ymax < 0
            || self.ymin >= height
    }

    /// Clamp the bounds into a `width x height` canvas.
    ///
    /// Only meaningful for rectangles that are not ignorable for the same
    /// bounds.
    #[inline]
    pub fn clamped(self, width: i32, height: i32) -> Self {
        Self::new(
            self.xmin.max(0),
            self.xmax.min(width - 1),
            self.ymin.max(0),
            self.ymax.min(height - 1),
        )
    }

    /// Expand each bound toward the new extreme, never shrinking.
    ///
    /// Merging into a canonical empty rectangle yields `other` unchanged.
    pub fn merge(&mut self, other: &DirtyRect) {
        if other.xmin < self.xmin {
            self.xmin = other.xmin;
        }
        if other.xmax > self.xmax {
            self.xmax = other.xmax;
        }
        if other.ymin < self.ymin {
            self.ymin = other.ymin;
        }
        if other.ymax > self.ymax {
            self.ymax = other.ymax;
        }
    }

    /// Normalize for storage: canonical-empty when ignorable, clamped into
    /// bounds otherwise.
    pub fn normalized(self, width: i32, height: i32) -> Self {
        if self.is_ignorable(width, height) {
            Self::empty(width, height)
        } else {
            self.clamped(width, height)
        }
    }
}
