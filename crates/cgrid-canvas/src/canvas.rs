#![forbid(unsafe_code)]

//! Canvas storage and frame bookkeeping.
//!
//! A [`Canvas`] owns an ordered collection of [`Frame`]s plus scalar
//! shortcuts (cursor, handle, fill attribute) mirroring the active frame,
//! so drawing code touches per-frame state without indexing the collection
//! on every cell operation.
//!
//! # Invariants
//!
//! 1. Every frame satisfies `chars.len() == attrs.len() == width * height`.
//! 2. All frames share the canvas dimensions at all times; the resize
//!    engine updates the whole collection in one call.
//! 3. The dirty rectangle is canonical-empty or a subset of the canvas
//!    bounds. It is canvas-global: switching frames does not reset it.
//! 4. Shortcuts and frame state are reconciled only through the save/load
//!    pair: `save_frame_info` before any whole-collection traversal,
//!    `load_frame_info` once after, never per frame.

use std::fmt;
use std::rc::Rc;

use smallvec::{SmallVec, smallvec};

use cgrid_core::attr::Attr;
use cgrid_core::dirty::DirtyRect;
use cgrid_core::error::CanvasError;

use crate::frame::Frame;
use crate::lock::ResizeGuard;

/// A resizable, multi-frame grid of (codepoint, attribute) cells.
///
/// # Example
///
/// ```
/// use cgrid_canvas::Canvas;
///
/// let mut canvas = Canvas::new(80, 24).unwrap();
/// let idx = canvas.index(0, 0).unwrap();
/// canvas.chars_mut()[idx] = u32::from('H');
/// canvas.add_dirty_rect(0, 0, 0, 0);
/// ```
pub struct Canvas {
    pub(crate) width: i32,
    pub(crate) height: i32,
    // Most canvases never grow a second frame.
    pub(crate) frames: SmallVec<[Frame; 1]>,
    pub(crate) active: usize,
    // Active-frame shortcuts, valid between a load_frame_info and the next
    // save_frame_info.
    pub(crate) cursor_x: i32,
    pub(crate) cursor_y: i32,
    pub(crate) handle_x: i32,
    pub(crate) handle_y: i32,
    pub(crate) fill_attr: Attr,
    pub(crate) dirty: DirtyRect,
    pub(crate) guard: Option<Rc<dyn ResizeGuard>>,
    pub(crate) frame_autoinc: u32,
}

impl Canvas {
    /// Create a canvas with one blank frame.
    ///
    /// The cursor and the handle start at the top-left corner, the fill
    /// attribute is [`Attr::DEFAULT`], and the dirty rectangle is
    /// canonical-empty. A `0 x 0` canvas is valid.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if either dimension is negative; `OutOfMemory` if
    /// allocation fails (nothing is leaked, no partially built canvas
    /// escapes).
    pub fn new(width: i32, height: i32) -> Result<Self, CanvasError> {
        if width < 0 || height < 0 {
            return Err(CanvasError::InvalidArgument);
        }
        let frame = Frame::new(width, height, Attr::DEFAULT, frame_name(0))?;
        Ok(Self {
            width,
            height,
            frames: smallvec![frame],
            active: 0,
            cursor_x: 0,
            cursor_y: 0,
            handle_x: 0,
            handle_y: 0,
            fill_attr: Attr::DEFAULT,
            dirty: DirtyRect::empty(width, height),
            guard: None,
            frame_autoinc: 1,
        })
    }

    /// Canvas width in cells.
    #[inline]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Canvas height in cells.
    #[inline]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Convert (x, y) coordinates to a linear index into the cell buffers.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    #[inline]
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width && y >= 0 && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// The active frame's codepoint buffer, row-major.
    #[inline]
    pub fn chars(&self) -> &[u32] {
        &self.frames[self.active].chars
    }

    /// Mutable access to the active frame's codepoint buffer.
    #[inline]
    pub fn chars_mut(&mut self) -> &mut [u32] {
        &mut self.frames[self.active].chars
    }

    /// The active frame's attribute buffer, row-major.
    #[inline]
    pub fn attrs(&self) -> &[Attr] {
        &self.frames[self.active].attrs
    }

    /// Mutable access to the active frame's attribute buffer.
    #[inline]
    pub fn attrs_mut(&mut self) -> &mut [Attr] {
        &mut self.frames[self.active].attrs
    }

    /// Cursor position of the active frame.
    #[inline]
    pub const fn cursor(&self) -> (i32, i32) {
        (self.cursor_x, self.cursor_y)
    }

    /// Move the active frame's cursor. No clamping is applied here; a
    /// resize clamps every frame's cursor into the new bounds.
    #[inline]
    pub fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    /// Handle offset of the active frame.
    #[inline]
    pub const fn handle(&self) -> (i32, i32) {
        (self.handle_x, self.handle_y)
    }

    /// Set the active frame's handle offset.
    #[inline]
    pub fn set_handle(&mut self, x: i32, y: i32) {
        self.handle_x = x;
        self.handle_y = y;
    }

    /// Attribute applied to cells materialized by growth.
    #[inline]
    pub const fn fill_attr(&self) -> Attr {
        self.fill_attr
    }

    /// Set the fill attribute of the active frame.
    #[inline]
    pub fn set_fill_attr(&mut self, attr: Attr) {
        self.fill_attr = attr;
    }

    // ========== Frame management ==========

    /// Number of frames in the canvas. Always at least one.
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Index of the active frame.
    #[inline]
    pub const fn active_frame(&self) -> usize {
        self.active
    }

    /// Borrow a frame by index.
    #[inline]
    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Display name of the active frame.
    #[inline]
    pub fn frame_name(&self) -> &str {
        &self.frames[self.active].name
    }

    /// Rename the active frame. Names are display labels; the engine does
    /// not require them to be unique.
    pub fn set_frame_name(&mut self, name: &str) {
        self.frames[self.active].name = name.to_owned();
    }

    /// Switch the active frame.
    ///
    /// Saves the shortcuts into the previously active frame, then loads the
    /// target frame's fields. This save/load pair is the only place where
    /// shortcut and frame state are reconciled.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `index` is out of range.
    pub fn set_active_frame(&mut self, index: usize) -> Result<(), CanvasError> {
        if index >= self.frames.len() {
            return Err(CanvasError::InvalidArgument);
        }
        self.save_frame_info();
        self.active = index;
        self.load_frame_info();
        Ok(())
    }

    /// Insert a blank frame at `index`, at the canvas's current size.
    ///
    /// The new frame is filled with spaces and the active frame's fill
    /// attribute, and receives a generated name. The active frame keeps its
    /// identity: the active index shifts when inserting at or before it.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `index > frame_count()`; `OutOfMemory` if
    /// allocation fails (the frame collection is unchanged).
    pub fn create_frame(&mut self, index: usize) -> Result<(), CanvasError> {
        if index > self.frames.len() {
            return Err(CanvasError::InvalidArgument);
        }
        let name = frame_name(self.frame_autoinc);
        let frame = Frame::new(self.width, self.height, self.fill_attr, name)?;
        self.frame_autoinc = self.frame_autoinc.wrapping_add(1);
        self.frames.insert(index, frame);
        if index <= self.active {
            self.active += 1;
        }
        Ok(())
    }

    /// Remove the frame at `index`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `index` is out of range, targets the active
    /// frame, or would remove the last remaining frame. Callers switch away
    /// from a frame before removing it.
    pub fn remove_frame(&mut self, index: usize) -> Result<(), CanvasError> {
        if index >= self.frames.len() || index == self.active || self.frames.len() == 1 {
            return Err(CanvasError::InvalidArgument);
        }
        self.frames.remove(index);
        if index < self.active {
            self.active -= 1;
        }
        Ok(())
    }

    /// Write the shortcuts back into the active frame.
    pub(crate) fn save_frame_info(&mut self) {
        let frame = &mut self.frames[self.active];
        frame.cursor_x = self.cursor_x;
        frame.cursor_y = self.cursor_y;
        frame.handle_x = self.handle_x;
        frame.handle_y = self.handle_y;
        frame.fill_attr = self.fill_attr;
    }

    /// Load the active frame's fields into the shortcuts.
    pub(crate) fn load_frame_info(&mut self) {
        let frame = &self.frames[self.active];
        self.cursor_x = frame.cursor_x;
        self.cursor_y = frame.cursor_y;
        self.handle_x = frame.handle_x;
        self.handle_y = frame.handle_y;
        self.fill_attr = frame.fill_attr;
    }

    // ========== Dirty rectangle ==========

    /// The current dirty rectangle, canonical-empty if nothing changed
    /// since the last reset.
    #[inline]
    pub const fn dirty_rect(&self) -> DirtyRect {
        self.dirty
    }

    /// Union a changed region into the dirty rectangle.
    ///
    /// Degenerate rectangles (`xmin > xmax` or `ymin > ymax`) and
    /// rectangles entirely outside the canvas are silently ignored;
    /// anything else is clamped into bounds and merged.
    pub fn add_dirty_rect(&mut self, xmin: i32, xmax: i32, ymin: i32, ymax: i32) {
        let rect = DirtyRect::new(xmin, xmax, ymin, ymax);
        if rect.is_ignorable(self.width, self.height) {
            return;
        }
        let rect = rect.clamped(self.width, self.height);
        self.dirty.merge(&rect);
    }

    /// Replace the dirty rectangle outright.
    ///
    /// Degenerate or fully out-of-range input is normalized to
    /// canonical-empty rather than stored verbatim. Display drivers reset
    /// the rectangle this way after each redraw.
    pub fn set_dirty_rect(&mut self, xmin: i32, xmax: i32, ymin: i32, ymax: i32) {
        self.dirty = DirtyRect::new(xmin, xmax, ymin, ymax).normalized(self.width, self.height);
    }
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("frames", &self.frames.len())
            .field("active", &self.active)
            .field("dirty", &self.dirty)
            .field("managed", &self.guard.is_some())
            .finish()
    }
}

/// Generated display name for frame number `n`.
fn frame_name(n: u32) -> String {
    format!("frame#{n:08x}")
}
