#![forbid(unsafe_code)]

//! Frame storage.
//!
//! A [`Frame`] is one complete cell grid (one "page" of an animation or
//! composition). Cells are stored row-major in two parallel buffers:
//! `index = y * width + x` addresses a 32-bit codepoint in one and an
//! attribute word in the other.
//!
//! # Invariants
//!
//! 1. `chars.len() == attrs.len() == width * height`
//! 2. Dimensions never change except through the canvas resize engine,
//!    which reflows every frame of a canvas in the same call.

use cgrid_core::attr::Attr;
use cgrid_core::error::CanvasError;

/// Codepoint stored in cleared cells.
pub const BLANK: u32 = 0x20;

/// One cell grid of a canvas, with its own cursor, handle offset, fill
/// attribute, and display name.
///
/// The handle is a frame-local offset used by external compositing to align
/// frames when overlaid. The fill attribute is applied to every cell the
/// resize engine materializes while this frame grows.
#[derive(Debug, Clone)]
pub struct Frame {
    pub(crate) chars: Vec<u32>,
    pub(crate) attrs: Vec<Attr>,
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) cursor_x: i32,
    pub(crate) cursor_y: i32,
    pub(crate) handle_x: i32,
    pub(crate) handle_y: i32,
    pub(crate) fill_attr: Attr,
    pub(crate) name: String,
}

impl Frame {
    /// Allocate a blank frame. Dimensions must already be validated as
    /// non-negative by the caller.
    pub(crate) fn new(
        width: i32,
        height: i32,
        fill_attr: Attr,
        name: String,
    ) -> Result<Self, CanvasError> {
        debug_assert!(width >= 0 && height >= 0);
        let size = width as usize * height as usize;

        let mut chars: Vec<u32> = Vec::new();
        chars.try_reserve_exact(size)?;
        chars.resize(size, BLANK);

        let mut attrs: Vec<Attr> = Vec::new();
        attrs.try_reserve_exact(size)?;
        attrs.resize(size, fill_attr);

        Ok(Self {
            chars,
            attrs,
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
            handle_x: 0,
            handle_y: 0,
            fill_attr,
            name,
        })
    }

    /// Frame width in cells.
    #[inline]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Frame height in cells.
    #[inline]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the frame covers zero cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Raw codepoint buffer, row-major.
    #[inline]
    pub fn chars(&self) -> &[u32] {
        &self.chars
    }

    /// Raw attribute buffer, row-major.
    #[inline]
    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    /// Display name of the frame.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}
