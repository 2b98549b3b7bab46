#![forbid(unsafe_code)]

//! cgrid public facade crate.
//!
//! Re-exports the character-grid canvas engine's surface from the internal
//! crates and offers a lightweight prelude for day-to-day usage.
//!
//! ```
//! use cgrid::prelude::*;
//!
//! let mut canvas = Canvas::new(80, 24)?;
//! let idx = canvas.index(0, 0).unwrap();
//! canvas.chars_mut()[idx] = u32::from('*');
//! canvas.add_dirty_rect(0, 0, 0, 0);
//! # Ok::<(), CanvasError>(())
//! ```

// --- Core re-exports -------------------------------------------------------

pub use cgrid_core::attr::{Attr, AttrFlags};
pub use cgrid_core::dirty::DirtyRect;
pub use cgrid_core::error::CanvasError;
pub use cgrid_core::rng::Rng;

// --- Canvas re-exports -----------------------------------------------------

pub use cgrid_canvas::canvas::Canvas;
pub use cgrid_canvas::frame::{BLANK, Frame};
pub use cgrid_canvas::lock::ResizeGuard;

/// Common imports for applications driving a canvas.
pub mod prelude {
    pub use crate::{Attr, AttrFlags, Canvas, CanvasError, DirtyRect, ResizeGuard};
}
