#![forbid(unsafe_code)]

//! Exclusive canvas attachment.
//!
//! A display driver attaches to a canvas so it cannot be resized out from
//! under active rendering. At most one guard is attached at a time; while
//! attached, the public resize entry point asks the guard for approval
//! before touching any frame, and the canvas cannot be freed.

use std::rc::Rc;

use cgrid_core::error::CanvasError;

use crate::canvas::Canvas;

/// Resize-veto capability held by an attached driver.
///
/// `approve` is invoked synchronously from inside [`Canvas::set_size`]. It
/// is ordinary external code running mid-call: it must not mutate or free
/// the canvas it guards. Guards needing interior state use `Cell`/`RefCell`.
pub trait ResizeGuard {
    /// Return `false` to refuse the requested dimensions.
    fn approve(&self, width: i32, height: i32) -> bool;
}

impl Canvas {
    /// Attach a guard, granting it exclusive management of this canvas.
    ///
    /// # Errors
    ///
    /// `Busy` if a guard is already attached.
    pub fn manage(&mut self, guard: Rc<dyn ResizeGuard>) -> Result<(), CanvasError> {
        if self.guard.is_some() {
            return Err(CanvasError::Busy);
        }
        self.guard = Some(guard);
        #[cfg(feature = "tracing")]
        tracing::trace!("canvas managed");
        Ok(())
    }

    /// Detach the managing guard.
    ///
    /// The supplied guard must be the same object that was passed to
    /// [`Canvas::manage`], so an unrelated caller cannot release someone
    /// else's lock.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the canvas is not managed or the guard does not
    /// match; the lock state is left unchanged.
    pub fn unmanage(&mut self, guard: &Rc<dyn ResizeGuard>) -> Result<(), CanvasError> {
        match &self.guard {
            Some(held) if Rc::ptr_eq(held, guard) => {
                self.guard = None;
                #[cfg(feature = "tracing")]
                tracing::trace!("canvas unmanaged");
                Ok(())
            }
            _ => Err(CanvasError::InvalidArgument),
        }
    }

    /// Whether a guard is currently attached.
    #[inline]
    pub fn is_managed(&self) -> bool {
        self.guard.is_some()
    }

    /// Consume the canvas, releasing every frame.
    ///
    /// # Errors
    ///
    /// `Busy` while a guard is attached; the canvas is handed back so the
    /// caller can unmanage it first.
    pub fn free(self) -> Result<(), (CanvasError, Canvas)> {
        if self.is_managed() {
            return Err((CanvasError::Busy, self));
        }
        Ok(())
    }
}
