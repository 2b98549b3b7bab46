#![forbid(unsafe_code)]

//! Canvas kernel: frame storage, the frame collection, in-place resize,
//! dirty-rectangle tracking, and the exclusive attachment protocol.

pub mod canvas;
pub mod frame;
pub mod lock;

mod resize;

pub use canvas::Canvas;
pub use frame::{BLANK, Frame};
pub use lock::ResizeGuard;
