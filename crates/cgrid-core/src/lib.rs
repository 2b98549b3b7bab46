#![forbid(unsafe_code)]

//! Primitives shared across the cgrid workspace: attribute words, the dirty
//! rectangle, the error taxonomy, and a caller-owned random generator.

pub mod attr;
pub mod dirty;
pub mod error;
pub mod rng;

pub use attr::{Attr, AttrFlags};
pub use dirty::DirtyRect;
pub use error::CanvasError;
pub use rng::Rng;
