#![forbid(unsafe_code)]

//! Style attribute words.
//!
//! Every cell carries one 32-bit attribute word next to its codepoint. The
//! canvas engine treats the word as opaque: colour encoding and anything
//! else above the low nibble belong to the drawing layer. Only the four
//! style bits have fixed positions, exposed through [`AttrFlags`].

use bitflags::bitflags;

/// Packed per-cell style attribute.
///
/// A `repr(transparent)` wrapper over the raw word so attribute buffers can
/// be handed to display drivers as-is.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Attr(u32);

impl Attr {
    /// The attribute applied to cells nobody has drawn yet.
    pub const DEFAULT: Attr = Attr(0);

    /// Wrap a raw attribute word.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw word for storage or driver hand-off.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Style bits of this attribute.
    #[inline]
    pub const fn flags(self) -> AttrFlags {
        AttrFlags::from_bits_truncate(self.0)
    }

    /// Replace the style bits, leaving the drawing-layer bits untouched.
    #[inline]
    pub const fn with_flags(self, flags: AttrFlags) -> Self {
        Self((self.0 & !AttrFlags::all().bits()) | flags.bits())
    }
}

impl core::fmt::Debug for Attr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Attr({:#010x})", self.0)
    }
}

bitflags! {
    /// Style bits occupying the low nibble of an [`Attr`] word.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AttrFlags: u32 {
        const BOLD      = 0x01;
        const ITALICS   = 0x02;
        const UNDERLINE = 0x04;
        const BLINK     = 0x08;
    }
}
