#![forbid(unsafe_code)]

//! In-place canvas resize.
//!
//! Reflows every frame of a canvas when its dimensions change, preserving
//! the surviving top-left content and filling newly exposed cells with the
//! space codepoint and each frame's fill attribute.
//!
//! # Ordering
//!
//! Storage grows before any data moves and shrinks only after all moves,
//! so row shifts never touch unallocated memory and never discard cells
//! that still have to be relocated. Row relocation order depends on how the
//! stride changes: bottom-up when the width grows (the destination of row
//! `y` overlaps the source of row `y`), top-down from row 1 when it shrinks
//! (the destination always trails the source; row 0 starts at offset 0 and
//! needs no move).

use cgrid_core::error::CanvasError;

use crate::canvas::Canvas;
use crate::frame::BLANK;

impl Canvas {
    /// Set the canvas dimensions, asking the managing guard first.
    ///
    /// Contents are preserved to the extent of the new size; newly exposed
    /// cells on the right and at the bottom are filled with spaces and each
    /// frame's fill attribute. Every frame's cursor is clamped into the new
    /// bounds.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if either dimension is negative. `Busy` if the
    /// attached guard refuses the new size; dimensions are unchanged.
    /// `OutOfMemory` if an allocation fails mid-reflow — frames already
    /// resized are not rolled back, and the canvas must be discarded.
    pub fn set_size(&mut self, width: i32, height: i32) -> Result<(), CanvasError> {
        if width < 0 || height < 0 {
            return Err(CanvasError::InvalidArgument);
        }
        if let Some(guard) = &self.guard {
            if !guard.approve(width, height) {
                return Err(CanvasError::Busy);
            }
        }
        self.resize_in_place(width, height)
    }

    /// Resize without consulting the managing guard.
    ///
    /// The privileged counterpart of [`Canvas::set_size`] for programmatic
    /// resizes the attached driver itself requested, such as content
    /// import replacing the whole canvas.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` on negative dimensions; `OutOfMemory` as for
    /// [`Canvas::set_size`].
    pub fn resize_unchecked(&mut self, width: i32, height: i32) -> Result<(), CanvasError> {
        if width < 0 || height < 0 {
            return Err(CanvasError::InvalidArgument);
        }
        self.resize_in_place(width, height)
    }

    fn resize_in_place(&mut self, width: i32, height: i32) -> Result<(), CanvasError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "resize",
            old_width = self.width,
            old_height = self.height,
            width,
            height
        );
        #[cfg(feature = "tracing")]
        let _guard = _span.enter();

        let old_width = self.width;
        let old_height = self.height;
        let old_size = old_width as usize * old_height as usize;
        let new_size = width as usize * height as usize;

        self.save_frame_info();
        self.width = width;
        self.height = height;

        // Step 1: grow every buffer before any data moves.
        if new_size > old_size {
            for frame in &mut self.frames {
                let fill = frame.fill_attr;
                frame.chars.try_reserve_exact(new_size - old_size)?;
                frame.chars.resize(new_size, BLANK);
                frame.attrs.try_reserve_exact(new_size - old_size)?;
                frame.attrs.resize(new_size, fill);
            }
        }

        // Step 2: move row data where the stride changed.
        let w_old = old_width as usize;
        let w_new = width as usize;
        let rows = old_height.min(height) as usize;
        if width == old_width {
            // Stride unchanged, rows are already in place.
        } else if width > old_width {
            for frame in &mut self.frames {
                let fill = frame.fill_attr;
                for y in (0..rows).rev() {
                    let src = y * w_old;
                    let dst = y * w_new;
                    frame.chars.copy_within(src..src + w_old, dst);
                    frame.attrs.copy_within(src..src + w_old, dst);
                    frame.chars[dst + w_old..dst + w_new].fill(BLANK);
                    frame.attrs[dst + w_old..dst + w_new].fill(fill);
                }
            }
            self.add_dirty_rect(old_width, width - 1, 0, old_height - 1);
        } else {
            // Row 0 starts at offset 0 in both strides.
            for frame in &mut self.frames {
                for y in 1..rows {
                    let src = y * w_old;
                    let dst = y * w_new;
                    frame.chars.copy_within(src..src + w_new, dst);
                    frame.attrs.copy_within(src..src + w_new, dst);
                }
            }
        }

        // Step 3: fill the newly exposed bottom rows.
        if height > old_height {
            let start = old_height as usize * w_new;
            for frame in &mut self.frames {
                let fill = frame.fill_attr;
                frame.chars[start..new_size].fill(BLANK);
                frame.attrs[start..new_size].fill(fill);
            }
            self.add_dirty_rect(0, width - 1, old_height, height - 1);
        }

        // The union of the two edge rectangles already covers the corner;
        // mark it anyway so a tracker keeping more than one rectangle
        // stays correct.
        if width > old_width && height > old_height {
            self.add_dirty_rect(old_width, width - 1, old_height, height - 1);
        }

        // Step 4: shrink storage only once every move has happened.
        if new_size < old_size {
            for frame in &mut self.frames {
                frame.chars.truncate(new_size);
                frame.chars.shrink_to_fit();
                frame.attrs.truncate(new_size);
                frame.attrs.shrink_to_fit();
            }
        }

        for frame in &mut self.frames {
            frame.cursor_x = frame.cursor_x.min(width);
            frame.cursor_y = frame.cursor_y.min(height);
            frame.width = width;
            frame.height = height;
        }

        // Re-normalize against the new bounds: an untouched empty rectangle
        // keeps the old canonical encoding, and a shrink can leave a
        // previously valid rectangle sticking out of the canvas.
        self.dirty = self.dirty.normalized(width, height);

        self.load_frame_info();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgrid_core::attr::Attr;
    use cgrid_core::dirty::DirtyRect;

    /// Distinct codepoint per cell so relocation mistakes are visible.
    fn pattern(canvas: &mut Canvas) {
        let width = canvas.width();
        let height = canvas.height();
        for y in 0..height {
            for x in 0..width {
                let idx = canvas.index(x, y).unwrap();
                canvas.chars_mut()[idx] = 0x100 + (y * width + x) as u32;
                canvas.attrs_mut()[idx] = Attr::from_raw((y * width + x) as u32);
            }
        }
    }

    fn assert_pattern(canvas: &Canvas, width: i32, orig_width: i32, orig_height: i32) {
        for y in 0..orig_height.min(canvas.height()) {
            for x in 0..orig_width.min(canvas.width()) {
                let idx = (y * width + x) as usize;
                let expected = (y * orig_width + x) as u32;
                assert_eq!(canvas.chars()[idx], 0x100 + expected, "char at ({x},{y})");
                assert_eq!(canvas.attrs()[idx], Attr::from_raw(expected), "attr at ({x},{y})");
            }
        }
    }

    #[test]
    fn negative_dimensions_are_rejected() {
        let mut canvas = Canvas::new(4, 4).unwrap();
        assert_eq!(canvas.set_size(-1, 4).unwrap_err(), CanvasError::InvalidArgument);
        assert_eq!(canvas.set_size(4, -1).unwrap_err(), CanvasError::InvalidArgument);
        assert_eq!(canvas.resize_unchecked(-1, -1).unwrap_err(), CanvasError::InvalidArgument);
        assert_eq!((canvas.width(), canvas.height()), (4, 4));
    }

    #[test]
    fn grow_width_preserves_rows_and_fills_tails() {
        let mut canvas = Canvas::new(3, 2).unwrap();
        pattern(&mut canvas);
        canvas.set_fill_attr(Attr::from_raw(0xAB00));

        canvas.set_size(5, 2).unwrap();
        assert_pattern(&canvas, 5, 3, 2);
        for y in 0..2 {
            for x in 3..5 {
                let idx = (y * 5 + x) as usize;
                assert_eq!(canvas.chars()[idx], BLANK);
                assert_eq!(canvas.attrs()[idx], Attr::from_raw(0xAB00));
            }
        }
    }

    #[test]
    fn grow_height_fills_bottom() {
        let mut canvas = Canvas::new(3, 2).unwrap();
        pattern(&mut canvas);
        canvas.set_fill_attr(Attr::from_raw(0x7));

        canvas.set_size(3, 4).unwrap();
        assert_pattern(&canvas, 3, 3, 2);
        for idx in 6..12 {
            assert_eq!(canvas.chars()[idx], BLANK);
            assert_eq!(canvas.attrs()[idx], Attr::from_raw(0x7));
        }
    }

    #[test]
    fn grow_both_dimensions() {
        let mut canvas = Canvas::new(3, 2).unwrap();
        pattern(&mut canvas);
        canvas.set_size(6, 5).unwrap();
        assert_pattern(&canvas, 6, 3, 2);
        // Everything outside the old extent is blank.
        for y in 0..5 {
            for x in 0..6 {
                if x >= 3 || y >= 2 {
                    assert_eq!(canvas.chars()[(y * 6 + x) as usize], BLANK);
                }
            }
        }
    }

    #[test]
    fn shrink_width_keeps_left_columns() {
        let mut canvas = Canvas::new(5, 3).unwrap();
        pattern(&mut canvas);
        canvas.set_size(2, 3).unwrap();
        assert_pattern(&canvas, 2, 5, 3);
        assert_eq!(canvas.chars().len(), 6);
    }

    #[test]
    fn shrink_then_grow_back_keeps_retained_region() {
        let mut canvas = Canvas::new(6, 4).unwrap();
        pattern(&mut canvas);
        canvas.set_size(4, 2).unwrap();
        canvas.set_size(6, 4).unwrap();
        // Only the surviving 4x2 region is guaranteed.
        for y in 0..2 {
            for x in 0..4 {
                let idx = (y * 6 + x) as usize;
                assert_eq!(canvas.chars()[idx], 0x100 + (y * 6 + x) as u32);
            }
        }
    }

    #[test]
    fn same_area_reshape() {
        // 4x3 -> 3x4 and back: no storage change, stride moves only.
        let mut canvas = Canvas::new(4, 3).unwrap();
        pattern(&mut canvas);
        canvas.set_size(3, 4).unwrap();
        assert_pattern(&canvas, 3, 4, 3);
        assert_eq!(canvas.chars().len(), 12);
    }

    #[test]
    fn resize_from_zero_by_zero() {
        let mut canvas = Canvas::new(0, 0).unwrap();
        canvas.set_size(4, 3).unwrap();
        assert_eq!(canvas.chars().len(), 12);
        assert!(canvas.chars().iter().all(|&c| c == BLANK));
        // The whole canvas is newly exposed.
        assert_eq!(canvas.dirty_rect(), DirtyRect::new(0, 3, 0, 2));
    }

    #[test]
    fn resize_to_zero() {
        let mut canvas = Canvas::new(4, 3).unwrap();
        pattern(&mut canvas);
        canvas.set_size(0, 0).unwrap();
        assert_eq!(canvas.chars().len(), 0);
        canvas.set_size(2, 2).unwrap();
        assert_eq!(canvas.chars().len(), 4);
        assert!(canvas.chars().iter().all(|&c| c == BLANK));
    }

    #[test]
    fn all_frames_resize_together() {
        let mut canvas = Canvas::new(3, 3).unwrap();
        canvas.create_frame(1).unwrap();
        canvas.create_frame(2).unwrap();
        canvas.set_size(7, 5).unwrap();
        for i in 0..canvas.frame_count() {
            let frame = canvas.frame(i).unwrap();
            assert_eq!(frame.width(), 7);
            assert_eq!(frame.height(), 5);
            assert_eq!(frame.len(), 35);
        }
    }

    #[test]
    fn inactive_frame_content_is_reflowed() {
        let mut canvas = Canvas::new(3, 2).unwrap();
        canvas.create_frame(1).unwrap();
        canvas.set_active_frame(1).unwrap();
        pattern(&mut canvas);
        canvas.set_active_frame(0).unwrap();

        canvas.set_size(5, 4).unwrap();

        canvas.set_active_frame(1).unwrap();
        assert_pattern(&canvas, 5, 3, 2);
    }

    #[test]
    fn per_frame_fill_attr_is_used() {
        let mut canvas = Canvas::new(2, 2).unwrap();
        canvas.set_fill_attr(Attr::from_raw(0x1));
        canvas.create_frame(1).unwrap();
        canvas.set_active_frame(1).unwrap();
        canvas.set_fill_attr(Attr::from_raw(0x2));
        canvas.set_active_frame(0).unwrap();

        canvas.set_size(4, 2).unwrap();

        assert_eq!(canvas.attrs()[2], Attr::from_raw(0x1));
        canvas.set_active_frame(1).unwrap();
        assert_eq!(canvas.attrs()[2], Attr::from_raw(0x2));
    }

    #[test]
    fn cursor_clamps_into_new_bounds() {
        let mut canvas = Canvas::new(20, 10).unwrap();
        canvas.set_cursor(11, 9);
        canvas.set_size(10, 5).unwrap();
        assert_eq!(canvas.cursor(), (10, 5));
    }

    #[test]
    fn dirty_marks_growth_edges() {
        let mut canvas = Canvas::new(4, 3).unwrap();
        canvas.set_size(6, 5).unwrap();
        // Right columns, bottom rows, and the corner union.
        assert_eq!(canvas.dirty_rect(), DirtyRect::new(0, 5, 0, 4));
    }

    #[test]
    fn dirty_marks_width_growth_only() {
        let mut canvas = Canvas::new(4, 3).unwrap();
        canvas.set_size(6, 3).unwrap();
        assert_eq!(canvas.dirty_rect(), DirtyRect::new(4, 5, 0, 2));
    }

    #[test]
    fn dirty_marks_height_growth_only() {
        let mut canvas = Canvas::new(4, 3).unwrap();
        canvas.set_size(4, 5).unwrap();
        assert_eq!(canvas.dirty_rect(), DirtyRect::new(0, 3, 3, 4));
    }

    #[test]
    fn shrink_leaves_dirty_empty() {
        let mut canvas = Canvas::new(6, 6).unwrap();
        canvas.set_size(3, 3).unwrap();
        assert!(canvas.dirty_rect().is_empty());
        assert_eq!(canvas.dirty_rect(), DirtyRect::empty(3, 3));
    }

    #[test]
    fn width_grow_height_shrink() {
        let mut canvas = Canvas::new(3, 4).unwrap();
        pattern(&mut canvas);
        canvas.set_fill_attr(Attr::from_raw(0xC));
        canvas.set_size(5, 2).unwrap();
        assert_pattern(&canvas, 5, 3, 2);
        for y in 0..2 {
            for x in 3..5 {
                assert_eq!(canvas.chars()[(y * 5 + x) as usize], BLANK);
            }
        }
        // Dirty covers the new right columns over the surviving rows.
        assert_eq!(canvas.dirty_rect(), DirtyRect::new(3, 4, 0, 1));
    }

    mod property {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn resize_preserves_top_left_region(
                w in 1i32..16,
                h in 1i32..16,
                w2 in 0i32..20,
                h2 in 0i32..20,
            ) {
                let mut canvas = Canvas::new(w, h).unwrap();
                pattern(&mut canvas);
                canvas.set_size(w2, h2).unwrap();

                prop_assert_eq!(canvas.chars().len(), (w2 * h2) as usize);
                prop_assert_eq!(canvas.attrs().len(), (w2 * h2) as usize);
                for y in 0..h.min(h2) {
                    for x in 0..w.min(w2) {
                        let idx = (y * w2 + x) as usize;
                        prop_assert_eq!(canvas.chars()[idx], 0x100 + (y * w + x) as u32);
                    }
                }
            }

            #[test]
            fn exposed_cells_are_blank_with_fill_attr(
                w in 1i32..12,
                h in 1i32..12,
                grow_x in 0i32..8,
                grow_y in 0i32..8,
            ) {
                let mut canvas = Canvas::new(w, h).unwrap();
                pattern(&mut canvas);
                canvas.set_fill_attr(Attr::from_raw(0xF00D));
                let (w2, h2) = (w + grow_x, h + grow_y);
                canvas.set_size(w2, h2).unwrap();

                for y in 0..h2 {
                    for x in 0..w2 {
                        if x >= w || y >= h {
                            let idx = (y * w2 + x) as usize;
                            prop_assert_eq!(canvas.chars()[idx], BLANK);
                            prop_assert_eq!(canvas.attrs()[idx], Attr::from_raw(0xF00D));
                        }
                    }
                }
            }

            #[test]
            fn dirty_rect_stays_legal_across_resizes(
                w in 0i32..16,
                h in 0i32..16,
                sizes in proptest::collection::vec((0i32..16, 0i32..16), 1..6),
            ) {
                let mut canvas = Canvas::new(w, h).unwrap();
                for (w2, h2) in sizes {
                    canvas.set_size(w2, h2).unwrap();
                    let dirty = canvas.dirty_rect();
                    if !dirty.is_empty() {
                        prop_assert!(dirty.xmin >= 0 && dirty.xmax < canvas.width());
                        prop_assert!(dirty.ymin >= 0 && dirty.ymax < canvas.height());
                    }
                }
            }
        }
    }
}
