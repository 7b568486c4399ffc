//! The two-generation screen buffer pair and its merge/diff operations.
//!
//! [`ScreenBuffers`] holds two canvases of identical area:
//!
//! - **current**: what is on the physical terminal
//! - **next**: what widgets just painted
//!
//! After a paint pass, [`merge_and_diff`](ScreenBuffers::merge_and_diff)
//! folds `next` into `current` while collecting the minimal patch set; the
//! terminal writer consumes that patch set and nothing else. `next` is
//! never read by the writer directly.

use weft_core::{Area, Color, Point};

use crate::{Canvas, Diff};

/// Double-buffered screen state: the composited frame pair.
///
/// # Examples
///
/// ```
/// use weft_canvas::{Glyph, ScreenBuffers};
/// use weft_core::{Area, Point};
///
/// let mut screen = ScreenBuffers::new(Area::new(20, 5));
/// screen.merge(); // first frame: current == next
///
/// screen.next_mut().set(Point::new(3, 1), Glyph::new('w')).unwrap();
/// let diff = screen.merge_and_diff();
/// assert_eq!(diff.len(), 1);
/// assert!(screen.merge_and_diff().is_empty()); // idempotent
/// ```
#[derive(Debug, Clone)]
pub struct ScreenBuffers {
    /// The frame that matches the physical terminal.
    current: Canvas,
    /// The frame widgets paint into.
    next: Canvas,
    /// Whether the next flush must rewrite every cell (first frame,
    /// resize, or ANSI ground-truth loss).
    force_full: bool,
}

impl ScreenBuffers {
    /// Creates a buffer pair of the given area, both blank.
    pub fn new(area: Area) -> Self {
        Self {
            current: Canvas::new(area),
            next: Canvas::new(area),
            force_full: true,
        }
    }

    /// Returns the buffer dimensions.
    #[inline]
    pub const fn area(&self) -> Area {
        self.current.area()
    }

    /// Returns the frame matching the physical terminal.
    #[inline]
    pub fn current(&self) -> &Canvas {
        &self.current
    }

    /// Returns the frame widgets paint into.
    #[inline]
    pub fn next(&self) -> &Canvas {
        &self.next
    }

    /// Returns the paint target mutably.
    #[inline]
    pub fn next_mut(&mut self) -> &mut Canvas {
        &mut self.next
    }

    /// Copies `next` into `current` without producing a diff.
    ///
    /// Used at startup and for full redraws, when the whole frame is
    /// about to be written anyway (via
    /// [`generate_full_diff`](Self::generate_full_diff)). Clears any
    /// pending full-redraw request, since the caller is rewriting the
    /// terminal wholesale.
    pub fn merge(&mut self) {
        self.current = self.next.clone();
        self.force_full = false;
    }

    /// Folds `next` into `current` and returns the minimal patch set.
    ///
    /// Runs in O(cells) with no allocation beyond the returned diff. When a
    /// full redraw is pending (first frame or after
    /// [`resize`](Self::resize) / [`force_full_redraw`](Self::force_full_redraw)),
    /// this merges and returns a full-frame diff instead.
    pub fn merge_and_diff(&mut self) -> Diff {
        if self.force_full {
            self.merge();
            return self.generate_full_diff();
        }

        let width = self.current.width();
        let height = self.current.height();
        // Most frames touch a small fraction of the screen.
        let mut diff = Diff::with_capacity(self.current.area().cells() / 8);

        for y in 0..height {
            for x in 0..width {
                // SAFETY: x and y are bounded by the loop ranges, and both
                // canvases share one area by construction.
                let next = unsafe { *self.next.get_unchecked(x, y) };
                let current = unsafe { self.current.get_unchecked(x, y) };

                if next != *current {
                    diff.push(Point::new(x as i32, y as i32), next);
                    unsafe {
                        self.current.set_unchecked(x, y, next);
                    }
                }
            }
        }

        diff
    }

    /// Returns patches for every cell whose brush defaults to the ambient
    /// background.
    ///
    /// Used when only the ambient background color changes (palette swap):
    /// the emitted glyphs carry the new color so the writer can restyle
    /// those cells, while `current` keeps its background-defaulting brushes
    /// and widgets never repaint.
    pub fn generate_color_diff(&self, background: Color) -> Diff {
        let width = self.current.width();
        let height = self.current.height();
        let mut diff = Diff::new();

        for y in 0..height {
            for x in 0..width {
                // SAFETY: bounded by the loop ranges.
                let glyph = unsafe { *self.current.get_unchecked(x, y) };
                if glyph.brush.bg.is_none() {
                    diff.push(Point::new(x as i32, y as i32), glyph.with_bg(background));
                }
            }
        }

        diff
    }

    /// Returns a patch for every cell of `current`.
    ///
    /// Used for a full terminal refresh: the first frame, after a resize,
    /// or when the terminal's contents can no longer be trusted.
    pub fn generate_full_diff(&self) -> Diff {
        let width = self.current.width();
        let height = self.current.height();
        let mut diff = Diff::with_capacity(self.current.area().cells());

        for y in 0..height {
            for x in 0..width {
                // SAFETY: bounded by the loop ranges.
                let glyph = unsafe { *self.current.get_unchecked(x, y) };
                diff.push(Point::new(x as i32, y as i32), glyph);
            }
        }

        diff
    }

    /// Resizes both canvases to the same new area.
    ///
    /// Cells outside the new bounds are dropped and newly exposed cells are
    /// blank. The next merge produces a full diff, since resize loses the
    /// terminal's ground truth.
    pub fn resize(&mut self, area: Area) {
        if area == self.area() {
            return;
        }
        self.current.resize(area);
        self.next.resize(area);
        self.force_full = true;
    }

    /// Forces the next merge to produce a full-frame diff.
    #[inline]
    pub fn force_full_redraw(&mut self) {
        self.force_full = true;
    }

    /// Returns whether the next merge will produce a full-frame diff.
    #[inline]
    pub const fn needs_full_redraw(&self) -> bool {
        self.force_full
    }
}
