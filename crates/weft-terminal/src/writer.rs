//! Writes diffs to the terminal.
//!
//! [`FrameWriter`] consumes a [`Diff`] cell by cell: move the cursor,
//! restyle when the brush changes, write the symbol. Output is flushed
//! once per frame, never per cell.

use weft_canvas::Diff;
use weft_core::{Brush, Color, Point, Result};

use crate::backend::Backend;

/// Applies frame diffs through a [`Backend`].
pub struct FrameWriter<B: Backend> {
    backend: B,
    /// Background substituted for cells whose brush leaves `bg` unset.
    ambient_bg: Option<Color>,
}

impl<B: Backend> FrameWriter<B> {
    /// Creates a writer over the given backend.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            ambient_bg: None,
        }
    }

    /// Returns the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the backend mutably.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Sets the ambient background color applied to background-defaulting
    /// cells.
    pub fn set_ambient_background(&mut self, color: Option<Color>) {
        self.ambient_bg = color;
    }

    /// Returns the ambient background color.
    pub fn ambient_background(&self) -> Option<Color> {
        self.ambient_bg
    }

    /// Writes every patch of a diff and flushes once.
    ///
    /// Consecutive patches sharing a brush keep the current style; a
    /// brush change resets and re-applies. An empty diff writes nothing.
    pub fn apply(&mut self, diff: &Diff) -> Result<()> {
        if diff.is_empty() {
            return Ok(());
        }

        self.backend.hide_cursor()?;
        let mut current: Option<Brush> = None;

        for patch in diff {
            let point = patch.point;
            if point.x < 0 || point.y < 0 {
                continue;
            }
            self.backend.move_cursor(point.x as u16, point.y as u16)?;

            let mut brush = patch.glyph.brush;
            if brush.bg.is_none() {
                brush.bg = self.ambient_bg;
            }

            if current != Some(brush) {
                self.backend.reset_style()?;
                self.backend.set_foreground(brush.fg)?;
                self.backend.set_background(brush.bg)?;
                self.backend.set_traits(brush.traits)?;
                current = Some(brush);
            }

            self.backend.write_symbol(patch.glyph.symbol)?;
        }

        self.backend.reset_style()?;
        self.backend.flush()?;
        tracing::trace!(cells = diff.len(), "frame written");
        Ok(())
    }

    /// Parks the physical cursor for the focused widget.
    ///
    /// `Some(point)` moves and shows the cursor at that global position;
    /// `None` hides it.
    pub fn place_cursor(&mut self, position: Option<Point>) -> Result<()> {
        match position {
            Some(point) if point.is_non_negative() => {
                self.backend.move_cursor(point.x as u16, point.y as u16)?;
                self.backend.show_cursor()?;
            }
            _ => {
                self.backend.hide_cursor()?;
            }
        }
        self.backend.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::TestBackend;
    use weft_canvas::Glyph;
    use weft_core::Area;

    fn writer() -> FrameWriter<TestBackend> {
        FrameWriter::new(TestBackend::new(Area::new(20, 5)))
    }

    #[test]
    fn test_empty_diff_writes_nothing() {
        let mut writer = writer();
        writer.apply(&Diff::new()).unwrap();
        assert!(writer.backend().ops().is_empty());
        assert_eq!(writer.backend().flushes(), 0);
    }

    #[test]
    fn test_apply_moves_writes_and_flushes_once() {
        let mut writer = writer();
        let mut diff = Diff::new();
        diff.push(Point::new(2, 1), Glyph::new('a'));
        diff.push(Point::new(3, 1), Glyph::new('b'));

        writer.apply(&diff).unwrap();

        let ops = writer.backend().ops();
        assert!(ops.contains(&"move 2,1".to_string()));
        assert!(ops.contains(&"move 3,1".to_string()));
        assert!(ops.contains(&"put a".to_string()));
        assert!(ops.contains(&"put b".to_string()));
        assert_eq!(writer.backend().flushes(), 1);
    }

    #[test]
    fn test_style_changes_only_when_brush_changes() {
        let mut writer = writer();
        let styled = Glyph::new('x').with_fg(Color::Red);
        let mut diff = Diff::new();
        diff.push(Point::new(0, 0), styled);
        diff.push(Point::new(1, 0), styled.with_symbol('y'));
        diff.push(Point::new(2, 0), Glyph::new('z').with_fg(Color::Green));

        writer.apply(&diff).unwrap();

        let fg_changes = writer
            .backend()
            .ops()
            .iter()
            .filter(|op| op.starts_with("fg "))
            .count();
        // One for the red pair, one for green.
        assert_eq!(fg_changes, 2);
    }

    #[test]
    fn test_ambient_background_substitution() {
        let mut writer = writer();
        writer.set_ambient_background(Some(Color::Blue));

        let mut diff = Diff::new();
        diff.push(Point::new(0, 0), Glyph::new('a')); // bg defaults
        diff.push(Point::new(1, 0), Glyph::new('b').with_bg(Color::Red));

        writer.apply(&diff).unwrap();

        let ops = writer.backend().ops();
        assert!(ops.contains(&"bg blue".to_string()));
        assert!(ops.contains(&"bg red".to_string()));
    }

    #[test]
    fn test_place_cursor() {
        let mut writer = writer();
        writer.place_cursor(Some(Point::new(4, 2))).unwrap();
        assert!(writer.backend().ops().contains(&"move 4,2".to_string()));
        assert!(writer.backend().ops().contains(&"show_cursor".to_string()));

        writer.backend_mut().reset();
        writer.place_cursor(None).unwrap();
        assert_eq!(writer.backend().ops(), &["hide_cursor"]);
    }
}
