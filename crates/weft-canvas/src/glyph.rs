//! A single styled display cell.

use weft_core::{Brush, Color};

/// One character cell on the screen: a symbol plus its brush.
///
/// Glyphs compare by value (symbol and brush), which is what the diff
/// engine relies on. A placed glyph only changes through explicit
/// overwrite.
///
/// # Examples
///
/// ```
/// use weft_canvas::Glyph;
/// use weft_core::{Brush, Color};
///
/// let cell = Glyph::new('A').with_brush(Brush::new().fg(Color::Green).bold());
/// assert_eq!(cell.symbol, 'A');
/// assert_eq!(Glyph::default().symbol, ' ');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Glyph {
    /// The character displayed in this cell.
    pub symbol: char,
    /// The styling of this cell.
    pub brush: Brush,
}

impl Default for Glyph {
    fn default() -> Self {
        Self::BLANK
    }
}

impl Glyph {
    /// The default cell: a space with no styling.
    pub const BLANK: Self = Self {
        symbol: ' ',
        brush: Brush::new(),
    };

    /// Creates a glyph with the given symbol and no styling.
    #[inline]
    pub const fn new(symbol: char) -> Self {
        Self {
            symbol,
            brush: Brush::new(),
        }
    }

    /// Creates a glyph with the given symbol and brush.
    #[inline]
    pub const fn styled(symbol: char, brush: Brush) -> Self {
        Self { symbol, brush }
    }

    /// Sets the symbol.
    #[inline]
    pub const fn with_symbol(self, symbol: char) -> Self {
        Self { symbol, ..self }
    }

    /// Sets the brush.
    #[inline]
    pub const fn with_brush(self, brush: Brush) -> Self {
        Self { brush, ..self }
    }

    /// Sets the foreground color.
    #[inline]
    pub const fn with_fg(mut self, fg: Color) -> Self {
        self.brush = self.brush.fg(fg);
        self
    }

    /// Sets the background color.
    #[inline]
    pub const fn with_bg(mut self, bg: Color) -> Self {
        self.brush = self.brush.bg(bg);
        self
    }

    /// Returns `true` if this is the default blank cell.
    #[inline]
    pub fn is_blank(&self) -> bool {
        *self == Self::BLANK
    }
}

impl From<char> for Glyph {
    #[inline]
    fn from(symbol: char) -> Self {
        Self::new(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_default() {
        let g = Glyph::default();
        assert_eq!(g.symbol, ' ');
        assert!(g.brush.is_plain());
        assert!(g.is_blank());
    }

    #[test]
    fn test_glyph_builder() {
        let g = Glyph::new('X').with_fg(Color::Red).with_bg(Color::Blue);
        assert_eq!(g.symbol, 'X');
        assert_eq!(g.brush.fg, Some(Color::Red));
        assert_eq!(g.brush.bg, Some(Color::Blue));
        assert!(!g.is_blank());
    }

    #[test]
    fn test_glyph_value_equality() {
        let a = Glyph::new('A').with_fg(Color::Red);
        let b = Glyph::new('A').with_fg(Color::Red);
        assert_eq!(a, b);
        assert_ne!(a, a.with_symbol('B'));
        assert_ne!(a, a.with_fg(Color::Green));
    }
}
