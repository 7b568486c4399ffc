//! Cell styling: colors plus rendering traits.
//!
//! A [`Brush`] carries the optional foreground/background colors and the
//! [`CellTraits`] bitset attached to a glyph. Brushes are small `Copy`
//! values; combining them is an explicit `merge`, never implicit state.
//!
//! # Examples
//!
//! ```
//! use weft_core::brush::{Brush, CellTraits};
//! use weft_core::color::Color;
//!
//! let error = Brush::new().fg(Color::Red).bold();
//! let highlight = Brush::new().bg(Color::Yellow);
//! let merged = error.merge(highlight);
//!
//! assert_eq!(merged.fg, Some(Color::Red));
//! assert_eq!(merged.bg, Some(Color::Yellow));
//! assert!(merged.traits.contains(CellTraits::BOLD));
//! ```

use crate::color::Color;
use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Rendering traits of a cell as a compact bitfield.
    ///
    /// Traits combine with bitwise operations:
    ///
    /// ```
    /// use weft_core::brush::CellTraits;
    ///
    /// let traits = CellTraits::BOLD | CellTraits::UNDERLINE;
    /// assert!(traits.contains(CellTraits::BOLD));
    /// assert!(!traits.contains(CellTraits::ITALIC));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellTraits: u8 {
        /// Bold/bright text.
        const BOLD      = 0b0000_0001;
        /// Italic text.
        const ITALIC    = 0b0000_0010;
        /// Underlined text.
        const UNDERLINE = 0b0000_0100;
        /// Standout (emphasized) text.
        const STANDOUT  = 0b0000_1000;
        /// Dim/faint text.
        const DIM       = 0b0001_0000;
        /// Inverse video (swap fg and bg colors).
        const INVERSE   = 0b0010_0000;
        /// Invisible text.
        const INVISIBLE = 0b0100_0000;
        /// Blinking text.
        const BLINK     = 0b1000_0000;
    }
}

impl fmt::Display for CellTraits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(CellTraits, &str); 8] = [
            (CellTraits::BOLD, "bold"),
            (CellTraits::ITALIC, "italic"),
            (CellTraits::UNDERLINE, "underline"),
            (CellTraits::STANDOUT, "standout"),
            (CellTraits::DIM, "dim"),
            (CellTraits::INVERSE, "inverse"),
            (CellTraits::INVISIBLE, "invisible"),
            (CellTraits::BLINK, "blink"),
        ];

        let mut first = true;
        for (flag, name) in NAMES {
            if self.contains(flag) {
                if !first {
                    write!(f, ", ")?;
                }
                first = false;
                write!(f, "{name}")?;
            }
        }
        if first {
            write!(f, "none")?;
        }
        Ok(())
    }
}

/// The styling attached to a glyph.
///
/// `None` colors mean "use the default": the terminal's own default, or
/// the screen's ambient background where one is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Brush {
    /// Foreground (text) color.
    pub fg: Option<Color>,
    /// Background color.
    pub bg: Option<Color>,
    /// Rendering traits.
    pub traits: CellTraits,
}

impl Brush {
    /// Creates an empty brush with no colors and no traits.
    #[inline]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            traits: CellTraits::empty(),
        }
    }

    /// Creates a brush with the given foreground and background colors.
    #[inline]
    pub const fn with_colors(fg: Color, bg: Color) -> Self {
        Self {
            fg: Some(fg),
            bg: Some(bg),
            traits: CellTraits::empty(),
        }
    }

    /// Returns `true` if this brush has no colors and no traits set.
    #[inline]
    pub const fn is_plain(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.traits.is_empty()
    }

    /// Sets the foreground color.
    #[inline]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    /// Sets the background color.
    #[inline]
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Adds the given traits.
    #[inline]
    pub const fn traits(mut self, traits: CellTraits) -> Self {
        self.traits = self.traits.union(traits);
        self
    }

    /// Adds the bold trait.
    #[inline]
    pub const fn bold(self) -> Self {
        self.traits(CellTraits::BOLD)
    }

    /// Adds the italic trait.
    #[inline]
    pub const fn italic(self) -> Self {
        self.traits(CellTraits::ITALIC)
    }

    /// Adds the underline trait.
    #[inline]
    pub const fn underline(self) -> Self {
        self.traits(CellTraits::UNDERLINE)
    }

    /// Adds the dim trait.
    #[inline]
    pub const fn dim(self) -> Self {
        self.traits(CellTraits::DIM)
    }

    /// Adds the inverse trait.
    #[inline]
    pub const fn inverse(self) -> Self {
        self.traits(CellTraits::INVERSE)
    }

    /// Merges another brush over this one.
    ///
    /// Colors from `other` win where set; traits are unioned.
    #[inline]
    pub fn merge(self, other: Self) -> Self {
        Self {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            traits: self.traits | other.traits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traits_combine() {
        let traits = CellTraits::BOLD | CellTraits::INVERSE | CellTraits::BLINK;
        assert!(traits.contains(CellTraits::BOLD));
        assert!(traits.contains(CellTraits::INVERSE));
        assert!(!traits.contains(CellTraits::DIM));
    }

    #[test]
    fn test_traits_display() {
        let traits = CellTraits::BOLD | CellTraits::ITALIC;
        assert_eq!(traits.to_string(), "bold, italic");
        assert_eq!(CellTraits::empty().to_string(), "none");
    }

    #[test]
    fn test_brush_builder() {
        let brush = Brush::new().fg(Color::Red).bg(Color::Black).bold();
        assert_eq!(brush.fg, Some(Color::Red));
        assert_eq!(brush.bg, Some(Color::Black));
        assert!(brush.traits.contains(CellTraits::BOLD));
        assert!(!brush.is_plain());
    }

    #[test]
    fn test_brush_merge() {
        let base = Brush::new().fg(Color::White).bg(Color::Black);
        let patch = Brush::new().fg(Color::Red).underline();

        let merged = base.merge(patch);
        assert_eq!(merged.fg, Some(Color::Red)); // from patch
        assert_eq!(merged.bg, Some(Color::Black)); // from base
        assert!(merged.traits.contains(CellTraits::UNDERLINE));
    }

    #[test]
    fn test_brush_default_is_plain() {
        assert!(Brush::default().is_plain());
        assert_eq!(Brush::default(), Brush::new());
    }
}
