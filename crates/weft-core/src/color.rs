//! Terminal cell colors.
//!
//! Weft models colors as the classic 16 named terminal colors plus 256-color
//! palette indices and 24-bit RGB. A cell with no color set falls back to the
//! terminal's (or the screen's ambient) default, so [`Color`] only appears
//! wrapped in `Option` inside a brush.

use std::fmt;

/// A terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// ANSI color 0.
    Black,
    /// ANSI color 1.
    Red,
    /// ANSI color 2.
    Green,
    /// ANSI color 3.
    Yellow,
    /// ANSI color 4.
    Blue,
    /// ANSI color 5.
    Magenta,
    /// ANSI color 6.
    Cyan,
    /// ANSI color 7.
    White,
    /// ANSI color 8 (bright black / gray).
    BrightBlack,
    /// ANSI color 9.
    BrightRed,
    /// ANSI color 10.
    BrightGreen,
    /// ANSI color 11.
    BrightYellow,
    /// ANSI color 12.
    BrightBlue,
    /// ANSI color 13.
    BrightMagenta,
    /// ANSI color 14.
    BrightCyan,
    /// ANSI color 15.
    BrightWhite,
    /// An index into the terminal's 256-color palette.
    Indexed(u8),
    /// A 24-bit RGB color.
    Rgb(u8, u8, u8),
}

impl Color {
    /// Creates a 24-bit RGB color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(r, g, b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Black => write!(f, "black"),
            Self::Red => write!(f, "red"),
            Self::Green => write!(f, "green"),
            Self::Yellow => write!(f, "yellow"),
            Self::Blue => write!(f, "blue"),
            Self::Magenta => write!(f, "magenta"),
            Self::Cyan => write!(f, "cyan"),
            Self::White => write!(f, "white"),
            Self::BrightBlack => write!(f, "bright-black"),
            Self::BrightRed => write!(f, "bright-red"),
            Self::BrightGreen => write!(f, "bright-green"),
            Self::BrightYellow => write!(f, "bright-yellow"),
            Self::BrightBlue => write!(f, "bright-blue"),
            Self::BrightMagenta => write!(f, "bright-magenta"),
            Self::BrightCyan => write!(f, "bright-cyan"),
            Self::BrightWhite => write!(f, "bright-white"),
            Self::Indexed(i) => write!(f, "indexed({i})"),
            Self::Rgb(r, g, b) => write!(f, "rgb({r}, {g}, {b})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_display() {
        assert_eq!(Color::Red.to_string(), "red");
        assert_eq!(Color::Indexed(42).to_string(), "indexed(42)");
        assert_eq!(Color::rgb(1, 2, 3).to_string(), "rgb(1, 2, 3)");
    }

    #[test]
    fn test_color_equality() {
        assert_eq!(Color::rgb(10, 20, 30), Color::Rgb(10, 20, 30));
        assert_ne!(Color::Red, Color::BrightRed);
    }
}
