//! Per-widget keyboard cursor state.

use weft_core::Point;

/// Where a widget wants the physical terminal cursor.
///
/// The position is local to the widget's inner area. The terminal layer
/// shows the cursor of the focused widget when `enabled` is set, and hides
/// it otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Cursor position, local to the widget's inner area.
    pub position: Point,
    /// Whether the cursor should be visible while this widget is focused.
    pub enabled: bool,
}

impl Cursor {
    /// A disabled cursor at the origin.
    pub const HIDDEN: Self = Self {
        position: Point::ZERO,
        enabled: false,
    };

    /// Creates an enabled cursor at the given local position.
    #[inline]
    pub const fn at(position: Point) -> Self {
        Self {
            position,
            enabled: true,
        }
    }
}
