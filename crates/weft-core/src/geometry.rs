//! Geometry types for terminal layout and positioning.
//!
//! This module provides the geometry primitives used throughout Weft:
//! - [`Point`]: a 2D point with signed coordinates
//! - [`Area`]: a width/height pair in character cells
//! - [`Rect`]: a rectangle combining position and size
//!
//! The coordinate system places (0, 0) at the top-left corner, with x
//! growing to the right (columns) and y growing downward (rows).

use std::ops::{Add, AddAssign, Sub, SubAssign};

/// A 2D point with signed integer coordinates.
///
/// Points can be negative while a widget is positioned relative to a
/// parent that is itself partially off-screen.
///
/// # Examples
///
/// ```
/// use weft_core::geometry::Point;
///
/// let p1 = Point::new(10, 20);
/// let p2 = Point::new(5, 5);
/// assert_eq!(p1 + p2, Point::new(15, 25));
/// assert_eq!(p1 - p2, Point::new(5, 15));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// The x coordinate (column position).
    pub x: i32,
    /// The y coordinate (row position).
    pub y: i32,
}

impl Point {
    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Creates a new point at the given coordinates.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the point offset by the given amounts.
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Returns whether this point has non-negative coordinates.
    #[inline]
    pub const fn is_non_negative(self) -> bool {
        self.x >= 0 && self.y >= 0
    }
}

impl Add for Point {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x.saturating_add(rhs.x),
            y: self.y.saturating_add(rhs.y),
        }
    }
}

impl AddAssign for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Point {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x.saturating_sub(rhs.x),
            y: self.y.saturating_sub(rhs.y),
        }
    }
}

impl SubAssign for Point {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for (i32, i32) {
    #[inline]
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// A width/height pair in character cells.
///
/// Width counts columns and height counts rows.
///
/// # Examples
///
/// ```
/// use weft_core::geometry::Area;
///
/// let area = Area::new(80, 24);
/// assert_eq!(area.cells(), 1920);
/// assert!(!area.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Area {
    /// The width in columns.
    pub width: u16,
    /// The height in rows.
    pub height: u16,
}

impl Area {
    /// A zero-sized area.
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    /// Creates a new area with the given dimensions.
    #[inline]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Returns the total cell count (width × height).
    #[inline]
    pub const fn cells(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns whether either dimension is zero.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the area shrunk by the given amounts, saturating at zero.
    #[inline]
    pub const fn shrink(self, dw: u16, dh: u16) -> Self {
        Self {
            width: self.width.saturating_sub(dw),
            height: self.height.saturating_sub(dh),
        }
    }

    /// Returns whether this area can contain the other area.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.width >= other.width && self.height >= other.height
    }

    /// Returns the component-wise minimum of two areas.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self {
            width: self.width.min(other.width),
            height: self.height.min(other.height),
        }
    }
}

impl From<(u16, u16)> for Area {
    #[inline]
    fn from((width, height): (u16, u16)) -> Self {
        Self::new(width, height)
    }
}

impl From<Area> for (u16, u16) {
    #[inline]
    fn from(area: Area) -> Self {
        (area.width, area.height)
    }
}

/// A rectangle defined by its top-left corner and size.
///
/// The position can be negative for relative positioning; the size is
/// always non-negative.
///
/// ```text
/// (0,0) ──────► x
///   │
///   │
///   ▼
///   y
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// The x coordinate of the left edge.
    pub x: i32,
    /// The y coordinate of the top edge.
    pub y: i32,
    /// The width of the rectangle.
    pub width: u16,
    /// The height of the rectangle.
    pub height: u16,
}

impl Rect {
    /// A zero-sized rectangle at the origin.
    pub const ZERO: Self = Self {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    /// Creates a new rectangle at the given position with the given size.
    #[inline]
    pub const fn new(x: i32, y: i32, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle from a position point and area.
    #[inline]
    pub const fn from_point_area(origin: Point, area: Area) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: area.width,
            height: area.height,
        }
    }

    /// Creates a rectangle at the origin with the given area.
    #[inline]
    pub const fn from_area(area: Area) -> Self {
        Self {
            x: 0,
            y: 0,
            width: area.width,
            height: area.height,
        }
    }

    /// Returns the position (top-left corner) of the rectangle.
    #[inline]
    pub const fn position(self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }

    /// Returns the size of the rectangle.
    #[inline]
    pub const fn area(self) -> Area {
        Area {
            width: self.width,
            height: self.height,
        }
    }

    /// Returns the x coordinate of the left edge.
    #[inline]
    pub const fn left(self) -> i32 {
        self.x
    }

    /// Returns the y coordinate of the top edge.
    #[inline]
    pub const fn top(self) -> i32 {
        self.y
    }

    /// Returns the x coordinate of the right edge (exclusive).
    #[inline]
    pub const fn right(self) -> i32 {
        self.x.saturating_add(self.width as i32)
    }

    /// Returns the y coordinate of the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(self) -> i32 {
        self.y.saturating_add(self.height as i32)
    }

    /// Returns whether the rectangle has zero area.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns whether the rectangle contains the given point.
    #[inline]
    pub const fn contains_point(self, point: Point) -> bool {
        self.contains_xy(point.x, point.y)
    }

    /// Returns whether the rectangle contains the point at (x, y).
    #[inline]
    pub const fn contains_xy(self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Returns the intersection of this rectangle with another.
    ///
    /// Returns `None` if the rectangles do not intersect.
    #[inline]
    pub fn intersection(self, other: Self) -> Option<Self> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Self {
                x,
                y,
                width: (right - x) as u16,
                height: (bottom - y) as u16,
            })
        } else {
            None
        }
    }

    /// Returns the rectangle moved by the given offset.
    #[inline]
    pub const fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            width: self.width,
            height: self.height,
        }
    }

    /// Returns the rectangle with the given position.
    #[inline]
    pub const fn with_position(self, position: Point) -> Self {
        Self {
            x: position.x,
            y: position.y,
            width: self.width,
            height: self.height,
        }
    }

    /// Returns the rectangle with the given size.
    #[inline]
    pub const fn with_area(self, area: Area) -> Self {
        Self {
            x: self.x,
            y: self.y,
            width: area.width,
            height: area.height,
        }
    }

    /// Returns the rectangle inset by different amounts on each side.
    ///
    /// Dimensions clamp to zero when the insets do not fit.
    #[inline]
    pub const fn inset_sides(self, left: u16, top: u16, right: u16, bottom: u16) -> Self {
        let total_h = left as u32 + right as u32;
        let total_v = top as u32 + bottom as u32;

        let new_width = if (self.width as u32) > total_h {
            (self.width as u32 - total_h) as u16
        } else {
            0
        };
        let new_height = if (self.height as u32) > total_v {
            (self.height as u32 - total_v) as u16
        } else {
            0
        };

        Self {
            x: self.x.saturating_add(left as i32),
            y: self.y.saturating_add(top as i32),
            width: new_width,
            height: new_height,
        }
    }

    /// Converts a point in absolute coordinates to coordinates local to
    /// this rectangle.
    #[inline]
    pub const fn to_local(self, point: Point) -> Point {
        Point {
            x: point.x.saturating_sub(self.x),
            y: point.y.saturating_sub(self.y),
        }
    }

    /// Converts a point local to this rectangle to absolute coordinates.
    #[inline]
    pub const fn to_absolute(self, point: Point) -> Point {
        Point {
            x: point.x.saturating_add(self.x),
            y: point.y.saturating_add(self.y),
        }
    }

    /// Returns an iterator over all points in the rectangle, row by row.
    #[inline]
    pub fn points(self) -> impl Iterator<Item = Point> {
        let x_start = self.x;
        let x_end = self.right();
        (self.y..self.bottom()).flat_map(move |y| (x_start..x_end).map(move |x| Point::new(x, y)))
    }
}

impl From<Area> for Rect {
    #[inline]
    fn from(area: Area) -> Self {
        Self::from_area(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod point_tests {
        use super::*;

        #[test]
        fn test_point_arithmetic() {
            let p1 = Point::new(10, 20);
            let p2 = Point::new(5, 5);
            assert_eq!(p1 + p2, Point::new(15, 25));
            assert_eq!(p1 - p2, Point::new(5, 15));
        }

        #[test]
        fn test_point_offset() {
            let p = Point::new(10, 20);
            assert_eq!(p.offset(5, -3), Point::new(15, 17));
        }

        #[test]
        fn test_point_is_non_negative() {
            assert!(Point::new(0, 0).is_non_negative());
            assert!(!Point::new(-1, 0).is_non_negative());
            assert!(!Point::new(0, -1).is_non_negative());
        }
    }

    mod area_tests {
        use super::*;

        #[test]
        fn test_area_cells() {
            assert_eq!(Area::new(80, 24).cells(), 1920);
            assert_eq!(Area::ZERO.cells(), 0);
        }

        #[test]
        fn test_area_is_empty() {
            assert!(Area::new(0, 10).is_empty());
            assert!(Area::new(10, 0).is_empty());
            assert!(!Area::new(10, 10).is_empty());
        }

        #[test]
        fn test_area_shrink() {
            assert_eq!(Area::new(10, 20).shrink(3, 5), Area::new(7, 15));
            assert_eq!(Area::new(2, 2).shrink(5, 5), Area::ZERO);
        }

        #[test]
        fn test_area_contains() {
            assert!(Area::new(100, 100).contains(Area::new(50, 50)));
            assert!(!Area::new(50, 50).contains(Area::new(100, 100)));
        }
    }

    mod rect_tests {
        use super::*;

        #[test]
        fn test_rect_edges() {
            let r = Rect::new(10, 20, 80, 24);
            assert_eq!(r.left(), 10);
            assert_eq!(r.top(), 20);
            assert_eq!(r.right(), 90);
            assert_eq!(r.bottom(), 44);
        }

        #[test]
        fn test_rect_contains_point() {
            let r = Rect::new(10, 20, 80, 24);
            assert!(r.contains_point(Point::new(10, 20)));
            assert!(r.contains_point(Point::new(50, 30)));
            assert!(!r.contains_point(Point::new(90, 20))); // right edge is exclusive
            assert!(!r.contains_point(Point::new(10, 44))); // bottom edge is exclusive
        }

        #[test]
        fn test_rect_intersection() {
            let r1 = Rect::new(0, 0, 50, 50);
            let r2 = Rect::new(25, 25, 50, 50);
            assert_eq!(r1.intersection(r2), Some(Rect::new(25, 25, 25, 25)));

            let r3 = Rect::new(100, 100, 50, 50);
            assert_eq!(r1.intersection(r3), None);
        }

        #[test]
        fn test_rect_inset_sides() {
            let r = Rect::new(0, 0, 100, 100);
            assert_eq!(r.inset_sides(5, 10, 15, 20), Rect::new(5, 10, 80, 70));

            // Insets that swallow the rect clamp to zero size.
            let tiny = Rect::new(0, 0, 2, 2);
            assert!(tiny.inset_sides(1, 1, 1, 1).is_empty());
        }

        #[test]
        fn test_rect_local_absolute_round_trip() {
            let r = Rect::new(10, 20, 80, 24);
            let absolute = Point::new(50, 30);
            let local = r.to_local(absolute);
            assert_eq!(local, Point::new(40, 10));
            assert_eq!(r.to_absolute(local), absolute);
        }

        #[test]
        fn test_rect_points_iterator() {
            let r = Rect::new(0, 0, 3, 2);
            let points: Vec<Point> = r.points().collect();
            assert_eq!(
                points,
                vec![
                    Point::new(0, 0),
                    Point::new(1, 0),
                    Point::new(2, 0),
                    Point::new(0, 1),
                    Point::new(1, 1),
                    Point::new(2, 1),
                ]
            );
        }
    }
}
