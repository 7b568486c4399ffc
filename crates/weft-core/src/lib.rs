//! Core types and traits for Weft.
//!
//! This crate provides the shared vocabulary of the Weft terminal toolkit:
//!
//! - [`geometry`]: 2D primitives ([`Point`], [`Area`], [`Rect`])
//! - [`color`]: terminal colors (named, indexed, RGB)
//! - [`brush`]: cell styling ([`Brush`] + the [`CellTraits`] bitset)
//! - [`error`]: toolkit error types
//!
//! # Examples
//!
//! ```
//! use weft_core::{Brush, CellTraits, Color, Point, Rect};
//!
//! let title = Brush::new().fg(Color::Cyan).bold();
//! assert!(title.traits.contains(CellTraits::BOLD));
//!
//! let rect = Rect::new(10, 5, 60, 18);
//! assert!(rect.contains_point(Point::new(30, 10)));
//! ```

#![warn(missing_docs)]

pub mod brush;
pub mod color;
pub mod error;
pub mod geometry;

// Re-export commonly used types at the crate root for convenience
pub use brush::{Brush, CellTraits};
pub use color::Color;
pub use error::{Error, Result};
pub use geometry::{Area, Point, Rect};
