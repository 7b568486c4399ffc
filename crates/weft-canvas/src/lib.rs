//! Cell grid, double buffering, and diffing for Weft.
//!
//! This crate provides the composition layer of the toolkit:
//!
//! - [`Glyph`] - one styled character cell
//! - [`Canvas`] - a 2D grid of glyphs with checked and unchecked access
//! - [`Diff`] - the minimal set of cell patches between two frames
//! - [`ScreenBuffers`] - the current/next frame pair and its merge/diff
//!   operations
//!
//! # Architecture
//!
//! The per-frame pipeline:
//!
//! 1. Widgets paint into [`ScreenBuffers::next_mut`].
//! 2. [`ScreenBuffers::merge_and_diff`] folds the painted frame into
//!    `current` and yields the cells that actually changed.
//! 3. The terminal writer emits one move-and-write per patch and flushes
//!    once (handled by `weft-terminal`).
//!
//! After step 2, `current` is exactly what is (about to be) on the physical
//! terminal.

#![warn(missing_docs)]

mod canvas;
mod diff;
mod glyph;
mod screen;

pub use canvas::Canvas;
pub use diff::{CellPatch, Diff};
pub use glyph::Glyph;
pub use screen::ScreenBuffers;

// Re-export core types for convenience
pub use weft_core::{Area, Brush, CellTraits, Color, Point, Rect};
