//! Terminal backend, diff writer, and application loop for Weft.
//!
//! - [`Backend`]: the toolkit's view of a terminal (cursor, styled
//!   writes, raw-mode lifecycle), with [`CrosstermBackend`] for
//!   production and [`TestBackend`] for assertions
//! - [`FrameWriter`]: applies a frame [`Diff`](weft_canvas::Diff) with
//!   one flush per frame and parks the cursor on the focused widget
//! - [`InputReader`]: the blocking input thread feeding the event queue
//! - [`App`]: the drain → dispatch → solve → paint → diff → write loop

#![warn(missing_docs)]

mod app;
mod backend;
mod input;
mod writer;

pub use app::App;
pub use backend::{Backend, CrosstermBackend, TestBackend};
pub use input::InputReader;
pub use writer::FrameWriter;
