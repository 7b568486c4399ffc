//! Weft: a terminal widget toolkit.
//!
//! A tree of rectangular widgets is laid out by a box-layout solver,
//! composited into a grid of styled cells, and only the changed cells are
//! written to the terminal each frame. Input, timers, and color animation
//! run on producer threads that feed one event queue per widget-owning
//! thread.
//!
//! This crate re-exports the member crates:
//!
//! - [`core`]: geometry, colors, brushes, errors
//! - [`canvas`]: glyphs, the cell grid, diffing, the screen buffer pair
//! - [`layout`]: size policies and the box solver
//! - [`widgets`]: the widget arena, events, focus, shortcuts, dispatch
//! - [`timers`]: timer loops and the dynamic-color engine
//! - [`terminal`]: backends, the frame writer, input, the app loop
//!
//! # Example
//!
//! ```no_run
//! use weft_tui::prelude::*;
//!
//! fn main() -> weft_tui::core::Result<()> {
//!     let mut app = App::new()?;
//!     let root = app.set_root(Box::new(NullWidget));
//!     {
//!         let ctx = app.context_mut();
//!         if let Some(node) = ctx.tree.node_mut(root) {
//!             node.set_box_layout(Some(Orientation::Horizontal));
//!             node.set_border(Some(Border::line()));
//!         }
//!     }
//!     app.run()
//! }
//! ```

pub use weft_canvas as canvas;
pub use weft_core as core;
pub use weft_layout as layout;
pub use weft_terminal as terminal;
pub use weft_timers as timers;
pub use weft_widgets as widgets;

/// The commonly used names in one import.
pub mod prelude {
    pub use weft_canvas::{Canvas, Diff, Glyph, ScreenBuffers};
    pub use weft_core::{Area, Brush, CellTraits, Color, Point, Rect};
    pub use weft_layout::{PolicyKind, SizePolicy};
    pub use weft_terminal::{App, Backend, CrosstermBackend};
    pub use weft_timers::{DynamicColorEngine, TimerHub};
    pub use weft_widgets::{
        Border, Cursor, Event, FocusPolicy, KeyCode, KeyEvent, Modifiers, MouseButton,
        NullWidget, Orientation, Painter, RuntimeContext, Widget, WidgetCtx, WidgetId,
    };
}
