//! Widget tree, events, focus, and dispatch for Weft.
//!
//! This crate is the structural heart of the toolkit:
//!
//! - [`WidgetTree`]: a slotmap arena of widgets; stable ids, no dangling
//!   parent pointers
//! - [`Widget`]: the behavior trait with default no-op hooks
//! - [`Event`] + [`EventQueue`]: the closed event model and the
//!   coalescing single-consumer queue with its cross-thread
//!   [`EventSender`]
//! - [`FocusManager`] and [`ShortcutRegistry`]
//! - [`paint_tree`] / [`Painter`]: border, wallpaper-masked background
//!   fill, and clipped widget painting
//! - [`RuntimeContext`]: everything above bundled into one explicit
//!   value, with the dispatch and delete/teardown protocols
//!
//! # Example
//!
//! ```
//! use weft_widgets::{NullWidget, Orientation, RuntimeContext};
//! use weft_layout::SizePolicy;
//! use weft_core::Rect;
//!
//! let mut ctx = RuntimeContext::new();
//! let root = ctx.add_root(Box::new(NullWidget));
//! {
//!     let node = ctx.tree.node_mut(root).unwrap();
//!     node.set_geometry(Rect::new(0, 0, 80, 24));
//!     node.set_box_layout(Some(Orientation::Horizontal));
//! }
//! let sidebar = ctx.add_widget(root, Box::new(NullWidget)).unwrap();
//! ctx.set_size_policies(sidebar, SizePolicy::fixed(20), SizePolicy::expanding(1));
//!
//! ctx.process_pending();
//! ctx.flush_layout();
//! assert_eq!(ctx.tree.node(sidebar).unwrap().geometry().width, 20);
//! ```

#![warn(missing_docs)]

pub mod border;
pub mod context;
pub mod cursor;
pub mod event;
pub mod focus;
pub mod keyboard;
pub mod mouse;
pub mod paint;
pub mod queue;
pub mod shortcuts;
pub mod tree;
pub mod widget;

pub use border::{Border, BorderSegment};
pub use context::{RuntimeContext, TeardownObserver};
pub use cursor::Cursor;
pub use event::{Event, EventKind, TimerId};
pub use focus::{FocusManager, FocusPolicy};
pub use keyboard::{KeyCode, KeyEvent, Modifiers};
pub use mouse::{MouseButton, WheelDirection};
pub use paint::{paint_tree, Painter};
pub use queue::{EventQueue, EventSender};
pub use shortcuts::{ShortcutAction, ShortcutId, ShortcutRegistry};
pub use tree::{Orientation, WidgetId, WidgetNode, WidgetTree};
pub use widget::{NullWidget, Widget, WidgetCtx, WidgetExt};

// Re-export the layout vocabulary widgets are configured with
pub use weft_layout::{PolicyKind, SizePolicy};
