//! The closed event model.
//!
//! Every state change in the toolkit travels as an [`Event`]: a tagged
//! variant carrying its receiving widget plus variant-specific payload.
//! Events are transient values — created by a producer (input thread,
//! timer loop, or a widget handler) and consumed exactly once by the
//! dispatcher.

use weft_core::{Area, Point};

use crate::keyboard::KeyEvent;
use crate::mouse::{MouseButton, WheelDirection};
use crate::tree::WidgetId;
use crate::Modifiers;

/// Identifies a timer registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

impl TimerId {
    /// Creates a timer id from its raw value.
    #[inline]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw id value.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// An event addressed to one widget.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Request a repaint of the widget's subtree.
    Paint {
        /// The receiving widget.
        widget: WidgetId,
    },
    /// A key was pressed.
    KeyPress {
        /// The receiving widget.
        widget: WidgetId,
        /// The pressed key.
        key: KeyEvent,
    },
    /// A key was released.
    KeyRelease {
        /// The receiving widget.
        widget: WidgetId,
        /// The released key.
        key: KeyEvent,
    },
    /// A mouse button was pressed.
    MousePress {
        /// The receiving widget.
        widget: WidgetId,
        /// The pressed button.
        button: MouseButton,
        /// Global position of the press.
        position: Point,
        /// Modifiers held during the press.
        modifiers: Modifiers,
    },
    /// A mouse button was released.
    MouseRelease {
        /// The receiving widget.
        widget: WidgetId,
        /// The released button.
        button: MouseButton,
        /// Global position of the release.
        position: Point,
        /// Modifiers held during the release.
        modifiers: Modifiers,
    },
    /// The scroll wheel moved.
    MouseWheel {
        /// The receiving widget.
        widget: WidgetId,
        /// Scroll direction.
        direction: WheelDirection,
        /// Global position of the pointer.
        position: Point,
        /// Modifiers held during the scroll.
        modifiers: Modifiers,
    },
    /// The pointer moved.
    MouseMove {
        /// The receiving widget.
        widget: WidgetId,
        /// New global pointer position.
        position: Point,
        /// Modifiers held during the move.
        modifiers: Modifiers,
    },
    /// A child was attached to the widget.
    ChildAdded {
        /// The parent widget.
        widget: WidgetId,
        /// The new child.
        child: WidgetId,
    },
    /// A child was detached from the widget.
    ChildRemoved {
        /// The parent widget.
        widget: WidgetId,
        /// The removed child.
        child: WidgetId,
    },
    /// A child finished construction under the widget.
    ChildPolished {
        /// The parent widget.
        widget: WidgetId,
        /// The polished child.
        child: WidgetId,
    },
    /// The widget's detached subtree is ready for teardown.
    ///
    /// The subtree stays stored (owned by the arena) until this event is
    /// processed; processing notifies every descendant before the storage
    /// is released.
    Delete {
        /// The root of the detached subtree.
        widget: WidgetId,
    },
    /// The widget became enabled.
    Enable {
        /// The receiving widget.
        widget: WidgetId,
    },
    /// The widget became disabled.
    Disable {
        /// The receiving widget.
        widget: WidgetId,
    },
    /// The widget gained keyboard focus.
    FocusIn {
        /// The receiving widget.
        widget: WidgetId,
    },
    /// The widget lost keyboard focus.
    FocusOut {
        /// The receiving widget.
        widget: WidgetId,
    },
    /// The widget moved within its parent.
    Move {
        /// The receiving widget.
        widget: WidgetId,
        /// Previous position.
        old: Point,
        /// New position.
        new: Point,
    },
    /// The widget's size changed.
    Resize {
        /// The receiving widget.
        widget: WidgetId,
        /// Previous size.
        old: Area,
        /// New size.
        new: Area,
    },
    /// A timer interval elapsed.
    Timer {
        /// The receiving widget.
        widget: WidgetId,
        /// The firing registration.
        timer: TimerId,
    },
    /// The dynamic-color engine ticked.
    DynamicColor {
        /// The receiving widget.
        widget: WidgetId,
    },
    /// An application-defined event.
    Custom {
        /// The receiving widget.
        widget: WidgetId,
        /// Application-defined discriminator.
        tag: u64,
    },
}

/// The kind of an [`Event`], without its payload.
///
/// Used by the queue's coalescing rules and the sendability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum EventKind {
    Paint,
    KeyPress,
    KeyRelease,
    MousePress,
    MouseRelease,
    MouseWheel,
    MouseMove,
    ChildAdded,
    ChildRemoved,
    ChildPolished,
    Delete,
    Enable,
    Disable,
    FocusIn,
    FocusOut,
    Move,
    Resize,
    Timer,
    DynamicColor,
    Custom,
}

impl Event {
    /// Returns the widget this event is addressed to.
    pub const fn receiver(&self) -> WidgetId {
        match self {
            Self::Paint { widget }
            | Self::KeyPress { widget, .. }
            | Self::KeyRelease { widget, .. }
            | Self::MousePress { widget, .. }
            | Self::MouseRelease { widget, .. }
            | Self::MouseWheel { widget, .. }
            | Self::MouseMove { widget, .. }
            | Self::ChildAdded { widget, .. }
            | Self::ChildRemoved { widget, .. }
            | Self::ChildPolished { widget, .. }
            | Self::Delete { widget }
            | Self::Enable { widget }
            | Self::Disable { widget }
            | Self::FocusIn { widget }
            | Self::FocusOut { widget }
            | Self::Move { widget, .. }
            | Self::Resize { widget, .. }
            | Self::Timer { widget, .. }
            | Self::DynamicColor { widget }
            | Self::Custom { widget, .. } => *widget,
        }
    }

    /// Re-addresses the event to another widget.
    pub fn with_receiver(mut self, receiver: WidgetId) -> Self {
        match &mut self {
            Self::Paint { widget }
            | Self::KeyPress { widget, .. }
            | Self::KeyRelease { widget, .. }
            | Self::MousePress { widget, .. }
            | Self::MouseRelease { widget, .. }
            | Self::MouseWheel { widget, .. }
            | Self::MouseMove { widget, .. }
            | Self::ChildAdded { widget, .. }
            | Self::ChildRemoved { widget, .. }
            | Self::ChildPolished { widget, .. }
            | Self::Delete { widget }
            | Self::Enable { widget }
            | Self::Disable { widget }
            | Self::FocusIn { widget }
            | Self::FocusOut { widget }
            | Self::Move { widget, .. }
            | Self::Resize { widget, .. }
            | Self::Timer { widget, .. }
            | Self::DynamicColor { widget }
            | Self::Custom { widget, .. } => *widget = receiver,
        }
        self
    }

    /// Returns the payload-free kind of this event.
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Paint { .. } => EventKind::Paint,
            Self::KeyPress { .. } => EventKind::KeyPress,
            Self::KeyRelease { .. } => EventKind::KeyRelease,
            Self::MousePress { .. } => EventKind::MousePress,
            Self::MouseRelease { .. } => EventKind::MouseRelease,
            Self::MouseWheel { .. } => EventKind::MouseWheel,
            Self::MouseMove { .. } => EventKind::MouseMove,
            Self::ChildAdded { .. } => EventKind::ChildAdded,
            Self::ChildRemoved { .. } => EventKind::ChildRemoved,
            Self::ChildPolished { .. } => EventKind::ChildPolished,
            Self::Delete { .. } => EventKind::Delete,
            Self::Enable { .. } => EventKind::Enable,
            Self::Disable { .. } => EventKind::Disable,
            Self::FocusIn { .. } => EventKind::FocusIn,
            Self::FocusOut { .. } => EventKind::FocusOut,
            Self::Move { .. } => EventKind::Move,
            Self::Resize { .. } => EventKind::Resize,
            Self::Timer { .. } => EventKind::Timer,
            Self::DynamicColor { .. } => EventKind::DynamicColor,
            Self::Custom { .. } => EventKind::Custom,
        }
    }

    /// Returns whether this kind is deliverable to a disabled widget.
    ///
    /// Resize is also always sendable when addressed to the tree root,
    /// which is how terminal resizes arrive; the dispatcher checks that
    /// separately.
    pub const fn is_always_sendable(&self) -> bool {
        matches!(
            self.kind(),
            EventKind::Delete
                | EventKind::Disable
                | EventKind::FocusOut
                | EventKind::ChildAdded
                | EventKind::ChildRemoved
                | EventKind::ChildPolished
                | EventKind::Custom
                | EventKind::DynamicColor
        )
    }

    /// Returns whether this is an input event that bubbles to ancestors
    /// when unhandled.
    pub const fn bubbles(&self) -> bool {
        matches!(
            self.kind(),
            EventKind::KeyPress
                | EventKind::KeyRelease
                | EventKind::MousePress
                | EventKind::MouseRelease
                | EventKind::MouseWheel
                | EventKind::MouseMove
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::WidgetTree;
    use crate::widget::NullWidget;

    #[test]
    fn test_event_receiver_and_kind() {
        let mut tree = WidgetTree::new();
        let id = tree.insert_root(Box::new(NullWidget::default()));

        let event = Event::KeyPress {
            widget: id,
            key: KeyEvent::char('q'),
        };
        assert_eq!(event.receiver(), id);
        assert_eq!(event.kind(), EventKind::KeyPress);
        assert!(event.bubbles());
        assert!(!event.is_always_sendable());
    }

    #[test]
    fn test_always_sendable_kinds() {
        let mut tree = WidgetTree::new();
        let id = tree.insert_root(Box::new(NullWidget::default()));

        assert!(Event::Delete { widget: id }.is_always_sendable());
        assert!(Event::Disable { widget: id }.is_always_sendable());
        assert!(Event::FocusOut { widget: id }.is_always_sendable());
        assert!(Event::DynamicColor { widget: id }.is_always_sendable());
        assert!(Event::Custom { widget: id, tag: 0 }.is_always_sendable());

        assert!(!Event::Paint { widget: id }.is_always_sendable());
        assert!(!Event::FocusIn { widget: id }.is_always_sendable());
    }

    #[test]
    fn test_with_receiver() {
        let mut tree = WidgetTree::new();
        let a = tree.insert_root(Box::new(NullWidget::default()));
        let b = tree.insert(a, Box::new(NullWidget::default())).unwrap();

        let event = Event::Paint { widget: a }.with_receiver(b);
        assert_eq!(event.receiver(), b);
    }
}
