//! The widget behavior trait.
//!
//! Structural state (geometry, policies, border, enablement, focus policy)
//! lives on the arena node; everything a widget *does* — painting its
//! content, reacting to input — lives in a boxed [`Widget`] behavior.
//! Every hook has a default no-op, so a leaf widget only implements what
//! it cares about.

use std::any::Any;

use weft_core::{Area, Point};

use crate::event::TimerId;
use crate::focus::FocusManager;
use crate::keyboard::KeyEvent;
use crate::mouse::{MouseButton, WheelDirection};
use crate::paint::Painter;
use crate::queue::EventSender;
use crate::tree::{WidgetId, WidgetTree};
use crate::Event;
use crate::Modifiers;

/// Mutable toolkit state handed to event hooks.
///
/// Handlers never hold this across calls; it borrows the tree, the queue's
/// producer side, and the focus manager for the duration of one dispatch.
pub struct WidgetCtx<'a> {
    /// The widget arena.
    pub tree: &'a mut WidgetTree,
    /// Producer handle of the owning thread's event queue.
    pub sender: &'a EventSender,
    /// The keyboard focus state.
    pub focus: &'a mut FocusManager,
}

impl WidgetCtx<'_> {
    /// Enqueues a repaint request for `widget`.
    pub fn request_repaint(&self, widget: WidgetId) {
        self.sender.send(Event::Paint { widget });
    }
}

/// Behavior hooks for a widget.
///
/// Input hooks return whether the event was fully handled; an unhandled
/// input event bubbles to the parent widget. Notification hooks return
/// nothing.
#[allow(unused_variables)]
pub trait Widget: Any + Send {
    /// A static name for diagnostics.
    fn type_name(&self) -> &'static str {
        "widget"
    }

    /// Paints the widget's own content into its inner area.
    ///
    /// The painter is clipped to the inner area and uses local
    /// coordinates; the widget has no knowledge of where it sits on the
    /// screen. Wallpaper and border are already drawn when this runs, and
    /// children paint after it.
    fn paint(&mut self, painter: &mut Painter<'_>) {}

    /// A key was pressed while this widget had focus.
    fn key_press(&mut self, ctx: &mut WidgetCtx<'_>, key: KeyEvent) -> bool {
        false
    }

    /// A key was released while this widget had focus.
    fn key_release(&mut self, ctx: &mut WidgetCtx<'_>, key: KeyEvent) -> bool {
        false
    }

    /// A mouse button was pressed on this widget.
    fn mouse_press(
        &mut self,
        ctx: &mut WidgetCtx<'_>,
        button: MouseButton,
        position: Point,
        modifiers: Modifiers,
    ) -> bool {
        false
    }

    /// A mouse button was released on this widget.
    fn mouse_release(
        &mut self,
        ctx: &mut WidgetCtx<'_>,
        button: MouseButton,
        position: Point,
        modifiers: Modifiers,
    ) -> bool {
        false
    }

    /// The scroll wheel moved over this widget.
    fn mouse_wheel(
        &mut self,
        ctx: &mut WidgetCtx<'_>,
        direction: WheelDirection,
        position: Point,
        modifiers: Modifiers,
    ) -> bool {
        false
    }

    /// The pointer moved over this widget.
    fn mouse_move(&mut self, ctx: &mut WidgetCtx<'_>, position: Point, modifiers: Modifiers) -> bool {
        false
    }

    /// The widget's size changed.
    fn resize(&mut self, ctx: &mut WidgetCtx<'_>, old: Area, new: Area) {}

    /// The widget moved within its parent.
    fn moved(&mut self, ctx: &mut WidgetCtx<'_>, old: Point, new: Point) {}

    /// A timer registration fired.
    fn timer(&mut self, ctx: &mut WidgetCtx<'_>, timer: TimerId) {}

    /// The dynamic-color engine ticked.
    fn dynamic_color(&mut self, ctx: &mut WidgetCtx<'_>) {}

    /// The widget gained keyboard focus.
    fn focus_in(&mut self, ctx: &mut WidgetCtx<'_>) {}

    /// The widget lost keyboard focus.
    fn focus_out(&mut self, ctx: &mut WidgetCtx<'_>) {}

    /// The widget's enabled state changed.
    fn enabled_change(&mut self, ctx: &mut WidgetCtx<'_>, enabled: bool) {}

    /// A child was attached.
    fn child_added(&mut self, ctx: &mut WidgetCtx<'_>, child: WidgetId) {}

    /// A child was detached.
    fn child_removed(&mut self, ctx: &mut WidgetCtx<'_>, child: WidgetId) {}

    /// A child finished construction.
    fn child_polished(&mut self, ctx: &mut WidgetCtx<'_>, child: WidgetId) {}

    /// The widget is about to be destroyed.
    ///
    /// Runs once for every descendant of a deleted subtree, before any of
    /// the subtree's storage is released. Handlers must tolerate children
    /// that have already been notified.
    fn teardown(&mut self, ctx: &mut WidgetCtx<'_>) {}

    /// An application-defined event arrived.
    fn custom(&mut self, ctx: &mut WidgetCtx<'_>, tag: u64) -> bool {
        false
    }

    /// Casts this behavior to `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Casts this behavior to `Any` for mutable downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A behavior with no content of its own: wallpaper, border, and children
/// only. The default behavior of plain container widgets.
#[derive(Debug, Default)]
pub struct NullWidget;

impl Widget for NullWidget {
    fn type_name(&self) -> &'static str {
        "null"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Helper for downcasting boxed behaviors.
pub trait WidgetExt: Widget {
    /// Attempts to downcast this behavior to a concrete type.
    fn downcast_ref<T: Widget + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Attempts to downcast this behavior to a concrete mutable type.
    fn downcast_mut<T: Widget + 'static>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

impl<W: Widget + ?Sized> WidgetExt for W {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_widget_downcast() {
        let behavior: Box<dyn Widget> = Box::new(NullWidget);
        assert_eq!(behavior.type_name(), "null");
        assert!(behavior.downcast_ref::<NullWidget>().is_some());
    }
}
