//! Keyboard focus: policy flags and the focus manager.
//!
//! The manager holds the single "who has keyboard focus" state for one
//! widget tree. It is a plain struct threaded through dispatch, not a
//! process-wide global, so independent UI instances and tests stay
//! isolated.

use bitflags::bitflags;

use crate::event::Event;
use crate::queue::EventSender;
use crate::tree::{WidgetId, WidgetTree};

bitflags! {
    /// Which input mechanisms may give a widget keyboard focus.
    ///
    /// Policies compose bitwise; [`STRONG`](Self::STRONG) is the common
    /// tab-and-click combination.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FocusPolicy: u8 {
        /// Reachable via Tab traversal.
        const TAB   = 0b0000_0001;
        /// Focusable by mouse click.
        const CLICK = 0b0000_0010;
        /// Focusable by scroll wheel.
        const WHEEL = 0b0000_0100;
    }
}

impl FocusPolicy {
    /// Never focusable.
    pub const NONE: Self = Self::empty();

    /// Focusable by tab and click.
    pub const STRONG: Self = Self::TAB.union(Self::CLICK);

    /// Returns whether tab traversal may stop here.
    #[inline]
    pub const fn accepts_tab(self) -> bool {
        self.contains(Self::TAB)
    }

    /// Returns whether a mouse click focuses the widget.
    #[inline]
    pub const fn accepts_click(self) -> bool {
        self.contains(Self::CLICK)
    }

    /// Returns whether the scroll wheel focuses the widget.
    #[inline]
    pub const fn accepts_wheel(self) -> bool {
        self.contains(Self::WHEEL)
    }
}

/// Tracks which widget holds keyboard focus and walks the tab order.
#[derive(Debug, Default)]
pub struct FocusManager {
    current: Option<WidgetId>,
    tab_suppressed: u32,
}

impl FocusManager {
    /// Creates a manager with nothing focused.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the focused widget, if any.
    #[inline]
    pub fn current(&self) -> Option<WidgetId> {
        self.current
    }

    /// Returns whether any widget is focused.
    #[inline]
    pub fn has_focus(&self) -> bool {
        self.current.is_some()
    }

    /// Returns whether `id` is the focused widget.
    #[inline]
    pub fn is_focused(&self, id: WidgetId) -> bool {
        self.current == Some(id)
    }

    /// Moves focus to `target`.
    ///
    /// The previously focused widget gets a `FocusOut`, then the new one a
    /// `FocusIn`, both through the queue. A target that is dead, disabled,
    /// or has [`FocusPolicy::NONE`] clears focus instead.
    pub fn set(&mut self, tree: &WidgetTree, sender: &EventSender, target: Option<WidgetId>) {
        let resolved = target.filter(|&id| {
            tree.node(id)
                .is_some_and(|n| n.is_enabled() && n.focus_policy() != FocusPolicy::NONE)
        });

        if resolved == self.current {
            return;
        }

        if let Some(old) = self.current {
            sender.send(Event::FocusOut { widget: old });
        }
        self.current = resolved;
        if let Some(new) = resolved {
            tracing::debug!(serial = tree.node(new).map(|n| n.serial()), "focus moved");
            sender.send(Event::FocusIn { widget: new });
        }
    }

    /// Clears focus, notifying the previously focused widget.
    pub fn clear(&mut self, tree: &WidgetTree, sender: &EventSender) {
        self.set(tree, sender, None);
    }

    /// Advances focus to the next tab-focusable widget in document order.
    ///
    /// Wraps past the end. Returns `false` — the key is then not consumed
    /// — when no candidate exists or tab handling is suppressed.
    pub fn tab_press(&mut self, tree: &WidgetTree, sender: &EventSender) -> bool {
        self.tab_step(tree, sender, false)
    }

    /// Moves focus to the previous tab-focusable widget.
    ///
    /// The reverse of [`tab_press`](Self::tab_press).
    pub fn shift_tab_press(&mut self, tree: &WidgetTree, sender: &EventSender) -> bool {
        self.tab_step(tree, sender, true)
    }

    fn tab_step(&mut self, tree: &WidgetTree, sender: &EventSender, reverse: bool) -> bool {
        if self.tab_suppressed > 0 {
            return false;
        }

        let candidates: Vec<WidgetId> = tree
            .pre_order()
            .into_iter()
            .filter(|&id| {
                tree.node(id)
                    .is_some_and(|n| n.is_enabled() && n.focus_policy().accepts_tab())
            })
            .collect();
        if candidates.is_empty() {
            return false;
        }

        let position = self
            .current
            .and_then(|current| candidates.iter().position(|&id| id == current));

        let next = match (position, reverse) {
            (Some(i), false) => candidates[(i + 1) % candidates.len()],
            (Some(i), true) => candidates[(i + candidates.len() - 1) % candidates.len()],
            (None, false) => candidates[0],
            (None, true) => candidates[candidates.len() - 1],
        };

        self.set(tree, sender, Some(next));
        true
    }

    /// Focuses `widget` if its policy allows click focus.
    ///
    /// Returns whether focus moved to the widget.
    pub fn mouse_press(
        &mut self,
        tree: &WidgetTree,
        sender: &EventSender,
        widget: WidgetId,
    ) -> bool {
        let accepts = tree
            .node(widget)
            .is_some_and(|n| n.is_enabled() && n.focus_policy().accepts_click());
        if accepts {
            self.set(tree, sender, Some(widget));
        }
        accepts
    }

    /// Focuses `widget` if its policy allows wheel focus.
    pub fn wheel(&mut self, tree: &WidgetTree, sender: &EventSender, widget: WidgetId) -> bool {
        let accepts = tree
            .node(widget)
            .is_some_and(|n| n.is_enabled() && n.focus_policy().accepts_wheel());
        if accepts {
            self.set(tree, sender, Some(widget));
        }
        accepts
    }

    /// Suppresses tab traversal (e.g. while a shortcut combo is pending).
    ///
    /// Nests: every `suppress_tab` needs a matching
    /// [`resume_tab`](Self::resume_tab).
    pub fn suppress_tab(&mut self) {
        self.tab_suppressed += 1;
    }

    /// Undoes one level of tab suppression.
    pub fn resume_tab(&mut self) {
        self.tab_suppressed = self.tab_suppressed.saturating_sub(1);
    }

    /// Returns whether tab traversal is currently suppressed.
    #[inline]
    pub fn is_tab_suppressed(&self) -> bool {
        self.tab_suppressed > 0
    }

    /// Drops focus state for a widget being torn down.
    ///
    /// No events are emitted; the widget is past the point of receiving
    /// them.
    pub fn widget_destroyed(&mut self, id: WidgetId) {
        if self.current == Some(id) {
            self.current = None;
        }
    }
}
