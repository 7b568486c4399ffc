//! The runtime context: one tree, one queue, one focus state.
//!
//! [`RuntimeContext`] bundles the widget arena with its event queue,
//! focus manager, and shortcut registry, and implements event dispatch.
//! It is an explicit value threaded through the application — never a
//! process-wide singleton — so multiple independent UIs (and tests) can
//! coexist.
//!
//! Dispatch order for every event: the shortcut registry first, then the
//! sendability check, then the receiver's behavior hook; unhandled input
//! events bubble to ancestors. Raw input arrives addressed to the root
//! widget (producer threads cannot touch the tree) and is re-targeted
//! here: key events to the focused widget, mouse events by hit-test.

use crate::event::{Event, EventKind};
use crate::focus::FocusManager;
use crate::keyboard::KeyCode;
use crate::queue::{EventQueue, EventSender};
use crate::shortcuts::ShortcutRegistry;
use crate::tree::{WidgetId, WidgetTree};
use crate::widget::{Widget, WidgetCtx};

/// Callback invoked for every widget of a subtree being torn down.
///
/// Used by subsystems that hold widget back-references (timer hub,
/// dynamic-color engine) to auto-unregister before storage is released.
pub type TeardownObserver = Box<dyn FnMut(WidgetId) + Send>;

/// One thread's widget runtime: tree + queue + focus + shortcuts.
pub struct RuntimeContext {
    /// The widget arena.
    pub tree: WidgetTree,
    /// The keyboard focus state.
    pub focus: FocusManager,
    /// The global shortcut registry.
    pub shortcuts: ShortcutRegistry,
    queue: EventQueue,
    /// Subtree roots whose geometry must be re-solved before painting.
    dirty: Vec<WidgetId>,
    teardown_observers: Vec<TeardownObserver>,
}

impl Default for RuntimeContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeContext {
    /// Creates an empty runtime context.
    pub fn new() -> Self {
        Self {
            tree: WidgetTree::new(),
            focus: FocusManager::new(),
            shortcuts: ShortcutRegistry::new(),
            queue: EventQueue::new(),
            dirty: Vec::new(),
            teardown_observers: Vec::new(),
        }
    }

    /// Returns the context's event queue.
    pub fn queue(&self) -> &EventQueue {
        &self.queue
    }

    /// Returns a producer handle for other threads.
    pub fn sender(&self) -> EventSender {
        self.queue.sender()
    }

    /// Registers a callback run for every widget of a deleted subtree.
    pub fn add_teardown_observer(&mut self, observer: TeardownObserver) {
        self.teardown_observers.push(observer);
    }

    // ========================================================================
    // Tree mutation with notifications
    // ========================================================================

    /// Inserts the root widget and schedules a layout pass.
    pub fn add_root(&mut self, behavior: Box<dyn Widget>) -> WidgetId {
        let id = self.tree.insert_root(behavior);
        self.mark_dirty(id);
        id
    }

    /// Inserts a child widget, notifying the parent with `ChildAdded` and
    /// `ChildPolished`.
    pub fn add_widget(&mut self, parent: WidgetId, behavior: Box<dyn Widget>) -> Option<WidgetId> {
        let child = self.tree.insert(parent, behavior)?;
        self.queue.append(Event::ChildAdded { widget: parent, child });
        self.queue.append(Event::ChildPolished { widget: parent, child });
        self.mark_dirty(parent);
        Some(child)
    }

    /// Starts the two-step removal of a subtree.
    ///
    /// The subtree is detached immediately (and the parent notified), its
    /// queued events are purged, and a `Delete` event takes over
    /// ownership: processing it notifies every descendant, then releases
    /// the storage.
    pub fn remove_widget(&mut self, id: WidgetId) {
        let Some(node) = self.tree.node(id) else {
            return;
        };
        let parent = node.parent();

        let stale = self.tree.descendants(id);
        self.queue.purge_widgets(&stale);
        self.tree.detach(id);

        if let Some(parent) = parent {
            self.queue.append(Event::ChildRemoved { widget: parent, child: id });
            self.mark_dirty(parent);
        }
        self.queue.append(Event::Delete { widget: id });
    }

    /// Sets a widget's enabled state, notifying it with `Enable` or
    /// `Disable`.
    pub fn set_enabled(&mut self, id: WidgetId, enabled: bool) {
        let Some(node) = self.tree.node_mut(id) else {
            return;
        };
        if node.is_enabled() == enabled {
            return;
        }
        node.set_enabled(enabled);

        let event = if enabled {
            Event::Enable { widget: id }
        } else {
            Event::Disable { widget: id }
        };
        self.queue.append(event);

        if !enabled && self.focus.is_focused(id) {
            let sender = self.queue.sender();
            self.focus.clear(&self.tree, &sender);
        }

        // Enablement changes the parent's wallpaper mask.
        self.mark_dirty(self.tree.parent(id).unwrap_or(id));
    }

    /// Changes a widget's size policies and schedules the parent's
    /// re-solve, since policy changes propagate upward.
    pub fn set_size_policies(
        &mut self,
        id: WidgetId,
        horizontal: weft_layout::SizePolicy,
        vertical: weft_layout::SizePolicy,
    ) {
        let Some(node) = self.tree.node_mut(id) else {
            return;
        };
        node.set_size_policies(horizontal, vertical);
        self.mark_dirty(self.tree.parent(id).unwrap_or(id));
    }

    // ========================================================================
    // Dirty tracking
    // ========================================================================

    /// Schedules `id`'s subtree for re-solve and repaint.
    pub fn mark_dirty(&mut self, id: WidgetId) {
        if !self.dirty.contains(&id) {
            self.dirty.push(id);
        }
    }

    /// Returns whether a repaint is pending.
    pub fn needs_repaint(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Re-solves every dirty subtree.
    ///
    /// Returns `true` when anything was dirty, i.e. the frame must be
    /// repainted.
    pub fn flush_layout(&mut self) -> bool {
        if self.dirty.is_empty() {
            return false;
        }
        let sender = self.queue.sender();
        let dirty = std::mem::take(&mut self.dirty);
        for id in dirty {
            if self.tree.contains(id) {
                self.tree.relayout(id, Some(&sender));
            }
        }
        true
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Drains one batch from the queue and dispatches every event.
    ///
    /// Returns the number of events processed.
    pub fn process_pending(&mut self) -> usize {
        let batch = self.queue.take_batch();
        let count = batch.len();
        for event in batch {
            self.dispatch(event);
        }
        count
    }

    /// Dispatches a single event.
    pub fn dispatch(&mut self, event: Event) {
        // Shortcuts see every key press first and may fully consume it.
        if let Event::KeyPress { key, .. } = &event {
            let sender = self.queue.sender();
            if self.shortcuts.try_consume(*key, &sender) {
                return;
            }
        }

        let Some(event) = self.route(event) else {
            return;
        };

        let receiver = event.receiver();
        let Some(node) = self.tree.node(receiver) else {
            tracing::trace!("dropping event for stale widget");
            return;
        };

        let sendable = node.is_enabled()
            || event.is_always_sendable()
            || (event.kind() == EventKind::Resize && Some(receiver) == self.tree.root());
        if !sendable {
            return;
        }

        match event {
            Event::Paint { widget } => self.mark_dirty(widget),
            Event::Delete { widget } => self.process_delete(widget),
            Event::Enable { widget } => {
                self.with_behavior(widget, |b, ctx| b.enabled_change(ctx, true));
            }
            Event::Disable { widget } => {
                self.with_behavior(widget, |b, ctx| b.enabled_change(ctx, false));
            }
            Event::FocusIn { widget } => {
                self.with_behavior(widget, |b, ctx| b.focus_in(ctx));
                self.mark_dirty(widget);
            }
            Event::FocusOut { widget } => {
                self.with_behavior(widget, |b, ctx| b.focus_out(ctx));
                self.mark_dirty(widget);
            }
            Event::Move { widget, old, new } => {
                self.with_behavior(widget, |b, ctx| b.moved(ctx, old, new));
            }
            Event::Resize { widget, old, new } => {
                self.with_behavior(widget, |b, ctx| b.resize(ctx, old, new));
                self.mark_dirty(widget);
            }
            Event::KeyPress { widget, key } => {
                self.bubble(widget, |b, ctx| b.key_press(ctx, key));
            }
            Event::KeyRelease { widget, key } => {
                self.bubble(widget, |b, ctx| b.key_release(ctx, key));
            }
            Event::MousePress { widget, button, position, modifiers } => {
                self.bubble(widget, |b, ctx| b.mouse_press(ctx, button, position, modifiers));
            }
            Event::MouseRelease { widget, button, position, modifiers } => {
                self.bubble(widget, |b, ctx| b.mouse_release(ctx, button, position, modifiers));
            }
            Event::MouseWheel { widget, direction, position, modifiers } => {
                self.bubble(widget, |b, ctx| b.mouse_wheel(ctx, direction, position, modifiers));
            }
            Event::MouseMove { widget, position, modifiers } => {
                self.bubble(widget, |b, ctx| b.mouse_move(ctx, position, modifiers));
            }
            Event::ChildAdded { widget, child } => {
                self.with_behavior(widget, |b, ctx| b.child_added(ctx, child));
            }
            Event::ChildRemoved { widget, child } => {
                self.with_behavior(widget, |b, ctx| b.child_removed(ctx, child));
            }
            Event::ChildPolished { widget, child } => {
                self.with_behavior(widget, |b, ctx| b.child_polished(ctx, child));
            }
            Event::Timer { widget, timer } => {
                self.with_behavior(widget, |b, ctx| b.timer(ctx, timer));
            }
            Event::DynamicColor { widget } => {
                self.with_behavior(widget, |b, ctx| b.dynamic_color(ctx));
            }
            Event::Custom { widget, tag } => {
                self.with_behavior(widget, |b, ctx| b.custom(ctx, tag));
            }
        }
    }

    /// Re-targets raw input addressed to the root widget.
    ///
    /// Returns `None` when the event was consumed during routing (tab
    /// traversal) or has no target.
    fn route(&mut self, event: Event) -> Option<Event> {
        let Some(root) = self.tree.root() else {
            // No live root: nothing to route against; stale receivers are
            // filtered by the dispatch lookup.
            return Some(event);
        };
        if event.receiver() != root {
            return Some(event);
        }

        match &event {
            Event::KeyPress { key, .. } => {
                let sender = self.queue.sender();
                match key.code {
                    KeyCode::Tab if self.focus.tab_press(&self.tree, &sender) => return None,
                    KeyCode::BackTab if self.focus.shift_tab_press(&self.tree, &sender) => {
                        return None
                    }
                    _ => {}
                }
                match self.focus.current() {
                    Some(focused) => Some(event.with_receiver(focused)),
                    None => Some(event),
                }
            }
            Event::KeyRelease { .. } => match self.focus.current() {
                Some(focused) => Some(event.with_receiver(focused)),
                None => Some(event),
            },
            Event::MousePress { position, .. } => {
                let target = self.tree.widget_at(*position)?;
                let sender = self.queue.sender();
                self.focus.mouse_press(&self.tree, &sender, target);
                Some(event.with_receiver(target))
            }
            Event::MouseWheel { position, .. } => {
                let target = self.tree.widget_at(*position)?;
                let sender = self.queue.sender();
                self.focus.wheel(&self.tree, &sender, target);
                Some(event.with_receiver(target))
            }
            Event::MouseRelease { position, .. } | Event::MouseMove { position, .. } => {
                let target = self.tree.widget_at(*position)?;
                Some(event.with_receiver(target))
            }
            _ => Some(event),
        }
    }

    /// Runs a hook on one widget's behavior, with the tree borrowed back
    /// into the handler through [`WidgetCtx`].
    fn with_behavior<R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut dyn Widget, &mut WidgetCtx<'_>) -> R,
    ) -> Option<R> {
        let mut behavior = self.tree.take_behavior(id)?;
        let sender = self.queue.sender();
        let mut ctx = WidgetCtx {
            tree: &mut self.tree,
            sender: &sender,
            focus: &mut self.focus,
        };
        let out = f(behavior.as_mut(), &mut ctx);
        self.tree.put_behavior(id, behavior);
        Some(out)
    }

    /// Delivers an input hook to `start`, walking up to ancestors until
    /// some handler reports the event handled.
    fn bubble(
        &mut self,
        start: WidgetId,
        mut f: impl FnMut(&mut dyn Widget, &mut WidgetCtx<'_>) -> bool,
    ) -> bool {
        let mut target = Some(start);
        while let Some(id) = target {
            let enabled = self.tree.node(id).is_some_and(|n| n.is_enabled());
            if enabled && self.with_behavior(id, &mut f).unwrap_or(false) {
                return true;
            }
            target = self.tree.parent(id);
        }
        false
    }

    /// Runs the teardown half of the delete protocol.
    ///
    /// Every descendant is notified (focus dropped, observers run, the
    /// `teardown` hook called) while the subtree is still stored; only
    /// then is the storage released, so no handler ever sees freed
    /// widgets.
    fn process_delete(&mut self, widget: WidgetId) {
        if !self.tree.contains(widget) {
            return;
        }
        self.tree.detach(widget);
        let ids = self.tree.descendants(widget);
        tracing::debug!(widgets = ids.len(), "tearing down subtree");

        for &id in &ids {
            self.focus.widget_destroyed(id);
            for observer in &mut self.teardown_observers {
                observer(id);
            }
        }
        for &id in &ids {
            self.with_behavior(id, |b, ctx| b.teardown(ctx));
        }

        self.tree.release_subtree(widget);
        if let Some(root) = self.tree.root() {
            self.mark_dirty(root);
        }
    }
}
