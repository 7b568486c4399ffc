//! The thread-confined event queue and its cross-thread producer handle.
//!
//! One [`EventQueue`] belongs to the thread that owns a widget tree; only
//! that thread drains it. Producer threads (input reader, timer loops, the
//! dynamic-color engine) hold cloned [`EventSender`]s and communicate
//! exclusively by appending fully-owned [`Event`] values — no widget state
//! ever crosses a thread boundary.
//!
//! # Coalescing
//!
//! Layout-affecting events are last-write-wins: appending a `Resize` or
//! `Move` for a widget drops any queued `Resize`/`Move`/`Paint` for the
//! same widget. Deleting a subtree purges queued events targeting it.
//! At drain time, duplicate `Paint`s compress to one per widget and
//! `Delete`s move to the end of the batch so in-flight handlers still see
//! a live tree.

use parking_lot::{Condvar, Mutex};
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::event::{Event, EventKind};
use crate::tree::WidgetId;

struct Shared {
    deque: Mutex<VecDeque<Event>>,
    cond: Condvar,
    quit: AtomicBool,
}

impl Shared {
    fn append(&self, event: Event) {
        let mut deque = self.deque.lock();

        match event.kind() {
            EventKind::Resize | EventKind::Move => {
                // Last-write-wins for layout-affecting events.
                let widget = event.receiver();
                let before = deque.len();
                deque.retain(|queued| {
                    queued.receiver() != widget
                        || !matches!(
                            queued.kind(),
                            EventKind::Resize | EventKind::Move | EventKind::Paint
                        )
                });
                if deque.len() != before {
                    tracing::trace!(dropped = before - deque.len(), "coalesced stale geometry events");
                }
            }
            EventKind::Delete => {
                let widget = event.receiver();
                deque.retain(|queued| {
                    queued.receiver() != widget || queued.kind() == EventKind::Delete
                });
            }
            _ => {}
        }

        deque.push_back(event);
        drop(deque);
        self.cond.notify_one();
    }
}

/// Producer handle for a queue owned by another thread.
///
/// Cheap to clone; `Send` so timer loops and the input reader can carry
/// one.
#[derive(Clone)]
pub struct EventSender {
    shared: Arc<Shared>,
}

impl EventSender {
    /// Appends an event, applying the queue's coalescing rules.
    pub fn send(&self, event: Event) {
        self.shared.append(event);
    }

    /// Returns whether the owning thread has shut the queue down.
    ///
    /// Producers use this to stop emitting into a dead queue.
    pub fn is_closed(&self) -> bool {
        self.shared.quit.load(Ordering::Acquire)
    }
}

/// The single-consumer event queue of a widget-owning thread.
pub struct EventQueue {
    shared: Arc<Shared>,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                deque: Mutex::new(VecDeque::new()),
                cond: Condvar::new(),
                quit: AtomicBool::new(false),
            }),
        }
    }

    /// Returns a cloneable producer handle.
    pub fn sender(&self) -> EventSender {
        EventSender {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Appends an event from the owning thread.
    pub fn append(&self, event: Event) {
        self.shared.append(event);
    }

    /// Removes every queued event targeting one of the given widgets.
    ///
    /// Called when a subtree is detached for deletion, so stale events
    /// never reach freed widgets.
    pub fn purge_widgets(&self, stale: &[WidgetId]) {
        if stale.is_empty() {
            return;
        }
        let stale: HashSet<WidgetId> = stale.iter().copied().collect();
        let mut deque = self.shared.deque.lock();
        let before = deque.len();
        deque.retain(|queued| !stale.contains(&queued.receiver()));
        if deque.len() != before {
            tracing::trace!(dropped = before - deque.len(), "purged events for deleted subtree");
        }
    }

    /// Returns the number of queued events.
    pub fn len(&self) -> usize {
        self.shared.deque.lock().len()
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.shared.deque.lock().is_empty()
    }

    /// Blocks until an event is queued or the queue shuts down.
    ///
    /// Returns `true` when work is available, `false` on shutdown with an
    /// empty queue. Never runs widget code while blocked.
    pub fn wait(&self) -> bool {
        let mut deque = self.shared.deque.lock();
        while deque.is_empty() && !self.shared.quit.load(Ordering::Acquire) {
            self.shared.cond.wait(&mut deque);
        }
        !deque.is_empty()
    }

    /// Drains the queue into one dispatch batch.
    ///
    /// FIFO order, except that duplicate `Paint`s per widget compress to
    /// the first one and `Delete`s are deferred to the end of the batch.
    pub fn take_batch(&self) -> Vec<Event> {
        let drained: Vec<Event> = {
            let mut deque = self.shared.deque.lock();
            deque.drain(..).collect()
        };
        if drained.is_empty() {
            return drained;
        }

        let mut seen_paint: HashSet<WidgetId> = HashSet::new();
        let mut batch = Vec::with_capacity(drained.len());
        let mut deletes = Vec::new();

        for event in drained {
            match event.kind() {
                EventKind::Paint => {
                    if seen_paint.insert(event.receiver()) {
                        batch.push(event);
                    }
                }
                EventKind::Delete => deletes.push(event),
                _ => batch.push(event),
            }
        }

        batch.extend(deletes);
        tracing::trace!(events = batch.len(), "took event batch");
        batch
    }

    /// Signals shutdown and wakes every waiter. Idempotent.
    pub fn quit(&self) {
        self.shared.quit.store(true, Ordering::Release);
        self.shared.cond.notify_all();
    }

    /// Returns whether shutdown was signalled.
    pub fn is_quitting(&self) -> bool {
        self.shared.quit.load(Ordering::Acquire)
    }
}
