//! One background timer loop.
//!
//! A [`TimerLoop`] owns a thread that sleeps for its interval, then
//! enqueues one event per registered widget. The registration set is the
//! only state shared with the owning thread; its mutex is held for
//! container operations only, never across delivery (delivery is queue
//! append on a snapshot).
//!
//! The loop is a small state machine, `Idle -> Running -> Stopping ->
//! Stopped`, driven by [`start`](TimerLoop::start) and
//! [`shutdown`](TimerLoop::shutdown). Shutdown is observed without
//! waiting out the sleep: the sleeping thread parks on a condvar that the
//! stop signal pokes.

use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use weft_widgets::{Event, EventSender, TimerId, WidgetId};

/// Lifecycle of a timer loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Created, thread not yet spawned.
    Idle,
    /// Thread running and delivering ticks.
    Running,
    /// Stop requested, thread winding down.
    Stopping,
    /// Thread exited.
    Stopped,
}

/// What a loop emits on each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Emit {
    /// `Event::Timer` per registration.
    Timer,
    /// `Event::DynamicColor` per registration.
    DynamicColor,
}

/// One (widget, timer-id) registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Registration {
    pub widget: WidgetId,
    pub timer: TimerId,
}

struct Control {
    state: Mutex<LoopState>,
    cond: Condvar,
}

/// Shared registration set of one loop.
///
/// Its mutex guards container operations only; tick delivery works on a
/// snapshot taken under the lock.
pub(crate) type SharedRegistrations = Arc<Mutex<Vec<Registration>>>;

/// How a loop determines its next interval.
pub(crate) enum Period {
    /// The same interval every tick.
    Fixed(Duration),
    /// A callback computing each interval (variable-rate animation).
    Dynamic(Box<dyn FnMut() -> Duration + Send>),
}

/// A background loop delivering periodic events to its registrations.
pub(crate) struct TimerLoop {
    control: Arc<Control>,
    registrations: SharedRegistrations,
    handle: Option<JoinHandle<()>>,
}

impl TimerLoop {
    pub(crate) fn new() -> Self {
        Self {
            control: Arc::new(Control {
                state: Mutex::new(LoopState::Idle),
                cond: Condvar::new(),
            }),
            registrations: Arc::new(Mutex::new(Vec::new())),
            handle: None,
        }
    }

    /// Returns the current lifecycle state.
    pub(crate) fn state(&self) -> LoopState {
        *self.control.state.lock()
    }

    /// Adds a registration. Callable while the loop runs.
    pub(crate) fn add(&self, registration: Registration) {
        self.registrations.lock().push(registration);
    }

    /// Removes every registration matching the predicate; returns how
    /// many were removed.
    pub(crate) fn remove_where(&self, mut predicate: impl FnMut(&Registration) -> bool) -> usize {
        let mut registrations = self.registrations.lock();
        let before = registrations.len();
        registrations.retain(|r| !predicate(r));
        before - registrations.len()
    }

    /// Returns the number of registrations.
    pub(crate) fn len(&self) -> usize {
        self.registrations.lock().len()
    }

    /// Returns a handle to the shared registration set.
    pub(crate) fn registrations_handle(&self) -> SharedRegistrations {
        Arc::clone(&self.registrations)
    }

    /// Spawns the loop thread. Only valid from `Idle` or `Stopped`.
    pub(crate) fn start(&mut self, mut period: Period, emit: Emit, sender: EventSender) {
        {
            let mut state = self.control.state.lock();
            match *state {
                LoopState::Idle | LoopState::Stopped => *state = LoopState::Running,
                LoopState::Running | LoopState::Stopping => return,
            }
        }

        let control = Arc::clone(&self.control);
        let registrations = Arc::clone(&self.registrations);
        self.handle = Some(thread::spawn(move || {
            tracing::debug!("timer loop started");
            loop {
                let interval = match &mut period {
                    Period::Fixed(d) => *d,
                    Period::Dynamic(f) => f(),
                };

                // Sleep, but wake immediately when a stop is requested.
                {
                    let mut state = control.state.lock();
                    if *state != LoopState::Running {
                        break;
                    }
                    control.cond.wait_for(&mut state, interval);
                    if *state != LoopState::Running {
                        break;
                    }
                }

                if sender.is_closed() {
                    break;
                }

                // Snapshot under the lock, deliver outside it.
                let snapshot: Vec<Registration> = registrations.lock().clone();
                for registration in snapshot {
                    let event = match emit {
                        Emit::Timer => Event::Timer {
                            widget: registration.widget,
                            timer: registration.timer,
                        },
                        Emit::DynamicColor => Event::DynamicColor {
                            widget: registration.widget,
                        },
                    };
                    sender.send(event);
                }
            }

            *control.state.lock() = LoopState::Stopped;
            control.cond.notify_all();
            tracing::debug!("timer loop stopped");
        }));
    }

    /// Requests a stop without joining. Safe from any thread, including
    /// the loop's own.
    pub(crate) fn request_stop(&self) {
        let mut state = self.control.state.lock();
        if *state == LoopState::Running {
            *state = LoopState::Stopping;
        }
        self.control.cond.notify_all();
    }

    /// Stops the loop and waits for the thread to exit. Idempotent.
    ///
    /// When called from the loop's own thread (a handler running inside a
    /// tick), the join is skipped — the thread unwinds on its own — so
    /// shutdown never deadlocks.
    pub(crate) fn shutdown(&mut self) {
        self.request_stop();
        if let Some(handle) = self.handle.take() {
            if handle.thread().id() == thread::current().id() {
                return;
            }
            let _ = handle.join();
        }
    }
}

impl Drop for TimerLoop {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use weft_widgets::{EventQueue, NullWidget, WidgetTree};

    fn wait_until(mut cond: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(2);
        while Instant::now() < deadline {
            if cond() {
                return true;
            }
            thread::sleep(Duration::from_millis(2));
        }
        false
    }

    #[test]
    fn test_loop_state_machine() {
        let mut tree = WidgetTree::new();
        let widget = tree.insert_root(Box::new(NullWidget));
        let queue = EventQueue::new();

        let mut timer_loop = TimerLoop::new();
        assert_eq!(timer_loop.state(), LoopState::Idle);

        timer_loop.add(Registration {
            widget,
            timer: TimerId::from_raw(1),
        });
        timer_loop.start(
            Period::Fixed(Duration::from_millis(5)),
            Emit::Timer,
            queue.sender(),
        );
        assert_eq!(timer_loop.state(), LoopState::Running);

        assert!(wait_until(|| !queue.is_empty()));

        timer_loop.shutdown();
        assert_eq!(timer_loop.state(), LoopState::Stopped);

        let batch = queue.take_batch();
        assert!(batch
            .iter()
            .any(|e| matches!(e, Event::Timer { widget: w, .. } if *w == widget)));
    }

    #[test]
    fn test_shutdown_is_idempotent_and_fast() {
        let queue = EventQueue::new();
        let mut timer_loop = TimerLoop::new();
        timer_loop.start(
            Period::Fixed(Duration::from_secs(60)),
            Emit::Timer,
            queue.sender(),
        );

        // Despite the one-minute interval, the stop signal wakes the
        // thread immediately.
        let begin = Instant::now();
        timer_loop.shutdown();
        timer_loop.shutdown();
        assert!(begin.elapsed() < Duration::from_secs(5));
        assert_eq!(timer_loop.state(), LoopState::Stopped);
    }

    #[test]
    fn test_dynamic_period_callback_drives_interval() {
        let mut tree = WidgetTree::new();
        let widget = tree.insert_root(Box::new(NullWidget));
        let queue = EventQueue::new();

        let mut timer_loop = TimerLoop::new();
        timer_loop.add(Registration {
            widget,
            timer: TimerId::from_raw(2),
        });
        timer_loop.start(
            Period::Dynamic(Box::new(|| Duration::from_millis(3))),
            Emit::Timer,
            queue.sender(),
        );

        assert!(wait_until(|| queue.len() >= 2));
        timer_loop.shutdown();
    }

    #[test]
    fn test_registration_changes_race_free_with_delivery() {
        let mut tree = WidgetTree::new();
        let widget = tree.insert_root(Box::new(NullWidget));
        let queue = EventQueue::new();

        let mut timer_loop = TimerLoop::new();
        timer_loop.start(
            Period::Fixed(Duration::from_millis(1)),
            Emit::Timer,
            queue.sender(),
        );

        // Register and unregister repeatedly while the loop ticks.
        for i in 0..50 {
            timer_loop.add(Registration {
                widget,
                timer: TimerId::from_raw(i),
            });
            timer_loop.remove_where(|r| r.timer == TimerId::from_raw(i));
        }
        assert_eq!(timer_loop.len(), 0);
        timer_loop.shutdown();
    }
}
