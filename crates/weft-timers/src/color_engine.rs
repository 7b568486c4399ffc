//! The dynamic-color engine.
//!
//! A single background loop that ticks at a fixed rate and enqueues
//! [`Event::DynamicColor`](weft_widgets::Event) for every registered
//! widget. Widgets use it to animate their brushes (pulsing titles,
//! fading status lines) without owning a thread each; the registered
//! list is mutex-guarded exactly like a timer loop's.

use std::time::Duration;

use weft_widgets::{EventSender, TeardownObserver, TimerId, WidgetId};

use crate::timer_loop::{Emit, LoopState, Period, Registration, TimerLoop};

/// Periodic `DynamicColor` event source.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use weft_timers::DynamicColorEngine;
/// use weft_widgets::{NullWidget, RuntimeContext};
///
/// let mut ctx = RuntimeContext::new();
/// let root = ctx.add_root(Box::new(NullWidget));
///
/// let mut engine = DynamicColorEngine::new(ctx.sender(), Duration::from_millis(100));
/// engine.register(root);
/// engine.start();
/// // ... run the event loop ...
/// engine.shutdown();
/// ```
pub struct DynamicColorEngine {
    timer_loop: TimerLoop,
    sender: EventSender,
    period: Duration,
}

impl DynamicColorEngine {
    /// Creates an engine ticking at `period`, delivering into the given
    /// queue.
    pub fn new(sender: EventSender, period: Duration) -> Self {
        Self {
            timer_loop: TimerLoop::new(),
            sender,
            period,
        }
    }

    /// Registers a widget for color ticks. Callable while running.
    pub fn register(&self, widget: WidgetId) {
        self.timer_loop.add(Registration {
            widget,
            // Color ticks carry no timer id; the registration slot still
            // needs one.
            timer: TimerId::from_raw(0),
        });
    }

    /// Removes a widget's registration. Returns whether it existed.
    pub fn unregister(&self, widget: WidgetId) -> bool {
        self.timer_loop.remove_where(|r| r.widget == widget) > 0
    }

    /// Returns the number of registered widgets.
    pub fn len(&self) -> usize {
        self.timer_loop.len()
    }

    /// Returns `true` when no widget is registered.
    pub fn is_empty(&self) -> bool {
        self.timer_loop.len() == 0
    }

    /// Returns whether the engine thread is running.
    pub fn is_running(&self) -> bool {
        self.timer_loop.state() == LoopState::Running
    }

    /// Starts the engine thread.
    pub fn start(&mut self) {
        self.timer_loop.start(
            Period::Fixed(self.period),
            Emit::DynamicColor,
            self.sender.clone(),
        );
    }

    /// Stops the engine and joins its thread. Idempotent.
    pub fn shutdown(&mut self) {
        self.timer_loop.shutdown();
    }

    /// Returns a teardown observer that drops destroyed widgets from the
    /// registered list.
    ///
    /// The engine itself stays owned by the application; the observer
    /// only needs the shared registration set, which the loop handle
    /// clones internally.
    pub fn observer(&self) -> TeardownObserver {
        let registrations = self.timer_loop.registrations_handle();
        Box::new(move |widget| {
            registrations.lock().retain(|r| r.widget != widget);
        })
    }
}
