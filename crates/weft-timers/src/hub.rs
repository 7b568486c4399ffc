//! Timer registration hub.
//!
//! Widgets register for periodic [`Event::Timer`] delivery either at a
//! fixed period or through a period-computing callback. Fixed-period
//! registrations sharing an identical period share one background loop;
//! every dynamic registration gets a dedicated loop. Loops whose last
//! registration goes away are torn down so no idle threads linger.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use weft_widgets::{EventSender, TeardownObserver, TimerId, WidgetId};

use crate::timer_loop::{Emit, LoopState, Period, Registration, TimerLoop};

struct HubInner {
    /// One shared loop per fixed period.
    fixed: HashMap<Duration, TimerLoop>,
    /// One dedicated loop per dynamic registration.
    dynamic: Vec<(TimerId, TimerLoop)>,
    next_timer: u64,
}

/// Groups timer registrations into background loops.
///
/// Cloning yields another handle to the same hub, which is how the
/// teardown observer and the application share it.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use weft_timers::TimerHub;
/// use weft_widgets::{NullWidget, RuntimeContext};
///
/// let mut ctx = RuntimeContext::new();
/// let root = ctx.add_root(Box::new(NullWidget));
/// let hub = TimerHub::new(ctx.sender());
/// ctx.add_teardown_observer(hub.observer());
///
/// let blink = hub.register(root, Duration::from_millis(500));
/// // ... later ...
/// hub.unregister(blink);
/// hub.shutdown();
/// ```
#[derive(Clone)]
pub struct TimerHub {
    inner: Arc<Mutex<HubInner>>,
    sender: EventSender,
}

impl TimerHub {
    /// Creates a hub delivering into the given queue.
    pub fn new(sender: EventSender) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HubInner {
                fixed: HashMap::new(),
                dynamic: Vec::new(),
                next_timer: 1,
            })),
            sender,
        }
    }

    /// Registers a widget for a fixed-period timer.
    ///
    /// Widgets sharing the exact same period share one loop instance.
    pub fn register(&self, widget: WidgetId, period: Duration) -> TimerId {
        let mut inner = self.inner.lock();
        let timer = TimerId::from_raw(inner.next_timer);
        inner.next_timer += 1;

        let sender = self.sender.clone();
        let timer_loop = inner.fixed.entry(period).or_insert_with(TimerLoop::new);
        timer_loop.add(Registration { widget, timer });
        if timer_loop.state() != LoopState::Running {
            timer_loop.start(Period::Fixed(period), Emit::Timer, sender);
        }

        tracing::debug!(?period, %timer, "registered fixed timer");
        timer
    }

    /// Registers a widget with a period-computing callback.
    ///
    /// The callback runs on the loop's thread before every sleep, so the
    /// rate can vary tick by tick. Each dynamic registration owns its
    /// loop.
    pub fn register_dynamic(
        &self,
        widget: WidgetId,
        period: Box<dyn FnMut() -> Duration + Send>,
    ) -> TimerId {
        let mut inner = self.inner.lock();
        let timer = TimerId::from_raw(inner.next_timer);
        inner.next_timer += 1;

        let mut timer_loop = TimerLoop::new();
        timer_loop.add(Registration { widget, timer });
        timer_loop.start(Period::Dynamic(period), Emit::Timer, self.sender.clone());
        inner.dynamic.push((timer, timer_loop));

        tracing::debug!(%timer, "registered dynamic timer");
        timer
    }

    /// Removes one registration. Returns whether it existed.
    ///
    /// The backing loop is torn down when this was its last registration.
    pub fn unregister(&self, timer: TimerId) -> bool {
        let mut inner = self.inner.lock();

        if let Some(index) = inner.dynamic.iter().position(|(t, _)| *t == timer) {
            let (_, mut timer_loop) = inner.dynamic.remove(index);
            timer_loop.shutdown();
            return true;
        }

        let mut emptied = None;
        let mut found = false;
        for (period, timer_loop) in inner.fixed.iter_mut() {
            if timer_loop.remove_where(|r| r.timer == timer) > 0 {
                found = true;
                if timer_loop.len() == 0 {
                    emptied = Some(*period);
                }
                break;
            }
        }
        if let Some(period) = emptied {
            if let Some(mut timer_loop) = inner.fixed.remove(&period) {
                timer_loop.shutdown();
            }
        }
        found
    }

    /// Removes every registration owned by `widget`. Returns how many
    /// were removed.
    ///
    /// Wired to widget teardown via [`observer`](Self::observer), so a
    /// destroyed widget can never receive another timer event.
    pub fn unregister_widget(&self, widget: WidgetId) -> usize {
        let mut inner = self.inner.lock();
        let mut removed = 0;

        let mut emptied = Vec::new();
        for (period, timer_loop) in inner.fixed.iter_mut() {
            let n = timer_loop.remove_where(|r| r.widget == widget);
            removed += n;
            if n > 0 && timer_loop.len() == 0 {
                emptied.push(*period);
            }
        }
        for period in emptied {
            if let Some(mut timer_loop) = inner.fixed.remove(&period) {
                timer_loop.shutdown();
            }
        }

        let mut index = 0;
        while index < inner.dynamic.len() {
            let n = inner.dynamic[index].1.remove_where(|r| r.widget == widget);
            removed += n;
            if n > 0 && inner.dynamic[index].1.len() == 0 {
                let (_, mut timer_loop) = inner.dynamic.remove(index);
                timer_loop.shutdown();
            } else {
                index += 1;
            }
        }

        if removed > 0 {
            tracing::debug!(removed, "auto-unregistered timers for destroyed widget");
        }
        removed
    }

    /// Returns a teardown observer that auto-unregisters destroyed
    /// widgets.
    pub fn observer(&self) -> TeardownObserver {
        let hub = self.clone();
        Box::new(move |widget| {
            hub.unregister_widget(widget);
        })
    }

    /// Returns the number of live loops (fixed + dynamic).
    pub fn loop_count(&self) -> usize {
        let inner = self.inner.lock();
        inner.fixed.len() + inner.dynamic.len()
    }

    /// Returns the number of registrations across all loops.
    pub fn timer_count(&self) -> usize {
        let inner = self.inner.lock();
        inner.fixed.values().map(TimerLoop::len).sum::<usize>()
            + inner.dynamic.iter().map(|(_, l)| l.len()).sum::<usize>()
    }

    /// Stops every loop and joins their threads. Idempotent.
    pub fn shutdown(&self) {
        let mut inner = self.inner.lock();
        for (_, mut timer_loop) in inner.fixed.drain() {
            timer_loop.shutdown();
        }
        for (_, mut timer_loop) in inner.dynamic.drain(..) {
            timer_loop.shutdown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Instant;
    use weft_widgets::{Event, EventQueue, NullWidget, RuntimeContext, WidgetTree};

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

    fn fixture() -> (WidgetTree, EventQueue, WidgetId, WidgetId) {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Box::new(NullWidget));
        let child = tree.insert(root, Box::new(NullWidget)).unwrap();
        (tree, EventQueue::new(), root, child)
    }

    #[test]
    fn test_same_period_shares_one_loop() {
        let (_tree, queue, a, b) = fixture();
        let hub = TimerHub::new(queue.sender());

        hub.register(a, Duration::from_millis(500));
        hub.register(b, Duration::from_millis(500));
        assert_eq!(hub.loop_count(), 1);
        assert_eq!(hub.timer_count(), 2);

        hub.register(a, Duration::from_millis(250));
        assert_eq!(hub.loop_count(), 2);

        hub.shutdown();
        assert_eq!(hub.loop_count(), 0);
    }

    #[test]
    fn test_timer_events_are_delivered() {
        let (_tree, queue, a, _b) = fixture();
        let hub = TimerHub::new(queue.sender());

        let timer = hub.register(a, Duration::from_millis(5));
        assert!(wait_until(|| !queue.is_empty()));

        let batch = queue.take_batch();
        assert!(batch
            .iter()
            .any(|e| matches!(e, Event::Timer { widget, timer: t } if *widget == a && *t == timer)));

        hub.shutdown();
    }

    #[test]
    fn test_unregister_last_tears_loop_down() {
        let (_tree, queue, a, b) = fixture();
        let hub = TimerHub::new(queue.sender());

        let ta = hub.register(a, Duration::from_millis(200));
        let tb = hub.register(b, Duration::from_millis(200));

        assert!(hub.unregister(ta));
        assert_eq!(hub.loop_count(), 1); // b still registered

        assert!(hub.unregister(tb));
        assert_eq!(hub.loop_count(), 0);

        assert!(!hub.unregister(tb)); // already gone
    }

    #[test]
    fn test_dynamic_registrations_get_dedicated_loops() {
        let (_tree, queue, a, _b) = fixture();
        let hub = TimerHub::new(queue.sender());

        let t1 = hub.register_dynamic(a, Box::new(|| Duration::from_millis(5)));
        let _t2 = hub.register_dynamic(a, Box::new(|| Duration::from_millis(5)));
        assert_eq!(hub.loop_count(), 2);

        assert!(wait_until(|| !queue.is_empty()));

        assert!(hub.unregister(t1));
        assert_eq!(hub.loop_count(), 1);

        hub.shutdown();
        assert_eq!(hub.loop_count(), 0);
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let (_tree, queue, a, _b) = fixture();
        let hub = TimerHub::new(queue.sender());
        hub.register(a, Duration::from_millis(50));

        hub.shutdown();
        hub.shutdown();
        assert_eq!(hub.timer_count(), 0);
    }

    #[test]
    fn test_widget_teardown_auto_unregisters() {
        let mut ctx = RuntimeContext::new();
        let root = ctx.add_root(Box::new(NullWidget));
        let doomed = ctx.add_widget(root, Box::new(NullWidget)).unwrap();

        let hub = TimerHub::new(ctx.sender());
        ctx.add_teardown_observer(hub.observer());

        hub.register(doomed, Duration::from_millis(300));
        hub.register_dynamic(doomed, Box::new(|| Duration::from_millis(300)));
        assert_eq!(hub.timer_count(), 2);

        ctx.remove_widget(doomed);
        ctx.process_pending();

        assert_eq!(hub.timer_count(), 0);
        assert_eq!(hub.loop_count(), 0);
        hub.shutdown();
    }
}
