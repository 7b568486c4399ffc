//! Timer and animation loops for Weft.
//!
//! Background threads here never touch widget state: every tick is an
//! owned [`Event`](weft_widgets::Event) appended to the owning thread's
//! queue through an [`EventSender`](weft_widgets::EventSender).
//!
//! - [`TimerHub`]: fixed-period registrations grouped into shared loops,
//!   dynamic (callback-period) registrations with dedicated loops, and
//!   auto-unregistration on widget teardown
//! - [`DynamicColorEngine`]: one loop emitting color ticks for brush
//!   animation
//! - [`LoopState`]: the `Idle -> Running -> Stopping -> Stopped` lifecycle
//!   every loop follows; shutdown is cooperative and observed without
//!   waiting out the sleep interval

#![warn(missing_docs)]

mod color_engine;
mod hub;
mod timer_loop;

pub use color_engine::DynamicColorEngine;
pub use hub::TimerHub;
pub use timer_loop::LoopState;
