//! Event publication
//!
//! Every timer event travels two legs, in a fixed order:
//!
//! ```text
//!                         ┌─► TimerSignals (the timer's own channels)
//!   Timer ── publish ─────┤
//!                         └─► SignalHub (aggregate feed, all timers)
//! ```
//!
//! Handlers run synchronously on the publishing call, in subscription
//! order, per channel. [`Signal`] guarantees this stays safe when handlers
//! re-enter the engine: controlling timers, subscribing, or removing
//! subscriptions (their own included) from inside a handler is supported.

mod event;
mod hub;
mod signal;


pub use event::{LifecycleEvent, LifecycleKind, ThresholdEvent, TickEvent};
pub use hub::{SignalHub, TimerSignals};
pub use signal::{Signal, SubscriberKey};
