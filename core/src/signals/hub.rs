use super::event::{LifecycleEvent, ThresholdEvent, TickEvent};
use super::signal::Signal;

/// The three event channels owned by a single timer.
///
/// Channels close when the owning timer is destroyed: their handlers are
/// dropped and later subscribes are inert.
#[derive(Debug, Clone, Default)]
pub struct TimerSignals {
    tick: Signal<TickEvent>,
    lifecycle: Signal<LifecycleEvent>,
    threshold: Signal<ThresholdEvent>,
}

impl TimerSignals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&self) -> &Signal<TickEvent> {
        &self.tick
    }

    pub fn lifecycle(&self) -> &Signal<LifecycleEvent> {
        &self.lifecycle
    }

    pub fn threshold(&self) -> &Signal<ThresholdEvent> {
        &self.threshold
    }

    /// Shut all three channels down. Called exactly once, on destroy.
    pub fn close_all(&self) {
        self.tick.close();
        self.lifecycle.close();
        self.threshold.close();
    }
}

/// Aggregate feed carrying the events of every timer attached to it.
///
/// Each event reaches a timer's own [`TimerSignals`] first and the hub
/// second. The hub never closes; destroying a timer only ends that timer's
/// contributions. Events carry the timer id, so one hub handler can fan
/// out to per-timer logic (UI widget lists, sound cue routers).
#[derive(Debug, Clone, Default)]
pub struct SignalHub {
    tick: Signal<TickEvent>,
    lifecycle: Signal<LifecycleEvent>,
    threshold: Signal<ThresholdEvent>,
}

thread_local! {
    static GLOBAL_HUB: SignalHub = SignalHub::new();
}

impl SignalHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// The ambient hub timers attach to by default.
    ///
    /// One instance per thread; since the engine is single-threaded that
    /// is the process-wide hub in practice. Tests that need isolation pass
    /// their own hub via [`Timer::with_hub`](crate::timer::Timer::with_hub)
    /// instead.
    pub fn global() -> Self {
        GLOBAL_HUB.with(Self::clone)
    }

    pub fn tick(&self) -> &Signal<TickEvent> {
        &self.tick
    }

    pub fn lifecycle(&self) -> &Signal<LifecycleEvent> {
        &self.lifecycle
    }

    pub fn threshold(&self) -> &Signal<ThresholdEvent> {
        &self.threshold
    }
}
