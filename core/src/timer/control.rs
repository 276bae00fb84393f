use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::config::{Threshold, TimerConfig, TimerOptions};
use crate::frame::FrameSource;
use crate::signals::{
    LifecycleEvent, LifecycleKind, SignalHub, ThresholdEvent, TickEvent, TimerSignals,
};
use crate::thresholds::check_thresholds;

use super::runtime::{self, TimerRuntime, TimerState};

struct TimerShared {
    config: TimerConfig,
    signals: TimerSignals,
    hub: SignalHub,
    frames: Rc<dyn FrameSource>,
    runtime: RefCell<TimerRuntime>,
}

/// A single timer instance.
///
/// `Timer` is a cheap handle: clones share one underlying instance, and
/// every control method takes `&self`, so handles can be captured freely
/// in event handlers. While `Running` the frame source holds such a
/// handle, which keeps the instance alive even if the host drops its own
/// clones; the instance frees itself when it completes, and a dropped
/// looping or stopwatch timer must be released with
/// [`destroy`](Timer::destroy).
///
/// Events for state changes, threshold crossings, and per-frame progress
/// are published synchronously, first on the timer's own
/// [`TimerSignals`], then on the attached [`SignalHub`]. Handlers may call
/// back into any control method, including on the timer that is currently
/// publishing.
pub struct Timer {
    shared: Rc<TimerShared>,
}

impl Clone for Timer {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rt = self.shared.runtime.borrow();
        f.debug_struct("Timer")
            .field("id", &self.shared.config.id)
            .field("state", &rt.state)
            .field("elapsed_secs", &rt.elapsed_secs)
            .finish_non_exhaustive()
    }
}

impl Timer {
    /// Resolve `options` and create a timer on the thread's global hub.
    pub fn new(options: TimerOptions, frames: Rc<dyn FrameSource>) -> Self {
        Self::with_hub(options, frames, SignalHub::global())
    }

    /// Resolve `options` and create a timer publishing into `hub`.
    pub fn with_hub(options: TimerOptions, frames: Rc<dyn FrameSource>, hub: SignalHub) -> Self {
        let config = TimerConfig::resolve(options);
        let runtime = RefCell::new(TimerRuntime::new(&config));
        let timer = Self {
            shared: Rc::new(TimerShared {
                config,
                signals: TimerSignals::new(),
                hub,
                frames,
                runtime,
            }),
        };
        if timer.shared.config.auto_start {
            timer.start();
        }
        timer
    }

    // ─── Control ────────────────────────────────────────────────────────────

    /// Begin accruing time. No-op while `Running` or after `destroy`.
    ///
    /// From `Paused` this resumes and fires `Resumed`; from `Idle` or
    /// `Completed` it fires `Started`. A completed timer keeps its elapsed
    /// time, so the next tick completes it again; call
    /// [`restart`](Timer::restart) for a fresh run.
    pub fn start(&self) {
        let kind = {
            let mut rt = self.shared.runtime.borrow_mut();
            let kind = match rt.state {
                TimerState::Running | TimerState::Destroyed => return,
                TimerState::Paused => LifecycleKind::Resumed,
                TimerState::Idle | TimerState::Completed => LifecycleKind::Started,
            };
            rt.state = TimerState::Running;
            if rt.frame.is_none() {
                let timer = self.clone();
                rt.frame = Some(
                    self.shared
                        .frames
                        .subscribe(Box::new(move |dt| timer.tick(dt))),
                );
            }
            kind
        };
        self.publish_lifecycle(kind);
    }

    /// Freeze elapsed time and release the frame subscription. No-op
    /// unless `Running`.
    pub fn pause(&self) {
        let handle = {
            let mut rt = self.shared.runtime.borrow_mut();
            if rt.state != TimerState::Running {
                return;
            }
            rt.state = TimerState::Paused;
            rt.frame.take()
        };
        drop(handle);
        self.publish_lifecycle(LifecycleKind::Paused);
    }

    /// Continue a paused timer. No-op unless `Paused`.
    pub fn resume(&self) {
        if self.state() != TimerState::Paused {
            return;
        }
        self.start();
    }

    /// Pause if running, resume if paused, start otherwise. Never resets
    /// or destroys.
    pub fn toggle(&self) {
        match self.state() {
            TimerState::Running => self.pause(),
            TimerState::Paused => self.resume(),
            TimerState::Idle | TimerState::Completed => self.start(),
            TimerState::Destroyed => {}
        }
    }

    /// Force completion now, from any state, without waiting for the
    /// duration: releases the frame subscription and fires `Completed` at
    /// the current elapsed time. No-op once `Completed` or `Destroyed`.
    pub fn stop(&self) {
        let handle = {
            let mut rt = self.shared.runtime.borrow_mut();
            if matches!(rt.state, TimerState::Completed | TimerState::Destroyed) {
                return;
            }
            rt.state = TimerState::Completed;
            rt.frame.take()
        };
        drop(handle);
        self.publish_lifecycle(LifecycleKind::Completed);
    }

    /// Return to `Idle` at zero elapsed with every one-shot threshold
    /// re-armed. Fires `Reset`. No-op after `destroy`.
    pub fn reset(&self) {
        let handle = {
            let mut rt = self.shared.runtime.borrow_mut();
            if rt.state == TimerState::Destroyed {
                return;
            }
            rt.state = TimerState::Idle;
            rt.elapsed_secs = 0.0;
            rt.fired.clear();
            rt.frame.take()
        };
        drop(handle);
        self.publish_lifecycle(LifecycleKind::Reset);
    }

    /// [`reset`](Timer::reset) followed by [`start`](Timer::start).
    pub fn restart(&self) {
        self.reset();
        self.start();
    }

    /// Grant `secs` more time by reducing elapsed. For a countdown this
    /// extends the remaining time, which is what callers adding time to a
    /// running objective expect.
    pub fn add_time(&self, secs: f64) {
        self.adjust_elapsed(-secs);
    }

    /// Take `secs` of remaining time away by increasing elapsed.
    pub fn subtract_time(&self, secs: f64) {
        self.adjust_elapsed(secs);
    }

    /// Set elapsed time directly, clamped to the valid range.
    ///
    /// Adjustments publish nothing and never complete a timer; crossing
    /// the duration is only acted on by the next tick.
    pub fn set_elapsed(&self, secs: f64) {
        let mut rt = self.shared.runtime.borrow_mut();
        if rt.state == TimerState::Destroyed {
            return;
        }
        rt.elapsed_secs = secs;
        rt.clamp_elapsed(self.shared.config.duration_secs);
    }

    fn adjust_elapsed(&self, delta_secs: f64) {
        let mut rt = self.shared.runtime.borrow_mut();
        if rt.state == TimerState::Destroyed {
            return;
        }
        rt.elapsed_secs += delta_secs;
        rt.clamp_elapsed(self.shared.config.duration_secs);
    }

    /// Set the runtime speed multiplier, clamped to `>= 0`.
    pub fn set_speed(&self, multiplier: f64) {
        let mut rt = self.shared.runtime.borrow_mut();
        if rt.state == TimerState::Destroyed {
            return;
        }
        rt.speed = multiplier.max(0.0);
    }

    /// Append a threshold to the live list.
    pub fn add_threshold(&self, threshold: Threshold) {
        let mut rt = self.shared.runtime.borrow_mut();
        if rt.state == TimerState::Destroyed {
            return;
        }
        rt.thresholds.push(threshold);
    }

    /// Remove every threshold with `id` and evict it from the fired set,
    /// so re-adding the id starts re-armed. Returns whether anything was
    /// removed.
    pub fn remove_threshold(&self, id: &str) -> bool {
        let mut rt = self.shared.runtime.borrow_mut();
        if rt.state == TimerState::Destroyed {
            return false;
        }
        let before = rt.thresholds.len();
        rt.thresholds.retain(|t| t.id != id);
        rt.fired.remove(id);
        before != rt.thresholds.len()
    }

    /// Tear the timer down, idempotently: the frame subscription is
    /// released first, so no tick can arrive once this returns, then
    /// `Destroyed` fires on both buses, then the timer's own buses close.
    pub fn destroy(&self) {
        let handle = {
            let mut rt = self.shared.runtime.borrow_mut();
            if rt.state == TimerState::Destroyed {
                return;
            }
            let handle = rt.frame.take();
            rt.state = TimerState::Destroyed;
            handle
        };
        drop(handle);
        self.publish_lifecycle(LifecycleKind::Destroyed);
        self.shared.signals.close_all();
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    pub fn id(&self) -> &str {
        &self.shared.config.id
    }

    pub fn config(&self) -> &TimerConfig {
        &self.shared.config
    }

    /// The timer's own event channels.
    pub fn signals(&self) -> &TimerSignals {
        &self.shared.signals
    }

    pub fn state(&self) -> TimerState {
        self.shared.runtime.borrow().state
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.shared.runtime.borrow().elapsed_secs
    }

    pub fn speed(&self) -> f64 {
        self.shared.runtime.borrow().speed
    }

    /// Seconds until completion; infinite for unbounded timers.
    pub fn remaining_secs(&self) -> f64 {
        runtime::remaining_secs(self.shared.config.duration_secs, self.elapsed_secs())
    }

    /// Progress in `[0, 1]`; 0 for unbounded timers.
    pub fn fraction(&self) -> f64 {
        runtime::fraction(self.shared.config.duration_secs, self.elapsed_secs())
    }

    /// Snapshot of the live threshold list.
    pub fn thresholds(&self) -> Vec<Threshold> {
        self.shared.runtime.borrow().thresholds.clone()
    }

    // ─── Tick ───────────────────────────────────────────────────────────────

    /// One frame of accrual; invoked by the frame subscription while
    /// `Running`.
    ///
    /// Order per tick: accrue `dt * speed` with elapsed floored at zero,
    /// evaluate thresholds against the pre-clamp elapsed and publish each
    /// crossing in list order, then either complete (clamp, final `Tick`,
    /// then `LoopRestart` or `Completed`) or publish a normal `Tick`.
    /// Every publish re-checks state first, so a handler that pauses,
    /// stops, or destroys the timer suppresses the remainder of the tick.
    /// Completion re-reads elapsed after the threshold handlers ran: a
    /// handler granting time on a low-time warning averts it.
    fn tick(&self, dt_secs: f64) {
        let crossed = {
            let mut rt = self.shared.runtime.borrow_mut();
            if rt.state != TimerState::Running {
                return;
            }
            rt.elapsed_secs += dt_secs * rt.speed;
            // A negative host delta may rewind time, but never below zero.
            if rt.elapsed_secs < 0.0 {
                rt.elapsed_secs = 0.0;
            }

            let TimerRuntime {
                thresholds,
                fired,
                elapsed_secs,
                ..
            } = &mut *rt;
            check_thresholds(
                thresholds,
                self.shared.config.direction,
                self.shared.config.duration_secs,
                *elapsed_secs,
                fired,
            )
        };

        for threshold in crossed {
            if self.state() != TimerState::Running {
                return;
            }
            self.publish_threshold(threshold);
        }

        let completing = {
            let mut rt = self.shared.runtime.borrow_mut();
            if rt.state != TimerState::Running {
                return;
            }
            let duration_secs = self.shared.config.duration_secs;
            let completing = self.shared.config.is_bounded() && rt.elapsed_secs >= duration_secs;
            if completing {
                rt.elapsed_secs = duration_secs;
            }
            completing
        };

        self.publish_tick();
        if !completing {
            return;
        }
        if self.state() != TimerState::Running {
            return;
        }

        if self.shared.config.looping {
            {
                let mut rt = self.shared.runtime.borrow_mut();
                rt.elapsed_secs = 0.0;
                rt.fired.clear();
            }
            self.publish_lifecycle(LifecycleKind::LoopRestart);
        } else {
            let handle = {
                let mut rt = self.shared.runtime.borrow_mut();
                rt.state = TimerState::Completed;
                rt.frame.take()
            };
            drop(handle);
            self.publish_lifecycle(LifecycleKind::Completed);
        }
    }

    // ─── Publishing ─────────────────────────────────────────────────────────
    //
    // Own bus first, then the hub. If a handler on the own bus destroyed
    // the timer, the hub leg is skipped so Destroyed stays the last event
    // the hub sees from this timer.

    fn publish_tick(&self) {
        let event = TickEvent {
            timer_id: self.shared.config.id.clone(),
            elapsed_secs: self.elapsed_secs(),
            remaining_secs: self.remaining_secs(),
            fraction: self.fraction(),
        };
        self.shared.signals.tick().publish(&event);
        if self.state() == TimerState::Destroyed {
            return;
        }
        self.shared.hub.tick().publish(&event);
    }

    fn publish_threshold(&self, threshold: Threshold) {
        let event = ThresholdEvent {
            timer_id: self.shared.config.id.clone(),
            elapsed_secs: self.elapsed_secs(),
            threshold,
        };
        self.shared.signals.threshold().publish(&event);
        if self.state() == TimerState::Destroyed {
            return;
        }
        self.shared.hub.threshold().publish(&event);
    }

    fn publish_lifecycle(&self, kind: LifecycleKind) {
        let event = LifecycleEvent {
            timer_id: self.shared.config.id.clone(),
            kind,
            elapsed_secs: self.elapsed_secs(),
        };
        tracing::debug!(
            id = %event.timer_id,
            event = kind.label(),
            state = self.state().label(),
            "Timer lifecycle event"
        );
        self.shared.signals.lifecycle().publish(&event);
        if kind != LifecycleKind::Destroyed && self.state() == TimerState::Destroyed {
            return;
        }
        self.shared.hub.lifecycle().publish(&event);
    }
}
