use hashbrown::HashSet;

use crate::config::{Threshold, TimerConfig};
use crate::frame::FrameHandle;

/// Lifecycle state of a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerState {
    /// Constructed or reset, not yet accruing time
    Idle,
    Running,
    Paused,
    /// Ran out of duration or was stopped; terminal until started again
    Completed,
    /// Torn down; every further control call is a no-op
    Destroyed,
}

impl TimerState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Destroyed => "destroyed",
        }
    }
}

/// Mutable half of a timer, kept behind one `RefCell`.
pub(super) struct TimerRuntime {
    pub state: TimerState,
    pub elapsed_secs: f64,
    /// Runtime speed multiplier, kept `>= 0` by its writers
    pub speed: f64,
    /// Live threshold list, editable while the timer runs
    pub thresholds: Vec<Threshold>,
    /// Ids of one-shot thresholds that fired in the current loop iteration
    pub fired: HashSet<String>,
    /// Present exactly while `Running`
    pub frame: Option<FrameHandle>,
}

impl TimerRuntime {
    pub fn new(config: &TimerConfig) -> Self {
        Self {
            state: TimerState::Idle,
            elapsed_secs: 0.0,
            speed: config.speed.max(0.0),
            thresholds: config.thresholds.clone(),
            fired: HashSet::new(),
            frame: None,
        }
    }

    /// Keep elapsed inside `[0, duration]`, or just non-negative when the
    /// duration is not positive.
    pub fn clamp_elapsed(&mut self, duration_secs: f64) {
        if self.elapsed_secs < 0.0 {
            self.elapsed_secs = 0.0;
        } else if duration_secs > 0.0 && self.elapsed_secs > duration_secs {
            self.elapsed_secs = duration_secs;
        }
    }
}

/// Seconds until completion; infinite when the timer cannot complete.
pub(super) fn remaining_secs(duration_secs: f64, elapsed_secs: f64) -> f64 {
    if duration_secs > 0.0 {
        (duration_secs - elapsed_secs).max(0.0)
    } else {
        f64::INFINITY
    }
}

/// Completed fraction in `[0, 1]`; 0 when the timer cannot complete.
pub(super) fn fraction(duration_secs: f64, elapsed_secs: f64) -> f64 {
    if duration_secs > 0.0 {
        (elapsed_secs / duration_secs).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TimerConfig, TimerOptions};

    #[test]
    fn initial_speed_is_clamped() {
        let config = TimerConfig::resolve(TimerOptions {
            speed: -2.0,
            ..Default::default()
        });
        let runtime = TimerRuntime::new(&config);
        assert_eq!(runtime.speed, 0.0);
    }

    #[test]
    fn clamp_bounds_elapsed() {
        let config = TimerConfig::resolve(TimerOptions {
            duration_secs: 10.0,
            ..Default::default()
        });
        let mut runtime = TimerRuntime::new(&config);

        runtime.elapsed_secs = -1.0;
        runtime.clamp_elapsed(10.0);
        assert_eq!(runtime.elapsed_secs, 0.0);

        runtime.elapsed_secs = 12.0;
        runtime.clamp_elapsed(10.0);
        assert_eq!(runtime.elapsed_secs, 10.0);

        // Unbounded durations only clamp the lower side.
        runtime.elapsed_secs = 1e9;
        runtime.clamp_elapsed(0.0);
        assert_eq!(runtime.elapsed_secs, 1e9);
    }

    #[test]
    fn state_labels_are_snake_case() {
        assert_eq!(TimerState::Idle.label(), "idle");
        assert_eq!(TimerState::Running.label(), "running");
        assert_eq!(TimerState::Paused.label(), "paused");
        assert_eq!(TimerState::Completed.label(), "completed");
        assert_eq!(TimerState::Destroyed.label(), "destroyed");
    }

    #[test]
    fn remaining_and_fraction_math() {
        assert_eq!(remaining_secs(30.0, 12.0), 18.0);
        assert_eq!(remaining_secs(30.0, 40.0), 0.0);
        assert_eq!(remaining_secs(0.0, 5.0), f64::INFINITY);
        assert_eq!(remaining_secs(-3.0, 5.0), f64::INFINITY);

        assert_eq!(fraction(30.0, 12.0), 0.4);
        assert_eq!(fraction(30.0, 45.0), 1.0);
        assert_eq!(fraction(0.0, 5.0), 0.0);
    }
}
