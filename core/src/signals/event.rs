use crate::config::Threshold;

/// Per-frame progress report, published on every tick a timer is running.
#[derive(Debug, Clone, PartialEq)]
pub struct TickEvent {
    pub timer_id: String,
    /// Accumulated scaled time in seconds
    pub elapsed_secs: f64,
    /// Time until completion; infinite for unbounded timers
    pub remaining_secs: f64,
    /// Progress in `[0, 1]`; always 0 for unbounded timers
    pub fraction: f64,
}

/// State transitions in a timer's life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleKind {
    Started,
    Paused,
    Resumed,
    Completed,
    Reset,
    Destroyed,
    /// A looping timer wrapped back to zero instead of completing
    LoopRestart,
}

impl LifecycleKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Paused => "paused",
            Self::Resumed => "resumed",
            Self::Completed => "completed",
            Self::Reset => "reset",
            Self::Destroyed => "destroyed",
            Self::LoopRestart => "loop_restart",
        }
    }
}

/// A lifecycle transition, published at the moment it happens.
#[derive(Debug, Clone, PartialEq)]
pub struct LifecycleEvent {
    pub timer_id: String,
    pub kind: LifecycleKind,
    /// Elapsed seconds at the transition
    pub elapsed_secs: f64,
}

/// A configured time mark was crossed.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdEvent {
    pub timer_id: String,
    /// Elapsed seconds when the mark was detected, before any completion
    /// clamp, so overshoot past the duration is visible here
    pub elapsed_secs: f64,
    /// The threshold that fired
    pub threshold: Threshold,
}
