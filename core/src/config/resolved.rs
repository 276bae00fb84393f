//! Resolution of partial options into a complete timer configuration

use std::sync::atomic::{AtomicU64, Ordering};

use hourglass_types::TimerDisplayConfig;

use super::definition::{Direction, DisplaySpec, Threshold, ThresholdSpec, TimerOptions};

static NEXT_TIMER_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique generated id of the form `timer-{n}`.
fn generate_timer_id() -> String {
    let n = NEXT_TIMER_ID.fetch_add(1, Ordering::Relaxed);
    format!("timer-{n}")
}

/// Resolved display decision for a timer.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayMode {
    /// Headless timer, no widget
    Hidden,
    /// Widget with fully resolved styling
    Widget(TimerDisplayConfig),
}

impl DisplayMode {
    pub fn is_hidden(&self) -> bool {
        matches!(self, Self::Hidden)
    }
}

impl DisplaySpec {
    /// Collapse the three-way display field into a concrete mode.
    pub fn resolve(self) -> DisplayMode {
        match self {
            Self::Enabled(false) => DisplayMode::Hidden,
            Self::Enabled(true) | Self::Unset => {
                DisplayMode::Widget(TimerDisplayConfig::default())
            }
            Self::Options(options) => DisplayMode::Widget(TimerDisplayConfig::resolve(&options)),
        }
    }
}

/// Complete timer configuration with every default applied.
///
/// Resolution never fails: out-of-range numbers (negative durations, NaN
/// speeds) are kept as-is and handled by the runtime, which treats a
/// non-positive duration as unbounded and clamps speed at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerConfig {
    pub id: String,
    pub duration_secs: f64,
    pub direction: Direction,
    pub auto_start: bool,
    pub looping: bool,
    pub speed: f64,
    pub thresholds: Vec<Threshold>,
    pub metadata: toml::Table,
    pub display: DisplayMode,
}

impl TimerConfig {
    /// Apply package defaults to partial options.
    ///
    /// An omitted direction is inferred from the duration: bounded timers
    /// count down, unbounded timers count up.
    pub fn resolve(options: TimerOptions) -> Self {
        let id = match options.id {
            Some(id) if !id.is_empty() => id,
            _ => generate_timer_id(),
        };
        let direction = match options.direction {
            Some(direction) => direction,
            None if options.duration_secs > 0.0 => Direction::CountDown,
            None => Direction::CountUp,
        };
        let thresholds = options
            .thresholds
            .into_iter()
            .map(ThresholdSpec::into_threshold)
            .collect();

        Self {
            id,
            duration_secs: options.duration_secs,
            direction,
            auto_start: options.auto_start,
            looping: options.looping,
            speed: options.speed,
            thresholds,
            metadata: options.metadata,
            display: options.display.resolve(),
        }
    }

    /// A bounded timer has a positive finite duration and can complete.
    pub fn is_bounded(&self) -> bool {
        self.duration_secs > 0.0 && self.duration_secs.is_finite()
    }
}
