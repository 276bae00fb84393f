//! Timer option types
//!
//! Options are the partial, serializable form of a timer configuration:
//! every field can be omitted and takes a package default during
//! resolution. Timer templates loaded from TOML files deserialize into
//! [`TimerOptions`].

use hourglass_types::TimerDisplayOptions;
use serde::{Deserialize, Serialize};

/// Count direction for a timer.
///
/// When omitted from the options it is inferred: `CountDown` for a bounded
/// duration, `CountUp` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    CountUp,
    CountDown,
}

/// A configured time mark at which a notification fires.
///
/// For `CountDown` timers `at_secs` is measured against remaining time; for
/// `CountUp` timers it is measured against elapsed time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    /// Unique within one timer's list (empty = generated from `at_secs`)
    #[serde(default)]
    pub id: String,

    /// The time mark in seconds
    pub at_secs: f64,

    /// Fire on every tick the mark is crossed, not just once per loop
    #[serde(default)]
    pub repeating: bool,
}

/// Threshold shorthand: a bare number is a one-shot threshold at that time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThresholdSpec {
    At(f64),
    Full(Threshold),
}

impl ThresholdSpec {
    /// Normalize to a full threshold; bare numbers and empty ids get an
    /// `at-{time}` id.
    pub fn into_threshold(self) -> Threshold {
        match self {
            Self::At(at_secs) => Threshold {
                id: format!("at-{at_secs}"),
                at_secs,
                repeating: false,
            },
            Self::Full(mut threshold) => {
                if threshold.id.is_empty() {
                    threshold.id = format!("at-{}", threshold.at_secs);
                }
                threshold
            }
        }
    }
}

/// The `display` field of the options.
///
/// Three-way: `false` marks a headless (server-authoritative) timer, a table
/// overrides the default widget field-by-field, and an omitted field means
/// the full default widget.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DisplaySpec {
    /// Explicit toggle; `false` disables the widget entirely
    Enabled(bool),
    /// Partial widget overrides
    Options(TimerDisplayOptions),
    /// Field omitted: resolve to the default widget
    #[default]
    Unset,
}

impl DisplaySpec {
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }
}

/// Partial timer configuration.
///
/// Missing fields take package defaults during
/// [`TimerConfig::resolve`](super::TimerConfig::resolve).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerOptions {
    /// Explicit timer id (empty or omitted = generated)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    // ─── Timing ─────────────────────────────────────────────────────────────
    /// Total duration in seconds (0 = unbounded stopwatch)
    #[serde(default)]
    pub duration_secs: f64,

    /// Count direction; inferred from the duration when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,

    /// Speed multiplier applied to every frame delta
    #[serde(default = "default_speed")]
    pub speed: f64,

    // ─── Behavior ───────────────────────────────────────────────────────────
    /// Start immediately on construction
    #[serde(default)]
    pub auto_start: bool,

    /// Restart from zero on completion instead of finishing
    #[serde(default, rename = "loop")]
    pub looping: bool,

    /// Time marks that fire threshold events
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub thresholds: Vec<ThresholdSpec>,

    // ─── Passthrough ────────────────────────────────────────────────────────
    /// Opaque key/value bag handed to consumers unchanged
    #[serde(default, skip_serializing_if = "toml::Table::is_empty")]
    pub metadata: toml::Table,

    /// Widget display: `false`, a partial table, or omitted for defaults
    #[serde(default, skip_serializing_if = "DisplaySpec::is_unset")]
    pub display: DisplaySpec,
}

impl Default for TimerOptions {
    fn default() -> Self {
        Self {
            id: None,
            duration_secs: 0.0,
            direction: None,
            speed: 1.0,
            auto_start: false,
            looping: false,
            thresholds: Vec::new(),
            metadata: toml::Table::new(),
            display: DisplaySpec::Unset,
        }
    }
}

/// One-shot thresholds for a spoken or visual countdown: `from_secs` down
/// to 1, ids `count-{n}`.
///
/// On a `CountDown` timer each fires when that many whole seconds remain;
/// pair with a threshold handler that announces `n`.
pub fn countdown_thresholds(from_secs: u32) -> Vec<Threshold> {
    (1..=from_secs)
        .rev()
        .map(|n| Threshold {
            id: format!("count-{n}"),
            at_secs: f64::from(n),
            repeating: false,
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// Serde Helpers
// ═══════════════════════════════════════════════════════════════════════════

fn default_speed() -> f64 {
    1.0
}
