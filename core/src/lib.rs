pub mod config;
pub mod frame;
pub mod signals;
pub mod thresholds;
pub mod timer;

// Re-exports for convenience
pub use config::{
    ConfigError, Direction, DisplayMode, DisplaySpec, TemplateSet, Threshold, ThresholdSpec,
    TimerConfig, TimerOptions, countdown_thresholds, load_timers_from_dir, load_timers_from_file,
    save_timers_to_file,
};
pub use frame::{FrameHandle, FrameSource, ManualFrameSource, run_interval};
pub use signals::{
    LifecycleEvent, LifecycleKind, Signal, SignalHub, SubscriberKey, ThresholdEvent, TickEvent,
    TimerSignals,
};
pub use thresholds::check_thresholds;
pub use timer::{Timer, TimerState};
