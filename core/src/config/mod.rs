//! Timer configuration
//!
//! Two-layer model: [`TimerOptions`] is the partial, serializable form in
//! which timers are defined (TOML files, templates, call sites), and
//! [`TimerConfig`] is the fully resolved form the runtime consumes. The
//! split keeps files terse while the engine never has to re-check defaults.

mod definition;
mod error;
mod loader;
mod resolved;

pub use definition::{
    Direction, DisplaySpec, Threshold, ThresholdSpec, TimerOptions, countdown_thresholds,
};
pub use error::ConfigError;
pub use loader::{
    CollectionHeader, TemplateSet, load_timers_from_dir, load_timers_from_file,
    save_timers_to_file,
};
pub use resolved::{DisplayMode, TimerConfig};
