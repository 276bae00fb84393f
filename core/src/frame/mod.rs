//! Frame timing
//!
//! Timers never read a clock. They accumulate the deltas a frame source
//! pushes, which keeps them deterministic: any sequence of deltas produces
//! the same elapsed values regardless of wall time. [`ManualFrameSource`]
//! is advanced explicitly by a game loop or a test; [`run_interval`]
//! adapts one to the tokio clock for headless use.

mod interval;
mod manual;
mod source;

pub use interval::run_interval;
pub use manual::ManualFrameSource;
pub use source::{FrameHandle, FrameSource};
