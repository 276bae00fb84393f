//! Timer engine
//!
//! This module provides:
//! - **Timer**: A shared-handle timer instance with total control methods
//! - **TimerState**: The lifecycle state machine
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    TimerOptions (TOML config)                    │
//! │   "90s countdown, warn at 30s and 10s remaining, auto-start"    │
//! └─────────────────────────────────────────────────────────────────┘
//!                              │
//!                     TimerConfig::resolve
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Timer (state machine)                        │
//! │   "Running, 62.4s elapsed, 27.6s remaining, 'w30' fired"        │
//! └─────────────────────────────────────────────────────────────────┘
//!        ▲                                             │
//!        │ frame deltas                                │ events
//!   FrameSource                                        ▼
//!                            TimerSignals (own bus) ─► SignalHub
//! ```
//!
//! A timer accrues scaled frame deltas while `Running`, evaluates its
//! thresholds each tick, and publishes every event synchronously to its
//! own bus and then the hub.

mod control;
mod runtime;


pub use control::Timer;
pub use runtime::TimerState;
