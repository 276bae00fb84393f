use std::time::Duration;

use tokio::time::MissedTickBehavior;

use super::manual::ManualFrameSource;

/// Drive a frame source from the tokio clock at a fixed period.
///
/// Deltas are measured between actual tick instants rather than assumed
/// from the period, so a late tick carries its true elapsed time. Never
/// returns; run it under `select!` or spawn it and abort the task to stop.
pub async fn run_interval(frames: ManualFrameSource, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // First tick completes immediately and is only the baseline.
    let mut last = ticker.tick().await;
    loop {
        let now = ticker.tick().await;
        frames.advance(now.duration_since(last).as_secs_f64());
        last = now;
    }
}
