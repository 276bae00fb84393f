//! Threshold crossing evaluation
//!
//! Pure logic shared by the timer tick path. Kept free of timer state so
//! crossing semantics can be tested against bare inputs.

use hashbrown::HashSet;

use crate::config::{Direction, Threshold};

/// Evaluate which thresholds fire at the given elapsed time.
///
/// `fired` carries the ids of one-shot thresholds that already fired this
/// run; newly crossed one-shots are recorded in it. Repeating thresholds
/// are level-triggered: they fire on every evaluation where the mark is
/// crossed and ignore `fired` entirely.
///
/// `CountUp` marks are measured against elapsed time. `CountDown` marks
/// are measured against remaining time, which is infinite when
/// `duration_secs` is not positive, so a countdown mark on an unbounded
/// timer never fires. Results preserve configuration order.
pub fn check_thresholds(
    thresholds: &[Threshold],
    direction: Direction,
    duration_secs: f64,
    elapsed_secs: f64,
    fired: &mut HashSet<String>,
) -> Vec<Threshold> {
    let mut crossed = Vec::new();

    for threshold in thresholds {
        let reached = match direction {
            Direction::CountUp => elapsed_secs >= threshold.at_secs,
            Direction::CountDown => {
                let remaining_secs = if duration_secs > 0.0 {
                    duration_secs - elapsed_secs
                } else {
                    f64::INFINITY
                };
                remaining_secs <= threshold.at_secs
            }
        };
        if !reached {
            continue;
        }

        if threshold.repeating {
            crossed.push(threshold.clone());
        } else if fired.insert(threshold.id.clone()) {
            crossed.push(threshold.clone());
        }
    }

    crossed
}
