use std::cell::RefCell;
use std::rc::Rc;

use super::source::{FrameHandle, FrameSource};

struct FrameSlot {
    key: u64,
    /// Taken out while the callback runs so no borrow is held across it
    callback: Option<Box<dyn FnMut(f64)>>,
    /// Tombstone left by a released handle until the sweep at end of pass
    dead: bool,
}

#[derive(Default)]
struct ManualInner {
    slots: Vec<FrameSlot>,
    next_key: u64,
}

/// Frame source driven by explicit [`advance`](ManualFrameSource::advance)
/// calls.
///
/// This is the engine's only frame source: game loops call `advance` once
/// per rendered frame, tests call it with exact deltas, and the tokio
/// driver in [`run_interval`](super::run_interval) calls it on a clock.
/// Callbacks run in subscription order.
#[derive(Clone, Default)]
pub struct ManualFrameSource {
    inner: Rc<RefCell<ManualInner>>,
}

impl ManualFrameSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live subscriptions, excluding ones released mid-pass.
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .slots
            .iter()
            .filter(|slot| !slot.dead)
            .count()
    }

    /// Run one frame: every callback subscribed before this call receives
    /// `dt_secs`. Callbacks subscribed during the pass first run on the
    /// next one.
    pub fn advance(&self, dt_secs: f64) {
        let keys: Vec<u64> = {
            let inner = self.inner.borrow();
            inner
                .slots
                .iter()
                .filter(|slot| !slot.dead)
                .map(|slot| slot.key)
                .collect()
        };

        for key in keys {
            let Some(mut callback) = self.take_callback(key) else {
                continue;
            };
            callback(dt_secs);
            // Handed back unless the slot was released while it ran, in
            // which case the callback drops here, outside any borrow.
            let orphaned = self.restore_callback(key, callback);
            drop(orphaned);
        }

        // Dead slots never hold a callback, so the sweep drops nothing.
        self.inner.borrow_mut().slots.retain(|slot| !slot.dead);
    }

    fn take_callback(&self, key: u64) -> Option<Box<dyn FnMut(f64)>> {
        let mut inner = self.inner.borrow_mut();
        let slot = inner.slots.iter_mut().find(|slot| slot.key == key)?;
        if slot.dead {
            return None;
        }
        slot.callback.take()
    }

    fn restore_callback(
        &self,
        key: u64,
        callback: Box<dyn FnMut(f64)>,
    ) -> Option<Box<dyn FnMut(f64)>> {
        let mut inner = self.inner.borrow_mut();
        match inner.slots.iter_mut().find(|slot| slot.key == key) {
            Some(slot) if !slot.dead => {
                slot.callback = Some(callback);
                None
            }
            _ => Some(callback),
        }
    }
}

impl FrameSource for ManualFrameSource {
    fn subscribe(&self, callback: Box<dyn FnMut(f64)>) -> FrameHandle {
        let key = {
            let mut inner = self.inner.borrow_mut();
            let key = inner.next_key;
            inner.next_key += 1;
            inner.slots.push(FrameSlot {
                key,
                callback: Some(callback),
                dead: false,
            });
            key
        };

        // Weak so a handle outliving its source cancels into nothing.
        let weak = Rc::downgrade(&self.inner);
        FrameHandle::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let removed = {
                let mut inner = inner.borrow_mut();
                match inner.slots.iter_mut().find(|slot| slot.key == key) {
                    Some(slot) => {
                        slot.dead = true;
                        // None while the callback is mid-run; the advance
                        // pass drops it instead.
                        slot.callback.take()
                    }
                    None => None,
                }
            };
            drop(removed);
        })
    }
}
