use std::fmt;

/// A provider of per-frame time deltas.
///
/// Running timers subscribe a callback and receive the seconds of real
/// time since the previous frame on every frame. Implementations must
/// tolerate re-entrant use from inside a callback: subscribing, releasing
/// another subscription, or releasing the callback's own handle mid-call.
pub trait FrameSource {
    fn subscribe(&self, callback: Box<dyn FnMut(f64)>) -> FrameHandle;
}

/// An active subscription on a [`FrameSource`]; dropping it unsubscribes.
pub struct FrameHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl FrameHandle {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }
}

impl Drop for FrameHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for FrameHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameHandle").finish_non_exhaustive()
    }
}
