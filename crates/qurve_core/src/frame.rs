//! Display-tick requests
//!
//! The engine never owns an event loop. When it needs a repaint it asks the
//! host for a frame through [`FrameRequester`]; the host answers by calling
//! the chart's flush on its next display refresh.

use std::cell::Cell;
use std::rc::Rc;

/// Host hook for scheduling a frame.
pub trait FrameRequester {
    /// Ask for one future flush. Called at most once per pending repaint.
    fn request_frame(&self);
}

impl<F: Fn()> FrameRequester for F {
    fn request_frame(&self) {
        self()
    }
}

/// Requester for headless hosts and tests: counts requests and lets the
/// caller decide when frames happen.
#[derive(Debug, Default)]
pub struct ManualFrames {
    requested: Cell<usize>,
    pending: Cell<bool>,
}

impl ManualFrames {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Total frames requested so far.
    pub fn requests(&self) -> usize {
        self.requested.get()
    }

    /// Whether a frame has been requested since the last [`take_pending`].
    ///
    /// [`take_pending`]: ManualFrames::take_pending
    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Consume the pending request, returning whether there was one.
    pub fn take_pending(&self) -> bool {
        self.pending.replace(false)
    }
}

impl FrameRequester for ManualFrames {
    fn request_frame(&self) {
        self.requested.set(self.requested.get() + 1);
        self.pending.set(true);
        tracing::trace!(requests = self.requested.get(), "frame requested");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_frames_counts_and_clears() {
        let frames = ManualFrames::new();
        frames.request_frame();
        frames.request_frame();
        assert_eq!(frames.requests(), 2);
        assert!(frames.take_pending());
        assert!(!frames.is_pending());
    }

    #[test]
    fn closures_are_requesters() {
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let req: Box<dyn FrameRequester> = Box::new(move || h.set(h.get() + 1));
        req.request_frame();
        assert_eq!(hits.get(), 1);
    }
}
