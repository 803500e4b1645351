//! Frame-boundary callback queue
//!
//! State that feeds a render pass must not change while that pass is running.
//! Work that has to mutate such state is queued here and the host loop drains
//! the queue once per frame, after drawing and before the next draw.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use tracing::trace;

type FrameCallback = Box<dyn FnOnce()>;

#[derive(Default)]
pub struct FrameScheduler {
    queue: RefCell<VecDeque<FrameCallback>>,
    redraw_requested: Cell<bool>,
}

impl std::fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("pending", &self.pending())
            .field("redraw_requested", &self.redraw_requested.get())
            .finish()
    }
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a callback for the next frame boundary
    pub fn schedule(&self, callback: impl FnOnce() + 'static) {
        self.queue.borrow_mut().push_back(Box::new(callback));
    }

    /// Number of callbacks waiting for the next boundary
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Run every callback queued before this call, in FIFO order.
    ///
    /// Callbacks scheduled while draining are left for the following boundary.
    pub fn run_frame_callbacks(&self) -> usize {
        let batch = std::mem::take(&mut *self.queue.borrow_mut());
        let count = batch.len();
        for callback in batch {
            callback();
        }
        if count > 0 {
            trace!(count, "ran frame callbacks");
        }
        count
    }

    /// Ask the host to draw another frame
    pub fn request_redraw(&self) {
        self.redraw_requested.set(true);
    }

    /// Consume a pending redraw request
    pub fn take_redraw_request(&self) -> bool {
        self.redraw_requested.replace(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_callbacks_are_deferred() {
        let scheduler = FrameScheduler::new();
        let ran = Rc::new(Cell::new(false));
        let flag = ran.clone();
        scheduler.schedule(move || flag.set(true));

        assert!(!ran.get());
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.run_frame_callbacks(), 1);
        assert!(ran.get());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_fifo_order() {
        let scheduler = FrameScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for i in 0..3 {
            let log = log.clone();
            scheduler.schedule(move || log.borrow_mut().push(i));
        }
        scheduler.run_frame_callbacks();
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_nested_schedule_waits_for_next_boundary() {
        let scheduler = Rc::new(FrameScheduler::new());
        let ran = Rc::new(Cell::new(0));

        let inner_scheduler = scheduler.clone();
        let inner_ran = ran.clone();
        scheduler.schedule(move || {
            inner_ran.set(inner_ran.get() + 1);
            let again = inner_ran.clone();
            inner_scheduler.schedule(move || again.set(again.get() + 10));
        });

        assert_eq!(scheduler.run_frame_callbacks(), 1);
        assert_eq!(ran.get(), 1);
        assert_eq!(scheduler.run_frame_callbacks(), 1);
        assert_eq!(ran.get(), 11);
    }

    #[test]
    fn test_redraw_request_is_consumed() {
        let scheduler = FrameScheduler::new();
        assert!(!scheduler.take_redraw_request());
        scheduler.request_redraw();
        assert!(scheduler.take_redraw_request());
        assert!(!scheduler.take_redraw_request());
    }
}
