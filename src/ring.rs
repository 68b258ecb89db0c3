//! Percentage counter and progress ring.
//!
//! [`RingAnimation::frame`] is a pure function of the frame timestamp; the
//! frame loop in [`run_ring`] just keeps asking for the next frame until the
//! animation reports it is done, then staggers in the result content.

use std::rc::Rc;

use crate::schedule::Scheduler;

pub const RING_RADIUS: f64 = 52.0;
pub const RING_CIRCUMFERENCE: f64 = 2.0 * std::f64::consts::PI * RING_RADIUS;
pub const RING_DURATION_MS: f64 = 2200.0;
pub const RESULT_REVEAL_STAGGER_MS: u32 = 350;

/// Cubic ease-out, `1 - (1 - p)^3`. Input is clamped to `[0, 1]`.
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// Everything one frame needs to draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingFrame {
    pub progress: f64,
    pub eased: f64,
    pub percentage: u32,
    pub stroke_offset: f64,
}

impl RingFrame {
    pub fn is_done(&self) -> bool {
        self.progress >= 1.0
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RingAnimation {
    start_ms: f64,
    duration_ms: f64,
}

impl RingAnimation {
    pub fn new(start_ms: f64) -> Self {
        Self {
            start_ms,
            duration_ms: RING_DURATION_MS,
        }
    }

    pub fn frame(&self, now: f64) -> RingFrame {
        // A frame timestamp may predate the start sample; clamp instead of
        // drawing a negative ring.
        let progress = ((now - self.start_ms) / self.duration_ms).clamp(0.0, 1.0);
        let eased = ease_out_cubic(progress);
        RingFrame {
            progress,
            eased,
            percentage: (eased * 100.0).round() as u32,
            stroke_offset: RING_CIRCUMFERENCE * (1.0 - eased),
        }
    }
}

/// Delay before the i-th `.result-reveal` element is revealed.
pub fn result_reveal_delay(index: usize) -> u32 {
    index as u32 * RESULT_REVEAL_STAGGER_MS
}

/// What the ring loop drives.
pub trait ResultsView {
    fn render_ring(&self, frame: &RingFrame);
    /// Number of staggered content elements around the ring.
    fn result_reveal_count(&self) -> usize;
    fn reveal_result(&self, index: usize);
}

/// Start the ring/percentage animation. One frame per display refresh until
/// progress reaches 1, then every result element is revealed `i * 350ms` later.
pub fn run_ring(scheduler: Rc<dyn Scheduler>, view: Rc<dyn ResultsView>) {
    let anim = RingAnimation::new(scheduler.now());
    request_ring_frame(scheduler, view, anim);
}

fn request_ring_frame(
    scheduler: Rc<dyn Scheduler>,
    view: Rc<dyn ResultsView>,
    anim: RingAnimation,
) {
    let sched = scheduler.clone();
    scheduler.next_frame(Box::new(move |ts| {
        let frame = anim.frame(ts);
        view.render_ring(&frame);
        if frame.is_done() {
            reveal_result_content(sched.as_ref(), view);
        } else {
            request_ring_frame(sched, view, anim);
        }
    }));
}

fn reveal_result_content(scheduler: &dyn Scheduler, view: Rc<dyn ResultsView>) {
    let count = view.result_reveal_count();
    log::debug!("ring complete, revealing {count} result elements");
    for i in 0..count {
        let view = view.clone();
        scheduler.schedule(result_reveal_delay(i), Box::new(move || view.reveal_result(i)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ManualScheduler;
    use std::cell::{Cell, RefCell};

    #[test]
    fn endpoints() {
        let anim = RingAnimation::new(1_000.0);
        let f0 = anim.frame(1_000.0);
        assert_eq!(f0.eased, 0.0);
        assert_eq!(f0.percentage, 0);
        assert!((f0.stroke_offset - RING_CIRCUMFERENCE).abs() < 1e-9);

        let f1 = anim.frame(1_000.0 + RING_DURATION_MS);
        assert_eq!(f1.eased, 1.0);
        assert_eq!(f1.percentage, 100);
        assert!(f1.stroke_offset.abs() < 1e-9);
        assert!(f1.is_done());
    }

    #[test]
    fn early_timestamp_clamps_to_zero() {
        let anim = RingAnimation::new(500.0);
        let f = anim.frame(490.0);
        assert_eq!(f.progress, 0.0);
        assert_eq!(f.percentage, 0);
    }

    #[test]
    fn percentage_is_monotonic() {
        let anim = RingAnimation::new(0.0);
        let mut last = 0;
        for t in 0..=2300 {
            let p = anim.frame(t as f64).percentage;
            assert!(p >= last, "percentage dropped at t={t}");
            last = p;
        }
        assert_eq!(last, 100);
    }

    #[test]
    fn ease_is_fast_start_slow_finish() {
        assert!(ease_out_cubic(0.5) > 0.5);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-12);
        assert_eq!(ease_out_cubic(-1.0), 0.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
    }

    #[derive(Default)]
    struct Recorder {
        frames: RefCell<Vec<RingFrame>>,
        reveals: RefCell<Vec<usize>>,
        /// Frames drawn when the element count was asked for.
        counted_after: Cell<Option<usize>>,
    }

    impl ResultsView for Recorder {
        fn render_ring(&self, frame: &RingFrame) {
            self.frames.borrow_mut().push(*frame);
        }
        fn result_reveal_count(&self) -> usize {
            assert!(self.counted_after.get().is_none(), "count queried twice");
            self.counted_after.set(Some(self.frames.borrow().len()));
            3
        }
        fn reveal_result(&self, index: usize) {
            self.reveals.borrow_mut().push(index);
        }
    }

    #[test]
    fn loop_stops_at_completion_then_staggers_reveals() {
        let sched = Rc::new(ManualScheduler::new(16.0));
        let view = Rc::new(Recorder::default());
        run_ring(sched.clone(), view.clone());

        sched.advance_to(2_200.0);
        assert!(view.reveals.borrow().is_empty());
        // the frame at 2208 is the first with progress 1
        sched.advance_to(2_208.0);
        let frames = view.frames.borrow().len();
        assert!(view.frames.borrow().last().unwrap().is_done());
        assert_eq!(*view.reveals.borrow(), vec![0]);

        sched.advance_to(2_208.0 + 349.0);
        assert_eq!(*view.reveals.borrow(), vec![0]);
        sched.advance_to(2_208.0 + 700.0);
        assert_eq!(*view.reveals.borrow(), vec![0, 1, 2]);
        // no more frames were requested after completion
        assert_eq!(view.frames.borrow().len(), frames);
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn result_elements_are_counted_at_completion() {
        let sched = Rc::new(ManualScheduler::new(16.0));
        let view = Rc::new(Recorder::default());
        run_ring(sched.clone(), view.clone());

        // elements added to the page while the ring runs must still be found
        sched.advance_to(2_192.0);
        assert_eq!(view.counted_after.get(), None);
        sched.advance_to(2_208.0);
        let drawn = view.frames.borrow().len();
        assert_eq!(view.counted_after.get(), Some(drawn));
    }
}
