//! The timed reveal sequence that follows the calculate button.
//!
//! A linear state machine: each phase declares how long it holds before the
//! next one is entered, and the next phase is only ever scheduled from inside
//! the previous phase's completion. The sequence runs at most once.

use std::cell::Cell;
use std::rc::Rc;

use crate::error::RevealError;
use crate::schedule::Scheduler;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealPhase {
    Idle,
    /// Calculator and navbar fading out.
    FadingCalculator,
    LoadingShown,
    LoadingFadingOut,
    /// Results, timeline, message and footer on screen; effects running.
    ResultsShown,
}

impl RevealPhase {
    /// How long this phase holds before `next()` is entered.
    pub fn hold_ms(self) -> Option<u32> {
        match self {
            RevealPhase::FadingCalculator => Some(500),
            RevealPhase::LoadingShown => Some(2200),
            RevealPhase::LoadingFadingOut => Some(400),
            RevealPhase::Idle | RevealPhase::ResultsShown => None,
        }
    }

    pub fn next(self) -> Option<RevealPhase> {
        match self {
            RevealPhase::Idle => Some(RevealPhase::FadingCalculator),
            RevealPhase::FadingCalculator => Some(RevealPhase::LoadingShown),
            RevealPhase::LoadingShown => Some(RevealPhase::LoadingFadingOut),
            RevealPhase::LoadingFadingOut => Some(RevealPhase::ResultsShown),
            RevealPhase::ResultsShown => None,
        }
    }

    /// Offset of this phase from trigger activation.
    pub fn offset_ms(self) -> u32 {
        let mut phase = RevealPhase::FadingCalculator;
        let mut offset = 0;
        while phase != self {
            match (phase.hold_ms(), phase.next()) {
                (Some(hold), Some(next)) => {
                    offset += hold;
                    phase = next;
                }
                _ => return 0,
            }
        }
        offset
    }
}

/// The visual side of the sequence. `enter` is called once per phase, in
/// order, at the phase's start time.
pub trait RevealSurface {
    fn enter(&self, phase: RevealPhase);
}

/// One-shot reveal sequence. Clones share the same state.
#[derive(Clone)]
pub struct RevealSequence {
    phase: Rc<Cell<RevealPhase>>,
    scheduler: Rc<dyn Scheduler>,
    surface: Rc<dyn RevealSurface>,
}

impl RevealSequence {
    pub fn new(scheduler: Rc<dyn Scheduler>, surface: Rc<dyn RevealSurface>) -> Self {
        Self {
            phase: Rc::new(Cell::new(RevealPhase::Idle)),
            scheduler,
            surface,
        }
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase.get()
    }

    pub fn is_started(&self) -> bool {
        self.phase.get() != RevealPhase::Idle
    }

    /// Start the sequence. The trigger control is hidden by the first phase,
    /// but a stale click can still arrive, so re-entry is refused here.
    pub fn trigger(&self) -> Result<(), RevealError> {
        if self.is_started() {
            return Err(RevealError::AlreadyStarted);
        }
        log::info!("reveal sequence started");
        self.enter(RevealPhase::FadingCalculator);
        Ok(())
    }

    fn enter(&self, phase: RevealPhase) {
        self.phase.set(phase);
        log::debug!("reveal phase {phase:?}");
        self.surface.enter(phase);
        if let (Some(hold), Some(next)) = (phase.hold_ms(), phase.next()) {
            let seq = self.clone();
            self.scheduler.schedule(hold, Box::new(move || seq.enter(next)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ManualScheduler;
    use std::cell::RefCell;

    #[test]
    fn cumulative_offsets() {
        assert_eq!(RevealPhase::FadingCalculator.offset_ms(), 0);
        assert_eq!(RevealPhase::LoadingShown.offset_ms(), 500);
        assert_eq!(RevealPhase::LoadingFadingOut.offset_ms(), 2700);
        assert_eq!(RevealPhase::ResultsShown.offset_ms(), 3100);
    }

    struct Recorder {
        clock: Rc<ManualScheduler>,
        seen: RefCell<Vec<(RevealPhase, f64)>>,
    }

    impl RevealSurface for Recorder {
        fn enter(&self, phase: RevealPhase) {
            self.seen.borrow_mut().push((phase, self.clock.now()));
        }
    }

    #[test]
    fn phases_fire_in_order_at_fixed_times() {
        let sched = Rc::new(ManualScheduler::default());
        sched.advance_to(10_000.0);
        let rec = Rc::new(Recorder {
            clock: sched.clone(),
            seen: RefCell::new(Vec::new()),
        });
        let seq = RevealSequence::new(sched.clone(), rec.clone());
        seq.trigger().unwrap();
        assert_eq!(seq.phase(), RevealPhase::FadingCalculator);

        sched.advance_by(499.0);
        assert_eq!(rec.seen.borrow().len(), 1);
        sched.advance_by(10_000.0);

        assert_eq!(
            *rec.seen.borrow(),
            vec![
                (RevealPhase::FadingCalculator, 10_000.0),
                (RevealPhase::LoadingShown, 10_500.0),
                (RevealPhase::LoadingFadingOut, 12_700.0),
                (RevealPhase::ResultsShown, 13_100.0),
            ]
        );
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn second_trigger_is_refused() {
        let sched = Rc::new(ManualScheduler::default());
        let rec = Rc::new(Recorder {
            clock: sched.clone(),
            seen: RefCell::new(Vec::new()),
        });
        let seq = RevealSequence::new(sched.clone(), rec.clone());
        seq.trigger().unwrap();
        sched.advance_by(100.0);
        assert_eq!(seq.trigger(), Err(RevealError::AlreadyStarted));
        sched.advance_by(5_000.0);
        assert_eq!(seq.trigger(), Err(RevealError::AlreadyStarted));
        assert_eq!(rec.seen.borrow().len(), 4);
    }
}
