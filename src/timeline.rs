//! Staggered scroll-in reveal of timeline entries.
//!
//! Every item gets a stagger of `index * 200ms`. The stagger is measured from
//! that item's *own* first intersection, not from a shared start: items that
//! scroll in late still wait only their own offset.

use std::cell::RefCell;
use std::rc::Rc;

use crate::schedule::Scheduler;

pub const TIMELINE_STAGGER_MS: u32 = 200;
/// Fraction of an item that must be on screen before it counts as visible.
pub const VISIBILITY_THRESHOLD: f64 = 0.1;

pub fn stagger_for(index: usize) -> u32 {
    index as u32 * TIMELINE_STAGGER_MS
}

/// Parse a stagger back out of markup. Missing or malformed values mean no
/// delay.
pub fn parse_stagger(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok()).unwrap_or(0)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemState {
    Pending,
    /// Seen once; stagger timer is running.
    Revealing,
    Visible,
}

/// Swappable visibility detection (an `IntersectionObserver` in the browser).
pub trait VisibilityWatcher {
    fn observe(&self, index: usize);
    fn unobserve(&self, index: usize);
}

pub trait TimelineView {
    fn show_item(&self, index: usize);
}

#[derive(Debug)]
pub struct TimelineRevealer {
    items: Vec<ItemState>,
}

impl TimelineRevealer {
    pub fn new(count: usize) -> Self {
        Self {
            items: vec![ItemState::Pending; count],
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn state(&self, index: usize) -> Option<ItemState> {
        self.items.get(index).copied()
    }

    /// Record an intersection. Returns `true` only the first time a pending
    /// item is seen.
    pub fn on_intersect(&mut self, index: usize) -> bool {
        match self.items.get_mut(index) {
            Some(state @ ItemState::Pending) => {
                *state = ItemState::Revealing;
                true
            }
            _ => false,
        }
    }

    pub fn mark_visible(&mut self, index: usize) -> bool {
        match self.items.get_mut(index) {
            Some(state) if *state != ItemState::Visible => {
                *state = ItemState::Visible;
                true
            }
            _ => false,
        }
    }
}

/// Glue between a watcher, a scheduler and the view. Cloning shares state.
#[derive(Clone)]
pub struct TimelineDriver {
    revealer: Rc<RefCell<TimelineRevealer>>,
    scheduler: Rc<dyn Scheduler>,
    watcher: Rc<dyn VisibilityWatcher>,
    view: Rc<dyn TimelineView>,
}

impl TimelineDriver {
    pub fn new(
        count: usize,
        scheduler: Rc<dyn Scheduler>,
        watcher: Rc<dyn VisibilityWatcher>,
        view: Rc<dyn TimelineView>,
    ) -> Self {
        Self {
            revealer: Rc::new(RefCell::new(TimelineRevealer::new(count))),
            scheduler,
            watcher,
            view,
        }
    }

    /// Start watching every item.
    pub fn arm(&self) {
        let count = self.revealer.borrow().len();
        for i in 0..count {
            self.watcher.observe(i);
        }
        log::debug!("watching {count} timeline items");
    }

    /// Called by the watcher whenever item `index` crosses the threshold.
    /// `stagger_ms` is the item's own delay as read back from the page.
    pub fn handle_intersection(&self, index: usize, stagger_ms: u32) {
        if !self.revealer.borrow_mut().on_intersect(index) {
            return;
        }
        self.watcher.unobserve(index);
        let revealer = self.revealer.clone();
        let view = self.view.clone();
        self.scheduler.schedule(
            stagger_ms,
            Box::new(move || {
                if revealer.borrow_mut().mark_visible(index) {
                    view.show_item(index);
                }
            }),
        );
    }

    pub fn state(&self, index: usize) -> Option<ItemState> {
        self.revealer.borrow().state(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ManualScheduler;

    #[test]
    fn stagger_parsing() {
        assert_eq!(stagger_for(3), 600);
        assert_eq!(parse_stagger(Some("400")), 400);
        assert_eq!(parse_stagger(Some("abc")), 0);
        assert_eq!(parse_stagger(Some("-5")), 0);
        assert_eq!(parse_stagger(None), 0);
    }

    #[test]
    fn item_transitions_once() {
        let mut r = TimelineRevealer::new(2);
        assert!(r.on_intersect(1));
        assert!(!r.on_intersect(1));
        assert_eq!(r.state(1), Some(ItemState::Revealing));
        assert!(r.mark_visible(1));
        assert!(!r.mark_visible(1));
        assert!(!r.on_intersect(1));
        assert!(!r.on_intersect(7));
        assert_eq!(r.state(0), Some(ItemState::Pending));
    }

    #[derive(Default)]
    struct Fake {
        observed: RefCell<Vec<usize>>,
        unobserved: RefCell<Vec<usize>>,
        shown: RefCell<Vec<(usize, f64)>>,
        clock: RefCell<Option<Rc<ManualScheduler>>>,
    }

    impl VisibilityWatcher for Fake {
        fn observe(&self, index: usize) {
            self.observed.borrow_mut().push(index);
        }
        fn unobserve(&self, index: usize) {
            self.unobserved.borrow_mut().push(index);
        }
    }

    impl TimelineView for Fake {
        fn show_item(&self, index: usize) {
            let now = self.clock.borrow().as_ref().map(|c| c.now()).unwrap_or(-1.0);
            self.shown.borrow_mut().push((index, now));
        }
    }

    #[test]
    fn stagger_measured_from_each_items_own_intersection() {
        let sched = Rc::new(ManualScheduler::default());
        let fake = Rc::new(Fake::default());
        *fake.clock.borrow_mut() = Some(sched.clone());
        let driver = TimelineDriver::new(3, sched.clone(), fake.clone(), fake.clone());
        driver.arm();
        assert_eq!(*fake.observed.borrow(), vec![0, 1, 2]);

        driver.handle_intersection(0, stagger_for(0));
        sched.advance_to(1_000.0);
        driver.handle_intersection(2, stagger_for(2));
        // repeated scroll in/out does nothing more
        driver.handle_intersection(2, stagger_for(2));
        sched.advance_to(5_000.0);

        assert_eq!(*fake.shown.borrow(), vec![(0, 0.0), (2, 1_400.0)]);
        assert_eq!(*fake.unobserved.borrow(), vec![0, 2]);
        assert_eq!(driver.state(1), Some(ItemState::Pending));
        assert_eq!(driver.state(2), Some(ItemState::Visible));
    }
}
