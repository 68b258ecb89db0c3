//! Timer / animation-frame abstraction.
//!
//! Everything time-driven in the page goes through [`Scheduler`], so the whole
//! reveal choreography can be replayed against [`ManualScheduler`] without
//! waiting on a wall clock.

use std::cell::{Cell, RefCell};

pub type Task = Box<dyn FnOnce()>;
pub type FrameTask = Box<dyn FnOnce(f64)>;

pub trait Scheduler {
    /// Current time in milliseconds (same clock as frame timestamps).
    fn now(&self) -> f64;
    /// Run `task` once after `delay_ms`. Not cancellable.
    fn schedule(&self, delay_ms: u32, task: Task);
    /// Run `task` on the next display refresh with the frame timestamp.
    fn next_frame(&self, task: FrameTask);
}

// --- Deterministic virtual clock ---------------------------------------------

enum Pending {
    Timer(Task),
    Frame(FrameTask),
}

struct Entry {
    due: f64,
    seq: u64,
    job: Pending,
}

/// Virtual-time scheduler. Timers fire in (due, insertion) order; frames are
/// spaced `frame_ms` apart.
pub struct ManualScheduler {
    now: Cell<f64>,
    frame_ms: f64,
    seq: Cell<u64>,
    queue: RefCell<Vec<Entry>>,
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new(16.0)
    }
}

impl ManualScheduler {
    pub fn new(frame_ms: f64) -> Self {
        Self {
            now: Cell::new(0.0),
            frame_ms,
            seq: Cell::new(0),
            queue: RefCell::new(Vec::new()),
        }
    }

    fn push(&self, due: f64, job: Pending) {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        self.queue.borrow_mut().push(Entry { due, seq, job });
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    fn pop_due(&self, until: f64) -> Option<Entry> {
        let mut queue = self.queue.borrow_mut();
        let idx = queue
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= until)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)))
            .map(|(i, _)| i)?;
        Some(queue.swap_remove(idx))
    }

    fn run(&self, entry: Entry) {
        self.now.set(entry.due.max(self.now.get()));
        match entry.job {
            Pending::Timer(task) => task(),
            Pending::Frame(task) => task(entry.due),
        }
    }

    /// Advance the clock to `t`, running every job that comes due on the way
    /// (including jobs scheduled by those jobs).
    pub fn advance_to(&self, t: f64) {
        while let Some(entry) = self.pop_due(t) {
            self.run(entry);
        }
        self.now.set(t.max(self.now.get()));
    }

    pub fn advance_by(&self, ms: f64) {
        self.advance_to(self.now.get() + ms);
    }

    /// Drain the queue, running at most `limit` jobs. Returns `false` if work
    /// is still queued afterwards (a task that keeps rescheduling itself).
    pub fn run_until_idle(&self, limit: usize) -> bool {
        for _ in 0..limit {
            let next = self
                .queue
                .borrow()
                .iter()
                .map(|e| e.due)
                .min_by(|a, b| a.total_cmp(b));
            match next {
                Some(due) => {
                    if let Some(entry) = self.pop_due(due) {
                        self.run(entry);
                    }
                }
                None => return true,
            }
        }
        self.pending() == 0
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> f64 {
        self.now.get()
    }

    fn schedule(&self, delay_ms: u32, task: Task) {
        self.push(self.now.get() + delay_ms as f64, Pending::Timer(task));
    }

    fn next_frame(&self, task: FrameTask) {
        self.push(self.now.get() + self.frame_ms, Pending::Frame(task));
    }
}
