use std::time::Duration;

/// Sink for delayed work. Nothing scheduled here can be cancelled.
pub trait Scheduler<T> {
    fn schedule(&mut self, delay: Duration, task: T);
}

struct Pending<T> {
    due: Duration,
    seq: u64,
    task: T,
}

/// Timer queue over a virtual clock measured from an arbitrary start. The
/// game thread maps it onto tokio deadlines; tests step it by hand.
pub struct TimerQueue<T> {
    now: Duration,
    seq: u64,
    pending: Vec<Pending<T>>,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        TimerQueue {
            now: Duration::ZERO,
            seq: 0,
            pending: Vec::new(),
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|pending| pending.due).min()
    }

    /// Pops the earliest task due at or before `now` and moves the clock to
    /// its due time, so anything it schedules is timed from there. Equal due
    /// times pop in scheduling order. Once nothing is due the clock moves to
    /// `now` and `None` is returned.
    pub fn pop_next_due(&mut self, now: Duration) -> Option<T> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, pending)| pending.due <= now)
            .min_by_key(|(_, pending)| (pending.due, pending.seq))
            .map(|(index, _)| index);
        match index {
            Some(index) => {
                let pending = self.pending.swap_remove(index);
                self.now = self.now.max(pending.due);
                Some(pending.task)
            }
            None => {
                self.now = self.now.max(now);
                None
            }
        }
    }

    /// Pops the earliest pending task regardless of its due time.
    pub fn pop_next(&mut self) -> Option<T> {
        let due = self.next_due()?;
        self.pop_next_due(due)
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> for TimerQueue<T> {
    fn schedule(&mut self, delay: Duration, task: T) {
        self.seq += 1;
        self.pending.push(Pending {
            due: self.now + delay,
            seq: self.seq,
            task,
        });
    }
}
