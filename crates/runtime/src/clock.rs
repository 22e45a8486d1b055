//! Virtual clock for deferred session work.
//!
//! Opponent thinking and post-action settling are modeled as tasks scheduled
//! on a tick counter rather than wall-clock timers, so tests advance time
//! deterministically and deferred work always re-validates against the
//! latest committed state when it fires.

/// Monotonic tick counter. Never tied to wall-clock time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VirtualClock {
    now: u64,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    /// Advances the clock by one tick and returns the new time.
    pub fn tick(&mut self) -> u64 {
        self.now += 1;
        self.now
    }
}

/// Tasks scheduled against a [`VirtualClock`], fired in due order.
#[derive(Clone, Debug, Default)]
pub struct Schedule<T> {
    entries: Vec<(u64, T)>,
}

impl<T> Schedule<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, due: u64, task: T) {
        self.entries.push((due, task));
    }

    /// Removes and returns every task due at or before `now`, earliest
    /// first. Tasks scheduled at the same tick keep insertion order.
    pub fn take_due(&mut self, now: u64) -> Vec<T> {
        let mut due = Vec::new();
        let mut remaining = Vec::new();
        for (i, (at, task)) in self.entries.drain(..).enumerate() {
            if at <= now {
                due.push((at, i, task));
            } else {
                remaining.push((at, task));
            }
        }
        self.entries = remaining;

        due.sort_by_key(|(at, i, _)| (*at, *i));
        due.into_iter().map(|(_, _, task)| task).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_fire_in_due_order() {
        let mut schedule = Schedule::new();
        schedule.push(3, "late");
        schedule.push(1, "early");
        schedule.push(2, "middle");

        assert_eq!(schedule.take_due(0), Vec::<&str>::new());
        assert_eq!(schedule.take_due(2), vec!["early", "middle"]);
        assert_eq!(schedule.take_due(10), vec!["late"]);
        assert!(schedule.is_empty());
    }

    #[test]
    fn same_tick_keeps_insertion_order() {
        let mut schedule = Schedule::new();
        schedule.push(1, "a");
        schedule.push(1, "b");

        assert_eq!(schedule.take_due(1), vec!["a", "b"]);
    }

    #[test]
    fn clock_only_moves_forward() {
        let mut clock = VirtualClock::new();
        assert_eq!(clock.now(), 0);
        assert_eq!(clock.tick(), 1);
        assert_eq!(clock.tick(), 2);
    }
}
