use std::collections::BTreeMap;

/// When a recurring effect instance fires next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recurrence {
    /// Tick of the next trigger.
    pub next_tick: u64,
    /// Ticks between triggers.
    pub interval: u64,
}

/// Recurring effect triggers keyed by effect instance.
#[derive(Debug, Default)]
pub struct RecurringSchedule {
    entries: BTreeMap<u64, Recurrence>,
}

impl RecurringSchedule {
    /// An empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `instance` to fire every `interval` ticks after `start`.
    /// A zero interval is ignored.
    pub fn insert(&mut self, instance: u64, start: u64, interval: u64) {
        if interval == 0 {
            return;
        }
        self.entries.insert(
            instance,
            Recurrence {
                next_tick: start + interval,
                interval,
            },
        );
    }

    /// Stop scheduling `instance`.
    pub fn remove(&mut self, instance: u64) -> Option<Recurrence> {
        self.entries.remove(&instance)
    }

    /// The schedule entry for `instance`.
    pub fn get(&self, instance: u64) -> Option<Recurrence> {
        self.entries.get(&instance).copied()
    }

    /// Instances due at `now`, in instance order. Each due entry is pushed
    /// to its next trigger after `now`, so a skipped tick fires only once.
    pub fn due(&mut self, now: u64) -> Vec<u64> {
        let mut fired = Vec::new();
        for (instance, entry) in &mut self.entries {
            if entry.next_tick <= now {
                fired.push(*instance);
                while entry.next_tick <= now {
                    entry.next_tick += entry.interval;
                }
            }
        }
        fired
    }

    /// Number of scheduled instances.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_on_interval() {
        let mut schedule = RecurringSchedule::new();
        schedule.insert(7, 10, 3);
        assert!(schedule.due(12).is_empty());
        assert_eq!(schedule.due(13), vec![7]);
        assert!(schedule.due(13).is_empty());
        assert_eq!(schedule.get(7).map(|r| r.next_tick), Some(16));
    }

    #[test]
    fn catch_up_fires_once() {
        let mut schedule = RecurringSchedule::new();
        schedule.insert(1, 0, 1);
        assert_eq!(schedule.due(5), vec![1]);
        assert_eq!(schedule.get(1).map(|r| r.next_tick), Some(6));
    }

    #[test]
    fn zero_interval_and_removal() {
        let mut schedule = RecurringSchedule::new();
        schedule.insert(1, 0, 0);
        assert!(schedule.is_empty());
        schedule.insert(2, 0, 2);
        assert_eq!(schedule.len(), 1);
        assert!(schedule.remove(2).is_some());
        assert!(schedule.due(100).is_empty());
    }
}
