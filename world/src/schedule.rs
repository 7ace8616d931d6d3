use std::time::Duration;

/// Deferred work evaluated against the game clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Task {
    /// Spawns the wave at the current index.
    StartWave,
    /// Makes the boss fire a projectile.
    BossShot,
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    task: Task,
    due: Duration,
    period: Option<Duration>,
}

/// Pending timers keyed by task. At most one entry exists per task.
#[derive(Clone, Debug, Default)]
pub struct Schedule {
    entries: Vec<Entry>,
}

impl Schedule {
    /// Arms `task` to fire once at `due`, replacing any pending entry.
    pub fn once(&mut self, task: Task, due: Duration) {
        self.insert(Entry {
            task,
            due,
            period: None,
        });
    }

    /// Arms `task` to fire at `first_due` and every `period` afterwards.
    ///
    /// A zero period degrades to a one-shot entry.
    pub fn every(&mut self, task: Task, first_due: Duration, period: Duration) {
        self.insert(Entry {
            task,
            due: first_due,
            period: (!period.is_zero()).then_some(period),
        });
    }

    /// Cancels the pending entry for `task`, reporting whether one existed.
    pub fn cancel(&mut self, task: Task) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.task != task);
        self.entries.len() != before
    }

    /// Drops every pending entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Whether `task` has a pending entry.
    #[must_use]
    pub fn is_scheduled(&self, task: Task) -> bool {
        self.due_at(task).is_some()
    }

    /// Next due time of `task`.
    #[must_use]
    pub fn due_at(&self, task: Task) -> Option<Duration> {
        self.entries
            .iter()
            .find(|entry| entry.task == task)
            .map(|entry| entry.due)
    }

    /// Appends every task due at or before `now` to `out` in due order.
    ///
    /// Periodic entries fire once per elapsed period and stay armed; one-shot
    /// entries are removed after firing.
    pub fn drain_due(&mut self, now: Duration, out: &mut Vec<Task>) {
        let mut fired: Vec<(Duration, Task)> = Vec::new();
        self.entries.retain_mut(|entry| {
            while entry.due <= now {
                fired.push((entry.due, entry.task));
                match entry.period {
                    Some(period) => entry.due += period,
                    None => return false,
                }
            }
            true
        });
        fired.sort_by_key(|(due, _)| *due);
        out.extend(fired.into_iter().map(|(_, task)| task));
    }

    fn insert(&mut self, entry: Entry) {
        let _ = self.cancel(entry.task);
        self.entries.push(entry);
    }
}
