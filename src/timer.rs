//! Deterministic delayed-task queue.
//!
//! The engine never blocks and never owns a thread: every delayed effect
//! (spinner removal, the transient `prev` class, the autoplay cadence, the
//! announcement lifetime, the cache-hit re-check) is a [`Task`] scheduled
//! against the host's millisecond clock and drained by
//! [`crate::Carousel::tick`]. Tasks run to completion in `(due, id)` order,
//! matching single-threaded event-loop semantics, and every handler must
//! tolerate state having changed between scheduling and firing.

use crate::types::{AnnouncementId, ImageKey};

/// A delayed effect. Fired at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Autoplay interval fired: prefetch the next slide and reschedule.
    AutoplayTick,
    /// The post-prefetch grace elapsed: perform the autoplay transition.
    AutoplayAdvance { target: usize },
    /// Drop the transient `prev` class from an outgoing slide.
    ClearPrevClass { index: usize },
    /// A spinner's fade-out grace elapsed: remove its element.
    RemoveSpinner { key: ImageKey },
    /// One-shot completeness re-check after source assignment (cache hit).
    RecheckComplete { key: ImageKey },
    /// An announcement's lifetime elapsed: remove its element.
    RemoveAnnouncement { id: AnnouncementId },
}

impl Task {
    /// Whether this task belongs to the autoplay cadence (cancelled as a
    /// group on pause and on teardown of autoplay).
    pub fn is_autoplay(&self) -> bool {
        matches!(self, Task::AutoplayTick | Task::AutoplayAdvance { .. })
    }
}

#[derive(Debug, Clone)]
struct Entry {
    id: u64,
    due: u64,
    task: Task,
}

/// Pending delayed tasks for one instance.
///
/// Ids increase monotonically, so tasks scheduled for the same instant fire
/// in scheduling order.
#[derive(Debug, Default)]
pub struct TimerQueue {
    next_id: u64,
    entries: Vec<Entry>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to fire once `now >= due`.
    pub fn schedule(&mut self, due: u64, task: Task) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Entry { id, due, task });
        id
    }

    /// Remove every pending autoplay-cadence task.
    pub fn cancel_autoplay(&mut self) {
        self.entries.retain(|entry| !entry.task.is_autoplay());
    }

    /// Whether an autoplay-cadence task is already pending. Guards the
    /// idempotent-resume rule: resuming never stacks a second timer.
    pub fn has_autoplay(&self) -> bool {
        self.entries.iter().any(|entry| entry.task.is_autoplay())
    }

    /// Remove and return every task due at `now`, in `(due, id)` order.
    pub fn drain_due(&mut self, now: u64) -> Vec<Task> {
        let mut due: Vec<Entry> = Vec::new();
        self.entries.retain(|entry| {
            if entry.due <= now {
                due.push(entry.clone());
                false
            } else {
                true
            }
        });
        due.sort_by_key(|entry| (entry.due, entry.id));
        due.into_iter().map(|entry| entry.task).collect()
    }

    /// Drop every pending task. Teardown path.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_fire_once_in_due_then_schedule_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(300, Task::AutoplayTick);
        timers.schedule(100, Task::ClearPrevClass { index: 0 });
        timers.schedule(100, Task::ClearPrevClass { index: 1 });

        assert_eq!(
            timers.drain_due(100),
            vec![
                Task::ClearPrevClass { index: 0 },
                Task::ClearPrevClass { index: 1 },
            ]
        );
        // Already drained; nothing refires.
        assert_eq!(timers.drain_due(100), vec![]);
        assert_eq!(timers.drain_due(1000), vec![Task::AutoplayTick]);
        assert!(timers.is_empty());
    }

    #[test]
    fn nothing_fires_before_due() {
        let mut timers = TimerQueue::new();
        timers.schedule(500, Task::AutoplayTick);
        assert_eq!(timers.drain_due(499), vec![]);
        assert_eq!(timers.len(), 1);
    }

    #[test]
    fn cancel_autoplay_leaves_presentation_tasks() {
        let mut timers = TimerQueue::new();
        timers.schedule(50, Task::AutoplayAdvance { target: 1 });
        timers.schedule(5000, Task::AutoplayTick);
        timers.schedule(500, Task::ClearPrevClass { index: 2 });

        assert!(timers.has_autoplay());
        timers.cancel_autoplay();
        assert!(!timers.has_autoplay());
        assert_eq!(
            timers.drain_due(10_000),
            vec![Task::ClearPrevClass { index: 2 }]
        );
    }

    #[test]
    fn clear_releases_everything() {
        let mut timers = TimerQueue::new();
        timers.schedule(10, Task::AutoplayTick);
        timers.schedule(20, Task::RemoveAnnouncement {
            id: crate::types::AnnouncementId(1),
        });
        timers.clear();
        assert!(timers.is_empty());
        assert_eq!(timers.drain_due(u64::MAX), vec![]);
    }
}
