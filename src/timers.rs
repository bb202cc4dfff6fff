use std::time::{Duration, Instant};

/// One-shot deferred events driving the draw choreography.
///
/// Timers are never cancelled: a late event landing in the wrong machine
/// state is neutralized by the transition guards, not by bookkeeping here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Shuffle phase is over, the capsule starts falling
    ShuffleFinished,

    /// The capsule has landed in the tray
    DropSettled,

    /// The card exit animation is done, stored prize can be dropped
    PrizeCleared,
}

/// Queue of pending one-shot timers keyed by absolute deadline.
///
/// The queue never sleeps; the owner feeds it the current instant and
/// drains whatever is due. Events with equal deadlines come out in the
/// order they were scheduled.
#[derive(Debug, Default)]
pub struct TimerQueue {
    pending: Vec<(Instant, TimerEvent)>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an event `delay` after `now`.
    pub fn schedule(&mut self, now: Instant, delay: Duration, event: TimerEvent) {
        let deadline = now + delay;
        tracing::debug!(?event, delay_ms = delay.as_millis() as u64, "Timer scheduled");
        self.pending.push((deadline, event));
    }

    /// Remove and return every event whose deadline has passed, earliest
    /// deadline first.
    pub fn pop_due(&mut self, now: Instant) -> Vec<TimerEvent> {
        // Stable sort keeps scheduling order for equal deadlines.
        self.pending.sort_by_key(|(deadline, _)| *deadline);

        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].0 <= now {
                due.push(self.pending.remove(i).1);
            } else {
                i += 1;
            }
        }
        due
    }

    /// Deadline of the next pending event, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|(deadline, _)| *deadline).min()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_due_before_deadline() {
        let start = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule(start, Duration::from_millis(100), TimerEvent::ShuffleFinished);

        assert!(queue.pop_due(start).is_empty());
        assert!(queue
            .pop_due(start + Duration::from_millis(99))
            .is_empty());
        assert_eq!(queue.pending_count(), 1);
    }

    #[test]
    fn test_due_event_pops_once() {
        let start = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule(start, Duration::from_millis(100), TimerEvent::DropSettled);

        let due = queue.pop_due(start + Duration::from_millis(100));
        assert_eq!(due, vec![TimerEvent::DropSettled]);
        assert!(queue.is_empty());
        assert!(queue.pop_due(start + Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn test_events_drain_in_deadline_order() {
        let start = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule(start, Duration::from_millis(200), TimerEvent::DropSettled);
        queue.schedule(start, Duration::from_millis(100), TimerEvent::ShuffleFinished);

        let due = queue.pop_due(start + Duration::from_millis(500));
        assert_eq!(due, vec![TimerEvent::ShuffleFinished, TimerEvent::DropSettled]);
    }

    #[test]
    fn test_equal_deadlines_keep_schedule_order() {
        let start = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule(start, Duration::from_millis(50), TimerEvent::PrizeCleared);
        queue.schedule(start, Duration::from_millis(50), TimerEvent::ShuffleFinished);

        let due = queue.pop_due(start + Duration::from_millis(50));
        assert_eq!(due, vec![TimerEvent::PrizeCleared, TimerEvent::ShuffleFinished]);
    }

    #[test]
    fn test_next_deadline() {
        let start = Instant::now();
        let mut queue = TimerQueue::new();
        assert!(queue.next_deadline().is_none());

        queue.schedule(start, Duration::from_millis(300), TimerEvent::DropSettled);
        queue.schedule(start, Duration::from_millis(100), TimerEvent::ShuffleFinished);
        assert_eq!(queue.next_deadline(), Some(start + Duration::from_millis(100)));
    }
}
