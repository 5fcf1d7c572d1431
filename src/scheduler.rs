//! Cancellable repeating task driven by frame deltas.
//!
//! A [`RepeatingTask`] is the "run this every `interval` until cancelled"
//! primitive the heat aura is built on.  It never runs anything itself: the
//! owning system calls [`RepeatingTask::advance`] with the frame delta and
//! executes the returned number of firings in order, so firing N always
//! completes before firing N+1 starts.
//!
//! The first firing is due on the first `advance` after construction, whatever
//! the delta.  After that the task fires once per elapsed interval.

use bevy::prelude::*;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RepeatingTask {
    timer: Timer,
    first_firing_due: bool,
    cancelled: bool,
}

impl RepeatingTask {
    pub fn new(interval: Duration) -> Self {
        Self {
            timer: Timer::new(interval, TimerMode::Repeating),
            first_firing_due: true,
            cancelled: false,
        }
    }

    /// Prevent every future firing.  Idempotent.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Advance by `delta` and return how many firings are now due.
    pub fn advance(&mut self, delta: Duration) -> u32 {
        if self.cancelled {
            return 0;
        }
        if self.first_firing_due {
            self.first_firing_due = false;
            return 1;
        }
        self.timer.tick(delta);
        self.timer.times_finished_this_tick()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(200);

    #[test]
    fn first_firing_is_immediate() {
        let mut task = RepeatingTask::new(INTERVAL);
        assert_eq!(task.advance(Duration::ZERO), 1);
        assert_eq!(task.advance(Duration::ZERO), 0);
    }

    #[test]
    fn fires_once_per_interval() {
        let mut task = RepeatingTask::new(INTERVAL);
        let fired: u32 = (0..6).map(|_| task.advance(INTERVAL)).sum();
        assert_eq!(fired, 6);
    }

    #[test]
    fn partial_intervals_accumulate() {
        let mut task = RepeatingTask::new(INTERVAL);
        task.advance(Duration::ZERO);
        assert_eq!(task.advance(Duration::from_millis(150)), 0);
        assert_eq!(task.advance(Duration::from_millis(100)), 1);
    }

    #[test]
    fn long_frame_reports_every_missed_firing() {
        let mut task = RepeatingTask::new(INTERVAL);
        task.advance(Duration::ZERO);
        assert_eq!(task.advance(Duration::from_millis(650)), 3);
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut task = RepeatingTask::new(INTERVAL);
        task.cancel();
        assert!(task.is_cancelled());
        assert_eq!(task.advance(INTERVAL * 10), 0);
    }
}
