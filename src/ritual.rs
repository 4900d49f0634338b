//! Press-and-hold ritual timer.
//!
//! The timer never touches a wall clock. The binary drives `tick()`
//! from a 50ms interval while the hold lasts; tests drive it directly.
//! Progress advances 2 per tick, so a full ritual is ~2.5s of
//! continuous holding. Early release forfeits all progress.

pub const TICK_INTERVAL_MS: u64 = 50;
pub const TICK_INCREMENT: u8 = 2;
pub const COMPLETE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not holding, nothing moved.
    Idle,
    Advanced(u8),
    /// Hit 100 on this tick. Reported exactly once per ritual.
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    Idle,
    /// Released before 100; progress is forfeit.
    Interrupted,
}

#[derive(Debug, Default)]
pub struct RitualTimer {
    progress: u8,
    holding: bool,
    completed: bool,
}

impl RitualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin (or restart) the hold. Any ritual in flight is discarded
    /// first, so a rapid press/release/press can never stack tickers.
    pub fn press(&mut self) {
        self.progress = 0;
        self.completed = false;
        self.holding = true;
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.holding || self.completed {
            return TickOutcome::Idle;
        }

        self.progress = (self.progress + TICK_INCREMENT).min(COMPLETE);
        if self.progress >= COMPLETE {
            self.holding = false;
            self.completed = true;
            TickOutcome::Completed
        } else {
            TickOutcome::Advanced(self.progress)
        }
    }

    pub fn release(&mut self) -> ReleaseOutcome {
        if !self.holding {
            return ReleaseOutcome::Idle;
        }
        self.holding = false;
        self.progress = 0;
        ReleaseOutcome::Interrupted
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_hold_completes_in_fifty_ticks() {
        let mut timer = RitualTimer::new();
        timer.press();

        for i in 1..50 {
            assert_eq!(timer.tick(), TickOutcome::Advanced(i * 2));
        }
        assert_eq!(timer.tick(), TickOutcome::Completed);
        assert_eq!(timer.progress(), 100);
    }

    #[test]
    fn test_progress_is_monotonic_while_held() {
        let mut timer = RitualTimer::new();
        timer.press();
        let mut last = 0;
        loop {
            match timer.tick() {
                TickOutcome::Advanced(p) => {
                    assert!(p > last);
                    last = p;
                }
                TickOutcome::Completed => break,
                TickOutcome::Idle => panic!("went idle while holding"),
            }
        }
    }

    #[test]
    fn test_early_release_forfeits_progress() {
        let mut timer = RitualTimer::new();
        timer.press();
        for _ in 0..10 {
            timer.tick();
        }
        assert_eq!(timer.progress(), 20);
        assert_eq!(timer.release(), ReleaseOutcome::Interrupted);
        assert_eq!(timer.progress(), 0);
        assert_eq!(timer.tick(), TickOutcome::Idle);
    }

    #[test]
    fn test_completion_fires_exactly_once() {
        let mut timer = RitualTimer::new();
        timer.press();
        let mut completions = 0;
        for _ in 0..200 {
            if timer.tick() == TickOutcome::Completed {
                completions += 1;
            }
        }
        assert_eq!(completions, 1);
        assert_eq!(timer.progress(), 100);
    }

    #[test]
    fn test_release_after_completion_is_idle() {
        let mut timer = RitualTimer::new();
        timer.press();
        while timer.tick() != TickOutcome::Completed {}
        assert_eq!(timer.release(), ReleaseOutcome::Idle);
        assert_eq!(timer.progress(), 100);
    }

    #[test]
    fn test_rapid_repress_restarts_cleanly() {
        let mut timer = RitualTimer::new();
        timer.press();
        for _ in 0..30 {
            timer.tick();
        }
        timer.release();
        timer.press();
        assert_eq!(timer.progress(), 0);
        assert_eq!(timer.tick(), TickOutcome::Advanced(2));
    }

    #[test]
    fn test_progress_never_exceeds_one_hundred() {
        let mut timer = RitualTimer::new();
        timer.press();
        for _ in 0..500 {
            timer.tick();
            assert!(timer.progress() <= 100);
        }
    }

    #[test]
    fn test_release_without_press_is_idle() {
        let mut timer = RitualTimer::new();
        assert_eq!(timer.release(), ReleaseOutcome::Idle);
        assert_eq!(timer.tick(), TickOutcome::Idle);
    }
}
