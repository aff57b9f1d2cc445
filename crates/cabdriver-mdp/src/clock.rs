/// Hour-of-day and day-of-week arithmetic with wraparound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    /// Hours before the hour wraps to 0 and the day advances.
    pub hours_per_day: usize,
    /// Days before the day wraps to 0.
    pub days_per_week: usize,
}

impl Default for Clock {
    fn default() -> Self {
        Clock {
            hours_per_day: 24,
            days_per_week: 7,
        }
    }
}

impl Clock {
    /// Create a clock with custom day and week lengths.
    pub fn new(hours_per_day: usize, days_per_week: usize) -> Self {
        Self {
            hours_per_day,
            days_per_week,
        }
    }

    /// Advance `(hour, day)` by `duration` hours.
    ///
    /// Hour overflow carries whole days forward and the day wraps at the end of the week.
    /// Durations longer than a day carry several days at once.
    pub fn advance(&self, hour: usize, day: usize, duration: u64) -> (usize, usize) {
        let hours_per_day = self.hours_per_day as u64;
        let days_per_week = self.days_per_week as u64;

        let elapsed = hour as u64 + duration;
        if elapsed < hours_per_day {
            return (elapsed as usize, day);
        }

        let days = elapsed / hours_per_day;
        (
            (elapsed % hours_per_day) as usize,
            ((day as u64 + days % days_per_week) % days_per_week) as usize,
        )
    }
}

/// [`Clock::advance`] on the standard 24 hour, 7 day clock.
pub fn update_time_day(hour: usize, day: usize, duration: u64) -> (usize, usize) {
    Clock::default().advance(hour, day, duration)
}
