//! # Server Tick Loop
//!
//! Fixed-timestep loop, 20 Hz by default (one tick every 50 ms).
//!
//! ## Design
//!
//! The accumulator collects wall-clock time and releases one tick per
//! `tick_duration`. After a stall the backlog is capped at
//! [`MAX_BACKLOG_TICKS`] so the server catches up briefly instead of
//! running a burst of stale ticks.

use std::time::{Duration, Instant};

use umbra_shared::TICK_RATE;

/// Most ticks the loop will run back to back to catch up.
pub const MAX_BACKLOG_TICKS: u32 = 4;

/// Fixed-timestep tick loop controller.
pub struct TickLoop {
    /// Target tick duration.
    tick_duration: Duration,
    /// Time of the last accumulator update.
    last_update: Instant,
    /// Time owed to the simulation.
    accumulator: Duration,
    /// Total ticks started.
    tick_count: u64,
    /// Tick timing statistics.
    stats: TickStats,
}

/// Tick timing statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickStats {
    /// Shortest tick observed.
    pub min_tick_us: u64,
    /// Longest tick observed.
    pub max_tick_us: u64,
    /// Rolling average tick duration.
    pub avg_tick_us: u64,
    /// Ticks that overran their budget.
    pub late_ticks: u64,
    /// Ticks measured.
    pub total_ticks: u64,
}

impl TickStats {
    /// Empty statistics for a tick budget.
    #[must_use]
    pub fn new(budget: Duration) -> Self {
        Self {
            min_tick_us: u64::MAX,
            max_tick_us: 0,
            avg_tick_us: duration_us(budget),
            late_ticks: 0,
            total_ticks: 0,
        }
    }

    /// Records one measured tick.
    pub fn record(&mut self, duration: Duration, budget: Duration) {
        let us = duration_us(duration);
        self.total_ticks += 1;
        self.min_tick_us = self.min_tick_us.min(us);
        self.max_tick_us = self.max_tick_us.max(us);
        self.avg_tick_us = (self.avg_tick_us * 15 + us) / 16;
        if duration > budget {
            self.late_ticks += 1;
        }
    }

    /// Share of measured ticks that ran late.
    #[must_use]
    pub fn late_fraction(&self) -> f64 {
        if self.total_ticks == 0 {
            0.0
        } else {
            self.late_ticks as f64 / self.total_ticks as f64
        }
    }
}

impl TickLoop {
    /// Creates a tick loop running `tick_rate` times per second.
    #[must_use]
    pub fn new(tick_rate: u32) -> Self {
        let tick_duration = Duration::from_micros(1_000_000 / u64::from(tick_rate.max(1)));
        Self {
            tick_duration,
            last_update: Instant::now(),
            accumulator: Duration::ZERO,
            tick_count: 0,
            stats: TickStats::new(tick_duration),
        }
    }

    /// Returns true if a tick is due.
    ///
    /// Call this in a loop until it returns false.
    #[must_use]
    pub fn should_tick(&mut self) -> bool {
        let now = Instant::now();
        self.accumulator += now.duration_since(self.last_update);
        self.last_update = now;

        let backlog = self.tick_duration * MAX_BACKLOG_TICKS;
        if self.accumulator > backlog {
            tracing::warn!(
                behind_ms = self.accumulator.as_millis() as u64,
                "Tick loop fell behind, dropping backlog"
            );
            self.accumulator = backlog;
        }
        self.accumulator >= self.tick_duration
    }

    /// Marks the start of a tick and returns its start time.
    #[must_use]
    pub fn begin_tick(&mut self) -> Instant {
        self.accumulator = self.accumulator.saturating_sub(self.tick_duration);
        self.tick_count += 1;
        Instant::now()
    }

    /// Marks the end of a tick started at `start`.
    pub fn end_tick(&mut self, start: Instant) {
        let duration = start.elapsed();
        self.stats.record(duration, self.tick_duration);
        if duration > self.tick_duration {
            tracing::debug!(
                tick = self.tick_count,
                took_us = duration_us(duration),
                budget_us = duration_us(self.tick_duration),
                "Late tick"
            );
        }
    }

    /// Sleeps until the next tick is due.
    pub fn wait_for_next_tick(&self) {
        let owed = self.accumulator + self.last_update.elapsed();
        if owed < self.tick_duration {
            std::thread::sleep(self.tick_duration - owed);
        }
    }

    /// Ticks started so far.
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Timing statistics.
    #[must_use]
    pub const fn stats(&self) -> &TickStats {
        &self.stats
    }

    /// Target tick duration.
    #[must_use]
    pub const fn tick_duration(&self) -> Duration {
        self.tick_duration
    }

    /// Clears the timing statistics.
    pub fn reset_stats(&mut self) {
        self.stats = TickStats::new(self.tick_duration);
    }
}

impl Default for TickLoop {
    fn default() -> Self {
        Self::new(TICK_RATE)
    }
}

fn duration_us(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}
