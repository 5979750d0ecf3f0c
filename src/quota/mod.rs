// Fixed-window request budgets for outbound Gemini calls

use crate::config::QuotaConfig;
use crate::error::{AppError, QuotaScope, Result};
use parking_lot::Mutex;
use std::time::{Duration, Instant};
use tracing::warn;

const MINUTE_WINDOW: Duration = Duration::from_secs(60);
const DAY_WINDOW: Duration = Duration::from_secs(86_400);

/// One fixed counting window. The count only ever resets as a whole when the
/// window length has fully elapsed; it is never decremented.
#[derive(Debug)]
struct QuotaWindow {
    window_start: Instant,
    count: u32,
}

impl QuotaWindow {
    fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            count: 0,
        }
    }

    /// Advance the window if its length has elapsed. Runs before the limit
    /// check, so a tracker idle past the boundary always admits the next call.
    fn roll(&mut self, now: Instant, length: Duration) {
        if now.duration_since(self.window_start) >= length {
            self.window_start = now;
            self.count = 0;
        }
    }
}

struct Windows {
    minute: QuotaWindow,
    day: QuotaWindow,
}

/// Tracks per-minute and per-day budgets for provider calls.
///
/// `admit` never sleeps. A budget rejection is an error so the retry policy
/// can classify it exactly like a transient provider fault and decide whether
/// to back off or give up.
pub struct QuotaTracker {
    config: QuotaConfig,
    windows: Mutex<Windows>,
}

impl QuotaTracker {
    pub fn new(config: QuotaConfig) -> Self {
        let now = Instant::now();
        Self {
            config,
            windows: Mutex::new(Windows {
                minute: QuotaWindow::new(now),
                day: QuotaWindow::new(now),
            }),
        }
    }

    /// Admit one provider call, or fail with `QuotaExceeded`.
    pub fn admit(&self) -> Result<()> {
        self.admit_at(Instant::now())
    }

    // The roll-check-increment sequence holds the lock for its whole critical
    // section; nothing awaits while it runs.
    pub(crate) fn admit_at(&self, now: Instant) -> Result<()> {
        let mut windows = self.windows.lock();

        windows.minute.roll(now, MINUTE_WINDOW);
        windows.day.roll(now, DAY_WINDOW);

        // Day exhaustion is the harder failure, check it first
        if windows.day.count >= self.config.requests_per_day {
            warn!("Daily Gemini quota exhausted ({} requests)", self.config.requests_per_day);
            crate::metrics::record_quota_rejection("day");
            return Err(AppError::QuotaExceeded(QuotaScope::Day));
        }

        if windows.minute.count >= self.config.requests_per_minute {
            warn!("Per-minute Gemini quota exhausted ({} requests)", self.config.requests_per_minute);
            crate::metrics::record_quota_rejection("minute");
            return Err(AppError::QuotaExceeded(QuotaScope::Minute));
        }

        windows.minute.count += 1;
        windows.day.count += 1;
        Ok(())
    }
}
