//! Random pause before network calls, to stay under per-client rate limits.

use crate::config::JitterConfig;
use rand::Rng;
use std::time::Duration;

/// Blocks the current thread for a jitter delay. `label` names the call being delayed.
pub trait Sleeper {
    fn sleep(&self, label: &str, delay: Duration);
}

/// `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, label: &str, delay: Duration) {
        tracing::debug!(delay_ms = delay.as_millis() as u64, "jitter before {}", label);
        std::thread::sleep(delay);
    }
}

/// Uniform random delay in `[min, max]`. Not a retry: it runs once per call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jitter {
    min: Duration,
    max: Duration,
}

impl Jitter {
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn from_config(cfg: &JitterConfig) -> Self {
        let (min, max) = cfg.window();
        Self::new(min, max)
    }

    pub fn sample(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        let ms = rand::thread_rng().gen_range(self.min.as_millis()..=self.max.as_millis());
        Duration::from_millis(ms as u64)
    }

    /// Sleeps for a sampled delay on the current thread.
    pub fn pause(&self, label: &str) {
        self.pause_with(label, &ThreadSleeper);
    }

    pub fn pause_with(&self, label: &str, sleeper: &dyn Sleeper) {
        sleeper.sleep(label, self.sample());
    }
}
