use std::time::Duration;

/// Source of delays between poll attempts
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration);
}

/// Blocks the current thread
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Bounded poll: at most `max_attempts` checks, `delay` apart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub const DEFAULT: RetryPolicy = RetryPolicy {
        max_attempts: 5,
        delay: Duration::from_secs(1),
    };

    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Run `check` until it yields a value or attempts run out.
    ///
    /// Errors from `check` end the poll immediately. There is no sleep after
    /// the last attempt. A policy of zero attempts still checks once.
    pub fn poll<T, E>(
        &self,
        sleeper: &dyn Sleeper,
        mut check: impl FnMut(u32) -> Result<Option<T>, E>,
    ) -> Result<Option<T>, E> {
        let attempts = self.max_attempts.max(1);
        for attempt in 1..=attempts {
            if let Some(value) = check(attempt)? {
                return Ok(Some(value));
            }
            if attempt < attempts {
                sleeper.sleep(self.delay);
            }
        }
        Ok(None)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}
