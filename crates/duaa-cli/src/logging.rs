//! Rate-limited logging
//!
//! A job storm can emit thousands of records per second. [`RateLimitedLogger`]
//! wraps any [`log::Log`] with a token bucket: records beyond the rate are
//! counted and dropped, and a single summary line reports the count at most
//! once per [`SUMMARY_INTERVAL`].

use std::time::{Duration, Instant};

use log::{Level, Log, Metadata, Record, SetLoggerError};
use parking_lot::Mutex;

/// Records let through per second
pub const DEFAULT_RATE: u32 = 15;

/// Minimum spacing between "records dropped" summaries
pub const SUMMARY_INTERVAL: Duration = Duration::from_secs(5);

/// Token bucket refilled continuously at `rate` tokens per second
#[derive(Debug)]
pub struct TokenBucket {
    capacity: f64,
    tokens: f64,
    last_refill: Instant,
    dropped: u64,
    last_summary: Instant,
}

impl TokenBucket {
    pub fn new(rate: u32, now: Instant) -> Self {
        let capacity = f64::from(rate.max(1));
        Self {
            capacity,
            tokens: capacity,
            last_refill: now,
            dropped: 0,
            last_summary: now,
        }
    }

    /// Take a token, or count the record as dropped
    pub fn try_take(&mut self, now: Instant) -> bool {
        let elapsed = now.saturating_duration_since(self.last_refill).as_secs_f64();
        self.tokens = (self.tokens + elapsed * self.capacity).min(self.capacity);
        self.last_refill = now;

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            self.dropped += 1;
            false
        }
    }

    /// Dropped count since the last summary, once [`SUMMARY_INTERVAL`] has passed
    pub fn take_summary(&mut self, now: Instant) -> Option<u64> {
        if self.dropped == 0 || now.saturating_duration_since(self.last_summary) < SUMMARY_INTERVAL {
            return None;
        }
        self.last_summary = now;
        Some(std::mem::take(&mut self.dropped))
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

pub struct RateLimitedLogger<L> {
    inner: L,
    bucket: Mutex<TokenBucket>,
}

impl<L: Log> RateLimitedLogger<L> {
    pub fn new(inner: L, rate: u32) -> Self {
        Self {
            inner,
            bucket: Mutex::new(TokenBucket::new(rate, Instant::now())),
        }
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }
}

impl<L: Log> Log for RateLimitedLogger<L> {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let now = Instant::now();
        let (allowed, summary) = {
            let mut bucket = self.bucket.lock();
            let summary = bucket.take_summary(now);
            (bucket.try_take(now), summary)
        };

        if let Some(dropped) = summary {
            self.inner.log(
                &Record::builder()
                    .level(Level::Warn)
                    .target(module_path!())
                    .args(format_args!("{} log record(s) dropped by rate limit", dropped))
                    .build(),
            );
        }
        if allowed {
            self.inner.log(record);
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Install `env_logger`, limited to [`DEFAULT_RATE`] records per second.
///
/// `RUST_LOG` still selects levels; without it the default is `info`, or
/// `debug` when `verbose` is set.
pub fn init(verbose: bool) -> Result<(), SetLoggerError> {
    let default_filter = if verbose { "debug" } else { "info" };
    let inner = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .build();

    log::set_max_level(inner.filter());
    log::set_boxed_logger(Box::new(RateLimitedLogger::new(inner, DEFAULT_RATE)))
}
