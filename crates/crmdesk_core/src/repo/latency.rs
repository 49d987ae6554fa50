//! Simulated network latency.
//!
//! Each store operation awaits `Latency::pause` once, before it touches
//! state. A zero delay skips the timer entirely, so `Latency::none()` makes
//! store calls resolve on the first poll.

use std::time::Duration;

/// Operation classes with distinct simulated delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationClass {
    /// Full collection reads.
    List,
    /// Single-record reads and filtered queries.
    Read,
    /// Create and update.
    Write,
    Delete,
}

/// Per-operation simulated delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub list: Duration,
    pub read: Duration,
    pub write: Duration,
    pub delete: Duration,
}

impl Latency {
    /// No simulated delay at all.
    pub const fn none() -> Self {
        Self {
            list: Duration::ZERO,
            read: Duration::ZERO,
            write: Duration::ZERO,
            delete: Duration::ZERO,
        }
    }

    /// Delays of the mock network layer: 300ms lists/writes, 200ms
    /// reads/deletes.
    pub const fn mock_network() -> Self {
        Self {
            list: Duration::from_millis(300),
            read: Duration::from_millis(200),
            write: Duration::from_millis(300),
            delete: Duration::from_millis(200),
        }
    }

    /// Multiplies every delay by `factor`. Zero, negative or non-finite factors
    /// yield `Latency::none()`.
    pub fn scaled(self, factor: f64) -> Self {
        if !factor.is_finite() || factor <= 0.0 {
            return Self::none();
        }
        Self {
            list: scale(self.list, factor),
            read: scale(self.read, factor),
            write: scale(self.write, factor),
            delete: scale(self.delete, factor),
        }
    }

    pub fn delay_for(&self, op: OperationClass) -> Duration {
        match op {
            OperationClass::List => self.list,
            OperationClass::Read => self.read,
            OperationClass::Write => self.write,
            OperationClass::Delete => self.delete,
        }
    }

    /// Suspends for the configured delay of `op`.
    pub async fn pause(&self, op: OperationClass) {
        let delay = self.delay_for(op);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

fn scale(delay: Duration, factor: f64) -> Duration {
    Duration::from_nanos((delay.as_nanos() as f64 * factor).round() as u64)
}

impl Default for Latency {
    fn default() -> Self {
        Self::mock_network()
    }
}

#[cfg(test)]
mod tests {
    use super::{Latency, OperationClass};
    use std::time::Duration;

    #[test]
    fn scaled_halves_every_class() {
        let latency = Latency::mock_network().scaled(0.5);
        assert_eq!(latency.delay_for(OperationClass::List), Duration::from_millis(150));
        assert_eq!(latency.delay_for(OperationClass::Delete), Duration::from_millis(100));
    }

    #[test]
    fn zero_or_invalid_scale_disables_latency() {
        assert_eq!(Latency::mock_network().scaled(0.0), Latency::none());
        assert_eq!(Latency::mock_network().scaled(f64::NAN), Latency::none());
    }

    #[tokio::test(start_paused = true)]
    async fn pause_waits_for_configured_delay() {
        let started = tokio::time::Instant::now();
        Latency::mock_network().pause(OperationClass::Write).await;
        assert!(started.elapsed() >= Duration::from_millis(300));
    }
}
