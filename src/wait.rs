//! Bounded readiness wait for the database service.

use std::thread;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

/// One poll's outcome: the dependency is either up or not yet reachable.
///
/// "Not yet reachable" covers a non-zero exit from the ping command and a
/// missing liveness marker. These are expected states while MySQL
/// initializes, not errors. Failing to spawn the ping command at all does
/// propagate as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PingOutcome {
    Ready,
    NotReady,
}

/// Source of readiness pings.
pub trait DbPinger {
    fn ping(&self) -> anyhow::Result<PingOutcome>;
}

/// How long and how often to poll.
#[derive(Debug, Clone)]
pub struct WaitPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

/// Readiness-wait failure.
#[derive(Debug, thiserror::Error)]
pub enum WaitError {
    /// Polls were exhausted without the dependency coming up.
    #[error("database not ready after {attempts} attempts ({interval_secs}s interval)")]
    TimedOut { attempts: u32, interval_secs: u64 },
    /// The ping invocation itself broke (e.g. docker missing).
    #[error(transparent)]
    Ping(#[from] anyhow::Error),
}

/// Poll until the database reports liveness or the policy is exhausted.
#[instrument(skip_all, fields(max_attempts = policy.max_attempts, interval_secs = policy.interval.as_secs()))]
pub fn wait_for_database<P: DbPinger>(pinger: &P, policy: &WaitPolicy) -> Result<(), WaitError> {
    for attempt in 1..=policy.max_attempts {
        match pinger.ping()? {
            PingOutcome::Ready => {
                info!(attempt, "database is ready");
                return Ok(());
            }
            PingOutcome::NotReady => {
                debug!(attempt, "database not ready yet");
            }
        }
        if attempt < policy.max_attempts {
            thread::sleep(policy.interval);
        }
    }
    warn!("readiness polls exhausted");
    Err(WaitError::TimedOut {
        attempts: policy.max_attempts,
        interval_secs: policy.interval.as_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::cell::Cell;

    struct ReadyAfter {
        ready_on: u32,
        calls: Cell<u32>,
    }

    impl DbPinger for ReadyAfter {
        fn ping(&self) -> anyhow::Result<PingOutcome> {
            let call = self.calls.get() + 1;
            self.calls.set(call);
            if call >= self.ready_on {
                Ok(PingOutcome::Ready)
            } else {
                Ok(PingOutcome::NotReady)
            }
        }
    }

    struct BrokenPinger;

    impl DbPinger for BrokenPinger {
        fn ping(&self) -> anyhow::Result<PingOutcome> {
            Err(anyhow!("docker not found"))
        }
    }

    fn policy(max_attempts: u32) -> WaitPolicy {
        WaitPolicy {
            max_attempts,
            interval: Duration::ZERO,
        }
    }

    #[test]
    fn returns_ok_once_ready() {
        let pinger = ReadyAfter {
            ready_on: 3,
            calls: Cell::new(0),
        };
        wait_for_database(&pinger, &policy(5)).expect("ready");
        assert_eq!(pinger.calls.get(), 3);
    }

    #[test]
    fn times_out_after_max_attempts() {
        let pinger = ReadyAfter {
            ready_on: u32::MAX,
            calls: Cell::new(0),
        };
        let err = wait_for_database(&pinger, &policy(4)).unwrap_err();
        assert!(matches!(err, WaitError::TimedOut { attempts: 4, .. }));
        assert_eq!(pinger.calls.get(), 4);
    }

    #[test]
    fn ready_on_last_attempt_is_ok() {
        let pinger = ReadyAfter {
            ready_on: 4,
            calls: Cell::new(0),
        };
        wait_for_database(&pinger, &policy(4)).expect("ready");
    }

    #[test]
    fn ping_errors_propagate_immediately() {
        let err = wait_for_database(&BrokenPinger, &policy(10)).unwrap_err();
        assert!(matches!(err, WaitError::Ping(_)));
        assert!(err.to_string().contains("docker not found"));
    }
}
