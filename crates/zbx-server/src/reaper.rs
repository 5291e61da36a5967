//! Idle session reaper
//!
//! Background task that periodically closes sessions with no inbound
//! activity for longer than the idle timeout.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::session::{CloseOutcome, CloseReason, OutboundEvent, SessionTable};

/// Outcome of one sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Sessions looked at
    pub examined: usize,
    /// Sessions closed by this sweep
    pub evicted: usize,
    /// Closing notices that could not be queued
    pub notice_failures: usize,
}

/// Evicts idle sessions
#[derive(Debug, Clone)]
pub struct Reaper {
    sessions: Arc<SessionTable>,
    idle_timeout: Duration,
    sweep_interval: Duration,
}

impl Reaper {
    /// Create a reaper over `sessions`
    pub fn new(sessions: Arc<SessionTable>, idle_timeout: Duration, sweep_interval: Duration) -> Self {
        Self {
            sessions,
            idle_timeout,
            sweep_interval,
        }
    }

    /// Idle time after which a session is evicted
    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Time between sweeps
    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }

    /// Sweep now
    pub fn sweep(&self) -> SweepReport {
        self.sweep_at(Instant::now())
    }

    /// Sweep as if the current time were `now`
    pub fn sweep_at(&self, now: Instant) -> SweepReport {
        let mut report = SweepReport::default();

        for session in self.sessions.snapshot() {
            report.examined += 1;
            let idle = session.idle_for(now);
            if idle <= self.idle_timeout {
                continue;
            }

            let notice = OutboundEvent::closed(CloseReason::IdleTimeout.as_str());
            if let Err(e) = session.try_send(notice) {
                report.notice_failures += 1;
                warn!(session_id = %session.id(), error = %e, "Could not queue idle notice");
            }

            if self.sessions.close(&session.id(), CloseReason::IdleTimeout) == CloseOutcome::Closed {
                report.evicted += 1;
                debug!(
                    session_id = %session.id(),
                    idle_secs = idle.as_secs(),
                    "Evicted idle session"
                );
            }
        }

        if report.evicted > 0 {
            info!(
                examined = report.examined,
                evicted = report.evicted,
                notice_failures = report.notice_failures,
                "Idle sweep finished"
            );
        }
        report
    }

    /// Run sweeps on the interval until `shutdown` is cancelled
    pub fn spawn(self, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(shutdown).await })
    }

    async fn run(self, shutdown: CancellationToken) {
        let mut ticker = tokio::time::interval_at(
            Instant::now() + self.sweep_interval,
            self.sweep_interval,
        );
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(
            idle_timeout_secs = self.idle_timeout.as_secs(),
            sweep_interval_secs = self.sweep_interval.as_secs(),
            "Session reaper started"
        );

        loop {
            tokio::select! {
                () = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    self.sweep();
                }
            }
        }
        debug!("Session reaper stopped");
    }
}
