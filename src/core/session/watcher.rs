use super::activity::{ActivityEvent, ActivitySource};
use super::monitor::{Phase, SessionEvent, SessionMonitor, SessionState};
use super::LoginState;
use crate::errors::AppResult;
use chrono::{DateTime, Utc};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration as StdDuration;

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOutcome {
    Expired,
    LoggedOut,
    /// Logged out by another process; nothing left to record.
    Ended,
    InputClosed,
}

/// Real-time driver: waits for activity until the next deadline,
/// then lets the monitor fire whatever is due. One event at a time.
pub struct Watcher<'a, L: LoginState, S: ActivitySource, C: Clock> {
    monitor: &'a mut SessionMonitor<L>,
    source: &'a mut S,
    clock: C,
}

impl<'a, L: LoginState, S: ActivitySource, C: Clock> Watcher<'a, L, S, C> {
    pub fn new(monitor: &'a mut SessionMonitor<L>, source: &'a mut S, clock: C) -> Self {
        Self {
            monitor,
            source,
            clock,
        }
    }

    /// Run until expiry, logout or end of input.
    /// `on_step` sees the state after every handled input event.
    pub fn run<F>(&mut self, mut on_step: F) -> AppResult<WatchOutcome>
    where
        F: FnMut(&SessionState) -> AppResult<()>,
    {
        let (tx, rx) = mpsc::channel();
        let sub = self.source.subscribe(tx);
        let outcome = self.pump(&rx, &mut on_step);
        self.source.unsubscribe(sub);
        outcome
    }

    fn pump<F>(&mut self, rx: &Receiver<ActivityEvent>, on_step: &mut F) -> AppResult<WatchOutcome>
    where
        F: FnMut(&SessionState) -> AppResult<()>,
    {
        loop {
            if self.fire_due()? {
                return Ok(WatchOutcome::Expired);
            }
            if self.monitor.phase() == Phase::Idle {
                return Ok(WatchOutcome::Ended);
            }

            let received = match self.monitor.next_deadline() {
                Some(deadline) => {
                    let wait = (deadline - self.clock.now())
                        .to_std()
                        .unwrap_or(StdDuration::ZERO);
                    rx.recv_timeout(wait)
                }
                None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
            };

            let event = match received {
                Ok(ev) => ev,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => return Ok(WatchOutcome::InputClosed),
            };

            // A deadline that passed while the event was in flight wins.
            if self.fire_due()? {
                return Ok(WatchOutcome::Expired);
            }

            let now = self.clock.now();
            match event {
                ActivityEvent::Activity => {
                    self.monitor.reset_timer(now);
                }
                ActivityEvent::Extend => {
                    self.monitor.extend_session(now);
                }
                ActivityEvent::StaySignedIn(v) => self.monitor.set_stay_signed_in(now, v),
                ActivityEvent::Logout => {
                    self.monitor.stop_session();
                    self.monitor.login_mut().logout()?;
                    return Ok(WatchOutcome::LoggedOut);
                }
                ActivityEvent::Closed => return Ok(WatchOutcome::InputClosed),
            }

            on_step(self.monitor.state())?;
        }
    }

    fn fire_due(&mut self) -> AppResult<bool> {
        let events = self.monitor.poll(self.clock.now())?;
        Ok(events.contains(&SessionEvent::Expired))
    }
}
