use super::{LoginState, SubscriptionId};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// No session (never started, stopped or logged out).
    Idle,
    Active,
    /// Inside the warning window before forced logout.
    Warning,
    /// "Stay signed in": no timers armed.
    Suspended,
    Expired,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Active => "active",
            Phase::Warning => "warning",
            Phase::Suspended => "stay signed in",
            Phase::Expired => "expired",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutSettings {
    pub timeout: Duration,
    pub warning_window: Duration,
}

impl Default for TimeoutSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::minutes(15),
            warning_window: Duration::minutes(2),
        }
    }
}

impl TimeoutSettings {
    pub fn new(timeout: Duration, warning_window: Duration) -> AppResult<Self> {
        if warning_window <= Duration::zero() || warning_window >= timeout {
            return Err(AppError::InvalidSessionSettings(format!(
                "warning window ({}s) must be positive and shorter than the timeout ({}s)",
                warning_window.num_seconds(),
                timeout.num_seconds()
            )));
        }
        Ok(Self {
            timeout,
            warning_window,
        })
    }

    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        Self::new(
            Duration::minutes(i64::from(cfg.session_timeout_minutes)),
            Duration::minutes(i64::from(cfg.session_warning_minutes)),
        )
    }

    /// Delay between the last activity and the warning.
    pub fn warning_after(&self) -> Duration {
        self.timeout - self.warning_window
    }
}

/// Deadlines of the armed timer pair. Arming replaces both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct PendingTimers {
    warning_at: Option<DateTime<Utc>>,
    timeout_at: Option<DateTime<Utc>>,
}

impl PendingTimers {
    fn next(&self) -> Option<DateTime<Utc>> {
        match (self.warning_at, self.timeout_at) {
            (Some(w), Some(t)) => Some(w.min(t)),
            (w, t) => w.or(t),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub last_activity_at: Option<DateTime<Utc>>,
    pub stay_signed_in: bool,
    pub phase: Phase,
    timers: PendingTimers,
}

impl SessionState {
    fn idle() -> Self {
        Self {
            last_activity_at: None,
            stay_signed_in: false,
            phase: Phase::Idle,
            timers: PendingTimers::default(),
        }
    }

    pub fn warning_at(&self) -> Option<DateTime<Utc>> {
        self.timers.warning_at
    }

    pub fn timeout_at(&self) -> Option<DateTime<Utc>> {
        self.timers.timeout_at
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Warning { remaining: Duration },
    Expired,
}

type WarningObserver = Box<dyn FnMut(i64)>;

pub struct SessionMonitor<L: LoginState> {
    settings: TimeoutSettings,
    login: L,
    state: SessionState,
    observers: Vec<(SubscriptionId, WarningObserver)>,
    next_subscription: u64,
}

impl<L: LoginState> SessionMonitor<L> {
    pub fn new(settings: TimeoutSettings, login: L) -> Self {
        Self {
            settings,
            login,
            state: SessionState::idle(),
            observers: Vec::new(),
            next_subscription: 1,
        }
    }

    /// Rebuild the monitor of a persisted login. Timers are armed relative
    /// to the stored activity time, so a later `poll` fires what is overdue.
    pub fn resume(
        settings: TimeoutSettings,
        login: L,
        last_activity_at: DateTime<Utc>,
        stay_signed_in: bool,
    ) -> Self {
        let mut monitor = Self::new(settings, login);
        if monitor.login.is_logged_in() {
            monitor.start_session(last_activity_at, stay_signed_in);
        }
        monitor
    }

    pub fn settings(&self) -> &TimeoutSettings {
        &self.settings
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn login(&self) -> &L {
        &self.login
    }

    pub fn login_mut(&mut self) -> &mut L {
        &mut self.login
    }

    /// Earliest armed deadline, if any.
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.state.timers.next()
    }

    /// Time left before forced logout.
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.state
            .timers
            .timeout_at
            .map(|t| (t - now).max(Duration::zero()))
    }

    /// Register a warning observer; it receives the milliseconds left
    /// before forced logout.
    pub fn subscribe_warning<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(i64) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe_warning(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    pub fn start_session(&mut self, now: DateTime<Utc>, stay_signed_in: bool) {
        self.clear_timers();
        self.state.stay_signed_in = stay_signed_in;
        self.state.last_activity_at = Some(now);

        if stay_signed_in {
            self.state.phase = Phase::Suspended;
        } else {
            self.arm(now);
        }
    }

    /// Activity: re-arm from `now` and return to `Active`.
    /// Returns false when the activity was ignored (no running session,
    /// stay signed in, or nobody logged in).
    pub fn reset_timer(&mut self, now: DateTime<Utc>) -> bool {
        if self.state.stay_signed_in
            || !matches!(self.state.phase, Phase::Active | Phase::Warning)
            || !self.login.is_logged_in()
        {
            return false;
        }

        self.state.last_activity_at = Some(now);
        self.arm(now);
        true
    }

    pub fn extend_session(&mut self, now: DateTime<Utc>) -> bool {
        self.reset_timer(now)
    }

    pub fn stop_session(&mut self) {
        self.clear_timers();
        self.state = SessionState::idle();
    }

    pub fn set_stay_signed_in(&mut self, now: DateTime<Utc>, value: bool) {
        match (value, self.state.phase) {
            (true, Phase::Active | Phase::Warning | Phase::Suspended) => {
                self.clear_timers();
                self.state.stay_signed_in = true;
                self.state.phase = Phase::Suspended;
            }
            (false, Phase::Suspended) => {
                self.state.stay_signed_in = false;
                if self.login.is_logged_in() {
                    self.state.last_activity_at = Some(now);
                    self.arm(now);
                } else {
                    self.state.phase = Phase::Idle;
                }
            }
            (false, Phase::Active | Phase::Warning) => {
                self.state.stay_signed_in = false;
                self.reset_timer(now);
            }
            // No session running: the preference is taken at the next start.
            (_, Phase::Idle | Phase::Expired) => {}
        }
    }

    /// Fire every timer due at `now`, earliest first.
    pub fn poll(&mut self, now: DateTime<Utc>) -> AppResult<Vec<SessionEvent>> {
        let mut events = Vec::new();

        while let Some(deadline) = self.next_deadline() {
            if deadline > now {
                break;
            }

            if self.state.timers.warning_at == Some(deadline) {
                self.state.timers.warning_at = None;
                if let Some(ev) = self.fire_warning() {
                    events.push(ev);
                }
            } else {
                self.state.timers.timeout_at = None;
                if let Some(ev) = self.fire_timeout()? {
                    events.push(ev);
                }
            }
        }

        Ok(events)
    }

    fn fire_warning(&mut self) -> Option<SessionEvent> {
        if self.state.phase != Phase::Active {
            return None;
        }

        self.state.phase = Phase::Warning;
        let remaining = self.settings.warning_window;
        let ms = remaining.num_milliseconds();
        for (_, observer) in self.observers.iter_mut() {
            observer(ms);
        }

        Some(SessionEvent::Warning { remaining })
    }

    fn fire_timeout(&mut self) -> AppResult<Option<SessionEvent>> {
        if self.state.stay_signed_in || !self.login.is_logged_in() {
            // Nothing left to end.
            self.stop_session();
            return Ok(None);
        }

        self.stop_session();
        self.state.phase = Phase::Expired;
        self.login.logout()?;
        Ok(Some(SessionEvent::Expired))
    }

    fn arm(&mut self, now: DateTime<Utc>) {
        self.state.timers = PendingTimers {
            warning_at: Some(now + self.settings.warning_after()),
            timeout_at: Some(now + self.settings.timeout),
        };
        self.state.phase = Phase::Active;
    }

    fn clear_timers(&mut self) {
        self.state.timers = PendingTimers::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct FakeLogin {
        logged_in: bool,
        logouts: u32,
    }

    impl FakeLogin {
        fn logged_in() -> Self {
            Self {
                logged_in: true,
                logouts: 0,
            }
        }
    }

    impl LoginState for FakeLogin {
        fn is_logged_in(&self) -> bool {
            self.logged_in
        }

        fn logout(&mut self) -> AppResult<()> {
            self.logged_in = false;
            self.logouts += 1;
            Ok(())
        }

        fn current_user(&self) -> Option<String> {
            self.logged_in.then(|| "admin".to_string())
        }
    }

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-01-06T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn mins(m: i64) -> Duration {
        Duration::minutes(m)
    }

    fn monitor() -> SessionMonitor<FakeLogin> {
        SessionMonitor::new(TimeoutSettings::default(), FakeLogin::logged_in())
    }

    #[test]
    fn default_warning_fires_after_thirteen_minutes() {
        assert_eq!(TimeoutSettings::default().warning_after(), mins(13));
    }

    #[test]
    fn warning_then_expiry_without_activity() {
        let mut m = monitor();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        m.subscribe_warning(move |ms| sink.borrow_mut().push(ms));

        m.start_session(t0(), false);
        assert_eq!(m.phase(), Phase::Active);

        assert!(m.poll(t0() + mins(13) - Duration::seconds(1)).unwrap().is_empty());

        let events = m.poll(t0() + mins(13)).unwrap();
        assert_eq!(events, vec![SessionEvent::Warning { remaining: mins(2) }]);
        assert_eq!(m.phase(), Phase::Warning);
        assert_eq!(*seen.borrow(), vec![120_000]);

        let events = m.poll(t0() + mins(15)).unwrap();
        assert_eq!(events, vec![SessionEvent::Expired]);
        assert_eq!(m.phase(), Phase::Expired);
        assert_eq!(m.login().logouts, 1);
        assert!(m.next_deadline().is_none());
    }

    #[test]
    fn activity_postpones_expiry() {
        let mut m = monitor();
        m.start_session(t0(), false);

        assert!(m.reset_timer(t0() + mins(10)));
        assert!(m.poll(t0() + mins(22)).unwrap().is_empty());
        assert_eq!(m.phase(), Phase::Active);

        let events = m.poll(t0() + mins(25)).unwrap();
        assert!(events.contains(&SessionEvent::Expired));
        assert_eq!(m.login().logouts, 1);
    }

    #[test]
    fn activity_during_warning_returns_to_active() {
        let mut m = monitor();
        m.start_session(t0(), false);
        m.poll(t0() + mins(14)).unwrap();
        assert_eq!(m.phase(), Phase::Warning);

        assert!(m.extend_session(t0() + mins(14)));
        assert_eq!(m.phase(), Phase::Active);
        assert_eq!(m.state().timeout_at(), Some(t0() + mins(29)));
        assert!(m.poll(t0() + mins(20)).unwrap().is_empty());
    }

    #[test]
    fn rearming_replaces_the_pending_pair() {
        let mut m = monitor();
        m.start_session(t0(), false);
        m.reset_timer(t0() + mins(1));
        m.reset_timer(t0() + mins(2));

        assert_eq!(m.state().warning_at(), Some(t0() + mins(15)));
        assert_eq!(m.state().timeout_at(), Some(t0() + mins(17)));

        let events = m.poll(t0() + mins(16)).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(m.phase(), Phase::Warning);
    }

    #[test]
    fn stay_signed_in_never_warns_or_expires() {
        let mut m = monitor();
        let warned = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&warned);
        m.subscribe_warning(move |_| *sink.borrow_mut() += 1);

        m.start_session(t0(), true);
        assert_eq!(m.phase(), Phase::Suspended);
        assert!(m.next_deadline().is_none());

        assert!(m.poll(t0() + Duration::days(30)).unwrap().is_empty());
        assert!(!m.reset_timer(t0() + Duration::days(30)));
        assert_eq!(m.phase(), Phase::Suspended);
        assert_eq!(*warned.borrow(), 0);
        assert_eq!(m.login().logouts, 0);
    }

    #[test]
    fn toggling_stay_signed_in() {
        let mut m = monitor();
        m.start_session(t0(), false);

        m.set_stay_signed_in(t0() + mins(5), true);
        assert_eq!(m.phase(), Phase::Suspended);
        assert!(m.next_deadline().is_none());

        m.set_stay_signed_in(t0() + mins(60), false);
        assert_eq!(m.phase(), Phase::Active);
        assert_eq!(m.state().timeout_at(), Some(t0() + mins(75)));
    }

    #[test]
    fn stop_session_cancels_everything() {
        let mut m = monitor();
        m.start_session(t0(), true);
        m.stop_session();

        assert_eq!(m.phase(), Phase::Idle);
        assert!(!m.state().stay_signed_in);
        assert!(m.next_deadline().is_none());
        assert!(!m.reset_timer(t0() + mins(1)));
        assert!(m.poll(t0() + mins(60)).unwrap().is_empty());
    }

    #[test]
    fn expiry_without_login_is_dropped() {
        let mut m = monitor();
        m.start_session(t0(), false);
        m.login_mut().logged_in = false;

        let events = m.poll(t0() + mins(30)).unwrap();
        assert_eq!(events, vec![SessionEvent::Warning { remaining: mins(2) }]);
        assert_eq!(m.phase(), Phase::Idle);
        assert_eq!(m.login().logouts, 0);
    }

    #[test]
    fn late_poll_fires_warning_before_expiry() {
        let mut m = monitor();
        m.start_session(t0(), false);

        let events = m.poll(t0() + Duration::hours(2)).unwrap();
        assert_eq!(
            events,
            vec![
                SessionEvent::Warning { remaining: mins(2) },
                SessionEvent::Expired
            ]
        );
    }

    #[test]
    fn resume_arms_from_stored_activity() {
        let m = SessionMonitor::resume(
            TimeoutSettings::default(),
            FakeLogin::logged_in(),
            t0(),
            false,
        );
        assert_eq!(m.state().timeout_at(), Some(t0() + mins(15)));

        let idle = SessionMonitor::resume(TimeoutSettings::default(), FakeLogin::default(), t0(), false);
        assert_eq!(idle.phase(), Phase::Idle);
    }

    #[test]
    fn unsubscribed_observers_are_not_notified() {
        let mut m = monitor();
        let hits = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&hits);
        let id = m.subscribe_warning(move |_| *sink.borrow_mut() += 1);
        assert!(m.unsubscribe_warning(id));

        m.start_session(t0(), false);
        m.poll(t0() + mins(13)).unwrap();
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn settings_reject_window_not_shorter_than_timeout() {
        assert!(TimeoutSettings::new(mins(2), mins(2)).is_err());
        assert!(TimeoutSettings::new(mins(15), Duration::zero()).is_err());
        assert!(TimeoutSettings::new(mins(15), mins(2)).is_ok());
    }
}
