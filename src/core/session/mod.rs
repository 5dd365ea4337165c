//! Inactivity tracking for a logged-in user.
//!
//! [`monitor::SessionMonitor`] is the state machine; it never reads a clock,
//! every operation receives the current time. [`watcher::Watcher`] drives it
//! in real time from an [`activity::ActivitySource`].

pub mod activity;
pub mod monitor;
pub mod watcher;

pub use activity::{ActivityEvent, ActivitySource};
pub use monitor::{Phase, SessionEvent, SessionMonitor, SessionState, TimeoutSettings};

use crate::errors::AppResult;

/// Identifies a subscription to a notification source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// Login collaborator consulted by the monitor.
pub trait LoginState {
    fn is_logged_in(&self) -> bool;
    fn logout(&mut self) -> AppResult<()>;
    fn current_user(&self) -> Option<String>;
}
