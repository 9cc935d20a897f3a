//! Timed "Copied!" acknowledgement.
//!
//! Same virtual-time model as the reveal scheduler: the caller passes the
//! elapsed time and sleeps until [`Acknowledgement::deadline`].

use std::time::Duration;

/// How long the acknowledgement stays visible after a copy.
pub const ACK_WINDOW: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Acknowledgement {
    shown_until: Option<Duration>,
}

impl Acknowledgement {
    /// Show the acknowledgement from `now`.  A repeat trigger replaces the
    /// pending expiry instead of stacking.
    pub fn trigger(&mut self, now: Duration) {
        self.shown_until = Some(now + ACK_WINDOW);
    }

    pub fn is_active(&self, now: Duration) -> bool {
        self.shown_until.is_some_and(|until| now < until)
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.shown_until
    }

    /// Drop an elapsed window.  Returns `true` if it just closed.
    pub fn expire(&mut self, now: Duration) -> bool {
        if self.shown_until.is_some() && !self.is_active(now) {
            self.shown_until = None;
            return true;
        }
        false
    }

    pub fn cancel(&mut self) {
        self.shown_until = None;
    }
}
