use chrono::{DateTime, Duration, Utc};

/// Idle threshold: a session expires after this many seconds without activity.
pub const IDLE_TIMEOUT_SECS: i64 = 5 * 60;

/// Fixed delay the caller should apply per password attempt. A UX throttle
/// against casual brute force, not a cryptographic rate limit.
pub const LOGIN_ATTEMPT_DELAY: std::time::Duration = std::time::Duration::from_millis(500);

/// Source of the current time. Injected so session expiry is testable
/// without real waiting.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy)]
struct SessionState {
    login_time: DateTime<Utc>,
    last_activity: DateTime<Utc>,
}

/// Short-lived, password-gated access control for the portfolio view.
///
/// State machine: `Unauthenticated → (correct password) → Authenticated →
/// (idle timeout | explicit logout) → Unauthenticated`. The session is
/// ephemeral — it lives only as long as this value and is never persisted.
pub struct SessionManager {
    password: String,
    clock: Box<dyn Clock>,
    session: Option<SessionState>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the configured password.
        f.debug_struct("SessionManager")
            .field("authenticated", &self.session.is_some())
            .finish()
    }
}

impl SessionManager {
    pub fn new(password: impl Into<String>) -> Self {
        Self::with_clock(password, Box::new(SystemClock))
    }

    /// Construct with an injected clock (tests use a manual clock).
    pub fn with_clock(password: impl Into<String>, clock: Box<dyn Clock>) -> Self {
        Self {
            password: password.into(),
            clock,
            session: None,
        }
    }

    /// Compare a candidate against the configured secret. Reveals nothing
    /// about which character differs. Does not establish a session.
    #[must_use]
    pub fn check_password(&self, candidate: &str) -> bool {
        candidate == self.password
    }

    /// Check the candidate and establish a session on success.
    pub fn login(&mut self, candidate: &str) -> bool {
        if !self.check_password(candidate) {
            return false;
        }
        let now = self.clock.now();
        self.session = Some(SessionState {
            login_time: now,
            last_activity: now,
        });
        true
    }

    /// True only while a grant exists and the idle threshold has not elapsed.
    ///
    /// Sliding expiration: every successful check refreshes the activity
    /// timestamp. An expired session is cleared as a side effect.
    pub fn is_authenticated(&mut self) -> bool {
        let now = self.clock.now();
        let expired = match self.session.as_ref() {
            None => return false,
            Some(s) => now - s.last_activity > Duration::seconds(IDLE_TIMEOUT_SECS),
        };

        if expired {
            self.clear_session();
            return false;
        }

        if let Some(s) = self.session.as_mut() {
            s.last_activity = now;
        }
        true
    }

    /// Seconds until idle expiry, floored at zero. Does not refresh activity.
    #[must_use]
    pub fn remaining_seconds(&self) -> u64 {
        self.remaining().map_or(0, |d| {
            let ms = d.num_milliseconds();
            (ms as f64 / 1000.0).ceil().max(0.0) as u64
        })
    }

    /// Minutes until idle expiry, floored at zero.
    #[must_use]
    pub fn remaining_minutes(&self) -> u64 {
        self.remaining().map_or(0, |d| {
            let ms = d.num_milliseconds();
            (ms as f64 / 60_000.0).ceil().max(0.0) as u64
        })
    }

    /// Moment the session was established, if one exists.
    #[must_use]
    pub fn login_time(&self) -> Option<DateTime<Utc>> {
        self.session.map(|s| s.login_time)
    }

    /// Erase all session state. Subsequent `is_authenticated` returns false.
    pub fn clear_session(&mut self) {
        self.session = None;
    }

    fn remaining(&self) -> Option<Duration> {
        let state = self.session.as_ref()?;
        let elapsed = self.clock.now() - state.last_activity;
        Some(Duration::seconds(IDLE_TIMEOUT_SECS) - elapsed)
    }
}
