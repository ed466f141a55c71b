// ═══════════════════════════════════════════════════════════════════
// Session Tests — password gate, sliding idle expiry
// ═══════════════════════════════════════════════════════════════════

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};

use gold_tracker_core::session::{Clock, SessionManager, IDLE_TIMEOUT_SECS, LOGIN_ATTEMPT_DELAY};

/// A clock the test advances by hand.
struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

struct TestClock {
    handle: Arc<Mutex<DateTime<Utc>>>,
}

impl TestClock {
    fn advance(&self, seconds: i64) {
        let mut now = self.handle.lock().unwrap();
        *now = *now + Duration::seconds(seconds);
    }
}

fn manager() -> (SessionManager, TestClock) {
    let start = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let handle = Arc::new(Mutex::new(start));
    let clock = ManualClock {
        now: Arc::clone(&handle),
    };
    let manager = SessionManager::with_clock("secret", Box::new(clock));
    (manager, TestClock { handle })
}

// ═══════════════════════════════════════════════════════════════════
//  Password checking and login
// ═══════════════════════════════════════════════════════════════════

mod login {
    use super::*;

    #[test]
    fn check_password_does_not_establish_session() {
        let (mut m, _clock) = manager();
        assert!(m.check_password("secret"));
        assert!(!m.is_authenticated());
    }

    #[test]
    fn wrong_password_is_rejected() {
        let (mut m, _clock) = manager();
        assert!(!m.login("wrong"));
        assert!(!m.is_authenticated());
        assert_eq!(m.login_time(), None);
    }

    #[test]
    fn correct_password_establishes_session() {
        let (mut m, _clock) = manager();
        assert!(m.login("secret"));
        assert!(m.is_authenticated());
        assert!(m.login_time().is_some());
    }

    #[test]
    fn logout_clears_session() {
        let (mut m, _clock) = manager();
        m.login("secret");
        m.clear_session();
        assert!(!m.is_authenticated());
        assert_eq!(m.remaining_seconds(), 0);
    }

    #[test]
    fn attempt_delay_is_half_a_second() {
        assert_eq!(LOGIN_ATTEMPT_DELAY.as_millis(), 500);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Sliding idle expiry
// ═══════════════════════════════════════════════════════════════════

mod expiry {
    use super::*;

    #[test]
    fn session_survives_activity_within_the_window() {
        let (mut m, clock) = manager();
        m.login("secret");
        clock.advance(IDLE_TIMEOUT_SECS - 1);
        assert!(m.is_authenticated());
    }

    #[test]
    fn expires_past_the_idle_threshold_and_clears() {
        let (mut m, clock) = manager();
        m.login("secret");
        clock.advance(IDLE_TIMEOUT_SECS + 1);
        assert!(!m.is_authenticated());
        // cleared, not merely reported expired
        assert_eq!(m.login_time(), None);
        assert!(!m.is_authenticated());
    }

    #[test]
    fn each_check_refreshes_the_window() {
        let (mut m, clock) = manager();
        m.login("secret");
        // keep touching the session just inside the threshold; it must
        // outlive several whole idle windows
        for _ in 0..5 {
            clock.advance(IDLE_TIMEOUT_SECS - 10);
            assert!(m.is_authenticated());
        }
    }

    #[test]
    fn activity_301_seconds_ago_means_expired() {
        let (mut m, clock) = manager();
        m.login("secret");
        clock.advance(100);
        assert!(m.is_authenticated()); // refreshes last_activity
        clock.advance(301);
        assert!(!m.is_authenticated());
    }

    #[test]
    fn login_time_is_not_refreshed_by_activity() {
        let (mut m, clock) = manager();
        m.login("secret");
        let t0 = m.login_time().unwrap();
        clock.advance(60);
        assert!(m.is_authenticated());
        assert_eq!(m.login_time(), Some(t0));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Remaining time
// ═══════════════════════════════════════════════════════════════════

mod remaining {
    use super::*;

    #[test]
    fn full_window_right_after_login() {
        let (mut m, _clock) = manager();
        m.login("secret");
        assert_eq!(m.remaining_seconds(), IDLE_TIMEOUT_SECS as u64);
        assert_eq!(m.remaining_minutes(), 5);
    }

    #[test]
    fn counts_down_without_refreshing() {
        let (mut m, clock) = manager();
        m.login("secret");
        clock.advance(100);
        assert_eq!(m.remaining_seconds(), (IDLE_TIMEOUT_SECS - 100) as u64);
        clock.advance(50);
        assert_eq!(m.remaining_seconds(), (IDLE_TIMEOUT_SECS - 150) as u64);
    }

    #[test]
    fn floors_at_zero_once_expired() {
        let (mut m, clock) = manager();
        m.login("secret");
        clock.advance(IDLE_TIMEOUT_SECS + 500);
        assert_eq!(m.remaining_seconds(), 0);
        assert_eq!(m.remaining_minutes(), 0);
    }

    #[test]
    fn zero_when_no_session_exists() {
        let (m, _clock) = manager();
        assert_eq!(m.remaining_seconds(), 0);
        assert_eq!(m.remaining_minutes(), 0);
    }
}
