use std::time::Duration;

use moka::sync::Cache;
use once_cell::sync::Lazy;

/// Fixed name under which clients keep the session token (cookie on the
/// browser side), so a session survives page reloads.
pub const SESSION_TOKEN: &str = "leave_session";

/// jti values of revoked session tokens. Entries only need to outlive the
/// token lifetime, so a day-long TTL is enough for any configured session.
static REVOKED_SESSIONS: Lazy<Cache<String, bool>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(100_000)
        .time_to_live(Duration::from_secs(86_400))
        .build()
});

pub fn revoke(jti: &str) {
    REVOKED_SESSIONS.insert(jti.to_string(), true);
}

pub fn is_revoked(jti: &str) -> bool {
    REVOKED_SESSIONS.get(jti).unwrap_or(false)
}
