//! Admin authentication gate.
//!
//! Deliberately minimal: one shared secret compared by exact string match,
//! producing an opaque token that is never expired, revoked, or checked
//! again. There is no lockout, rate limiting, or audit trail; the admin
//! surface is a convenience view, not a security boundary.

use crate::error::{AppError, AppResult};
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Validates the shared admin password and mints session tokens.
pub struct AdminAuth {
    password: String,
    sequence: AtomicU64,
}

impl AdminAuth {
    /// Create a gate around the configured secret.
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            sequence: AtomicU64::new(0),
        }
    }

    /// Check a candidate password.
    ///
    /// On match, returns an opaque token unique across calls. On mismatch,
    /// returns [`AppError::Unauthorized`].
    pub fn login(&self, candidate: &str) -> AppResult<String> {
        if candidate != self.password {
            return Err(AppError::Unauthorized);
        }

        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        Ok(format!("admin_{}_{}", Utc::now().timestamp_millis(), seq))
    }
}
