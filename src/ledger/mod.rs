//! The Contact Ledger: the single authoritative collection of contacts.
//!
//! The ledger holds the ordered in-memory collection, enforces phone
//! uniqueness on the digits-only normalization, persists the whole collection
//! through a [`ContactStore`] after every accepted submission, and renders
//! the export formats.
//!
//! All mutation goes through one `tokio::sync::Mutex`, so the
//! check-then-append-then-persist sequence is atomic even under parallel
//! request handling. A persistence failure after a successful append is
//! logged and swallowed: the in-memory state already changed and the caller
//! is told the submission succeeded. Losing the last write on a crash is an
//! accepted tradeoff at this scale.

use crate::domain::{ContactName, PhoneNumber};
use crate::error::{AppError, AppResult};
use crate::export::render_vcf;
use crate::models::ContactRecord;
use crate::storage::ContactStore;
use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// A submission before validation.
#[derive(Debug, Clone, Default)]
pub struct NewContact {
    pub name: String,
    pub phone: String,
    pub photo: Option<String>,
    pub source_address: String,
}

/// Snapshot of progress toward the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub count: usize,
    pub target: usize,
    pub remaining: usize,
    /// Percentage of the target reached, capped at 100.
    pub progress: u32,
}

/// Derived statistics over the full collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStats {
    /// Records whose creation date, in local time, is today.
    pub today: usize,
    /// Records carrying a photo.
    pub with_photos: usize,
    /// Distinct source addresses seen across the collection.
    pub unique_sources: usize,
}

/// Result of a valid submission.
///
/// A duplicate phone is a normal outcome, not an error: callers report it
/// with HTTP 200 and `success: false`.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    Accepted {
        record: ContactRecord,
        count: usize,
        /// Count is at or past the target.
        target_reached: bool,
        /// This submission made the count hit the target exactly; used to
        /// trigger the one-shot goal notification.
        first_time_reached: bool,
    },
    DuplicatePhone,
}

struct LedgerInner {
    records: Vec<ContactRecord>,
    last_id: i64,
}

/// The shared contact ledger.
pub struct ContactLedger {
    store: Arc<dyn ContactStore>,
    target: usize,
    inner: Mutex<LedgerInner>,
}

impl ContactLedger {
    /// Open the ledger, restoring the persisted snapshot if one exists.
    ///
    /// A missing snapshot starts an empty collection. An unreadable or
    /// unparsable snapshot also starts empty, with a warning; startup never
    /// fails on a bad snapshot.
    pub async fn open(store: Arc<dyn ContactStore>, target: usize) -> Self {
        let records = match store.load().await {
            Ok(records) => {
                info!("Loaded {} contacts from snapshot", records.len());
                records
            }
            Err(e) => {
                warn!("Starting fresh contact collection: {}", e);
                Vec::new()
            }
        };

        let last_id = records.iter().map(|r| r.id).max().unwrap_or(0);

        Self {
            store,
            target,
            inner: Mutex::new(LedgerInner { records, last_id }),
        }
    }

    /// The configured target count.
    pub fn target(&self) -> usize {
        self.target
    }

    /// Current number of accepted records.
    pub async fn count(&self) -> usize {
        self.inner.lock().await.records.len()
    }

    /// Progress toward the target. Pure read.
    pub async fn progress(&self) -> Progress {
        let count = self.count().await;
        Progress {
            count,
            target: self.target,
            remaining: self.target.saturating_sub(count),
            progress: progress_percent(count, self.target),
        }
    }

    /// Validate and append one submission.
    ///
    /// Missing name or phone yields [`AppError::InvalidInput`] without
    /// touching the collection. A digits-only phone match against any stored
    /// record yields [`SubmitOutcome::DuplicatePhone`], also without
    /// mutation. Otherwise the record is appended, the full collection is
    /// persisted, and the outcome reports the new count.
    pub async fn submit(&self, submission: NewContact) -> AppResult<SubmitOutcome> {
        let name = ContactName::new(submission.name)?;
        let phone = PhoneNumber::new(submission.phone)?;

        let mut inner = self.inner.lock().await;

        let digits = phone.digits_only();
        if inner.records.iter().any(|r| r.phone_digits() == digits) {
            return Ok(SubmitOutcome::DuplicatePhone);
        }

        let id = next_id(inner.last_id);
        inner.last_id = id;

        let record = ContactRecord::create(
            id,
            name,
            phone,
            submission.photo,
            submission.source_address,
        );
        inner.records.push(record.clone());
        let count = inner.records.len();

        // Best-effort persistence: the append already happened, so a failed
        // write is logged and the submission still reports success.
        if let Err(e) = self.store.save(&inner.records).await {
            error!("Error saving contacts: {}", e);
        }

        Ok(SubmitOutcome::Accepted {
            record,
            count,
            target_reached: count >= self.target,
            first_time_reached: count == self.target,
        })
    }

    /// The full ordered collection plus derived statistics. Pure read.
    pub async fn list_all(&self) -> (Vec<ContactRecord>, CollectionStats) {
        let inner = self.inner.lock().await;
        let stats = collection_stats(&inner.records);
        (inner.records.clone(), stats)
    }

    /// Render the collection as a vCard 3.0 document.
    ///
    /// When `enforce_target` is set and the collection has not reached the
    /// target, returns [`AppError::TargetNotReached`] carrying the current
    /// count.
    pub async fn export_vcf(
        &self,
        enforce_target: bool,
        branding_prefix: Option<&str>,
    ) -> AppResult<String> {
        let inner = self.inner.lock().await;
        if enforce_target && inner.records.len() < self.target {
            return Err(AppError::TargetNotReached {
                count: inner.records.len(),
                target: self.target,
            });
        }
        Ok(render_vcf(&inner.records, branding_prefix))
    }

    /// Render the collection as an indented JSON document.
    pub async fn export_json(&self) -> AppResult<String> {
        let inner = self.inner.lock().await;
        serde_json::to_string_pretty(&inner.records)
            .map_err(|e| AppError::Internal(e.into()))
    }
}

/// Percentage of the target reached, rounded, capped at 100.
fn progress_percent(count: usize, target: usize) -> u32 {
    let percent = (count as f64 / target as f64 * 100.0).round() as u32;
    percent.min(100)
}

/// Next time-derived id: epoch milliseconds, bumped past the previous id so
/// two submissions in the same millisecond never collide.
fn next_id(last_id: i64) -> i64 {
    Utc::now().timestamp_millis().max(last_id + 1)
}

fn collection_stats(records: &[ContactRecord]) -> CollectionStats {
    let today = Local::now().date_naive();

    let submitted_today = records
        .iter()
        .filter(|r| {
            DateTime::parse_from_rfc3339(&r.created_at)
                .map(|t| t.with_timezone(&Local).date_naive() == today)
                .unwrap_or(false)
        })
        .count();

    let with_photos = records.iter().filter(|r| r.has_photo()).count();

    let unique_sources: HashSet<&str> = records
        .iter()
        .map(|r| r.source_address.as_str())
        .collect();

    CollectionStats {
        today: submitted_today,
        with_photos,
        unique_sources: unique_sources.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(0, 200), 0);
        assert_eq!(progress_percent(50, 200), 25);
        assert_eq!(progress_percent(1, 200), 1); // 0.5 rounds up
        assert_eq!(progress_percent(200, 200), 100);
        assert_eq!(progress_percent(350, 200), 100); // capped
    }

    #[test]
    fn test_next_id_is_monotonic() {
        let now = Utc::now().timestamp_millis();
        let a = next_id(0);
        assert!(a >= now);

        // Simulate two submissions in the same millisecond
        let b = next_id(a);
        assert!(b > a);

        // A snapshot restored from the future still advances
        let c = next_id(i64::MAX - 1);
        assert_eq!(c, i64::MAX);
    }

    #[test]
    fn test_collection_stats() {
        let fresh = ContactRecord {
            id: 1,
            name: "Asha".to_string(),
            phone: "0712345678".to_string(),
            photo: "/9j/AAAA".to_string(),
            created_at: Utc::now().to_rfc3339(),
            source_address: "10.0.0.1".to_string(),
        };
        let old = ContactRecord {
            id: 2,
            name: "Ben".to_string(),
            phone: "555-0001".to_string(),
            photo: String::new(),
            created_at: "2001-01-01T00:00:00Z".to_string(),
            source_address: "10.0.0.1".to_string(),
        };
        let unparsable = ContactRecord {
            id: 3,
            name: "Cleo".to_string(),
            phone: "555-0002".to_string(),
            photo: String::new(),
            created_at: "yesterday".to_string(),
            source_address: "Unknown".to_string(),
        };

        let stats = collection_stats(&[fresh, old, unparsable]);
        assert_eq!(stats.today, 1);
        assert_eq!(stats.with_photos, 1);
        assert_eq!(stats.unique_sources, 2);
    }
}
