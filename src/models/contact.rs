//! Contact record model.

use crate::domain::{ContactName, PhoneNumber};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// One accepted contact submission.
///
/// Records are immutable once appended to the ledger: there is no edit or
/// delete operation anywhere in the system. The persisted snapshot is a JSON
/// array of these, serialized with camelCase field names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    /// Unique, monotonically increasing, time-derived identifier
    /// (Unix epoch milliseconds, bumped on collision).
    pub id: i64,

    /// Trimmed display name.
    pub name: String,

    /// Trimmed phone number, formatting preserved. Uniqueness is enforced on
    /// the digits-only form, not on this string.
    pub phone: String,

    /// Optional photo: empty string, a data URL, or bare base64. Stored
    /// verbatim; only the VCF exporter interprets it.
    #[serde(default)]
    pub photo: String,

    /// RFC 3339 UTC timestamp of insertion.
    pub created_at: String,

    /// Best-effort network origin of the submitter, or "Unknown".
    pub source_address: String,
}

impl ContactRecord {
    /// Build a record from validated inputs, stamped with the current time.
    pub fn create(
        id: i64,
        name: ContactName,
        phone: PhoneNumber,
        photo: Option<String>,
        source_address: String,
    ) -> Self {
        Self {
            id,
            name: name.into_inner(),
            phone: phone.into_inner(),
            photo: photo.unwrap_or_default(),
            created_at: Utc::now().to_rfc3339(),
            source_address,
        }
    }

    /// Digits-only form of the stored phone, used for duplicate comparison.
    pub fn phone_digits(&self) -> String {
        self.phone.chars().filter(|c| c.is_ascii_digit()).collect()
    }

    /// Whether this record carries a photo.
    pub fn has_photo(&self) -> bool {
        !self.photo.is_empty()
    }
}
