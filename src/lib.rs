//! VCF Collector - an HTTP service that gathers contact records toward a
//! shared goal and exports them as vCard or JSON.
//!
//! Many clients submit `{name, phone, photo?}` records into one ordered
//! collection. Phone numbers are unique on their digits-only form, progress
//! is tracked against a fixed target (200 by default), and once the target
//! is reached the collection can be downloaded as a vCard 3.0 file. A single
//! shared password gates the admin listing.
//!
//! # Architecture
//!
//! - **domain**: Validated value objects (names, phone numbers)
//! - **models**: The contact record and its wire format
//! - **ledger**: The authoritative in-memory collection and its operations
//! - **storage**: Whole-file JSON snapshot persistence behind a trait
//! - **export**: vCard 3.0 rendering
//! - **auth**: Shared-password admin gate
//! - **notify**: Fire-and-forget goal-reached webhook
//! - **server**: axum router, handlers, and lifecycle
//! - **config**: Environment-driven configuration
//! - **error**: Error taxonomy and HTTP mapping

pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod ledger;
pub mod models;
pub mod notify;
pub mod server;
pub mod storage;

pub use auth::AdminAuth;
pub use config::Config;
pub use error::{AppError, AppResult, ConfigError};
pub use export::render_vcf;
pub use ledger::{CollectionStats, ContactLedger, NewContact, Progress, SubmitOutcome};
pub use models::ContactRecord;
pub use server::AppState;
pub use storage::{ContactStore, JsonFileStore, StoreError, StoreResult};
