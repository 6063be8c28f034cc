//! Data structures shared across the service.

pub mod contact;

pub use contact::ContactRecord;
