//! Domain value objects and types.
//!
//! This module contains type-safe wrappers for the two fields the service
//! actually validates: contact names and phone numbers. These value objects
//! provide validation at construction time and prevent invalid data from
//! being represented in the system.

pub mod errors;
pub mod name;
pub mod phone;

pub use errors::ValidationError;
pub use name::ContactName;
pub use phone::PhoneNumber;
