//! # MES Adapter Runtime - Domain Layer
//!
//! Pure contracts shared by the providers and infrastructure crates.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Working error type and the closed boundary taxonomy |
//! | [`ports`] | `CacheProvider`, `MessageAdapter`, `TransactionManager`, `Clock` |
//! | [`registry`] | Compile-time provider catalogs (linkme) |
//! | [`value_objects`] | Message envelope and identifier helpers |

pub mod constants;
pub mod error;
pub mod ports;
pub mod registry;
pub mod value_objects;

pub use error::{DomainError, DomainErrorKind, Error, Result};
