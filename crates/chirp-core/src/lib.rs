//! Business-rule orchestration over the persistence mapper.
//!
//! Each service validates its input before any store access, enforces
//! referential integrity by lookup rather than schema constraint, and
//! returns durable state re-read after every write. Lookups that find
//! nothing come back as `Ok(None)` / empty `Vec` — absence is a valid
//! result, never an error.

pub mod accounts;
pub mod error;
pub mod messages;

pub use accounts::AccountService;
pub use error::ServiceError;
pub use messages::MessageService;
