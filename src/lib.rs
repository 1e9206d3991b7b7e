//! Phonebook - contact records in a single SQLite table
//!
//! `domain` holds the entities and the store abstraction, `application` the
//! window-facing services and event handlers, `infrastructure` the SQLite
//! store, configuration and the console front-end.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::errors::{PhonebookError, StoreError, ValidationError};
pub use domain::entities::{Contact, ContactId, NewContact};
pub use domain::traits::Store;
pub use infrastructure::config::Config;
pub use infrastructure::database::ContactStore;
