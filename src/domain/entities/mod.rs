//! Domain entities - Core business objects with no external dependencies

pub mod contact;

pub use contact::{Contact, ContactId, NewContact};
