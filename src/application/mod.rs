//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Services: Window-facing operations over a store
//! - Events: UI events and their registered handlers
//! - Validation: New-contact form checks
//! - View: Table rendering of contacts
//! - Errors: Layer-specific errors

pub mod errors;
pub mod events;
pub mod services;
pub mod validation;
pub mod view;
