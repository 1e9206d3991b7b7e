//! Domain layer - Core business objects with no storage or UI dependencies
//! 
//! This layer contains:
//! - Entities: Core business objects (Contact, NewContact)
//! - Traits: Abstractions for infrastructure (Store)

pub mod entities;
pub mod traits;
