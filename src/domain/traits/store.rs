use crate::application::errors::StoreError;
use crate::domain::entities::{Contact, ContactId, NewContact};

/// Store trait - abstraction for contact persistence
///
/// Every call is a complete request/response against the backing engine.
/// Sequences returned by `list_all` and `search` are produced lazily and hold
/// their resources until drained or dropped.
pub trait Store {
    type Rows: Iterator<Item = Result<Contact, StoreError>>;

    /// Insert one contact and return it with its assigned id
    fn add(&self, contact: NewContact) -> Result<Contact, StoreError>;

    /// Remove a contact; returns false when no row had that id
    fn delete(&self, id: ContactId) -> Result<bool, StoreError>;

    /// Every stored contact, in storage order
    fn list_all(&self) -> Result<Self::Rows, StoreError>;

    /// Contacts with `term` in any of the four text fields
    fn search(&self, term: &str) -> Result<Self::Rows, StoreError>;

    fn count(&self) -> Result<usize, StoreError>;
}
