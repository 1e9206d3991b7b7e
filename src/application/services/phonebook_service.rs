use crate::application::errors::PhonebookError;
use crate::application::validation::ContactForm;
use crate::application::view::TableView;
use crate::domain::entities::{Contact, ContactId};
use crate::domain::traits::Store;

/// Window-facing operations on a contact store
pub struct PhonebookService<S: Store> {
    store: S,
}

impl<S: Store> PhonebookService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every contact, drained into a table
    pub fn display(&self) -> Result<TableView, PhonebookError> {
        let rows = self.store.list_all()?;
        Ok(TableView::collect(rows)?)
    }

    pub fn search(&self, term: &str) -> Result<TableView, PhonebookError> {
        let rows = self.store.search(term)?;
        Ok(TableView::collect(rows)?)
    }

    /// Validate the form, then insert
    pub fn add_contact(&self, form: &ContactForm) -> Result<Contact, PhonebookError> {
        let contact = form.validate()?;
        Ok(self.store.add(contact)?)
    }

    /// Returns whether a row went away; an unknown id is not an error
    pub fn delete_contact(&self, id: ContactId) -> Result<bool, PhonebookError> {
        Ok(self.store.delete(id)?)
    }

    pub fn status(&self) -> Result<String, PhonebookError> {
        let count = self.store.count()?;
        Ok(match count {
            1 => "1 contact".to_string(),
            n => format!("{} contacts", n),
        })
    }
}
