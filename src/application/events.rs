//! UI events and their handlers
//!
//! Each discrete action of the phonebook window is an event. Handlers are
//! registered per event kind and called synchronously.

use std::collections::HashMap;
use std::fmt;

use crate::application::errors::PhonebookError;
use crate::application::services::PhonebookService;
use crate::application::validation::ContactForm;
use crate::application::view::TableView;
use crate::domain::entities::{Contact, ContactId};
use crate::domain::traits::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Refresh,
    Add,
    Delete,
    Search,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Refresh => "refresh",
            EventKind::Add => "add",
            EventKind::Delete => "delete",
            EventKind::Search => "search",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Reload the table with every contact
    Refresh,
    /// The form's Add button
    Add(ContactForm),
    /// Toolbar delete on the selected row
    Delete { id: ContactId, confirmed: bool },
    Search(String),
}

impl UiEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            UiEvent::Refresh => EventKind::Refresh,
            UiEvent::Add(_) => EventKind::Add,
            UiEvent::Delete { .. } => EventKind::Delete,
            UiEvent::Search(_) => EventKind::Search,
        }
    }
}

/// What the window should show after an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Table(TableView),
    Added(Contact),
    Deleted { id: ContactId, removed: bool },
    Cancelled,
}

/// Handler function type
pub type Handler<S> =
    Box<dyn Fn(&PhonebookService<S>, UiEvent) -> Result<Outcome, PhonebookError>>;

pub struct EventRouter<S: Store> {
    handlers: HashMap<EventKind, Handler<S>>,
}

impl<S: Store + 'static> EventRouter<S> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn register<F>(&mut self, kind: EventKind, handler: F)
    where
        F: Fn(&PhonebookService<S>, UiEvent) -> Result<Outcome, PhonebookError> + 'static,
    {
        self.handlers.insert(kind, Box::new(handler));
    }

    /// Wire every event kind to the matching service call
    pub fn register_defaults(&mut self) {
        self.register(EventKind::Refresh, |service, _| {
            service.display().map(Outcome::Table)
        });

        self.register(EventKind::Add, |service, event| match event {
            UiEvent::Add(form) => service.add_contact(&form).map(Outcome::Added),
            other => Err(PhonebookError::UnknownEvent(other.kind().to_string())),
        });

        self.register(EventKind::Delete, |service, event| match event {
            UiEvent::Delete { id, confirmed: false } => {
                tracing::debug!("Delete of contact #{} not confirmed", id);
                Ok(Outcome::Cancelled)
            }
            UiEvent::Delete { id, confirmed: true } => service
                .delete_contact(id)
                .map(|removed| Outcome::Deleted { id, removed }),
            other => Err(PhonebookError::UnknownEvent(other.kind().to_string())),
        });

        self.register(EventKind::Search, |service, event| match event {
            UiEvent::Search(term) => service.search(&term).map(Outcome::Table),
            other => Err(PhonebookError::UnknownEvent(other.kind().to_string())),
        });
    }

    pub fn is_registered(&self, kind: EventKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    pub fn dispatch(
        &self,
        service: &PhonebookService<S>,
        event: UiEvent,
    ) -> Result<Outcome, PhonebookError> {
        let kind = event.kind();
        let handler = self
            .handlers
            .get(&kind)
            .ok_or_else(|| PhonebookError::UnknownEvent(kind.to_string()))?;
        tracing::debug!("Dispatching {} event", kind);
        handler(service, event)
    }
}

impl<S: Store + 'static> Default for EventRouter<S> {
    fn default() -> Self {
        Self::new()
    }
}
