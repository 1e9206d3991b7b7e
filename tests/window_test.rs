//! Console window and event dispatch tests
//! Run with: cargo test --test window_test

use std::io::Cursor;
use std::path::{Path, PathBuf};

use phonebook::application::events::{EventKind, EventRouter, Outcome, UiEvent};
use phonebook::application::services::PhonebookService;
use phonebook::application::validation::ContactForm;
use phonebook::infrastructure::adapters::ConsoleWindow;
use phonebook::infrastructure::config::DatabaseConfig;
use phonebook::{ContactStore, PhonebookError, Store, ValidationError};

fn db_path(dir: &Path) -> PathBuf {
    dir.join("phonebook.db")
}

fn open_store(dir: &Path) -> ContactStore {
    let store = ContactStore::new(DatabaseConfig::sqlite(db_path(dir)));
    store.initialize().expect("Should create contact table");
    store
}

/// Run the window over `input` and return everything it printed
fn run_window(dir: &Path, input: &str) -> String {
    let mut window = ConsoleWindow::new(
        "Phonebook",
        open_store(dir),
        Cursor::new(input.as_bytes().to_vec()),
        Vec::new(),
    );
    window.run().expect("Window should run");
    String::from_utf8(window.into_output()).unwrap()
}

fn router() -> EventRouter<ContactStore> {
    let mut router = EventRouter::new();
    router.register_defaults();
    router
}

#[test]
fn test_window_shows_table_on_start() {
    let dir = tempfile::tempdir().unwrap();
    open_store(dir.path())
        .add_contact("John", "Doe", "5551234", Some("Main St"))
        .unwrap();

    let output = run_window(dir.path(), "/quit\n");

    assert!(output.starts_with("--- Phonebook ---\n"));
    assert!(output.contains("First Name"));
    assert!(output.contains("John"));
    assert!(output.contains("(1 contact)"));
}

#[test]
fn test_window_add_contact() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_window(dir.path(), "/add\nJane\nRoe\n55599990\n\n/quit\n");

    assert!(output.contains("First Name (Necessary): "));
    assert!(output.contains("Address (Optional): "));
    assert!(output.contains("[Info] Added #1 Jane Roe (55599990)"));

    let contacts: Vec<_> = open_store(dir.path())
        .list_all()
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].address, None);
}

#[test]
fn test_window_rejects_invalid_form() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_window(dir.path(), "/add\nJohn\nDoe\n12ab5678\nMain St\n/add\n\n\n\n\n");

    assert!(output.contains("[Error] Please enter a valid number"));
    assert!(output.contains("[Error] Please enter the first name"));
    assert_eq!(open_store(dir.path()).count().unwrap(), 0);
}

#[test]
fn test_window_delete_confirmed() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(dir.path());
    let john = store.add_contact("John", "Doe", "5551234", None).unwrap();
    let jane = store.add_contact("Jane", "Roe", "5559999", None).unwrap();

    let output = run_window(dir.path(), &format!("/delete {}\ny\n", john.id));

    assert!(output.contains("Are you sure that you want to delete the selected contact?"));
    assert!(output.contains("first name: John"));

    let remaining: Vec<_> = store.list_all().unwrap().collect::<Result<_, _>>().unwrap();
    assert_eq!(remaining, vec![jane]);
}

#[test]
fn test_window_delete_declined() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(dir.path());
    let john = store.add_contact("John", "Doe", "5551234", None).unwrap();

    let output = run_window(dir.path(), &format!("/delete {}\nn\n", john.id));

    assert!(output.contains("Delete cancelled."));
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn test_window_delete_without_selection() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(dir.path());
    store.add_contact("John", "Doe", "5551234", None).unwrap();

    let output = run_window(dir.path(), "/delete 99\n/delete\n");

    assert_eq!(output.matches("[Warning] Please select a record to delete").count(), 2);
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn test_window_search() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(dir.path());
    store.add_contact("John", "Doe", "5551234", Some("Main St")).unwrap();
    store.add_contact("Mary", "Major", "4440000", None).unwrap();

    let output = run_window(dir.path(), "/search Main\n");

    assert!(output.contains("(1 matching \"Main\")"));
}

#[test]
fn test_window_unknown_command() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_window(dir.path(), "/edit 1\n/help\n");

    assert!(output.contains("[Warning] Unknown command: /edit"));
    assert!(output.contains("Available commands:"));
}

#[test]
fn test_window_survives_store_errors() {
    let dir = tempfile::tempdir().unwrap();
    let store = ContactStore::new(DatabaseConfig::sqlite(dir.path().join("missing").join("x.db")));
    let mut window = ConsoleWindow::new(
        "Phonebook",
        store,
        Cursor::new(b"/list\n/search x\n".to_vec()),
        Vec::new(),
    );

    window.run().expect("Store errors should not end the window");
    let output = String::from_utf8(window.into_output()).unwrap();
    assert_eq!(output.matches("[Error] The operation could not be completed.").count(), 3);
}

#[test]
fn test_router_dispatches_each_kind() {
    let dir = tempfile::tempdir().unwrap();
    let service = PhonebookService::new(open_store(dir.path()));
    let router = router();

    let added = match router
        .dispatch(&service, UiEvent::Add(ContactForm::new("John", "Doe", "55512345", "Main St")))
        .unwrap()
    {
        Outcome::Added(contact) => contact,
        other => panic!("expected Added, got {:?}", other),
    };

    match router.dispatch(&service, UiEvent::Search("Main".to_string())).unwrap() {
        Outcome::Table(table) => assert_eq!(table.len(), 1),
        other => panic!("expected Table, got {:?}", other),
    }

    assert_eq!(
        router
            .dispatch(&service, UiEvent::Delete { id: added.id, confirmed: false })
            .unwrap(),
        Outcome::Cancelled
    );
    assert_eq!(service.store().count().unwrap(), 1);

    assert_eq!(
        router
            .dispatch(&service, UiEvent::Delete { id: added.id, confirmed: true })
            .unwrap(),
        Outcome::Deleted { id: added.id, removed: true }
    );

    match router.dispatch(&service, UiEvent::Refresh).unwrap() {
        Outcome::Table(table) => assert!(table.is_empty()),
        other => panic!("expected Table, got {:?}", other),
    }
}

#[test]
fn test_router_validation_error() {
    let dir = tempfile::tempdir().unwrap();
    let service = PhonebookService::new(open_store(dir.path()));

    let err = router()
        .dispatch(&service, UiEvent::Add(ContactForm::new("John", "Doe", "5551234", "")))
        .unwrap_err();
    assert!(matches!(err, PhonebookError::Validation(ValidationError::BadLength(7))));
}

#[test]
fn test_router_unregistered_event() {
    let dir = tempfile::tempdir().unwrap();
    let service = PhonebookService::new(open_store(dir.path()));
    let router: EventRouter<ContactStore> = EventRouter::new();

    assert!(!router.is_registered(EventKind::Refresh));
    assert!(matches!(
        router.dispatch(&service, UiEvent::Refresh),
        Err(PhonebookError::UnknownEvent(kind)) if kind == "refresh"
    ));
}

#[test]
fn test_router_custom_handler_replaces_default() {
    let dir = tempfile::tempdir().unwrap();
    let service = PhonebookService::new(open_store(dir.path()));
    let mut router = router();

    router.register(EventKind::Delete, |_, _| Ok(Outcome::Cancelled));

    let contact = service
        .add_contact(&ContactForm::new("John", "Doe", "55512345", ""))
        .unwrap();
    assert_eq!(
        router
            .dispatch(&service, UiEvent::Delete { id: contact.id, confirmed: true })
            .unwrap(),
        Outcome::Cancelled
    );
    assert_eq!(service.status().unwrap(), "1 contact");
}
