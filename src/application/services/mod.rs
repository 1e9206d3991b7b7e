//! Application services - Business logic orchestration

pub mod phonebook_service;

pub use phonebook_service::PhonebookService;
