//! Console front-end for the phonebook window
//!
//! Stands in for the desktop window: the table is printed after each change,
//! the new-contact form is a series of prompts, and dialogs are `[Error]` /
//! `[Warning]` lines.

use std::io::{BufRead, Write};

use crate::application::errors::PhonebookError;
use crate::application::events::{EventRouter, Outcome, UiEvent};
use crate::application::services::PhonebookService;
use crate::application::validation::ContactForm;
use crate::application::view::TableView;
use crate::domain::entities::ContactId;
use crate::domain::traits::Store;

const HELP: &str = "Available commands:
  /list            - Show all contacts
  /add             - Add a new contact
  /delete <id>     - Delete the contact with that id
  /search <term>   - Show contacts containing term
  /help            - Show this message
  /quit            - Close the phonebook";

const FORM_PROMPTS: [&str; 4] = [
    "First Name (Necessary): ",
    "Last Name (Necessary): ",
    "Number (Necessary): ",
    "Address (Optional): ",
];

/// A parsed console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    List,
    Add,
    Delete(Option<ContactId>),
    Search(String),
    Help,
    Quit,
    Unknown(String),
    Empty,
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Self {
        let text = line.trim();
        let text = text.strip_prefix('/').unwrap_or(text);
        if text.is_empty() {
            return ConsoleCommand::Empty;
        }

        let (name, rest) = match text.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (text, ""),
        };

        match name.to_lowercase().as_str() {
            "list" | "ls" | "refresh" => ConsoleCommand::List,
            "add" | "new" => ConsoleCommand::Add,
            "delete" | "del" | "rm" => ConsoleCommand::Delete(rest.parse().ok()),
            "search" | "find" => ConsoleCommand::Search(rest.to_string()),
            "help" | "?" => ConsoleCommand::Help,
            "quit" | "exit" | "q" => ConsoleCommand::Quit,
            other => ConsoleCommand::Unknown(other.to_string()),
        }
    }
}

/// Console window over any contact store
pub struct ConsoleWindow<S: Store, R: BufRead, W: Write> {
    title: String,
    service: PhonebookService<S>,
    router: EventRouter<S>,
    table: TableView,
    input: R,
    output: W,
}

impl<S: Store + 'static, R: BufRead, W: Write> ConsoleWindow<S, R, W> {
    pub fn new(title: impl Into<String>, store: S, input: R, output: W) -> Self {
        let mut router = EventRouter::new();
        router.register_defaults();

        Self {
            title: title.into(),
            service: PhonebookService::new(store),
            router,
            table: TableView::default(),
            input,
            output,
        }
    }

    pub fn table(&self) -> &TableView {
        &self.table
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Show the window and process commands until quit or end of input
    pub fn run(&mut self) -> Result<(), PhonebookError> {
        tracing::info!("Starting console window: {}", self.title);
        writeln!(self.output, "--- {} ---", self.title)?;
        self.refresh()?;

        loop {
            let Some(line) = self.read_line("> ")? else {
                break;
            };

            match ConsoleCommand::parse(&line) {
                ConsoleCommand::List => self.refresh()?,
                ConsoleCommand::Add => self.add()?,
                ConsoleCommand::Delete(id) => self.delete(id)?,
                ConsoleCommand::Search(term) => self.search(term)?,
                ConsoleCommand::Help => writeln!(self.output, "{}", HELP)?,
                ConsoleCommand::Quit => break,
                ConsoleCommand::Unknown(name) => writeln!(
                    self.output,
                    "[Warning] Unknown command: /{}. Type /help for a list.",
                    name
                )?,
                ConsoleCommand::Empty => {}
            }
        }

        tracing::info!("Console window closed");
        Ok(())
    }

    fn refresh(&mut self) -> Result<(), PhonebookError> {
        if let Some(Outcome::Table(table)) = self.dispatch(UiEvent::Refresh)? {
            self.table = table;
            self.show_table()?;
            if let Ok(status) = self.service.status() {
                writeln!(self.output, "({})", status)?;
            }
        }
        Ok(())
    }

    fn search(&mut self, term: String) -> Result<(), PhonebookError> {
        if let Some(Outcome::Table(table)) = self.dispatch(UiEvent::Search(term.clone()))? {
            self.table = table;
            self.show_table()?;
            writeln!(self.output, "({} matching {:?})", self.table.len(), term)?;
        }
        Ok(())
    }

    fn add(&mut self) -> Result<(), PhonebookError> {
        let mut fields: [String; 4] = Default::default();
        for (field, prompt) in fields.iter_mut().zip(FORM_PROMPTS) {
            let Some(value) = self.read_line(prompt)? else {
                return Ok(());
            };
            *field = value;
        }
        let [first_name, last_name, number, address] = fields;
        let form = ContactForm::new(first_name, last_name, number, address);

        if let Some(Outcome::Added(contact)) = self.dispatch(UiEvent::Add(form))? {
            writeln!(self.output, "[Info] Added {}", contact)?;
            self.table.push(contact);
            self.show_table()?;
        }
        Ok(())
    }

    fn delete(&mut self, id: Option<ContactId>) -> Result<(), PhonebookError> {
        let selected = id.and_then(|id| self.table.select(id).cloned().map(|row| (id, row)));
        let Some((id, row)) = selected else {
            writeln!(self.output, "[Warning] {}", PhonebookError::NothingSelected)?;
            return Ok(());
        };

        writeln!(self.output, "{}", row.delete_confirmation())?;
        let answer = self.read_line("[y/n] ")?.unwrap_or_default();
        let confirmed = matches!(answer.trim().to_lowercase().as_str(), "y" | "yes");

        match self.dispatch(UiEvent::Delete { id, confirmed })? {
            Some(Outcome::Deleted { id, removed }) => {
                self.table.remove(id);
                if !removed {
                    tracing::debug!("Contact #{} was already gone", id);
                }
                self.show_table()?;
            }
            Some(Outcome::Cancelled) => writeln!(self.output, "Delete cancelled.")?,
            _ => {}
        }
        Ok(())
    }

    /// Dispatch an event; user-facing failures are printed, not returned
    fn dispatch(&mut self, event: UiEvent) -> Result<Option<Outcome>, PhonebookError> {
        match self.router.dispatch(&self.service, event) {
            Ok(outcome) => Ok(Some(outcome)),
            Err(PhonebookError::Validation(e)) => {
                writeln!(self.output, "[Error] {}", e)?;
                Ok(None)
            }
            Err(e @ PhonebookError::Io(_)) => Err(e),
            Err(e) => {
                tracing::error!("Operation failed: {}", e);
                writeln!(self.output, "[Error] The operation could not be completed.")?;
                Ok(None)
            }
        }
    }

    fn show_table(&mut self) -> Result<(), PhonebookError> {
        write!(self.output, "{}", self.table.render())?;
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, PhonebookError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut input = String::new();
        if self.input.read_line(&mut input)? == 0 {
            return Ok(None);
        }
        Ok(Some(input.trim_end_matches(['\r', '\n']).to_string()))
    }
}
