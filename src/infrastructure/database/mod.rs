//! SQLite-backed contact store
//!
//! Every operation opens its own connection and closes it before returning.
//! `list_all` and `search` hand the connection to the returned cursor, which
//! closes it once drained.

pub mod cursor;
pub mod seed;
pub mod session;

use std::path::{Path, PathBuf};

use rusqlite::params;

use crate::application::errors::StoreError;
use crate::domain::entities::{Contact, ContactId, NewContact};
use crate::domain::traits::Store;
use crate::infrastructure::config::{Config, DatabaseConfig};

pub use cursor::ContactCursor;
pub use session::Session;

const CREATE_CONTACT_TABLE: &str = "CREATE TABLE IF NOT EXISTS contact (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name VARCHAR(255) NOT NULL CHECK (length(first_name) BETWEEN 1 AND 255),
    last_name VARCHAR(255) NOT NULL CHECK (length(last_name) BETWEEN 1 AND 255),
    number VARCHAR(20) NOT NULL CHECK (length(number) BETWEEN 1 AND 20),
    address TEXT
)";

const INSERT_CONTACT: &str =
    "INSERT INTO contact (first_name, last_name, number, address) VALUES (?1, ?2, ?3, ?4)";

pub struct ContactStore {
    config: DatabaseConfig,
    first_init: bool,
    seed_file: Option<PathBuf>,
}

impl ContactStore {
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            first_init: false,
            seed_file: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let store = Self::new(config.database.clone()).with_seed_file(&config.seed_file);
        if config.first_init {
            store.with_first_init()
        } else {
            store
        }
    }

    pub fn with_seed_file(mut self, path: impl AsRef<Path>) -> Self {
        self.seed_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Seed from the seed file on the next `initialize`
    pub fn with_first_init(mut self) -> Self {
        self.first_init = true;
        self
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Create the contact table if it is missing and, on first run, load the
    /// seed file. Returns the number of seeded rows.
    pub fn initialize(&self) -> Result<usize, StoreError> {
        tracing::info!("start initializing database");
        let mut session = Session::open(&self.config)?;
        session.conn()?.execute_batch(CREATE_CONTACT_TABLE)?;

        let seeded = match (&self.seed_file, self.first_init) {
            (Some(path), true) => {
                let records = seed::read_seed_file(path)?;
                let tx = session.conn_mut()?.transaction()?;
                {
                    let mut stmt = tx.prepare(INSERT_CONTACT)?;
                    for record in &records {
                        stmt.execute(params![
                            record.first_name,
                            record.last_name,
                            record.number,
                            record.address
                        ])?;
                    }
                }
                tx.commit()?;
                tracing::info!("Seeded {} contacts from {}", records.len(), path.display());
                records.len()
            }
            (None, true) => {
                tracing::warn!("First init requested but no seed file configured");
                0
            }
            (_, false) => 0,
        };

        tracing::info!("Database initialized");
        Ok(seeded)
    }

    /// `add` with the fields spelled out
    pub fn add_contact(
        &self,
        first_name: &str,
        last_name: &str,
        number: &str,
        address: Option<&str>,
    ) -> Result<Contact, StoreError> {
        let contact = NewContact::new(first_name, last_name, number)
            .with_address_opt(address.map(str::to_string));
        self.add(contact)
    }
}

impl Store for ContactStore {
    type Rows = ContactCursor;

    fn add(&self, contact: NewContact) -> Result<Contact, StoreError> {
        let session = Session::open(&self.config)?;
        let conn = session.conn()?;
        conn.execute(
            INSERT_CONTACT,
            params![contact.first_name, contact.last_name, contact.number, contact.address],
        )?;
        let contact = contact.into_contact(conn.last_insert_rowid());
        tracing::info!("Added contact {}", contact);
        Ok(contact)
    }

    fn delete(&self, id: ContactId) -> Result<bool, StoreError> {
        let session = Session::open(&self.config)?;
        let rows = session.conn()?.execute("DELETE FROM contact WHERE id = ?1", [id])?;
        if rows == 0 {
            tracing::debug!("Delete of contact #{} matched no rows", id);
        } else {
            tracing::info!("Deleted contact #{}", id);
        }
        Ok(rows > 0)
    }

    fn list_all(&self) -> Result<ContactCursor, StoreError> {
        ContactCursor::all(&self.config)
    }

    fn search(&self, term: &str) -> Result<ContactCursor, StoreError> {
        tracing::debug!("Searching contacts for {:?}", term);
        ContactCursor::matching(&self.config, term)
    }

    fn count(&self) -> Result<usize, StoreError> {
        let session = Session::open(&self.config)?;
        let count: i64 = session
            .conn()?
            .query_row("SELECT COUNT(*) FROM contact", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
