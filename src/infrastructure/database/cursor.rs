//! Lazy contact sequences
//!
//! A cursor owns its own connection and walks the table in id order, one page
//! at a time. The connection is released when the last page has been read, on
//! the first error, or when the cursor is dropped.

use std::collections::VecDeque;

use rusqlite::{params, Row};

use super::session::Session;
use crate::application::errors::StoreError;
use crate::domain::entities::{Contact, ContactId};
use crate::infrastructure::config::DatabaseConfig;

pub const DEFAULT_PAGE_SIZE: usize = 64;

const LIST_PAGE_SQL: &str = "SELECT id, first_name, last_name, number, address FROM contact
     WHERE id > ?1
     ORDER BY id LIMIT ?2";

const SEARCH_PAGE_SQL: &str = "SELECT id, first_name, last_name, number, address FROM contact
     WHERE id > ?1
       AND (first_name LIKE ?3 ESCAPE '\\'
         OR last_name LIKE ?3 ESCAPE '\\'
         OR number LIKE ?3 ESCAPE '\\'
         OR address LIKE ?3 ESCAPE '\\')
     ORDER BY id LIMIT ?2";

pub struct ContactCursor {
    config: DatabaseConfig,
    pattern: Option<String>,
    session: Option<Session>,
    buffer: VecDeque<Contact>,
    last_id: ContactId,
    page_size: usize,
    exhausted: bool,
}

impl ContactCursor {
    /// Cursor over every contact
    pub fn all(config: &DatabaseConfig) -> Result<Self, StoreError> {
        Self::open(config, None)
    }

    /// Cursor over contacts containing `term` in any text field
    pub fn matching(config: &DatabaseConfig, term: &str) -> Result<Self, StoreError> {
        Self::open(config, Some(like_pattern(term)))
    }

    fn open(config: &DatabaseConfig, pattern: Option<String>) -> Result<Self, StoreError> {
        let session = Session::open(config)?;
        Ok(Self {
            config: config.clone(),
            pattern,
            session: Some(session),
            buffer: VecDeque::new(),
            last_id: ContactId::MIN,
            page_size: DEFAULT_PAGE_SIZE,
            exhausted: false,
        })
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Start over from the first contact, reopening the connection
    pub fn rewind(&mut self) -> Result<(), StoreError> {
        self.release();
        self.buffer.clear();
        self.last_id = ContactId::MIN;
        self.exhausted = false;
        self.session = Some(Session::open(&self.config)?);
        Ok(())
    }

    /// True while the cursor still holds a connection
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    fn release(&mut self) {
        // Session::drop closes the connection
        self.session = None;
    }

    fn fetch_page(&mut self) -> Result<(), StoreError> {
        let Some(session) = self.session.as_ref() else {
            self.exhausted = true;
            return Ok(());
        };
        let conn = session.conn()?;
        let limit = self.page_size as i64;

        let page = match &self.pattern {
            None => {
                let mut stmt = conn.prepare_cached(LIST_PAGE_SQL)?;
                let rows = stmt.query_map(params![self.last_id, limit], row_to_contact)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            Some(pattern) => {
                let mut stmt = conn.prepare_cached(SEARCH_PAGE_SQL)?;
                let rows = stmt.query_map(params![self.last_id, limit, pattern], row_to_contact)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };

        if page.len() < self.page_size {
            self.exhausted = true;
            self.release();
        }
        if let Some(last) = page.last() {
            self.last_id = last.id;
        }
        self.buffer.extend(page);
        Ok(())
    }
}

impl Iterator for ContactCursor {
    type Item = Result<Contact, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.buffer.is_empty() && !self.exhausted {
            if let Err(e) = self.fetch_page() {
                self.exhausted = true;
                self.release();
                return Some(Err(e));
            }
        }

        let next = self.buffer.pop_front();
        if next.is_none() {
            self.release();
        }
        next.map(Ok)
    }
}

fn row_to_contact(row: &Row<'_>) -> rusqlite::Result<Contact> {
    Ok(Contact {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        number: row.get(3)?,
        address: row.get(4)?,
    })
}

/// `%term%` with LIKE wildcards in `term` escaped
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
