//! Scoped database connection

use rusqlite::Connection;

use crate::application::errors::StoreError;
use crate::infrastructure::config::DatabaseConfig;

/// One open connection. Dropping the session closes it.
pub struct Session {
    conn: Option<Connection>,
    target: String,
}

impl Session {
    pub fn open(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let target = config.describe();
        let conn = Connection::open(&config.name)
            .map_err(|e| StoreError::ConnectionFailure(format!("{}: {}", target, e)))?;
        tracing::debug!("Database connection opened: {}", target);

        Ok(Self {
            conn: Some(conn),
            target,
        })
    }

    pub fn conn(&self) -> Result<&Connection, StoreError> {
        self.conn
            .as_ref()
            .ok_or_else(|| StoreError::ConnectionFailure(format!("{}: connection closed", self.target)))
    }

    pub fn conn_mut(&mut self) -> Result<&mut Connection, StoreError> {
        let target = &self.target;
        self.conn
            .as_mut()
            .ok_or_else(|| StoreError::ConnectionFailure(format!("{}: connection closed", target)))
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Close now instead of at end of scope
    pub fn close(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err((_, e)) = conn.close() {
                // The connection is dropped regardless; sqlite finalizes it.
                tracing::warn!("Error while closing database connection: {}", e);
            }
            tracing::debug!("Database connection is closed: {}", self.target);
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}
