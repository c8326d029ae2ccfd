//! # proctor-db
//!
//! Session integrity storage for Proctor.
//!
//! A [`store::SessionStore`] runs in one of two modes for its whole lifetime:
//!
//! - **Durable**: records go to a libSQL database, either a remote Turso/`sqld`
//!   instance or a local file. Ids are backend-native (`ses-` + 24 hex).
//! - **Fallback**: records are kept in process memory. Ids are wall-clock
//!   milliseconds, made strictly increasing.
//!
//! The mode is decided once, by a background connection attempt at start-up.
//! [`repository::SessionRepository`] is the boundary callers use; it accepts
//! either id form on lookup.
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29) for both the remote and the
//! local durable backend.

pub mod error;
pub mod helpers;
mod jsonl;
pub mod memory;
mod migrations;
pub mod repos;
pub mod repository;
pub mod store;

#[cfg(test)]
mod test_support;

use error::StoreError;
use libsql::Builder;
use proctor_core::ids::PREFIX_SESSION;

/// Handle to the durable libSQL backend.
///
/// Wraps a libSQL database and a single connection. Session repo methods live
/// in [`repos::session`].
pub struct ProctorDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    remote: bool,
}

impl ProctorDb {
    /// Open a local database file, or `":memory:"` for tests.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, StoreError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let proctor_db = Self {
            db,
            conn,
            remote: false,
        };
        proctor_db.run_migrations().await?;
        Ok(proctor_db)
    }

    /// Open a remote database (Turso or `sqld`) over the network.
    ///
    /// Building a remote handle does not touch the network, so a probe query
    /// runs first: an unreachable server or a rejected token fails here rather
    /// than on the first session operation.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the server cannot be reached or migrations fail.
    pub async fn open_remote(url: &str, auth_token: &str) -> Result<Self, StoreError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        let conn = db.connect()?;

        let proctor_db = Self {
            db,
            conn,
            remote: true,
        };
        proctor_db.probe().await?;
        proctor_db.run_migrations().await?;
        Ok(proctor_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Whether this handle talks to a remote server.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        self.remote
    }

    /// Round-trip a trivial query.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend does not answer.
    pub async fn probe(&self) -> Result<(), StoreError> {
        let mut rows = self.conn.query("SELECT 1", ()).await?;
        rows.next().await?.ok_or(StoreError::NoResult)?;
        Ok(())
    }

    /// Generate a native session id via libSQL, e.g. `"ses-65a1f0c2b9d84e1f7a3c0d12"`.
    ///
    /// Uses `randomblob(12)` in SQL to produce 24-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails or returns no rows.
    pub async fn generate_id(&self) -> Result<String, StoreError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{PREFIX_SESSION}-' || lower(hex(randomblob(12)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(StoreError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}
