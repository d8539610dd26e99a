#![allow(dead_code)]

use std::sync::Arc;

use hedgepool::adapter::outbound::sqlite::database::connection::{open, DbPool};
use hedgepool::adapter::outbound::sqlite::SqliteStore;
use tempfile::TempDir;

/// Temporary SQLite database for integration tests.
///
/// The directory and file are removed on drop.
pub struct TempDb {
    dir: TempDir,
    pool: DbPool,
}

impl TempDb {
    pub fn create() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let pool = open(&url(&dir)).expect("open sqlite pool");
        Self { dir, pool }
    }

    pub fn url(&self) -> String {
        url(&self.dir)
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// A fresh store over the same database file.
    pub fn store(&self) -> Arc<SqliteStore> {
        Arc::new(SqliteStore::new(self.pool.clone()))
    }

    /// A store with its own pool, as a second process would have.
    pub fn second_process_store(&self) -> Arc<SqliteStore> {
        Arc::new(SqliteStore::new(open(&self.url()).expect("reopen sqlite pool")))
    }
}

fn url(dir: &TempDir) -> String {
    dir.path().join("hedgepool.db").display().to_string()
}
