//! Shared state for commands that touch the store.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::adapter::outbound::sqlite::database::connection;
use crate::adapter::outbound::sqlite::SqliteStore;
use crate::application::advisor::Advisor;
use crate::application::settlement::Settlement;
use crate::domain::id::{ParticipantId, WagerId};
use crate::domain::participant::Participant;
use crate::domain::wager::Wager;
use crate::error::{Result, SettlementError};
use crate::infrastructure::config::Config;
use crate::port::outbound::{ParticipantStore, WagerStore};

/// Loaded configuration plus an open store.
pub struct Context {
    pub config: Config,
    pub store: Arc<SqliteStore>,
}

impl Context {
    /// Open the configured database, creating it and its directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, the pool cannot
    /// be opened or migrations fail.
    pub fn open(config: Config) -> Result<Self> {
        if let Some(parent) = Path::new(&config.database).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        debug!(database = %config.database, "Opening store");
        let pool = connection::open(&config.database)?;
        Ok(Self {
            config,
            store: Arc::new(SqliteStore::new(pool)),
        })
    }

    /// Closure orchestrator over this store with the configured VOID policy.
    #[must_use]
    pub fn settlement(&self) -> Settlement<SqliteStore> {
        Settlement::new(Arc::clone(&self.store)).with_void_policy(self.config.settlement.void_policy)
    }

    #[must_use]
    pub fn advisor(&self) -> Advisor {
        Advisor::new(self.config.advisor_defaults())
    }

    /// Fetch a wager by ID.
    ///
    /// # Errors
    ///
    /// Returns [`SettlementError::UnknownWager`] if there is no such wager.
    pub fn wager(&self, id: &str) -> Result<Wager> {
        let id = WagerId::from(id);
        self.store
            .get_wager(&id)?
            .ok_or_else(|| SettlementError::UnknownWager(id).into())
    }

    /// Fetch a participant by ID, falling back to an exact name match.
    ///
    /// # Errors
    ///
    /// Returns [`SettlementError::UnknownParticipant`] if nothing matches.
    pub fn participant(&self, key: &str) -> Result<Participant> {
        let id = ParticipantId::from(key);
        if let Some(found) = self.store.get_participant(&id)? {
            return Ok(found);
        }
        self.store
            .list_participants()?
            .into_iter()
            .find(|p| p.name == key)
            .ok_or_else(|| SettlementError::UnknownParticipant(id).into())
    }
}
