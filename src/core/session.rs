//! A running session: store, storage, catalogs and logger wired together

use crate::core::catalog::Catalogs;
use crate::core::commands::{Command, CommandExecutor, CommandResult};
use crate::core::error::Result;
use crate::core::profile_store::ProfileStore;
use crate::core::storage::ProfileStorage;
use crate::logger::Logger;
use crate::{debug, error};

/// Owns the in-memory model of one session and persists it after every change
pub struct Session<S: ProfileStorage> {
    store: ProfileStore,
    storage: S,
    catalogs: Catalogs,
    logger: Logger,
}

impl<S: ProfileStorage> Session<S> {
    /// Load the store from `storage` and start a session
    ///
    /// # Errors
    /// Returns the storage error if the saved data cannot be loaded.
    pub fn open(storage: S, catalogs: Catalogs, logger: Logger) -> Result<Self> {
        let store = storage.load().inspect_err(|e| {
            error!(logger, "Failed to load saved profiles: {e}");
        })?;
        debug!(
            logger,
            "Session opened with {} profile(s), {} deadline(s)",
            store.profiles().len(),
            store.deadlines().len()
        );
        Ok(Self {
            store,
            storage,
            catalogs,
            logger,
        })
    }

    /// Run one command; successful mutating commands are saved before returning
    ///
    /// A failed save is reported as `Io` and the in-memory change is kept.
    ///
    /// # Errors
    /// Returns the command's error, or the storage error from the save.
    pub fn execute(&mut self, command: Command) -> Result<CommandResult> {
        let mutating = command.is_mutating();
        let result =
            CommandExecutor::new(&self.catalogs, &self.logger).execute(&mut self.store, command)?;
        if mutating {
            self.storage.save(&self.store).inspect_err(|e| {
                error!(self.logger, "Failed to save profiles: {e}");
            })?;
            debug!(self.logger, "Profiles saved");
        }
        Ok(result)
    }

    /// The in-memory store
    #[must_use]
    pub const fn store(&self) -> &ProfileStore {
        &self.store
    }

    /// Catalogs in use
    #[must_use]
    pub const fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    /// Session logger
    #[must_use]
    pub const fn logger(&self) -> &Logger {
        &self.logger
    }

    /// The storage backend
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::NewProfile;
    use crate::core::error::ModelError;
    use std::cell::Cell;

    #[derive(Default)]
    struct CountingStorage {
        saves: Cell<usize>,
        fail: bool,
    }

    impl ProfileStorage for CountingStorage {
        fn load(&self) -> Result<ProfileStore> {
            Ok(ProfileStore::new())
        }

        fn save(&self, _store: &ProfileStore) -> Result<()> {
            self.saves.set(self.saves.get() + 1);
            if self.fail {
                Err(ModelError::Io(std::io::Error::other("disk full")))
            } else {
                Ok(())
            }
        }
    }

    fn new_profile() -> Command {
        Command::NewProfile(NewProfile {
            name: "John".into(),
            course: "Computer Science".into(),
            current_semester: 1,
            focus_area: None,
        })
    }

    #[test]
    fn test_saves_only_after_mutation() {
        let mut session =
            Session::open(CountingStorage::default(), Catalogs::bundled().unwrap(), Logger::quiet())
                .unwrap();
        session.execute(new_profile()).unwrap();
        assert_eq!(session.storage().saves.get(), 1);

        session
            .execute(Command::Show(crate::core::commands::ShowTarget::Profile(None)))
            .unwrap();
        assert_eq!(session.storage().saves.get(), 1);

        assert!(session.execute(new_profile()).is_err());
        assert_eq!(session.storage().saves.get(), 1);
    }

    #[test]
    fn test_failed_save_keeps_change() {
        let storage = CountingStorage {
            saves: Cell::new(0),
            fail: true,
        };
        let mut session =
            Session::open(storage, Catalogs::bundled().unwrap(), Logger::quiet()).unwrap();
        let err = session.execute(new_profile()).unwrap_err();
        assert!(matches!(err, ModelError::Io(_)));
        assert!(session.store().has_profile("john"));
    }
}
