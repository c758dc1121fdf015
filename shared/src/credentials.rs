use std::{fmt::Debug, sync::RwLock};

/// Source of the secret sent to the stats API.
///
/// Persistent storage lives outside of this crate, implementations only need
/// to expose read, write and clear.
pub trait CredentialStore: Send + Sync + Debug {
    fn get_credential(&self) -> Option<String>;
    fn set_credential(&self, credential: String);
    fn clear_credential(&self);

    /// A blank credential counts as missing.
    fn has_credential(&self) -> bool {
        self.get_credential().is_some_and(|c| !c.trim().is_empty())
    }
}

/// In-process store, used by the binary and by tests.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    credential: RwLock<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new(credential: Option<String>) -> Self {
        Self {
            credential: RwLock::new(credential),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get_credential(&self) -> Option<String> {
        // A poisoned lock still holds a valid Option<String>.
        match self.credential.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn set_credential(&self, credential: String) {
        tracing::debug!("API key saved");
        match self.credential.write() {
            Ok(mut guard) => *guard = Some(credential),
            Err(poisoned) => *poisoned.into_inner() = Some(credential),
        }
    }

    fn clear_credential(&self) {
        tracing::debug!("API key removed");
        match self.credential.write() {
            Ok(mut guard) => *guard = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }
}
