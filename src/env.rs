use std::collections::BTreeMap;

/// Environment table that store entries are reconciled into.
///
/// Operations take this as an injected collaborator so the live process
/// environment can be swapped for an in-memory table in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetEnv {
    kind: TargetEnvKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TargetEnvKind {
    /// The current process environment.
    ///
    /// Writes go through [`std::env::set_var`]/[`std::env::remove_var`],
    /// which mutate global process state and are not thread-safe for
    /// concurrent environment access.
    Process,
    /// An in-memory map.
    Memory(BTreeMap<String, String>),
}

impl Default for TargetEnv {
    fn default() -> Self {
        Self::memory()
    }
}

impl TargetEnv {
    /// Create a process-environment table.
    ///
    /// # Safety
    ///
    /// The caller must ensure no other threads concurrently read or write
    /// the process environment for the duration of operations that may
    /// mutate this table.
    pub unsafe fn process() -> Self {
        Self {
            kind: TargetEnvKind::Process,
        }
    }

    /// Create an empty in-memory table.
    ///
    /// Use this to avoid mutating the process environment.
    pub fn memory() -> Self {
        Self::from_memory(BTreeMap::new())
    }

    /// Create an in-memory table from an existing map.
    pub fn from_memory(map: BTreeMap<String, String>) -> Self {
        Self {
            kind: TargetEnvKind::Memory(map),
        }
    }

    pub fn as_memory(&self) -> Option<&BTreeMap<String, String>> {
        match &self.kind {
            TargetEnvKind::Memory(map) => Some(map),
            TargetEnvKind::Process => None,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        match &self.kind {
            TargetEnvKind::Process => std::env::var_os(key).is_some(),
            TargetEnvKind::Memory(map) => map.contains_key(key),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match &self.kind {
            TargetEnvKind::Process => {
                std::env::var_os(key).map(|value| value.to_string_lossy().into_owned())
            }
            TargetEnvKind::Memory(map) => map.get(key).cloned(),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) {
        match &mut self.kind {
            TargetEnvKind::Process => unsafe { std::env::set_var(key, value) },
            TargetEnvKind::Memory(map) => {
                map.insert(key.to_owned(), value.to_owned());
            }
        }
    }

    pub fn remove(&mut self, key: &str) {
        match &mut self.kind {
            TargetEnvKind::Process => unsafe { std::env::remove_var(key) },
            TargetEnvKind::Memory(map) => {
                map.remove(key);
            }
        }
    }
}

/// Read a variable from the process environment.
///
/// Non-Unicode values are read lossily; a missing key is `None`, never an
/// error.
pub fn getenv(key: &str) -> Option<String> {
    std::env::var_os(key).map(|value| value.to_string_lossy().into_owned())
}

/// Read a variable from the process environment, falling back to `default`.
pub fn getenv_or(key: &str, default: impl Into<String>) -> String {
    getenv(key).unwrap_or_else(|| default.into())
}

/// Read a variable and pass it through `cast`.
///
/// The transform is applied to whichever value was obtained, the real one
/// or the default; its failure propagates unwrapped.
pub fn getenv_cast<T, E, F>(key: &str, default: &str, cast: F) -> Result<T, E>
where
    F: FnOnce(&str) -> Result<T, E>,
{
    let value = getenv(key).unwrap_or_else(|| default.to_owned());
    cast(&value)
}
