use std::path::{Path, PathBuf};

use tracing::debug;

use crate::env::TargetEnv;
use crate::error::Error;
use crate::model::{Entry, WriteOptions};
use crate::parser::parse_str;
use crate::writer::render;

const DEFAULT_FILE: &str = ".env";

/// Resolve the store file inside `base_dir` (or the current directory).
pub fn store_path(base_dir: Option<&Path>) -> PathBuf {
    let path = base_dir.unwrap_or_else(|| Path::new(".")).join(DEFAULT_FILE);
    std::path::absolute(&path).unwrap_or(path)
}

/// Stateful store handle holding a base directory, formatting flags, and
/// the environment table entries are reconciled into.
///
/// The default table is in-memory; reconciling into the live process
/// environment requires an explicit [`TargetEnv::process`] target.
#[derive(Debug, Clone)]
pub struct Dotenv {
    base_dir: Option<PathBuf>,
    options: WriteOptions,
    target: TargetEnv,
}

impl Default for Dotenv {
    fn default() -> Self {
        Self {
            base_dir: None,
            options: WriteOptions::default(),
            target: TargetEnv::default(),
        }
    }
}

impl Dotenv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_dir(mut self, base_dir: impl AsRef<Path>) -> Self {
        self.base_dir = Some(base_dir.as_ref().to_path_buf());
        self
    }

    pub fn options(mut self, options: WriteOptions) -> Self {
        self.options = options;
        self
    }

    pub fn target(mut self, target: TargetEnv) -> Self {
        self.target = target;
        self
    }

    pub fn target_env(&self) -> &TargetEnv {
        &self.target
    }

    pub fn target_env_mut(&mut self) -> &mut TargetEnv {
        &mut self.target
    }

    pub fn into_target(self) -> TargetEnv {
        self.target
    }

    /// Resolved path of the store file.
    pub fn store_path(&self) -> PathBuf {
        store_path(self.base_dir.as_deref())
    }

    /// Replace the held base directory and formatting flags.
    pub fn update(&mut self, base_dir: Option<PathBuf>, options: WriteOptions) {
        self.base_dir = base_dir;
        self.options = options;
    }

    /// Parse the store file and reconcile every entry into the table.
    ///
    /// Fails with [`Error::StoreNotFound`] when the file does not exist.
    pub fn load(&mut self, override_env: bool) -> Result<Vec<Entry>, Error> {
        let path = self.store_path();
        let entries = read_entries(&path)?;
        for entry in &entries {
            reconcile(&mut self.target, &entry.key, &entry.value, override_env);
        }
        debug!(path = %path.display(), entries = entries.len(), "loaded store");
        Ok(entries)
    }

    /// Upsert `key` in the store file, rewrite it, and reconcile the new
    /// value into the table.
    ///
    /// The store file must already exist. Returns the written entry.
    pub fn set_key(&mut self, key: &str, value: &str, override_env: bool) -> Result<Entry, Error> {
        let path = self.store_path();
        let mut entries = read_entries(&path)?;

        match entries.iter_mut().find(|entry| entry.key == key) {
            Some(existing) => existing.value = value.to_owned(),
            None => entries.push(Entry::new(key, value)),
        }

        write_entries(&path, &entries, self.options)?;
        reconcile(&mut self.target, key, value, override_env);
        Ok(Entry::new(key, value))
    }

    /// Remove `key` from the store file and rewrite it.
    ///
    /// The store file must already exist; a missing key is not an error.
    /// With `override_env` set, the key is also removed from the table
    /// unconditionally. Returns the removed value, if any.
    pub fn remove_key(&mut self, key: &str, override_env: bool) -> Result<Option<String>, Error> {
        let path = self.store_path();
        let mut entries = read_entries(&path)?;

        let removed = entries
            .iter()
            .position(|entry| entry.key == key)
            .map(|idx| entries.remove(idx).value);

        write_entries(&path, &entries, self.options)?;
        if override_env {
            self.target.remove(key);
        }
        Ok(removed)
    }

    /// Read a variable from the held table; a missing key is `None`.
    pub fn getenv(&self, key: &str) -> Option<String> {
        self.target.get(key)
    }

    /// Read a variable from the held table, falling back to `default`.
    pub fn getenv_or(&self, key: &str, default: impl Into<String>) -> String {
        self.getenv(key).unwrap_or_else(|| default.into())
    }

    /// Read a variable and pass it through `cast`; the transform applies
    /// to the default as well, and its failure propagates unwrapped.
    pub fn getenv_cast<T, E, F>(&self, key: &str, default: &str, cast: F) -> Result<T, E>
    where
        F: FnOnce(&str) -> Result<T, E>,
    {
        let value = self.getenv(key).unwrap_or_else(|| default.to_owned());
        cast(&value)
    }
}

/// Load `<base_dir>/.env` and reconcile every entry into the process
/// environment.
///
/// # Safety
///
/// The caller must guarantee no concurrent process-environment access for
/// the duration of the call.
pub unsafe fn load_dotenv(
    base_dir: Option<&Path>,
    override_env: bool,
) -> Result<Vec<Entry>, Error> {
    let mut store = unsafe { process_store(base_dir, WriteOptions::default()) };
    store.load(override_env)
}

/// Upsert `key` in `<base_dir>/.env` and reconcile it into the process
/// environment.
///
/// # Safety
///
/// The caller must guarantee no concurrent process-environment access for
/// the duration of the call.
pub unsafe fn set_key(
    key: &str,
    value: &str,
    base_dir: Option<&Path>,
    options: WriteOptions,
    override_env: bool,
) -> Result<Entry, Error> {
    let mut store = unsafe { process_store(base_dir, options) };
    store.set_key(key, value, override_env)
}

/// Remove `key` from `<base_dir>/.env`, removing it from the process
/// environment as well when `override_env` is set.
///
/// # Safety
///
/// The caller must guarantee no concurrent process-environment access for
/// the duration of the call.
pub unsafe fn remove_key(
    key: &str,
    base_dir: Option<&Path>,
    options: WriteOptions,
    override_env: bool,
) -> Result<Option<String>, Error> {
    let mut store = unsafe { process_store(base_dir, options) };
    store.remove_key(key, override_env)
}

unsafe fn process_store(base_dir: Option<&Path>, options: WriteOptions) -> Dotenv {
    let store = Dotenv::new()
        .options(options)
        .target(unsafe { TargetEnv::process() });
    match base_dir {
        Some(dir) => store.base_dir(dir),
        None => store,
    }
}

fn read_entries(path: &Path) -> Result<Vec<Entry>, Error> {
    if !path.is_file() {
        return Err(Error::StoreNotFound {
            dir: store_dir(path),
        });
    }
    let text = std::fs::read_to_string(path)?;
    parse_str(&text)
}

fn write_entries(path: &Path, entries: &[Entry], options: WriteOptions) -> Result<(), Error> {
    std::fs::write(path, render(entries, options))?;
    debug!(path = %path.display(), entries = entries.len(), "rewrote store");
    Ok(())
}

fn store_dir(path: &Path) -> PathBuf {
    path.parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

fn reconcile(target: &mut TargetEnv, key: &str, value: &str, override_env: bool) {
    if !override_env && target.contains(key) {
        debug!(key, "keeping existing environment value");
        return;
    }
    target.set(key, value);
}
