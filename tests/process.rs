//! Tests for the process-environment convenience functions.
//!
//! Process-global state is serialized behind a lock, and every test uses
//! keys unique to this suite.

use std::sync::{Mutex, OnceLock};

use envstore::{Entry, WriteOptions, getenv, getenv_cast, getenv_or, load_dotenv, remove_key, set_key};
use tempfile::TempDir;

#[test]
fn load_dotenv_applies_override_policy_to_process_env() {
    let _lock = env_lock().lock().expect("env lock should not be poisoned");
    let dir = make_store(&["ENVSTORE_LOAD_A=from_file", "ENVSTORE_LOAD_B=from_file"]);

    set_process_var("ENVSTORE_LOAD_A", "existing");
    remove_process_var("ENVSTORE_LOAD_B");

    let entries =
        unsafe { load_dotenv(Some(dir.path()), false) }.expect("load_dotenv should succeed");
    assert_eq!(entries.len(), 2);
    assert_eq!(getenv("ENVSTORE_LOAD_A").as_deref(), Some("existing"));
    assert_eq!(getenv("ENVSTORE_LOAD_B").as_deref(), Some("from_file"));

    unsafe { load_dotenv(Some(dir.path()), true) }.expect("load_dotenv should succeed");
    assert_eq!(getenv("ENVSTORE_LOAD_A").as_deref(), Some("from_file"));

    remove_process_var("ENVSTORE_LOAD_A");
    remove_process_var("ENVSTORE_LOAD_B");
}

#[test]
fn set_key_rewrites_store_and_process_env() {
    let _lock = env_lock().lock().expect("env lock should not be poisoned");
    let dir = make_store(&["ENVSTORE_SET_A = '1'"]);

    remove_process_var("ENVSTORE_SET_B");

    let written = unsafe {
        set_key(
            "ENVSTORE_SET_B",
            "2",
            Some(dir.path()),
            WriteOptions::default(),
            false,
        )
    }
    .expect("set_key should succeed");

    assert_eq!(written, Entry::new("ENVSTORE_SET_B", "2"));
    assert_eq!(
        std::fs::read_to_string(dir.path().join(".env")).expect("read store"),
        "ENVSTORE_SET_A = '1'\nENVSTORE_SET_B = '2'\n"
    );
    assert_eq!(getenv("ENVSTORE_SET_B").as_deref(), Some("2"));

    remove_process_var("ENVSTORE_SET_B");
}

#[test]
fn remove_key_clears_process_env_when_overriding() {
    let _lock = env_lock().lock().expect("env lock should not be poisoned");
    let dir = make_store(&["ENVSTORE_REMOVE_A = '1'"]);

    set_process_var("ENVSTORE_REMOVE_A", "existing");

    let removed = unsafe {
        remove_key(
            "ENVSTORE_REMOVE_A",
            Some(dir.path()),
            WriteOptions::default(),
            true,
        )
    }
    .expect("remove_key should succeed");

    assert_eq!(removed.as_deref(), Some("1"));
    assert_eq!(getenv("ENVSTORE_REMOVE_A"), None);
    assert_eq!(
        std::fs::read_to_string(dir.path().join(".env")).expect("read store"),
        ""
    );
}

#[test]
fn getenv_accessors_read_process_env() {
    let _lock = env_lock().lock().expect("env lock should not be poisoned");

    remove_process_var("ENVSTORE_GETENV_A");
    assert_eq!(getenv("ENVSTORE_GETENV_A"), None);
    assert_eq!(getenv_or("ENVSTORE_GETENV_A", "x"), "x");

    let fallback =
        getenv_cast("ENVSTORE_GETENV_A", "5", str::parse::<i64>).expect("cast should succeed");
    assert_eq!(fallback, 5);

    set_process_var("ENVSTORE_GETENV_A", "8080");
    let real =
        getenv_cast("ENVSTORE_GETENV_A", "5", str::parse::<i64>).expect("cast should succeed");
    assert_eq!(real, 8080);

    let failure = getenv_cast("ENVSTORE_GETENV_B", "not a number", str::parse::<i64>);
    assert!(failure.is_err());

    remove_process_var("ENVSTORE_GETENV_A");
}

fn make_store(lines: &[&str]) -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    let mut content = lines.join("\n");
    content.push('\n');
    std::fs::write(dir.path().join(".env"), content).expect("failed to write test store");
    dir
}

fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

fn set_process_var(key: &str, value: &str) {
    unsafe { std::env::set_var(key, value) };
}

fn remove_process_var(key: &str) {
    unsafe { std::env::remove_var(key) };
}
