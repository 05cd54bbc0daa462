//! Read, write, and synchronize `.env` stores.
//!
//! A store is a plain-text file of `KEY=VALUE` lines. [`Dotenv`] is the
//! safe default and reconciles entries into a process-isolated in-memory
//! table.
//!
//! The convenience functions (`load_dotenv`, `set_key`, `remove_key`)
//! mutate the process environment and are `unsafe`, because callers must
//! guarantee no concurrent process-environment access.

mod env;
mod error;
mod model;
mod parser;
mod store;
mod writer;

pub use env::{TargetEnv, getenv, getenv_cast, getenv_or};
pub use error::{Error, MalformedLineError};
pub use model::{Entry, WriteOptions};
pub use parser::{parse_reader, parse_str};
pub use store::{Dotenv, load_dotenv, remove_key, set_key, store_path};
pub use writer::render;
