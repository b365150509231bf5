//! SQLite backend for the msg engine.
mod sqlite_impl;

pub mod db;
pub use sqlite_impl::SqliteDatabase;
