//! Core model layer: entities, catalogs, store, commands and persistence

pub mod cap;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod deadline_index;
pub mod error;
pub mod models;
pub mod profile_store;
pub mod selection;
pub mod session;
pub mod storage;

/// Returns the current version of the `MODdy` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
