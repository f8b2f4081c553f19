//! CLI command handlers for `MODdy`.
//!
//! This module provides handlers for the CLI subcommands.
//! Each group of commands is implemented in its own submodule.

pub mod config;
pub mod profile;
pub mod render;
pub mod shell;
