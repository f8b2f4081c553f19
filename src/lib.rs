//! `MODdy` library
//! Student academic profile model: modules per semester, grades, CAP and deadlines

pub mod core;
pub mod logger;

pub use core::config;
pub use core::error::{ModelError, Result};
