//! gl3w Core
//!
//! Core types shared by the gl3w-rs loader generator: errors, configuration
//! and symbol classification.

pub mod config;
pub mod error;
pub mod symbol;

pub use config::Config;
pub use error::{Error, Result};
pub use symbol::SymbolKind;
