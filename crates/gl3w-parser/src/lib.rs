//! gl3w Parser
//!
//! Turns Khronos headers and application sources into the declarations a
//! loader needs.
//!
//! ## Modules
//!
//! - `whitelist` - Symbols referenced by application sources
//! - `scanner` - Line filter over `glcorearb.h`
//! - `ifdef` - Conditional block tree used to drop emptied `#if` regions

pub mod ifdef;
pub mod scanner;
pub mod whitelist;

pub use ifdef::IfdefTree;
pub use scanner::{HeaderScanner, ScanOptions, ScanResult, ScanStats};
pub use whitelist::{Whitelist, WhitelistBuilder};
