//! gl3w Emit
//!
//! Renders the loader header by substituting generated blocks into a text
//! template at fixed marker strings.

pub mod generate;
pub mod template;

pub use generate::{padding_width, proc_macros, proc_names, proc_table};
pub use template::{Marker, Template};
