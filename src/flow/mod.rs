//! Declarative flow definitions: steps, typed fields and content blocks.

pub mod config;
pub mod content;
pub mod field;
mod validate;

pub use config::*;
pub use content::*;
pub use field::*;
