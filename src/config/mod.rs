//! Project configuration
//!
//! Types, discovery and loading for `lightmoji.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
