//! The `onoma` command group: `search <query>`, `spaces`, `stats`
//!
//! Rendering lives here so the host-registered CLI handler and the
//! standalone binary print identical text.

pub mod render;
pub mod types;

pub use render::render;
pub use types::{CommandFailure, MemoryCommand};
