//! User directory for shardusers
//!
//! Provides account creation and password-based authentication over the
//! shard store, with in-memory indexes by uid and by email.

pub mod crypto;
mod directory;
pub mod errors;
mod index;
pub mod types;

pub use directory::UserDirectory;
pub use errors::UserError;
pub use index::UserIndex;
pub use types::*;
