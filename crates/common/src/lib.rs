//! Shared plumbing for the client registry crates: logging setup and small wire types.

pub mod types;
pub mod utils;
