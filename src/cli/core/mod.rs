//! Core CLI commands
//!
//! Running the HTTP bridge and querying the lyrics provider directly.

pub mod serve;
pub mod search;
