//! One-shot operations through the same orchestrator the server uses
//!
//! Results are printed as the JSON the matching HTTP endpoint would return.

pub mod lyrics;
pub mod translate;
