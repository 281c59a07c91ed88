//! Research findings
//!
//! The structured output of the research stage, consumed by the drafting
//! stage and persisted by the storage module.

mod types;

pub use types::*;
