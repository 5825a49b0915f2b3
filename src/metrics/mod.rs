//! Metrics calculation module
//!
//! Provides line counting shared by the complexity analyzers and scorers.

pub mod loc_counter;

pub use loc_counter::{LineKind, LocCount, LocCounter};
