//! Domain types for the metro route planner.
//!
//! These are validated value types. Code that receives them can trust
//! that names are non-empty and trimmed.

mod station;

pub use station::{InvalidName, LineName, MAX_NAME_LEN, StationName};
