//! Network graph model.
//!
//! Stations, the lines that serve them and the adjacency between stations on
//! a shared line. A graph is built from upstream station records once per
//! route request and never mutated afterwards.

mod builder;
mod graph;
mod source;

#[cfg(test)]
pub(crate) mod test_support;

pub use builder::{DEFAULT_HOP_DISTANCE_KM, GraphBuilder, GraphError, StationRecord, Weighting};
pub use graph::{Edge, NetworkGraph, StationNode};
pub use source::{LineSpec, NetworkFile, NetworkSource, SourceError, StaticNetwork};
