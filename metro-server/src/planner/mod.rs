//! Route planner over a metro network graph.
//!
//! This module implements the route-finding engine: three interchangeable
//! path searches (BFS, Dijkstra, A*), detection of the stations where the
//! traveler changes line, and the fare and travel-time estimates derived
//! from the path's shape.
//!
//! All search state is local to one call, so a single read-only graph can
//! serve any number of concurrent searches.

mod astar;
mod bfs;
mod config;
mod dijkstra;
mod fare;
mod interchange;
mod queue;
mod search;
mod strategy;


pub use astar::{Heuristic, NameLengthHeuristic, ZeroHeuristic, find_path_astar};
pub use bfs::find_path_bfs;
pub use config::FareConfig;
pub use dijkstra::find_path_dijkstra;
pub use fare::Fare;
pub use interchange::{Analysis, LineChange, analyze, find_interchanges, is_line_change, line_changes};
pub use search::{
    Endpoint, RouteError, RoutePlanner, RouteRequest, RouteResult, find_route,
    find_route_with_heuristic,
};
pub use strategy::{PathFound, Strategy, UnknownStrategy};
