//! Route planner over the tera graph.
//!
//! Answers "how do I get from this tera to that one?" under one of three
//! objectives: cheapest fare, shortest travel time, or fewest stops. Every
//! search also offers a second-best route where one exists.
//!
//! Weighted modes run Dijkstra with a pluggable min-priority queue; stops
//! mode runs a breadth-first search that keeps every minimum-depth
//! predecessor so equally short routes can be ranked by fare.

mod alternative;
mod config;
mod dijkstra;
mod mode;
mod path;
mod queue;
mod rank;
mod search;
mod stops;

pub use config::SearchConfig;
pub use dijkstra::{BlockedEdge, shortest_path, shortest_path_with};
pub use mode::{InvalidMode, Metric, OptimizeBy};
pub use path::{Itinerary, PathResult};
pub use queue::{HeapQueue, MinQueue};
pub use search::{Planner, find_path};
