//! Live k-means over a fixed set of 2-D points
//!
//! The engine is driven from outside: build it with a population, call
//! [`Engine::initialize`] once, then [`Engine::step`] once per tick and read
//! [`Engine::clusters`] between ticks.

pub mod cluster;
pub mod context;
pub mod engine;
pub mod error;
pub mod init;
pub mod types;

pub use cluster::Cluster;
pub use context::{EngineContext, MemberScan};
pub use engine::{Engine, EngineState};
pub use error::{ClusterError, Result};
pub use types::{Color, Point, distance};
