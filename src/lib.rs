//! Simulation core for a multi-snake arena: movement and growth, food
//! spawning with density upkeep, and wall / food / snake collisions with
//! size-based combat. Rendering and input live in the binaries.

pub mod ai;
pub mod camera;
pub mod collision;
pub mod combat;
pub mod config;
pub mod food;
pub mod food_manager;
pub mod reporting;
pub mod simulation;
pub mod snake;
pub mod spatial_hash;
pub mod stats;
pub mod vector;
pub mod world;

pub use config::{ConfigError, SimConfig};
pub use simulation::{SimState, ThreatLevel, PLAYER};
pub use snake::{Direction, Snake, SnakeId};
