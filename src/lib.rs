//! Deterministic 2D platformer simulation core.
//!
//! Fixed-tick physics for a grappling-hook arena game: semi-implicit Euler
//! bodies, axis-separated wall collision, a three-state grappling hook,
//! grenades with radial explosions, a bouncing laser and timer-driven bots.
//! Coordinates are screen-space (Y grows downward) and all tuning constants
//! are per-frame at the fixed tick rate.
//!
//! The core is headless: it consumes an [`input::ActionState`] per frame
//! and emits [`events::SimEvent`]s for the renderer, camera and audio to
//! consume. Rendering, timing and input decoding live with the caller.

pub mod config;
pub mod events;
pub mod input;
pub mod physics;
pub mod player;
pub mod rng;
pub mod sim;
pub mod systems;
pub mod world;

pub use config::SimConfig;
pub use events::SimEvent;
pub use input::ActionState;
pub use physics::body::{Aabb, PhysicsBody};
pub use player::PlayerController;
pub use sim::Simulation;
pub use world::{Entity, EntityArena, EntityId};
