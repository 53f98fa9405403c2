//! Core physics: bodies, wall collision, bounce raycasting.

pub mod body;
pub mod collision;
pub mod raycast;
pub mod types;
