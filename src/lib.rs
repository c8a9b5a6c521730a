//! Gameplay interactives library.
//!
//! Headless building blocks for action-game interactive objects: doors,
//! floor switches, spline platforms, character vitals, weapons, and
//! pickups, built from three reusable cores (timed state machine, resource
//! gauge, path walker) on top of `bevy_ecs`. Rendering, physics, and input
//! stay on the host side; they talk to this crate through triggered events
//! and message mailboxes, and listen through observers.

pub mod components;
pub mod events;
pub mod resources;
pub mod sim;
pub mod systems;
