//! ECS components for interactive objects.
//!
//! Three reusable cores carry most of the behavior: the timed state machine,
//! the resource gauge, and the path walker. The rest are thin adapters
//! composing them into concrete gameplay objects.
//!
//! Submodules overview:
//! - [`timer`] – delayed-action slot, the crate's scheduling primitive
//! - [`statemachine`] – timed state machine with revertible transitions
//! - [`gauge`] – bounded resource value with timed auto-change
//! - [`pathwalker`] – stopover traversal over named splines
//! - [`spatial`] – world-space position and orientation
//! - [`door`] – openable/lockable door
//! - [`floorswitch`] – pressure plate with press budget and delays
//! - [`platform`] – self-driving and externally-animated spline platforms
//! - [`vitals`] – health and stamina gauges per character
//! - [`weapon`] – damage payload with a collision gate
//! - [`pickup`] – collectible coins, potions, and weapons
//! - [`inventory`] – collector-side purse and weapon slots

pub mod door;
pub mod floorswitch;
pub mod gauge;
pub mod inventory;
pub mod pathwalker;
pub mod pickup;
pub mod platform;
pub mod spatial;
pub mod statemachine;
pub mod timer;
pub mod vitals;
pub mod weapon;
