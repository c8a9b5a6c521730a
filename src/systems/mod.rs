//! Per-frame systems and observers.
//!
//! This module groups the ECS systems that advance the interactive objects
//! and the observers that wire engine inputs into them.
//!
//! Submodules overview
//! - [`time`] – update simulation time and delta
//! - [`door`] – apply door commands, advance doors, publish door events
//! - [`floorswitch`] – overlap observers, switch commands, switch events
//! - [`platform`] – integrate platform movement and write poses
//! - [`vitals`] – damage observer and per-character gauge updates
//! - [`weapon`] – convert weapon overlaps into damage
//! - [`pickup`] – collection observer and idle animation

pub mod door;
pub mod floorswitch;
pub mod pickup;
pub mod platform;
pub mod time;
pub mod vitals;
pub mod weapon;
