//! Events exchanged between hosts, systems, and observers.
//!
//! Engine inputs arrive as triggered events (`interaction`), imperative
//! commands as buffered messages (`DoorCommand` and friends), and object
//! notifications go back out as triggered events observers subscribe to.
//!
//! Submodules:
//! - [`interaction`] – overlap, damage, and interact inputs from the host
//! - [`door`] – door commands and notifications
//! - [`floorswitch`] – floor switch commands and notifications
//! - [`platform`] – platform commands, external progress, notifications
//! - [`vitals`] – gauge change notifications per character
//! - [`pickup`] – pickup collection notifications

pub mod door;
pub mod floorswitch;
pub mod interaction;
pub mod pickup;
pub mod platform;
pub mod vitals;
