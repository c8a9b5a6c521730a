//! Shared ECS resources.
//!
//! Submodules:
//! - [`worldtime`] – simulation clock (elapsed, delta, time scale)
//! - [`splinestore`] – named splines resolved by path walkers

pub mod splinestore;
pub mod worldtime;
