//! Weapon component.
//!
//! A damage payload with a collision gate. The weapon never touches its
//! victims directly: [`crate::systems::weapon`] turns overlaps of an
//! enabled weapon into `DamageReceived` triggers, and the target's vitals
//! decide what that means.

use bevy_ecs::prelude::Component;

/// Which hand a weapon equips into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponSlot {
    Left,
    Right,
}

/// An equippable damage dealer.
#[derive(Component, Debug, Clone)]
pub struct Weapon {
    damage: f32,
    slot: WeaponSlot,
    collision_enabled: bool,
}

impl Weapon {
    /// New weapon with its collision gate closed, matching a sheathed
    /// weapon at spawn.
    pub fn new(damage: f32, slot: WeaponSlot) -> Self {
        Self {
            damage,
            slot,
            collision_enabled: false,
        }
    }

    pub fn damage(&self) -> f32 {
        self.damage
    }

    pub fn slot(&self) -> WeaponSlot {
        self.slot
    }

    pub fn is_collision_enabled(&self) -> bool {
        self.collision_enabled
    }

    /// Open the collision gate for the duration of a swing.
    pub fn enable_collision(&mut self) {
        self.collision_enabled = true;
    }

    pub fn disable_collision(&mut self) {
        self.collision_enabled = false;
    }
}
