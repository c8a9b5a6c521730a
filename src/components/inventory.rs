//! Collector-side inventory component.
//!
//! Where pickups land: a coin purse and one weapon per hand. Kept
//! deliberately small; anything richer is a host concern.

use bevy_ecs::prelude::Component;

use crate::components::weapon::WeaponSlot;

/// Coins and equipped weapon damage per hand.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Inventory {
    coins: u32,
    left_weapon: Option<f32>,
    right_weapon: Option<f32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn add_coins(&mut self, amount: u32) -> u32 {
        self.coins = self.coins.saturating_add(amount);
        self.coins
    }

    pub fn weapon_damage(&self, slot: WeaponSlot) -> Option<f32> {
        match slot {
            WeaponSlot::Left => self.left_weapon,
            WeaponSlot::Right => self.right_weapon,
        }
    }

    /// Equip a weapon, returning the damage of the one it replaced.
    pub fn equip_weapon(&mut self, slot: WeaponSlot, damage: f32) -> Option<f32> {
        match slot {
            WeaponSlot::Left => self.left_weapon.replace(damage),
            WeaponSlot::Right => self.right_weapon.replace(damage),
        }
    }
}
