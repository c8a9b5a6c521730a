//! Pickup item component.
//!
//! Coins, potions, and weapon pickups sitting in the world. Collection is
//! overlap-driven: [`crate::systems::pickup`] applies the effect to the
//! collector and despawns the entity. While idle the pickup bobs and spins
//! around its spawn position (a pure float animation over `Position` and
//! `Orientation`).

use bevy_ecs::prelude::Component;
use glam::Vec3;

use crate::components::weapon::WeaponSlot;

/// What collecting the pickup does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickupKind {
    /// Adds to the collector's coin purse.
    Coin { value: u32 },
    /// Heals the collector.
    Potion { heal: f32 },
    /// Equips a weapon into the given slot.
    Weapon { damage: f32, slot: WeaponSlot },
}

/// A collectible item with an idle bob/spin animation.
#[derive(Component, Debug, Clone)]
pub struct Pickup {
    kind: PickupKind,
    interactable: bool,
    bob_amplitude: f32,
    bob_speed: f32,
    spin_speed: f32,
    phase: f32,
    home: Option<Vec3>,
}

impl Pickup {
    pub fn new(kind: PickupKind) -> Self {
        Self {
            kind,
            interactable: true,
            bob_amplitude: 0.0,
            bob_speed: 1.0,
            spin_speed: 0.0,
            phase: 0.0,
            home: None,
        }
    }

    /// Vertical bob: `amplitude` units at `speed` cycles per second.
    pub fn with_bob(mut self, amplitude: f32, speed: f32) -> Self {
        self.bob_amplitude = amplitude;
        self.bob_speed = speed;
        self
    }

    /// Yaw spin in degrees per second.
    pub fn with_spin(mut self, degrees_per_second: f32) -> Self {
        self.spin_speed = degrees_per_second;
        self
    }

    pub fn kind(&self) -> PickupKind {
        self.kind
    }

    pub fn is_interactable(&self) -> bool {
        self.interactable
    }

    /// Claim the pickup; returns `false` when it was already claimed this
    /// frame or is otherwise inert.
    pub fn claim(&mut self) -> bool {
        if !self.interactable {
            return false;
        }
        self.interactable = false;
        true
    }

    /// Advance the idle animation, returning the new position offset and
    /// yaw delta. `position` is captured as the home position on the first
    /// call.
    pub fn animate(&mut self, delta: f32, position: Vec3) -> (Vec3, f32) {
        let home = *self.home.get_or_insert(position);
        self.phase += delta * self.bob_speed * std::f32::consts::TAU;
        let bob = self.phase.sin() * self.bob_amplitude;
        (
            Vec3::new(home.x, home.y + bob, home.z),
            self.spin_speed * delta,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_is_single_shot() {
        let mut p = Pickup::new(PickupKind::Coin { value: 5 });
        assert!(p.claim());
        assert!(!p.claim());
    }

    #[test]
    fn test_bob_oscillates_around_home() {
        let mut p = Pickup::new(PickupKind::Potion { heal: 25.0 }).with_bob(2.0, 1.0);
        let home = Vec3::new(1.0, 4.0, 9.0);
        // Quarter cycle: peak of the bob.
        let (pos, _) = p.animate(0.25, home);
        assert!((pos.y - 6.0).abs() < 1e-4);
        // Half cycle later: trough.
        let (pos, _) = p.animate(0.5, home);
        assert!((pos.y - 2.0).abs() < 1e-4);
        assert_eq!(pos.x, 1.0);
        assert_eq!(pos.z, 9.0);
    }

    #[test]
    fn test_spin_rate() {
        let mut p = Pickup::new(PickupKind::Coin { value: 1 }).with_spin(90.0);
        let (_, yaw) = p.animate(0.5, Vec3::ZERO);
        assert_eq!(yaw, 45.0);
    }
}
