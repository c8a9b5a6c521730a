//! Character vitals component.
//!
//! Wraps a health [`Gauge`] (and an optional auto-restoring stamina gauge)
//! behind the damage/heal surface characters expose. Damage is routed here
//! by [`crate::systems::vitals`] from `DamageReceived` triggers.

use bevy_ecs::prelude::Component;
use smallvec::SmallVec;

use crate::components::gauge::{Gauge, GaugeEvent};

/// Which gauge a vitals event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VitalKind {
    Health,
    Stamina,
}

/// Health and optional stamina for one character.
#[derive(Component, Debug, Clone)]
pub struct Vitals {
    health: Gauge,
    stamina: Option<Gauge>,
    invulnerable: bool,
}

impl Vitals {
    pub fn new(max_health: f32) -> Self {
        Self {
            health: Gauge::new(max_health),
            stamina: None,
            invulnerable: false,
        }
    }

    /// Add a stamina gauge; pass one configured with auto-change for the
    /// usual regenerating stamina.
    pub fn with_stamina(mut self, stamina: Gauge) -> Self {
        self.stamina = Some(stamina);
        self
    }

    pub fn with_invulnerable(mut self, invulnerable: bool) -> Self {
        self.invulnerable = invulnerable;
        self
    }

    pub fn health(&self) -> &Gauge {
        &self.health
    }

    pub fn stamina(&self) -> Option<&Gauge> {
        self.stamina.as_ref()
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable
    }

    pub fn set_invulnerable(&mut self, invulnerable: bool) {
        self.invulnerable = invulnerable;
    }

    pub fn is_dead(&self) -> bool {
        self.health.is_empty()
    }

    /// Apply damage; ignored while invulnerable.
    pub fn take_damage(&mut self, amount: f32) {
        if self.invulnerable {
            return;
        }
        self.health.decrease_value(amount);
    }

    pub fn heal(&mut self, amount: f32, clamp_to_max: bool) {
        self.health.increase_value(amount, clamp_to_max);
    }

    pub fn increase_max_health(&mut self, amount: f32, clamp_current: bool) {
        self.health.increase_max_value(amount, clamp_current);
    }

    pub fn decrease_max_health(&mut self, amount: f32, clamp_current: bool) {
        if self.health.max_value() <= 0.0 {
            return;
        }
        self.health.decrease_max_value(amount, clamp_current);
    }

    /// Spend stamina; returns `false` when there is no stamina gauge or not
    /// enough left.
    pub fn spend_stamina(&mut self, amount: f32) -> bool {
        match &mut self.stamina {
            Some(stamina) if stamina.value() >= amount => {
                stamina.decrease_value(amount);
                true
            }
            _ => false,
        }
    }

    /// Advance both gauges and drain their events, tagged with the gauge
    /// they came from.
    pub fn update(&mut self, delta: f32) -> SmallVec<[(VitalKind, GaugeEvent); 4]> {
        let mut events = SmallVec::new();
        self.health.update(delta);
        for event in self.health.take_events() {
            events.push((VitalKind::Health, event));
        }
        if let Some(stamina) = &mut self.stamina {
            stamina.update(delta);
            for event in stamina.take_events() {
                events.push((VitalKind::Stamina, event));
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_and_death() {
        let mut v = Vitals::new(100.0);
        v.take_damage(60.0);
        assert_eq!(v.health().value(), 40.0);
        assert!(!v.is_dead());

        v.take_damage(60.0);
        assert!(v.is_dead());
        let events = v.update(0.0);
        assert!(events.contains(&(VitalKind::Health, GaugeEvent::Depleted)));
    }

    #[test]
    fn test_invulnerable_ignores_damage() {
        let mut v = Vitals::new(100.0).with_invulnerable(true);
        v.take_damage(50.0);
        assert_eq!(v.health().value(), 100.0);

        v.set_invulnerable(false);
        v.take_damage(50.0);
        assert_eq!(v.health().value(), 50.0);
    }

    #[test]
    fn test_heal_clamps() {
        let mut v = Vitals::new(100.0);
        v.take_damage(30.0);
        v.heal(50.0, true);
        assert_eq!(v.health().value(), 100.0);
    }

    #[test]
    fn test_stamina_spend_and_restore() {
        let mut v = Vitals::new(100.0).with_stamina(
            Gauge::new(50.0)
                .with_start_delay(0.0)
                .with_auto_change(5.0, 1.0, false),
        );
        assert!(v.spend_stamina(20.0));
        assert_eq!(v.stamina().unwrap().value(), 30.0);
        assert!(!v.spend_stamina(40.0));

        v.update(1.0);
        assert_eq!(v.stamina().unwrap().value(), 35.0);
    }

    #[test]
    fn test_decrease_max_health_noop_at_zero_max() {
        let mut v = Vitals::new(0.0);
        v.decrease_max_health(10.0, true);
        assert_eq!(v.health().max_value(), 0.0);
        assert!(v.update(0.0).is_empty());
    }
}
