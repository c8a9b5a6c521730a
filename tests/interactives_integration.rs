//! End-to-end tests driving the interactive objects through [`Sim`].
//!
//! Each scenario spawns real entities, feeds engine-side inputs (overlaps,
//! damage, commands) through the harness, ticks frames, and captures the
//! notifications observers receive.

use std::sync::{Arc, Mutex};

use bevy_ecs::observer::On;
use glam::Vec3;

use actionkit::components::door::{Door, DoorState};
use actionkit::components::floorswitch::{FloorSwitch, SwitchState};
use actionkit::components::gauge::Gauge;
use actionkit::components::inventory::Inventory;
use actionkit::components::pathwalker::{PathWalker, WalkMode};
use actionkit::components::pickup::{Pickup, PickupKind};
use actionkit::components::platform::{FloatingPlatform, PlatformEvent};
use actionkit::components::spatial::{Orientation, Position};
use actionkit::components::vitals::{VitalKind, Vitals};
use actionkit::components::weapon::{Weapon, WeaponSlot};
use actionkit::events::door::{DoorAction, DoorEvent, DoorEventKind};
use actionkit::events::floorswitch::{SwitchAction, SwitchEvent, SwitchEventKind};
use actionkit::events::pickup::PickupCollected;
use actionkit::events::platform::{PlatformAction, PlatformNotice};
use actionkit::events::vitals::VitalsEvent;
use actionkit::components::gauge::GaugeEvent;
use actionkit::resources::splinestore::Spline;
use actionkit::sim::Sim;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn door_opens_closes_and_notifies() {
    init_logger();
    let mut sim = Sim::new();

    let log: Arc<Mutex<Vec<DoorEventKind>>> = Arc::new(Mutex::new(Vec::new()));
    let capture = log.clone();
    sim.world.add_observer(move |trigger: On<DoorEvent>| {
        capture.lock().unwrap().push(trigger.event().kind);
    });

    let door = sim
        .world
        .spawn(Door::new(DoorState::Closed).with_transition_duration(1.0))
        .id();

    sim.send_door_command(door, DoorAction::Open);
    sim.tick(0.5);
    assert_eq!(
        sim.world.get::<Door>(door).unwrap().state(),
        DoorState::Transition
    );

    sim.tick(0.5);
    assert_eq!(
        sim.world.get::<Door>(door).unwrap().state(),
        DoorState::Opened
    );

    let kinds = log.lock().unwrap().clone();
    assert!(kinds.contains(&DoorEventKind::TransitionStarted));
    assert!(kinds.contains(&DoorEventKind::Opened));
    assert!(kinds.contains(&DoorEventKind::StateChanged));
}

#[test]
fn locked_door_rejects_commands_until_unlocked() {
    init_logger();
    let mut sim = Sim::new();
    let door = sim
        .world
        .spawn(Door::new(DoorState::Closed).with_transition_duration(0.0))
        .id();

    sim.send_door_command(door, DoorAction::Lock);
    sim.tick(0.1);
    sim.send_door_command(door, DoorAction::Open);
    sim.tick(0.1);
    assert_eq!(
        sim.world.get::<Door>(door).unwrap().state(),
        DoorState::Locked
    );

    sim.send_door_command(door, DoorAction::Unlock);
    sim.send_door_command(door, DoorAction::Open);
    sim.tick(0.1);
    assert_eq!(
        sim.world.get::<Door>(door).unwrap().state(),
        DoorState::Opened
    );
}

#[test]
fn enable_with_bad_state_leaves_door_serviceable() {
    init_logger();
    let mut sim = Sim::new();
    let door = sim
        .world
        .spawn(Door::new(DoorState::Closed).with_transition_duration(0.5))
        .id();

    sim.send_door_command(door, DoorAction::Disable);
    sim.tick(0.1);
    sim.send_door_command(door, DoorAction::Enable(DoorState::Transition));
    sim.tick(0.1);
    // The bogus target is dropped; the door is still just disabled.
    assert_eq!(
        sim.world.get::<Door>(door).unwrap().state(),
        DoorState::Disabled
    );

    sim.send_door_command(door, DoorAction::Enable(DoorState::Closed));
    sim.send_door_command(door, DoorAction::Open);
    sim.tick(0.5);
    assert_eq!(
        sim.world.get::<Door>(door).unwrap().state(),
        DoorState::Opened
    );
}

#[test]
fn interact_toggles_door() {
    init_logger();
    let mut sim = Sim::new();
    let door = sim
        .world
        .spawn(Door::new(DoorState::Closed).with_transition_duration(0.0))
        .id();
    let hero = sim.world.spawn(()).id();

    sim.interact(door, Some(hero));
    sim.tick(0.1);
    assert_eq!(
        sim.world.get::<Door>(door).unwrap().state(),
        DoorState::Opened
    );

    sim.interact(door, Some(hero));
    sim.tick(0.1);
    assert_eq!(
        sim.world.get::<Door>(door).unwrap().state(),
        DoorState::Closed
    );

    // Locked doors shrug the input off.
    sim.send_door_command(door, DoorAction::Lock);
    sim.tick(0.1);
    sim.interact(door, Some(hero));
    sim.tick(0.1);
    assert_eq!(
        sim.world.get::<Door>(door).unwrap().state(),
        DoorState::Locked
    );
}

#[test]
fn switch_presses_under_foot_and_releases() {
    init_logger();
    let mut sim = Sim::new();

    let log: Arc<Mutex<Vec<SwitchEventKind>>> = Arc::new(Mutex::new(Vec::new()));
    let capture = log.clone();
    sim.world.add_observer(move |trigger: On<SwitchEvent>| {
        capture.lock().unwrap().push(trigger.event().kind);
    });

    let switch = sim
        .world
        .spawn(FloorSwitch::new(SwitchState::Idle).with_transition_duration(0.2))
        .id();
    let walker = sim.world.spawn(()).id();

    sim.overlap_begin(switch, walker);
    sim.tick(0.2);
    assert_eq!(
        sim.world.get::<FloorSwitch>(switch).unwrap().state(),
        SwitchState::Pressed
    );

    sim.overlap_end(switch, walker);
    sim.tick(0.2);
    assert_eq!(
        sim.world.get::<FloorSwitch>(switch).unwrap().state(),
        SwitchState::Idle
    );

    let kinds = log.lock().unwrap().clone();
    assert!(kinds.contains(&SwitchEventKind::Pressed));
    assert!(kinds.contains(&SwitchEventKind::Idle));
}

#[test]
fn limited_switch_locks_after_last_press() {
    init_logger();
    let mut sim = Sim::new();

    let log: Arc<Mutex<Vec<SwitchEventKind>>> = Arc::new(Mutex::new(Vec::new()));
    let capture = log.clone();
    sim.world.add_observer(move |trigger: On<SwitchEvent>| {
        capture.lock().unwrap().push(trigger.event().kind);
    });

    let switch = sim
        .world
        .spawn(
            FloorSwitch::new(SwitchState::Idle)
                .with_transition_duration(0.0)
                .with_limited_presses(1),
        )
        .id();
    let walker = sim.world.spawn(()).id();

    sim.overlap_begin(switch, walker);
    sim.tick(0.1);
    assert_eq!(
        sim.world.get::<FloorSwitch>(switch).unwrap().state(),
        SwitchState::Locked
    );
    let kinds = log.lock().unwrap().clone();
    assert!(kinds.contains(&SwitchEventKind::Pressed));
    assert!(kinds.contains(&SwitchEventKind::Locked));

    // A second visitor finds a dead plate.
    sim.overlap_end(switch, walker);
    sim.overlap_begin(switch, walker);
    sim.tick(0.1);
    assert_eq!(
        sim.world.get::<FloorSwitch>(switch).unwrap().state(),
        SwitchState::Locked
    );

    // Until someone unlocks it from outside.
    sim.send_switch_command(switch, SwitchAction::IncreasePresses(1));
    sim.send_switch_command(switch, SwitchAction::Unlock(SwitchState::Idle));
    sim.tick(0.1);
    assert_eq!(
        sim.world.get::<FloorSwitch>(switch).unwrap().state(),
        SwitchState::Idle
    );
}

#[test]
fn platform_walks_spline_and_reports_arrivals() {
    init_logger();
    let mut sim = Sim::new();
    sim.insert_spline(
        "lift",
        Spline::new(
            vec![Vec3::ZERO, Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, 10.0, 10.0)],
            false,
        ),
    );

    let log: Arc<Mutex<Vec<PlatformEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let capture = log.clone();
    sim.world.add_observer(move |trigger: On<PlatformNotice>| {
        capture.lock().unwrap().push(trigger.event().kind);
    });

    let platform = sim
        .world
        .spawn((
            FloatingPlatform::new(
                PathWalker::new("lift", WalkMode::OneWay).with_wait_duration(1.0),
                5.0,
            ),
            Position::default(),
            Orientation::default(),
        ))
        .id();

    sim.send_platform_command(platform, PlatformAction::Start);
    // 10 units at speed 5: two seconds to the first stopover.
    for _ in 0..4 {
        sim.tick(0.5);
    }
    let events = log.lock().unwrap().clone();
    assert!(events.contains(&PlatformEvent::Started));
    assert!(events.contains(&PlatformEvent::ArrivedAtPoint(1)));
    assert!(events.contains(&PlatformEvent::WaitStarted));

    let pos = sim.world.get::<Position>(platform).unwrap().0;
    assert!((pos.y - 10.0).abs() < 1e-3);
}

#[test]
fn weapon_hit_damages_and_kills() {
    init_logger();
    let mut sim = Sim::new();

    let deaths: Arc<Mutex<Vec<bevy_ecs::entity::Entity>>> = Arc::new(Mutex::new(Vec::new()));
    let capture = deaths.clone();
    sim.world.add_observer(move |trigger: On<VitalsEvent>| {
        let event = trigger.event();
        if event.gauge == VitalKind::Health && event.change == GaugeEvent::Depleted {
            capture.lock().unwrap().push(event.entity);
        }
    });

    let target = sim.world.spawn(Vitals::new(40.0)).id();
    let mut weapon = Weapon::new(25.0, WeaponSlot::Right);
    weapon.enable_collision();
    let blade = sim.world.spawn(weapon).id();

    sim.overlap_begin(blade, target);
    sim.tick(0.1);
    assert_eq!(sim.world.get::<Vitals>(target).unwrap().health().value(), 15.0);

    sim.overlap_begin(blade, target);
    sim.tick(0.1);
    assert!(sim.world.get::<Vitals>(target).unwrap().is_dead());
    assert_eq!(deaths.lock().unwrap().as_slice(), &[target]);
}

#[test]
fn disabled_weapon_does_not_damage() {
    init_logger();
    let mut sim = Sim::new();
    let target = sim.world.spawn(Vitals::new(40.0)).id();
    let blade = sim.world.spawn(Weapon::new(25.0, WeaponSlot::Left)).id();

    sim.overlap_begin(blade, target);
    sim.tick(0.1);
    assert_eq!(sim.world.get::<Vitals>(target).unwrap().health().value(), 40.0);
}

#[test]
fn pickups_apply_and_despawn() {
    init_logger();
    let mut sim = Sim::new();

    let collected: Arc<Mutex<Vec<PickupKind>>> = Arc::new(Mutex::new(Vec::new()));
    let capture = collected.clone();
    sim.world.add_observer(move |trigger: On<PickupCollected>| {
        capture.lock().unwrap().push(trigger.event().kind);
    });

    let hero = sim
        .world
        .spawn((Vitals::new(100.0), Inventory::new()))
        .id();
    sim.deal_damage(hero, 50.0, None);

    let coin = sim
        .world
        .spawn((
            Pickup::new(PickupKind::Coin { value: 7 }),
            Position::default(),
            Orientation::default(),
        ))
        .id();
    let potion = sim
        .world
        .spawn((
            Pickup::new(PickupKind::Potion { heal: 30.0 }),
            Position::default(),
            Orientation::default(),
        ))
        .id();

    sim.overlap_begin(coin, hero);
    sim.overlap_begin(potion, hero);
    sim.tick(0.1);

    assert_eq!(sim.world.get::<Inventory>(hero).unwrap().coins(), 7);
    assert_eq!(sim.world.get::<Vitals>(hero).unwrap().health().value(), 80.0);
    assert!(sim.world.get_entity(coin).is_err());
    assert!(sim.world.get_entity(potion).is_err());
    assert_eq!(collected.lock().unwrap().len(), 2);
}

#[test]
fn stamina_regenerates_between_spends() {
    init_logger();
    let mut sim = Sim::new();
    let hero = sim
        .world
        .spawn(
            Vitals::new(100.0).with_stamina(
                Gauge::new(50.0)
                    .with_start_delay(0.0)
                    .with_auto_change(10.0, 1.0, false),
            ),
        )
        .id();

    sim.world
        .get_mut::<Vitals>(hero)
        .unwrap()
        .spend_stamina(30.0);
    assert_eq!(
        sim.world.get::<Vitals>(hero).unwrap().stamina().unwrap().value(),
        20.0
    );

    for _ in 0..3 {
        sim.tick(1.0);
    }
    assert_eq!(
        sim.world.get::<Vitals>(hero).unwrap().stamina().unwrap().value(),
        50.0
    );
}

#[test]
fn time_scale_slows_transitions() {
    init_logger();
    let mut sim = Sim::new();
    sim.world
        .resource_mut::<actionkit::resources::worldtime::WorldTime>()
        .time_scale = 0.5;

    let door = sim
        .world
        .spawn(Door::new(DoorState::Closed).with_transition_duration(1.0))
        .id();
    sim.send_door_command(door, DoorAction::Open);
    sim.tick(1.0);
    // Half-speed clock: one wall second covers half the transition.
    assert_eq!(
        sim.world.get::<Door>(door).unwrap().state(),
        DoorState::Transition
    );
    sim.tick(1.0);
    assert_eq!(
        sim.world.get::<Door>(door).unwrap().state(),
        DoorState::Opened
    );
}
