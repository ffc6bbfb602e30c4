//! Tests for the pack engine, alert propagation, role assignment and cleanup.

use std::f64::consts::PI;

use wolfpack_core::config::{SimConfig, Tuning};
use wolfpack_core::enums::*;
use wolfpack_core::events::PackEvent;
use wolfpack_core::geometry::Vec2;
use wolfpack_core::types::{AgentId, Obstacle, TargetSnapshot};

use crate::engine::Pack;

const DT: f64 = 0.1;

/// Pack whose idle agents never wander off on their own.
fn calm_pack() -> Pack {
    Pack::new(SimConfig {
        seed: 7,
        tuning: Tuning {
            idle_patrol_chance: 0.0,
            ..Default::default()
        },
    })
}

fn visible_at(x: f64, y: f64) -> TargetSnapshot {
    TargetSnapshot::new(Vec2::new(x, y), Vec2::ZERO, true)
}

fn hidden_far() -> TargetSnapshot {
    TargetSnapshot::new(Vec2::new(10_000.0, 10_000.0), Vec2::ZERO, false)
}

/// Target circling the origin, visible most of the time.
fn circling_target(tick: usize) -> TargetSnapshot {
    let t = tick as f64 * DT;
    TargetSnapshot::new(
        Vec2::new((t * 0.5).cos() * 350.0, (t * 0.5).sin() * 350.0),
        Vec2::new(-(t * 0.5).sin() * 175.0, (t * 0.5).cos() * 175.0),
        tick % 50 > 8,
    )
}

fn spawn_line(pack: &mut Pack, count: usize, spacing: f64) -> Vec<AgentId> {
    (0..count)
        .map(|i| pack.create_agent(Vec2::new(0.0, i as f64 * spacing), false))
        .collect()
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut pack_a = Pack::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut pack_b = Pack::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    for pack in [&mut pack_a, &mut pack_b] {
        pack.create_agent(Vec2::new(-300.0, 0.0), true);
        pack.create_agent(Vec2::new(300.0, 50.0), false);
        pack.create_agent(Vec2::new(0.0, -400.0), false);
        pack.create_agent(Vec2::new(100.0, 100.0), false);
    }
    let obstacles = [Obstacle::new(Vec2::new(120.0, 0.0), 30.0)];

    for tick in 0..300 {
        let target = circling_target(tick);
        pack_a.update(DT, &target, &obstacles);
        pack_b.update(DT, &target, &obstacles);

        let json_a = serde_json::to_string(&pack_a.snapshot()).unwrap();
        let json_b = serde_json::to_string(&pack_b.snapshot()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
        assert_eq!(pack_a.drain_events(), pack_b.drain_events());
    }
}

#[test]
fn test_determinism_different_seeds() {
    let tuning = Tuning {
        idle_patrol_chance: 0.5,
        ..Default::default()
    };
    let mut pack_a = Pack::new(SimConfig {
        seed: 111,
        tuning: tuning.clone(),
    });
    let mut pack_b = Pack::new(SimConfig { seed: 222, tuning });
    for pack in [&mut pack_a, &mut pack_b] {
        spawn_line(pack, 3, 500.0);
    }

    let mut diverged = false;
    for _ in 0..200 {
        pack_a.update(DT, &hidden_far(), &[]);
        pack_b.update(DT, &hidden_far(), &[]);
        let json_a = serde_json::to_string(&pack_a.snapshot()).unwrap();
        let json_b = serde_json::to_string(&pack_b.snapshot()).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce different patrols");
}

// ---- Lifecycle ----

#[test]
fn test_create_assigns_sequential_ids() {
    let mut pack = calm_pack();
    let ids = spawn_line(&mut pack, 3, 100.0);
    assert_eq!(ids, vec![AgentId(0), AgentId(1), AgentId(2)]);
    assert_eq!(pack.pack_size(), 3);
    assert_eq!(pack.state(AgentId(1)), BehaviorState::Idle);
    assert_eq!(pack.position(AgentId(2)), Vec2::new(0.0, 200.0));
    assert_eq!(pack.health(AgentId(0)), 100.0);
    assert!(pack.is_active(AgentId(0)));
}

#[test]
fn test_alpha_agent_profile() {
    let mut pack = calm_pack();
    let alpha = pack.create_agent(Vec2::ZERO, true);
    let standard = pack.create_agent(Vec2::new(900.0, 0.0), false);
    assert!(pack.is_alpha(alpha));
    assert!(!pack.is_alpha(standard));
    assert_eq!(pack.max_health(alpha), 150.0);
    assert_eq!(pack.health(alpha), 150.0);
    assert_eq!(pack.max_health(standard), 100.0);

    assert_eq!(pack.radius(standard), 20.0);
    assert!((pack.radius(alpha) - 24.0).abs() < 1e-9);
    let view = pack.agent(alpha).unwrap();
    assert_eq!(view.radius, pack.radius(alpha));
}

#[test]
fn test_remove_agent_keeps_other_ids() {
    let mut pack = calm_pack();
    spawn_line(&mut pack, 4, 100.0);
    assert!(pack.remove_agent(AgentId(1)));
    assert_eq!(pack.pack_size(), 3);
    assert_eq!(pack.agent_ids(), vec![AgentId(0), AgentId(2), AgentId(3)]);
    assert!(pack.agent(AgentId(1)).is_none());
    assert!(!pack.remove_agent(AgentId(1)), "second removal is a no-op");

    // New ids are never recycled.
    let fresh = pack.create_agent(Vec2::ZERO, false);
    assert_eq!(fresh, AgentId(4));

    let events = pack.drain_events();
    assert!(events.contains(&PackEvent::AgentRemoved { agent: AgentId(1) }));
}

#[test]
fn test_unknown_id_is_neutral() {
    let mut pack = calm_pack();
    spawn_line(&mut pack, 1, 0.0);
    let ghost = AgentId(99);

    assert_eq!(pack.position(ghost), Vec2::ZERO);
    assert_eq!(pack.velocity(ghost), Vec2::ZERO);
    assert_eq!(pack.facing(ghost), 0.0);
    assert_eq!(pack.health(ghost), 0.0);
    assert_eq!(pack.radius(ghost), 0.0);
    assert_eq!(pack.alert_level(ghost), 0.0);
    assert_eq!(pack.state(ghost), BehaviorState::Idle);
    assert_eq!(pack.role(ghost), PackRole::Unassigned);
    assert!(!pack.is_alpha(ghost));
    assert!(!pack.is_active(ghost));
    assert!(pack.last_seen_position(ghost).is_none());
    assert!(pack.cover_spots(ghost).is_empty());

    assert!(!pack.take_damage(ghost, 50.0));
    assert!(!pack.assign_patrol_route(ghost, vec![Vec2::ZERO]));
    assert!(pack.alert_pack_members(ghost, Vec2::ZERO).is_empty());
    pack.update_agent(ghost, DT, &visible_at(10.0, 0.0), &[]);

    assert_eq!(pack.pack_size(), 1);
    assert!(pack.drain_events().is_empty());
}

#[test]
fn test_empty_pack_update_is_noop() {
    let mut pack = calm_pack();
    pack.update(DT, &visible_at(0.0, 0.0), &[]);
    pack.coordinate();
    assert_eq!(pack.pack_size(), 0);
    assert!(pack.snapshot().agents.is_empty());
    assert!(pack.drain_events().is_empty());
    assert_eq!(pack.time().tick, 1);
}

#[test]
fn test_negative_dt_clamped() {
    let mut pack = calm_pack();
    let id = pack.create_agent(Vec2::ZERO, false);
    pack.update(DT, &visible_at(300.0, 0.0), &[]);
    assert_eq!(pack.state(id), BehaviorState::Hunt);

    let before = pack.position(id);
    pack.update(-1.0, &visible_at(300.0, 0.0), &[]);
    pack.update(f64::NAN, &visible_at(300.0, 0.0), &[]);
    assert_eq!(pack.position(id), before);
    assert!((pack.time().elapsed_secs - DT).abs() < 1e-12);
}

// ---- Damage and death ----

#[test]
fn test_damage_clamps_and_kills() {
    let mut pack = calm_pack();
    let id = pack.create_agent(Vec2::ZERO, false);

    assert!(!pack.take_damage(id, -25.0));
    assert_eq!(pack.health(id), 100.0);

    assert!(!pack.take_damage(id, 40.0));
    assert_eq!(pack.health(id), 60.0);

    assert!(pack.take_damage(id, 500.0));
    assert_eq!(pack.health(id), 0.0);
    assert!(!pack.is_active(id));
    assert_eq!(pack.pack_size(), 0);
    assert!(!pack.take_damage(id, 10.0), "dead agents cannot die twice");
}

#[test]
fn test_dead_agent_cleaned_up_next_update() {
    let mut pack = calm_pack();
    let ids = spawn_line(&mut pack, 2, 100.0);
    pack.take_damage(ids[0], 1_000.0);

    pack.update(DT, &hidden_far(), &[]);
    assert!(pack.agent(ids[0]).is_none());
    assert_eq!(pack.agent_ids(), vec![ids[1]]);

    let events = pack.drain_events();
    assert!(events.contains(&PackEvent::AgentDied { agent: ids[0] }));
}

#[test]
fn test_dead_agent_does_not_act_or_get_alerted() {
    let mut pack = calm_pack();
    let hunter = pack.create_agent(Vec2::ZERO, false);
    let corpse = pack.create_agent(Vec2::new(0.0, 50.0), false);
    pack.take_damage(corpse, 1_000.0);

    let alerted = pack.alert_pack_members(hunter, Vec2::new(300.0, 0.0));
    assert!(alerted.is_empty());
    assert_eq!(pack.state(corpse), BehaviorState::Idle);
}

// ---- Attacks ----

#[test]
fn test_attack_emits_event_with_damage() {
    let mut pack = calm_pack();
    let standard = pack.create_agent(Vec2::ZERO, false);
    let alpha = pack.create_agent(Vec2::new(0.0, 20.0), true);
    let target = visible_at(30.0, 10.0);

    pack.update(DT, &target, &[]);
    pack.update(DT, &target, &[]);

    let attacks: Vec<(AgentId, f64)> = pack
        .drain_events()
        .into_iter()
        .filter_map(|event| match event {
            PackEvent::Attack {
                agent,
                damage,
                target_position,
            } => {
                assert_eq!(target_position, target.position);
                Some((agent, damage))
            }
            _ => None,
        })
        .collect();

    assert!(attacks.contains(&(standard, 10.0)));
    assert!(attacks
        .iter()
        .any(|&(agent, damage)| agent == alpha && (damage - 12.0).abs() < 1e-9));
    assert_eq!(pack.velocity(standard), Vec2::ZERO);
}

// ---- Alerts ----

#[test]
fn test_alert_reaches_nearby_members_immediately() {
    let mut pack = calm_pack();
    let a = pack.create_agent(Vec2::new(0.0, 0.0), false);
    let b = pack.create_agent(Vec2::new(0.0, 80.0), false);
    let c = pack.create_agent(Vec2::new(0.0, -400.0), false);
    let d = pack.create_agent(Vec2::new(0.0, 900.0), false);

    let target = visible_at(300.0, 0.0);
    pack.update_agent(a, DT, &target, &[]);

    assert_eq!(pack.state(a), BehaviorState::Hunt);
    // Within half the communication range: straight to Hunt.
    assert_eq!(pack.state(b), BehaviorState::Hunt);
    assert_eq!(pack.last_seen_position(b), Some(target.position));
    assert_eq!(pack.alert_level(b), 2.0);
    // Within range but farther out: investigate.
    assert_eq!(pack.state(c), BehaviorState::Investigate);
    assert_eq!(pack.last_seen_position(c), Some(target.position));
    assert!(pack.alert_level(c) >= 1.0);
    // Out of range: untouched.
    assert_eq!(pack.state(d), BehaviorState::Idle);
    assert!(pack.last_seen_position(d).is_none());

    let events = pack.drain_events();
    assert!(events.iter().any(|event| matches!(
        event,
        PackEvent::PackAlerted { source, alerted, .. } if *source == a && alerted == &vec![b, c]
    )));
}

#[test]
fn test_alert_leaves_engaged_members_alone() {
    let mut pack = calm_pack();
    let a = pack.create_agent(Vec2::ZERO, false);
    let b = pack.create_agent(Vec2::new(0.0, 80.0), false);
    let target = visible_at(300.0, 0.0);
    pack.update_agent(a, DT, &target, &[]);
    assert_eq!(pack.state(b), BehaviorState::Hunt);

    let alerted = pack.alert_pack_members(a, Vec2::new(-500.0, -500.0));
    assert!(alerted.is_empty());
    assert_eq!(pack.last_seen_position(b), Some(target.position));
}

#[test]
fn test_dead_source_cannot_alert() {
    let mut pack = calm_pack();
    let source = pack.create_agent(Vec2::ZERO, false);
    let peer = pack.create_agent(Vec2::new(0.0, 80.0), false);
    assert!(pack.take_damage(source, 1_000.0));

    let alerted = pack.alert_pack_members(source, Vec2::new(300.0, 0.0));
    assert!(alerted.is_empty());
    assert_eq!(pack.state(peer), BehaviorState::Idle);
    assert!(pack.last_seen_position(peer).is_none());
    assert!(pack.drain_events().is_empty());
}

#[test]
fn test_alert_is_idempotent() {
    let mut pack = calm_pack();
    let a = pack.create_agent(Vec2::ZERO, false);
    let c = pack.create_agent(Vec2::new(0.0, -400.0), false);
    let pos = Vec2::new(100.0, 100.0);

    pack.alert_pack_members(a, pos);
    let first = pack.agent(c);
    pack.alert_pack_members(a, pos);
    assert_eq!(pack.agent(c), first);
}

// ---- Roles ----

#[test]
fn test_roles_with_four_engaged() {
    let mut pack = calm_pack();
    let ids = spawn_line(&mut pack, 4, 20.0);
    pack.update(DT, &visible_at(300.0, 0.0), &[]);

    assert_eq!(pack.role(ids[0]), PackRole::Hunter);
    assert_eq!(pack.role(ids[1]), PackRole::Flanker(FlankSide::Left));
    assert_eq!(pack.role(ids[2]), PackRole::Flanker(FlankSide::Right));
    assert_eq!(pack.role(ids[3]), PackRole::Tracker);

    assert_eq!(pack.state(ids[0]), BehaviorState::Hunt);
    assert_eq!(pack.state(ids[1]), BehaviorState::Flank);
    assert_eq!(pack.state(ids[2]), BehaviorState::Flank);
    assert_eq!(pack.state(ids[3]), BehaviorState::Hunt);

    let events = pack.drain_events();
    let expected = vec![
        (ids[0], PackRole::Hunter),
        (ids[1], PackRole::Flanker(FlankSide::Left)),
        (ids[2], PackRole::Flanker(FlankSide::Right)),
        (ids[3], PackRole::Tracker),
    ];
    assert!(events.contains(&PackEvent::RolesAssigned { roles: expected }));
}

#[test]
fn test_coordinate_is_idempotent() {
    let mut pack = calm_pack();
    let ids = spawn_line(&mut pack, 4, 20.0);
    pack.update(DT, &visible_at(300.0, 0.0), &[]);
    pack.drain_events();

    let before = pack.snapshot().agents;
    pack.coordinate();
    pack.coordinate();
    assert_eq!(pack.snapshot().agents, before);
    assert!(pack.drain_events().is_empty());
    assert_eq!(pack.role(ids[3]), PackRole::Tracker);
}

#[test]
fn test_steady_ticks_do_not_reassign_roles() {
    let mut pack = calm_pack();
    let ids = spawn_line(&mut pack, 4, 20.0);
    let target = visible_at(300.0, 0.0);
    pack.update(DT, &target, &[]);
    pack.drain_events();

    for _ in 0..3 {
        pack.update(DT, &target, &[]);
        let reassigned = pack
            .drain_events()
            .iter()
            .any(|event| matches!(event, PackEvent::RolesAssigned { .. }));
        assert!(!reassigned);
    }
    assert_eq!(pack.role(ids[1]), PackRole::Flanker(FlankSide::Left));
    assert_eq!(pack.state(ids[1]), BehaviorState::Flank);
}

#[test]
fn test_removing_flanker_reassigns_roles() {
    let mut pack = calm_pack();
    let ids = spawn_line(&mut pack, 4, 20.0);
    pack.update(DT, &visible_at(300.0, 0.0), &[]);
    pack.drain_events();

    assert!(pack.remove_agent(ids[1]));
    assert_eq!(pack.pack_size(), 3);
    assert_eq!(pack.role(ids[1]), PackRole::Unassigned);

    assert_eq!(pack.role(ids[0]), PackRole::Hunter);
    assert_eq!(pack.role(ids[2]), PackRole::Flanker(FlankSide::Left));
    assert_eq!(pack.role(ids[3]), PackRole::Flanker(FlankSide::Right));
    assert_eq!(pack.state(ids[3]), BehaviorState::Flank);

    for event in pack.drain_events() {
        if let PackEvent::RolesAssigned { roles } = event {
            assert!(roles.iter().all(|(id, _)| *id != ids[1]));
        }
    }
}

#[test]
fn test_removed_agent_absent_from_next_tick() {
    let mut pack = calm_pack();
    let ids = spawn_line(&mut pack, 3, 20.0);
    let target = visible_at(300.0, 0.0);
    pack.update(DT, &target, &[]);
    assert_eq!(pack.role(ids[1]), PackRole::Flanker(FlankSide::Left));

    let size_before = pack.pack_size();
    assert!(pack.remove_agent(ids[1]));
    pack.drain_events();

    pack.update(DT, &target, &[]);
    assert_eq!(pack.pack_size(), size_before - 1);
    assert_eq!(pack.agent_ids(), vec![ids[0], ids[2]]);

    for event in pack.drain_events() {
        match event {
            PackEvent::RolesAssigned { roles } => {
                assert!(roles.iter().all(|(id, _)| *id != ids[1]));
            }
            PackEvent::PackAlerted {
                source, alerted, ..
            } => {
                assert_ne!(source, ids[1]);
                assert!(!alerted.contains(&ids[1]));
            }
            PackEvent::StateChanged { agent, .. } | PackEvent::Attack { agent, .. } => {
                assert_ne!(agent, ids[1]);
            }
            _ => {}
        }
    }

    assert_eq!(pack.role(ids[0]), PackRole::Hunter);
    assert_eq!(pack.role(ids[2]), PackRole::Flanker(FlankSide::Left));
}

#[test]
fn test_disengaged_agents_lose_roles() {
    let mut pack = calm_pack();
    let ids = spawn_line(&mut pack, 3, 20.0);
    pack.update(DT, &visible_at(300.0, 0.0), &[]);

    // Target vanishes: hunters fall back to investigating.
    let mut gone = visible_at(300.0, 0.0);
    gone.visible = false;
    pack.update(DT, &gone, &[]);

    for &id in &ids {
        let state = pack.state(id);
        if !state.is_engaged() {
            assert_eq!(pack.role(id), PackRole::Unassigned, "agent {id} in {state:?}");
        }
    }
    assert_eq!(pack.state(ids[0]), BehaviorState::Investigate);
}

// ---- Patrol ----

#[test]
fn test_pinned_patrol_route() {
    let mut pack = calm_pack();
    let id = pack.create_agent(Vec2::ZERO, false);
    assert!(!pack.assign_patrol_route(id, Vec::new()));
    assert_eq!(pack.state(id), BehaviorState::Idle);

    let route = vec![Vec2::new(200.0, 0.0), Vec2::new(200.0, 200.0)];
    assert!(pack.assign_patrol_route(id, route));
    assert_eq!(pack.state(id), BehaviorState::Patrol);
    assert!(pack.drain_events().contains(&PackEvent::StateChanged {
        agent: id,
        from: BehaviorState::Idle,
        to: BehaviorState::Patrol,
    }));

    for _ in 0..10 {
        pack.update(DT, &hidden_far(), &[]);
    }
    let pos = pack.position(id);
    assert!(pos.x > 50.0 && pos.y.abs() < 1e-9, "walking toward first waypoint");
}

// ---- Long-running invariants ----

#[test]
fn test_invariants_over_long_hunt() {
    let mut pack = Pack::new(SimConfig::default());
    pack.create_agent(Vec2::new(-200.0, 0.0), true);
    pack.create_agent(Vec2::new(200.0, 0.0), false);
    pack.create_agent(Vec2::new(0.0, 200.0), false);
    pack.create_agent(Vec2::new(0.0, -200.0), false);
    pack.create_agent(Vec2::new(400.0, 400.0), false);
    let obstacles = [
        Obstacle::new(Vec2::new(100.0, 100.0), 25.0),
        Obstacle::new(Vec2::new(-150.0, 50.0), 40.0),
    ];

    for tick in 0..2000 {
        pack.update(DT, &circling_target(tick), &obstacles);
        for view in pack.snapshot().agents {
            assert!(view.facing > -PI && view.facing <= PI);
            assert!((0.0..=2.0).contains(&view.alert_level));
            assert!(view.position.is_finite());
            if !view.state.is_engaged() {
                assert_eq!(view.role, PackRole::Unassigned);
            }
        }
        let live = pack.agent_ids();
        for event in pack.drain_events() {
            if let PackEvent::RolesAssigned { roles } = event {
                let flankers = roles
                    .iter()
                    .filter(|(_, role)| role.flank_side().is_some())
                    .count();
                assert!(flankers <= 2);
                assert!(roles.iter().all(|(id, _)| live.contains(id)));
            }
        }
    }
    assert_eq!(pack.pack_size(), 5);
    assert_eq!(pack.time().tick, 2000);
}

#[test]
fn test_pack_from_toml_config() {
    let config = SimConfig::from_toml_str(
        r#"
        seed = 9

        [tuning]
        sight_range = 250.0
        "#,
    )
    .unwrap();
    let mut pack = Pack::new(config);
    let id = pack.create_agent(Vec2::ZERO, false);
    assert_eq!(pack.tuning().sight_range, 250.0);

    // Beyond the shortened sight range.
    pack.update(DT, &visible_at(300.0, 0.0), &[]);
    assert_ne!(pack.state(id), BehaviorState::Hunt);
}
