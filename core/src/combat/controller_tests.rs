//! Tests for CombatController mode selection and loop termination

use std::time::Duration;

use resonator_types::CombatConfig;

use crate::host::Interrupt;
use crate::host::mock::{HostAction, Liveness, MockHost};

use super::{CombatController, CombatState, EndReason, HeuristicKind, Mode, RotationCache};

fn rotation_config(rotation: &str) -> CombatConfig {
    CombatConfig {
        rotation_mode: true,
        rotation: rotation.to_string(),
        ..CombatConfig::default()
    }
}

#[test]
fn entry_guard_blocks_run() {
    let mut host = MockHost::new(Liveness::Forever);
    host.team_and_world = false;
    let mut controller = CombatController::new(host);

    let report = controller.run(&rotation_config("1 e"));

    assert!(!report.engaged);
    assert_eq!(report.cycles, 0);
    assert_eq!(report.mode, None);
    assert_eq!(controller.state(), CombatState::OutOfCombat);
    assert!(controller.host().actions.is_empty());
    assert!(controller.executor().is_none());
}

#[test]
fn no_combat_means_no_cleanup() {
    let mut controller = CombatController::new(MockHost::new(Liveness::Checks(0)));

    let report = controller.run(&CombatConfig::default());

    assert!(!report.engaged);
    assert_eq!(report.end, None);
    assert_eq!(controller.state(), CombatState::OutOfCombat);
    assert_eq!(controller.host().count(&HostAction::CombatEnd), 0);
    assert!(controller.host().states.is_empty());
}

#[test]
fn rotation_mode_loops_until_combat_ends() {
    // Each cycle of "1 e" takes 150ms (swap) + 2 frames of 16ms
    let host = MockHost::new(Liveness::Until(Duration::from_millis(500)));
    let mut controller = CombatController::new(host);

    let report = controller.run(&rotation_config("1 e"));

    assert!(report.engaged);
    assert_eq!(report.cycles, 3);
    assert_eq!(report.mode, Some(Mode::Rotation));
    assert_eq!(report.end, Some(EndReason::NormalExit));
    assert_eq!(controller.state(), CombatState::Ended(EndReason::NormalExit));

    let host = controller.host();
    assert_eq!(
        host.states,
        vec![
            CombatState::Running(Mode::Rotation),
            CombatState::Ended(EndReason::NormalExit),
        ]
    );
    assert_eq!(host.keys_pressed(), vec!["1", "e", "1", "e", "1"]);
    assert_eq!(host.count(&HostAction::CombatEnd), 1);
    assert_eq!(host.count(&HostAction::Perform), 0);
}

#[test]
fn unchanged_rotation_is_not_reparsed() {
    let mut controller = CombatController::new(MockHost::new(Liveness::Checks(0)));

    assert_eq!(controller.prepare_rotation("1 e"), RotationCache::Rebuilt);
    assert_eq!(controller.prepare_rotation("1 e"), RotationCache::Reused);

    controller.run(&rotation_config("1 e"));
    assert_eq!(controller.prepare_rotation("1 e"), RotationCache::Reused);

    assert_eq!(controller.prepare_rotation("2 q"), RotationCache::Rebuilt);
    let executor = controller.executor().unwrap();
    assert_eq!(executor.source(), "2 q");
    assert_eq!(executor.rotation().len(), 2);
}

#[test]
fn changed_config_rebuilds_executor_on_next_run() {
    let mut controller = CombatController::new(MockHost::new(Liveness::Checks(1)));
    controller.run(&rotation_config("1 e"));
    assert_eq!(controller.executor().unwrap().source(), "1 e");

    controller.host_mut().liveness = Liveness::Checks(0);
    controller.run(&rotation_config("3 lib"));
    assert_eq!(controller.executor().unwrap().source(), "3 lib");
}

#[test]
fn empty_rotation_falls_back_to_heuristic() {
    let host = MockHost::new(Liveness::Until(Duration::from_millis(250)));
    let mut controller = CombatController::new(host);

    let report = controller.run(&rotation_config(""));

    assert_eq!(report.mode, Some(Mode::Heuristic(HeuristicKind::Character)));
    assert_eq!(report.cycles, 3);
    assert_eq!(controller.host().count(&HostAction::Perform), 3);
    assert!(controller.executor().is_none());
}

#[test]
fn rotation_without_valid_steps_falls_back_to_heuristic() {
    let mut controller = CombatController::new(MockHost::new(Liveness::Checks(1)));

    let report = controller.run(&rotation_config("zz a:abc"));

    assert_eq!(report.mode, Some(Mode::Heuristic(HeuristicKind::Character)));
    assert_eq!(controller.host().count(&HostAction::Perform), 1);
}

#[test]
fn heuristic_mode_when_rotation_disabled() {
    let mut controller = CombatController::new(MockHost::new(Liveness::Checks(2)));
    let config = CombatConfig {
        rotation_mode: false,
        rotation: "1 e".to_string(),
        ..CombatConfig::default()
    };

    let report = controller.run(&config);

    assert_eq!(report.mode, Some(Mode::Heuristic(HeuristicKind::Character)));
    assert_eq!(controller.host().count(&HostAction::Perform), 2);
    assert!(controller.host().keys_pressed().is_empty());
}

#[test]
fn character_death_stops_immediately() {
    let mut host = MockHost::new(Liveness::Forever);
    host.perform_results.push_back(Ok(()));
    host.perform_results.push_back(Err(Interrupt::CharacterDead));
    let mut controller = CombatController::new(host);

    let report = controller.run(&CombatConfig::default());

    assert_eq!(report.cycles, 2);
    assert_eq!(report.end, Some(EndReason::CharacterDead));
    assert_eq!(controller.state(), CombatState::Ended(EndReason::CharacterDead));

    let host = controller.host();
    assert_eq!(host.count(&HostAction::Perform), 2);
    assert_eq!(host.count(&HostAction::Notify("Characters dead".to_string())), 1);
    assert_eq!(host.count(&HostAction::CombatEnd), 1);
    assert_eq!(
        host.states.last(),
        Some(&CombatState::Ended(EndReason::CharacterDead))
    );
}

#[test]
fn leaving_combat_mid_rotation_is_normal_exit() {
    let mut host = MockHost::new(Liveness::Forever);
    host.frame_results
        .push_back(Err(Interrupt::left_combat("no enemies")));
    let mut controller = CombatController::new(host);

    let report = controller.run(&rotation_config("1 e q"));

    assert_eq!(report.cycles, 1);
    assert_eq!(report.end, Some(EndReason::NormalExit));
    let host = controller.host();
    assert_eq!(host.keys_pressed(), vec!["1"]);
    assert!(
        !host
            .actions
            .iter()
            .any(|a| matches!(a, HostAction::Notify(_)))
    );
    assert_eq!(host.count(&HostAction::CombatEnd), 1);
}

#[test]
fn liberation_toggle_only_applies_in_open_world() {
    let config = CombatConfig {
        use_liberation: false,
        ..CombatConfig::default()
    };

    let mut controller = CombatController::new(MockHost::new(Liveness::Checks(1)));
    controller.run(&config);
    assert!(!controller.host().policies[0].use_liberation);

    let mut host = MockHost::new(Liveness::Checks(1));
    host.world = false;
    let mut controller = CombatController::new(host);
    controller.run(&config);
    assert!(controller.host().policies[0].use_liberation);
    assert!(controller.host().policies[0].auto_target);
}

#[test]
fn illusive_realm_uses_alternation() {
    let mut host = MockHost::new(Liveness::Checks(3));
    host.realm = true;
    let mut controller = CombatController::new(host);

    let report = controller.run(&CombatConfig::default());

    assert_eq!(report.mode, Some(Mode::Heuristic(HeuristicKind::IllusiveRealm)));
    assert_eq!(report.cycles, 3);
    let host = controller.host();
    assert_eq!(host.count(&HostAction::Perform), 0);
    assert_eq!(
        host.actions[0],
        HostAction::WaitAnimation {
            key: "4".to_string(),
            enter_wait: Some(Duration::from_millis(200)),
        }
    );
}

#[test]
fn rotation_mode_takes_priority_over_realm() {
    let mut host = MockHost::new(Liveness::Checks(2));
    host.realm = true;
    let mut controller = CombatController::new(host);

    let report = controller.run(&rotation_config("e"));

    assert_eq!(report.mode, Some(Mode::Rotation));
    assert_eq!(controller.host().keys_pressed(), vec!["e"]);
}
