//! Combat control loop
//!
//! The controller lifecycle:
//! - OutOfCombat: waiting for an encounter (or the entry guard failed)
//! - Running: looping cycles in rotation or heuristic mode
//! - Ended: the loop stopped, either normally or because the team died
//!
//! Each cycle reports a [`CycleOutcome`]; the controller matches it to decide
//! whether to keep looping.

mod controller;
mod heuristic;

#[cfg(test)]
mod controller_tests;

pub use controller::{CombatController, RotationCache};
pub use heuristic::{REALM_CYCLE_DELAY, REALM_SPECIAL_EVERY, RealmAlternation};

use std::time::Duration;

use serde::Serialize;

use crate::host::{HostResult, Interrupt};

/// Policy flags handed to the heuristic action step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CombatPolicy {
    pub auto_target: bool,
    pub use_liberation: bool,
}

/// How the controller picks actions for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Replay the configured rotation script
    Rotation,
    /// Heuristic action selection
    Heuristic(HeuristicKind),
}

/// Heuristic sub-mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicKind {
    /// Delegate to the current character's own action priority
    Character,
    /// Click / ability alternation used inside the illusive realm
    IllusiveRealm,
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// Combat ended. Expected, not a failure.
    NormalExit,
    /// Every character died. Fatal for the run.
    CharacterDead,
}

/// Controller lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatState {
    #[default]
    OutOfCombat,
    Running(Mode),
    Ended(EndReason),
}

/// Result of one loop cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    Continue,
    NormalExit { reason: String },
    FatalDeath,
}

impl From<HostResult> for CycleOutcome {
    fn from(result: HostResult) -> Self {
        match result {
            Ok(()) => CycleOutcome::Continue,
            Err(Interrupt::LeftCombat { reason }) => CycleOutcome::NormalExit { reason },
            Err(Interrupt::CharacterDead) => CycleOutcome::FatalDeath,
        }
    }
}

/// Summary of one controller run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// At least one cycle executed
    pub engaged: bool,
    pub cycles: u32,
    pub mode: Option<Mode>,
    pub end: Option<EndReason>,
    pub elapsed: Duration,
}

impl RunReport {
    /// Report for a run that did nothing.
    pub fn idle() -> Self {
        Self {
            engaged: false,
            cycles: 0,
            mode: None,
            end: None,
            elapsed: Duration::ZERO,
        }
    }
}
