//! Host interface consumed by the combat core.
//!
//! The core never touches the game directly. Scene detection, input delivery
//! and the heuristic ability logic all live behind these traits:
//!
//! - **CombatHost**: liveness, frame yield, timed waits and raw input. This is
//!   all the rotation executor needs.
//! - **SessionHost**: session/world predicates and the heuristic action step,
//!   used by the combat controller.

use std::fmt;
use std::time::{Duration, Instant};

use resonator_types::{BoundAction, KeyConfig};

use crate::combat::{CombatPolicy, CombatState};

#[cfg(test)]
pub(crate) mod mock;

// ═══════════════════════════════════════════════════════════════════════════
// Loop Signals
// ═══════════════════════════════════════════════════════════════════════════

/// Signal raised by a host call that ends the current combat loop.
///
/// Not an error type: leaving combat is the normal way a run ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interrupt {
    /// The encounter ended while an action was in progress
    LeftCombat { reason: String },
    /// Every character in the team is down
    CharacterDead,
}

impl Interrupt {
    pub fn left_combat(reason: impl Into<String>) -> Self {
        Interrupt::LeftCombat {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Interrupt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interrupt::LeftCombat { reason } => write!(f, "left combat: {reason}"),
            Interrupt::CharacterDead => f.write_str("characters dead"),
        }
    }
}

/// Result of a host call that may end the combat loop.
pub type HostResult<T = ()> = Result<T, Interrupt>;

// ═══════════════════════════════════════════════════════════════════════════
// Host Traits
// ═══════════════════════════════════════════════════════════════════════════

/// Ability categories the heuristic can query for availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ability {
    Resonance,
    Echo,
    Liberation,
}

/// Primitive actions and liveness checks needed to play a rotation.
pub trait CombatHost {
    /// Whether the encounter is still active. Re-evaluated at every step
    /// boundary and inside the attack loop.
    fn in_combat(&mut self) -> bool;

    /// Yield one frame so externally observed state can refresh.
    fn next_frame(&mut self) -> HostResult;

    /// Block for `duration`.
    fn sleep(&mut self, duration: Duration) -> HostResult;

    /// Clock used to measure timed actions.
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn send_key(&mut self, key: &str);
    fn click(&mut self);
    fn mouse_down(&mut self);
    fn mouse_up(&mut self);

    /// Configured key bindings.
    fn key_config(&self) -> &KeyConfig;

    /// Key for the current character's resonance skill.
    fn resonance_key(&self) -> String {
        self.key_config().key(BoundAction::Resonance).to_string()
    }

    /// Key for the current character's echo.
    fn echo_key(&self) -> String {
        self.key_config().key(BoundAction::Echo).to_string()
    }

    /// Key for the current character's liberation.
    fn liberation_key(&self) -> String {
        self.key_config().key(BoundAction::Liberation).to_string()
    }
}

/// Session predicates and heuristic combat actions used by the controller.
pub trait SessionHost: CombatHost {
    /// Entry guard: a full team is loaded and the world scene is active.
    fn in_team_and_world(&mut self) -> bool;

    /// Whether a team is present.
    fn in_team(&mut self) -> bool;

    /// Whether the character is in open world play.
    fn in_world(&mut self) -> bool;

    fn in_illusive_realm(&mut self) -> bool;

    /// One heuristic action step for the current character.
    fn perform(&mut self, policy: &CombatPolicy) -> HostResult;

    fn available(&mut self, ability: Ability) -> bool;

    /// Whether the concerto resource gauge is full.
    fn is_concerto_full(&mut self) -> bool;

    /// Press `key` and wait until its animation finishes. `enter_wait`
    /// overrides how long to wait for the animation to begin.
    fn send_key_and_wait_animation(&mut self, key: &str, enter_wait: Option<Duration>)
    -> HostResult;

    /// Cleanup hook run once after a run that executed at least one cycle.
    fn combat_end(&mut self);

    /// Surface an error to the user.
    fn notify_error(&mut self, message: &str);

    /// Called on every controller state transition, including entering
    /// [`CombatState::Running`] before the first cycle.
    fn state_changed(&mut self, _state: CombatState) {}
}
