//! Typed rotation instructions.

use std::fmt;
use std::time::Duration;

use phf::phf_map;
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════
// Action Kinds
// ═══════════════════════════════════════════════════════════════════════════

/// Every instruction a rotation can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Swap to character slot 1, 2 or 3
    Switch,
    /// Resonance skill
    Resonance,
    /// Echo skill
    Echo,
    /// Resonance liberation
    Liberation,
    /// Basic attack (repeated click)
    Attack,
    /// Heavy attack (mouse hold)
    Heavy,
    Dodge,
    Jump,
}

impl Action {
    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Switch => "switch",
            Action::Resonance => "resonance",
            Action::Echo => "echo",
            Action::Liberation => "liberation",
            Action::Attack => "attack",
            Action::Heavy => "heavy",
            Action::Dodge => "dodge",
            Action::Jump => "jump",
        }
    }

    /// Resolve a lowercase alias to its action. Slot digits are not aliases.
    pub fn from_alias(alias: &str) -> Option<Self> {
        ACTION_ALIASES.get(alias).copied()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lowercase script tokens and the action each one stands for.
pub static ACTION_ALIASES: phf::Map<&'static str, Action> = phf_map! {
    "e" => Action::Resonance,
    "q" => Action::Echo,
    "echo" => Action::Echo,
    "lib" => Action::Liberation,
    "a" => Action::Attack,
    "ba" => Action::Attack,
    "ha" => Action::Heavy,
    "dodge" => Action::Dodge,
    "jump" => Action::Jump,
};

// ═══════════════════════════════════════════════════════════════════════════
// Steps
// ═══════════════════════════════════════════════════════════════════════════

/// Character slot targeted by a switch step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Slot(u8);

impl Slot {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 3;

    pub fn new(slot: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&slot).then_some(Self(slot))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Key that selects this slot in game.
    pub fn key(self) -> String {
        self.0.to_string()
    }
}

/// One parsed rotation instruction.
///
/// Steps are immutable once built. The duration is held in seconds and is
/// never negative; zero means the action's built-in default applies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RotationStep {
    action: Action,
    slot: Option<Slot>,
    duration_secs: f64,
}

impl RotationStep {
    /// Build a step. Negative, non-finite or unrepresentable durations
    /// become zero.
    pub fn new(action: Action, duration_secs: f64) -> Self {
        Self {
            action,
            slot: None,
            duration_secs: clamp_secs(duration_secs),
        }
    }

    pub fn switch(slot: Slot, duration_secs: f64) -> Self {
        Self {
            action: Action::Switch,
            slot: Some(slot),
            duration_secs: clamp_secs(duration_secs),
        }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    /// Target slot, only set for [`Action::Switch`].
    pub fn slot(&self) -> Option<Slot> {
        self.slot
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.duration_secs).unwrap_or_default()
    }

    pub fn has_duration(&self) -> bool {
        self.duration_secs > 0.0
    }

    /// The explicit duration, or `default` when none was given.
    pub fn duration_or(&self, default: Duration) -> Duration {
        if self.has_duration() {
            self.duration()
        } else {
            default
        }
    }
}

fn clamp_secs(secs: f64) -> f64 {
    if secs > 0.0 && Duration::try_from_secs_f64(secs).is_ok() {
        secs
    } else {
        0.0
    }
}

impl fmt::Display for RotationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step({}", self.action)?;
        if let Some(slot) = self.slot {
            write!(f, " {}", slot.get())?;
        }
        if self.has_duration() {
            write!(f, " {}s", self.duration_secs)?;
        }
        f.write_str(")")
    }
}
