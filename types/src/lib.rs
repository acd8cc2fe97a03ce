//! Shared configuration types for resonator
//!
//! This crate contains serializable configuration values that are shared between
//! the combat core and every front end that edits or displays them.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Serde Defaults
// ─────────────────────────────────────────────────────────────────────────────

fn default_true() -> bool {
    true
}

fn default_resonance_key() -> String {
    "e".to_string()
}

fn default_echo_key() -> String {
    "q".to_string()
}

fn default_liberation_key() -> String {
    "r".to_string()
}

fn default_dodge_key() -> String {
    "lshift".to_string()
}

fn default_jump_key() -> String {
    "space".to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Combat Settings
// ─────────────────────────────────────────────────────────────────────────────

/// User-facing toggles for the auto combat task.
///
/// All fields are read-only inputs to the combat controller; it never writes
/// back into the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatConfig {
    /// Turn off to fight only when an enemy was targeted manually
    #[serde(default = "default_true")]
    pub auto_target: bool,

    /// Turn off to skip Liberation in the open world
    #[serde(default = "default_true")]
    pub use_liberation: bool,

    /// Toggle the levitator and verify the character is floating
    #[serde(default = "default_true")]
    pub check_levitator: bool,

    /// Play back `rotation` instead of the heuristic action loop
    #[serde(default)]
    pub rotation_mode: bool,

    /// Rotation script, e.g. `1 e q lib 2 e a:1.2 lib 3 e ha:0.8 lib`
    #[serde(default)]
    pub rotation: String,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            auto_target: true,
            use_liberation: true,
            check_levitator: true,
            rotation_mode: false,
            rotation: String::new(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Key Bindings
// ─────────────────────────────────────────────────────────────────────────────

/// Named in-game actions that carry a configurable key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundAction {
    Resonance,
    Echo,
    Liberation,
    Dodge,
    Jump,
}

impl BoundAction {
    pub const ALL: [BoundAction; 5] = [
        BoundAction::Resonance,
        BoundAction::Echo,
        BoundAction::Liberation,
        BoundAction::Dodge,
        BoundAction::Jump,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BoundAction::Resonance => "resonance",
            BoundAction::Echo => "echo",
            BoundAction::Liberation => "liberation",
            BoundAction::Dodge => "dodge",
            BoundAction::Jump => "jump",
        }
    }

    /// Look up an action by its label (case-insensitive).
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.label().eq_ignore_ascii_case(label))
    }
}

/// Key bindings the host resolves ability keys from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyConfig {
    #[serde(default = "default_resonance_key")]
    pub resonance_key: String,
    #[serde(default = "default_echo_key")]
    pub echo_key: String,
    #[serde(default = "default_liberation_key")]
    pub liberation_key: String,
    #[serde(default = "default_dodge_key")]
    pub dodge_key: String,
    #[serde(default = "default_jump_key")]
    pub jump_key: String,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            resonance_key: default_resonance_key(),
            echo_key: default_echo_key(),
            liberation_key: default_liberation_key(),
            dodge_key: default_dodge_key(),
            jump_key: default_jump_key(),
        }
    }
}

impl KeyConfig {
    pub fn key(&self, action: BoundAction) -> &str {
        match action {
            BoundAction::Resonance => &self.resonance_key,
            BoundAction::Echo => &self.echo_key,
            BoundAction::Liberation => &self.liberation_key,
            BoundAction::Dodge => &self.dodge_key,
            BoundAction::Jump => &self.jump_key,
        }
    }

    pub fn set_key(&mut self, action: BoundAction, key: impl Into<String>) {
        let slot = match action {
            BoundAction::Resonance => &mut self.resonance_key,
            BoundAction::Echo => &mut self.echo_key,
            BoundAction::Liberation => &mut self.liberation_key,
            BoundAction::Dodge => &mut self.dodge_key,
            BoundAction::Jump => &mut self.jump_key,
        };
        *slot = key.into();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Application Config
// ─────────────────────────────────────────────────────────────────────────────

/// Persisted application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub combat: CombatConfig,
    #[serde(default)]
    pub keys: KeyConfig,
}
