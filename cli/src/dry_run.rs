//! Dry-run host for simulating combat without a game client.
//!
//! Time is virtual: waits and frames advance an internal clock instead of
//! blocking, so a long encounter simulates instantly.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use resonator_core::{
    Ability, CombatHost, CombatPolicy, CombatState, HostResult, Interrupt, KeyConfig,
    SessionHost,
};
use serde_json::json;

const FRAME_TIME: Duration = Duration::from_millis(16);
const PERFORM_TIME: Duration = Duration::from_millis(100);
const ANIMATION_TIME: Duration = Duration::from_millis(500);

/// How the simulated encounter plays out.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Virtual time until the encounter ends
    pub combat_length: Duration,
    /// Virtual time at which the whole team dies
    pub death_at: Option<Duration>,
    pub open_world: bool,
    pub illusive_realm: bool,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            combat_length: Duration::from_secs(5),
            death_at: None,
            open_world: false,
            illusive_realm: false,
        }
    }
}

/// Counts of every input the simulated game received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub keys: BTreeMap<String, u32>,
    pub clicks: u32,
    pub mouse_downs: u32,
    pub mouse_ups: u32,
    pub frames: u32,
    pub performs: u32,
    pub combat_ends: u32,
    pub errors: Vec<String>,
}

impl Tally {
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "keys": self.keys,
            "clicks": self.clicks,
            "mouse_downs": self.mouse_downs,
            "mouse_ups": self.mouse_ups,
            "frames": self.frames,
            "performs": self.performs,
            "combat_ends": self.combat_ends,
            "errors": self.errors,
        })
    }
}

pub struct DryRunHost {
    scenario: Scenario,
    keys: KeyConfig,
    epoch: Instant,
    elapsed: Duration,
    ability_checks: u32,
    pub tally: Tally,
}

impl DryRunHost {
    pub fn new(scenario: Scenario, keys: KeyConfig) -> Self {
        Self {
            scenario,
            keys,
            epoch: Instant::now(),
            elapsed: Duration::ZERO,
            ability_checks: 0,
            tally: Tally::default(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    fn advance(&mut self, duration: Duration) -> HostResult {
        self.elapsed += duration;
        match self.scenario.death_at {
            Some(death) if self.elapsed >= death => Err(Interrupt::CharacterDead),
            _ => Ok(()),
        }
    }

    fn press(&mut self, key: &str) {
        tracing::trace!(key, elapsed_ms = self.elapsed.as_millis() as u64, "key");
        *self.tally.keys.entry(key.to_string()).or_default() += 1;
    }
}

impl CombatHost for DryRunHost {
    fn in_combat(&mut self) -> bool {
        self.elapsed < self.scenario.combat_length
    }

    fn next_frame(&mut self) -> HostResult {
        self.tally.frames += 1;
        self.advance(FRAME_TIME)
    }

    fn sleep(&mut self, duration: Duration) -> HostResult {
        self.advance(duration)
    }

    fn now(&self) -> Instant {
        self.epoch + self.elapsed
    }

    fn send_key(&mut self, key: &str) {
        self.press(key);
    }

    fn click(&mut self) {
        self.tally.clicks += 1;
    }

    fn mouse_down(&mut self) {
        self.tally.mouse_downs += 1;
    }

    fn mouse_up(&mut self) {
        self.tally.mouse_ups += 1;
    }

    fn key_config(&self) -> &KeyConfig {
        &self.keys
    }
}

impl SessionHost for DryRunHost {
    fn in_team_and_world(&mut self) -> bool {
        true
    }

    fn in_team(&mut self) -> bool {
        true
    }

    fn in_world(&mut self) -> bool {
        self.scenario.open_world
    }

    fn in_illusive_realm(&mut self) -> bool {
        self.scenario.illusive_realm
    }

    /// Stand-in character logic: basic attack, liberation every tenth call
    /// when the policy allows it.
    fn perform(&mut self, policy: &CombatPolicy) -> HostResult {
        self.tally.performs += 1;
        if policy.use_liberation && self.tally.performs % 10 == 0 {
            let key = self.liberation_key();
            self.press(&key);
            return self.advance(ANIMATION_TIME);
        }
        self.click();
        self.advance(PERFORM_TIME)
    }

    fn available(&mut self, ability: Ability) -> bool {
        self.ability_checks += 1;
        match ability {
            Ability::Liberation => self.ability_checks % 7 == 0,
            Ability::Echo => self.ability_checks % 3 == 0,
            Ability::Resonance => self.ability_checks % 2 == 0,
        }
    }

    fn is_concerto_full(&mut self) -> bool {
        false
    }

    fn send_key_and_wait_animation(
        &mut self,
        key: &str,
        enter_wait: Option<Duration>,
    ) -> HostResult {
        self.press(key);
        self.advance(enter_wait.unwrap_or(Duration::ZERO) + ANIMATION_TIME)
    }

    fn combat_end(&mut self) {
        self.tally.combat_ends += 1;
        tracing::debug!(elapsed_ms = self.elapsed.as_millis() as u64, "combat end hook");
    }

    fn notify_error(&mut self, message: &str) {
        self.tally.errors.push(message.to_string());
    }

    fn state_changed(&mut self, state: CombatState) {
        tracing::debug!(?state, elapsed_ms = self.elapsed.as_millis() as u64, "state changed");
    }
}
