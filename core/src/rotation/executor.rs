//! Timed playback of a parsed rotation.

use std::ops::{Deref, DerefMut};
use std::time::Duration;

use crate::host::{CombatHost, HostResult};

use super::Rotation;
use super::step::{Action, RotationStep};

/// Shortest wait after a character swap. Acting sooner cancels the swap animation.
pub const SWITCH_MIN_WAIT: Duration = Duration::from_millis(150);

/// Attack duration when the step gives none.
pub const ATTACK_DEFAULT: Duration = Duration::from_millis(100);

/// Heavy attack hold time when the step gives none.
pub const HEAVY_DEFAULT: Duration = Duration::from_millis(600);

/// Owns one parsed rotation and plays it back, one full cycle per call.
#[derive(Debug, Clone)]
pub struct RotationExecutor {
    rotation: Rotation,
}

impl RotationExecutor {
    pub fn new(source: impl Into<String>) -> Self {
        let rotation = Rotation::parse(source);
        if !rotation.is_empty() {
            tracing::info!(steps = rotation.len(), "Rotation loaded");
        }
        Self { rotation }
    }

    pub fn rotation(&self) -> &Rotation {
        &self.rotation
    }

    pub fn source(&self) -> &str {
        self.rotation.source()
    }

    /// True if this executor was built from exactly `source`.
    pub fn is_built_from(&self, source: &str) -> bool {
        self.rotation.source() == source
    }

    /// Play every step once, in order.
    ///
    /// Liveness is checked before each step; once it fails the rest of the
    /// cycle is skipped. A frame is yielded after every completed step.
    pub fn execute_once<H: CombatHost + ?Sized>(&self, host: &mut H) -> HostResult {
        for (index, step) in self.rotation.steps().iter().enumerate() {
            if !host.in_combat() {
                tracing::debug!(index, "Combat ended mid-rotation");
                return Ok(());
            }
            tracing::debug!(index, %step, "Dispatching step");
            execute_step(step, host)?;
            host.next_frame()?;
        }
        Ok(())
    }
}

fn execute_step<H: CombatHost + ?Sized>(step: &RotationStep, host: &mut H) -> HostResult {
    match step.action() {
        Action::Switch => {
            let Some(slot) = step.slot() else {
                tracing::warn!(%step, "Switch step without a slot");
                return Ok(());
            };
            host.send_key(&slot.key());
            host.sleep(step.duration().max(SWITCH_MIN_WAIT))
        }
        Action::Resonance => {
            let key = host.resonance_key();
            press_and_wait(host, &key, step)
        }
        Action::Echo => {
            let key = host.echo_key();
            press_and_wait(host, &key, step)
        }
        Action::Liberation => {
            let key = host.liberation_key();
            press_and_wait(host, &key, step)
        }
        Action::Attack => attack(host, step.duration_or(ATTACK_DEFAULT)),
        Action::Heavy => {
            let mut held = MouseHold::press(host);
            held.sleep(step.duration_or(HEAVY_DEFAULT))
        }
        Action::Dodge => {
            let key = host.key_config().dodge_key.clone();
            press_and_wait(host, &key, step)
        }
        Action::Jump => {
            let key = host.key_config().jump_key.clone();
            press_and_wait(host, &key, step)
        }
    }
}

/// Press `key`, then wait only if the step carries an explicit duration.
fn press_and_wait<H: CombatHost + ?Sized>(
    host: &mut H,
    key: &str,
    step: &RotationStep,
) -> HostResult {
    host.send_key(key);
    if step.has_duration() {
        host.sleep(step.duration())?;
    }
    Ok(())
}

/// Click repeatedly until `duration` has elapsed or combat ends.
fn attack<H: CombatHost + ?Sized>(host: &mut H, duration: Duration) -> HostResult {
    let start = host.now();
    while host.now().duration_since(start) < duration {
        if !host.in_combat() {
            return Ok(());
        }
        host.click();
        host.next_frame()?;
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Mouse Hold
// ─────────────────────────────────────────────────────────────────────────────

/// Held mouse button. Released when dropped, on every exit path.
struct MouseHold<'a, H: CombatHost + ?Sized> {
    host: &'a mut H,
}

impl<'a, H: CombatHost + ?Sized> MouseHold<'a, H> {
    fn press(host: &'a mut H) -> Self {
        host.mouse_down();
        Self { host }
    }
}

impl<H: CombatHost + ?Sized> Deref for MouseHold<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: CombatHost + ?Sized> DerefMut for MouseHold<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: CombatHost + ?Sized> Drop for MouseHold<'_, H> {
    fn drop(&mut self) {
        self.host.mouse_up();
    }
}
