//! Illusive realm heuristic: alternate basic clicks with the best ready ability.

use std::time::Duration;

use crate::host::{Ability, HostResult, SessionHost};

/// Every Nth invocation presses the realm special key instead of clicking.
pub const REALM_SPECIAL_EVERY: u32 = 10;

/// Fixed delay after each invocation.
pub const REALM_CYCLE_DELAY: Duration = Duration::from_millis(20);

const REALM_SPECIAL_KEY: &str = "4";
const REALM_SPECIAL_ENTER_WAIT: Duration = Duration::from_millis(200);
const CONCERTO_SWAP_KEY: &str = "2";

/// Alternates between a click branch and an ability branch on successive calls.
///
/// Ability priority: Liberation > Echo > Resonance > concerto swap (only when
/// the gauge is full and a team is present).
#[derive(Debug, Clone, Default)]
pub struct RealmAlternation {
    last_was_click: bool,
    op_index: u32,
}

impl RealmAlternation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invocations completed so far.
    pub fn op_index(&self) -> u32 {
        self.op_index
    }

    pub fn perform<H: SessionHost + ?Sized>(&mut self, host: &mut H) -> HostResult {
        if !self.last_was_click {
            if self.op_index % REALM_SPECIAL_EVERY == 0 {
                host.send_key_and_wait_animation(REALM_SPECIAL_KEY, Some(REALM_SPECIAL_ENTER_WAIT))?;
            } else {
                host.click();
            }
        } else if host.available(Ability::Liberation) {
            let key = host.liberation_key();
            host.send_key_and_wait_animation(&key, None)?;
        } else if host.available(Ability::Echo) {
            let key = host.echo_key();
            host.send_key(&key);
        } else if host.available(Ability::Resonance) {
            let key = host.resonance_key();
            host.send_key(&key);
        } else if host.is_concerto_full() && host.in_team() {
            host.send_key_and_wait_animation(CONCERTO_SWAP_KEY, None)?;
        }

        self.last_was_click = !self.last_was_click;
        self.op_index = self.op_index.wrapping_add(1);
        host.sleep(REALM_CYCLE_DELAY)
    }
}
