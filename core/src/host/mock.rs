//! Recording host with a virtual clock for tests.

use std::collections::{HashSet, VecDeque};
use std::time::{Duration, Instant};

use resonator_types::KeyConfig;

use super::{Ability, CombatHost, HostResult, SessionHost};
use crate::combat::{CombatPolicy, CombatState};

/// Everything the mock host observed, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum HostAction {
    Key(String),
    Click,
    MouseDown,
    MouseUp,
    Sleep(Duration),
    Frame,
    Perform,
    WaitAnimation {
        key: String,
        enter_wait: Option<Duration>,
    },
    CombatEnd,
    Notify(String),
}

/// How long the scripted encounter lasts.
#[derive(Debug, Clone, Copy)]
pub enum Liveness {
    Forever,
    /// The first `n` liveness checks succeed
    Checks(usize),
    /// Alive while virtual time is below the limit
    Until(Duration),
}

pub struct MockHost {
    pub actions: Vec<HostAction>,
    pub keys: KeyConfig,
    pub liveness: Liveness,
    pub liveness_checks: usize,
    pub frame_time: Duration,
    pub perform_time: Duration,
    pub sleep_results: VecDeque<HostResult>,
    pub frame_results: VecDeque<HostResult>,
    pub perform_results: VecDeque<HostResult>,
    pub policies: Vec<CombatPolicy>,
    pub states: Vec<CombatState>,

    pub team_and_world: bool,
    pub team: bool,
    pub world: bool,
    pub realm: bool,
    pub concerto_full: bool,
    pub available: HashSet<Ability>,

    epoch: Instant,
    elapsed: Duration,
}

impl MockHost {
    pub fn new(liveness: Liveness) -> Self {
        Self {
            actions: Vec::new(),
            keys: KeyConfig::default(),
            liveness,
            liveness_checks: 0,
            frame_time: Duration::from_millis(16),
            perform_time: Duration::from_millis(100),
            sleep_results: VecDeque::new(),
            frame_results: VecDeque::new(),
            perform_results: VecDeque::new(),
            policies: Vec::new(),
            states: Vec::new(),
            team_and_world: true,
            team: true,
            world: true,
            realm: false,
            concerto_full: false,
            available: HashSet::new(),
            epoch: Instant::now(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn count(&self, action: &HostAction) -> usize {
        self.actions.iter().filter(|a| *a == action).count()
    }

    pub fn keys_pressed(&self) -> Vec<&str> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                HostAction::Key(key) => Some(key.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                HostAction::Sleep(d) => Some(*d),
                _ => None,
            })
            .collect()
    }

    /// Actions with frame yields filtered out.
    pub fn inputs(&self) -> Vec<HostAction> {
        self.actions
            .iter()
            .filter(|a| **a != HostAction::Frame)
            .cloned()
            .collect()
    }
}

impl CombatHost for MockHost {
    fn in_combat(&mut self) -> bool {
        self.liveness_checks += 1;
        match self.liveness {
            Liveness::Forever => true,
            Liveness::Checks(n) => self.liveness_checks <= n,
            Liveness::Until(limit) => self.elapsed < limit,
        }
    }

    fn next_frame(&mut self) -> HostResult {
        self.actions.push(HostAction::Frame);
        self.elapsed += self.frame_time;
        self.frame_results.pop_front().unwrap_or(Ok(()))
    }

    fn sleep(&mut self, duration: Duration) -> HostResult {
        self.actions.push(HostAction::Sleep(duration));
        self.elapsed += duration;
        self.sleep_results.pop_front().unwrap_or(Ok(()))
    }

    fn now(&self) -> Instant {
        self.epoch + self.elapsed
    }

    fn send_key(&mut self, key: &str) {
        self.actions.push(HostAction::Key(key.to_string()));
    }

    fn click(&mut self) {
        self.actions.push(HostAction::Click);
    }

    fn mouse_down(&mut self) {
        self.actions.push(HostAction::MouseDown);
    }

    fn mouse_up(&mut self) {
        self.actions.push(HostAction::MouseUp);
    }

    fn key_config(&self) -> &KeyConfig {
        &self.keys
    }
}

impl SessionHost for MockHost {
    fn in_team_and_world(&mut self) -> bool {
        self.team_and_world
    }

    fn in_team(&mut self) -> bool {
        self.team
    }

    fn in_world(&mut self) -> bool {
        self.world
    }

    fn in_illusive_realm(&mut self) -> bool {
        self.realm
    }

    fn perform(&mut self, policy: &CombatPolicy) -> HostResult {
        self.actions.push(HostAction::Perform);
        self.policies.push(*policy);
        self.elapsed += self.perform_time;
        self.perform_results.pop_front().unwrap_or(Ok(()))
    }

    fn available(&mut self, ability: Ability) -> bool {
        self.available.contains(&ability)
    }

    fn is_concerto_full(&mut self) -> bool {
        self.concerto_full
    }

    fn send_key_and_wait_animation(
        &mut self,
        key: &str,
        enter_wait: Option<Duration>,
    ) -> HostResult {
        self.actions.push(HostAction::WaitAnimation {
            key: key.to_string(),
            enter_wait,
        });
        Ok(())
    }

    fn combat_end(&mut self) {
        self.actions.push(HostAction::CombatEnd);
    }

    fn notify_error(&mut self, message: &str) {
        self.actions.push(HostAction::Notify(message.to_string()));
    }

    fn state_changed(&mut self, state: CombatState) {
        self.states.push(state);
    }
}
