use resonator_types::CombatConfig;

use crate::host::SessionHost;
use crate::rotation::RotationExecutor;

use super::{
    CombatPolicy, CombatState, CycleOutcome, EndReason, HeuristicKind, Mode, RealmAlternation,
    RunReport,
};

/// Message surfaced to the user when the whole team is down.
const CHARACTERS_DEAD: &str = "Characters dead";

/// Whether preparing a rotation reused the cached executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationCache {
    Reused,
    Rebuilt,
}

/// Drives one character team through an encounter.
///
/// Owns the host for its whole lifetime and the rotation executor cache,
/// which is only rebuilt when the configured script text changes.
pub struct CombatController<H: SessionHost> {
    host: H,
    executor: Option<RotationExecutor>,
    realm: RealmAlternation,
    state: CombatState,
}

impl<H: SessionHost> CombatController<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            executor: None,
            realm: RealmAlternation::new(),
            state: CombatState::OutOfCombat,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// State after the last run. `Running` is only visible to the host
    /// through [`SessionHost::state_changed`] while `run` is in progress.
    pub fn state(&self) -> CombatState {
        self.state
    }

    fn set_state(&mut self, state: CombatState) {
        if self.state != state {
            self.state = state;
            self.host.state_changed(state);
        }
    }

    /// The cached executor, if a rotation was ever prepared.
    pub fn executor(&self) -> Option<&RotationExecutor> {
        self.executor.as_ref()
    }

    /// Make sure the cached executor was built from `source`, reparsing only
    /// when the text differs.
    pub fn prepare_rotation(&mut self, source: &str) -> RotationCache {
        if self.executor.as_ref().is_some_and(|e| e.is_built_from(source)) {
            return RotationCache::Reused;
        }
        self.executor = Some(RotationExecutor::new(source));
        RotationCache::Rebuilt
    }

    /// Run until combat ends or the team dies.
    ///
    /// Returns an idle report without touching anything when the team/world
    /// entry guard fails. The end-of-combat hook runs only if at least one
    /// cycle executed.
    pub fn run(&mut self, config: &CombatConfig) -> RunReport {
        if !self.host.in_team_and_world() {
            return RunReport::idle();
        }

        // The liberation toggle only applies to open world play
        let policy = CombatPolicy {
            auto_target: config.auto_target,
            use_liberation: config.use_liberation || !self.host.in_world(),
        };
        let started = self.host.now();
        let mode = self.resolve_mode(config);

        let mut cycles: u32 = 0;
        let mut end = None;
        while self.host.in_combat() {
            if cycles == 0 {
                self.set_state(CombatState::Running(mode));
                tracing::debug!(?mode, "Combat started");
            }
            cycles = cycles.saturating_add(1);

            match self.run_cycle(mode, &policy) {
                CycleOutcome::Continue => {}
                CycleOutcome::NormalExit { reason } => {
                    let elapsed = self.host.now().duration_since(started);
                    tracing::info!(elapsed_secs = elapsed.as_secs(), %reason, "Auto combat out of combat");
                    end = Some(EndReason::NormalExit);
                    break;
                }
                CycleOutcome::FatalDeath => {
                    tracing::error!(cycles, "{CHARACTERS_DEAD}");
                    self.host.notify_error(CHARACTERS_DEAD);
                    end = Some(EndReason::CharacterDead);
                    break;
                }
            }
        }

        let elapsed = self.host.now().duration_since(started);
        if cycles == 0 {
            self.set_state(CombatState::OutOfCombat);
            return RunReport {
                mode: Some(mode),
                ..RunReport::idle()
            };
        }

        let end = end.unwrap_or(EndReason::NormalExit);
        self.set_state(CombatState::Ended(end));
        self.host.combat_end();
        tracing::debug!(cycles, elapsed_secs = elapsed.as_secs_f32(), ?end, "Combat run finished");

        RunReport {
            engaged: true,
            cycles,
            mode: Some(mode),
            end: Some(end),
            elapsed,
        }
    }

    fn resolve_mode(&mut self, config: &CombatConfig) -> Mode {
        if config.rotation_mode {
            if config.rotation.is_empty() {
                tracing::warn!("Rotation Mode enabled but no rotation defined, falling back to auto combat");
            } else {
                self.prepare_rotation(&config.rotation);
                if self.executor.as_ref().is_some_and(|e| !e.rotation().is_empty()) {
                    return Mode::Rotation;
                }
                tracing::warn!(
                    rotation = %config.rotation,
                    "Rotation has no valid steps, falling back to auto combat"
                );
            }
        }

        if self.host.in_illusive_realm() {
            Mode::Heuristic(HeuristicKind::IllusiveRealm)
        } else {
            Mode::Heuristic(HeuristicKind::Character)
        }
    }

    fn run_cycle(&mut self, mode: Mode, policy: &CombatPolicy) -> CycleOutcome {
        match mode {
            Mode::Rotation => match &self.executor {
                Some(executor) => executor.execute_once(&mut self.host).into(),
                None => self.host.perform(policy).into(),
            },
            Mode::Heuristic(HeuristicKind::Character) => self.host.perform(policy).into(),
            Mode::Heuristic(HeuristicKind::IllusiveRealm) => {
                self.realm.perform(&mut self.host).into()
            }
        }
    }
}
