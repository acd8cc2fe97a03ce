pub mod combat;
pub mod context;
pub mod host;
pub mod rotation;

// Re-exports for convenience
pub use combat::{
    CombatController, CombatPolicy, CombatState, CycleOutcome, EndReason, HeuristicKind, Mode,
    RealmAlternation, RotationCache, RunReport,
};
pub use context::{AppConfig, AppConfigExt, BoundAction, CombatConfig, ConfigError, KeyConfig};
pub use host::{Ability, CombatHost, HostResult, Interrupt, SessionHost};
pub use rotation::{
    Action, ParseWarning, ParsedRotation, Rotation, RotationExecutor, RotationStep, Slot, parse,
    parse_with_warnings,
};
