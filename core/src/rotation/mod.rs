//! Fixed, user-authored action rotations
//!
//! - **step**: typed instructions and the alias table
//! - **parser**: script text to steps, dropping malformed tokens
//! - **executor**: plays a parsed rotation against a [`CombatHost`](crate::host::CombatHost)

mod executor;
mod parser;
mod step;


pub use executor::{ATTACK_DEFAULT, HEAVY_DEFAULT, RotationExecutor, SWITCH_MIN_WAIT};
pub use parser::{ParseWarning, ParsedRotation, parse, parse_with_warnings};
pub use step::{ACTION_ALIASES, Action, RotationStep, Slot};

/// Steps parsed from one script, together with the script itself.
///
/// Only ever rebuilt as a whole; nothing mutates the steps after parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct Rotation {
    source: String,
    steps: Vec<RotationStep>,
}

impl Rotation {
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let steps = parse(&source);
        Self { source, steps }
    }

    /// The exact text the steps were parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn steps(&self) -> &[RotationStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
