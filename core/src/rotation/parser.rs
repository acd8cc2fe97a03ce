//! Rotation script parser
//!
//! Scripts are whitespace separated tokens of the form `base[:seconds]`:
//!
//! ```text
//! 1, 2, 3          switch to character slot
//! e                resonance skill
//! q / echo         echo skill
//! lib              liberation
//! a / ba           basic attack (click)
//! ha               heavy attack (mouse hold)
//! dodge, jump
//! base:seconds     action with duration, e.g. a:1.2 ha:0.8
//! ```
//!
//! Parsing never fails. Tokens that cannot be understood are dropped and
//! reported as a [`ParseWarning`].

use std::time::Duration;

use thiserror::Error;

use super::step::{Action, RotationStep, Slot};

/// A token that was dropped while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseWarning {
    #[error("Invalid duration in token: {token}")]
    InvalidDuration { token: String },

    #[error("Unknown rotation token: {token}")]
    UnknownToken { token: String },
}

impl ParseWarning {
    /// The offending token as written in the script.
    pub fn token(&self) -> &str {
        match self {
            ParseWarning::InvalidDuration { token } | ParseWarning::UnknownToken { token } => token,
        }
    }
}

/// Steps plus every warning raised while producing them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedRotation {
    pub steps: Vec<RotationStep>,
    pub warnings: Vec<ParseWarning>,
}

/// Parse a rotation script, logging each dropped token.
pub fn parse(text: &str) -> Vec<RotationStep> {
    let parsed = parse_with_warnings(text);
    for warning in &parsed.warnings {
        tracing::warn!(token = %warning.token(), "{warning}");
    }
    parsed.steps
}

/// Parse a rotation script and return the warnings instead of logging them.
pub fn parse_with_warnings(text: &str) -> ParsedRotation {
    let mut parsed = ParsedRotation::default();

    for token in text.split_whitespace() {
        match parse_token(token) {
            Ok(step) => parsed.steps.push(step),
            Err(warning) => parsed.warnings.push(warning),
        }
    }

    parsed
}

fn parse_token(token: &str) -> Result<RotationStep, ParseWarning> {
    let (base, duration_secs) = match token.split_once(':') {
        Some((base, duration)) => {
            let secs = parse_duration(duration).ok_or_else(|| ParseWarning::InvalidDuration {
                token: token.to_string(),
            })?;
            (base, secs)
        }
        None => (token, 0.0),
    };

    if let Some(slot) = parse_slot(base) {
        return Ok(RotationStep::switch(slot, duration_secs));
    }

    Action::from_alias(&base.to_ascii_lowercase())
        .map(|action| RotationStep::new(action, duration_secs))
        .ok_or_else(|| ParseWarning::UnknownToken {
            token: token.to_string(),
        })
}

/// Seconds that fit in a [`Duration`]; negative values clamp to zero.
fn parse_duration(text: &str) -> Option<f64> {
    let secs: f64 = text.parse().ok()?;
    if !secs.is_finite() {
        return None;
    }
    if secs <= 0.0 {
        return Some(0.0);
    }
    Duration::try_from_secs_f64(secs).ok().map(|_| secs)
}

fn parse_slot(base: &str) -> Option<Slot> {
    match base {
        "1" => Slot::new(1),
        "2" => Slot::new(2),
        "3" => Slot::new(3),
        _ => None,
    }
}
