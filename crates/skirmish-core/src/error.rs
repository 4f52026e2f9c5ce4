//! Error types for battle setup and scheduler configuration.
//!
//! The per-tick pipeline has no error paths; these cover construction only.

use thiserror::Error;

/// Rejected initial roster.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RosterError {
    #[error("unit id must not be empty")]
    EmptyId,
    #[error("duplicate unit id {0:?}")]
    DuplicateId(String),
    #[error("unit {id:?} has a non-finite position")]
    NonFinitePosition { id: String },
    #[error("unit {id:?} has non-finite hp {hp}")]
    NonFiniteHp { id: String, hp: f64 },
}

/// Rejected scheduler configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
    #[error("time compression must be finite and >= 0, got {0}")]
    InvalidTimeCompression(f64),
    #[error("max ticks per frame must be greater than zero")]
    ZeroMaxTicks,
    #[error("simulated step of {step_ms} ms exceeds the {max_ms} ms limit")]
    StepTooLarge { step_ms: f64, max_ms: f64 },
}
