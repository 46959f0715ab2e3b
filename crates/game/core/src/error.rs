//! Common error infrastructure for skirmish-core.
//!
//! This module provides shared types and traits used across all error types in the crate.
//! Domain-specific errors (e.g., `EquipError`, `TargetingError`) are defined in their
//! respective modules alongside the operations they validate.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each subsystem has its own error type with specific variants
//! - **Closed Classification**: Every error maps onto one [`ErrorKind`]
//! - **Severity Classification**: Errors are categorized for recovery strategies

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: The player can retry with a different choice
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative action.
    ///
    /// Examples: not enough stamina this turn, no live targets left
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: index out of bounds, shield in the armor slot
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: malformed scene template, dangling entity reference
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Closed classification of every failure the engine reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Index or token fails bounds or a target predicate.
    InvalidTarget,
    /// Equipment rule violation.
    SlotConflict,
    /// Not enough stamina to pay for a skill.
    InsufficientStamina,
    /// Operation attempted outside the state that allows it.
    InvalidState,
    /// Skill id is not in the catalog or not known by the caster.
    UnknownSkill,
    /// Missing or malformed scene template.
    SceneLoadFailure,
}

/// Common trait for all skirmish-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the closed classification of this error.
    fn kind(&self) -> ErrorKind;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error kind.
    fn error_code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::InvalidTarget => "invalid_target",
            ErrorKind::SlotConflict => "slot_conflict",
            ErrorKind::InsufficientStamina => "insufficient_stamina",
            ErrorKind::InvalidState => "invalid_state",
            ErrorKind::UnknownSkill => "unknown_skill",
            ErrorKind::SceneLoadFailure => "scene_load_failure",
        }
    }
}
