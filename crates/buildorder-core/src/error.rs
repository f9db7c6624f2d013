//! Caller contract violations.
//!
//! Every failure in this crate means the search algorithm broke its own
//! invariants (skipped an eligibility pre-check, or did not advance time
//! far enough). They are returned rather than panicking so tests can
//! assert on them; callers should treat them as defects.

/// A broken precondition on a facility set operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LogicViolation {
    /// Only structures can be tracked as facilities.
    #[error("'{name}' is not a facility and cannot be added to the facility set")]
    NotAFacility { name: String },

    /// No facility is structurally compatible with the action.
    #[error("no facility can ever produce '{action}'")]
    NeverProducible { action: String },

    #[error("facility set is empty")]
    EmptyFacilitySet,

    /// No facility of the queried type exists.
    #[error("no facility of type '{kind}' exists")]
    NoFacilityOfType { kind: String },

    /// Commit was attempted before any eligible facility became free.
    #[error("no facility is free to produce '{action}'")]
    NoFreeFacility { action: String },
}
