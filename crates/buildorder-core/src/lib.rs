//! Buildorder Core -- production facility timelines for build-order search.
//!
//! This crate tracks which production facilities ("buildings") are busy,
//! for how long, and which add-ons they carry, so a build-order search can
//! ask two questions on every node expansion:
//!
//! - can some facility produce action `A` right now?
//! - how many frames until some facility could produce `A`?
//!
//! It also performs the state transitions the search needs: committing an
//! action to the first eligible facility and advancing every facility's
//! clock by the same number of frames.
//!
//! # Branching Pattern
//!
//! There is no undo. A search branch clones the [`facility_set::FacilitySet`],
//! mutates the clone, and drops it on backtrack:
//!
//! ```rust,ignore
//! let mut branch = facilities.clone();
//! let wait = branch.min_time_until_eventually_available(marine)?;
//! branch.advance_all(wait);
//! branch.commit_first_available(marine)?;
//! ```
//!
//! # Key Types
//!
//! - [`action::ActionDescriptor`] -- Read-only metadata contract for actions.
//! - [`catalog::ActionCatalog`] -- Immutable catalog of action metadata
//!   (frozen at startup) whose [`catalog::ActionType`] handles implement
//!   the descriptor contract.
//! - [`facility::FacilityState`] -- One facility's busy/idle/add-on state.
//! - [`facility_set::FacilitySet`] -- Ordered collection of facilities with
//!   aggregate eligibility, timing, commit, and advance operations.
//! - [`error::LogicViolation`] -- Caller contract violations.
//! - [`serialize`] -- Versioned snapshots of a facility set via bitcode.

pub mod action;
pub mod catalog;
pub mod error;
pub mod facility;
pub mod facility_set;
pub mod id;
pub mod serialize;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
