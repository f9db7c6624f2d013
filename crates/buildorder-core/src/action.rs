//! The read-only action metadata contract consumed by facilities.
//!
//! Facilities never own catalog data. They only ask an action what builds
//! it, whether it is an add-on, which add-on it needs, and how long it
//! takes. Anything that can answer those questions can drive a
//! [`FacilitySet`](crate::facility_set::FacilitySet).

use crate::id::{ActionTypeId, Ticks};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Action kinds
// ---------------------------------------------------------------------------

/// What sort of thing an action produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// A standalone production structure.
    Facility,
    /// A structure attached to a facility. Add-ons are facilities too.
    Addon,
    Unit,
    Upgrade,
    Tech,
}

impl ActionKind {
    /// Whether actions of this kind result in a structure.
    pub fn is_facility(self) -> bool {
        matches!(self, ActionKind::Facility | ActionKind::Addon)
    }

    pub fn is_addon(self) -> bool {
        self == ActionKind::Addon
    }
}

// ---------------------------------------------------------------------------
// Descriptor contract
// ---------------------------------------------------------------------------

/// Metadata a facility needs about an action.
///
/// Absence ("no action") is always expressed as `Option::None` by the
/// callers, so implementors never need a sentinel value.
pub trait ActionDescriptor: Copy + Eq + fmt::Debug {
    /// Stable identifier, used when snapshotting.
    fn id(&self) -> ActionTypeId;

    /// The facility type that produces this action, if any.
    fn producer(&self) -> Option<Self>;

    fn is_addon(&self) -> bool;

    /// The add-on that must be attached to the producer, if any.
    fn required_addon(&self) -> Option<Self>;

    fn requires_addon(&self) -> bool {
        self.required_addon().is_some()
    }

    /// Frames needed to produce this action.
    fn build_time(&self) -> Ticks;

    fn is_facility(&self) -> bool;

    fn name(&self) -> &str;
}
