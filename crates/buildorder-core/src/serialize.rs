//! Binary snapshots of a facility set.
//!
//! Lets a search checkpoint its frontier. Facilities are stored by action
//! id behind a versioned header and encoded with `bitcode`; restoring
//! resolves the ids against an [`ActionCatalog`].

use crate::action::ActionDescriptor;
use crate::catalog::{ActionCatalog, ActionType};
use crate::error::LogicViolation;
use crate::facility_set::FacilitySet;
use crate::id::{ActionTypeId, Ticks};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Magic number identifying a facility set snapshot.
pub const SNAPSHOT_MAGIC: u32 = 0xB0A5_0001;

/// Current format version. Increment when breaking the wire format.
pub const FORMAT_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during serialization.
#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    #[error("bitcode encoding failed: {0}")]
    Encode(String),
}

/// Errors that can occur during deserialization.
#[derive(Debug, thiserror::Error)]
pub enum DeserializeError {
    #[error("invalid magic number: expected 0x{:08X}, got 0x{:08X}", SNAPSHOT_MAGIC, .0)]
    InvalidMagic(u32),
    #[error("unsupported format version: expected {}, got {}", FORMAT_VERSION, .0)]
    UnsupportedVersion(u32),
    #[error("snapshot from future version {0} (this build supports up to {FORMAT_VERSION})")]
    FutureVersion(u32),
    #[error("bitcode decoding failed: {0}")]
    Decode(String),
    #[error("snapshot references unknown action {0:?}")]
    UnknownAction(ActionTypeId),
    #[error(transparent)]
    Invalid(#[from] LogicViolation),
}

// ---------------------------------------------------------------------------
// Snapshot types
// ---------------------------------------------------------------------------

/// Header prepended to every snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotHeader {
    pub magic: u32,
    pub version: u32,
}

impl SnapshotHeader {
    pub fn new() -> Self {
        Self {
            magic: SNAPSHOT_MAGIC,
            version: FORMAT_VERSION,
        }
    }

    pub fn validate(&self) -> Result<(), DeserializeError> {
        if self.magic != SNAPSHOT_MAGIC {
            return Err(DeserializeError::InvalidMagic(self.magic));
        }
        if self.version > FORMAT_VERSION {
            return Err(DeserializeError::FutureVersion(self.version));
        }
        if self.version < FORMAT_VERSION {
            return Err(DeserializeError::UnsupportedVersion(self.version));
        }
        Ok(())
    }
}

impl Default for SnapshotHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// One facility, by action id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityRecord {
    pub kind: ActionTypeId,
    pub time_remaining: Ticks,
    pub in_progress: Option<ActionTypeId>,
    pub addon: Option<ActionTypeId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilitySetSnapshot {
    pub header: SnapshotHeader,
    pub facilities: Vec<FacilityRecord>,
}

impl FacilitySetSnapshot {
    pub fn capture<A: ActionDescriptor>(set: &FacilitySet<A>) -> Self {
        let facilities = set
            .iter()
            .map(|f| FacilityRecord {
                kind: f.kind().id(),
                time_remaining: f.time_remaining(),
                in_progress: f.in_progress().map(|a| a.id()),
                addon: f.addon().map(|a| a.id()),
            })
            .collect();

        Self {
            header: SnapshotHeader::new(),
            facilities,
        }
    }

    /// Rebuild the facility set, preserving order.
    pub fn restore<'c>(
        &self,
        catalog: &'c ActionCatalog,
    ) -> Result<FacilitySet<ActionType<'c>>, DeserializeError> {
        self.header.validate()?;

        let resolve = |id: ActionTypeId| catalog.get(id).ok_or(DeserializeError::UnknownAction(id));

        let mut set = FacilitySet::new();
        for record in &self.facilities {
            let kind = resolve(record.kind)?;
            let in_progress = record.in_progress.map(resolve).transpose()?;
            let addon = record.addon.map(resolve).transpose()?;
            set.add_busy_facility(kind, record.time_remaining, in_progress, addon)?;
        }
        Ok(set)
    }
}

// ---------------------------------------------------------------------------
// Byte-level API
// ---------------------------------------------------------------------------

pub fn serialize_facilities<A: ActionDescriptor>(
    set: &FacilitySet<A>,
) -> Result<Vec<u8>, SerializeError> {
    let snapshot = FacilitySetSnapshot::capture(set);
    bitcode::serialize(&snapshot).map_err(|e| SerializeError::Encode(e.to_string()))
}

pub fn deserialize_facilities<'c>(
    data: &[u8],
    catalog: &'c ActionCatalog,
) -> Result<FacilitySet<ActionType<'c>>, DeserializeError> {
    let snapshot: FacilitySetSnapshot =
        bitcode::deserialize(data).map_err(|e| DeserializeError::Decode(e.to_string()))?;
    snapshot.restore(catalog)
}
