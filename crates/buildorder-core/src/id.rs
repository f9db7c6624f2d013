use serde::{Deserialize, Serialize};

/// Frames are the atomic unit of simulated time.
pub type Ticks = u64;

/// Identifies an action (facility, add-on, unit, upgrade) in the catalog.
/// Cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActionTypeId(pub u32);
