//! Serde data file structs for action definitions.

use buildorder_core::action::ActionKind;
use serde::Deserialize;

/// One action in a data file. References to other actions are by name.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub kind: ActionKind,
    /// Frames to produce.
    pub build_time: u64,
    #[serde(default)]
    pub producer: Option<String>,
    #[serde(default)]
    pub requires_addon: Option<String>,
}
