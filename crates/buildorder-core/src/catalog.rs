use crate::action::{ActionDescriptor, ActionKind};
use crate::id::{ActionTypeId, Ticks};
use std::collections::HashMap;
use std::fmt;

/// Metadata for one action in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDef {
    pub name: String,
    pub kind: ActionKind,
    pub build_time: Ticks,
    /// The facility type (or worker) that produces this action.
    pub producer: Option<ActionTypeId>,
    pub required_addon: Option<ActionTypeId>,
}

/// Builder for constructing an immutable ActionCatalog.
/// Three-phase lifecycle: registration -> linking -> finalization.
#[derive(Debug, Default)]
pub struct ActionCatalogBuilder {
    actions: Vec<ActionDef>,
    name_to_id: HashMap<String, ActionTypeId>,
    duplicates: Vec<String>,
}

impl ActionCatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Phase 1: Register an action. Returns its ID.
    pub fn register(&mut self, name: &str, kind: ActionKind, build_time: Ticks) -> ActionTypeId {
        let id = ActionTypeId(self.actions.len() as u32);
        self.actions.push(ActionDef {
            name: name.to_string(),
            kind,
            build_time,
            producer: None,
            required_addon: None,
        });
        if self.name_to_id.insert(name.to_string(), id).is_some() {
            self.duplicates.push(name.to_string());
        }
        id
    }

    /// Phase 2: Record which action produces `id`.
    pub fn produced_by(
        &mut self,
        id: ActionTypeId,
        producer: ActionTypeId,
    ) -> Result<(), CatalogError> {
        self.check_id(producer)?;
        self.def_mut(id)?.producer = Some(producer);
        Ok(())
    }

    /// Phase 2: Record the add-on `id` needs attached to its producer.
    pub fn requires_addon(
        &mut self,
        id: ActionTypeId,
        addon: ActionTypeId,
    ) -> Result<(), CatalogError> {
        self.check_id(addon)?;
        self.def_mut(id)?.required_addon = Some(addon);
        Ok(())
    }

    /// Lookup action ID by name.
    pub fn action_id(&self, name: &str) -> Option<ActionTypeId> {
        self.name_to_id.get(name).copied()
    }

    fn check_id(&self, id: ActionTypeId) -> Result<(), CatalogError> {
        if (id.0 as usize) < self.actions.len() {
            Ok(())
        } else {
            Err(CatalogError::UnknownId(id))
        }
    }

    fn def_mut(&mut self, id: ActionTypeId) -> Result<&mut ActionDef, CatalogError> {
        self.actions
            .get_mut(id.0 as usize)
            .ok_or(CatalogError::UnknownId(id))
    }

    /// Phase 3: Validate and freeze the catalog.
    pub fn build(self) -> Result<ActionCatalog, CatalogError> {
        if let Some(name) = self.duplicates.into_iter().next() {
            return Err(CatalogError::DuplicateName(name));
        }

        for def in &self.actions {
            if let Some(addon) = def.required_addon {
                let addon_def = &self.actions[addon.0 as usize];
                if !addon_def.kind.is_addon() {
                    return Err(CatalogError::NotAnAddon {
                        action: def.name.clone(),
                        required: addon_def.name.clone(),
                    });
                }
            }

            // Add-ons attach to the facility that builds them.
            if def.kind.is_addon() {
                let producer_is_facility = def
                    .producer
                    .is_some_and(|p| self.actions[p.0 as usize].kind == ActionKind::Facility);
                if !producer_is_facility {
                    return Err(CatalogError::AddonProducer(def.name.clone()));
                }
            }
        }

        Ok(ActionCatalog {
            actions: self.actions,
            name_to_id: self.name_to_id,
        })
    }
}

/// Immutable action catalog. Frozen after build().
#[derive(Debug)]
pub struct ActionCatalog {
    actions: Vec<ActionDef>,
    name_to_id: HashMap<String, ActionTypeId>,
}

impl ActionCatalog {
    pub fn get(&self, id: ActionTypeId) -> Option<ActionType<'_>> {
        self.actions
            .get(id.0 as usize)
            .map(|_| ActionType { id, catalog: self })
    }

    /// Lookup an action by name.
    pub fn action(&self, name: &str) -> Option<ActionType<'_>> {
        self.name_to_id
            .get(name)
            .map(|&id| ActionType { id, catalog: self })
    }

    pub fn def(&self, id: ActionTypeId) -> Option<&ActionDef> {
        self.actions.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// All actions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = ActionType<'_>> + '_ {
        (0..self.actions.len()).map(move |i| ActionType {
            id: ActionTypeId(i as u32),
            catalog: self,
        })
    }
}

// ---------------------------------------------------------------------------
// Catalog-backed descriptor handle
// ---------------------------------------------------------------------------

/// A copyable reference to one action in an [`ActionCatalog`].
///
/// Only the catalog creates handles, so the id is always in range.
#[derive(Clone, Copy)]
pub struct ActionType<'c> {
    id: ActionTypeId,
    catalog: &'c ActionCatalog,
}

impl<'c> ActionType<'c> {
    fn def(&self) -> &'c ActionDef {
        &self.catalog.actions[self.id.0 as usize]
    }

    pub fn kind(&self) -> ActionKind {
        self.def().kind
    }

    fn handle(&self, id: ActionTypeId) -> ActionType<'c> {
        ActionType {
            id,
            catalog: self.catalog,
        }
    }
}

impl PartialEq for ActionType<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && std::ptr::eq(self.catalog, other.catalog)
    }
}

impl Eq for ActionType<'_> {}

impl fmt::Debug for ActionType<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.def().name, self.id.0)
    }
}

impl fmt::Display for ActionType<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.def().name)
    }
}

impl ActionDescriptor for ActionType<'_> {
    fn id(&self) -> ActionTypeId {
        self.id
    }

    fn producer(&self) -> Option<Self> {
        self.def().producer.map(|p| self.handle(p))
    }

    fn is_addon(&self) -> bool {
        self.def().kind.is_addon()
    }

    fn required_addon(&self) -> Option<Self> {
        self.def().required_addon.map(|a| self.handle(a))
    }

    fn build_time(&self) -> Ticks {
        self.def().build_time
    }

    fn is_facility(&self) -> bool {
        self.def().kind.is_facility()
    }

    fn name(&self) -> &str {
        &self.def().name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown action id: {0:?}")]
    UnknownId(ActionTypeId),
    #[error("duplicate action name: {0}")]
    DuplicateName(String),
    #[error("'{action}' requires '{required}', which is not an add-on")]
    NotAnAddon { action: String, required: String },
    #[error("add-on '{0}' must be produced by a facility")]
    AddonProducer(String),
}
