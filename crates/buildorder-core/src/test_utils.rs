//! Shared test helpers for unit tests, integration tests, and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]`.

use crate::action::ActionKind;
use crate::catalog::{ActionCatalog, ActionCatalogBuilder, ActionType};
use crate::facility_set::FacilitySet;

// ===========================================================================
// Terran catalog
// ===========================================================================

/// A small Terran-style catalog with one add-on dependency chain
/// (Factory -> Machine Shop -> Siege Tank).
pub fn terran_catalog() -> ActionCatalog {
    let mut b = ActionCatalogBuilder::new();

    let scv = b.register("SCV", ActionKind::Unit, 300);
    let command_center = b.register("Command Center", ActionKind::Facility, 1800);
    let comsat = b.register("Comsat Station", ActionKind::Addon, 750);
    let barracks = b.register("Barracks", ActionKind::Facility, 1200);
    let marine = b.register("Marine", ActionKind::Unit, 360);
    let academy = b.register("Academy", ActionKind::Facility, 1200);
    let stim = b.register("Stim Packs", ActionKind::Tech, 1200);
    let factory = b.register("Factory", ActionKind::Facility, 1200);
    let machine_shop = b.register("Machine Shop", ActionKind::Addon, 600);
    let siege_tank = b.register("Siege Tank", ActionKind::Unit, 750);
    let vulture = b.register("Vulture", ActionKind::Unit, 450);

    let links = [
        (scv, command_center),
        (command_center, scv),
        (comsat, command_center),
        (barracks, scv),
        (marine, barracks),
        (academy, scv),
        (stim, academy),
        (factory, scv),
        (machine_shop, factory),
        (siege_tank, factory),
        (vulture, factory),
    ];
    for (action, producer) in links {
        b.produced_by(action, producer).expect("fixture ids are valid");
    }
    b.requires_addon(siege_tank, machine_shop)
        .expect("fixture ids are valid");

    b.build().expect("fixture catalog is valid")
}

/// Named handles into [`terran_catalog`].
#[derive(Debug, Clone, Copy)]
pub struct Terran<'c> {
    pub scv: ActionType<'c>,
    pub command_center: ActionType<'c>,
    pub comsat: ActionType<'c>,
    pub barracks: ActionType<'c>,
    pub marine: ActionType<'c>,
    pub academy: ActionType<'c>,
    pub stim: ActionType<'c>,
    pub factory: ActionType<'c>,
    pub machine_shop: ActionType<'c>,
    pub siege_tank: ActionType<'c>,
    pub vulture: ActionType<'c>,
}

impl<'c> Terran<'c> {
    pub fn new(catalog: &'c ActionCatalog) -> Self {
        Self {
            scv: action(catalog, "SCV"),
            command_center: action(catalog, "Command Center"),
            comsat: action(catalog, "Comsat Station"),
            barracks: action(catalog, "Barracks"),
            marine: action(catalog, "Marine"),
            academy: action(catalog, "Academy"),
            stim: action(catalog, "Stim Packs"),
            factory: action(catalog, "Factory"),
            machine_shop: action(catalog, "Machine Shop"),
            siege_tank: action(catalog, "Siege Tank"),
            vulture: action(catalog, "Vulture"),
        }
    }

    /// Every structure in the fixture.
    pub fn facilities(&self) -> [ActionType<'c>; 6] {
        [
            self.command_center,
            self.comsat,
            self.barracks,
            self.academy,
            self.factory,
            self.machine_shop,
        ]
    }
}

/// Look up an action by name, panicking if it is missing.
pub fn action<'c>(catalog: &'c ActionCatalog, name: &str) -> ActionType<'c> {
    catalog
        .action(name)
        .unwrap_or_else(|| panic!("action '{name}' not in catalog"))
}

// ===========================================================================
// Facility set constructors
// ===========================================================================

/// A set of idle facilities without add-ons, in the given order.
pub fn idle_set<'c>(kinds: &[ActionType<'c>]) -> FacilitySet<ActionType<'c>> {
    let mut set = FacilitySet::new();
    for &kind in kinds {
        set.add_facility(kind, None)
            .expect("fixture facilities are structures");
    }
    set
}

/// The standard opening: one Command Center.
pub fn opening_set<'c>(t: &Terran<'c>) -> FacilitySet<ActionType<'c>> {
    idle_set(&[t.command_center])
}
