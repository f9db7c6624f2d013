//! Ordered collection of facilities with the aggregate queries and
//! mutations a build-order search runs on every node expansion.
//!
//! Selection is first-match by index, so insertion order is the
//! tie-breaker between equally eligible facilities. Cloning a set is a
//! deep copy; search branches clone, mutate, and discard.

use crate::action::ActionDescriptor;
use crate::error::LogicViolation;
use crate::facility::FacilityState;
use crate::id::Ticks;
use std::fmt;
use std::ops::Index;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacilitySet<A> {
    facilities: Vec<FacilityState<A>>,
}

impl<A> Default for FacilitySet<A> {
    fn default() -> Self {
        Self {
            facilities: Vec::new(),
        }
    }
}

impl<A: ActionDescriptor> FacilitySet<A> {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Seeding
    // -----------------------------------------------------------------------

    /// Append an idle facility.
    pub fn add_facility(&mut self, kind: A, addon: Option<A>) -> Result<(), LogicViolation> {
        self.push(FacilityState::new(kind, addon))
    }

    /// Append a facility that is already working on something, e.g. when
    /// seeding from an observed game state.
    pub fn add_busy_facility(
        &mut self,
        kind: A,
        time_until_free: Ticks,
        in_progress: Option<A>,
        addon: Option<A>,
    ) -> Result<(), LogicViolation> {
        self.push(FacilityState::busy(kind, time_until_free, in_progress, addon))
    }

    fn push(&mut self, facility: FacilityState<A>) -> Result<(), LogicViolation> {
        let kind = facility.kind();
        if !kind.is_facility() {
            return Err(LogicViolation::NotAFacility {
                name: kind.name().to_string(),
            });
        }
        self.facilities.push(facility);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    pub fn get(&self, index: usize) -> Option<&FacilityState<A>> {
        self.facilities.get(index)
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FacilityState<A>> {
        self.facilities.iter()
    }

    /// Number of facilities with nothing left to do.
    pub fn idle_count(&self) -> usize {
        self.facilities.iter().filter(|f| f.is_idle()).count()
    }

    // -----------------------------------------------------------------------
    // Feasibility
    // -----------------------------------------------------------------------

    /// True if any facility can produce `action` right now.
    pub fn can_produce_now(&self, action: &A) -> bool {
        self.facilities.iter().any(|f| f.can_produce_now(action))
    }

    /// True if any facility is structurally able to produce `action`,
    /// counting add-ons still under construction.
    pub fn can_produce_eventually(&self, action: &A) -> bool {
        self.facilities
            .iter()
            .any(|f| f.can_produce_eventually(action))
    }

    // -----------------------------------------------------------------------
    // Timing
    // -----------------------------------------------------------------------

    /// Frames until the earliest structurally compatible facility is free.
    ///
    /// Only valid after [`can_produce_eventually`](Self::can_produce_eventually)
    /// has returned true.
    pub fn min_time_until_eventually_available(&self, action: &A) -> Result<Ticks, LogicViolation> {
        self.facilities
            .iter()
            .filter(|f| f.can_produce_eventually(action))
            .map(|f| f.time_remaining())
            .min()
            .ok_or_else(|| LogicViolation::NeverProducible {
                action: action.name().to_string(),
            })
    }

    /// Frames until the first facility whose own type is exactly `kind`
    /// becomes free.
    pub fn min_time_until_type_free(&self, kind: &A) -> Result<Ticks, LogicViolation> {
        if self.facilities.is_empty() {
            return Err(LogicViolation::EmptyFacilitySet);
        }

        self.facilities
            .iter()
            .filter(|f| f.kind() == *kind)
            .map(|f| f.time_remaining())
            .min()
            .ok_or_else(|| LogicViolation::NoFacilityOfType {
                kind: kind.name().to_string(),
            })
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Commit `action` to the lowest-indexed facility that can produce it
    /// now. Returns that facility's index.
    ///
    /// The caller must already have advanced time far enough for some
    /// facility to be eligible.
    pub fn commit_first_available(&mut self, action: A) -> Result<usize, LogicViolation> {
        let index = self
            .facilities
            .iter()
            .position(|f| f.can_produce_now(&action))
            .ok_or_else(|| LogicViolation::NoFreeFacility {
                action: action.name().to_string(),
            })?;

        self.facilities[index].commit(action);
        tracing::trace!(
            action = action.name(),
            facility = index,
            frames = action.build_time(),
            "committed action"
        );
        Ok(index)
    }

    /// Advance every facility's clock by `ticks` frames.
    pub fn advance_all(&mut self, ticks: Ticks) {
        for facility in &mut self.facilities {
            facility.advance(ticks);
        }
    }

    // -----------------------------------------------------------------------
    // Diagnostics
    // -----------------------------------------------------------------------

    /// Human-readable status of every facility. The format is not stable.
    pub fn describe(&self) -> String {
        self.to_string()
    }

    /// Emit one debug event per facility.
    pub fn log_status(&self) {
        for (index, facility) in self.facilities.iter().enumerate() {
            let kind = facility.kind();
            tracing::debug!(
                facility = index,
                kind = kind.name(),
                time_remaining = facility.time_remaining(),
                addon = ?facility.addon(),
                "facility status"
            );
        }
    }
}

impl<A> Index<usize> for FacilitySet<A> {
    type Output = FacilityState<A>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.facilities[index]
    }
}

impl<A: ActionDescriptor> fmt::Display for FacilitySet<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for facility in &self.facilities {
            let kind = facility.kind();
            let name = kind.name();
            if facility.is_idle() {
                writeln!(f, "{name} is free to assign")?;
            } else {
                writeln!(
                    f,
                    "{name} will be free in {} frames",
                    facility.time_remaining()
                )?;
            }
        }
        writeln!(f, "{}", "-".repeat(59))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn new_set_is_empty() {
        let set: FacilitySet<crate::catalog::ActionType<'_>> = FacilitySet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert!(set.get(0).is_none());
    }

    #[test]
    fn add_facility_appends_idle() {
        let catalog = terran_catalog();
        let t = Terran::new(&catalog);
        let mut set = FacilitySet::new();
        set.add_facility(t.command_center, Some(t.comsat)).unwrap();
        set.add_facility(t.barracks, None).unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set[0].kind(), t.command_center);
        assert_eq!(set[0].addon(), Some(t.comsat));
        assert_eq!(set.get(1).map(|f| f.kind()), Some(t.barracks));
        assert_eq!(set.idle_count(), 2);
    }

    #[test]
    fn add_busy_facility_keeps_timer() {
        let catalog = terran_catalog();
        let t = Terran::new(&catalog);
        let mut set = FacilitySet::new();
        set.add_busy_facility(t.factory, 120, Some(t.machine_shop), None)
            .unwrap();
        assert_eq!(set[0].time_remaining(), 120);
        assert_eq!(set[0].in_progress(), Some(t.machine_shop));
        assert_eq!(set.idle_count(), 0);
    }

    #[test]
    fn adding_non_facility_fails() {
        let catalog = terran_catalog();
        let t = Terran::new(&catalog);
        let mut set = FacilitySet::new();
        assert_eq!(
            set.add_facility(t.marine, None),
            Err(LogicViolation::NotAFacility {
                name: "Marine".to_string()
            })
        );
        assert!(matches!(
            set.add_busy_facility(t.stim, 10, None, None),
            Err(LogicViolation::NotAFacility { .. })
        ));
        assert!(set.is_empty());
    }

    #[test]
    fn addons_can_be_tracked_as_facilities() {
        let catalog = terran_catalog();
        let t = Terran::new(&catalog);
        let mut set = FacilitySet::new();
        set.add_facility(t.machine_shop, None).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn aggregate_feasibility() {
        let catalog = terran_catalog();
        let t = Terran::new(&catalog);
        let mut set = idle_set(&[t.command_center]);
        set.add_busy_facility(t.barracks, 40, Some(t.marine), None)
            .unwrap();

        assert!(set.can_produce_now(&t.scv));
        assert!(!set.can_produce_now(&t.marine));
        assert!(set.can_produce_eventually(&t.marine));
        assert!(!set.can_produce_eventually(&t.vulture));
    }

    #[test]
    fn min_time_eventually_picks_smallest_compatible() {
        let catalog = terran_catalog();
        let t = Terran::new(&catalog);
        let mut set = FacilitySet::new();
        set.add_busy_facility(t.barracks, 90, Some(t.marine), None)
            .unwrap();
        set.add_busy_facility(t.factory, 10, Some(t.vulture), None)
            .unwrap();
        set.add_busy_facility(t.barracks, 25, Some(t.marine), None)
            .unwrap();

        assert_eq!(set.min_time_until_eventually_available(&t.marine), Ok(25));
        assert_eq!(set.min_time_until_eventually_available(&t.vulture), Ok(10));
    }

    #[test]
    fn min_time_eventually_ignores_factories_without_addon_path() {
        let catalog = terran_catalog();
        let t = Terran::new(&catalog);
        let mut set = FacilitySet::new();
        set.add_busy_facility(t.factory, 5, Some(t.vulture), None)
            .unwrap();
        set.add_busy_facility(t.factory, 300, Some(t.machine_shop), None)
            .unwrap();

        assert_eq!(
            set.min_time_until_eventually_available(&t.siege_tank),
            Ok(300)
        );
    }

    #[test]
    fn min_time_eventually_without_candidate_fails() {
        let catalog = terran_catalog();
        let t = Terran::new(&catalog);
        let set = opening_set(&t);
        assert_eq!(
            set.min_time_until_eventually_available(&t.marine),
            Err(LogicViolation::NeverProducible {
                action: "Marine".to_string()
            })
        );
    }

    #[test]
    fn min_time_until_type_free_matches_own_type() {
        let catalog = terran_catalog();
        let t = Terran::new(&catalog);
        let mut set = FacilitySet::new();
        set.add_busy_facility(t.barracks, 70, Some(t.marine), None)
            .unwrap();
        set.add_busy_facility(t.command_center, 5, Some(t.scv), None)
            .unwrap();
        set.add_busy_facility(t.barracks, 45, Some(t.marine), None)
            .unwrap();

        assert_eq!(set.min_time_until_type_free(&t.barracks), Ok(45));
        assert_eq!(set.min_time_until_type_free(&t.command_center), Ok(5));
    }

    #[test]
    fn min_time_until_type_free_errors() {
        let catalog = terran_catalog();
        let t = Terran::new(&catalog);
        let empty = FacilitySet::new();
        assert_eq!(
            empty.min_time_until_type_free(&t.barracks),
            Err(LogicViolation::EmptyFacilitySet)
        );

        let set = opening_set(&t);
        assert_eq!(
            set.min_time_until_type_free(&t.barracks),
            Err(LogicViolation::NoFacilityOfType {
                kind: "Barracks".to_string()
            })
        );
    }

    #[test]
    fn commit_first_available_uses_lowest_index() {
        let catalog = terran_catalog();
        let t = Terran::new(&catalog);
        let mut set = idle_set(&[t.barracks, t.barracks]);
        assert_eq!(set.commit_first_available(t.marine), Ok(0));
        assert_eq!(set.commit_first_available(t.marine), Ok(1));
        assert_eq!(set[0].time_remaining(), 360);
        assert_eq!(set[1].time_remaining(), 360);
    }

    #[test]
    fn commit_first_available_without_free_facility_fails() {
        let catalog = terran_catalog();
        let t = Terran::new(&catalog);
        let mut set = idle_set(&[t.barracks]);
        set.commit_first_available(t.marine).unwrap();
        let before = set.clone();

        assert_eq!(
            set.commit_first_available(t.marine),
            Err(LogicViolation::NoFreeFacility {
                action: "Marine".to_string()
            })
        );
        assert_eq!(set, before);
    }

    #[test]
    fn advance_all_moves_every_clock() {
        let catalog = terran_catalog();
        let t = Terran::new(&catalog);
        let mut set = FacilitySet::new();
        set.add_busy_facility(t.barracks, 100, Some(t.marine), None)
            .unwrap();
        set.add_busy_facility(t.command_center, 30, Some(t.comsat), None)
            .unwrap();
        set.add_facility(t.factory, None).unwrap();

        set.advance_all(40);

        assert_eq!(set[0].time_remaining(), 60);
        assert_eq!(set[1].time_remaining(), 0);
        assert_eq!(set[1].addon(), Some(t.comsat));
        assert_eq!(set[2].time_remaining(), 0);
        assert_eq!(set.idle_count(), 2);
    }

    #[test]
    fn clones_do_not_alias() {
        let catalog = terran_catalog();
        let t = Terran::new(&catalog);
        let original = idle_set(&[t.barracks]);
        let mut branch = original.clone();
        branch.commit_first_available(t.marine).unwrap();
        branch.advance_all(10);

        assert!(original[0].is_idle());
        assert_eq!(branch[0].time_remaining(), 350);
    }

    #[test]
    fn describe_reports_each_facility() {
        let catalog = terran_catalog();
        let t = Terran::new(&catalog);
        let mut set = idle_set(&[t.command_center]);
        set.add_busy_facility(t.barracks, 42, Some(t.marine), None)
            .unwrap();

        let text = set.describe();
        assert!(text.contains("Command Center is free to assign"), "got: {text}");
        assert!(text.contains("Barracks will be free in 42 frames"), "got: {text}");
        assert_eq!(text.lines().count(), 3);
    }
}
