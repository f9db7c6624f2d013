//! State machine for a single production facility.

use crate::action::ActionDescriptor;
use crate::id::Ticks;

/// One concrete facility: its type, how long until it is free, what it
/// last started producing, and which add-on it carries.
///
/// `in_progress` is the most recently committed action. It is not cleared
/// when that action completes; only add-on completion reacts to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacilityState<A> {
    kind: A,
    time_remaining: Ticks,
    in_progress: Option<A>,
    addon: Option<A>,
}

impl<A: ActionDescriptor> FacilityState<A> {
    /// An idle facility.
    pub fn new(kind: A, addon: Option<A>) -> Self {
        Self {
            kind,
            time_remaining: 0,
            in_progress: None,
            addon,
        }
    }

    /// A facility that is busy for `time_remaining` more frames.
    pub fn busy(kind: A, time_remaining: Ticks, in_progress: Option<A>, addon: Option<A>) -> Self {
        Self {
            kind,
            time_remaining,
            in_progress,
            addon,
        }
    }

    pub fn kind(&self) -> A {
        self.kind
    }

    /// Frames until the facility is free. Zero means idle.
    pub fn time_remaining(&self) -> Ticks {
        self.time_remaining
    }

    pub fn in_progress(&self) -> Option<A> {
        self.in_progress
    }

    pub fn addon(&self) -> Option<A> {
        self.addon
    }

    pub fn is_idle(&self) -> bool {
        self.time_remaining == 0
    }

    fn produces(&self, action: &A) -> bool {
        action.producer() == Some(self.kind)
    }

    /// A facility hosts at most one add-on.
    fn has_addon_slot_for(&self, action: &A) -> bool {
        !(action.is_addon() && self.addon.is_some())
    }

    /// Whether this facility could produce `action` once it is free,
    /// ignoring its timer. A required add-on that is currently under
    /// construction here counts as present.
    pub fn can_produce_eventually(&self, action: &A) -> bool {
        if !self.produces(action) || !self.has_addon_slot_for(action) {
            return false;
        }

        match action.required_addon() {
            Some(required) => self.addon == Some(required) || self.in_progress == Some(required),
            None => true,
        }
    }

    /// Whether `action` can be committed to this facility right now. Unlike
    /// [`can_produce_eventually`](Self::can_produce_eventually), a required
    /// add-on must already be attached.
    pub fn can_produce_now(&self, action: &A) -> bool {
        if self.time_remaining > 0 {
            return false;
        }

        if !self.produces(action) || !self.has_addon_slot_for(action) {
            return false;
        }

        match action.required_addon() {
            Some(required) => self.addon == Some(required),
            None => true,
        }
    }

    /// Start producing `action`. The caller must have checked
    /// [`can_produce_now`](Self::can_produce_now).
    pub fn commit(&mut self, action: A) {
        self.time_remaining = action.build_time();
        self.in_progress = Some(action);
    }

    /// Move this facility's clock forward by `ticks` frames. Completing an
    /// add-on attaches it.
    pub fn advance(&mut self, ticks: Ticks) {
        if ticks >= self.time_remaining {
            self.time_remaining = 0;

            if let Some(action) = self.in_progress
                && action.is_addon()
            {
                self.addon = Some(action);
            }
        } else {
            self.time_remaining -= ticks;
        }
    }
}
