//! Tick-scheduled delayed actions
//!
//! Delayed behaviors are stored as data keyed by the owning entity id instead
//! of callbacks. The tick loop takes due entries once per tick and checks that
//! the owner is still alive; removing an entity cancels everything it owns.

use super::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledAction {
    /// A jumping enemy comes back down at a random nearby spot
    JumpLanding,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledEntry {
    pub fire_at_tick: u64,
    pub owner: EntityId,
    pub action: ScheduledAction,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    entries: Vec<ScheduledEntry>,
}

impl Scheduler {
    pub fn schedule(&mut self, fire_at_tick: u64, owner: EntityId, action: ScheduledAction) {
        self.entries.push(ScheduledEntry {
            fire_at_tick,
            owner,
            action,
        });
    }

    /// Remove and return every entry due at or before `now_tick`
    ///
    /// Entries come back ordered by due tick, then by scheduling order.
    pub fn take_due(&mut self, now_tick: u64) -> Vec<ScheduledEntry> {
        let (mut due, pending): (Vec<_>, Vec<_>) = self
            .entries
            .drain(..)
            .partition(|e| e.fire_at_tick <= now_tick);
        self.entries = pending;
        // Stable sort keeps scheduling order within the same tick
        due.sort_by_key(|e| e.fire_at_tick);
        due
    }

    /// Drop all pending entries owned by `owner`, returning how many were dropped
    pub fn cancel_owner(&mut self, owner: EntityId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.owner != owner);
        before - self.entries.len()
    }

    pub fn pending_for(&self, owner: EntityId) -> usize {
        self.entries.iter().filter(|e| e.owner == owner).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_due_in_order() {
        let mut sched = Scheduler::default();
        sched.schedule(10, 1, ScheduledAction::JumpLanding);
        sched.schedule(5, 2, ScheduledAction::JumpLanding);
        sched.schedule(20, 3, ScheduledAction::JumpLanding);
        sched.schedule(5, 4, ScheduledAction::JumpLanding);

        assert!(sched.take_due(4).is_empty());
        let due = sched.take_due(10);
        let owners: Vec<_> = due.iter().map(|e| e.owner).collect();
        assert_eq!(owners, vec![2, 4, 1]);
        assert_eq!(sched.len(), 1);
    }

    #[test]
    fn test_cancel_owner() {
        let mut sched = Scheduler::default();
        sched.schedule(10, 7, ScheduledAction::JumpLanding);
        sched.schedule(12, 7, ScheduledAction::JumpLanding);
        sched.schedule(12, 8, ScheduledAction::JumpLanding);

        assert_eq!(sched.cancel_owner(7), 2);
        assert_eq!(sched.pending_for(7), 0);
        assert_eq!(sched.pending_for(8), 1);
        assert_eq!(sched.cancel_owner(7), 0);
    }
}
