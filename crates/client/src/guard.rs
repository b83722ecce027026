use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;

/// The entity a mutation is keyed on.
///
/// Guarded mutations for different targets proceed independently; a second
/// mutation for the same target is refused while the first is unconfirmed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MutationTarget {
    Proposal(u64),
    Request(u64),
    Disaster(u64),
}

/// Per-entity in-flight mutation guard.
///
/// A target slot is held from build to settle; the permit clears it on drop,
/// so no error path can leave a slot stuck.
#[derive(Clone, Debug, Default)]
pub struct InFlightGuard {
    in_flight: Arc<Mutex<HashSet<MutationTarget>>>,
}

impl InFlightGuard {
    /// Claims `target`, or returns `None` when a mutation for it is
    /// already in flight.
    #[must_use]
    pub fn acquire(&self, target: MutationTarget) -> Option<InFlightPermit> {
        let mut in_flight = self.in_flight.lock();

        in_flight.insert(target).then(|| InFlightPermit {
            guard: Arc::clone(&self.in_flight),
            target,
        })
    }

    #[must_use]
    pub fn is_in_flight(&self, target: MutationTarget) -> bool {
        self.in_flight.lock().contains(&target)
    }
}

#[derive(Debug)]
pub struct InFlightPermit {
    guard: Arc<Mutex<HashSet<MutationTarget>>>,
    target: MutationTarget,
}

impl Drop for InFlightPermit {
    fn drop(&mut self) {
        let _removed = self.guard.lock().remove(&self.target);
    }
}
