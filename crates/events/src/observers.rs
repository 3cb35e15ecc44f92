//! Weakly-held observer registry.
//!
//! Observers are notified **synchronously**, in registration order, on the
//! caller's thread. The registry only holds `Weak` references: a view that is
//! torn down simply drops its `Arc` and is pruned on the next notification.
//! There is no unsubscribe call and no locking; the owner is expected to live
//! on a single event-processing thread.

use std::sync::Weak;

/// Ordered set of weakly-held observers of type `O` (usually a `dyn Trait`).
pub struct ObserverSet<O: ?Sized> {
    observers: Vec<Weak<O>>,
}

impl<O: ?Sized> ObserverSet<O> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. The set does not keep it alive.
    pub fn register(&mut self, observer: Weak<O>) {
        self.observers.push(observer);
    }

    /// Call `f` for every live observer, dropping the dead ones.
    pub fn notify(&mut self, mut f: impl FnMut(&O)) {
        let before = self.observers.len();

        self.observers.retain(|weak| match weak.upgrade() {
            Some(observer) => {
                f(&*observer);
                true
            }
            None => false,
        });

        let pruned = before - self.observers.len();
        if pruned > 0 {
            tracing::debug!(pruned, "dropped observers pruned");
        }
    }
}

impl<O: ?Sized> Default for ObserverSet<O> {
    fn default() -> Self {
        Self {
            observers: Vec::new(),
        }
    }
}

impl<O: ?Sized> core::fmt::Debug for ObserverSet<O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ObserverSet")
            .field("registered", &self.observers.len())
            .finish()
    }
}
