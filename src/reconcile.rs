//! Delayed Reconciliation
//!
//! After an adjustment the displayed count is corrected from the host once a
//! fixed delay has passed. Each scheduled task is owned by the entity it
//! corrects; overlapping tasks for the same entity are kept independent, so
//! the last one scheduled writes last.

use std::collections::HashMap;
use std::time::Duration;

use gloo_timers::callback::Timeout;

/// Delay between an adjustment and its correction
pub const RECONCILE_DELAY: Duration = Duration::from_millis(1000);

/// Deferred one-shot task runner
pub trait Scheduler {
    /// Dropping the handle before the task fires cancels it
    type Handle;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Self::Handle;
}

/// Browser scheduler backed by `setTimeout`
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Timeout {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, task)
    }
}

/// Ticket identifying one scheduled reconciliation
pub type Ticket = u64;

/// Pending reconciliation handles, keyed by entity id
pub struct PendingReconciles<H> {
    next_ticket: Ticket,
    by_entity: HashMap<String, Vec<(Ticket, H)>>,
}

impl<H> PendingReconciles<H> {
    pub fn new() -> Self {
        Self {
            next_ticket: 0,
            by_entity: HashMap::new(),
        }
    }

    /// Reserve a ticket before the task is scheduled, so the task can refer to it
    pub fn reserve(&mut self) -> Ticket {
        self.next_ticket += 1;
        self.next_ticket
    }

    pub fn track(&mut self, entity_id: &str, ticket: Ticket, handle: H) {
        self.by_entity
            .entry(entity_id.to_string())
            .or_default()
            .push((ticket, handle));
    }

    /// Remove a fired task and hand its handle back to the caller
    pub fn complete(&mut self, entity_id: &str, ticket: Ticket) -> Option<H> {
        let tasks = self.by_entity.get_mut(entity_id)?;
        let index = tasks.iter().position(|(t, _)| *t == ticket)?;
        let (_, handle) = tasks.remove(index);
        if tasks.is_empty() {
            self.by_entity.remove(entity_id);
        }
        Some(handle)
    }

    pub fn pending_for(&self, entity_id: &str) -> usize {
        self.by_entity.get(entity_id).map_or(0, Vec::len)
    }

    /// Take every pending handle, e.g. to cancel them all by dropping
    pub fn drain(&mut self) -> Vec<H> {
        self.by_entity
            .drain()
            .flat_map(|(_, tasks)| tasks.into_iter().map(|(_, handle)| handle))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.by_entity.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_entity.is_empty()
    }
}

impl<H> Default for PendingReconciles<H> {
    fn default() -> Self {
        Self::new()
    }
}
