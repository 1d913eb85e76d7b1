//! Card Driver
//!
//! Wires the controller to a host and a scheduler: snapshot pushes, filter
//! changes and the adjust → service call → reconciliation sequence.

use std::cell::RefCell;
use std::rc::Rc;

use crate::controller::{CardController, CountUpdate, RenderPass, SnapshotSink};
use crate::error::CardResult;
use crate::models::{Adjustment, HostSnapshot, RawEntity, ServiceCall};
use crate::reconcile::{PendingReconciles, Scheduler, RECONCILE_DELAY};

/// What the card needs from the home-automation host
pub trait HostPort {
    /// Entities the host currently knows about. Hosts may skip ids outside
    /// `prefix`; the card applies its own selection either way.
    fn snapshot(&self, prefix: &str) -> CardResult<HostSnapshot>;

    /// Current record for one entity
    fn entity(&self, entity_id: &str) -> Option<RawEntity>;

    /// Fire-and-forget service call
    fn call_service(&self, call: &ServiceCall) -> CardResult<()>;
}

pub struct CardDriver<H, S: Scheduler> {
    controller: Rc<RefCell<CardController>>,
    host: Rc<RefCell<Option<H>>>,
    scheduler: S,
    pending: Rc<RefCell<PendingReconciles<S::Handle>>>,
}

impl<H, S> CardDriver<H, S>
where
    H: HostPort + Clone + 'static,
    S: Scheduler,
    S::Handle: 'static,
{
    pub fn new(controller: CardController, scheduler: S) -> Self {
        Self {
            controller: Rc::new(RefCell::new(controller)),
            host: Rc::new(RefCell::new(None)),
            scheduler,
            pending: Rc::new(RefCell::new(PendingReconciles::new())),
        }
    }

    /// Take a new host object. The handle is always replaced (reconciliation
    /// reads the latest one); a render pass is returned only when the relevant
    /// entity set changed.
    pub fn push_host(&self, host: H) -> Option<RenderPass> {
        let prefix = self.controller.borrow().config().entity_prefix.clone();
        let snapshot = match host.snapshot(&prefix) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                log::warn!("[HOST] Ignoring state push: {}", e);
                None
            }
        };
        *self.host.borrow_mut() = Some(host);
        let snapshot = snapshot?;
        self.controller.borrow_mut().push_snapshot(&snapshot)
    }

    pub fn set_search(&self, text: &str) -> RenderPass {
        self.controller.borrow_mut().set_search(text)
    }

    pub fn select_category(&self, category: &str) -> RenderPass {
        self.controller.borrow_mut().select_category(category)
    }

    pub fn card_size(&self) -> u32 {
        self.controller.borrow().card_size()
    }

    pub fn pending_reconciles(&self, entity_id: &str) -> usize {
        self.pending.borrow().pending_for(entity_id)
    }

    /// Cancel every scheduled reconciliation. Returns how many were pending.
    pub fn cancel_reconciles(&self) -> usize {
        let cancelled = self.pending.borrow_mut().drain();
        log::debug!("[RECONCILE] Cancelling {} pending", cancelled.len());
        cancelled.len()
    }

    /// Optimistically adjust a count, ask the host to do the same, and schedule
    /// the correction. `on_reconciled` runs when the correction lands.
    pub fn adjust<F>(&self, direction: Adjustment, entity_id: &str, on_reconciled: F) -> Option<CountUpdate>
    where
        F: FnOnce(CountUpdate) + 'static,
    {
        let (update, call) = self.controller.borrow_mut().adjust(direction, entity_id);

        let host = self.host.borrow().clone();
        match host {
            Some(host) => {
                if let Err(e) = host.call_service(&call) {
                    log::warn!("[HOST] {}.{} failed for {}: {}", call.domain, call.service, entity_id, e);
                }
            }
            None => log::warn!("[HOST] No host yet, dropping {} for {}", call.service, entity_id),
        }

        self.schedule_reconcile(entity_id, on_reconciled);
        update
    }

    fn schedule_reconcile<F>(&self, entity_id: &str, on_reconciled: F)
    where
        F: FnOnce(CountUpdate) + 'static,
    {
        let ticket = self.pending.borrow_mut().reserve();
        let controller = Rc::clone(&self.controller);
        let host = Rc::clone(&self.host);
        let pending = Rc::clone(&self.pending);
        let id = entity_id.to_string();

        let task = Box::new(move || {
            pending.borrow_mut().complete(&id, ticket);

            let current = host.borrow().as_ref().and_then(|h| h.entity(&id));
            let Some(entity) = current else {
                log::debug!("[RECONCILE] {} no longer known to host", id);
                return;
            };
            let update = controller.borrow_mut().reconcile(&id, &entity.state_text());
            if let Some(update) = update {
                log::debug!("[RECONCILE] {} -> {}", id, update.count);
                on_reconciled(update);
            }
        });

        let handle = self.scheduler.schedule(RECONCILE_DELAY, task);
        self.pending.borrow_mut().track(entity_id, ticket, handle);
    }
}
