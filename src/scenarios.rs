//! Card Scenario Tests
//!
//! Drives `CardDriver` end to end with an in-memory host and a manual
//! scheduler.

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use serde_json::{json, Map, Value};

    use crate::config::CardConfig;
    use crate::controller::{CardController, CountUpdate, NO_RESULTS};
    use crate::driver::{CardDriver, HostPort};
    use crate::error::{CardError, CardResult};
    use crate::models::{Adjustment, HostSnapshot, RawEntity, ServiceCall};
    use crate::reconcile::manual::ManualScheduler;
    use crate::reconcile::RECONCILE_DELAY;

    #[derive(Default)]
    struct HostState {
        states: Map<String, Value>,
        calls: Vec<ServiceCall>,
        fail_calls: bool,
    }

    /// In-memory host; clones share state like repeated pushes of one `hass`
    #[derive(Clone, Default)]
    struct FakeHost {
        inner: Rc<RefCell<HostState>>,
    }

    impl FakeHost {
        fn with(entities: &[(&str, &str, &str, &str)]) -> Self {
            let host = FakeHost::default();
            for (id, category, name, state) in entities {
                host.put(id, category, name, state);
            }
            host
        }

        fn put(&self, id: &str, category: &str, name: &str, state: &str) {
            self.inner.borrow_mut().states.insert(
                id.to_string(),
                json!({
                    "entity_id": id,
                    "state": state,
                    "attributes": { "category": category, "product_name": name }
                }),
            );
        }

        fn remove(&self, id: &str) {
            self.inner.borrow_mut().states.remove(id);
        }

        fn calls(&self) -> Vec<ServiceCall> {
            self.inner.borrow().calls.clone()
        }
    }

    impl HostPort for FakeHost {
        fn snapshot(&self, _prefix: &str) -> CardResult<HostSnapshot> {
            Ok(HostSnapshot::from_states(self.inner.borrow().states.clone()))
        }

        fn entity(&self, entity_id: &str) -> Option<RawEntity> {
            let value = self.inner.borrow().states.get(entity_id).cloned()?;
            serde_json::from_value(value).ok()
        }

        fn call_service(&self, call: &ServiceCall) -> CardResult<()> {
            let mut inner = self.inner.borrow_mut();
            if inner.fail_calls {
                return Err(CardError::Host("offline".to_string()));
            }
            inner.calls.push(call.clone());
            Ok(())
        }
    }

    fn driver(config: CardConfig) -> (CardDriver<FakeHost, ManualScheduler>, ManualScheduler) {
        let scheduler = ManualScheduler::default();
        let controller = CardController::new(config).unwrap();
        (CardDriver::new(controller, scheduler.clone()), scheduler)
    }

    fn recorder() -> (Rc<RefCell<Vec<CountUpdate>>>, impl Fn() -> Box<dyn FnOnce(CountUpdate)>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let make = move || {
            let sink = Rc::clone(&sink);
            Box::new(move |update: CountUpdate| sink.borrow_mut().push(update)) as Box<dyn FnOnce(CountUpdate)>
        };
        (seen, make)
    }

    #[test]
    fn test_milk_scenario() {
        let (driver, scheduler) = driver(CardConfig::with_prefix("pantry_tracker."));
        let host = FakeHost::with(&[("pantry_tracker.milk", "dairy", "Milk", "3")]);

        let pass = driver.push_host(host.clone()).unwrap();
        assert_eq!(pass.groups().len(), 1);
        assert_eq!(pass.groups()[0].name, "dairy");
        assert_eq!(pass.groups()[0].rows.len(), 1);
        assert_eq!(pass.groups()[0].rows[0].count, "3");

        let (_, make) = recorder();
        let update = driver.adjust(Adjustment::Increment, "pantry_tracker.milk", make()).unwrap();
        assert_eq!(update.count, "4");
        assert_eq!(
            host.calls(),
            vec![ServiceCall {
                domain: "pantry_tracker".to_string(),
                service: "increase_count".to_string(),
                entity_id: "pantry_tracker.milk".to_string(),
            }]
        );
        assert_eq!(scheduler.delays(), vec![RECONCILE_DELAY]);
        assert_eq!(driver.pending_reconciles("pantry_tracker.milk"), 1);
    }

    #[test]
    fn test_excluded_category_never_appears() {
        let mut config = CardConfig::with_prefix("pantry_tracker.");
        config.category_filter = true;
        config.filter_categories = vec!["dairy".to_string()];
        let (driver, _) = driver(config);
        let host = FakeHost::with(&[("pantry_tracker.milk", "dairy", "Milk", "3")]);

        let pass = driver.push_host(host).unwrap();
        assert!(pass.groups().is_empty());
        assert!(pass.categories.is_empty());
        assert!(driver.select_category("dairy").groups().is_empty());
    }

    #[test]
    fn test_search_scenario() {
        let mut config = CardConfig::with_prefix("pantry_tracker.");
        config.search = true;
        let (driver, _) = driver(config);
        driver.push_host(FakeHost::with(&[("pantry_tracker.milk", "dairy", "Milk", "3")]));

        let pass = driver.set_search("mil");
        assert_eq!(pass.groups()[0].rows[0].name, "Milk");

        let pass = driver.set_search("xyz");
        assert!(pass.groups().is_empty());
        assert_eq!(pass.message(), Some(NO_RESULTS));
    }

    #[test]
    fn test_reconcile_overwrites_optimistic_count() {
        let (driver, scheduler) = driver(CardConfig::with_prefix("pantry_tracker."));
        let host = FakeHost::with(&[("pantry_tracker.milk", "dairy", "Milk", "3")]);
        driver.push_host(host.clone());

        let (seen, make) = recorder();
        driver.adjust(Adjustment::Increment, "pantry_tracker.milk", make());

        // The host settled on a different value than the optimistic one
        host.put("pantry_tracker.milk", "dairy", "Milk", "10");
        scheduler.run_all();

        assert_eq!(
            *seen.borrow(),
            vec![CountUpdate {
                entity_id: "pantry_tracker.milk".to_string(),
                count: "10".to_string(),
            }]
        );
        assert_eq!(driver.pending_reconciles("pantry_tracker.milk"), 0);
    }

    #[test]
    fn test_overlapping_adjustments_race() {
        let (driver, scheduler) = driver(CardConfig::with_prefix("pantry_tracker."));
        let host = FakeHost::with(&[("pantry_tracker.milk", "dairy", "Milk", "3")]);
        driver.push_host(host.clone());

        let (seen, make) = recorder();
        assert_eq!(driver.adjust(Adjustment::Increment, "pantry_tracker.milk", make()).unwrap().count, "4");
        assert_eq!(driver.adjust(Adjustment::Increment, "pantry_tracker.milk", make()).unwrap().count, "5");
        assert_eq!(driver.pending_reconciles("pantry_tracker.milk"), 2);
        assert_eq!(host.calls().len(), 2);

        // Each timer reads whatever the host holds when it fires
        host.put("pantry_tracker.milk", "dairy", "Milk", "4");
        assert!(scheduler.run_next());
        host.put("pantry_tracker.milk", "dairy", "Milk", "6");
        assert!(scheduler.run_next());
        assert!(!scheduler.run_next());

        let counts: Vec<_> = seen.borrow().iter().map(|u| u.count.clone()).collect();
        assert_eq!(counts, vec!["4".to_string(), "6".to_string()]);
    }

    #[test]
    fn test_reconcile_skips_entity_gone_from_host() {
        let (driver, scheduler) = driver(CardConfig::with_prefix("pantry_tracker."));
        let host = FakeHost::with(&[("pantry_tracker.milk", "dairy", "Milk", "3")]);
        driver.push_host(host.clone());

        let (seen, make) = recorder();
        driver.adjust(Adjustment::Decrement, "pantry_tracker.milk", make());
        host.remove("pantry_tracker.milk");
        scheduler.run_all();

        assert!(seen.borrow().is_empty());
        assert_eq!(driver.pending_reconciles("pantry_tracker.milk"), 0);
    }

    #[test]
    fn test_service_failure_is_not_surfaced() {
        let (driver, scheduler) = driver(CardConfig::with_prefix("pantry_tracker."));
        let host = FakeHost::with(&[("pantry_tracker.milk", "dairy", "Milk", "3")]);
        host.inner.borrow_mut().fail_calls = true;
        driver.push_host(host.clone());

        let (_, make) = recorder();
        let update = driver.adjust(Adjustment::Decrement, "pantry_tracker.milk", make());
        assert_eq!(update.unwrap().count, "2");
        assert!(host.calls().is_empty());
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_repeated_push_is_a_no_op() {
        let (driver, _) = driver(CardConfig::with_prefix("pantry_tracker."));
        let host = FakeHost::with(&[
            ("pantry_tracker.milk", "dairy", "Milk", "3"),
            ("pantry_tracker.bread", "bakery", "Bread", "1"),
        ]);

        assert!(driver.push_host(host.clone()).is_some());
        host.put("pantry_tracker.milk", "dairy", "Milk", "8");
        assert!(driver.push_host(host.clone()).is_none());

        host.put("pantry_tracker.eggs", "dairy", "Eggs", "12");
        let pass = driver.push_host(host).unwrap();
        assert_eq!(pass.groups()[0].rows.len(), 2);
    }

    #[test]
    fn test_filters_survive_snapshot_updates() {
        let mut config = CardConfig::with_prefix("pantry_tracker.");
        config.search = true;
        let (driver, _) = driver(config);
        let host = FakeHost::with(&[("pantry_tracker.milk", "dairy", "Milk", "3")]);
        driver.push_host(host.clone());
        driver.set_search("bread");

        host.put("pantry_tracker.bread", "bakery", "Bread", "1");
        let pass = driver.push_host(host).unwrap();
        assert_eq!(pass.groups().len(), 1);
        assert_eq!(pass.groups()[0].name, "bakery");
    }

    #[test]
    fn test_cancelled_reconciles_never_fire() {
        let (driver, scheduler) = driver(CardConfig::with_prefix("pantry_tracker."));
        let host = FakeHost::with(&[
            ("pantry_tracker.milk", "dairy", "Milk", "3"),
            ("pantry_tracker.bread", "bakery", "Bread", "1"),
        ]);
        driver.push_host(host.clone());

        let (seen, make) = recorder();
        driver.adjust(Adjustment::Increment, "pantry_tracker.milk", make());
        driver.adjust(Adjustment::Increment, "pantry_tracker.milk", make());
        driver.adjust(Adjustment::Decrement, "pantry_tracker.bread", make());
        assert_eq!(scheduler.pending(), 3);

        assert_eq!(driver.cancel_reconciles(), 3);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(driver.pending_reconciles("pantry_tracker.milk"), 0);

        scheduler.run_all();
        assert!(seen.borrow().is_empty());
        assert_eq!(host.calls().len(), 3);
    }

    #[test]
    fn test_search_reset_restores_groups() {
        let mut config = CardConfig::with_prefix("pantry_tracker.");
        config.search = true;
        let (driver, _) = driver(config);
        driver.push_host(FakeHost::with(&[
            ("pantry_tracker.milk", "dairy", "Milk", "3"),
            ("pantry_tracker.bread", "bakery", "Bread", "1"),
        ]));

        assert_eq!(driver.set_search("xyz").message(), Some(NO_RESULTS));
        let pass = driver.set_search("");
        let names: Vec<_> = pass.groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["dairy", "bakery"]);
    }

    #[test]
    fn test_adjust_before_host_still_schedules() {
        let (driver, scheduler) = driver(CardConfig::with_prefix("pantry_tracker."));
        let (seen, make) = recorder();

        assert!(driver.adjust(Adjustment::Increment, "pantry_tracker.milk", make()).is_none());
        scheduler.run_all();
        assert!(seen.borrow().is_empty());
    }
}
