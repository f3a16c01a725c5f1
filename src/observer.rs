//! Visibility watcher with an explicit subscription lifecycle.

use tracing::{debug, trace};

use crate::viewport::Viewport;

#[derive(Clone, Debug, PartialEq)]
pub struct IntersectionEntry {
    pub id: String,
    pub ratio: f64,
    pub intersecting: bool,
}

pub type VisibilityCallback = Box<dyn FnMut(&[IntersectionEntry])>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u64);

pub trait IntersectionWatcher {
    fn subscribe(
        &mut self,
        ids: &[String],
        threshold: f64,
        on_change: VisibilityCallback,
    ) -> SubscriptionHandle;

    /// Returns `false` if the handle was not registered.
    fn unsubscribe(&mut self, handle: SubscriptionHandle) -> bool;
}

struct Target {
    id: String,
    // last reported state, None until the first notification
    reported: Option<bool>,
}

struct Registration {
    handle: SubscriptionHandle,
    threshold: f64,
    targets: Vec<Target>,
    callback: VisibilityCallback,
}

/// Computes intersections from the viewport geometry each time it is polled.
#[derive(Default)]
pub struct IntersectionObserver {
    next_handle: u64,
    registrations: Vec<Registration>,
}

impl IntersectionObserver {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn subscription_count(&self) -> usize {
        self.registrations.len()
    }

    /// Recomputes visibility and delivers one batch per subscription whose
    /// targets changed state since the last report.
    pub fn poll(&mut self, viewport: &dyn Viewport) {
        let start = viewport.scroll_y();
        let len = viewport.viewport_height();
        for reg in &mut self.registrations {
            let mut batch = Vec::new();
            for target in &mut reg.targets {
                let Some(bounds) = viewport.element_bounds(&target.id) else {
                    continue;
                };
                let ratio = bounds.visible_ratio(start, len);
                let intersecting = ratio >= reg.threshold;
                if target.reported != Some(intersecting) {
                    target.reported = Some(intersecting);
                    batch.push(IntersectionEntry { id: target.id.clone(), ratio, intersecting });
                }
            }
            if !batch.is_empty() {
                trace!(handle = reg.handle.0, entries = batch.len(), "delivering intersection batch");
                (reg.callback)(&batch);
            }
        }
    }
}

impl IntersectionWatcher for IntersectionObserver {
    fn subscribe(
        &mut self,
        ids: &[String],
        threshold: f64,
        on_change: VisibilityCallback,
    ) -> SubscriptionHandle {
        let handle = SubscriptionHandle(self.next_handle);
        self.next_handle += 1;
        self.registrations.push(Registration {
            handle,
            threshold,
            targets: ids.iter().map(|id| Target { id: id.clone(), reported: None }).collect(),
            callback: on_change,
        });
        debug!(handle = handle.0, targets = ids.len(), threshold, "observing sections");
        handle
    }

    fn unsubscribe(&mut self, handle: SubscriptionHandle) -> bool {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.handle != handle);
        let removed = self.registrations.len() != before;
        debug!(handle = handle.0, removed, "stopped observing sections");
        removed
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::viewport::fake::FakeViewport;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn recorder() -> (Rc<RefCell<Vec<Vec<IntersectionEntry>>>>, VisibilityCallback) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        (log, Box::new(move |entries: &[IntersectionEntry]| sink.borrow_mut().push(entries.to_vec())))
    }

    #[test]
    fn first_poll_reports_every_target_in_registration_order() {
        let vp = FakeViewport::new(40.0)
            .with_element("a", 0.0, 40.0)
            .with_element("b", 40.0, 40.0);
        let mut observer = IntersectionObserver::new();
        let (log, cb) = recorder();
        observer.subscribe(&ids(&["a", "b"]), 0.3, cb);
        observer.poll(&vp);

        let log = log.borrow();
        assert_eq!(log.len(), 1);
        let batch: Vec<(&str, bool)> = log[0].iter().map(|e| (e.id.as_str(), e.intersecting)).collect();
        assert_eq!(batch, [("a", true), ("b", false)]);
    }

    #[test]
    fn only_threshold_crossings_are_reported() {
        let mut vp = FakeViewport::new(40.0)
            .with_element("a", 0.0, 40.0)
            .with_element("b", 40.0, 40.0);
        let mut observer = IntersectionObserver::new();
        let (log, cb) = recorder();
        observer.subscribe(&ids(&["a", "b"]), 0.3, cb);
        observer.poll(&vp);

        // b is 25% visible: below threshold, nothing changes
        vp.scroll = 10.0;
        observer.poll(&vp);
        assert_eq!(log.borrow().len(), 1);

        // b is 50% visible, a still 50%
        vp.scroll = 20.0;
        observer.poll(&vp);
        let log = log.borrow();
        assert_eq!(log.len(), 2);
        assert_eq!(log[1].len(), 1);
        assert_eq!(log[1][0].id, "b");
        assert!(log[1][0].intersecting);
    }

    #[test]
    fn missing_targets_are_skipped() {
        let vp = FakeViewport::new(40.0).with_element("a", 0.0, 10.0);
        let mut observer = IntersectionObserver::new();
        let (log, cb) = recorder();
        observer.subscribe(&ids(&["ghost", "a"]), 0.3, cb);
        observer.poll(&vp);
        assert_eq!(log.borrow()[0].len(), 1);
    }

    #[test]
    fn unsubscribed_callbacks_never_fire() {
        let vp = FakeViewport::new(40.0).with_element("a", 0.0, 10.0);
        let mut observer = IntersectionObserver::new();
        let (log, cb) = recorder();
        let handle = observer.subscribe(&ids(&["a"]), 0.3, cb);
        assert!(observer.unsubscribe(handle));
        assert!(!observer.unsubscribe(handle));
        observer.poll(&vp);
        assert!(log.borrow().is_empty());
        assert_eq!(observer.subscription_count(), 0);
    }
}
