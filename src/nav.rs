//! Scroll-spy: keeps track of the section in view and scrolls to sections.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use tracing::{debug, info, warn};

use crate::{
    models::Section,
    observer::{IntersectionEntry, IntersectionWatcher, SubscriptionHandle},
    viewport::{ScrollBehavior, Viewport},
};

pub const VISIBILITY_THRESHOLD: f64 = 0.3;
pub const SCROLL_BUFFER: f64 = 12.0;

/// Shared, read-only view of the active section id.
#[derive(Clone, Debug)]
pub struct ActiveSection {
    id: Rc<RefCell<String>>,
    attached: Rc<Cell<bool>>,
}

impl ActiveSection {
    fn new(id: &str) -> Self {
        Self {
            id: Rc::new(RefCell::new(id.to_string())),
            attached: Rc::new(Cell::new(true)),
        }
    }

    pub fn get(&self) -> String {
        self.id.borrow().clone()
    }

    pub fn is(&self, id: &str) -> bool {
        *self.id.borrow() == id
    }

    fn detach(&self) {
        self.attached.set(false);
    }

    fn apply(&self, entries: &[IntersectionEntry]) {
        if !self.attached.get() {
            return;
        }
        // entries are applied in delivery order; the last intersecting one wins
        for entry in entries.iter().filter(|e| e.intersecting) {
            let mut current = self.id.borrow_mut();
            if *current != entry.id {
                debug!(from = %current, to = %entry.id, ratio = entry.ratio, "active section changed");
                *current = entry.id.clone();
            }
        }
    }
}

/// Holds the watcher subscription for the lifetime of the page view.
/// Dropping the tracker unsubscribes.
pub struct NavigationTracker<W: IntersectionWatcher> {
    active: ActiveSection,
    watcher: Rc<RefCell<W>>,
    subscription: Option<SubscriptionHandle>,
    scroll_buffer: f64,
}

impl<W: IntersectionWatcher> NavigationTracker<W> {
    #[cfg(test)]
    pub fn mount(sections: Vec<Section>, watcher: Rc<RefCell<W>>) -> Self {
        Self::mount_with(sections, watcher, VISIBILITY_THRESHOLD, SCROLL_BUFFER)
    }

    pub fn mount_with(
        sections: Vec<Section>,
        watcher: Rc<RefCell<W>>,
        threshold: f64,
        scroll_buffer: f64,
    ) -> Self {
        let first = sections.first().map(|s| s.id.as_str()).unwrap_or_default();
        let active = ActiveSection::new(first);
        let ids: Vec<String> = sections.iter().map(|s| s.id.clone()).collect();
        let sink = active.clone();
        let subscription = watcher
            .borrow_mut()
            .subscribe(&ids, threshold, Box::new(move |entries: &[IntersectionEntry]| sink.apply(entries)));
        info!(sections = ids.len(), threshold, "navigation tracker mounted");
        Self {
            active,
            watcher,
            subscription: Some(subscription),
            scroll_buffer,
        }
    }

    pub fn active_section(&self) -> String {
        self.active.get()
    }

    pub fn active_handle(&self) -> ActiveSection {
        self.active.clone()
    }

    /// Smooth-scrolls so the section sits just below the fixed nav bar.
    /// Unknown ids are ignored. Returns the requested offset.
    pub fn scroll_to_section(&self, viewport: &mut dyn Viewport, id: &str) -> Option<f64> {
        let Some(bounds) = viewport.element_bounds(id) else {
            debug!(id, "scroll target not found");
            return None;
        };
        let nav_height = viewport.nav_height().unwrap_or(0.0);
        let top = bounds.top - nav_height - self.scroll_buffer;
        debug!(id, top, nav_height, "scrolling to section");
        viewport.scroll_to(top, ScrollBehavior::Smooth);
        Some(top)
    }

    pub fn unmount(self) {}

    fn release(&mut self) {
        if let Some(handle) = self.subscription.take() {
            match self.watcher.try_borrow_mut() {
                Ok(mut watcher) => {
                    watcher.unsubscribe(handle);
                    info!("navigation tracker unmounted");
                }
                Err(_) => {
                    // the callback stays registered but writes into a detached cell
                    self.active.detach();
                    warn!(?handle, "watcher busy at teardown, subscription detached");
                }
            }
        }
    }
}

impl<W: IntersectionWatcher> Drop for NavigationTracker<W> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{observer::IntersectionObserver, viewport::fake::FakeViewport};

    fn sections() -> Vec<Section> {
        ["hero", "about", "skills", "projects", "contact"]
            .iter()
            .map(|id| Section { id: id.to_string(), label: id.to_string() })
            .collect()
    }

    // five 40-row sections stacked from row 0
    fn page(height: f64) -> FakeViewport {
        let mut vp = FakeViewport::new(height);
        for (i, s) in sections().iter().enumerate() {
            vp = vp.with_element(&s.id, i as f64 * 40.0, 40.0);
        }
        vp
    }

    fn mounted() -> (Rc<RefCell<IntersectionObserver>>, NavigationTracker<IntersectionObserver>) {
        let observer = Rc::new(RefCell::new(IntersectionObserver::new()));
        let tracker = NavigationTracker::mount(sections(), observer.clone());
        (observer, tracker)
    }

    #[test]
    fn starts_on_first_section() {
        let (_observer, tracker) = mounted();
        assert_eq!(tracker.active_section(), "hero");
    }

    #[test]
    fn section_crossing_threshold_becomes_active() {
        let (observer, tracker) = mounted();
        let mut vp = page(40.0);
        observer.borrow_mut().poll(&vp);
        assert_eq!(tracker.active_section(), "hero");

        // about is 20% visible
        vp.scroll = 8.0;
        observer.borrow_mut().poll(&vp);
        assert_eq!(tracker.active_section(), "hero");

        // about is 35% visible
        vp.scroll = 14.0;
        observer.borrow_mut().poll(&vp);
        assert_eq!(tracker.active_section(), "about");
    }

    #[test]
    fn last_intersecting_entry_in_a_batch_wins() {
        let (observer, tracker) = mounted();
        // a tall viewport shows hero, about and skills at once
        let vp = page(120.0);
        observer.borrow_mut().poll(&vp);
        assert_eq!(tracker.active_section(), "skills");
    }

    #[test]
    fn scroll_offset_subtracts_nav_and_buffer() {
        let (_observer, tracker) = mounted();
        let mut vp = page(40.0).with_nav(3.0);
        let top = tracker.scroll_to_section(&mut vp, "projects");
        assert_eq!(top, Some(120.0 - 3.0 - 12.0));
        assert_eq!(vp.scroll_calls, [(105.0, ScrollBehavior::Smooth)]);
    }

    #[test]
    fn missing_nav_counts_as_zero_height() {
        let (_observer, tracker) = mounted();
        let mut vp = page(40.0);
        assert_eq!(tracker.scroll_to_section(&mut vp, "about"), Some(40.0 - 12.0));
    }

    #[test]
    fn unknown_section_is_a_no_op() {
        let (_observer, tracker) = mounted();
        let mut vp = page(40.0).with_nav(3.0);
        vp.scroll = 17.0;
        assert_eq!(tracker.scroll_to_section(&mut vp, "nonexistent"), None);
        assert!(vp.scroll_calls.is_empty());
        assert_eq!(vp.scroll, 17.0);
    }

    #[test]
    fn teardown_stops_updates() {
        let (observer, tracker) = mounted();
        let active = tracker.active_handle();
        assert_eq!(observer.borrow().subscription_count(), 1);
        tracker.unmount();
        assert_eq!(observer.borrow().subscription_count(), 0);

        let mut vp = page(40.0);
        vp.scroll = 160.0;
        observer.borrow_mut().poll(&vp);
        assert!(active.is("hero"));
    }

    #[test]
    fn drop_releases_subscription() {
        let observer = Rc::new(RefCell::new(IntersectionObserver::new()));
        {
            let _tracker = NavigationTracker::mount(sections(), observer.clone());
            assert_eq!(observer.borrow().subscription_count(), 1);
        }
        assert_eq!(observer.borrow().subscription_count(), 0);
    }

    #[test]
    fn teardown_while_watcher_is_busy_stops_updates() {
        let (observer, tracker) = mounted();
        let active = tracker.active_handle();
        {
            let _busy = observer.borrow();
            drop(tracker);
        }
        // the handle could not be released, but its callback no longer writes
        assert_eq!(observer.borrow().subscription_count(), 1);
        let mut vp = page(40.0);
        vp.scroll = 160.0;
        observer.borrow_mut().poll(&vp);
        assert!(active.is("hero"));
    }
}
