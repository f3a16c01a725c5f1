//! Document and viewport capability used by the navigation logic.
//!
//! Everything the scroll-spy needs to know about page geometry goes through
//! [`Viewport`], so the terminal page and the test fake are interchangeable.

/// Vertical extent of an element in document coordinates (rows).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Share of this element inside `[start, start + len)`, in `0.0..=1.0`.
    pub fn visible_ratio(&self, start: f64, len: f64) -> f64 {
        let end = start + len;
        if self.height <= 0.0 {
            return if self.top >= start && self.top < end { 1.0 } else { 0.0 };
        }
        let overlap = (self.top + self.height).min(end) - self.top.max(start);
        (overlap.max(0.0) / self.height).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

pub trait Viewport {
    /// Document-relative bounds of the element with `id`, if it is rendered.
    fn element_bounds(&self, id: &str) -> Option<Bounds>;
    /// Rendered height of the fixed navigation bar, `None` when it is not drawn.
    fn nav_height(&self) -> Option<f64>;
    fn scroll_y(&self) -> f64;
    fn viewport_height(&self) -> f64;
    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);
}

#[cfg(test)]
pub mod fake {
    use std::collections::HashMap;

    use super::*;

    /// In-memory viewport that records every scroll request.
    #[derive(Default)]
    pub struct FakeViewport {
        pub elements: HashMap<String, Bounds>,
        pub nav: Option<f64>,
        pub scroll: f64,
        pub height: f64,
        pub scroll_calls: Vec<(f64, ScrollBehavior)>,
    }

    impl FakeViewport {
        pub fn new(height: f64) -> Self {
            Self { height, ..Default::default() }
        }

        pub fn with_element(mut self, id: &str, top: f64, height: f64) -> Self {
            self.elements.insert(id.to_string(), Bounds::new(top, height));
            self
        }

        pub fn with_nav(mut self, height: f64) -> Self {
            self.nav = Some(height);
            self
        }
    }

    impl Viewport for FakeViewport {
        fn element_bounds(&self, id: &str) -> Option<Bounds> {
            self.elements.get(id).copied()
        }

        fn nav_height(&self) -> Option<f64> {
            self.nav
        }

        fn scroll_y(&self) -> f64 {
            self.scroll
        }

        fn viewport_height(&self) -> f64 {
            self.height
        }

        fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
            self.scroll_calls.push((top, behavior));
            self.scroll = top;
        }
    }
}
