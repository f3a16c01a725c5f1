use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::models::{Skill, SkillCategory};

const TRANSITION: Duration = Duration::from_millis(300);

pub struct SkillCategorySelector {
    categories: Vec<SkillCategory>,
    active: usize,
    changed_at: Option<Instant>,
}

impl SkillCategorySelector {
    /// Falls back to the first category when `default_key` is unknown.
    pub fn new(categories: Vec<SkillCategory>, default_key: &str) -> Self {
        let active = categories.iter().position(|c| c.key == default_key).unwrap_or(0);
        Self { categories, active, changed_at: None }
    }

    pub fn categories(&self) -> &[SkillCategory] {
        &self.categories
    }

    pub fn active_key(&self) -> &str {
        self.categories.get(self.active).map(|c| c.key.as_str()).unwrap_or_default()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_skills(&self) -> &[Skill] {
        self.categories.get(self.active).map(|c| c.skills.as_slice()).unwrap_or_default()
    }

    pub fn select(&mut self, key: &str) -> bool {
        match self.categories.iter().position(|c| c.key == key) {
            Some(index) => {
                self.set_active(index);
                true
            }
            None => {
                warn!(key, "unknown skill category");
                false
            }
        }
    }

    pub fn next(&mut self) {
        if !self.categories.is_empty() {
            self.set_active((self.active + 1) % self.categories.len());
        }
    }

    pub fn previous(&mut self) {
        if !self.categories.is_empty() {
            let len = self.categories.len();
            self.set_active((self.active + len - 1) % len);
        }
    }

    /// Fade-in progress of the skill grid, `1.0` once settled.
    pub fn transition_progress(&self, now: Instant) -> f64 {
        match self.changed_at {
            Some(at) => (now.saturating_duration_since(at).as_secs_f64() / TRANSITION.as_secs_f64()).min(1.0),
            None => 1.0,
        }
    }

    fn set_active(&mut self, index: usize) {
        if index != self.active {
            debug!(from = self.active_key(), to = %self.categories[index].key, "skill category changed");
            self.active = index;
            self.changed_at = Some(Instant::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::BUILTIN;

    fn selector() -> SkillCategorySelector {
        SkillCategorySelector::new(BUILTIN.skill_categories.clone(), &BUILTIN.default_skill_category)
    }

    fn names(s: &SkillCategorySelector) -> Vec<&str> {
        s.active_skills().iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn starts_on_default_category() {
        assert_eq!(selector().active_key(), "frontend");
    }

    #[test]
    fn selecting_backend_shows_exactly_backend_skills() {
        let mut s = selector();
        assert!(s.select("backend"));
        assert_eq!(s.active_key(), "backend");
        assert_eq!(names(&s), ["Node.js", "JavaScript", "Java"]);
    }

    #[test]
    fn unknown_key_leaves_selection_alone() {
        let mut s = selector();
        assert!(!s.select("cooking"));
        assert_eq!(s.active_key(), "frontend");
    }

    #[test]
    fn next_and_previous_wrap() {
        let mut s = selector();
        s.previous();
        assert_eq!(s.active_key(), "tools");
        s.next();
        s.next();
        assert_eq!(s.active_key(), "backend");
    }

    #[test]
    fn change_starts_a_transition() {
        let mut s = selector();
        assert_eq!(s.transition_progress(Instant::now()), 1.0);
        s.select("database");
        assert!(s.transition_progress(Instant::now()) < 1.0);
        assert_eq!(s.transition_progress(Instant::now() + TRANSITION), 1.0);
    }
}
