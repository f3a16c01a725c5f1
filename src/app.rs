use std::{
    cell::RefCell,
    path::PathBuf,
    rc::Rc,
    time::{Duration, Instant},
};

use tracing::{info, warn};

use crate::{
    config::Settings,
    contact::{ContactForm, SubmitOutcome},
    links,
    models::{FocusArea, Portfolio},
    nav::NavigationTracker,
    observer::IntersectionObserver,
    page::{self, PageState, PageViewport},
    scroll::SmoothScroll,
    skills::SkillCategorySelector,
    theme::Theme,
    viewport::{ScrollBehavior, Viewport},
};

const FRAME: Duration = Duration::from_millis(16);
const STATUS_TTL: Duration = Duration::from_secs(4);

pub struct Status {
    pub text: String,
    pub error: bool,
    pub at: Instant,
}

pub struct App {
    pub portfolio: Portfolio,
    pub theme: Theme,
    pub viewport: PageViewport,
    pub observer: Rc<RefCell<IntersectionObserver>>,
    pub nav: NavigationTracker<IntersectionObserver>,
    pub skills: SkillCategorySelector,
    pub contact: ContactForm,
    pub focus: FocusArea,
    pub nav_cursor: usize,
    pub link_cursor: usize,
    pub show_help: bool,
    pub status: Option<Status>,
    tick_rate: Duration,
    download_dir: PathBuf,
    size: (u16, u16),
}

impl App {
    pub fn new(portfolio: Portfolio, settings: &Settings) -> Self {
        let observer = Rc::new(RefCell::new(IntersectionObserver::new()));
        let nav = NavigationTracker::mount_with(
            portfolio.sections.clone(),
            observer.clone(),
            settings.visibility_threshold,
            settings.scroll_buffer,
        );
        let skills = SkillCategorySelector::new(
            portfolio.skill_categories.clone(),
            &portfolio.default_skill_category,
        );
        let scroll = SmoothScroll::new(Duration::from_millis(settings.scroll_duration_ms));
        let mut viewport = PageViewport::new(scroll);
        viewport.nav_visible = settings.show_nav;
        Self {
            portfolio,
            theme: Theme::default(),
            viewport,
            observer,
            nav,
            skills,
            contact: ContactForm::new(),
            focus: FocusArea::Page,
            nav_cursor: 0,
            link_cursor: 0,
            show_help: false,
            status: None,
            tick_rate: Duration::from_millis(settings.tick_rate_ms),
            download_dir: links::resolve_download_dir(settings.download_dir.as_deref()),
            size: (0, 0),
        }
    }

    /// Page area for a terminal of `width` x `height`; the last row is the status bar.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.size = (width.saturating_sub(1), height.saturating_sub(1));
        self.relayout(Instant::now());
    }

    fn relayout(&mut self, now: Instant) {
        let (width, height) = self.size;
        let state = PageState {
            portfolio: &self.portfolio,
            skills: &self.skills,
            contact: &self.contact,
            focus: self.focus,
            theme: &self.theme,
            now,
        };
        self.viewport.layout = page::build(&state, width, height);
        self.viewport.height = height;
        self.viewport.clamp();
    }

    /// Advances animations and lets the watcher see the new geometry.
    pub fn tick(&mut self, now: Instant) {
        self.relayout(now);
        if self.viewport.scroll.tick(now) {
            self.viewport.clamp();
        }
        self.observer.borrow_mut().poll(&self.viewport);
        if self.status.as_ref().is_some_and(|s| now.saturating_duration_since(s.at) > STATUS_TTL) {
            self.status = None;
        }
    }

    pub fn poll_timeout(&self) -> Duration {
        if self.viewport.scroll.is_animating() || self.skills.transition_progress(Instant::now()) < 1.0 {
            FRAME
        } else {
            self.tick_rate
        }
    }

    pub fn scroll_to_section(&mut self, id: &str) {
        if let Some(i) = self.portfolio.section_index(id) {
            self.nav_cursor = i;
        }
        self.nav.scroll_to_section(&mut self.viewport, id);
    }

    pub fn scroll_to_cursor(&mut self) {
        if let Some(id) = self.portfolio.sections.get(self.nav_cursor).map(|s| s.id.clone()) {
            self.scroll_to_section(&id);
        }
    }

    pub fn scroll_by(&mut self, rows: f64) {
        let top = self.viewport.scroll.target() + rows;
        self.viewport.scroll_to(top, ScrollBehavior::Instant);
    }

    pub fn scroll_to_top(&mut self) {
        self.viewport.scroll_to(0.0, ScrollBehavior::Smooth);
    }

    pub fn scroll_to_bottom(&mut self) {
        let max = self.viewport.max_scroll();
        self.viewport.scroll_to(max, ScrollBehavior::Smooth);
    }

    pub fn page_rows(&self) -> f64 {
        (self.viewport.height.saturating_sub(page::NAV_HEIGHT + 1)).max(1) as f64
    }

    pub fn toggle_nav(&mut self) {
        self.viewport.nav_visible = !self.viewport.nav_visible;
    }

    pub fn move_nav_cursor(&mut self, forward: bool) {
        let len = self.portfolio.sections.len();
        if len == 0 {
            return;
        }
        self.nav_cursor = if forward { (self.nav_cursor + 1) % len } else { (self.nav_cursor + len - 1) % len };
    }

    pub fn move_link_cursor(&mut self, forward: bool) {
        let len = self.portfolio.contact_links.len();
        if len == 0 {
            return;
        }
        self.link_cursor = if forward { (self.link_cursor + 1) % len } else { (self.link_cursor + len - 1) % len };
    }

    pub fn download_cv(&mut self) {
        match links::download_asset(&self.portfolio.cv, &self.download_dir) {
            Ok(dest) => self.set_status(format!("CV saved to {}", dest.display())),
            Err(e) => self.set_error(format!("CV download failed: {:#}", e)),
        }
    }

    pub fn open_selected_link(&mut self) {
        let Some(link) = self.portfolio.contact_links.get(self.link_cursor) else {
            return;
        };
        let href = link.href.clone();
        match links::open_external(&href) {
            Ok(()) => self.set_status(format!("Opened {}", href)),
            Err(e) => self.set_error(format!("{:#}", e)),
        }
    }

    pub fn copy_selected_link(&mut self) {
        let Some(link) = self.portfolio.contact_links.get(self.link_cursor) else {
            return;
        };
        let href = link.href.trim_start_matches("mailto:").to_string();
        match links::copy_to_clipboard(&href) {
            Ok(()) => self.set_status(format!("Copied {}", href)),
            Err(e) => self.set_error(format!("{:#}", e)),
        }
    }

    pub fn submit_form(&mut self) -> SubmitOutcome {
        self.contact.submit()
    }

    pub fn set_status(&mut self, text: String) {
        info!(status = %text);
        self.status = Some(Status { text, error: false, at: Instant::now() });
    }

    pub fn set_error(&mut self, text: String) {
        warn!(error = %text);
        self.status = Some(Status { text, error: true, at: Instant::now() });
    }
}
