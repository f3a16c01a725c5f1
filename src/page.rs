//! Builds the portfolio document as styled lines and tracks its geometry.

use std::time::Instant;

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::{
    contact::{ContactForm, FIELDS, SUBMIT_LABEL},
    models::{FocusArea, Heading, Portfolio, Section},
    scroll::SmoothScroll,
    skills::SkillCategorySelector,
    theme::Theme,
    utils::{center, centered_text, wrap_text},
    viewport::{Bounds, ScrollBehavior, Viewport},
};

/// Rows covered by the fixed navigation bar.
pub const NAV_HEIGHT: u16 = 3;
const SECTION_PADDING: usize = 2;
const SKILL_CELL: usize = 20;

pub struct PageBlock {
    /// `None` for blocks that are not observed sections (the footer).
    pub id: Option<String>,
    pub top: u16,
    pub lines: Vec<Line<'static>>,
}

impl PageBlock {
    pub fn height(&self) -> u16 {
        self.lines.len() as u16
    }
}

#[derive(Default)]
pub struct PageLayout {
    pub width: u16,
    pub height: u16,
    pub blocks: Vec<PageBlock>,
}

impl PageLayout {
    pub fn bounds(&self, id: &str) -> Option<Bounds> {
        self.blocks
            .iter()
            .find(|b| b.id.as_deref() == Some(id))
            .map(|b| Bounds::new(b.top as f64, b.height() as f64))
    }
}

/// Everything that changes how the page is drawn.
pub struct PageState<'a> {
    pub portfolio: &'a Portfolio,
    pub skills: &'a SkillCategorySelector,
    pub contact: &'a ContactForm,
    pub focus: FocusArea,
    pub theme: &'a Theme,
    pub now: Instant,
}

pub fn build(state: &PageState, width: u16, viewport_height: u16) -> PageLayout {
    let mut blocks = Vec::with_capacity(state.portfolio.sections.len() + 1);
    let mut top: u16 = 0;
    for section in &state.portfolio.sections {
        let lines = section_lines(state, section, width, viewport_height);
        let height = lines.len() as u16;
        blocks.push(PageBlock { id: Some(section.id.clone()), top, lines });
        top = top.saturating_add(height);
    }
    let footer = footer_lines(state, width);
    let footer_height = footer.len() as u16;
    blocks.push(PageBlock { id: None, top, lines: footer });
    PageLayout { width, height: top.saturating_add(footer_height), blocks }
}

fn section_lines(state: &PageState, section: &Section, width: u16, viewport_height: u16) -> Vec<Line<'static>> {
    let p = state.portfolio;
    match section.id.as_str() {
        "hero" => hero_lines(state, width, viewport_height),
        "about" => padded(heading_lines(state.theme, &p.about_heading, width), about_lines(state, width)),
        "skills" => padded(heading_lines(state.theme, &p.skills_heading, width), skills_lines(state, width)),
        "projects" => padded(heading_lines(state.theme, &p.projects_heading, width), projects_lines(state, width)),
        "contact" => padded(heading_lines(state.theme, &p.contact_heading, width), contact_lines(state, width)),
        _ => {
            let heading = Heading { plain: section.label.clone(), accent: String::new(), subtitle: String::new() };
            padded(heading_lines(state.theme, &heading, width), Vec::new())
        }
    }
}

fn padded(heading: Vec<Line<'static>>, body: Vec<Line<'static>>) -> Vec<Line<'static>> {
    let mut lines = vec![Line::default(); SECTION_PADDING];
    lines.extend(heading);
    lines.push(Line::default());
    lines.extend(body);
    lines.extend(std::iter::repeat_n(Line::default(), SECTION_PADDING));
    lines
}

fn heading_lines(theme: &Theme, heading: &Heading, width: u16) -> Vec<Line<'static>> {
    let mut title = vec![Span::styled(heading.plain.clone(), theme.heading)];
    if !heading.accent.is_empty() {
        title.push(Span::raw(" "));
        title.push(Span::styled(heading.accent.clone(), theme.heading_accent));
    }
    let mut lines = vec![center(Line::from(title), width)];
    lines.extend(centered_text(&heading.subtitle, width, theme.subtitle));
    lines
}

fn button(label: &str, hint: &str, style: Style) -> Vec<Span<'static>> {
    vec![
        Span::styled(format!(" {} ", label), style),
        Span::styled(format!(" ({})", hint), Style::default().add_modifier(Modifier::DIM)),
    ]
}

fn hero_lines(state: &PageState, width: u16, viewport_height: u16) -> Vec<Line<'static>> {
    let theme = state.theme;
    let profile = &state.portfolio.profile;

    let mut content = vec![center(
        Line::from(vec![
            Span::styled(format!("{} ", profile.greeting), theme.heading),
            Span::styled(profile.name.clone(), theme.heading_accent),
        ]),
        width,
    )];
    content.push(Line::default());
    content.extend(centered_text(&profile.tagline, width, theme.subtitle));
    content.push(Line::default());
    let mut buttons = button("Ver Projetos", "p", theme.button);
    buttons.push(Span::raw("   "));
    buttons.extend(button("Baixar CV", "d", theme.button));
    content.push(center(Line::from(buttons), width));
    content.push(Line::default());
    let icons: Vec<Span<'static>> = state
        .portfolio
        .contact_links
        .iter()
        .rev()
        .flat_map(|l| [Span::styled(format!("[{}]", l.kind.glyph()), theme.link), Span::raw("  ")])
        .collect();
    content.push(center(Line::from(icons), width));

    // at least one screen tall, content centered below the nav bar
    let min_height = (viewport_height as usize).max(content.len() + NAV_HEIGHT as usize + 2);
    let free = min_height - content.len() - NAV_HEIGHT as usize;
    let above = NAV_HEIGHT as usize + free / 2;
    let mut lines = vec![Line::default(); above];
    lines.extend(content);
    while lines.len() + 1 < min_height {
        lines.push(Line::default());
    }
    lines.push(center(
        Line::from(Span::styled(format!("[img: {}]", profile.hero_image), theme.placeholder)),
        width,
    ));
    lines
}

fn about_lines(state: &PageState, width: u16) -> Vec<Line<'static>> {
    let theme = state.theme;
    let profile = &state.portfolio.profile;
    let text_width = (width as usize).saturating_sub(4);
    let mut lines = Vec::new();
    for (i, paragraph) in profile.about.iter().enumerate() {
        let style = if i == 0 { Style::default().fg(theme.text) } else { Style::default().fg(theme.text_secondary) };
        lines.extend(wrap_text(paragraph, text_width).into_iter().map(|l| Line::from(vec![Span::raw("  "), Span::styled(l, style)])));
        lines.push(Line::default());
    }
    let chips: Vec<Span<'static>> = profile
        .highlights
        .iter()
        .flat_map(|h| [Span::styled(format!("[ {} ]", h.text), theme.skill), Span::raw(" ")])
        .collect();
    lines.push(Line::from([vec![Span::raw("  ")], chips].concat()));
    lines.push(Line::default());
    lines.push(center(Line::from(Span::styled(format!("[img: {}]", profile.photo), theme.placeholder)), width));
    lines.push(center(Line::from(Span::styled(profile.card_title.clone(), theme.heading_accent)), width));
    lines.extend(centered_text(&profile.card_text, width, theme.subtitle));
    lines
}

fn skills_lines(state: &PageState, width: u16) -> Vec<Line<'static>> {
    let theme = state.theme;
    let skills = state.skills;

    let mut tabs = Vec::new();
    for (i, category) in skills.categories().iter().enumerate() {
        if i > 0 {
            tabs.push(Span::raw("  "));
        }
        let style = if i == skills.active_index() { theme.tab_active } else { theme.tab_idle };
        tabs.push(Span::styled(format!(" {} ", category.name), style));
    }
    let mut lines = vec![center(Line::from(tabs), width), Line::default()];

    let columns = ((width as usize).saturating_sub(4) / SKILL_CELL).max(1);
    // reserve room for the largest category so switching tabs keeps the page still
    let max_skills = skills.categories().iter().map(|c| c.skills.len()).max().unwrap_or(0);
    let rows = max_skills.div_ceil(columns);
    let mut style = theme.skill;
    if skills.transition_progress(state.now) < 1.0 {
        style = style.add_modifier(Modifier::DIM);
    }
    let active = skills.active_skills();
    for row in 0..rows {
        let spans: Vec<Span<'static>> = active
            .iter()
            .skip(row * columns)
            .take(columns)
            .map(|s| Span::styled(format!("{:<width$}", format!("◆ {}", s.name), width = SKILL_CELL), style))
            .collect();
        lines.push(center(Line::from(spans), width));
    }
    lines
}

fn projects_lines(state: &PageState, width: u16) -> Vec<Line<'static>> {
    let theme = state.theme;
    let text_width = (width as usize).saturating_sub(6);
    let mut lines = Vec::new();
    for (i, project) in state.portfolio.projects.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(vec![Span::raw("  "), Span::styled(format!("[img: {}]", project.image), theme.placeholder)]));
        lines.push(Line::from(vec![Span::raw("  "), Span::styled(project.title.clone(), theme.heading)]));
        lines.extend(
            wrap_text(&project.description, text_width)
                .into_iter()
                .map(|l| Line::from(vec![Span::raw("  "), Span::styled(l, theme.subtitle)])),
        );
        let mut badges = vec![Span::raw("  ")];
        for tech in &project.technologies {
            badges.push(Span::styled(format!(" {} ", tech), theme.badge));
            badges.push(Span::raw(" "));
        }
        lines.push(Line::from(badges));
        lines.push(Line::from(vec![Span::raw("  "), Span::styled("[ gh Código ]", theme.link)]));
    }
    lines
}

fn contact_lines(state: &PageState, width: u16) -> Vec<Line<'static>> {
    let theme = state.theme;
    let mut lines = vec![Line::from(vec![Span::raw("  "), Span::styled(state.portfolio.contact_title.clone(), theme.heading_accent)])];
    for link in &state.portfolio.contact_links {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("{:>2}  ", link.kind.glyph()), theme.link),
            Span::styled(link.label.clone(), Style::default().fg(theme.text)),
        ]));
    }
    lines.push(Line::from(Span::styled("  (o) links", Style::default().add_modifier(Modifier::DIM))));
    lines.push(Line::default());

    let form_focused = state.focus == FocusArea::Form;
    let box_width = (width as usize).saturating_sub(8).min(60);
    for (i, field) in FIELDS.iter().enumerate() {
        let focused = form_focused && state.contact.focused() == i;
        let border = if focused { Style::default().fg(theme.focus_border) } else { Style::default().fg(theme.blurred_border) };
        lines.push(Line::from(vec![Span::raw("  "), Span::styled(field.label, Style::default().fg(theme.text).add_modifier(Modifier::BOLD))]));
        lines.push(Line::from(vec![Span::raw("  "), Span::styled(format!("┌{}┐", "─".repeat(box_width)), border)]));
        for row in 0..field.rows {
            let text = if row == 0 { field.placeholder } else { "" };
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled("│", border),
                Span::styled(format!(" {:<w$}", text, w = box_width.saturating_sub(1)), theme.placeholder),
                Span::styled("│", border),
            ]));
        }
        lines.push(Line::from(vec![Span::raw("  "), Span::styled(format!("└{}┘", "─".repeat(box_width)), border)]));
    }
    let mut submit = theme.button;
    if form_focused && state.contact.submit_focused() {
        submit = submit.add_modifier(Modifier::REVERSED);
    }
    lines.push(Line::from(vec![Span::raw("  "), Span::styled(format!(" {} ", SUBMIT_LABEL), submit)]));
    lines
}

fn footer_lines(state: &PageState, width: u16) -> Vec<Line<'static>> {
    use chrono::Datelike;
    let year = state.portfolio.footer_year.unwrap_or_else(|| chrono::Local::now().year());
    vec![
        Line::from(Span::styled("─".repeat(width as usize), Style::default().fg(state.theme.blurred_border))),
        center(Line::from(Span::styled(format!("© {} {}", year, state.portfolio.footer), state.theme.footer)), width),
        Line::default(),
    ]
}

/// The terminal page as seen by the navigation logic.
pub struct PageViewport {
    pub layout: PageLayout,
    pub scroll: SmoothScroll,
    pub height: u16,
    pub nav_visible: bool,
}

impl PageViewport {
    pub fn new(scroll: SmoothScroll) -> Self {
        Self { layout: PageLayout::default(), scroll, height: 0, nav_visible: true }
    }

    pub fn max_scroll(&self) -> f64 {
        self.layout.height.saturating_sub(self.height) as f64
    }

    pub fn clamp(&mut self) {
        let max = self.max_scroll();
        self.scroll.clamp(max);
    }
}

impl Viewport for PageViewport {
    fn element_bounds(&self, id: &str) -> Option<Bounds> {
        self.layout.bounds(id)
    }

    fn nav_height(&self) -> Option<f64> {
        self.nav_visible.then_some(NAV_HEIGHT as f64)
    }

    fn scroll_y(&self) -> f64 {
        self.scroll.position()
    }

    fn viewport_height(&self) -> f64 {
        self.height as f64
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        let top = top.clamp(0.0, self.max_scroll());
        match behavior {
            ScrollBehavior::Smooth => self.scroll.start(top, Instant::now()),
            ScrollBehavior::Instant => self.scroll.jump(top),
        }
    }
}
