use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub focus_border: Color,
    pub blurred_border: Color,
    pub text: Color,
    pub text_secondary: Color,
    pub text_highlight: Color,

    // Specific components
    pub brand: Style,
    pub nav_active: Style,
    pub nav_idle: Style,
    pub nav_cursor: Style,
    pub heading: Style,
    pub heading_accent: Style,
    pub subtitle: Style,
    pub button: Style,
    pub tab_active: Style,
    pub tab_idle: Style,
    pub skill: Style,
    pub badge: Style,
    pub placeholder: Style,
    pub link: Style,
    pub footer: Style,
    pub status: Style,
    pub status_error: Style,
    pub popup_title: Style,
    pub popup_border: Style,
    pub popup_text: Style,
}

impl Default for Theme {
    fn default() -> Self {
        let primary = Color::Rgb(139, 92, 246);
        let accent = Color::Rgb(6, 182, 212);
        Self {
            focus_border: Color::Cyan,
            blurred_border: Color::DarkGray,
            text: Color::White,
            text_secondary: Color::Gray,
            text_highlight: Color::Yellow,

            brand: Style::default().fg(primary).add_modifier(Modifier::BOLD),
            nav_active: Style::default().fg(primary).add_modifier(Modifier::BOLD),
            nav_idle: Style::default().fg(Color::Gray),
            nav_cursor: Style::default().add_modifier(Modifier::UNDERLINED),
            heading: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            heading_accent: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            subtitle: Style::default().fg(Color::Gray),
            button: Style::default().fg(Color::White).bg(primary).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::White).bg(primary).add_modifier(Modifier::BOLD),
            tab_idle: Style::default().fg(Color::Gray),
            skill: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            badge: Style::default().fg(Color::Black).bg(Color::Gray),
            placeholder: Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            link: Style::default().fg(accent),
            footer: Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
            status: Style::default().fg(Color::Green),
            status_error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            popup_title: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            popup_border: Style::default().bg(Color::Black),
            popup_text: Style::default().fg(Color::White),
        }
    }
}
