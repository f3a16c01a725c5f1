use ratatui::{
    prelude::*,
    layout::{Position, Size},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use tui_scrollview::{ScrollView, ScrollViewState};

use crate::app::App;
use crate::models::FocusArea;
use crate::page::NAV_HEIGHT;
use crate::utils::centered_rect;

/// Renders the whole screen: page, fixed nav bar, status line and popups.
pub fn render(f: &mut Frame, app: &App) {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(f.area());

    render_page(f, app, vertical_chunks[0]);
    if app.viewport.nav_visible {
        render_nav(f, app, vertical_chunks[0]);
    }
    render_status(f, app, vertical_chunks[1]);

    if app.focus == FocusArea::Links {
        render_links_popup(f, app);
    }
    if app.show_help {
        render_help(f, app);
    }
}

fn render_page(f: &mut Frame, app: &App, area: Rect) {
    let layout = &app.viewport.layout;
    let mut scroll_view = ScrollView::new(Size::new(layout.width, layout.height));
    for block in &layout.blocks {
        let rect = Rect::new(0, block.top, layout.width, block.height());
        scroll_view.render_widget(Paragraph::new(block.lines.clone()), rect);
    }
    let mut state = ScrollViewState::default();
    state.set_offset(Position::new(0, app.viewport.scroll.row()));
    f.render_stateful_widget(scroll_view, area, &mut state);
}

fn render_nav(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let nav_area = Rect { height: NAV_HEIGHT.min(area.height), ..area };
    f.render_widget(Clear, nav_area);

    let active = app.nav.active_handle();
    let mut items = Vec::new();
    for (i, section) in app.portfolio.sections.iter().enumerate() {
        let mut style = if active.is(&section.id) { theme.nav_active } else { theme.nav_idle };
        if i == app.nav_cursor {
            style = style.patch(theme.nav_cursor);
        }
        items.push(Span::styled(format!("{} {}", i + 1, section.label), style));
        items.push(Span::raw("   "));
    }
    items.pop();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.blurred_border))
        .title(Span::styled(format!(" {} ", app.portfolio.brand), theme.brand));
    let inner = block.inner(nav_area);
    f.render_widget(block, nav_area);
    f.render_widget(Paragraph::new(Line::from(items)).alignment(Alignment::Right), inner);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let paragraph = match &app.status {
        Some(status) => Paragraph::new(status.text.clone())
            .style(if status.error { theme.status_error } else { theme.status }),
        None => {
            let hints = match app.focus {
                FocusArea::Page => "1-5/Enter Sections | ←/→ Nav | n Toggle nav | j/k/PgUp/PgDn Scroll | Tab Skills | p Projects | d CV | o Links | f Form | ? Help | q Quit",
                FocusArea::Form => "Tab/↑/↓ Field | Enter/s Send | Esc Back",
                FocusArea::Links => "↑/↓ Select | Enter Open | y Copy | Esc Close",
            };
            Paragraph::new(hints).style(theme.footer)
        }
    };
    f.render_widget(paragraph, area);
}

fn render_links_popup(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let popup_area = centered_rect(50, 30, f.area());
    f.render_widget(Clear, popup_area);
    let items: Vec<ListItem> = app
        .portfolio
        .contact_links
        .iter()
        .map(|l| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>2}  ", l.kind.glyph()), theme.link),
                Span::styled(l.label.clone(), theme.popup_text),
            ]))
        })
        .collect();
    let mut state = ListState::default();
    state.select(Some(app.link_cursor));
    let list = List::new(items)
        .block(
            Block::default()
                .title(Span::styled(app.portfolio.contact_title.clone(), theme.popup_title))
                .borders(Borders::ALL)
                .style(theme.popup_border),
        )
        .highlight_symbol("→ ")
        .highlight_style(Style::default().fg(theme.text_highlight).add_modifier(Modifier::BOLD));
    f.render_stateful_widget(list, popup_area, &mut state);
}

fn render_help(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let popup_area = centered_rect(60, 60, f.area());
    f.render_widget(Clear, popup_area);
    let mut lines: Vec<Line> = app
        .portfolio
        .sections
        .iter()
        .enumerate()
        .map(|(i, s)| Line::from(format!("{}          {}", i + 1, s.label)))
        .collect();
    lines.extend(
        [
            "←/→ h/l    Move nav cursor, Enter to jump",
            "j/k ↑/↓    Scroll one row",
            "PgUp/PgDn  Scroll one page",
            "g/G        Top / bottom",
            "Tab        Next skill category",
            "Shift+Tab  Previous skill category",
            "p          Ver Projetos",
            "d          Baixar CV",
            "n          Show/hide nav bar",
            "o          Contact links",
            "f          Contact form",
            "q          Quit",
        ]
        .map(Line::from),
    );
    let para = Paragraph::new(lines)
        .block(
            Block::default()
                .title(Span::styled("Help", theme.popup_title))
                .borders(Borders::ALL)
                .style(theme.popup_border),
        )
        .wrap(Wrap { trim: false })
        .style(theme.popup_text);
    f.render_widget(para, popup_area);
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use ratatui::backend::TestBackend;

    use super::*;
    use crate::{config::Settings, content::BUILTIN};

    fn screen(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    fn app(width: u16, height: u16) -> App {
        let mut app = App::new(BUILTIN.clone(), &Settings::from_toml("").unwrap());
        app.resize(width, height);
        app.tick(Instant::now());
        app
    }

    #[test]
    fn draws_nav_and_hero() {
        let app = app(100, 30);
        let text = screen(&app, 100, 30);
        assert!(text.contains("Portfolio"));
        assert!(text.contains("Início"));
        assert!(text.contains("Danilo Vaz"));
    }

    #[test]
    fn hidden_nav_is_not_drawn() {
        let mut app = app(100, 30);
        app.viewport.nav_visible = false;
        let text = screen(&app, 100, 30);
        assert!(!text.contains("1 Início"));
    }

    #[test]
    fn links_popup_lists_contacts() {
        let mut app = app(100, 30);
        app.focus = FocusArea::Links;
        let text = screen(&app, 100, 30);
        assert!(text.contains("/danilovaz7"));
    }
}
