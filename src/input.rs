use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use anyhow::Result;
use crate::app::App;
use crate::models::FocusArea;

const WHEEL_ROWS: f64 = 3.0;

/// Handles one key press. Returns `Ok(false)` when the app should exit.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Result<bool> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(false);
    }
    if app.show_help {
        // any key closes help
        app.show_help = false;
        return Ok(true);
    }
    match app.focus {
        FocusArea::Page => handle_page_key(app, key.code),
        FocusArea::Form => {
            handle_form_key(app, key.code);
            Ok(true)
        }
        FocusArea::Links => {
            handle_links_key(app, key.code);
            Ok(true)
        }
    }
}

fn handle_page_key(app: &mut App, code: KeyCode) -> Result<bool> {
    match code {
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            if let Some(id) = app.portfolio.sections.get(index).map(|s| s.id.clone()) {
                app.scroll_to_section(&id);
            }
        }
        KeyCode::Left | KeyCode::Char('h') => app.move_nav_cursor(false),
        KeyCode::Right | KeyCode::Char('l') => app.move_nav_cursor(true),
        KeyCode::Enter => app.scroll_to_cursor(),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_by(1.0),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_by(-1.0),
        KeyCode::PageDown | KeyCode::Char(' ') => {
            let rows = app.page_rows();
            app.scroll_by(rows);
        }
        KeyCode::PageUp => {
            let rows = app.page_rows();
            app.scroll_by(-rows);
        }
        KeyCode::Home | KeyCode::Char('g') => app.scroll_to_top(),
        KeyCode::End | KeyCode::Char('G') => app.scroll_to_bottom(),
        KeyCode::Tab => app.skills.next(),
        KeyCode::BackTab => app.skills.previous(),
        KeyCode::Char('p') => app.scroll_to_section("projects"),
        KeyCode::Char('d') => app.download_cv(),
        KeyCode::Char('o') => app.focus = FocusArea::Links,
        KeyCode::Char('f') => {
            app.focus = FocusArea::Form;
            app.scroll_to_section("contact");
        }
        KeyCode::Char('s') => {
            app.submit_form();
        }
        KeyCode::Char('n') => app.toggle_nav(),
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Esc => app.status = None,
        KeyCode::Char('q') => return Ok(false),
        _ => {}
    }
    Ok(true)
}

fn handle_form_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => app.contact.focus_next(),
        KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => app.contact.focus_previous(),
        KeyCode::Enter | KeyCode::Char('s') => {
            app.submit_form();
        }
        KeyCode::Esc | KeyCode::Char('q') => app.focus = FocusArea::Page,
        _ => {}
    }
}

fn handle_links_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Down | KeyCode::Char('j') => app.move_link_cursor(true),
        KeyCode::Up | KeyCode::Char('k') => app.move_link_cursor(false),
        KeyCode::Enter => app.open_selected_link(),
        KeyCode::Char('y') | KeyCode::Char('c') => app.copy_selected_link(),
        KeyCode::Esc | KeyCode::Char('o') | KeyCode::Char('q') => app.focus = FocusArea::Page,
        _ => {}
    }
}

pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollDown => app.scroll_by(WHEEL_ROWS),
        MouseEventKind::ScrollUp => app.scroll_by(-WHEEL_ROWS),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::{config::Settings, content::BUILTIN, viewport::Viewport};

    fn app() -> App {
        let mut app = App::new(BUILTIN.clone(), &Settings::from_toml("scroll_duration_ms = 0").unwrap());
        app.resize(100, 25);
        app.tick(Instant::now());
        app
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    #[test]
    fn q_quits() {
        let mut app = app();
        assert!(!press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn tab_switches_skill_category() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.skills.active_key(), "backend");
        let names: Vec<&str> = app.skills.active_skills().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Node.js", "JavaScript", "Java"]);
    }

    #[test]
    fn number_keys_jump_to_sections() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        app.tick(Instant::now() + Duration::from_millis(10));
        let about = app.viewport.element_bounds("about").unwrap();
        assert_eq!(app.viewport.scroll_y(), (about.top - 3.0 - 12.0).max(0.0));
        assert_eq!(app.nav_cursor, 1);
    }

    #[test]
    fn form_keys_stay_in_form_until_escape() {
        let mut app = app();
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.focus, FocusArea::Form);
        assert!(press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.focus, FocusArea::Page);
    }

    #[test]
    fn hiding_nav_drops_its_height_from_the_offset() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        assert!(!app.viewport.nav_visible);
        press(&mut app, KeyCode::Char('4'));
        app.tick(Instant::now() + Duration::from_millis(10));
        let projects = app.viewport.element_bounds("projects").unwrap();
        let expected = (projects.top - 12.0).clamp(0.0, app.viewport.max_scroll());
        assert_eq!(app.viewport.scroll_y(), expected);

        press(&mut app, KeyCode::Char('n'));
        assert!(app.viewport.nav_visible);
    }

    #[test]
    fn help_swallows_next_key() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        assert!(press(&mut app, KeyCode::Char('q')));
        assert!(!app.show_help);
    }

    #[test]
    fn wheel_scrolls_instantly() {
        let mut app = app();
        handle_mouse(&mut app, MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(app.viewport.scroll_y(), WHEEL_ROWS);
    }
}
