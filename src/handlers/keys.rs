//! Keyboard Input Handling Module
//!
//! Routes terminal key events to the login screen, the recipe list or
//! whichever popup currently owns the keyboard.

use crate::app::{App, InputMode};
use crate::models::FormField;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Main keyboard event handler and dispatcher.
/// Returns true when the application should quit.
pub fn handle_key_events(key: KeyEvent, app: &mut App) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    if !app.auth.is_authenticated() {
        return handle_login_keys(key, app);
    }

    // Popups take the keyboard in stacking order
    if app.has_pending_action() {
        handle_confirmation_keys(key, app);
        return false;
    }
    if app.ui.is_form_modal_open() {
        handle_form_keys(key, app);
        return false;
    }
    if app.ui.is_detail_modal_open() {
        handle_detail_keys(key, app);
        return false;
    }

    match app.input_mode {
        InputMode::Search => {
            handle_search_keys(key, app);
            false
        }
        InputMode::HelpMenu => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.input_mode = InputMode::Normal;
            }
            false
        }
        _ => handle_list_keys(key, app),
    }
}

fn handle_login_keys(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Esc => return true,
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.login_form.toggle_focus();
        }
        KeyCode::Enter => app.submit_login(),
        KeyCode::Backspace => {
            app.login_form.focused_buffer().pop();
        }
        KeyCode::Char(c) => {
            app.login_form.error = None;
            app.login_form.focused_buffer().push(c);
        }
        _ => {}
    }
    false
}

fn handle_list_keys(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        KeyCode::Char('?') => app.input_mode = InputMode::HelpMenu,
        KeyCode::Char('/') => app.input_mode = InputMode::Search,
        KeyCode::Esc => app.clear_search(),

        KeyCode::Down | KeyCode::Char('j') => app.next_recipe(),
        KeyCode::Up | KeyCode::Char('k') => app.previous_recipe(),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => app.next_category(),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => app.previous_category(),

        KeyCode::Char('n') => app.open_create_form(),
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('F') => app.toggle_favorites_only(),
        KeyCode::Char('L') => app.logout(),
        KeyCode::Char('x') => {
            app.notifications.dismiss_latest();
        }

        KeyCode::Enter | KeyCode::Char('e') | KeyCode::Char('d') | KeyCode::Char('f') => {
            let Some(id) = app.selected().map(|r| r.id.clone()) else {
                return false;
            };
            match key.code {
                KeyCode::Enter => app.open_detail(&id),
                KeyCode::Char('e') => app.open_edit_form(&id),
                KeyCode::Char('d') => app.request_delete(&id),
                _ => app.toggle_favorite(&id),
            }
        }
        _ => {}
    }
    false
}

fn handle_search_keys(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc => {
            app.clear_search();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter | KeyCode::Down => app.input_mode = InputMode::Normal,
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char(c) => app.push_search_char(c),
        _ => {}
    }
}

fn handle_confirmation_keys(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_pending_action(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_pending_action(),
        _ => {}
    }
}

fn handle_detail_keys(key: KeyEvent, app: &mut App) {
    if app.input_mode == InputMode::Servings {
        match key.code {
            KeyCode::Enter => app.apply_servings_input(),
            KeyCode::Esc => {
                app.servings_input.clear();
                app.input_mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                app.servings_input.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() => app.servings_input.push(c),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.close_detail(),
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => {
            if let Some(calculator) = app.calculator.as_mut() {
                calculator.increase();
            }
        }
        KeyCode::Char('-') | KeyCode::Down => {
            if let Some(calculator) = app.calculator.as_mut() {
                calculator.decrease();
            }
        }
        KeyCode::Char('r') | KeyCode::Char('0') => {
            if let Some(calculator) = app.calculator.as_mut() {
                calculator.reset();
            }
        }
        KeyCode::Char(c) if c.is_ascii_digit() => {
            app.servings_input.clear();
            app.servings_input.push(c);
            app.input_mode = InputMode::Servings;
        }
        KeyCode::Char('e') => app.edit_viewing_recipe(),
        KeyCode::Char('d') => {
            if let Some(id) = app.ui.viewing_recipe_id().map(str::to_string) {
                app.request_delete(&id);
            }
        }
        KeyCode::Char('f') => {
            if let Some(id) = app.ui.viewing_recipe_id().map(str::to_string) {
                app.toggle_favorite(&id);
            }
        }
        _ => {}
    }
}

fn handle_form_keys(key: KeyEvent, app: &mut App) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl {
        match key.code {
            KeyCode::Char('s') => app.submit_form(),
            KeyCode::Char('n') => {
                if let Some(form) = app.recipe_form.as_mut() {
                    form.add_row();
                }
            }
            KeyCode::Char('d') => {
                if let Some(form) = app.recipe_form.as_mut() {
                    form.remove_row();
                }
            }
            _ => {}
        }
        return;
    }

    // Inputs are locked while the save is in flight
    if key.code == KeyCode::Esc {
        app.cancel_form();
        return;
    }
    if app.submitting {
        return;
    }

    let Some(form) = app.recipe_form.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
        KeyCode::Left if form.focused() == FormField::Category => form.cycle_category(false),
        KeyCode::Right if form.focused() == FormField::Category => form.cycle_category(true),
        KeyCode::Enter => form.focus_next(),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(c) => form.insert_char(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::Arc;
    use std::time::Duration;

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_key_events(KeyEvent::new(code, KeyModifiers::NONE), app)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn signed_in() -> App {
        let mut app = App::new(Arc::new(MemoryStore::with_samples()), None).unwrap();
        type_text(&mut app, "chef");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "recipe123");
        press(&mut app, KeyCode::Enter);
        if let Some(message) = app.worker.recv_timeout(Duration::from_secs(5)) {
            app.apply_remote(message);
        }
        app
    }

    #[test]
    fn login_screen_accepts_typed_credentials() {
        let app = signed_in();
        assert!(app.auth.is_authenticated());
        assert_eq!(app.repository.recipes().len(), 2);
    }

    #[test]
    fn q_in_search_types_instead_of_quitting() {
        let mut app = signed_in();
        press(&mut app, KeyCode::Char('/'));
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.ui.search_query(), "q");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.ui.search_query(), "");
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn detail_keys_drive_the_calculator() {
        let mut app = signed_in();
        press(&mut app, KeyCode::Enter);
        assert!(app.ui.is_detail_modal_open());

        press(&mut app, KeyCode::Char('+'));
        press(&mut app, KeyCode::Char('+'));
        let base = app.calculator.as_ref().unwrap().initial_servings();
        assert_eq!(app.calculator.as_ref().unwrap().current_servings(), base + 2);

        press(&mut app, KeyCode::Char('r'));
        assert!(!app.calculator.as_ref().unwrap().is_adjusted());

        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.calculator.as_ref().unwrap().current_servings(), 12);

        press(&mut app, KeyCode::Esc);
        assert!(!app.ui.is_detail_modal_open());
    }

    #[test]
    fn delete_needs_confirmation() {
        let mut app = signed_in();
        press(&mut app, KeyCode::Char('d'));
        assert!(app.has_pending_action());
        press(&mut app, KeyCode::Char('n'));
        assert!(!app.has_pending_action());
        assert_eq!(app.repository.recipes().len(), 2);
    }

    #[test]
    fn esc_during_save_keeps_the_form_until_the_result_lands() {
        let mut app = signed_in();
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Focaccia");
        handle_key_events(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL), &mut app);
        assert!(app.submitting);

        press(&mut app, KeyCode::Esc);
        assert!(app.ui.is_form_modal_open());

        let message = app.worker.recv_timeout(Duration::from_secs(5)).unwrap();
        app.apply_remote(message);
        assert!(!app.ui.is_form_modal_open());

        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Second");
        assert_eq!(app.recipe_form.as_ref().unwrap().title, "Second");
        press(&mut app, KeyCode::Esc);
        assert!(!app.ui.is_form_modal_open());
        assert_eq!(app.repository.recipes()[0].title, "Focaccia");
    }

    #[test]
    fn ctrl_s_with_empty_title_reports_validation_error() {
        let mut app = signed_in();
        press(&mut app, KeyCode::Char('n'));
        assert!(app.ui.is_form_modal_open());

        handle_key_events(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL), &mut app);
        assert!(!app.submitting);
        let form = app.recipe_form.as_ref().unwrap();
        assert_eq!(form.error.as_deref(), Some("Recipe title is required"));
    }
}
