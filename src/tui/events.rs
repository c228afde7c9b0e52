use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, size as terminal_size};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::time::Duration;
use crate::tui::app::{App, Mode};
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;
use crate::tui::widgets::input::TextInput;
use crate::utils::{local_now, parse_key_binding};

/// How long to wait for input before redrawing, so reminders show up promptly
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Guard that ensures terminal state is restored even on panic
/// If the terminal is left in raw mode or on the alternate screen, the
/// user's shell will be unusable.
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        Ok(Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: true,
        })
    }

    /// Restore terminal state on normal exit; the guard does nothing on drop afterwards
    fn restore(&mut self) -> Result<(), TuiError> {
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        if self.alternate_screen_enabled {
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.alternate_screen_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Errors are ignored here, we are already cleaning up
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
}

pub fn run_event_loop(mut app: App) -> Result<(), TuiError> {
    // Check terminal size before entering alternate screen
    // so the error is printed in the normal terminal
    let (width, height) = terminal_size()?;
    let min_width = Layout::MIN_WIDTH + 2;
    let min_height = Layout::MIN_HEIGHT + 2;
    if width < min_width || height < min_height {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, Minimum required: {}x{}. Please resize your terminal window.",
            width, height, min_width, min_height
        )));
    }

    let mut guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    loop {
        app.check_status_message_timeout();
        app.drain_reminders();

        terminal.draw(|f| {
            let layout = Layout::calculate(f.area(), app.show_details);
            crate::tui::render::render(f, &mut app, &layout);
        })?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key_event) = event::read()? {
                // Only process Press events (Windows also reports Release)
                if key_event.kind == KeyEventKind::Press && handle_key_event(&mut app, key_event) {
                    break;
                }
            }
        }
    }

    guard.restore()?;
    Ok(())
}

/// Returns true when the user asked to quit
fn handle_key_event(app: &mut App, key_event: KeyEvent) -> bool {
    // An open notice takes every key until dismissed
    if app.current_notice().is_some() {
        if matches!(key_event.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.dismiss_notice();
        }
        return false;
    }

    match app.mode {
        Mode::View => handle_view_mode(app, key_event),
        Mode::Create => {
            handle_create_mode(app, key_event);
            false
        }
        Mode::Export => {
            handle_export_mode(app, key_event);
            false
        }
        Mode::Help => {
            if key_event.code == KeyCode::Esc || binding_matches(&app.config.key_bindings.help, &key_event) {
                app.toggle_help();
            }
            false
        }
    }
}

fn binding_matches(binding: &str, key_event: &KeyEvent) -> bool {
    parse_key_binding(binding)
        .map(|parsed| parsed.matches(key_event))
        .unwrap_or(false)
}

fn handle_view_mode(app: &mut App, key_event: KeyEvent) -> bool {
    let kb = app.config.key_bindings.clone();

    if binding_matches(&kb.quit, &key_event) {
        return true;
    }
    if binding_matches(&kb.list_down, &key_event) || key_event.code == KeyCode::Down {
        app.next();
    } else if binding_matches(&kb.list_up, &key_event) || key_event.code == KeyCode::Up {
        app.previous();
    } else if binding_matches(&kb.complete, &key_event) {
        app.complete_selected();
    } else if binding_matches(&kb.new, &key_event) {
        app.start_create();
    } else if binding_matches(&kb.export, &key_event) {
        app.start_export();
    } else if binding_matches(&kb.details, &key_event) {
        app.toggle_details();
    } else if binding_matches(&kb.help, &key_event) {
        app.toggle_help();
    }
    false
}

/// Shared line-editing keys; returns false if the key was not an edit
fn edit_text(input: &mut TextInput, key_event: &KeyEvent) -> bool {
    if key_event.modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }
    match key_event.code {
        KeyCode::Char(c) => input.insert_char(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        _ => return false,
    }
    true
}

fn handle_create_mode(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Esc => app.cancel(),
        KeyCode::Enter => app.submit_form(),
        KeyCode::Tab | KeyCode::Down => app.form.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.form.previous_field(),
        KeyCode::Char('d') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            app.form.use_date(local_now().date());
        }
        KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if app.form.current_field.is_choice() => {
            app.form.cycle_choice(key_event.code != KeyCode::Left);
        }
        _ => {
            if let Some(input) = app.form.current_input() {
                edit_text(input, &key_event);
            }
        }
    }
}

fn handle_export_mode(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Esc => app.cancel(),
        KeyCode::Enter => app.submit_export(),
        _ => {
            edit_text(&mut app.export_input, &key_event);
        }
    }
}
