use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::runtime::Handle;

use crate::store::BudgetStore;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;

/// How long to wait for a key before redrawing with fresh store state.
const TICK: Duration = Duration::from_millis(250);

pub(crate) fn as_tui(store: &BudgetStore, runtime: Handle) -> Result<()> {
    let mut app = App::new(store, runtime);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &BudgetStore,
) -> Result<()> {
    while app.running {
        app.poll_background();
        app.refresh(store);
        terminal.draw(|f| crate::ui::render::render(f, app))?;

        if !event::poll(TICK)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, store)?,
                InputMode::Command => handle_command_input(key, app, store)?,
                InputMode::Editing => handle_editing_input(key, app, store),
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, store: &BudgetStore) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('1') => app.screen = Screen::Dashboard,
        KeyCode::Char('2') => app.screen = Screen::Budget,
        KeyCode::Tab | KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            app.screen = screens[(idx + 1) % screens.len()];
        }
        KeyCode::Char('j') | KeyCode::Down if app.screen == Screen::Budget => {
            app.move_selection(1);
        }
        KeyCode::Char('k') | KeyCode::Up if app.screen == Screen::Budget => {
            app.move_selection(-1);
        }
        KeyCode::Char('g') if app.screen == Screen::Budget => app.field_index = 0,
        KeyCode::Char('G') if app.screen == Screen::Budget => app.move_selection(isize::MAX),
        KeyCode::Enter | KeyCode::Char('e') => {
            app.screen = Screen::Budget;
            app.begin_edit();
        }
        KeyCode::Char('s') => commands::handle_command("sync", app, store)?,
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => {
            app.status_message.clear();
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, store: &BudgetStore) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, store)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_editing_input(key: event::KeyEvent, app: &mut App, store: &BudgetStore) {
    match key.code {
        KeyCode::Enter => app.commit_edit(store),
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Backspace => {
            app.edit_buffer.pop();
        }
        // Amount fields only take digits and a decimal point
        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
            app.edit_buffer.push(c);
        }
        _ => {}
    }
}
