mod app_logic;
mod app_state;
mod event_handler;
mod ui_renderer;

pub use self::run_tui::run_tui;

// Main TUI loop and terminal setup/teardown
mod run_tui {
    use super::app_logic::TuiApp;
    use super::event_handler::handle_events;
    use super::ui_renderer::ui_frame;
    use crate::scanner::ScanOptions;
    use crate::session::Session;
    use anyhow::Result;
    use crossterm::{
        event::{DisableMouseCapture, EnableMouseCapture},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    };
    use ratatui::prelude::{CrosstermBackend, Terminal};
    use std::io::{self, Stdout};

    /// Run the interactive picker. Returns the final session when the user
    /// confirmed, `None` when they quit.
    pub fn run_tui(
        session: Session,
        options: ScanOptions,
        root_input: String,
    ) -> Result<Option<Session>> {
        let mut app = TuiApp::new(session, options, root_input);

        let mut terminal = init_terminal()?;
        let outcome = event_loop(&mut terminal, &mut app);
        restore_terminal(terminal)?;
        outcome?;

        if app.confirmed {
            Ok(Some(app.into_session()))
        } else {
            Ok(None)
        }
    }

    fn event_loop(
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        app: &mut TuiApp,
    ) -> Result<()> {
        let mut needs_redraw = true;
        while !app.quit {
            if needs_redraw {
                terminal.draw(|frame| ui_frame(frame, app))?;
            }
            needs_redraw = handle_events(app)?;
        }
        Ok(())
    }

    fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(Into::into)
    }

    fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor().map_err(Into::into)
    }
}
