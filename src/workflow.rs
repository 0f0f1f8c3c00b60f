use crate::session::{Action, EMPTY_SELECTION_WARNING, Panel, Session};
use crate::{cli, clipboard, tui};
use anyhow::{Result, bail};
use tracing::info;

// Loads the root given on the command line, before any UI is shown.
fn load_initial_session(cli_args: &cli::Cli) -> Session {
    Session::NoRoot.apply(
        Action::LoadRoot(cli_args.root.clone()),
        &cli_args.scan_options(),
    )
}

// Prints or copies whatever the session would show in its result panel.
fn perform_final_action(session: &Session, is_dry_run: bool) -> Result<()> {
    match session.panel() {
        Panel::Diagram(text) => {
            if is_dry_run {
                println!("{}", text);
            } else {
                clipboard::copy_to_clipboard(&text)?;
                let entries = text.lines().count().saturating_sub(1);
                println!("✅ Copied tree of {} entries to the clipboard.", entries);
            }
        }
        Panel::Warning(message) => println!("⚠️  {}", message),
        Panel::Error(message) => bail!(message),
        Panel::Idle => println!("No folder loaded. Exiting."),
    }
    Ok(())
}

// Headless mode: everything under the root is selected, print and exit.
fn run_headless_mode(session: &Session) -> Result<()> {
    match session {
        Session::InvalidRoot { error, .. } => bail!("{}", error),
        _ => match session.panel() {
            Panel::Diagram(text) => println!("{}", text),
            _ => println!("⚠️  {}", EMPTY_SELECTION_WARNING),
        },
    }
    Ok(())
}

// Main orchestrator for the foldertree application logic.
pub fn run_foldertree(cli_args: cli::Cli) -> Result<()> {
    let session = load_initial_session(&cli_args);

    if cli_args.headless {
        return run_headless_mode(&session);
    }

    let root_input = cli_args.root.display().to_string();
    match tui::run_tui(session, cli_args.scan_options(), root_input)? {
        Some(final_session) => perform_final_action(&final_session, cli_args.dry_run),
        None => {
            info!("selection cancelled");
            println!("Selection cancelled. Exiting.");
            Ok(())
        }
    }
}
