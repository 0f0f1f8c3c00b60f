use anyhow::Result;
use arboard::Clipboard;
#[cfg(target_os = "linux")]
use arboard::SetExtLinux;

/// Hidden argument that turns the process into a clipboard owner.
pub const CLIPBOARD_OWNER_FLAG: &str = "__foldertree_clipboard_owner";

// X11 and Wayland drop the contents once the owning process exits, so a
// detached copy of ourselves keeps serving them.
#[cfg(target_os = "linux")]
fn serve_clipboard_from_stdin() -> Result<()> {
    let text = std::io::read_to_string(std::io::stdin())?;
    let mut clipboard = Clipboard::new()?;
    // Blocks until another application takes ownership.
    clipboard.set().wait().text(text)?;
    Ok(())
}

/// Returns `Ok(true)` when this process was started as the clipboard owner
/// and has finished serving; the caller should exit right away.
pub fn serve_if_requested() -> Result<bool> {
    if !std::env::args().any(|a| a == CLIPBOARD_OWNER_FLAG) {
        return Ok(false);
    }
    #[cfg(target_os = "linux")]
    {
        serve_clipboard_from_stdin()?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        tracing::warn!("{} is only used on Linux, ignoring", CLIPBOARD_OWNER_FLAG);
    }
    Ok(true)
}

pub fn copy_to_clipboard(text: &str) -> Result<()> {
    #[cfg(not(target_os = "linux"))]
    {
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text.to_string())?;
    }

    #[cfg(target_os = "linux")]
    {
        use anyhow::Context;
        use std::io::Write;
        use std::process::{Command, Stdio};

        let mut child = Command::new(std::env::current_exe()?)
            .arg(CLIPBOARD_OWNER_FLAG)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .current_dir("/")
            .spawn()
            .context("cannot start clipboard owner process")?;

        let mut stdin = child
            .stdin
            .take()
            .context("clipboard owner process has no stdin")?;
        stdin.write_all(text.as_bytes())?;
        stdin.flush()?;
        tracing::debug!(pid = child.id(), bytes = text.len(), "handed diagram to clipboard owner");
    }
    Ok(())
}
