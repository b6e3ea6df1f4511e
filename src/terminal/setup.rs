//! Low-level entry and exit of TUI mode.

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};

/// Enter the alternate screen and hide the cursor.
pub fn enter_tui_mode<W: Write>(writer: &mut W) -> io::Result<()> {
    execute!(writer, EnterAlternateScreen, Hide)
}

/// Leave TUI mode. Errors are ignored so this is safe to call repeatedly.
pub fn leave_tui_mode<W: Write>(writer: &mut W) {
    let _ = disable_raw_mode();
    let _ = execute!(writer, LeaveAlternateScreen, Show);
    let _ = writer.flush();
}

/// Restore the terminal after a panic or fatal error.
pub fn emergency_restore() {
    leave_tui_mode(&mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_tui_mode_writes_sequences() {
        let mut buffer = Vec::new();
        enter_tui_mode(&mut buffer).unwrap();
        assert!(!buffer.is_empty());
    }

    #[test]
    fn test_leave_tui_mode_does_not_panic() {
        let mut buffer = Vec::new();
        leave_tui_mode(&mut buffer);
        leave_tui_mode(&mut buffer);
    }
}
