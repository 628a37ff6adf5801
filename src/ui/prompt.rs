//! # User Prompt
//!
//! Blocking notifications and yes/no confirmation, plus a terminal
//! implementation that reads answers from any buffered reader.

use log::warn;
use std::io::{self, BufRead, Write};
use std::sync::{Mutex, MutexGuard};

/// Tells the user about outcomes and asks for confirmation.
///
/// Both calls block the operation until the user has seen the message.
pub trait UserPrompt {
    fn notify(&self, message: &str);

    /// Asks a yes/no question; `true` means the user agreed.
    fn confirm(&self, message: &str) -> bool;
}

/// [`UserPrompt`] over a text stream pair, stdin/stdout by default.
///
/// Confirmation accepts "s", "sim", "y" or "yes" in any case; any other answer,
/// including end of input, is a refusal.
pub struct TerminalPrompt<R, W> {
    io: Mutex<(R, W)>,
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            io: Mutex::new((input, output)),
        }
    }

    /// Hands back the reader and writer.
    pub fn into_inner(self) -> (R, W) {
        self.io.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock(&self) -> MutexGuard<'_, (R, W)> {
        self.io.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<R: BufRead, W: Write> UserPrompt for TerminalPrompt<R, W> {
    fn notify(&self, message: &str) {
        let mut io = self.lock();
        if let Err(e) = writeln!(io.1, "{}", message).and_then(|_| io.1.flush()) {
            warn!("Failed to show notification: {}", e);
        }
    }

    fn confirm(&self, message: &str) -> bool {
        let mut guard = self.lock();
        let (input, output) = &mut *guard;

        if let Err(e) = write!(output, "{} [s/N] ", message).and_then(|_| output.flush()) {
            warn!("Failed to show confirmation: {}", e);
            return false;
        }

        let mut answer = String::new();
        match input.read_line(&mut answer) {
            Ok(_) => matches!(
                answer.trim().to_lowercase().as_str(),
                "s" | "sim" | "y" | "yes"
            ),
            Err(e) => {
                warn!("Failed to read confirmation: {}", e);
                false
            }
        }
    }
}
