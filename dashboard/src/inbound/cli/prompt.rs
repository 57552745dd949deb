//! Interactive yes/no confirmation.

use std::io::{BufRead, Write};
use std::sync::{Mutex, PoisonError};

use tracing::warn;

use crate::domain::ports::ConfirmationGate;

/// [`ConfirmationGate`] that asks on `output` and reads the answer from
/// `input`. Only `y` or `yes`, in any case, accept.
#[derive(Debug)]
pub struct PromptGate<R, W> {
    io: Mutex<(R, W)>,
}

impl<R, W> PromptGate<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    /// Prompt on `output`, answer from `input`.
    #[must_use]
    pub const fn new(input: R, output: W) -> Self {
        Self {
            io: Mutex::new((input, output)),
        }
    }
}

fn accepts(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

impl<R, W> ConfirmationGate for PromptGate<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn confirm(&self, prompt: &str) -> bool {
        let mut guard = self.io.lock().unwrap_or_else(PoisonError::into_inner);
        let (input, output) = &mut *guard;
        if let Err(err) = write!(output, "{prompt} [y/N] ").and_then(|()| output.flush()) {
            warn!(error = %err, "failed to show confirmation prompt");
            return false;
        }
        let mut answer = String::new();
        match input.read_line(&mut answer) {
            Ok(_) => accepts(&answer),
            Err(err) => {
                warn!(error = %err, "failed to read confirmation");
                false
            }
        }
    }
}
