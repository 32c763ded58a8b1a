//! The I/O boundary between a session and whoever answers its questions.
use std::collections::VecDeque;
use std::io;

/// Line-oriented console a session talks through.
pub trait Console {
    /// Show `message` on its own line.
    fn emit(&mut self, message: &str) -> io::Result<()>;

    /// Show `message` and block for one line of input.
    ///
    /// Returns `Ok(None)` when input is exhausted. The returned line has its
    /// surrounding whitespace trimmed.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>>;
}

impl<C: Console + ?Sized> Console for &mut C {
    fn emit(&mut self, message: &str) -> io::Result<()> {
        (**self).emit(message)
    }

    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        (**self).prompt(message)
    }
}

/// In-memory console that answers prompts from a fixed script.
///
/// Public testing aid: drive a session from canned answers without a terminal,
/// in this crate's tests or a caller's. Everything the session emits is kept in
/// `transcript`. Once the script runs out, `prompt` reports end of input.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    pub transcript: Vec<String>,
    /// Number of times `prompt` was called, including the one that hit end of input.
    pub prompts: usize,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedConsole {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
            prompts: 0,
        }
    }

    /// Answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    /// The whole transcript joined with newlines.
    pub fn output(&self) -> String {
        self.transcript.join("\n")
    }
}

impl Console for ScriptedConsole {
    fn emit(&mut self, message: &str) -> io::Result<()> {
        self.transcript.push(message.to_string());
        Ok(())
    }

    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        self.prompts += 1;
        self.transcript.push(message.to_string());
        Ok(self.answers.pop_front().map(|a| a.trim().to_string()))
    }
}
