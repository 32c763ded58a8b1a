//! Console backed by a line reader and a writer (stdin plus stdout or stderr).
use handrank_core::Console;
use std::io::{self, BufRead, Write};

pub struct StdConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> StdConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        StdConsole { input, output }
    }
}

impl<R: BufRead, W: Write> Console for StdConsole<R, W> {
    fn emit(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }

    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        // Bytes, not `read_line`: a line that is not UTF-8 is just a bad choice.
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            // Keep the terminal tidy when input ends mid-prompt.
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).trim().to_string()))
    }
}
