// Passbank — Terminal Prompting
//
// The session never reads stdin directly; it talks to a `Prompter`, which
// lets tests drive the menu with scripted answers.

use std::io::{self, BufRead, IsTerminal, Write};

/// Source of user answers and sink for user-facing messages.
pub trait Prompter {
    /// Show `prompt` and read one line, without its line terminator.
    fn ask(&mut self, prompt: &str) -> io::Result<String>;

    /// Like `ask`, but the answer should not be echoed.
    fn ask_secret(&mut self, prompt: &str) -> io::Result<String> {
        self.ask(prompt)
    }

    /// Print one line of output.
    fn say(&mut self, line: &str) -> io::Result<()>;
}

/// Prompter bound to the process's stdin and stdout.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for TerminalPrompter {
    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        print!("{}", prompt);
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().lock().read_line(&mut input)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before an answer was given",
            ));
        }

        Ok(strip_line_ending(input))
    }

    fn ask_secret(&mut self, prompt: &str) -> io::Result<String> {
        // Piped input has nothing to hide and no tty to hide it on
        if io::stdin().is_terminal() {
            rpassword::prompt_password(prompt)
        } else {
            self.ask(prompt)
        }
    }

    fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(io::stdout(), "{}", line)
    }
}

fn strip_line_ending(mut line: String) -> String {
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    line
}
