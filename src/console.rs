use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// The operator-facing side of the tournament: asks for names, shows results.
pub trait Console {
    /// ask the operator for a player name; the answer may still be blank
    fn prompt_name(&mut self) -> io::Result<String>;

    /// purely informational, nothing depends on it being seen
    fn notify(&mut self, message: &str);
}

/// Reads from stdin and writes to stdout.
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn prompt_name(&mut self) -> io::Result<String> {
        let mut stdout = io::stdout();
        write!(stdout, "What's the player's name? (example: John Snow): ")?;
        stdout.flush()?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim().to_string())
    }

    fn notify(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// Replays canned answers; handy for tests and non-interactive runs.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    pub messages: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            messages: vec![],
        }
    }
}

impl Console for ScriptedConsole {
    fn prompt_name(&mut self) -> io::Result<String> {
        self.answers.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted answers left")
        })
    }

    fn notify(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}
