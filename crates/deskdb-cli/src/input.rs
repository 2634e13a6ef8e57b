use anyhow::Result;
use rustyline::{DefaultEditor, error::ReadlineError};

///
/// LineSource
/// Where prompt input comes from. `None` means the input has ended.
///

pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

///
/// Terminal
/// Interactive line editing with history.
///

pub struct Terminal {
    editor: DefaultEditor,
}

impl Terminal {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for Terminal {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(Some(line))
            }
            // Ctrl-C and Ctrl-D both end the session like `quit`.
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
