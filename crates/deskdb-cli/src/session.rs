use crate::{
    coerce::{coerce, is_quit, normalize},
    input::LineSource,
    render::{OutputFormat, write_results},
};
use anyhow::Result;
use deskdb_core::{
    db::{Db, QueryError},
    error::Error as DeskError,
    model::{EntityTag, searchable_fields_listings},
};
use std::io::Write;
use tracing::debug;

pub const WELCOME: &str = "
Welcome to DeskDB Search
Type 'quit' to exit at any time

    Select search options:
        * Enter 1 to search DeskDB
        * Enter 2 to view a list of searchable fields
";

pub const FAREWELL: &str = "Thank you for using DeskDB Search.";

const INVALID_MENU_CHOICE: &str = "Invalid input. Try again";
const INVALID_SELECTOR: &str =
    "ERROR! Value must be an integer from the values shown above. Try Again.\n";

///
/// Flow
/// Whether the session keeps prompting after a step.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Flow {
    Continue,
    Quit,
}

///
/// Session
///
/// The interactive menu loop. Reads from a `LineSource`, writes prompts'
/// responses to `out`, and searches the published snapshot of `db`.
///

pub struct Session<'a, L, W> {
    db: &'a Db,
    input: L,
    out: W,
    format: OutputFormat,
}

impl<'a, L: LineSource, W: Write> Session<'a, L, W> {
    pub const fn new(db: &'a Db, input: L, out: W, format: OutputFormat) -> Self {
        Self {
            db,
            input,
            out,
            format,
        }
    }

    /// Run until `quit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.out, "{WELCOME}")?;

            if self.menu()? == Flow::Quit {
                writeln!(self.out, "{FAREWELL}")?;
                return Ok(());
            }
        }
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (L, W) {
        (self.input, self.out)
    }

    // Read one normalized line; end of input reads as `quit`.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        self.out.flush()?;
        let line = self.input.read_line(prompt)?.map(|line| normalize(&line));

        Ok(line.filter(|line| !is_quit(line)))
    }

    fn menu(&mut self) -> Result<Flow> {
        let Some(choice) = self.ask("> ")? else {
            return Ok(Flow::Quit);
        };

        match choice.as_str() {
            "1" => self.search(),
            "2" => {
                for listing in searchable_fields_listings() {
                    writeln!(self.out, "{listing}")?;
                }
                Ok(Flow::Continue)
            }
            _ => {
                writeln!(self.out, "{INVALID_MENU_CHOICE}")?;
                Ok(Flow::Continue)
            }
        }
    }

    // Selector, field and value prompts; repeats until one search runs.
    fn search(&mut self) -> Result<Flow> {
        let selector_prompt = selector_prompt();

        loop {
            let Some(selector) = self.ask(&selector_prompt)? else {
                return Ok(Flow::Quit);
            };
            let Ok(tag) = selector.parse::<EntityTag>() else {
                writeln!(self.out, "{INVALID_SELECTOR}")?;
                continue;
            };

            let Some(field) = self.ask("Enter search term  ")? else {
                return Ok(Flow::Quit);
            };
            let Some(raw_value) = self.ask("Enter search value  ")? else {
                return Ok(Flow::Quit);
            };
            let value = coerce(&raw_value);

            writeln!(
                self.out,
                "Searching for {} for {field} with a value of {value}",
                tag.model().display_name
            )?;
            debug!(entity = %tag, field = %field, value = ?value, "prompt search");

            match self.db.search(&field, &value, tag) {
                Ok(results) => {
                    write_results(&mut self.out, results.as_ref(), self.format)?;
                    return Ok(Flow::Continue);
                }
                Err(QueryError::UnknownEntity { .. }) => {
                    writeln!(self.out, "{INVALID_SELECTOR}")?;
                }
                Err(err) => {
                    let err = DeskError::from(err);
                    if !err.is_recoverable() {
                        return Err(err.into());
                    }
                    writeln!(self.out, "ERROR! {err}\n")?;
                }
            }
        }
    }
}

/// "Enter 1) User or 2) Ticket or 3) Organization"
fn selector_prompt() -> String {
    let options: Vec<_> = EntityTag::PROMPT_ORDER
        .iter()
        .map(|tag| format!("{}) {}", tag.selector(), tag.model().display_name))
        .collect();

    format!("Enter {}   ", options.join(" or "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{input::scripted::Script, render::NO_RESULTS};
    use deskdb_core::db::JsonDirSource;
    use std::path::PathBuf;

    // ---- helpers ----

    fn fixture_db() -> Db {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../deskdb-core/tests/data");

        Db::open(&JsonDirSource::new(dir)).expect("fixture data loads")
    }

    fn run(lines: &[&str]) -> (Script, String) {
        let db = fixture_db();
        let mut session = Session::new(
            &db,
            Script::new(lines.iter().copied()),
            Vec::new(),
            OutputFormat::Table,
        );
        session.run().expect("session runs");

        let (script, out) = session.into_parts();
        (script, String::from_utf8(out).expect("utf8"))
    }

    #[test]
    fn selector_prompt_lists_variants_in_order() {
        assert_eq!(
            selector_prompt(),
            "Enter 1) User or 2) Ticket or 3) Organization   "
        );
    }

    #[test]
    fn quit_at_the_menu_says_goodbye() {
        let (_, out) = run(&["QUIT"]);

        assert!(out.contains("Welcome to DeskDB Search"));
        assert!(out.trim_end().ends_with(FAREWELL));
    }

    #[test]
    fn end_of_input_ends_the_session() {
        let (_, out) = run(&["1", "2"]);

        assert!(out.trim_end().ends_with(FAREWELL));
    }

    #[test]
    fn search_prints_a_numbered_result_set() {
        let (script, out) = run(&["1", "1", "alias", "Miss Campos", "quit"]);

        assert_eq!(script.prompts[1], selector_prompt());
        assert!(out.contains("Searching for User for alias with a value of miss campos"));
        assert!(out.contains("Result set 1"));
        assert!(out.contains("Shelly Clements"));
        assert!(out.contains("ticket_1_as_submitter"));
        assert!(!out.contains("Result set 2"));
    }

    #[test]
    fn zero_padded_value_is_searched_literally() {
        let (_, out) = run(&["1", "2", "subject", "007", "quit"]);

        assert!(out.contains("Searching for Ticket for subject with a value of 007"));
        assert!(out.contains(NO_RESULTS));
    }

    #[test]
    fn no_match_is_reported_not_an_error() {
        let (_, out) = run(&["1", "3", "name", "nobody at all", "quit"]);

        assert!(out.contains(NO_RESULTS));
    }

    #[test]
    fn bad_selector_and_unknown_field_reprompt() {
        let (script, out) = run(&[
            "1",
            "7",
            "2",
            "colour",
            "blue",
            "2",
            "priority",
            "urgent",
            "quit",
        ]);

        assert!(out.contains(INVALID_SELECTOR.trim_end()));
        assert!(out.contains("ERROR! Case has no field named 'colour'"));
        assert!(out.contains("Result set 5"));
        assert_eq!(
            script
                .prompts
                .iter()
                .filter(|p| **p == selector_prompt())
                .count(),
            3
        );
    }

    #[test]
    fn listing_prints_every_variant() {
        let (_, out) = run(&["2", "quit"]);

        assert!(out.contains("Search User with"));
        assert!(out.contains("Search Ticket with"));
        assert!(out.contains("Search Organization with"));
    }

    #[test]
    fn unknown_menu_choice_is_rejected() {
        let (_, out) = run(&["9", "quit"]);

        assert!(out.contains(INVALID_MENU_CHOICE));
    }

    #[test]
    fn quit_inside_a_search_ends_the_session() {
        let (script, out) = run(&["1", "2", "quit", "never read"]);

        assert_eq!(script.prompts.len(), 3);
        assert!(out.trim_end().ends_with(FAREWELL));
    }
}
