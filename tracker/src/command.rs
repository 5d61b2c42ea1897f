//! One-line commands typed at the prompt.

use expense_core::{Category, ExpenseId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Reload,
    /// Empty text clears the filter.
    Search(String),
    Title(String),
    Amount(String),
    Category(Category),
    Submit,
    Edit(ExpenseId),
    Cancel,
    Delete(ExpenseId),
    Summary,
    Help,
    Quit,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command {0:?}; type `help` for a list")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("{0:?} is not an expense id")]
    BadId(String),
}

pub const HELP: &str = "\
Commands:
  list | reload        fetch the expenses again
  search [text]        filter by title (no text clears the filter)
  title <text>         set the form's title
  amount <number>      set the form's amount
  category <name>      Food, Rent, Shopping, Bills, or any other name
  submit               save the form (adds, or updates while editing)
  edit <id>            load an expense into the form
  cancel               stop editing and clear the form
  delete <id>          delete an expense (asks first)
  summary              totals only
  help                 this text
  quit                 leave";

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "list" | "ls" | "reload" => Command::Reload,
            "search" | "find" => Command::Search(rest.to_string()),
            "title" => Command::Title(required("title", rest)?.to_string()),
            "amount" => Command::Amount(required("amount", rest)?.to_string()),
            "category" | "cat" => {
                let name = required("category", rest)?;
                Command::Category(name.parse().unwrap_or_default())
            }
            "submit" | "save" => Command::Submit,
            "edit" => Command::Edit(id("edit", rest)?),
            "cancel" => Command::Cancel,
            "delete" | "rm" => Command::Delete(id("delete", rest)?),
            "summary" | "total" => Command::Summary,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => return Err(CommandError::Unknown(word.to_string())),
        };
        Ok(Some(command))
    }
}

fn required<'a>(name: &'static str, rest: &'a str) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument(name))
    } else {
        Ok(rest)
    }
}

fn id(name: &'static str, rest: &str) -> Result<ExpenseId, CommandError> {
    required(name, rest)?
        .parse()
        .map_err(|_| CommandError::BadId(rest.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        Command::parse(line).unwrap().unwrap()
    }

    #[test]
    fn blank_line_is_nothing() {
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn field_commands_keep_the_rest_of_the_line() {
        assert_eq!(parse("title  Weekly groceries "), Command::Title("Weekly groceries".to_string()));
        assert_eq!(parse("amount 12.50"), Command::Amount("12.50".to_string()));
        assert_eq!(parse("category bills"), Command::Category(Category::Bills));
        assert_eq!(parse("cat Travel"), Command::Category(Category::Other("Travel".to_string())));
    }

    #[test]
    fn search_without_text_clears() {
        assert_eq!(parse("search"), Command::Search(String::new()));
        assert_eq!(parse("SEARCH cof"), Command::Search("cof".to_string()));
    }

    #[test]
    fn id_commands_parse_ids() {
        assert_eq!(parse("edit 3"), Command::Edit(ExpenseId(3)));
        assert_eq!(parse("delete 12"), Command::Delete(ExpenseId(12)));
        assert_eq!(Command::parse("delete x").unwrap_err(), CommandError::BadId("x".to_string()));
        assert_eq!(Command::parse("edit").unwrap_err(), CommandError::MissingArgument("edit"));
    }

    #[test]
    fn unknown_command_is_reported() {
        assert_eq!(
            Command::parse("frobnicate now").unwrap_err(),
            CommandError::Unknown("frobnicate".to_string())
        );
    }
}
