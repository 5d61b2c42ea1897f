//! The read-command / act / redraw loop.

use std::io::{BufRead, Write};

use anyhow::Result;
use expense_core::{SyncError, Synchronizer, Transport};
use tracing::debug;

use crate::command::{Command, HELP};
use crate::render;

pub struct Session<T> {
    sync: Synchronizer<T>,
}

impl<T: Transport> Session<T> {
    pub fn new(sync: Synchronizer<T>) -> Self {
        Self { sync }
    }

    pub fn sync(&self) -> &Synchronizer<T> {
        &self.sync
    }

    /// Load the list, then process commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> Result<()> {
        let loaded = self.sync.reload();
        self.report(loaded, out)?;
        render::screen(self.sync.view(), out)?;

        loop {
            write!(out, "> ")?;
            out.flush()?;
            let Some(line) = read_line(&mut input)? else {
                break;
            };
            match Command::parse(&line) {
                Ok(None) => {}
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => self.dispatch(command, &mut input, out)?,
                Err(err) => writeln!(out, "{err}")?,
            }
        }
        Ok(())
    }

    fn dispatch<R: BufRead, W: Write>(&mut self, command: Command, input: &mut R, out: &mut W) -> Result<()> {
        debug!(?command, "dispatch");
        let outcome = match command {
            Command::Reload => self.sync.reload(),
            Command::Search(text) => {
                self.sync.view_mut().set_search(text);
                Ok(())
            }
            Command::Title(title) => {
                self.sync.view_mut().form_mut().title = title;
                Ok(())
            }
            Command::Amount(amount) => {
                self.sync.view_mut().form_mut().amount = amount;
                Ok(())
            }
            Command::Category(category) => {
                self.sync.view_mut().form_mut().category = category;
                Ok(())
            }
            Command::Submit => self.sync.submit(),
            Command::Edit(id) => self.sync.begin_edit(id),
            Command::Cancel => self.sync.cancel_edit(),
            Command::Delete(id) => {
                write!(out, "Delete this entry? [y/N] ")?;
                out.flush()?;
                let answer = read_line(input)?.unwrap_or_default();
                if matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
                    self.sync.delete(id)
                } else {
                    writeln!(out, "Not deleted.")?;
                    Ok(())
                }
            }
            Command::Summary => {
                render::totals(self.sync.view(), out)?;
                return Ok(());
            }
            Command::Help => {
                writeln!(out, "{HELP}")?;
                return Ok(());
            }
            Command::Quit => return Ok(()),
        };
        self.report(outcome, out)?;
        render::screen(self.sync.view(), out)?;
        Ok(())
    }

    /// Print the one-shot notice, or the error itself when it carries none.
    /// Connectivity failures are shown by the banner instead.
    fn report<W: Write>(&mut self, outcome: Result<(), SyncError>, out: &mut W) -> Result<()> {
        if let Some(notice) = self.sync.view_mut().take_notice() {
            writeln!(out, "** {notice}")?;
            return Ok(());
        }
        match outcome {
            Ok(()) | Err(SyncError::Connectivity(_)) => {}
            Err(err) => writeln!(out, "** {err}")?,
        }
        Ok(())
    }
}

fn read_line<R: BufRead>(input: &mut R) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
