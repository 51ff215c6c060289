//! The interactive command loop
//!
//! A session reads one command per prompt, runs it against an [`ItemStore`]
//! and prints the result, until `exit` or end of input. Validation and
//! not-found problems are reported and the loop continues; any other store
//! error ends the session with `Err`.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use pantryctl_core::{parse_int, ExpiryDate, ItemName, NewItem};
use pantryctl_store::{ItemStore, StoreError};
use tracing::debug;

use crate::command::Command;
use crate::render;

pub const WELCOME: &str = "Welcome to the food stocks terminal application!";

const INVALID_ADD: &str = "Invalid input. Name, month, and year are required.";
const INVALID_UPDATE: &str = "Invalid input. Month and year are required.";
const INVALID_ID: &str = "Invalid input. Item ID must be a number.";

/// What the loop does after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// One operator session over a store and a pair of text streams
pub struct Session<'a, S: ?Sized, R, W> {
    store: &'a S,
    input: R,
    output: W,
}

impl<'a, S, R, W> Session<'a, S, R, W>
where
    S: ItemStore + ?Sized,
    R: BufRead,
    W: Write,
{
    pub fn new(store: &'a S, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    /// Run until `exit` or end of input.
    pub async fn run(&mut self) -> Result<()> {
        writeln!(self.output, "{WELCOME}")?;

        loop {
            writeln!(self.output)?;
            writeln!(self.output, "{}", Command::help_line())?;
            let Some(line) = self.prompt("Enter a command: ")? else {
                debug!("End of input, leaving session");
                return Ok(());
            };

            let command = Command::parse(&line);
            debug!(command = %command, "Dispatching");
            if self.dispatch(&command).await? == Flow::Exit {
                return Ok(());
            }
        }
    }

    async fn dispatch(&mut self, command: &Command) -> Result<Flow> {
        match command {
            Command::Add => self.add().await,
            Command::View => self.view().await,
            Command::Lookup => self.lookup().await,
            Command::Sort => self.sort().await,
            Command::Update => self.update().await,
            Command::Delete => self.delete().await,
            Command::Exit => Ok(Flow::Exit),
            Command::Unknown(_) => {
                writeln!(self.output, "Unknown command. Please try again.")?;
                Ok(Flow::Continue)
            }
        }
    }

    async fn add(&mut self) -> Result<Flow> {
        let Some(name) = self.prompt("Enter item name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some((day, month, year)) = self.prompt_expiry("")? else {
            return Ok(Flow::Exit);
        };

        let parsed = ItemName::new(&name)
            .and_then(|name| Ok((name, ExpiryDate::parse(&day, &month, &year)?)));
        let (name, expiry) = match parsed {
            Ok(fields) => fields,
            Err(err) => {
                debug!(error = %err, "Rejected add");
                writeln!(self.output, "{INVALID_ADD}")?;
                return Ok(Flow::Continue);
            }
        };

        self.store
            .create(NewItem { name, expiry })
            .await
            .context("Failed to add item")?;
        writeln!(self.output, "Item added successfully!")?;
        Ok(Flow::Continue)
    }

    async fn view(&mut self) -> Result<Flow> {
        let items = self.store.list_all().await.context("Failed to list items")?;
        if items.is_empty() {
            writeln!(self.output, "No items in stock.")?;
            return Ok(Flow::Continue);
        }

        writeln!(self.output)?;
        writeln!(self.output, "Items in Stock:")?;
        for item in &items {
            writeln!(self.output, "{}", render::item_line(item))?;
        }
        Ok(Flow::Continue)
    }

    async fn lookup(&mut self) -> Result<Flow> {
        let Some(term) = self.prompt("Enter item name or part of the name to search: ")? else {
            return Ok(Flow::Exit);
        };
        let term = term.trim();
        if term.is_empty() {
            writeln!(self.output, "Please provide a valid search term.")?;
            return Ok(Flow::Continue);
        }

        let items = self.store.search(term).await.context("Failed to search items")?;
        if items.is_empty() {
            writeln!(self.output, "No items found matching that name.")?;
            return Ok(Flow::Continue);
        }

        writeln!(self.output)?;
        writeln!(self.output, "Matching Items:")?;
        for item in &items {
            writeln!(self.output, "{}", render::item_line(item))?;
        }
        Ok(Flow::Continue)
    }

    async fn sort(&mut self) -> Result<Flow> {
        let items = self
            .store
            .list_sorted_by_expiry()
            .await
            .context("Failed to sort items")?;
        if items.is_empty() {
            writeln!(self.output, "No items to sort.")?;
            return Ok(Flow::Continue);
        }

        writeln!(self.output)?;
        writeln!(self.output, "Items Sorted by Expiry Date:")?;
        for item in &items {
            writeln!(self.output, "{}", render::sorted_line(item))?;
        }
        Ok(Flow::Continue)
    }

    async fn update(&mut self) -> Result<Flow> {
        let Some(raw_id) = self.prompt("Enter item ID to update: ")? else {
            return Ok(Flow::Exit);
        };
        let Ok(id) = parse_int("item id", &raw_id) else {
            writeln!(self.output, "{INVALID_ID}")?;
            return Ok(Flow::Continue);
        };

        let existing = self.store.get(id).await.context("Failed to look up item")?;
        if existing.is_none() {
            writeln!(self.output, "Item with ID '{id}' not found.")?;
            return Ok(Flow::Continue);
        }

        let Some((day, month, year)) = self.prompt_expiry("new ")? else {
            return Ok(Flow::Exit);
        };
        let expiry = match ExpiryDate::parse(&day, &month, &year) {
            Ok(expiry) => expiry,
            Err(err) => {
                debug!(id, error = %err, "Rejected update");
                writeln!(self.output, "{INVALID_UPDATE}")?;
                return Ok(Flow::Continue);
            }
        };

        match self.store.update_expiry(id, expiry).await {
            Ok(_) => writeln!(self.output, "Item updated successfully!")?,
            Err(StoreError::NotFound { id }) => {
                writeln!(self.output, "Item with ID '{id}' not found.")?
            }
            Err(err) => return Err(err).context("Failed to update item"),
        }
        Ok(Flow::Continue)
    }

    async fn delete(&mut self) -> Result<Flow> {
        let Some(raw_id) = self.prompt("Enter item ID to delete: ")? else {
            return Ok(Flow::Exit);
        };
        let Ok(id) = parse_int("item id", &raw_id) else {
            writeln!(self.output, "{INVALID_ID}")?;
            return Ok(Flow::Continue);
        };

        match self.store.delete(id).await {
            Ok(()) => writeln!(self.output, "Item deleted successfully!")?,
            Err(StoreError::NotFound { id }) => writeln!(self.output, "Item ID '{id}' not found.")?,
            Err(err) => return Err(err).context("Failed to delete item"),
        }
        Ok(Flow::Continue)
    }

    /// Ask for day, month and year; `qualifier` is "" or "new ".
    fn prompt_expiry(&mut self, qualifier: &str) -> io::Result<Option<(String, String, String)>> {
        let Some(day) = self.prompt(&format!("Enter {qualifier}expiry day (or leave empty): "))?
        else {
            return Ok(None);
        };
        let Some(month) = self.prompt(&format!("Enter {qualifier}expiry month (1-12): "))? else {
            return Ok(None);
        };
        let Some(year) = self.prompt(&format!("Enter {qualifier}expiry year: "))? else {
            return Ok(None);
        };
        Ok(Some((day, month, year)))
    }

    /// Print `label` and read one line. `None` means end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim_end_matches(['\n', '\r']).to_string();
        Ok(Some(line))
    }
}
