// src/report.rs
//! Typed command results and their text rendering.

#![deny(missing_docs)]

use crate::config::MissingStore;
use crate::dispatch::Session;
use crate::error::{Access, StoreError};
use crate::line::TodoItem;
use colored::Colorize;
use std::io::{self, Write};
use std::path::PathBuf;

/// Version string printed by `todo version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Usage text.
pub const USAGE: &str = "\
todo usage
----------
Begin with todo init.

COMMAND          DESCRIPTION
-------          -----------
init           - Initialize .todo file
global <cmd>   - Perform any of these commands on the user-level .todo
add <todo>     - Add a new todo
<no args>      - Display todos in .todo
complete <num> - Complete the given todo
sweep          - Clear all completed todos from the list
delete <num>   - Remove a todo from the list
purge          - Removed ALL TODOS from the list
version        - Print the version
help           - Print this message
";

/// One thing that happened during a session.
#[derive(Debug)]
pub enum Event {
    /// The list file was created or truncated.
    Created(PathBuf),
    /// Items of a non-empty list, with their positional indices.
    Listing(Vec<(usize, TodoItem)>),
    /// The list holds no lines at all.
    NothingToDo,
    /// An item was appended.
    Added,
    /// An item was completed.
    Completed,
    /// An item was deleted.
    Deleted,
    /// Number of completed items swept away.
    Swept(usize),
    /// Number of items purged.
    Purged(usize),
    /// Usage was requested.
    Usage,
    /// Version was requested.
    Version,
    /// A token that names no command.
    Unrecognized(String),
    /// A failed operation.
    Failed(StoreError),
}

impl Event {
    /// True for events that mean a command did not do what was asked.
    pub fn is_failure(&self) -> bool {
        matches!(self, Event::Failed(_) | Event::Unrecognized(_))
    }
}

/// Renders events as text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Printer {
    missing_store: MissingStore,
}

impl Printer {
    /// Printer using `missing_store` for unreadable lists.
    pub fn new(missing_store: MissingStore) -> Self {
        Self { missing_store }
    }

    /// Render a whole session, followed by a blank line.
    pub fn session<W: Write>(&self, session: &Session, out: &mut W) -> io::Result<()> {
        for event in &session.events {
            self.event(event, out)?;
        }
        writeln!(out)
    }

    /// Render a single event.
    pub fn event<W: Write>(&self, event: &Event, out: &mut W) -> io::Result<()> {
        match event {
            Event::Created(path) => writeln!(out, "Created {}", path.display()),
            Event::Listing(items) => {
                for (index, item) in items {
                    let marker = if item.completed {
                        "[Complete]".green().to_string()
                    } else {
                        String::new()
                    };
                    writeln!(out, "[{index:2}]{marker} {}", item.text)?;
                }
                Ok(())
            }
            Event::NothingToDo => writeln!(out, "No todos added yet!"),
            Event::Added => writeln!(out, "{}", "Added!".green()),
            Event::Completed => writeln!(out, "{}", "Completed!".green()),
            Event::Deleted => writeln!(out, "{}", "Deleted!".green()),
            Event::Swept(n) => writeln!(out, "Removed {n} completed todos from the list!"),
            Event::Purged(n) => writeln!(out, "Removed {n} todos from the list!"),
            Event::Usage | Event::Unrecognized(_) => out.write_all(USAGE.as_bytes()),
            Event::Version => writeln!(out, "todo {VERSION}"),
            Event::Failed(err) => self.failure(err, out),
        }
    }

    fn failure<W: Write>(&self, err: &StoreError, out: &mut W) -> io::Result<()> {
        let msg = match err {
            StoreError::Unavailable { path, access, .. } => match access {
                Access::Read => match self.missing_store {
                    MissingStore::Usage => return out.write_all(USAGE.as_bytes()),
                    MissingStore::Notice => format!(
                        "Could not open {}. Run 'todo init' to create it.",
                        path.display()
                    ),
                },
                Access::Create => format!("Error creating {}", path.display()),
                Access::Append => "Error adding todo!".to_string(),
                Access::Write => "Error updating todos!".to_string(),
            },
            StoreError::HomeUnset { var } => {
                format!("Error: no home directory (${var} is not set)")
            }
            StoreError::IndexOutOfRange { .. } => "No such item!".to_string(),
            StoreError::InvalidArgument(msg) => msg.clone(),
        };
        writeln!(out, "{}", msg.red())
    }
}
