// src/dispatch.rs
//! Command dispatcher: turns a token sequence into store operations.

#![deny(missing_docs)]

use crate::config::Config;
use crate::error::StoreError;
use crate::report::Event;
use crate::store::{Cycle, Locations, Scope, Store};
use std::collections::VecDeque;
use tracing::{debug, info};

/// Commands, matched on the first character of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Switch to the global list.
    Global,
    /// Create or reset the list.
    Init,
    /// Add an item from all remaining tokens.
    Add,
    /// Complete an item by index.
    Complete,
    /// Remove completed items.
    Sweep,
    /// Delete an item by index.
    Delete,
    /// Remove every item.
    Purge,
    /// Print the version.
    Version,
    /// Print usage.
    Help,
}

impl Command {
    /// Match `token` case-insensitively by its first character.
    pub fn from_token(token: &str) -> Option<Self> {
        let first = token.chars().next()?.to_ascii_lowercase();
        Some(match first {
            'g' => Command::Global,
            'i' => Command::Init,
            'a' => Command::Add,
            'c' => Command::Complete,
            's' => Command::Sweep,
            'd' => Command::Delete,
            'p' => Command::Purge,
            'v' => Command::Version,
            'h' => Command::Help,
            _ => return None,
        })
    }
}

/// Lenient index parse: optional leading whitespace and sign, then as many
/// digits as present. Anything unparsable is 0; negative values and overflow
/// can never be in range.
pub fn parse_index_lenient(token: &str) -> usize {
    let s = token.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() {
        return 0;
    }
    match digits.parse::<usize>() {
        Ok(0) => 0,
        Ok(_) if negative => usize::MAX,
        Ok(n) => n,
        Err(_) => usize::MAX,
    }
}

/// Strict index parse: the whole token must be a non-negative integer.
pub fn parse_index_strict(token: &str) -> Result<usize, StoreError> {
    token
        .trim()
        .parse::<usize>()
        .map_err(|_| StoreError::InvalidArgument(format!("Invalid todo ID '{token}'")))
}

/// Everything one invocation produced.
#[derive(Debug, Default)]
pub struct Session {
    /// Events in the order they happened.
    pub events: Vec<Event>,
}

impl Session {
    /// True when any command failed.
    pub fn failed(&self) -> bool {
        self.events.iter().any(Event::is_failure)
    }
}

/// Runs token sequences against the stores named by `Locations`.
pub struct Dispatcher<'a> {
    locations: &'a Locations,
    config: &'a Config,
}

impl<'a> Dispatcher<'a> {
    /// New dispatcher.
    pub fn new(locations: &'a Locations, config: &'a Config) -> Self {
        Self { locations, config }
    }

    /// Dispatch a full invocation. No tokens lists the local items.
    pub fn run<I, S>(&self, tokens: I) -> Session
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tokens: VecDeque<String> = tokens.into_iter().map(Into::into).collect();
        let mut session = Session::default();

        if tokens.is_empty() {
            self.list(Scope::Local, &mut session.events);
            return session;
        }

        let mut scope = Scope::Local;
        while let Some(token) = tokens.pop_front() {
            scope = self.step(scope, &token, &mut tokens, &mut session.events);
        }
        debug!(?scope, "session done");
        session
    }

    /// Handle one command, consuming its arguments from `rest`. Returns the
    /// scope for the next command.
    fn step(
        &self,
        scope: Scope,
        token: &str,
        rest: &mut VecDeque<String>,
        events: &mut Vec<Event>,
    ) -> Scope {
        let Some(command) = Command::from_token(token) else {
            debug!(token, "unrecognized command");
            rest.clear();
            events.push(Event::Unrecognized(token.to_string()));
            return scope;
        };
        debug!(?command, ?scope, "dispatch");

        match command {
            Command::Global => {
                if rest.is_empty() {
                    self.list(Scope::Global, events);
                }
                return Scope::Global;
            }
            Command::Init => self.with_store(scope, events, |store, events| {
                events.push(match store.init() {
                    Ok(()) => Event::Created(store.path().to_path_buf()),
                    Err(e) => Event::Failed(e),
                });
            }),
            Command::Add => {
                if rest.is_empty() {
                    Self::missing(events, "No todo to add!");
                } else {
                    let text = rest.drain(..).collect::<Vec<_>>().join(" ");
                    self.with_store(scope, events, |store, events| {
                        events.push(match store.append(&text) {
                            Ok(()) => Event::Added,
                            Err(e) => Event::Failed(e),
                        });
                    });
                }
            }
            Command::Complete | Command::Delete => {
                let Some(arg) = rest.pop_front() else {
                    let verb = if command == Command::Complete {
                        "complete"
                    } else {
                        "delete"
                    };
                    Self::missing(
                        events,
                        &format!("You need to pass in a todo ID to {verb}!"),
                    );
                    return scope;
                };
                let index = if self.config.strict_index {
                    match parse_index_strict(&arg) {
                        Ok(i) => i,
                        Err(e) => {
                            rest.clear();
                            events.push(Event::Failed(e));
                            return scope;
                        }
                    }
                } else {
                    parse_index_lenient(&arg)
                };
                self.with_store(scope, events, |store, events| {
                    let (cycle, done) = if command == Command::Complete {
                        (store.complete_at(index), Event::Completed)
                    } else {
                        (store.delete_at(index), Event::Deleted)
                    };
                    let Cycle {
                        load,
                        outcome,
                        rewrite,
                    } = cycle;
                    events.extend(load.map(Event::Failed));
                    events.push(match outcome {
                        Ok(()) => done,
                        Err(e) => Event::Failed(e),
                    });
                    events.extend(rewrite.err().map(Event::Failed));
                });
            }
            Command::Sweep | Command::Purge => self.with_store(scope, events, |store, events| {
                let (cycle, make): (_, fn(usize) -> Event) = if command == Command::Sweep {
                    (store.sweep(), Event::Swept)
                } else {
                    (store.purge(), Event::Purged)
                };
                events.extend(cycle.load.map(Event::Failed));
                events.extend(cycle.rewrite.err().map(Event::Failed));
                events.push(make(cycle.outcome));
            }),
            Command::Version => {
                rest.clear();
                events.push(Event::Version);
            }
            Command::Help => {
                rest.clear();
                events.push(Event::Usage);
            }
        }
        scope
    }

    fn missing(events: &mut Vec<Event>, message: &str) {
        events.push(Event::Failed(StoreError::InvalidArgument(message.to_string())));
        events.push(Event::Usage);
    }

    fn with_store(
        &self,
        scope: Scope,
        events: &mut Vec<Event>,
        f: impl FnOnce(&Store, &mut Vec<Event>),
    ) {
        match self.locations.store(scope) {
            Ok(store) => f(&store, events),
            Err(e) => {
                info!(?scope, error = %e, "no store for scope");
                events.push(Event::Failed(e));
            }
        }
    }

    fn list(&self, scope: Scope, events: &mut Vec<Event>) {
        self.with_store(scope, events, |store, events| {
            let todos = match store.load() {
                Ok(t) => t,
                Err(e) => {
                    events.push(Event::Failed(e));
                    Default::default()
                }
            };
            if todos.is_empty() {
                events.push(Event::NothingToDo);
            } else {
                events.push(Event::Listing(todos.items().collect()));
            }
        });
    }
}
