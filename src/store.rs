// src/store.rs
//! Backing files for the local and global todo lists.

#![deny(missing_docs)]

use crate::error::{Access, StoreError};
use crate::line;
use crate::todos::Todos;
use std::env;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name of a todo list, in either scope.
pub const STORE_FILE: &str = ".todo";

/// Environment variable holding the user's home directory.
#[cfg(windows)]
pub const HOME_VAR: &str = "USERPROFILE";
/// Environment variable holding the user's home directory.
#[cfg(not(windows))]
pub const HOME_VAR: &str = "HOME";

/// Which list a command applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    /// `.todo` in the working directory.
    #[default]
    Local,
    /// `.todo` in the home directory.
    Global,
}

/// Where the two scopes live.
#[derive(Debug, Clone)]
pub struct Locations {
    /// Directory holding the local list.
    pub local_root: PathBuf,
    /// Home directory, if known.
    pub home: Option<PathBuf>,
}

impl Locations {
    /// Local list in `.`, global list in `$HOME` (`%USERPROFILE%` on Windows).
    pub fn from_env() -> Self {
        Self {
            local_root: PathBuf::from("."),
            home: env::var_os(HOME_VAR)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Open the store for `scope`.
    pub fn store(&self, scope: Scope) -> Result<Store, StoreError> {
        let root = match scope {
            Scope::Local => self.local_root.as_path(),
            Scope::Global => self
                .home
                .as_deref()
                .ok_or(StoreError::HomeUnset { var: HOME_VAR })?,
        };
        Ok(Store::at(root.join(STORE_FILE)))
    }
}

/// Result of one load, mutate, rewrite cycle.
///
/// A failed load is tolerated: the mutation runs against an empty list and
/// the rewrite still happens.
#[derive(Debug)]
pub struct Cycle<T> {
    /// Load failure, if any.
    pub load: Option<StoreError>,
    /// What the mutation returned.
    pub outcome: T,
    /// Whether the list could be written back.
    pub rewrite: Result<(), StoreError>,
}

/// One backing file. Every operation opens it once and closes it before returning.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Store backed by `path`.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn fail(&self, access: Access, source: std::io::Error) -> StoreError {
        warn!(path = %self.path.display(), %access, error = %source, "store unavailable");
        StoreError::unavailable(&self.path, access, source)
    }

    /// Create or truncate the backing file.
    pub fn init(&self) -> Result<(), StoreError> {
        debug!(path = %self.path.display(), "init");
        File::create(&self.path).map_err(|e| self.fail(Access::Create, e))?;
        Ok(())
    }

    /// Read every raw line of the backing file.
    pub fn load(&self) -> Result<Todos, StoreError> {
        let file = File::open(&self.path).map_err(|e| self.fail(Access::Read, e))?;
        let todos = Todos::read_from(BufReader::new(file)).map_err(|e| self.fail(Access::Read, e))?;
        debug!(path = %self.path.display(), lines = todos.len(), "loaded");
        Ok(todos)
    }

    /// Append a new open item.
    pub fn append(&self, text: &str) -> Result<(), StoreError> {
        debug!(path = %self.path.display(), text, "append");
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.fail(Access::Append, e))?;
        file.write_all(&line::encode_new(text))
            .map_err(|e| self.fail(Access::Append, e))
    }

    /// Truncate the backing file and write `todos` back, dropping tombstones.
    pub fn rewrite(&self, todos: &Todos) -> Result<(), StoreError> {
        debug!(path = %self.path.display(), slots = todos.len(), "rewrite");
        let file = File::create(&self.path).map_err(|e| self.fail(Access::Write, e))?;
        todos
            .write_to(BufWriter::new(file))
            .map_err(|e| self.fail(Access::Write, e))
    }

    /// Load, apply `f`, and rewrite unconditionally.
    pub fn modify<T>(&self, f: impl FnOnce(&mut Todos) -> T) -> Cycle<T> {
        let (mut todos, load) = match self.load() {
            Ok(t) => (t, None),
            Err(e) => (Todos::default(), Some(e)),
        };
        let outcome = f(&mut todos);
        let rewrite = self.rewrite(&todos);
        Cycle {
            load,
            outcome,
            rewrite,
        }
    }

    /// Mark item `index` complete.
    pub fn complete_at(&self, index: usize) -> Cycle<Result<(), StoreError>> {
        self.modify(|t| t.complete_at(index))
    }

    /// Tombstone item `index`.
    pub fn delete_at(&self, index: usize) -> Cycle<Result<(), StoreError>> {
        self.modify(|t| t.delete_at(index))
    }

    /// Remove completed items, yielding the count.
    pub fn sweep(&self) -> Cycle<usize> {
        self.modify(Todos::sweep)
    }

    /// Remove all items, yielding the count.
    pub fn purge(&self) -> Cycle<usize> {
        self.modify(Todos::purge)
    }
}
