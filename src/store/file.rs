// evedit: Environment Variable Editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! File backend: one JSON document per scope.
//!
//! ```text
//! <root>/
//!   user.json     { "MY_VAR": "hello", "Path": "C:\\A;C:\\B;" }
//!   system.json
//!
//! open(READ)  missing file --> empty scope
//! open(FULL)  create root + file, PermissionDenied --> AccessDenied
//! flush       re-read document, apply this handle's writes,
//!             NamedTempFile in <root> + sync_all --> persist over document
//! ```
//!
//! A flush only replaces the names written through its own handle, so
//! concurrent handles never undo each other's variables. The document is
//! swapped in by rename and is never left truncated.
//!
//! Privilege for the system scope is whatever the file permissions say.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::name::VarName;
use super::{Backend, KeyHandle};
use crate::error::StoreError;
use crate::scope::{AccessRights, Location, RootKey};

/// Backend storing each scope as a JSON object under a root directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the document backing `location`.
    #[must_use]
    pub fn document_path(&self, location: &Location) -> PathBuf {
        let file_name = match location.root() {
            RootKey::CurrentUser => "user.json",
            RootKey::LocalMachine => "system.json",
        };
        self.root.join(file_name)
    }
}

fn io_error(location: &Location, path: &Path, err: &std::io::Error) -> StoreError {
    if err.kind() == ErrorKind::PermissionDenied {
        StoreError::AccessDenied {
            scope: location.scope(),
            location: path.display().to_string(),
        }
    } else {
        StoreError::Unavailable {
            scope: location.scope(),
            location: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

fn parse_document(
    location: &Location,
    path: &Path,
    content: &str,
) -> Result<BTreeMap<VarName, String>, StoreError> {
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    let raw: BTreeMap<String, String> =
        serde_json::from_str(content).map_err(|e| StoreError::Unavailable {
            scope: location.scope(),
            location: path.display().to_string(),
            message: format!("corrupt document: {e}"),
        })?;
    Ok(raw.into_iter().map(|(k, v)| (VarName::new(k), v)).collect())
}

/// Reads the document at `path`; a missing file is an empty scope.
fn read_document(
    location: &Location,
    path: &Path,
) -> Result<BTreeMap<VarName, String>, StoreError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
        Err(e) => return Err(io_error(location, path, &e)),
    };
    parse_document(location, path, &content)
}

impl Backend for FileBackend {
    fn name(&self) -> &'static str {
        "file"
    }

    fn open<'a>(
        &'a self,
        location: &Location,
        access: AccessRights,
    ) -> Result<Box<dyn KeyHandle + 'a>, StoreError> {
        let path = self.document_path(location);
        let writable = access.allows_write();

        if writable {
            std::fs::create_dir_all(&self.root)
                .map_err(|e| io_error(location, &self.root, &e))?;
            OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(false)
                .open(&path)
                .map_err(|e| io_error(location, &path, &e))?;
        }

        let vars = read_document(location, &path)?;
        Ok(Box::new(FileKey {
            location: *location,
            dir: self.root.clone(),
            path,
            writable,
            vars,
            pending: BTreeMap::new(),
        }))
    }
}

struct FileKey {
    location: Location,
    dir: PathBuf,
    path: PathBuf,
    writable: bool,
    /// Document as read when the handle was opened.
    vars: BTreeMap<VarName, String>,
    /// Writes not yet flushed.
    pending: BTreeMap<VarName, String>,
}

impl FileKey {
    fn unavailable(&self, message: impl std::fmt::Display) -> StoreError {
        StoreError::Unavailable {
            scope: self.location.scope(),
            location: self.path.display().to_string(),
            message: message.to_string(),
        }
    }

    fn write_document(&self, vars: &BTreeMap<VarName, String>) -> Result<(), StoreError> {
        let document: BTreeMap<&str, &str> = vars
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        let mut content =
            serde_json::to_string_pretty(&document).map_err(|e| self.unavailable(e))?;
        content.push('\n');

        let mut temp =
            NamedTempFile::new_in(&self.dir).map_err(|e| io_error(&self.location, &self.dir, &e))?;
        temp.write_all(content.as_bytes())
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|e| io_error(&self.location, temp.path(), &e))?;
        temp.persist(&self.path)
            .map_err(|e| io_error(&self.location, &self.path, &e.error))?;
        Ok(())
    }
}

impl KeyHandle for FileKey {
    fn query(&self, name: &str) -> Result<Option<String>, StoreError> {
        let name = VarName::new(name);
        Ok(self
            .pending
            .get(&name)
            .or_else(|| self.vars.get(&name))
            .cloned())
    }

    fn set_expandable(&mut self, name: &str, value: &str) -> Result<(), StoreError> {
        if !self.writable {
            return Err(StoreError::AccessDenied {
                scope: self.location.scope(),
                location: self.path.display().to_string(),
            });
        }
        self.pending.insert(VarName::new(name), value.to_string());
        Ok(())
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let mut current = read_document(&self.location, &self.path)?;
        // Existing keys keep their stored casing.
        for (name, value) in &self.pending {
            current.insert(name.clone(), value.clone());
        }
        self.write_document(&current)?;

        self.vars = current;
        self.pending.clear();
        Ok(())
    }

    fn value_names(&self) -> Result<Vec<String>, StoreError> {
        let names: BTreeSet<&VarName> = self.vars.keys().chain(self.pending.keys()).collect();
        Ok(names.into_iter().map(|k| k.as_str().to_string()).collect())
    }
}
