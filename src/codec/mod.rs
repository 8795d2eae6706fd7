// evedit: Environment Variable Editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Conversion between raw persisted strings and semantic values.
//!
//! ```text
//! decode("C:\A;C:\B;") --> List(["C:\A", "C:\B"])   trailing artifact dropped
//! decode("C:\A;;C:\B") --> List(["C:\A", "", "C:\B"])  interior empties kept
//! decode("hello")      --> Scalar("hello")
//!
//! encode(List(["C:\A", "C:\B"])) --> "C:\A;C:\B;"
//! encode(Scalar(s))              --> s
//! ```
//!
//! A value is a list iff its raw form contains the separator. A scalar that
//! legitimately holds a `;` is therefore read back as a list, and an item that
//! holds a `;` cannot be encoded at all.

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// Separator between list items.
pub const SEPARATOR: char = ';';

/// Semantic value of a variable, derived from its raw content on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    Scalar(String),
    List(Vec<String>),
}

impl VariableValue {
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// The items of a list, or the scalar as a single item.
    #[must_use]
    pub fn items(&self) -> Vec<&str> {
        match self {
            Self::Scalar(s) => vec![s.as_str()],
            Self::List(items) => items.iter().map(String::as_str).collect(),
        }
    }

    /// Number of items; a scalar counts as one.
    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::Scalar(_) => 1,
            Self::List(items) => items.len(),
        }
    }

    /// True only for an empty list.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for VariableValue {
    fn default() -> Self {
        Self::Scalar(String::new())
    }
}

/// Returns true if `raw` would decode to a list.
#[must_use]
pub fn is_list(raw: &str) -> bool {
    raw.contains(SEPARATOR)
}

/// Decodes a raw persisted string.
#[must_use]
pub fn decode(raw: &str) -> VariableValue {
    if !is_list(raw) {
        return VariableValue::Scalar(raw.to_string());
    }

    let mut items: Vec<String> = raw.split(SEPARATOR).map(str::to_string).collect();
    // The segment after a trailing separator is the persistence artifact.
    if items.last().is_some_and(String::is_empty) {
        items.pop();
    }
    VariableValue::List(items)
}

/// Encodes a value into its raw persisted form.
///
/// Lists are joined with the separator, which is also appended after the last
/// item.
///
/// # Errors
///
/// Returns [`CodecError::SeparatorInItem`] if a list item contains the
/// separator.
pub fn encode(value: &VariableValue) -> Result<String, CodecError> {
    match value {
        VariableValue::Scalar(s) => Ok(s.clone()),
        VariableValue::List(items) => encode_items(items),
    }
}

/// Encodes list items into their raw persisted form.
///
/// # Errors
///
/// Returns [`CodecError::SeparatorInItem`] if an item contains the separator.
pub fn encode_items<S: AsRef<str>>(items: &[S]) -> Result<String, CodecError> {
    let mut raw = String::new();
    for (index, item) in items.iter().enumerate() {
        let item = item.as_ref();
        if item.contains(SEPARATOR) {
            return Err(CodecError::SeparatorInItem {
                index,
                item: item.to_string(),
            });
        }
        raw.push_str(item);
        raw.push(SEPARATOR);
    }
    Ok(raw)
}
