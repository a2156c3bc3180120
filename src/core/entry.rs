//! Entry - Core data structure
//!
//! An entry is the unit of knowledge stored by knowbot.
//!
//! # Key Properties
//! - **ID**: integer, `max(existing) + 1`, never reused
//! - **Kind**: Issue, Note or Logic
//! - **Module / Description**: required for every kind
//! - **Name / Version / Solution**: only meaningful for issues
//!
//! Field names on disk are exactly `ID`, `Kind`, `Module`, `Description`,
//! `Name`, `Version`, `Solution`, in that order.

use std::io;

use serde::{Deserialize, Serialize};

/// Entry kind
///
/// The edit wizard accepts free text for the kind, so anything that is not
/// one of the three known kinds is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Kind {
    /// Troubleshooting record (name, version, cause, solution)
    Issue,
    /// Free-form note
    Note,
    /// Logic explanation, description is a `;` separated list
    Logic,
    /// Anything else
    Other(String),
}

impl Kind {
    /// The three kinds offered by the creation menu
    pub const MENU: [&'static str; 3] = ["Issue", "Note", "Logic"];

    /// Parse one of the known kinds (case-insensitive)
    pub fn known(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "issue" => Some(Kind::Issue),
            "note" => Some(Kind::Note),
            "logic" => Some(Kind::Logic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Kind::Issue => "Issue",
            Kind::Note => "Note",
            Kind::Logic => "Logic",
            Kind::Other(s) => s,
        }
    }

    pub fn is_issue(&self) -> bool {
        matches!(self, Kind::Issue)
    }
}

impl From<String> for Kind {
    fn from(s: String) -> Self {
        Kind::known(&s).unwrap_or_else(|| Kind::Other(s.trim().to_string()))
    }
}

impl From<Kind> for String {
    fn from(kind: Kind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields that may be changed after creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Kind,
    Name,
    Module,
    Description,
    Version,
    Solution,
}

impl EntryField {
    pub const ALL: [EntryField; 6] = [
        EntryField::Kind,
        EntryField::Name,
        EntryField::Module,
        EntryField::Description,
        EntryField::Version,
        EntryField::Solution,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryField::Kind => "Kind",
            EntryField::Name => "Name",
            EntryField::Module => "Module",
            EntryField::Description => "Description",
            EntryField::Version => "Version",
            EntryField::Solution => "Solution",
        }
    }

    /// Kind and Module must never be blank
    pub fn is_required(&self) -> bool {
        matches!(self, EntryField::Kind | EntryField::Module)
    }

    /// Menu labels in display order
    pub fn menu() -> Vec<String> {
        Self::ALL.iter().map(|f| f.as_str().to_string()).collect()
    }
}

impl std::fmt::Display for EntryField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntryField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownField(wanted.to_string()))
    }
}

/// A field name outside the mutable set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("field '{0}' cannot be edited (allowed: Kind, Name, Module, Description, Version, Solution)")]
pub struct UnknownField(pub String);

/// A knowledge entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique identifier, assigned by the store
    #[serde(rename = "ID")]
    pub id: u64,

    #[serde(rename = "Kind")]
    pub kind: Kind,

    #[serde(rename = "Module")]
    pub module: String,

    #[serde(rename = "Description")]
    pub description: String,

    /// Issue name (issues only)
    #[serde(rename = "Name", default)]
    pub name: String,

    /// Affected version (issues only)
    #[serde(rename = "Version", default)]
    pub version: String,

    /// Fix (issues only)
    #[serde(rename = "Solution", default)]
    pub solution: String,
}

impl Entry {
    /// Create an unsaved entry; the store assigns the ID on append
    pub fn new(kind: Kind, module: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: 0,
            kind,
            module: module.into(),
            description: description.into(),
            name: String::new(),
            version: String::new(),
            solution: String::new(),
        }
    }

    /// Create an unsaved issue with all six fields
    pub fn issue(
        version: impl Into<String>,
        name: impl Into<String>,
        module: impl Into<String>,
        cause: impl Into<String>,
        solution: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            solution: solution.into(),
            ..Self::new(Kind::Issue, module, cause)
        }
    }

    /// Set a single mutable field
    pub fn set(&mut self, field: EntryField, value: impl Into<String>) {
        let value = value.into();
        match field {
            EntryField::Kind => self.kind = Kind::from(value),
            EntryField::Name => self.name = value,
            EntryField::Module => self.module = value,
            EntryField::Description => self.description = value,
            EntryField::Version => self.version = value,
            EntryField::Solution => self.solution = value,
        }
    }

    pub fn get(&self, field: EntryField) -> &str {
        match field {
            EntryField::Kind => self.kind.as_str(),
            EntryField::Name => &self.name,
            EntryField::Module => &self.module,
            EntryField::Description => &self.description,
            EntryField::Version => &self.version,
            EntryField::Solution => &self.solution,
        }
    }

    /// Canonical text form (all keys and values), used for substring search
    /// and for rendering entries of unknown kind.
    ///
    /// Single-line JSON with `", "` and `": "` separators, non-ASCII verbatim:
    /// `{"ID": 7, "Kind": "Note", "Module": "Auth", ...}`
    pub fn canonical(&self) -> String {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
        if self.serialize(&mut ser).is_err() {
            return String::new();
        }
        String::from_utf8(buf).unwrap_or_default()
    }
}

/// Compact JSON with a space after every `,` and `:`
struct SpacedFormatter;

impl serde_json::ser::Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}
