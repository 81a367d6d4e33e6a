//! The content tree: a read-only four-level hierarchy of study material
//! (semester → subject → unit → section → notes) loaded once from a static
//! JSON file and shared by every handler for the life of the process.

use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

use crate::error::{SiteError, SiteResult};

/// Canonical ordering of section categories in the unit listing. Section
/// keys not in this list are dropped from that view (but stay reachable
/// through the sidebar and by direct URL).
pub const SECTION_ORDER: [&str; 6] = [
    "notes",
    "slides",
    "question-banks",
    "short-notes",
    "assignments",
    "lab-manuals",
];

/// A leaf record: a link to an externally hosted document. Notes have no
/// intrinsic id; they are addressed by position within their section.
#[derive(Debug, Clone, Deserialize)]
pub struct Note {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Section name → ordered notes.
pub type Unit = IndexMap<String, Vec<Note>>;
/// Unit name → unit.
pub type Subject = IndexMap<String, Unit>;
/// Subject name → subject.
pub type Semester = IndexMap<String, Subject>;

/// The root entity: semester name → semester. Iteration order at every
/// level is the insertion order of the source JSON.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ContentTree(pub IndexMap<String, Semester>);

impl ContentTree {
    /// Reads the content tree from a JSON file. A missing or malformed
    /// file is fatal; there is no partial degradation.
    pub fn load(path: &Path) -> SiteResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|error| {
            SiteError::ConfigLoad(format!(
                "failed to read content file {}: {error}",
                path.display()
            ))
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> SiteResult<Self> {
        serde_json::from_str(raw)
            .map_err(|error| SiteError::ConfigLoad(format!("malformed content tree: {error}")))
    }

    pub fn semesters(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn first_semester(&self) -> Option<&str> {
        self.0.keys().next().map(String::as_str)
    }

    pub fn contains_semester(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of leaf notes across the whole tree.
    pub fn total_notes(&self) -> usize {
        self.0
            .values()
            .flat_map(|semester| semester.values())
            .flat_map(|subject| subject.values())
            .flat_map(|unit| unit.values())
            .map(Vec::len)
            .sum()
    }
}
