//! Search indexing: the whole content tree flattened into one ordered
//! sequence of records (one per unit, one per note), filtered by
//! case-insensitive substring match. Results are capped, in index order,
//! unranked.

use serde::Serialize;

use crate::content::ContentTree;
use crate::resolve::encoded_href;

pub const MAX_RESULTS: usize = 10;

const BREADCRUMB_SEPARATOR: &str = " › ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecord {
    pub title: String,
    /// Breadcrumb chain of ancestor names.
    pub subtitle: String,
    pub href: String,
    pub kind: RecordKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Unit,
    Note,
}

#[derive(Debug, Default)]
pub struct SearchIndex {
    records: Vec<SearchRecord>,
}

impl SearchIndex {
    /// Flattens the tree in iteration order. Semesters and subjects are
    /// not indexed on their own; they appear only in subtitles.
    pub fn build(tree: &ContentTree) -> Self {
        let mut records = Vec::new();
        for (sem, subjects) in &tree.0 {
            let sem = sem.as_str();
            for (subject, units) in subjects {
                let subject = subject.as_str();
                for (unit, sections) in units {
                    let unit = unit.as_str();
                    records.push(SearchRecord {
                        title: unit.to_string(),
                        subtitle: format!("{sem}{BREADCRUMB_SEPARATOR}{subject}"),
                        href: encoded_href(&[sem, subject, unit]),
                        kind: RecordKind::Unit,
                    });
                    for (section, notes) in sections {
                        let section = section.as_str();
                        let section_href = encoded_href(&[sem, subject, unit, section]);
                        for (index, note) in notes.iter().enumerate() {
                            records.push(SearchRecord {
                                title: note.title.clone(),
                                subtitle: [sem, subject, unit, section]
                                    .join(BREADCRUMB_SEPARATOR),
                                href: format!("{section_href}?note={index}"),
                                kind: RecordKind::Note,
                            });
                        }
                    }
                }
            }
        }
        SearchIndex { records }
    }

    /// First [`MAX_RESULTS`] records whose title or subtitle contains the
    /// query, ignoring case. An empty or whitespace-only query matches
    /// nothing.
    pub fn query(&self, q: &str) -> Vec<&SearchRecord> {
        let needle = q.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.records
            .iter()
            .filter(|record| {
                record.title.to_lowercase().contains(&needle)
                    || record.subtitle.to_lowercase().contains(&needle)
            })
            .take(MAX_RESULTS)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of note-type records (test support: must equal the tree's
    /// total note count).
    pub fn note_records(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.kind == RecordKind::Note)
            .count()
    }
}
