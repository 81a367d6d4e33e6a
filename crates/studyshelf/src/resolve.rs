//! Path resolution: maps an ordered sequence of URL-decoded segments onto
//! a node of the content tree, one key lookup per level. Shared path
//! vocabulary (href encoding, unit-path keys) lives here too so the view
//! selector, navigation tree, and search index all build links the same way.

use crate::content::{ContentTree, Note, Semester, Subject, Unit};

/// A node reached by walking the tree along a path. Borrows from the
/// tree; resolution never clones.
#[derive(Debug)]
pub enum Resolved<'a> {
    Semester(&'a Semester),
    Subject(&'a Subject),
    Unit(&'a Unit),
    Notes(&'a [Note]),
}

impl Resolved<'_> {
    pub fn depth(&self) -> usize {
        match self {
            Resolved::Semester(_) => 1,
            Resolved::Subject(_) => 2,
            Resolved::Unit(_) => 3,
            Resolved::Notes(_) => 4,
        }
    }
}

/// Walks the tree level by level. Comparison is exact-string and
/// case-sensitive. Any absent segment, an empty path, or a path deeper
/// than four segments resolves to `None`. An empty mapping or empty note
/// list is a successful resolution, not a failure.
pub fn resolve<'a>(tree: &'a ContentTree, segments: &[String]) -> Option<Resolved<'a>> {
    match segments {
        [sem] => tree.0.get(sem).map(Resolved::Semester),
        [sem, sub] => tree.0.get(sem)?.get(sub).map(Resolved::Subject),
        [sem, sub, unit] => tree.0.get(sem)?.get(sub)?.get(unit).map(Resolved::Unit),
        [sem, sub, unit, section] => tree
            .0
            .get(sem)?
            .get(sub)?
            .get(unit)?
            .get(section)
            .map(|notes| Resolved::Notes(notes)),
        _ => None,
    }
}

/// Percent-encoded absolute href for a path of raw segment names.
pub fn encoded_href(segments: &[&str]) -> String {
    let encoded: Vec<String> = segments
        .iter()
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();
    format!("/{}", encoded.join("/"))
}

/// The three-segment prefix that keys comment threads. Comments belong to
/// the unit, never to an individual section or note.
pub fn unit_path(segments: &[String]) -> String {
    segments
        .iter()
        .take(3)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("/")
}
