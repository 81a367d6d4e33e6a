//! The sidebar navigation tree: a fully materialized four-level menu
//! built from the same content tree the resolver walks. Expansion and
//! active state are derived from the current path; empty branches are
//! filtered out.

use crate::content::ContentTree;
use crate::resolve::encoded_href;

#[derive(Debug)]
pub struct NavTree {
    pub semesters: Vec<NavSemester>,
}

#[derive(Debug)]
pub struct NavSemester {
    pub name: String,
    pub href: String,
    pub active: bool,
    pub open: bool,
    pub subjects: Vec<NavSubject>,
}

#[derive(Debug)]
pub struct NavSubject {
    pub name: String,
    pub href: String,
    pub active: bool,
    pub open: bool,
    pub units: Vec<NavUnit>,
}

#[derive(Debug)]
pub struct NavUnit {
    pub name: String,
    pub href: String,
    pub active: bool,
    pub open: bool,
    pub sections: Vec<NavSection>,
}

#[derive(Debug)]
pub struct NavSection {
    pub name: String,
    pub href: String,
    pub active: bool,
    pub open: bool,
    pub notes: Vec<NavNote>,
}

#[derive(Debug)]
pub struct NavNote {
    pub title: String,
    pub href: String,
    pub active: bool,
}

/// Segment-wise prefix test: `current` lies on or below the node's path.
/// This is not a string-prefix match; `/sem1/cs` is not an ancestor of
/// `/sem1/cs2`.
fn on_active_path(node: &[&str], current: &[String]) -> bool {
    current.len() >= node.len()
        && node
            .iter()
            .zip(current.iter())
            .all(|(a, b)| *a == b.as_str())
}

impl NavTree {
    /// Builds the menu for the current request. `current` is the decoded
    /// path of the page being rendered (empty on the home page);
    /// `note_param` is the raw `note` query value, used only for leaf
    /// note highlighting.
    pub fn build(tree: &ContentTree, current: &[String], note_param: Option<&str>) -> Self {
        let semesters = tree
            .0
            .iter()
            .map(|(sem, subjects)| {
                let path = [sem.as_str()];
                let active = on_active_path(&path, current);
                NavSemester {
                    name: sem.clone(),
                    href: encoded_href(&path),
                    active,
                    open: active,
                    subjects: subjects
                        .iter()
                        .filter(|(_, units)| !units.is_empty())
                        .map(|(subject, units)| {
                            build_subject(sem, subject, units, current, note_param)
                        })
                        .collect(),
                }
            })
            .collect();
        NavTree { semesters }
    }

    /// Total number of leaf note links in the menu (test support for the
    /// no-duplication, no-omission invariant).
    pub fn note_links(&self) -> usize {
        self.semesters
            .iter()
            .flat_map(|s| &s.subjects)
            .flat_map(|s| &s.units)
            .flat_map(|u| &u.sections)
            .map(|section| section.notes.len())
            .sum()
    }
}

fn build_subject(
    sem: &str,
    subject: &str,
    units: &crate::content::Subject,
    current: &[String],
    note_param: Option<&str>,
) -> NavSubject {
    let path = [sem, subject];
    let active = on_active_path(&path, current);
    NavSubject {
        name: subject.to_string(),
        href: encoded_href(&path),
        active,
        open: active,
        units: units
            .iter()
            .filter(|(_, sections)| !sections.is_empty())
            .map(|(unit, sections)| build_unit(sem, subject, unit, sections, current, note_param))
            .collect(),
    }
}

fn build_unit(
    sem: &str,
    subject: &str,
    unit: &str,
    sections: &crate::content::Unit,
    current: &[String],
    note_param: Option<&str>,
) -> NavUnit {
    let path = [sem, subject, unit];
    let active = on_active_path(&path, current);
    NavUnit {
        name: unit.to_string(),
        href: encoded_href(&path),
        active,
        open: active,
        sections: sections
            .iter()
            .filter(|(_, notes)| !notes.is_empty())
            .map(|(section, notes)| {
                let section_path = [sem, subject, unit, section.as_str()];
                let section_active = on_active_path(&section_path, current);
                let section_href = encoded_href(&section_path);
                // A note link is active only under strict equality: the
                // current path must be exactly this section and the query
                // index must match.
                let exact_section = current.len() == 4 && section_active;
                NavSection {
                    name: section.clone(),
                    active: section_active,
                    open: section_active,
                    notes: notes
                        .iter()
                        .enumerate()
                        .map(|(index, note)| NavNote {
                            title: note.title.clone(),
                            href: format!("{section_href}?note={index}"),
                            active: exact_section
                                && note_param == Some(index.to_string().as_str()),
                        })
                        .collect(),
                    href: section_href,
                }
            })
            .collect(),
    }
}
