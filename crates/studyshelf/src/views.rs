//! View selection: turns a resolved node, its path, and the optional
//! `note` query parameter into exactly one of four renderable page
//! shapes. This layer is pure data; templates consume it.

use crate::content::{Note, SECTION_ORDER};
use crate::error::{SiteError, SiteResult};
use crate::resolve::{encoded_href, unit_path, Resolved};
use crate::viewer;

#[derive(Debug)]
pub enum PageView {
    /// Depth 1–2: keys of the resolved mapping as link targets.
    Listing {
        title: String,
        entries: Vec<LinkEntry>,
    },
    /// Depth 3: section cards in canonical order with note counts.
    Unit {
        title: String,
        cards: Vec<SectionCard>,
        unit_path: String,
    },
    /// Depth 4 without `note`: one card per note in sequence order.
    Grid {
        title: String,
        cards: Vec<NoteCard>,
        unit_path: String,
    },
    /// Depth 4 with a valid `note` index: single-note detail.
    Detail {
        title: String,
        tags: Vec<String>,
        section_href: String,
        unit_path: String,
        viewer: ViewerPane,
    },
}

#[derive(Debug)]
pub struct LinkEntry {
    pub label: String,
    pub href: String,
}

#[derive(Debug)]
pub struct SectionCard {
    pub name: String,
    pub href: String,
    pub count: usize,
}

#[derive(Debug)]
pub struct NoteCard {
    pub title: String,
    pub tags: Vec<String>,
    pub href: String,
}

/// Viewer collaborator inputs for one note. Both URLs are `None` when no
/// Drive id can be extracted; the template then renders the invalid-URL
/// placeholder instead of a frame.
#[derive(Debug)]
pub struct ViewerPane {
    pub embed_url: Option<String>,
    pub download_url: Option<String>,
}

impl ViewerPane {
    pub fn for_url(url: &str) -> Self {
        Self {
            embed_url: viewer::embed_url(url),
            download_url: viewer::download_url(url),
        }
    }
}

impl PageView {
    pub fn title(&self) -> &str {
        match self {
            PageView::Listing { title, .. }
            | PageView::Unit { title, .. }
            | PageView::Grid { title, .. }
            | PageView::Detail { title, .. } => title,
        }
    }

    /// The three-segment comment key, when this view carries a comment
    /// section (unit, grid, and detail views do; directory listings do not).
    pub fn unit_path(&self) -> Option<&str> {
        match self {
            PageView::Listing { .. } => None,
            PageView::Unit { unit_path, .. }
            | PageView::Grid { unit_path, .. }
            | PageView::Detail { unit_path, .. } => Some(unit_path),
        }
    }
}

/// Selects the view for a resolved node. `note_param` is only meaningful
/// at depth 4; a non-numeric, negative, or out-of-range index is
/// `NotFound` with no clamping.
pub fn select_view(
    resolved: &Resolved<'_>,
    segments: &[String],
    note_param: Option<&str>,
) -> SiteResult<PageView> {
    let refs: Vec<&str> = segments.iter().map(String::as_str).collect();
    let title = segments.last().cloned().unwrap_or_default();

    match resolved {
        Resolved::Semester(_) | Resolved::Subject(_) => {
            let keys: Vec<&String> = match resolved {
                Resolved::Semester(semester) => semester.keys().collect(),
                Resolved::Subject(subject) => subject.keys().collect(),
                _ => unreachable!(),
            };
            let entries = keys
                .into_iter()
                .map(|key| {
                    let mut child = refs.clone();
                    child.push(key.as_str());
                    LinkEntry {
                        label: key.clone(),
                        href: encoded_href(&child),
                    }
                })
                .collect();
            Ok(PageView::Listing { title, entries })
        }
        Resolved::Unit(unit) => {
            let cards = SECTION_ORDER
                .iter()
                .copied()
                .filter_map(|section| {
                    unit.get(section).map(|notes| {
                        let mut child = refs.clone();
                        child.push(section);
                        SectionCard {
                            name: section.to_string(),
                            href: encoded_href(&child),
                            count: notes.len(),
                        }
                    })
                })
                .collect();
            Ok(PageView::Unit {
                title,
                cards,
                unit_path: unit_path(segments),
            })
        }
        Resolved::Notes(notes) => match note_param {
            None => Ok(note_grid(notes, &refs, title, unit_path(segments))),
            Some(raw) => {
                let index: usize = raw.parse().map_err(|_| SiteError::NotFound)?;
                let note = notes.get(index).ok_or(SiteError::NotFound)?;
                Ok(PageView::Detail {
                    title: note.title.clone(),
                    tags: note.tags.clone(),
                    section_href: encoded_href(&refs),
                    unit_path: unit_path(segments),
                    viewer: ViewerPane::for_url(&note.url),
                })
            }
        },
    }
}

fn note_grid(notes: &[Note], refs: &[&str], title: String, unit_path: String) -> PageView {
    let section_href = encoded_href(refs);
    let cards = notes
        .iter()
        .enumerate()
        .map(|(index, note)| NoteCard {
            title: note.title.clone(),
            tags: note.tags.clone(),
            href: format!("{section_href}?note={index}"),
        })
        .collect();
    PageView::Grid {
        title,
        cards,
        unit_path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fixtures::sample_tree;
    use crate::resolve::resolve;

    fn segs(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    fn view_at(parts: &[&str], note: Option<&str>) -> SiteResult<PageView> {
        let tree = sample_tree();
        let segments = segs(parts);
        let resolved = resolve(&tree, &segments).expect("path resolves");
        select_view(&resolved, &segments, note)
    }

    #[test]
    fn semester_listing_links_children() {
        match view_at(&["sem1"], None).expect("view") {
            PageView::Listing { title, entries } => {
                assert_eq!(title, "sem1");
                let hrefs: Vec<&str> = entries.iter().map(|e| e.href.as_str()).collect();
                assert_eq!(hrefs, vec!["/sem1/cs", "/sem1/math"]);
            }
            other => panic!("expected listing, got {other:?}"),
        }
    }

    #[test]
    fn empty_subject_lists_no_entries() {
        match view_at(&["sem2", "physics"], None).expect("view") {
            PageView::Listing { entries, .. } => assert!(entries.is_empty()),
            other => panic!("expected listing, got {other:?}"),
        }
    }

    #[test]
    fn unit_cards_follow_canonical_order_and_drop_unrecognized() {
        match view_at(&["sem1", "cs", "unit1"], None).expect("view") {
            PageView::Unit {
                cards, unit_path, ..
            } => {
                // "scratch" is present in the data but not in SECTION_ORDER.
                let names: Vec<&str> = cards.iter().map(|c| c.name.as_str()).collect();
                assert_eq!(names, vec!["notes", "slides"]);
                assert_eq!(cards[0].count, 2);
                assert_eq!(cards[1].count, 1);
                assert_eq!(unit_path, "sem1/cs/unit1");
            }
            other => panic!("expected unit view, got {other:?}"),
        }
    }

    #[test]
    fn grid_links_notes_by_position() {
        match view_at(&["sem1", "cs", "unit1", "notes"], None).expect("view") {
            PageView::Grid { cards, .. } => {
                assert_eq!(cards.len(), 2);
                assert_eq!(cards[0].href, "/sem1/cs/unit1/notes?note=0");
                assert_eq!(cards[1].href, "/sem1/cs/unit1/notes?note=1");
            }
            other => panic!("expected grid, got {other:?}"),
        }
    }

    #[test]
    fn detail_shows_the_indexed_note() {
        match view_at(&["sem1", "cs", "unit1", "notes"], Some("0")).expect("view") {
            PageView::Detail { title, viewer, .. } => {
                assert_eq!(title, "A");
                assert_eq!(
                    viewer.embed_url.as_deref(),
                    Some("https://drive.google.com/file/d/XYZ/preview")
                );
            }
            other => panic!("expected detail, got {other:?}"),
        }
    }

    #[test]
    fn invalid_note_indexes_are_not_found() {
        for bad in ["2", "-1", "abc", "1.5", ""] {
            let err = view_at(&["sem1", "cs", "unit1", "notes"], Some(bad))
                .expect_err("invalid index");
            assert!(matches!(err, SiteError::NotFound), "index {bad:?}");
        }
    }

    #[test]
    fn comments_key_by_unit_for_grid_and_detail() {
        let grid = view_at(&["sem1", "cs", "unit1", "notes"], None).expect("grid");
        let detail = view_at(&["sem1", "cs", "unit1", "notes"], Some("1")).expect("detail");
        assert_eq!(grid.unit_path(), Some("sem1/cs/unit1"));
        assert_eq!(detail.unit_path(), Some("sem1/cs/unit1"));
        let listing = view_at(&["sem1"], None).expect("listing");
        assert_eq!(listing.unit_path(), None);
    }
}
