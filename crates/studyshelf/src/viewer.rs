//! Google Drive URL logic for the embedded document viewer: extracting
//! the file id and building embed and download URLs. A URL with no
//! extractable id degrades to an inline placeholder in the detail view;
//! it never fails the page.

use once_cell::sync::Lazy;
use regex::Regex;

static DRIVE_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/d/([A-Za-z0-9_-]+)").expect("drive id pattern compiles"));

/// The identifier segment following `/d/` in a Drive or Docs URL.
pub fn drive_file_id(url: &str) -> Option<&str> {
    DRIVE_ID
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str())
}

/// Embeddable frame URL. Slide decks use the presentation embed player;
/// everything else uses the Drive file preview.
pub fn embed_url(url: &str) -> Option<String> {
    let id = drive_file_id(url)?;
    if url.contains("docs.google.com/presentation") {
        Some(format!(
            "https://docs.google.com/presentation/d/{id}/embed?start=false&loop=false&delayms=3000"
        ))
    } else {
        Some(format!("https://drive.google.com/file/d/{id}/preview"))
    }
}

pub fn download_url(url: &str) -> Option<String> {
    let id = drive_file_id(url)?;
    Some(format!("https://drive.google.com/uc?export=download&id={id}"))
}
