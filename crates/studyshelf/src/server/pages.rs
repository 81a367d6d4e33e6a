//! HTML page handlers: the home redirect, semester selection, and the
//! wildcard content route that drives the path resolver and view
//! selector.

use std::borrow::Cow;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

use crate::nav::NavTree;
use crate::resolve::{encoded_href, resolve};
use crate::server::error::PageError;
use crate::server::templates;
use crate::server::ServerState;
use crate::views::select_view;

/// Cookie mirroring the visitor's selected semester. Single key, written
/// only by the select handler, read only by the home redirect.
const SEMESTER_COOKIE: &str = "semester";

/// GET /
///
/// Redirects to the selected semester when the cookie names one that
/// exists, else to the first semester in tree order.
pub(crate) async fn home(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
) -> Result<Response, PageError> {
    let selected = cookie_value(&headers, SEMESTER_COOKIE)
        .filter(|sem| state.content.contains_semester(sem));
    let target = match selected {
        Some(sem) => Some(sem),
        None => state.content.first_semester().map(str::to_string),
    };
    match target {
        Some(sem) => Ok(Redirect::to(&encoded_href(&[sem.as_str()])).into_response()),
        None => Ok(Html(templates::render_empty_site(&state.config.site_name)).into_response()),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SelectParams {
    semester: String,
}

/// GET /select?semester=
///
/// Persists the semester choice in the cookie and redirects to it.
pub(crate) async fn select_semester(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<SelectParams>,
) -> Result<Response, PageError> {
    if !state.content.contains_semester(&params.semester) {
        return Err(PageError::not_found());
    }
    let cookie = format!(
        "{SEMESTER_COOKIE}={}; Path=/; Max-Age=31536000; SameSite=Lax",
        urlencoding::encode(&params.semester)
    );
    Ok((
        [(header::SET_COOKIE, cookie)],
        Redirect::to(&encoded_href(&[params.semester.as_str()])),
    )
        .into_response())
}

#[derive(Debug, Deserialize)]
pub(crate) struct PageParams {
    note: Option<String>,
}

/// GET /*path
///
/// Resolves the decoded segments against the content tree and renders
/// exactly one view. Any resolution failure is the whole not-found page.
pub(crate) async fn content_page(
    State(state): State<Arc<ServerState>>,
    Path(raw): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Html<String>, PageError> {
    let segments = decode_segments(&raw).ok_or_else(PageError::not_found)?;
    if segments.is_empty() {
        return Err(PageError::not_found());
    }
    let resolved = resolve(&state.content, &segments).ok_or_else(PageError::not_found)?;
    let view = select_view(&resolved, &segments, params.note.as_deref())?;
    let nav = NavTree::build(&state.content, &segments, params.note.as_deref());
    let html = templates::render_page(
        &state.config.site_name,
        &view,
        &nav,
        state.comments.is_some(),
    )
    .map_err(|error| PageError::internal(format!("template render failed: {error}")))?;
    Ok(Html(html))
}

/// Splits a raw wildcard path and URL-decodes each segment. `None` when
/// any segment is not valid percent-encoded UTF-8.
fn decode_segments(raw: &str) -> Option<Vec<String>> {
    raw.split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| urlencoding::decode(segment).ok().map(Cow::into_owned))
        .collect()
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        if key == name {
            urlencoding::decode(value).ok().map(Cow::into_owned)
        } else {
            None
        }
    })
}
