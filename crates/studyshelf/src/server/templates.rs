//! Server-side HTML rendering. Page bodies are selected from the
//! [`PageView`] shapes and wrapped in a shared layout carrying the
//! sidebar navigation, the search box, and the page script that talks to
//! the JSON endpoints for search and comments.

use askama::Template;

use crate::nav::NavTree;
use crate::views::{LinkEntry, NoteCard, PageView, SectionCard, ViewerPane};

/// Client-side glue for the search box and the comment section. The
/// comment section is populated after load so page rendering never
/// blocks on the comment store.
const PAGE_SCRIPT: &str = r##"
(function () {
  var input = document.getElementById('global-search');
  var results = document.getElementById('search-results');
  if (input && results) {
    input.addEventListener('input', function () {
      var q = input.value.trim();
      if (!q) { results.hidden = true; results.innerHTML = ''; return; }
      fetch('/api/search?q=' + encodeURIComponent(q))
        .then(function (r) { return r.json(); })
        .then(function (items) {
          results.innerHTML = '';
          if (items.length === 0) {
            results.innerHTML = '<div class="search-empty">No results found.</div>';
          }
          items.forEach(function (item) {
            var link = document.createElement('a');
            link.href = item.href;
            link.className = 'search-result';
            var title = document.createElement('div');
            title.className = 'result-title';
            title.textContent = item.title;
            var subtitle = document.createElement('div');
            subtitle.className = 'result-subtitle';
            subtitle.textContent = item.subtitle;
            link.appendChild(title);
            link.appendChild(subtitle);
            results.appendChild(link);
          });
          results.hidden = false;
        });
    });
  }

  var section = document.getElementById('comments');
  if (!section) { return; }
  var path = section.getAttribute('data-unit-path');
  var list = document.getElementById('comment-list');
  function load() {
    fetch('/api/comments?path=' + encodeURIComponent(path))
      .then(function (r) { return r.json(); })
      .then(function (comments) {
        list.innerHTML = '';
        if (comments.length === 0) {
          list.innerHTML = '<p class="empty">No comments yet. Be the first to comment!</p>';
          return;
        }
        comments.forEach(function (c) {
          var item = document.createElement('div');
          item.className = 'comment';
          var author = document.createElement('span');
          author.className = 'comment-author';
          author.textContent = c.authorName;
          var when = document.createElement('span');
          when.className = 'comment-date';
          when.textContent = new Date(c.createdAt).toLocaleDateString();
          var body = document.createElement('p');
          body.textContent = c.content;
          item.appendChild(author);
          item.appendChild(when);
          item.appendChild(body);
          list.appendChild(item);
        });
      });
  }
  load();
  var form = document.getElementById('comment-form');
  form.addEventListener('submit', function (event) {
    event.preventDefault();
    var content = form.elements.content.value;
    if (!content.trim()) { return; }
    fetch('/api/comments', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({
        path: path,
        content: content,
        authorName: form.elements.authorName.value
      })
    }).then(function () { form.reset(); load(); });
  });
})();
"##;

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>{{ site_name }} • {{ title }}</title>
  </head>
  <body>
    <div class="shell">
      <aside class="sidebar">
        <a class="brand" href="/">{{ site_name }}</a>
        <div class="search">
          <input id="global-search" type="text" placeholder="Search..." autocomplete="off" />
          <div id="search-results" hidden></div>
        </div>
        <nav class="tree">{{ nav_html|safe }}</nav>
      </aside>
      <main class="content">{{ body_html|safe }}</main>
    </div>
    <script>{{ script|safe }}</script>
  </body>
</html>"#,
    ext = "html"
)]
struct LayoutTemplate<'a> {
    site_name: &'a str,
    title: &'a str,
    nav_html: &'a str,
    body_html: &'a str,
    script: &'a str,
}

#[derive(Template)]
#[template(
    source = r#"{% for sem in nav.semesters %}
<details class="nav-semester"{% if sem.open %} open{% endif %}>
  <summary><a href="{{ sem.href }}"{% if sem.active %} class="active"{% endif %}>{{ sem.name }}</a></summary>
  {% for subject in sem.subjects %}
  <details class="nav-subject"{% if subject.open %} open{% endif %}>
    <summary><a href="{{ subject.href }}"{% if subject.active %} class="active"{% endif %}>{{ subject.name }}</a></summary>
    {% for unit in subject.units %}
    <details class="nav-unit"{% if unit.open %} open{% endif %}>
      <summary><a href="{{ unit.href }}"{% if unit.active %} class="active"{% endif %}>{{ unit.name }}</a></summary>
      {% for section in unit.sections %}
      <details class="nav-section"{% if section.open %} open{% endif %}>
        <summary><a href="{{ section.href }}"{% if section.active %} class="active"{% endif %}>{{ section.name }}</a></summary>
        <ul>
        {% for note in section.notes %}
          <li><a href="{{ note.href }}"{% if note.active %} class="active"{% endif %}>{{ note.title }}</a></li>
        {% endfor %}
        </ul>
      </details>
      {% endfor %}
    </details>
    {% endfor %}
  </details>
  {% endfor %}
</details>
{% endfor %}"#,
    ext = "html"
)]
struct NavTemplate<'a> {
    nav: &'a NavTree,
}

#[derive(Template)]
#[template(
    source = r#"<h1>{{ title }}</h1>
{% if entries.is_empty() %}
<p class="empty">No content found.</p>
{% else %}
<ul class="listing">
{% for entry in entries %}
  <li><a href="{{ entry.href }}">{{ entry.label }}</a></li>
{% endfor %}
</ul>
{% endif %}"#,
    ext = "html"
)]
struct ListingTemplate<'a> {
    title: &'a str,
    entries: &'a [LinkEntry],
}

#[derive(Template)]
#[template(
    source = r#"<h1>{{ title }}</h1>
{% if cards.is_empty() %}
<p class="empty">No content in this unit.</p>
{% else %}
<div class="cards">
{% for card in cards %}
  <a class="card" href="{{ card.href }}">
    <h3>{{ card.name }}</h3>
    <p>{{ card.count }} files</p>
  </a>
{% endfor %}
</div>
{% endif %}"#,
    ext = "html"
)]
struct UnitTemplate<'a> {
    title: &'a str,
    cards: &'a [SectionCard],
}

#[derive(Template)]
#[template(
    source = r#"<h1>{{ title }}</h1>
{% if cards.is_empty() %}
<p class="empty">No notes available.</p>
{% else %}
<div class="cards">
{% for card in cards %}
  <a class="card" href="{{ card.href }}">
    <h3>{{ card.title }}</h3>
    {% if !card.tags.is_empty() %}
    <div class="tags">
    {% for tag in card.tags %}
      <span class="tag">#{{ tag }}</span>
    {% endfor %}
    </div>
    {% endif %}
  </a>
{% endfor %}
</div>
{% endif %}"#,
    ext = "html"
)]
struct GridTemplate<'a> {
    title: &'a str,
    cards: &'a [NoteCard],
}

#[derive(Template)]
#[template(
    source = r#"<p class="back"><a href="{{ section_href }}">Back to list</a></p>
<h1>{{ title }}</h1>
{% if !tags.is_empty() %}
<div class="tags">
{% for tag in tags %}
  <span class="tag">#{{ tag }}</span>
{% endfor %}
</div>
{% endif %}
{% match viewer.embed_url %}
{% when Some with (url) %}
<div class="viewer">
  <iframe src="{{ url }}" allowfullscreen loading="lazy"></iframe>
</div>
{% when None %}
<div class="viewer placeholder"><p>Invalid file URL</p></div>
{% endmatch %}
{% match viewer.download_url %}
{% when Some with (url) %}
<p><a class="download" href="{{ url }}">Download</a></p>
{% when None %}
{% endmatch %}"#,
    ext = "html"
)]
struct DetailTemplate<'a> {
    title: &'a str,
    tags: &'a [String],
    section_href: &'a str,
    viewer: &'a ViewerPane,
}

#[derive(Template)]
#[template(
    source = r#"<section id="comments" data-unit-path="{{ unit_path }}">
  <h3>Comments</h3>
  <div id="comment-list"><p class="empty">No comments yet. Be the first to comment!</p></div>
  <form id="comment-form">
    <input name="authorName" type="text" placeholder="Name (optional)" />
    <textarea name="content" placeholder="Write a comment..." required></textarea>
    <button type="submit">Post Comment</button>
  </form>
</section>"#,
    ext = "html"
)]
struct CommentsTemplate<'a> {
    unit_path: &'a str,
}

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <title>{{ status }}</title>
  </head>
  <body>
    <main class="error">
      <h1>{{ status }}</h1>
      <p>{{ message }}</p>
      <p><a href="/">Go home</a></p>
    </main>
  </body>
</html>"#,
    ext = "html"
)]
struct ErrorTemplate<'a> {
    status: u16,
    message: &'a str,
}

/// Renders a full page for the selected view. The comment section is
/// included only for views carrying a unit path and only when a comment
/// store is configured; otherwise that part of the page renders nothing.
pub fn render_page(
    site_name: &str,
    view: &PageView,
    nav: &NavTree,
    comments_enabled: bool,
) -> Result<String, askama::Error> {
    let nav_html = NavTemplate { nav }.render()?;
    let mut body_html = match view {
        PageView::Listing { title, entries } => ListingTemplate {
            title,
            entries,
        }
        .render()?,
        PageView::Unit { title, cards, .. } => UnitTemplate { title, cards }.render()?,
        PageView::Grid { title, cards, .. } => GridTemplate { title, cards }.render()?,
        PageView::Detail {
            title,
            tags,
            section_href,
            viewer,
            ..
        } => DetailTemplate {
            title,
            tags,
            section_href,
            viewer,
        }
        .render()?,
    };
    if comments_enabled {
        if let Some(unit_path) = view.unit_path() {
            body_html.push('\n');
            body_html.push_str(&CommentsTemplate { unit_path }.render()?);
        }
    }
    LayoutTemplate {
        site_name,
        title: view.title(),
        nav_html: &nav_html,
        body_html: &body_html,
        script: PAGE_SCRIPT,
    }
    .render()
}

/// Standalone page for an empty content tree (nothing to redirect to).
pub fn render_empty_site(site_name: &str) -> String {
    ErrorTemplate {
        status: 200,
        message: "No content found.",
    }
    .render()
    .unwrap_or_else(|_| format!("{site_name}: no content found"))
}

/// Error page; falls back to plain text if rendering itself fails.
pub fn render_error(status: u16, message: &str) -> String {
    ErrorTemplate { status, message }
        .render()
        .unwrap_or_else(|_| format!("{status}: {message}"))
}
