//! Server-side HTML for the link list.
//!
//! Every interpolated value passes through [`escape_html`].

use std::fmt::Write;

use crate::types::link::{Link, MAX_NAME_CHARS};

/// Escapes text for use in element content and quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Icon URL shown for `link`: its stored icon, or `fallback` when blank or unset.
pub fn icon_src<'a>(link: &'a Link, fallback: &'a str) -> &'a str {
    match link.img.as_deref() {
        Some(img) if !img.is_empty() => img,
        _ => fallback,
    }
}

/// Renders the whole page.
pub fn link_page(links: &[Link], query: &str, fallback_icon: &str) -> String {
    let mut cards = String::new();
    for (index, link) in links.iter().enumerate() {
        let is_first = index == 0;
        let is_last = index + 1 == links.len();
        render_card(&mut cards, link, fallback_icon, is_first, is_last);
    }
    if links.is_empty() {
        let message = if query.is_empty() {
            "No links yet. Use “Add link” to create one."
        } else {
            "No links match your search."
        };
        let _ = write!(cards, r#"<p class="empty">{}</p>"#, message);
    }

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>New Tab</title>
<link rel="icon" href="/favicon.ico">
<link rel="stylesheet" href="/static/style.css">
</head>
<body>
<header>
<form class="search" method="get" action="/">
<input type="search" name="q" value="{query}" placeholder="Search links" autofocus>
</form>
<a href="#" id="add-link" class="button">Add link</a>
</header>
<main class="grid">
{cards}
</main>
{add_dialog}
{edit_dialog}
<script src="/static/script.js"></script>
</body>
</html>
"##,
        query = escape_html(query),
        cards = cards,
        add_dialog = link_dialog("add-dialog", "Add link", "/add"),
        edit_dialog = link_dialog("edit-dialog", "Edit link", "/edit"),
    )
}

fn render_card(out: &mut String, link: &Link, fallback_icon: &str, is_first: bool, is_last: bool) {
    let id = link.id;
    let href = escape_html(&link.href);
    let _ = write!(
        out,
        r#"<div class="card" data-id="{id}">
<a class="link" href="{href}">
<img src="{icon}" alt="" width="32" height="32" loading="lazy">
<span class="name">{name}</span>
<span class="domain">{domain}</span>
</a>
<div class="menu-container">
<button type="button" class="item-menu-btn" aria-haspopup="true" aria-expanded="false">&#8942;</button>
<div class="item-menu" role="menu">
<a href="/edit" class="menu-item" data-action="edit" data-id="{id}" data-name="{raw_name}" data-url="{href}" data-favicon="{raw_img}">Edit</a>
"#,
        id = id,
        href = href,
        icon = escape_html(icon_src(link, fallback_icon)),
        name = escape_html(&link.display_name()),
        domain = escape_html(&link.domain()),
        raw_name = escape_html(link.name.as_deref().unwrap_or_default()),
        raw_img = escape_html(link.img.as_deref().unwrap_or_default()),
    );
    if !is_first {
        let _ = writeln!(out, r#"<a href="/move?id={}&amp;dir=up" class="menu-item">Move up</a>"#, id);
    }
    if !is_last {
        let _ = writeln!(out, r#"<a href="/move?id={}&amp;dir=down" class="menu-item">Move down</a>"#, id);
    }
    let _ = write!(
        out,
        r#"<form method="post" action="/delete" class="menu-item">
<input type="hidden" name="id" value="{id}">
<button type="submit" class="danger">Delete</button>
</form>
</div>
</div>
</div>
"#,
        id = id,
    );
}

fn link_dialog(dialog_id: &str, title: &str, action: &str) -> String {
    let id_field = if action == "/edit" {
        r#"<input type="hidden" name="id">"#
    } else {
        ""
    };
    format!(
        r#"<dialog id="{dialog_id}">
<form method="post" action="{action}">
<h2>{title}</h2>
{id_field}
<label>Name <input type="text" name="name" maxlength="{max}" required></label>
<label>URL <input type="url" name="url" required></label>
<label>Icon URL <input type="text" name="favicon" placeholder="discovered automatically"></label>
<div class="actions">
<button type="button" class="close-button">Cancel</button>
<button type="submit">Save</button>
</div>
</form>
</dialog>"#,
        dialog_id = dialog_id,
        action = action,
        title = title,
        id_field = id_field,
        max = MAX_NAME_CHARS,
    )
}
