//! Route handlers.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};
use tracing::{debug, warn};

use super::{assets, render};
use crate::app::App;
use crate::managers::link_manager::LinkManagerTrait;
use crate::types::errors::RouteError;
use crate::types::link::{domain_from_url, Direction, Link, MoveOutcome};

/// Request parameters merged from the form body and the query string.
///
/// Body values win over query values; the first occurrence of a key wins.
struct FormFields(HashMap<String, String>);

impl FormFields {
    fn parse(uri: &Uri, body: &[u8]) -> Self {
        let mut fields = HashMap::new();
        let query = uri.query().unwrap_or_default().as_bytes();
        for (key, value) in url::form_urlencoded::parse(body).chain(url::form_urlencoded::parse(query)) {
            fields.entry(key.into_owned()).or_insert_with(|| value.into_owned());
        }
        Self(fields)
    }

    /// Field value, or `""` when absent.
    fn get(&self, key: &str) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or_default()
    }

    /// Positive link id from the `id` field.
    fn id(&self) -> Result<i64, RouteError> {
        let raw = self.get("id").trim();
        if raw.is_empty() {
            return Err(RouteError::BadRequest("Missing id".to_string()));
        }
        match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(id),
            _ => Err(RouteError::BadRequest("Invalid id".to_string())),
        }
    }

    /// Required name and URL.
    fn name_and_url(&self) -> Result<(&str, &str), RouteError> {
        let name = self.get("name");
        let href = self.get("url");
        if name.is_empty() || href.is_empty() {
            return Err(RouteError::BadRequest("Name and URL are required".to_string()));
        }
        Ok((name, href))
    }
}

fn home() -> Redirect {
    Redirect::to("/")
}

/// `GET /`: the ordered link list, optionally filtered by `q`.
pub async fn index(State(app): State<App>, uri: Uri) -> Result<Html<String>, RouteError> {
    let query = FormFields::parse(&uri, &[]).get("q").to_string();
    let links = app.with_links(|links| links.search_links(&query))?;
    let links = fill_missing_icons(&app, links).await;
    Ok(Html(render::link_page(&links, &query, &app.resolver.settings().fallback_icon)))
}

/// Resolves icons for links that have none yet and stores each result,
/// so a site is only fetched on the first render after it was added or cleared.
async fn fill_missing_icons(app: &App, mut links: Vec<Link>) -> Vec<Link> {
    for link in links.iter_mut().filter(|link| link.needs_icon()) {
        let icon = match domain_from_url(&link.href) {
            Some(domain) => app.resolver.resolve(&domain).await,
            None => app.resolver.settings().fallback_icon.clone(),
        };
        match app.with_links(|links| links.store_resolved_icon(link.id, &icon)) {
            Ok(stored) => debug!(id = link.id, %icon, stored, "icon resolved at render"),
            Err(e) => warn!(id = link.id, error = %e, "could not store resolved icon"),
        }
        link.img = Some(icon);
    }
    links
}

/// Icon for a new or edited link: the supplied one, else discovered from the URL.
async fn icon_for(app: &App, favicon: &str, href: &str) -> Option<String> {
    if !favicon.is_empty() {
        return Some(favicon.to_string());
    }
    let domain = domain_from_url(href)?;
    Some(app.resolver.resolve(&domain).await)
}

/// `POST /add`: form: name, url, favicon (optional).
pub async fn add_link(State(app): State<App>, method: Method, uri: Uri, body: Bytes) -> Result<Redirect, RouteError> {
    if method != Method::POST {
        return Err(RouteError::MethodNotAllowed);
    }
    let form = FormFields::parse(&uri, &body);
    let (name, href) = form.name_and_url()?;

    let img = icon_for(&app, form.get("favicon"), href).await;
    let id = app.with_links(|links| links.add_link(Some(name), href, img.as_deref()))?;
    debug!(id, %href, "link created");
    Ok(home())
}

/// `POST /edit`: form: id, name, url, favicon. An empty favicon clears the icon.
pub async fn edit_link(State(app): State<App>, method: Method, uri: Uri, body: Bytes) -> Result<Redirect, RouteError> {
    if method != Method::POST {
        // A plain GET (menu link without scripts) just goes back.
        return Ok(home());
    }
    let form = FormFields::parse(&uri, &body);
    let id = form.id()?;
    let (name, href) = form.name_and_url()?;
    let favicon = form.get("favicon").trim();
    let img = (!favicon.is_empty()).then_some(favicon);

    app.with_links(|links| links.update_link(id, Some(name), href, img))?;
    debug!(id, cleared_icon = img.is_none(), "link updated");
    Ok(home())
}

/// `GET|POST /delete`: id from the query string or the form body.
pub async fn delete_link(State(app): State<App>, method: Method, uri: Uri, body: Bytes) -> Result<Redirect, RouteError> {
    if method != Method::GET && method != Method::POST {
        return Err(RouteError::MethodNotAllowed);
    }
    let body: &[u8] = if method == Method::POST { &body } else { &[] };
    let form = FormFields::parse(&uri, body);
    let id = form.id()?;

    let removed = app.with_links(|links| links.delete_link(id))?;
    debug!(id, removed, "link delete");
    Ok(home())
}

/// `GET /move?id=..&dir=up|down`: every failure is a silent redirect.
pub async fn move_link(State(app): State<App>, method: Method, uri: Uri) -> Redirect {
    if method != Method::GET {
        return home();
    }
    let form = FormFields::parse(&uri, &[]);
    let Ok(id) = form.id() else {
        return home();
    };
    let Ok(direction) = form.get("dir").parse::<Direction>() else {
        return home();
    };

    match app.with_links(|links| links.move_link(id, direction)) {
        Ok(MoveOutcome::Moved) => debug!(id, %direction, "link moved"),
        Ok(outcome) => debug!(id, %direction, ?outcome, "move skipped"),
        Err(e) => warn!(id, %direction, error = %e, "move rolled back"),
    }
    home()
}

/// `GET /headers`: echoes request headers, one `Name: value` line each.
pub async fn echo_headers(headers: HeaderMap) -> Response {
    let mut body = String::new();
    for (name, value) in headers.iter() {
        body.push_str(&canonical_header_name(name.as_str()));
        body.push_str(": ");
        body.push_str(&String::from_utf8_lossy(value.as_bytes()));
        body.push('\n');
    }
    ([(CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
}

/// `user-agent` -> `User-Agent`.
fn canonical_header_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// `GET /static/:file`: bundled assets.
pub async fn static_asset(Path(file): Path<String>) -> Response {
    match assets::lookup(&file) {
        Some(asset) => ([(CONTENT_TYPE, asset.content_type)], asset.body).into_response(),
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

/// `GET /favicon.ico`: the page's own icon.
pub async fn site_icon() -> Response {
    let asset = assets::site_icon();
    (
        [(CONTENT_TYPE, asset.content_type), (CACHE_CONTROL, "public, max-age=86400")],
        asset.body,
    )
        .into_response()
}
