//! Favicon discovery for newtab.
//!
//! Fetches a site's front page and looks for a `<link rel="...icon...">`
//! tag in its head. Resolution is best effort: every failure degrades to
//! "no icon found" and ultimately to a bundled fallback icon.

use std::time::Duration;

use regex::Regex;
use reqwest::header::ACCEPT;
use tracing::debug;
use url::Url;

use crate::types::errors::FaviconError;

/// Schemes tried in order for every domain.
const SCHEMES: [&str; 2] = ["https", "http"];

/// Accept header sent with page fetches.
const HTML_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Icon served when nothing could be discovered.
pub const FALLBACK_ICON: &str = "/static/earth.svg";

/// Upper bound on how much of a page is read.
pub const MAX_BODY_BYTES: usize = 512 * 1024;

// A <link> tag whose rel value contains "icon", in any quoting style:
//   <link rel="icon" href="/favicon.svg">
//   <link href=/favicon.svg rel=icon>
//   <link rel='shortcut icon' href='...'>
//   <link rel=apple-touch-icon href=/icon.png>
const LINK_ICON_PATTERN: &str = r#"(?is)<link\b[^>]*\brel\s*=\s*(?:"[^"]*icon[^"]*"|'[^']*icon[^']*'|[^"'\s>]*icon[^"'\s>]*)[^>]*>"#;

// href value: double-quoted, single-quoted or unquoted.
const HREF_PATTERN: &str = r#"(?is)\bhref\s*=\s*(?:"([^"]+)"|'([^']+)'|([^"'\s>]+))"#;

/// Tunables for [`FaviconResolver`].
#[derive(Debug, Clone)]
pub struct ResolverSettings {
    /// Whole-request timeout for one page fetch.
    pub timeout: Duration,
    pub user_agent: String,
    pub max_body_bytes: usize,
    pub fallback_icon: String,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(1500),
            user_agent: default_user_agent(),
            max_body_bytes: MAX_BODY_BYTES,
            fallback_icon: FALLBACK_ICON.to_string(),
        }
    }
}

/// User-Agent sent to third-party sites.
pub fn default_user_agent() -> String {
    format!("newtab/{} (+https://example)", env!("CARGO_PKG_VERSION"))
}

/// Finds representative icons for sites.
///
/// Built once at startup and shared; the HTTP client keeps its own pool.
pub struct FaviconResolver {
    client: reqwest::Client,
    link_icon: Regex,
    href_attr: Regex,
    settings: ResolverSettings,
}

impl FaviconResolver {
    pub fn new(settings: ResolverSettings) -> Result<Self, FaviconError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            link_icon: Regex::new(LINK_ICON_PATTERN)?,
            href_attr: Regex::new(HREF_PATTERN)?,
            settings,
        })
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Returns an icon URL for `domain`, or the fallback icon. Never fails.
    pub async fn resolve(&self, domain: &str) -> String {
        match self.discover(domain).await {
            Some(icon) => icon,
            None => self.settings.fallback_icon.clone(),
        }
    }

    /// Tries `https://domain/` then `http://domain/`, returning the first icon found.
    pub async fn discover(&self, domain: &str) -> Option<String> {
        if domain.is_empty() {
            return None;
        }
        for scheme in SCHEMES {
            let page_url = format!("{}://{}/", scheme, domain);
            let Some(document) = self.fetch(&page_url).await else {
                continue;
            };
            if let Some(icon) = self.find_icon_href(&document, &page_url) {
                debug!(%domain, %icon, "favicon discovered");
                return Some(icon);
            }
            debug!(%page_url, "no icon link in page");
        }
        None
    }

    /// Fetches at most `max_body_bytes` of `page_url`. Transport errors yield `None`.
    async fn fetch(&self, page_url: &str) -> Option<String> {
        let mut response = match self.client.get(page_url).header(ACCEPT, HTML_ACCEPT).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(%page_url, error = %e, "favicon fetch failed");
                return None;
            }
        };

        let limit = self.settings.max_body_bytes;
        let mut body: Vec<u8> = Vec::new();
        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => {
                    let room = limit - body.len();
                    if chunk.len() >= room {
                        body.extend_from_slice(&chunk[..room]);
                        break;
                    }
                    body.extend_from_slice(&chunk);
                }
                Ok(None) => break,
                Err(e) => {
                    // Keep whatever arrived before the error.
                    debug!(%page_url, error = %e, "favicon body read interrupted");
                    break;
                }
            }
        }
        Some(String::from_utf8_lossy(&body).into_owned())
    }

    /// Scans `document` for the first icon link with a usable href, resolved against `page_url`.
    pub fn find_icon_href(&self, document: &str, page_url: &str) -> Option<String> {
        let head = head_section(document);
        for tag in self.link_icon.find_iter(head) {
            let Some(captures) = self.href_attr.captures(tag.as_str()) else {
                continue;
            };
            let href = (1..=3)
                .filter_map(|i| captures.get(i))
                .map(|m| m.as_str().trim())
                .find(|value| !value.is_empty());
            let Some(href) = href else {
                continue;
            };
            if let Some(resolved) = resolve_icon_href(page_url, href) {
                return Some(resolved);
            }
        }
        None
    }
}

/// Everything before the first case-insensitive `</head>`, or the whole document.
pub fn head_section(document: &str) -> &str {
    // ASCII lowercasing keeps byte offsets identical.
    let lowered = document.to_ascii_lowercase();
    match lowered.find("</head>") {
        Some(idx) if idx > 0 => &document[..idx],
        _ => document,
    }
}

/// Turns an icon href into an absolute URL.
///
/// Protocol-relative hrefs get `https:`; absolute ones are kept; relative
/// ones are joined onto `page_url`.
pub fn resolve_icon_href(page_url: &str, href: &str) -> Option<String> {
    if href.starts_with("//") {
        return Some(format!("https:{}", href));
    }
    match Url::parse(href) {
        Ok(absolute) => Some(absolute.into()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse(page_url).ok()?;
            base.join(href).ok().map(Into::into)
        }
        Err(_) => None,
    }
}
