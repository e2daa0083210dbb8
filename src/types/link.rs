use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Longest display label stored for a link, in characters.
pub const MAX_NAME_CHARS: usize = 20;

/// Represents a saved link on the new tab page.
///
/// `img` distinguishes "not resolved yet" (`None`) from a stored value.
/// An empty string is a deliberately blank icon and is never re-resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: i64,
    pub name: Option<String>,
    pub href: String,
    /// Routes only ever write a URL or NULL here. `Some("")` comes from rows
    /// written outside this service (older releases, manual imports).
    pub img: Option<String>,
    pub position: i64,
}

impl Link {
    /// Label shown on the card: the stored name, or the target's host.
    pub fn display_name(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.domain(),
        }
    }

    /// Host (and explicit port) of `href`, or `href` itself when it does not parse.
    pub fn domain(&self) -> String {
        domain_from_url(&self.href).unwrap_or_else(|| self.href.clone())
    }

    /// True when no icon has been resolved for this link yet.
    pub fn needs_icon(&self) -> bool {
        self.img.is_none()
    }
}

/// Direction of a single reorder step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(format!("unknown direction: {}", other)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Result of a move request that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Positions were swapped with the neighbour.
    Moved,
    /// No link with the requested id.
    NotFound,
    /// The link is already first (up) or last (down).
    AtBoundary,
}

/// Keeps the first [`MAX_NAME_CHARS`] characters of `name`.
pub fn truncate_name(name: &str) -> String {
    name.chars().take(MAX_NAME_CHARS).collect()
}

/// Extracts `host[:port]` from an absolute URL.
pub fn domain_from_url(href: &str) -> Option<String> {
    let parsed = url::Url::parse(href).ok()?;
    let host = parsed.host_str()?;
    match parsed.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host.to_string()),
    }
}
