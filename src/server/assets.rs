//! Static files compiled into the binary.

/// An embedded file and its MIME type.
#[derive(Debug, Clone, Copy)]
pub struct Asset {
    pub content_type: &'static str,
    pub body: &'static [u8],
}

const STYLE_CSS: &[u8] = include_bytes!("../../static/style.css");
const SCRIPT_JS: &[u8] = include_bytes!("../../static/script.js");
const EARTH_SVG: &[u8] = include_bytes!("../../static/earth.svg");
const FAVICON_SVG: &[u8] = include_bytes!("../../static/favicon.svg");

/// Looks up a file served under `/static/`.
pub fn lookup(name: &str) -> Option<Asset> {
    let asset = match name {
        "style.css" => Asset { content_type: "text/css; charset=utf-8", body: STYLE_CSS },
        "script.js" => Asset { content_type: "text/javascript; charset=utf-8", body: SCRIPT_JS },
        "earth.svg" => Asset { content_type: "image/svg+xml", body: EARTH_SVG },
        "favicon.svg" => Asset { content_type: "image/svg+xml", body: FAVICON_SVG },
        _ => return None,
    };
    Some(asset)
}

/// Icon served at `/favicon.ico`.
pub fn site_icon() -> Asset {
    Asset { content_type: "image/svg+xml", body: FAVICON_SVG }
}
