//! Storage locator parsing.
//!
//! Avatar locators persisted on contact rows come in several shapes: full
//! public-object URLs from the storage API, bare `bucket/path` strings from
//! older rows, and plain file names. Cleanup needs the storage-relative path,
//! so this module normalizes the first shape and passes the rest through.

use once_cell::sync::Lazy;
use regex::Regex;

/// Public-object URL shape: `.../storage/v1/object/public/<bucket>/<path>`.
static PUBLIC_OBJECT_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/storage/v1/object/public/[^/]+/(.+)").unwrap());

static DUPLICATE_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"/+").unwrap());

/// Derive the storage-relative path from a public locator.
///
/// A full public-object URL yields everything after the bucket segment,
/// percent-decoded and with duplicate path separators collapsed. Any other
/// shape (bare `bucket/path`, a plain file name, or an unrelated URL) is
/// returned unchanged. Never fails; parsing a bare path again yields the
/// same result.
pub fn extract_storage_path(locator: &str) -> String {
    let Some(caps) = PUBLIC_OBJECT_URL.captures(locator) else {
        return locator.to_string();
    };

    let raw = caps.get(1).map_or("", |m| m.as_str());
    let decoded = match urlencoding::decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_string(),
    };

    DUPLICATE_SEPARATORS.replace_all(&decoded, "/").into_owned()
}
