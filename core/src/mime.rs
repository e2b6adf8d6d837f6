//! Short mnemonic names for the MIME types a request is commonly sent with.
//!
//! # Design
//! The table is a fixed `&'static` slice rather than a hash map: it is tiny,
//! immutable for the life of the process, and a linear scan keeps lookup
//! order deterministic. Resolution never fails. Anything not in the table is
//! assumed to already be a full MIME string and is passed through untouched,
//! so `"json"` and `"application/ld+json"` travel through the same setters.

pub const JSON: &str = "application/json";
pub const XML: &str = "application/xml";
pub const XHTML: &str = "application/html+xml";
pub const FORM: &str = "application/x-www-form-urlencoded";
pub const UPLOAD: &str = "multipart/form-data";
pub const PLAIN: &str = "text/plain";
pub const JS: &str = "text/javascript";
pub const HTML: &str = "text/html";
pub const YAML: &str = "application/x-yaml";
pub const CSV: &str = "text/csv";

/// Every registered mnemonic with the MIME type it stands for.
pub const MIMES: &[(&str, &str)] = &[
    ("json", JSON),
    ("xml", XML),
    ("form", FORM),
    ("plain", PLAIN),
    ("text", PLAIN),
    ("upload", UPLOAD),
    ("html", HTML),
    ("xhtml", XHTML),
    ("js", JS),
    ("javascript", JS),
    ("yaml", YAML),
    ("csv", CSV),
];

fn lookup(name: &str) -> Option<&'static str> {
    MIMES
        .iter()
        .find(|(short, _)| *short == name)
        .map(|(_, full)| *full)
}

/// Resolve a mnemonic to its full MIME type, or return `name` unchanged.
pub fn resolve(name: &str) -> &str {
    lookup(name).unwrap_or(name)
}

/// Whether `name` is a registered mnemonic.
///
/// A full MIME string reports `false` here even when it is one of the table's
/// values; [`resolve`] still accepts it as a pass-through.
pub fn supports(name: &str) -> bool {
    lookup(name).is_some()
}
