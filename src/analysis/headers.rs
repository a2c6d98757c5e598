//! Header name normalization.

use std::collections::BTreeMap;

use axum::http::HeaderMap;

/// Rewrite a header name so every hyphen-delimited segment is capitalized.
///
/// `content-type` → `Content-Type`, `X-REQUEST-ID` → `X-Request-Id`.
/// Empty segments survive (`a--b` → `A--B`).
pub fn normalize_header_name(name: &str) -> String {
    name.split('-')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join("-")
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Collapse a received header multimap into normalized name → value.
///
/// Repeated lines are joined with `", "` in arrival order. Non UTF-8 bytes
/// are replaced rather than rejected.
pub fn normalize_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut normalized: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        normalized
            .entry(normalize_header_name(name.as_str()))
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert_with(|| value.into_owned());
    }
    normalized
}
