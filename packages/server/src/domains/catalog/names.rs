//! Product name resolution.
//!
//! Derives a human-readable product name from page metadata, URL path
//! segments, or keyword heuristics, in a fixed precedence order. First
//! match wins:
//!
//! 1. Page title, site-suffix tokens stripped, unless generic
//! 2. Last non-generic URL path segment, decoded and title-cased
//! 3. Keyword match against the URL
//! 4. Literal fallback
//!
//! Used both at fetch time and by the background repair task.

use url::Url;

/// Title values that name a section of the site, not a product.
const GENERIC_NAMES: [&str; 4] = ["home", "solutions", "products", "assessments"];

/// Path segments that never identify a product.
const SKIP_SEGMENTS: [&str; 4] = ["solutions", "products", "assessments", "view"];

/// URL keyword table, checked in order.
const KEYWORD_NAMES: [(&str, &str); 5] = [
    ("personality", "Personality Assessment"),
    ("cognitive", "Cognitive Assessment"),
    ("skills", "Skills Assessment"),
    ("video-interview", "Video Interview Assessment"),
    ("360", "360 Feedback Assessment"),
];

/// Literal last-resort name.
const FALLBACK_NAME: &str = "SHL Assessment";

/// Resolve a product name from a page title and URL.
pub fn resolve(title: Option<&str>, url: &str) -> String {
    if let Some(title) = title {
        let cleaned = strip_site_suffix(title);
        if !cleaned.is_empty() && !is_generic(&cleaned) {
            return cleaned;
        }
    }
    resolve_from_url(url, None)
}

/// Resolve a product name from the URL alone (precedence steps 2-4).
///
/// When repairing a record that already carries a `test_type`, the
/// literal fallback becomes `"SHL Assessment - {test_type}"`.
pub fn resolve_from_url(url: &str, test_type: Option<&str>) -> String {
    if let Some(name) = name_from_path(url) {
        return name;
    }
    if let Some(name) = name_from_keywords(url) {
        return name;
    }
    match test_type {
        Some(test_type) if !test_type.is_empty() => {
            format!("{} - {}", FALLBACK_NAME, test_type)
        }
        _ => FALLBACK_NAME.to_string(),
    }
}

/// Strip known site-suffix tokens from a page title.
fn strip_site_suffix(title: &str) -> String {
    title
        .replace(" | SHL", "")
        .replace("SHL |", "")
        .replace("SHL", "")
        .trim()
        .to_string()
}

fn is_generic(name: &str) -> bool {
    let lower = name.to_lowercase();
    GENERIC_NAMES.contains(&lower.as_str())
}

/// Derive a name from the last non-generic path segment.
fn name_from_path(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segments: Vec<String> = parsed
        .path_segments()?
        .map(|s| s.to_string())
        .collect();

    for segment in segments.iter().rev() {
        if segment.is_empty() || SKIP_SEGMENTS.contains(&segment.to_lowercase().as_str()) {
            continue;
        }

        let decoded = urlencoding::decode(segment)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| segment.clone());
        let spaced: String = decoded
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { ' ' })
            .collect();
        let name = title_case(&spaced);
        if !name.is_empty() {
            return Some(name);
        }
    }

    None
}

/// Match the URL against the ordered keyword table.
fn name_from_keywords(url: &str) -> Option<String> {
    let lower = url.to_lowercase();
    KEYWORD_NAMES
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, name)| name.to_string())
}

/// Title-case each whitespace-separated word, collapsing runs of spaces.
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
