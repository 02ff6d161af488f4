//! Keyword search over the taxonomy and action list
//!
//! Canonical implementation of the filter the client script runs against
//! the embedded data: queries shorter than two characters return nothing,
//! otherwise every (category, app) pair and every action is scanned for a
//! case-insensitive substring match.

use serde::Serialize;

/// What a search hit refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HitKind {
    App,
    Action,
}

/// One search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub title: String,
    pub category: String,
    pub kind: HitKind,
}

/// Minimum query length after trimming; shorter queries match nothing.
pub const MIN_QUERY_LEN: usize = 2;

/// Filter the taxonomy and actions by case-insensitive substring match.
///
/// App hits come first in taxonomy order, then action hits; action hits are
/// reported under the literal "Actions" category, matching the page.
pub fn search(topics: &[(&str, &[&str])], actions: &[&str], query: &str) -> Vec<SearchHit> {
    let keyword = query.trim().to_lowercase();
    if keyword.len() < MIN_QUERY_LEN {
        return Vec::new();
    }

    let mut hits = Vec::new();
    for (category, apps) in topics {
        for app in *apps {
            if app.to_lowercase().contains(&keyword) {
                hits.push(SearchHit {
                    title: (*app).to_string(),
                    category: (*category).to_string(),
                    kind: HitKind::App,
                });
            }
        }
    }
    for action in actions {
        if action.to_lowercase().contains(&keyword) {
            hits.push(SearchHit {
                title: (*action).to_string(),
                category: "Actions".to_string(),
                kind: HitKind::Action,
            });
        }
    }
    hits
}

/// Wrap every case-insensitive occurrence of `query` in the highlight span
/// used by the results panel.
pub fn highlight(text: &str, query: &str) -> String {
    let keyword = query.trim().to_lowercase();
    if keyword.len() < MIN_QUERY_LEN {
        return text.to_string();
    }

    let lower = text.to_lowercase();
    if lower.len() != text.len() {
        // Lowercasing changed byte offsets (non-ASCII text); skip
        // highlighting rather than slice at the wrong boundary.
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    while let Some(found) = lower[pos..].find(&keyword) {
        let start = pos + found;
        let end = start + keyword.len();
        out.push_str(&text[pos..start]);
        out.push_str("<span class=\"search-highlight\">");
        out.push_str(&text[start..end]);
        out.push_str("</span>");
        pos = end;
    }
    out.push_str(&text[pos..]);
    out
}
