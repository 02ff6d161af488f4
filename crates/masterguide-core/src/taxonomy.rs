//! Static topic taxonomy and action list
//!
//! The taxonomy is the universe of valid apps: it drives the rendered
//! sections, catalog seeding, and the client search filter. Read-only at
//! runtime; iteration order is declaration order everywhere.

use serde_json::{json, Map, Value};

/// Category name -> ordered app list, in display order.
pub const TOPICS: &[(&str, &[&str])] = &[
    (
        "Video Platforms",
        &["YouTube", "TikTok", "Instagram", "Snapchat", "Likee", "Twitch"],
    ),
    (
        "Messaging Apps",
        &["Telegram", "WhatsApp", "Signal", "Messenger"],
    ),
    (
        "Social Platforms",
        &["TwitterX", "Threads", "Reddit", "Pinterest"],
    ),
    ("Professional", &["LinkedIn"]),
    ("Design & Art", &["Behance", "DeviantArt"]),
    ("Music", &["Spotify", "SoundCloud"]),
];

/// Guide actions offered for every app.
pub const ACTIONS: &[&str] = &[
    "Create Account",
    "Delete Account",
    "Increase Followers",
    "Prevent Hacking",
];

/// All app names across every category, in declaration order.
pub fn all_apps() -> impl Iterator<Item = &'static str> {
    TOPICS.iter().flat_map(|(_, apps)| apps.iter().copied())
}

/// The taxonomy as a JSON object (`{"Video Platforms": ["YouTube", ...], ...}`).
///
/// Relies on serde_json's `preserve_order` feature so the object keys keep
/// declaration order when embedded into the page.
pub fn topics_value() -> Value {
    let mut map = Map::new();
    for (category, apps) in TOPICS {
        map.insert((*category).to_string(), json!(apps));
    }
    Value::Object(map)
}

/// The action list as a JSON array.
pub fn actions_value() -> Value {
    json!(ACTIONS)
}
