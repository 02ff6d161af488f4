//! Per-app guide content catalog
//!
//! The catalog maps app name -> guide content. Synchronization seeds an
//! empty entry for every taxonomy app so rendering never hits a missing
//! key; entries for apps that left the taxonomy are kept as-is.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::taxonomy;

/// Guide content for one app. All fields default to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppContent {
    pub text: String,
    pub image: String,
    pub video: String,
    pub accounts: Vec<String>,
}

/// App name -> content, persisted as `content.json`.
pub type ContentCatalog = BTreeMap<String, AppContent>;

/// Seed a default entry for every taxonomy app missing from the catalog.
///
/// Existing entries are never modified or removed. Returns the number of
/// entries added; the caller persists the catalog when it grew.
pub fn synchronize(catalog: &mut ContentCatalog) -> usize {
    synchronize_with(catalog, taxonomy::all_apps())
}

/// Reconcile the catalog against an explicit app universe.
pub fn synchronize_with<'a>(
    catalog: &mut ContentCatalog,
    apps: impl Iterator<Item = &'a str>,
) -> usize {
    let mut added = 0;
    for app in apps {
        if !catalog.contains_key(app) {
            catalog.insert(app.to_string(), AppContent::default());
            added += 1;
        }
    }
    if added > 0 {
        tracing::info!(added, "seeded missing catalog entries");
    }
    added
}
