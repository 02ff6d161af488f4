//! Page rendering
//!
//! Fills the embedded page template by placeholder substitution: the
//! server-rendered topic sections, the visit count, the footer year, and
//! the three JSON blobs the client script consumes.

use anyhow::{Context, Result};
use chrono::{Datelike, Local};

use masterguide_core::catalog::ContentCatalog;
use masterguide_core::taxonomy;

use crate::Assets;

/// Render the single guide page.
pub fn render_page(visit_count: u64, catalog: &ContentCatalog) -> Result<String> {
    let template = Assets::get("index.html").context("page template missing from build")?;
    let template =
        std::str::from_utf8(&template.data).context("page template is not valid UTF-8")?;

    let catalog_json =
        serde_json::to_string(catalog).context("failed to serialize content catalog")?;

    let page = template
        .replace("{{app_sections}}", &app_sections(catalog))
        .replace("{{visit_count}}", &visit_count.to_string())
        .replace("{{year}}", &Local::now().year().to_string())
        .replace("{{topics_json}}", &taxonomy::topics_value().to_string())
        .replace("{{actions_json}}", &taxonomy::actions_value().to_string())
        .replace("{{catalog_json}}", &catalog_json);

    Ok(page)
}

/// Topic sections with per-app action links and any catalog content.
fn app_sections(catalog: &ContentCatalog) -> String {
    let mut out = String::new();
    for (category, apps) in taxonomy::TOPICS {
        out.push_str("<div class='section topic'><h3>");
        out.push_str(category);
        out.push_str("</h3>");
        for app in *apps {
            out.push_str("<div class='app-item'><strong>📘 ");
            out.push_str(app);
            out.push_str("</strong><div class='app-box'>");

            // Catalog text and accounts are user-edited data; escape them.
            if let Some(content) = catalog.get(*app) {
                if !content.text.is_empty() {
                    out.push_str("<p>");
                    out.push_str(&html_escape(&content.text));
                    out.push_str("</p>");
                }
                if !content.accounts.is_empty() {
                    out.push_str("<ul class='accounts'>");
                    for account in &content.accounts {
                        out.push_str("<li>");
                        out.push_str(&html_escape(account));
                        out.push_str("</li>");
                    }
                    out.push_str("</ul>");
                }
            }

            for action in taxonomy::ACTIONS {
                out.push_str("<a class='link' href='#'>");
                out.push_str(action);
                out.push_str(" on ");
                out.push_str(app);
                out.push_str("</a>");
            }
            out.push_str("</div></div>");
        }
        out.push_str("</div>");
    }
    out
}

pub(crate) fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
