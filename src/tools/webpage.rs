//! Webpage fetching and text extraction.

use super::{selector, ToolContext};
use crate::config::ToolSettings;
use crate::error::Result;
use crate::outcome::TextResult;
use scraper::{ElementRef, Html};
use std::time::Duration;
use tracing::warn;

/// Fetch a webpage and return the start of its readable text.
pub async fn summarize_webpage(context: &ToolContext, url: &str) -> TextResult {
    let html = match fetch_page(context, url).await {
        Ok(html) => html,
        Err(e) => {
            warn!("Fetching {} failed: {}", url, e);
            return TextResult::Failure(format!(
                "Failed to fetch the webpage {}: Network error - {}",
                url, e
            ));
        }
    };

    match summarize_html(&html, context.settings()) {
        Ok(text) => TextResult::Success(format!("Summary of content from {}: {}...", url, text)),
        Err(e) => TextResult::Failure(format!("Failed to process the webpage {}: {}", url, e)),
    }
}

async fn fetch_page(context: &ToolContext, url: &str) -> reqwest::Result<String> {
    context
        .client()
        .get(url)
        .timeout(Duration::from_secs(context.settings().fetch_timeout_secs))
        .send()
        .await?
        .error_for_status()?
        .text()
        .await
}

/// Extract summary text from an HTML document.
///
/// Joins the trimmed text of the leading `<p>` elements; pages without
/// paragraph text fall back to the start of all page text. Script and style
/// contents never count as text. The result is cut to `summary_chars`.
pub fn summarize_html(html: &str, settings: &ToolSettings) -> Result<String> {
    let document = Html::parse_document(html);
    let paragraphs = selector("p")?;

    let mut text = document
        .select(&paragraphs)
        .take(settings.max_paragraphs)
        .map(visible_text)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if text.is_empty() {
        text = visible_text(document.root_element())
            .chars()
            .take(settings.fallback_chars)
            .collect();
    }

    Ok(text.chars().take(settings.summary_chars).collect())
}

fn visible_text(element: ElementRef) -> String {
    element
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|e| matches!(e.name(), "script" | "style"))
            });
            (!hidden).then(|| String::from(&**text))
        })
        .collect()
}
