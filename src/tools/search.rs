//! Web search over the DuckDuckGo HTML endpoint.

use super::{selector, ToolContext};
use crate::error::Result;
use crate::outcome::TextResult;
use scraper::{ElementRef, Html};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// One search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// Search the web and render the results as text.
pub async fn search_web(context: &ToolContext, query: &str) -> TextResult {
    match fetch_results(context, query).await {
        Ok(results) if results.is_empty() => TextResult::Failure(format!(
            "Error searching for '{}': No results found! Try a less restrictive/shorter query.",
            query
        )),
        Ok(results) => TextResult::Success(format!(
            "Search results for '{}': {}",
            query,
            render_results(&results)
        )),
        Err(e) => {
            warn!("Search for '{}' failed: {}", query, e);
            TextResult::Failure(format!("Error searching for '{}': {}", query, e))
        }
    }
}

async fn fetch_results(context: &ToolContext, query: &str) -> Result<Vec<SearchResult>> {
    let settings = context.settings();

    let html = context
        .client()
        .get(&settings.search_url)
        .query(&[("q", query)])
        .timeout(Duration::from_secs(settings.search_timeout_secs))
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let results = parse_results(&html, settings.max_search_results)?;
    debug!("Search for '{}' returned {} results", query, results.len());
    Ok(results)
}

/// Parse a DuckDuckGo HTML results page. Ads are skipped.
pub fn parse_results(html: &str, max: usize) -> Result<Vec<SearchResult>> {
    let document = Html::parse_document(html);
    let result_selector = selector("div.result")?;
    let title_selector = selector("a.result__a")?;
    let snippet_selector = selector(".result__snippet")?;

    let results = document
        .select(&result_selector)
        .filter(|result| !result.value().classes().any(|class| class == "result--ad"))
        .filter_map(|result| {
            let link = result.select(&title_selector).next()?;
            let href = link.value().attr("href")?;
            let snippet = result
                .select(&snippet_selector)
                .next()
                .map(collapsed_text)
                .unwrap_or_default();

            Some(SearchResult {
                title: collapsed_text(link),
                url: decode_result_url(href),
                snippet,
            })
        })
        .take(max)
        .collect();

    Ok(results)
}

fn collapsed_text(element: ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolve DuckDuckGo redirect links (`//duckduckgo.com/l/?uddg=...`) to their target.
fn decode_result_url(href: &str) -> String {
    let absolute = if href.starts_with("//") {
        format!("https:{}", href)
    } else if href.starts_with('/') {
        format!("https://duckduckgo.com{}", href)
    } else {
        href.to_string()
    };

    match Url::parse(&absolute) {
        Ok(url) => url
            .query_pairs()
            .find(|(key, _)| key == "uddg")
            .map(|(_, target)| target.into_owned())
            .unwrap_or(absolute),
        Err(_) => href.to_string(),
    }
}

fn render_results(results: &[SearchResult]) -> String {
    let rendered = results
        .iter()
        .map(|r| format!("[{}]({})\n{}", r.title, r.url, r.snippet))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("## Search Results\n\n{}", rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <div class="result results_links result--ad">
            <h2 class="result__title"><a class="result__a" href="https://ads.example.com">Sponsored</a></h2>
            <a class="result__snippet">Buy now</a>
          </div>
          <div class="result results_links results_links_deep web-result">
            <h2 class="result__title">
              <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.rust-lang.org%2F&amp;rut=abc">Rust
                Programming Language</a>
            </h2>
            <a class="result__snippet" href="//duckduckgo.com/l/?uddg=x">A language empowering <b>everyone</b>.</a>
          </div>
          <div class="result results_links web-result">
            <h2 class="result__title"><a class="result__a" href="https://doc.rust-lang.org/book/">The Book</a></h2>
          </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_results_skips_ads_and_decodes_links() {
        let results = parse_results(PAGE, 10).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(
            results[0],
            SearchResult {
                title: "Rust Programming Language".to_string(),
                url: "https://www.rust-lang.org/".to_string(),
                snippet: "A language empowering everyone.".to_string(),
            }
        );
        assert_eq!(results[1].url, "https://doc.rust-lang.org/book/");
        assert_eq!(results[1].snippet, "");
    }

    #[test]
    fn test_parse_results_respects_limit() {
        assert_eq!(parse_results(PAGE, 1).unwrap().len(), 1);
    }

    #[test]
    fn test_parse_empty_page() {
        assert!(parse_results("<html><body>No results.</body></html>", 10)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_render_results() {
        let rendered = render_results(&[SearchResult {
            title: "Rust".to_string(),
            url: "https://rust-lang.org".to_string(),
            snippet: "Fast.".to_string(),
        }]);
        assert_eq!(rendered, "## Search Results\n\n[Rust](https://rust-lang.org)\nFast.");
    }
}
