//! Search and webpage tools against stubbed HTTP servers.

use webagent::config::{ToolSettings, BROWSER_USER_AGENT};
use webagent::tools::{ToolCall, ToolContext};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RESULTS_PAGE: &str = r#"<html><body>
<div class="result results_links result--ad">
  <a class="result__a" href="https://ads.example.com">Sponsored</a>
  <a class="result__snippet">Buy now</a>
</div>
<div class="result results_links">
  <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.rust-lang.org%2F&amp;rut=abc">Rust Programming Language</a>
  <a class="result__snippet">A language empowering everyone.</a>
</div>
<div class="result results_links">
  <a class="result__a" href="https://doc.rust-lang.org/book/">The Rust Book</a>
  <a class="result__snippet">Learn Rust.</a>
</div>
</body></html>"#;

async fn sent_user_agent(server: &MockServer) -> String {
    let requests = server.received_requests().await.unwrap();
    requests[0]
        .headers
        .get("user-agent")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string()
}

fn context(search_url: String) -> ToolContext {
    ToolContext::new(ToolSettings {
        search_url,
        ..ToolSettings::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_search_renders_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/html/"))
        .and(query_param("q", "rust language"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RESULTS_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let tools = context(format!("{}/html/", server.uri()));
    let result = tools
        .execute(&ToolCall::SearchWeb { query: "rust language".to_string() })
        .await;

    assert!(!result.is_failure());
    let text = result.text();
    assert!(text.starts_with("Search results for 'rust language':"));
    assert!(text.contains("[Rust Programming Language](https://www.rust-lang.org/)"));
    assert!(text.contains("[The Rust Book](https://doc.rust-lang.org/book/)"));
    assert!(!text.contains("Sponsored"));
    assert_eq!(sent_user_agent(&server).await, BROWSER_USER_AGENT);
}

#[tokio::test]
async fn test_search_without_results_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .mount(&server)
        .await;

    let tools = context(format!("{}/html/", server.uri()));
    let result = tools
        .execute(&ToolCall::SearchWeb { query: "zzqqxx".to_string() })
        .await;

    assert!(result.is_failure());
    assert_eq!(
        result.text(),
        "Error searching for 'zzqqxx': No results found! Try a less restrictive/shorter query."
    );
}

#[tokio::test]
async fn test_summary_is_capped() {
    let server = MockServer::start().await;
    let body = format!(
        "<html><body>{}</body></html>",
        (0..20).map(|i| format!("<p>Paragraph {} {}</p>", i, "word ".repeat(20))).collect::<String>()
    );
    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/article", server.uri());
    let tools = context(String::new());
    let result = tools
        .execute(&ToolCall::SummarizeWebpage { url: url.clone() })
        .await;

    assert!(!result.is_failure());
    let prefix = format!("Summary of content from {}: ", url);
    let text = result.text();
    assert!(text.starts_with(&prefix));
    assert!(text.ends_with("..."));
    let summary = &text[prefix.len()..text.len() - 3];
    assert_eq!(summary.chars().count(), 700);
    assert!(summary.starts_with("Paragraph 0 word"));
    assert_eq!(sent_user_agent(&server).await, BROWSER_USER_AGENT);
}

#[tokio::test]
async fn test_summary_of_missing_page_reports_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/gone", server.uri());
    let result = context(String::new())
        .execute(&ToolCall::SummarizeWebpage { url: url.clone() })
        .await;

    assert!(result.is_failure());
    assert!(result
        .text()
        .starts_with(&format!("Failed to fetch the webpage {}: Network error - ", url)));
}
