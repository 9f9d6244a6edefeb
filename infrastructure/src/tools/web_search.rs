//! `search_web`: outside context for the Researcher.
//!
//! Two backends:
//!
//! - **Tavily** (`POST https://api.tavily.com/search`) when an API key is
//!   configured. Returns ranked results with content snippets.
//! - **DuckDuckGo Instant Answer API** otherwise. Needs no key but only
//!   returns abstracts, definitions and related topics.
//!
//! Both are rendered as Markdown so the agent sees one textual format.

use crew_domain::tool::{
    builtin::SEARCH_WEB,
    entities::{ToolCall, ToolDefinition, ToolEffect, ToolParameter},
    value_objects::{ToolError, ToolResult},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

const TAVILY_API_URL: &str = "https://api.tavily.com/search";
const DDG_API_URL: &str = "https://api.duckduckgo.com/";
const USER_AGENT: &str = "readme-crew/0.4 (search_web tool)";

pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Search backend selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchProvider {
    #[default]
    Tavily,
    DuckDuckGo,
}

impl std::fmt::Display for SearchProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchProvider::Tavily => write!(f, "tavily"),
            SearchProvider::DuckDuckGo => write!(f, "duckduckgo"),
        }
    }
}

/// Resolved search settings handed to the executor.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub provider: SearchProvider,
    /// Tavily key. Without one the DuckDuckGo backend is used.
    pub api_key: Option<String>,
    pub max_results: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            provider: SearchProvider::default(),
            api_key: None,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl SearchSettings {
    /// Backend actually used for a request.
    pub fn effective_provider(&self) -> SearchProvider {
        match (self.provider, &self.api_key) {
            (SearchProvider::Tavily, Some(key)) if !key.trim().is_empty() => SearchProvider::Tavily,
            _ => SearchProvider::DuckDuckGo,
        }
    }
}

pub fn search_web_definition() -> ToolDefinition {
    ToolDefinition::new(
        SEARCH_WEB,
        "Search the web for background on the project's libraries, frameworks or domain. \
         Returns search results as Markdown.",
        ToolEffect::Network,
    )
    .with_parameter(ToolParameter::new("query", "The search query", true))
    .with_parameter(
        ToolParameter::new("max_results", "Maximum number of results (default: 5)", false)
            .with_type("integer"),
    )
}

pub async fn execute_search_web(
    client: &reqwest::Client,
    settings: &SearchSettings,
    call: &ToolCall,
) -> ToolResult {
    let query = match call.require_string("query") {
        Ok(q) => q.trim(),
        Err(e) => return ToolResult::failure(SEARCH_WEB, ToolError::invalid_argument(e)),
    };
    if query.is_empty() {
        return ToolResult::failure(SEARCH_WEB, ToolError::invalid_argument("Query must not be empty"));
    }
    let max_results = call
        .get_i64("max_results")
        .filter(|n| *n > 0)
        .map(|n| n as usize)
        .unwrap_or(settings.max_results);

    let provider = settings.effective_provider();
    debug!(query, max_results, %provider, "Searching the web");

    let outcome = match provider {
        SearchProvider::Tavily => {
            let key = settings.api_key.as_deref().unwrap_or_default();
            search_tavily(client, key, query, max_results).await
        }
        SearchProvider::DuckDuckGo => search_duckduckgo(client, query, max_results).await,
    };

    match outcome {
        Ok(output) => ToolResult::success(SEARCH_WEB, output),
        Err(message) => ToolResult::failure(SEARCH_WEB, ToolError::execution_failed(message)),
    }
}

async fn send_json(request: reqwest::RequestBuilder) -> Result<Value, String> {
    let response = request
        .header("User-Agent", USER_AGENT)
        .send()
        .await
        .map_err(|e| format!("Search request failed: {}", e))?;

    if !response.status().is_success() {
        return Err(format!("Search API returned error: {}", response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Failed to parse search results: {}", e))
}

async fn search_tavily(
    client: &reqwest::Client,
    api_key: &str,
    query: &str,
    max_results: usize,
) -> Result<String, String> {
    let body = json!({
        "query": query,
        "max_results": max_results,
        "include_answer": true,
    });
    let data = send_json(client.post(TAVILY_API_URL).bearer_auth(api_key).json(&body)).await?;
    Ok(format_tavily_results(query, &data, max_results))
}

async fn search_duckduckgo(
    client: &reqwest::Client,
    query: &str,
    max_results: usize,
) -> Result<String, String> {
    let request = client.get(DDG_API_URL).query(&[
        ("q", query),
        ("format", "json"),
        ("no_html", "1"),
        ("skip_disambig", "1"),
    ]);
    let data = send_json(request).await?;
    Ok(format_duckduckgo_results(query, &data, max_results))
}

fn format_tavily_results(query: &str, data: &Value, max_results: usize) -> String {
    let mut sections = vec![format!("## Search Results for: {}", query)];

    if let Some(answer) = data["answer"].as_str()
        && !answer.trim().is_empty()
    {
        sections.push(format!("### Answer\n{}", answer.trim()));
    }

    if let Some(results) = data["results"].as_array() {
        for (i, item) in results.iter().take(max_results).enumerate() {
            let title = item["title"].as_str().unwrap_or("(untitled)");
            let url = item["url"].as_str().unwrap_or("");
            let content = item["content"].as_str().unwrap_or("").trim();
            sections.push(format!("### {}. {}\n{}\n{}", i + 1, title, url, content));
        }
    }

    if sections.len() == 1 {
        sections.push("No results found.".to_string());
    }
    sections.join("\n\n")
}

fn format_duckduckgo_results(query: &str, data: &Value, max_results: usize) -> String {
    let mut sections = vec![format!("## Search Results for: {}", query)];

    if let Some(abstract_text) = data["AbstractText"].as_str()
        && !abstract_text.is_empty()
    {
        let source = data["AbstractSource"].as_str().unwrap_or("Unknown");
        let url = data["AbstractURL"].as_str().unwrap_or("");
        sections.push(format!("### Summary ({})\n{}\nSource: {}", source, abstract_text, url));
    }

    if let Some(answer) = data["Answer"].as_str()
        && !answer.is_empty()
    {
        sections.push(format!("### Instant Answer\n{}", answer));
    }

    if let Some(definition) = data["Definition"].as_str()
        && !definition.is_empty()
    {
        let source = data["DefinitionSource"].as_str().unwrap_or("Unknown");
        sections.push(format!("### Definition ({})\n{}", source, definition));
    }

    if let Some(topics) = data["RelatedTopics"].as_array() {
        // Nested topic groups carry no top-level Text and are skipped
        let topic_texts: Vec<String> = topics
            .iter()
            .filter_map(|t| {
                let text = t["Text"].as_str().filter(|s| !s.is_empty())?;
                let url = t["FirstURL"].as_str().unwrap_or("");
                Some(format!("- {} ({})", text, url))
            })
            .take(max_results)
            .collect();

        if !topic_texts.is_empty() {
            sections.push(format!("### Related Topics\n{}", topic_texts.join("\n")));
        }
    }

    if sections.len() == 1 {
        sections.push("No instant answer available. Try a more specific query.".to_string());
    }
    sections.join("\n\n")
}
