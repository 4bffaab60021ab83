//! `onoma_search`: explicit semantic search over memories

use super::base::{Tool, ToolError};
use super::types::{ToolCall, ToolParameter, ToolResult, ToolSchema};
use crate::client::OnomaClient;
use crate::config::OnomaConfig;
use crate::error::UnifiedError;
use crate::format::ranked_entry;
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error};

pub const SEARCH_TOOL_NAME: &str = "onoma_search";

pub struct SearchTool {
    client: Arc<OnomaClient>,
    config: Arc<OnomaConfig>,
}

impl SearchTool {
    pub fn new(client: Arc<OnomaClient>, config: Arc<OnomaConfig>) -> Self {
        Self { client, config }
    }

    /// Requested limit, or the configured one when absent. Only whole
    /// non-negative numbers are accepted.
    fn limit_from(&self, call: &ToolCall) -> Result<u32, String> {
        match call.get_number("limit") {
            None => Ok(self.config.max_recall_results),
            Some(n) if n.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&n) => {
                Ok(n as u32)
            }
            Some(n) => Err(format!("limit must be a non-negative integer, got {}", n)),
        }
    }
}

#[async_trait]
impl Tool for SearchTool {
    fn name(&self) -> &str {
        SEARCH_TOOL_NAME
    }

    fn label(&self) -> &str {
        "Search Onoma Memories"
    }

    fn description(&self) -> &str {
        "Search through your Onoma memories semantically for relevant information."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            self.name(),
            self.description(),
            vec![
                ToolParameter::string("query", "Search query to find relevant memories"),
                ToolParameter::number(
                    "limit",
                    "Maximum number of results to return (default: configured recall limit)",
                )
                .optional(),
            ],
        )
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let Some(query) = call.get_string("query") else {
            return Ok(ToolResult::failure(
                &call.id,
                self.name(),
                "Search failed: query is required",
                "query is required",
            ));
        };
        let limit = match self.limit_from(call) {
            Ok(limit) => limit,
            Err(message) => {
                return Ok(ToolResult::failure(
                    &call.id,
                    self.name(),
                    format!("Search failed: {}", message),
                    message,
                ));
            }
        };

        if self.config.debug {
            debug!("onoma_search: query=\"{}\" limit={}", query, limit);
        }

        let results = match self.client.search_memories(&query, Some(limit)).await {
            Ok(results) => results,
            Err(err) => {
                let message = err.message();
                error!("onoma_search failed: {}", message);
                return Ok(ToolResult::failure(
                    &call.id,
                    self.name(),
                    format!("Search failed: {}", message),
                    message,
                ));
            }
        };

        if results.memories.is_empty() {
            return Ok(
                ToolResult::text(&call.id, self.name(), "No relevant memories found.")
                    .with_details(json!({ "count": 0, "memories": [] })),
            );
        }

        let listing = results
            .memories
            .iter()
            .enumerate()
            .map(|(i, m)| ranked_entry(i, m))
            .collect::<Vec<_>>()
            .join("\n\n");

        let details = json!({
            "count": results.memories.len(),
            "memories": results.memories.iter().map(|m| json!({
                "id": m.id,
                "content": m.content,
                "type": m.context_type,
                "temporal_class": m.temporal_class,
                "confidence": m.confidence,
                "created_at": m.created_at,
            })).collect::<Vec<_>>(),
        });

        Ok(ToolResult::text(
            &call.id,
            self.name(),
            format!(
                "Found {} relevant memories:\n\n{}",
                results.memories.len(),
                listing
            ),
        )
        .with_details(details))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_tool(base_url: &str) -> SearchTool {
        let config = Arc::new(OnomaConfig::with_token("onm_test").with_api_url(base_url));
        let client = Arc::new(OnomaClient::new(&config).unwrap());
        SearchTool::new(client, config)
    }

    fn call(args: serde_json::Value) -> ToolCall {
        ToolCall::from_json("call-1", SEARCH_TOOL_NAME, args)
    }

    #[tokio::test]
    async fn test_search_lists_results() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/memory/search"))
            .and(query_param("q", "coffee"))
            .and(query_param("limit", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "m1", "content": "Prefers dark roast", "context_type": "preference",
                 "temporal_class": "stable", "confidence": 0.91, "created_at": "2024-03-05"},
                {"id": "m2", "content": "Drinks two cups a day", "context_type": "user_fact",
                 "temporal_class": "recurring", "confidence": 0.5, "created_at": "2024-03-06"}
            ])))
            .mount(&mock_server)
            .await;

        let tool = create_tool(&mock_server.uri());
        let result = tool
            .execute(&call(json!({"query": "coffee", "limit": 2})))
            .await
            .unwrap();

        assert!(!result.is_error);
        assert_eq!(
            result.text_content(),
            "Found 2 relevant memories:\n\n\
             1. Prefers dark roast\n   (stable, 3/5/2024, 91% relevance)\n\n\
             2. Drinks two cups a day\n   (recurring, 3/6/2024, 50% relevance)"
        );
        assert_eq!(result.details["count"], 2);
        assert_eq!(result.details["memories"][0]["type"], "preference");
        assert_eq!(result.details["memories"][1]["temporal_class"], "recurring");
    }

    #[tokio::test]
    async fn test_search_uses_configured_limit() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/memory/search"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let tool = create_tool(&mock_server.uri());
        let result = tool.execute(&call(json!({"query": "anything"}))).await.unwrap();
        assert_eq!(result.text_content(), "No relevant memories found.");
        assert_eq!(result.details, json!({"count": 0, "memories": []}));
    }

    #[tokio::test]
    async fn test_search_failure_is_structured() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/memory/search"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&mock_server)
            .await;

        let tool = create_tool(&mock_server.uri());
        let result = tool.execute_safe(&call(json!({"query": "anything"}))).await;

        assert!(result.is_error);
        assert_eq!(
            result.text_content(),
            "Search failed: Failed to search memories: Bad Gateway"
        );
        assert_eq!(
            result.details["error"],
            "Failed to search memories: Bad Gateway"
        );
    }

    #[tokio::test]
    async fn test_missing_query_makes_no_request() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let tool = create_tool(&mock_server.uri());
        let result = tool.execute(&call(json!({}))).await.unwrap();
        assert!(result.is_error);
        assert!(result.details.get("error").is_some());
    }

    #[tokio::test]
    async fn test_bad_limit_makes_no_request() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let tool = create_tool(&mock_server.uri());
        for limit in [json!(2.7), json!(-1), json!(1e12)] {
            let result = tool
                .execute(&call(json!({"query": "coffee", "limit": limit})))
                .await
                .unwrap();
            assert!(result.is_error, "limit {limit} was accepted");
            assert_eq!(
                result.details["error"],
                format!("limit must be a non-negative integer, got {}", limit.as_f64().unwrap())
            );
        }
    }

    #[tokio::test]
    async fn test_whole_float_limit_is_accepted() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/memory/search"))
            .and(query_param("limit", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let tool = create_tool(&mock_server.uri());
        let result = tool
            .execute(&call(json!({"query": "coffee", "limit": 3.0})))
            .await
            .unwrap();
        assert!(!result.is_error);
    }

    #[test]
    fn test_schema() {
        let tool = create_tool("http://localhost");
        let schema = tool.schema();
        assert_eq!(schema.name, "onoma_search");
        assert_eq!(schema.parameters["required"], json!(["query"]));
        assert_eq!(schema.parameters["properties"]["limit"]["type"], "number");
    }
}
