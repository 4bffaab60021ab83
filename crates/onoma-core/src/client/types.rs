//! Transport records exchanged with the memory service

use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A stored fact, owned by the remote service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub context_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub temporal_class: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub confidence: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_id: Option<String>,
}

/// A named grouping of memories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub confidence: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_auto: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub context_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub topics: Vec<String>,
    #[serde(default)]
    pub last_active_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MemorySearchResult {
    pub memories: Vec<Memory>,
    pub total: u64,
}

/// Aggregate counts, passed through as the server sends them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MemoryStats {
    pub total_contexts: u64,
    pub total_spaces: u64,
    pub recent_contexts: u64,
}

/// Search responses come either as a bare array or wrapped with a total.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SearchResponse {
    List(Vec<Memory>),
    Envelope {
        #[serde(default, deserialize_with = "null_as_default")]
        memories: Vec<Memory>,
        total: Option<u64>,
    },
}

impl From<SearchResponse> for MemorySearchResult {
    fn from(response: SearchResponse) -> Self {
        match response {
            SearchResponse::List(memories) => Self {
                total: memories.len() as u64,
                memories,
            },
            SearchResponse::Envelope { memories, total } => Self {
                total: total.unwrap_or(memories.len() as u64),
                memories,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SpacesResponse {
    #[serde(default)]
    pub spaces: Option<Vec<Space>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExtractResponse {
    #[serde(default)]
    pub memories: Option<Vec<Memory>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateMemoryRequest<'a> {
    pub content: &'a str,
    pub context_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<&'a serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ExtractRequest<'a> {
    pub messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<&'a serde_json::Value>,
}

/// One chat message as exchanged with the host and the service.
///
/// `content` is forwarded untouched; hosts send plain strings or arrays of
/// content parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: serde_json::Value,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<serde_json::Value>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content.into())
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content.into())
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content.into())
    }

    pub fn is_user(&self) -> bool {
        self.role == "user"
    }

    pub fn is_assistant(&self) -> bool {
        self.role == "assistant"
    }
}

/// Options forwarded to the chat-completion endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatOptions {
    pub model: Option<String>,
    pub stream: bool,
    pub max_tokens: Option<u32>,
}

impl ChatOptions {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn streaming(mut self) -> Self {
        self.stream = true;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_response_bare_array() {
        let raw = json!([
            {"id": "m1", "content": "Likes tea", "context_type": "preference",
             "temporal_class": "stable", "confidence": 0.9, "created_at": "2024-03-05T10:00:00Z"}
        ]);
        let parsed: SearchResponse = serde_json::from_value(raw).unwrap();
        let result = MemorySearchResult::from(parsed);
        assert_eq!(result.total, 1);
        assert_eq!(result.memories[0].content, "Likes tea");
        assert_eq!(result.memories[0].space_id, None);
    }

    #[test]
    fn test_search_response_envelope() {
        let raw = json!({"memories": [{"id": "m1", "content": "x"}], "total": 7});
        let parsed: SearchResponse = serde_json::from_value(raw).unwrap();
        let result = MemorySearchResult::from(parsed);
        assert_eq!(result.total, 7);
        assert_eq!(result.memories.len(), 1);
    }

    #[test]
    fn test_search_response_tolerates_null_fields() {
        let raw = json!([
            {"id": "m1", "content": "Likes tea", "confidence": null,
             "temporal_class": null, "context_type": null, "created_at": "2024-01-01"},
            {"id": "m2", "content": "Walks daily", "confidence": 0.4}
        ]);
        let parsed: SearchResponse = serde_json::from_value(raw).unwrap();
        let result = MemorySearchResult::from(parsed);
        assert_eq!(result.total, 2);
        assert_eq!(result.memories[0].content, "Likes tea");
        assert_eq!(result.memories[0].confidence, 0.0);
        assert_eq!(result.memories[0].temporal_class, "");
        assert_eq!(result.memories[1].confidence, 0.4);
    }

    #[test]
    fn test_envelope_with_null_memories() {
        let parsed: SearchResponse =
            serde_json::from_value(json!({"memories": null, "total": 0})).unwrap();
        assert!(MemorySearchResult::from(parsed).memories.is_empty());
    }

    #[test]
    fn test_space_tolerates_null_fields() {
        let space: Space = serde_json::from_value(json!({
            "id": "s1", "name": "Work", "confidence": null, "topics": null,
            "is_active": null, "context_count": null, "last_active_at": null
        }))
        .unwrap();
        assert_eq!(space.name, "Work");
        assert!(space.topics.is_empty());
        assert_eq!(space.context_count, 0);
    }

    #[test]
    fn test_space_defaults() {
        let space: Space = serde_json::from_value(json!({"id": "s1", "name": "Work"})).unwrap();
        assert!(space.topics.is_empty());
        assert_eq!(space.last_active_at, None);
        assert!(!space.is_active);
    }

    #[test]
    fn test_create_request_omits_missing_metadata() {
        let body = serde_json::to_value(CreateMemoryRequest {
            content: "I live in Lisbon",
            context_type: "user_fact",
            metadata: None,
        })
        .unwrap();
        assert_eq!(body, json!({"content": "I live in Lisbon", "context_type": "user_fact"}));
    }

    #[test]
    fn test_chat_message_roles() {
        assert!(ChatMessage::user("hi").is_user());
        assert!(ChatMessage::assistant("hello").is_assistant());
        assert!(!ChatMessage::system("rules").is_user());
        assert_eq!(ChatMessage::user("hi").content, json!("hi"));
    }
}
