use std::fmt;

use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single turn in a thread. Never mutated once created.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Opaque thread identifier. Locally allocated ids only become real on the
/// server once the first exchange for them completes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ThreadId(String);

impl ThreadId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Allocate a fresh, globally unique id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Thread list entry. The server sends more fields; only these two are kept.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Thread {
    #[serde(rename = "threadId")]
    pub id: ThreadId,
    pub title: String,
}

/// Body of `POST /api/chat`.
#[derive(Serialize, Debug)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    #[serde(rename = "threadId")]
    pub thread_id: &'a ThreadId,
}

/// Successful response of `POST /api/chat`.
#[derive(Deserialize, Debug)]
pub struct ChatReply {
    pub reply: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Contract test: the request body shape is part of the wire surface.
    #[test]
    fn test_chat_request_serialization() {
        let id = ThreadId::new("t-1");
        let req = ChatRequest {
            message: "Hello",
            thread_id: &id,
        };
        let serialized = serde_json::to_string(&req).unwrap();
        assert_eq!(serialized, r#"{"message":"Hello","threadId":"t-1"}"#);
    }

    #[test]
    fn test_thread_ignores_extra_fields() {
        let json = r#"[
            {"threadId":"a","title":"First","updatedAt":"2024-01-01","messages":[]},
            {"_id":"x","threadId":"b","title":"Second"}
        ]"#;
        let threads: Vec<Thread> = serde_json::from_str(json).unwrap();
        assert_eq!(threads.len(), 2);
        assert_eq!(threads[0].id, ThreadId::new("a"));
        assert_eq!(threads[1].title, "Second");
    }

    #[test]
    fn test_message_roles_deserialize() {
        let json = r#"[{"role":"user","content":"hi"},{"role":"assistant","content":"hello"}]"#;
        let messages: Vec<Message> = serde_json::from_str(json).unwrap();
        assert_eq!(messages, vec![Message::user("hi"), Message::assistant("hello")]);
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let json = r#"{"role":"system","content":"x"}"#;
        assert!(serde_json::from_str::<Message>(json).is_err());
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = ThreadId::generate();
        let b = ThreadId::generate();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }
}
