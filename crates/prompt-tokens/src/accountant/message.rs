//! # Message & Content Part Types

/// A chat message's speaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
        }
    }
}

/// A tool-result's output payload: counted as its own text if it already
/// is one, otherwise JSON-serialized first.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolResultOutput {
    Text(String),
    Json(serde_json::Value),
}

/// One element of a structured message body.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentPart {
    Text {
        text: String,
    },
    ToolCall {
        tool_call_id: String,
        tool_name: String,
        input: serde_json::Value,
    },
    ToolResult {
        tool_call_id: String,
        output: ToolResultOutput,
    },
    Image {},
    File {},
}

/// A message body: either a bare string (the common case) or a list of
/// mixed content parts.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// One entry in a chat prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: Content,
}
