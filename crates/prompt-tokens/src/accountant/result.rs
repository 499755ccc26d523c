//! # Accountant Result Shapes

use indexmap::IndexMap;
use serde::Serialize;

/// One content part's contribution to its message total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ContentPartResult {
    #[serde(rename = "text")]
    Text { total: u64 },
    #[serde(rename = "tool-call")]
    ToolCall { total: u64, input: u64 },
    #[serde(rename = "tool-result")]
    ToolResult { total: u64, output: u64 },
}

impl ContentPartResult {
    pub fn total(&self) -> u64 {
        match self {
            ContentPartResult::Text { total } => *total,
            ContentPartResult::ToolCall { total, .. } => *total,
            ContentPartResult::ToolResult { total, .. } => *total,
        }
    }
}

/// One message's total and its per-part breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageBreakdown {
    pub total: u64,
    pub content: Vec<ContentPartResult>,
}

/// One tool definition's token cost, split by source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolBreakdown {
    pub name: String,
    pub description: u64,
    #[serde(rename = "inputSchema")]
    pub input_schema: u64,
}

/// The tools section of an accountant result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolsBreakdown {
    pub total: u64,
    pub definitions: IndexMap<String, ToolBreakdown>,
}

/// The full output of [`crate::accountant::count`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountResult {
    pub total: u64,
    pub messages: Vec<MessageBreakdown>,
    pub tools: ToolsBreakdown,
}
