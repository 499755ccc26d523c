//! Structured chat-prompt accounting: messages, tool definitions, and
//! the combining function that produces a total + breakdown.

mod accountant;
mod message;
mod result;
mod tool;

pub use accountant::count;
pub use message::{Content, ContentPart, Message, Role, ToolResultOutput};
pub use result::{ContentPartResult, CountResult, MessageBreakdown, ToolBreakdown, ToolsBreakdown};
pub use tool::ToolDefinition;
