//! # Prompt Accountant
//!
//! Combines a [`BpeEngine`], a [`ModelConfig`]'s overhead coefficients,
//! and the schema walker to turn a structured prompt into a total token
//! count and breakdown.

use indexmap::IndexMap;

use crate::accountant::message::{Content, ContentPart, Message, ToolResultOutput};
use crate::accountant::result::{ContentPartResult, CountResult, MessageBreakdown, ToolBreakdown, ToolsBreakdown};
use crate::accountant::tool::ToolDefinition;
use crate::bpe::BpeEngine;
use crate::errors::Result;
use crate::model::{ModelConfig, TokenCoefficients};
use crate::schema;

/// Fixed approximations for modalities this crate does not itself
/// tokenize; see `DESIGN.md` for why these specific values were kept.
const IMAGE_PLACEHOLDER_TOKENS: u64 = 85;
const FILE_PLACEHOLDER_TOKENS: u64 = 100;

/// Count tokens for a full chat prompt against one model's config.
#[tracing::instrument(level = "debug", skip(engine, config, messages, tools), fields(n_messages = messages.len(), n_tools = tools.len()))]
pub fn count(
    engine: &BpeEngine,
    config: &ModelConfig,
    messages: &[Message],
    tools: &[ToolDefinition],
) -> Result<CountResult> {
    let coeffs = &config.tokens;
    let mut total = coeffs.base_overhead as u64;

    let mut message_results = Vec::with_capacity(messages.len());
    for message in messages {
        let breakdown = count_message(engine, coeffs, message);
        total += breakdown.total;
        message_results.push(breakdown);
    }

    let tools_breakdown = count_tools(engine, coeffs, tools)?;
    total += tools_breakdown.total;

    Ok(CountResult { total, messages: message_results, tools: tools_breakdown })
}

fn count_message(engine: &BpeEngine, coeffs: &TokenCoefficients, message: &Message) -> MessageBreakdown {
    let mut total = coeffs.per_message as u64 + engine.count(message.role.as_str()) as u64;

    let content = match &message.content {
        Content::Text(text) => {
            let part = count_text_part(engine, coeffs, text);
            total += part.total();
            vec![part]
        }
        Content::Parts(parts) => parts
            .iter()
            .map(|part| {
                let result = count_content_part(engine, coeffs, part);
                total += result.total();
                result
            })
            .collect(),
    };

    MessageBreakdown { total, content }
}

fn count_text_part(engine: &BpeEngine, coeffs: &TokenCoefficients, text: &str) -> ContentPartResult {
    let raw = engine.count(text);
    ContentPartResult::Text { total: round_reported(raw, coeffs.content_multiplier) }
}

fn count_content_part(
    engine: &BpeEngine,
    coeffs: &TokenCoefficients,
    part: &ContentPart,
) -> ContentPartResult {
    match part {
        ContentPart::Text { text } => count_text_part(engine, coeffs, text),
        ContentPart::ToolCall { tool_name, input, .. } => {
            let input_json = serde_json::to_string(input).unwrap_or_default();
            let raw_input = engine.count(&input_json);
            let raw_name = engine.count(tool_name);
            ContentPartResult::ToolCall {
                total: round_reported(raw_input + raw_name, coeffs.content_multiplier),
                input: round_reported(raw_input, coeffs.content_multiplier),
            }
        }
        ContentPart::ToolResult { tool_call_id, output } => {
            let output_text = match output {
                ToolResultOutput::Text(s) => s.clone(),
                ToolResultOutput::Json(v) => serde_json::to_string(v).unwrap_or_default(),
            };
            let raw_output = engine.count(&output_text);
            let raw_id = engine.count(tool_call_id);
            ContentPartResult::ToolResult {
                total: round_reported(raw_output + raw_id, coeffs.content_multiplier),
                output: round_reported(raw_output, coeffs.content_multiplier),
            }
        }
        ContentPart::Image {} => ContentPartResult::Text { total: IMAGE_PLACEHOLDER_TOKENS },
        ContentPart::File {} => ContentPartResult::Text { total: FILE_PLACEHOLDER_TOKENS },
    }
}

fn count_tools(
    engine: &BpeEngine,
    coeffs: &TokenCoefficients,
    tools: &[ToolDefinition],
) -> Result<ToolsBreakdown> {
    if tools.is_empty() {
        return Ok(ToolsBreakdown { total: 0, definitions: IndexMap::new() });
    }

    let mut total = coeffs.tools_exist as u64;
    let mut definitions = IndexMap::new();

    for (i, tool) in tools.iter().enumerate() {
        let name_tokens = engine.count(&tool.name) as u64;
        let description_tokens = match &tool.description {
            Some(description) => coeffs.per_desc as u64 + engine.count(description) as u64,
            None => 0,
        };
        let schema_tokens = schema::walk(engine, coeffs, &tool.input_schema)? as u64;

        definitions.insert(
            tool.name.clone(),
            ToolBreakdown {
                name: tool.name.clone(),
                description: description_tokens,
                input_schema: schema_tokens,
            },
        );

        total += name_tokens + description_tokens + schema_tokens;
        if i > 0 {
            total += coeffs.per_tool as u64;
        }
    }

    Ok(ToolsBreakdown { total, definitions })
}

/// Round half away from zero; `f64::round` already implements exactly
/// this rule.
fn round_reported(raw: usize, multiplier: f64) -> u64 {
    (raw as f64 * multiplier).round() as u64
}
