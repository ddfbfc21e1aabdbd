//! System prompt template for the crypto agent.

use crate::tools::ToolRegistry;

/// Build the system prompt with tool definitions.
pub fn build_system_prompt(tools: &ToolRegistry) -> String {
    let tool_descriptions = tools
        .list_tools()
        .iter()
        .map(|t| format!("- **{}**: {}", t.name, t.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a cryptocurrency expert AI assistant.
Your job is to respond to user queries about live crypto prices.

## Your Tools

{tool_descriptions}

## Rules and Guidelines

1. Show the top 10 crypto prices when the user says things like "top", "show top coins", etc.
2. Show the price of a specific coin like BTCUSDT when the user asks for it.
3. Always be clear, concise, and avoid unnecessary information.

If you need live data, respond with a tool call. The system will execute it and return the result."#,
        tool_descriptions = tool_descriptions
    )
}
