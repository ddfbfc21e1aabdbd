//! Agent tools: callable capabilities exposed to the model by name.

mod prices;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::llm::{FunctionSchema, ToolSchema};

pub use prices::{CoinPrice, TopPrices};

/// A tool the agent can invoke.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique tool name used by the model to invoke it.
    fn name(&self) -> &str;

    /// Human-readable description shown to the model.
    fn description(&self) -> &str;

    /// JSON schema for the tool's parameters.
    fn parameters_schema(&self) -> Value;

    /// Execute the tool with the given arguments.
    async fn execute(&self, args: Value) -> anyhow::Result<String>;
}

/// Name and description of a registered tool, for prompt building.
pub struct ToolInfo {
    pub name: String,
    pub description: String,
}

/// Registry of available tools, queried by name.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create the full registry with both price tools.
    ///
    /// Tools share one HTTP client; each invocation is still a fresh,
    /// uncached request against `ticker_base_url`.
    pub fn new(ticker_base_url: &str) -> Self {
        let client = reqwest::Client::new();

        let mut registry = Self {
            tools: HashMap::new(),
        };

        registry.register(Arc::new(TopPrices::new(
            client.clone(),
            ticker_base_url.to_string(),
        )));
        registry.register(Arc::new(CoinPrice::new(
            client,
            ticker_base_url.to_string(),
        )));

        registry
    }

    pub fn empty() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// List registered tools (name and description) for the system prompt.
    pub fn list_tools(&self) -> Vec<ToolInfo> {
        let mut tools: Vec<ToolInfo> = self
            .tools
            .values()
            .map(|t| ToolInfo {
                name: t.name().to_string(),
                description: t.description().to_string(),
            })
            .collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools
    }

    /// Tool schemas in the OpenAI function-calling format.
    pub fn get_tool_schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<ToolSchema> = self
            .tools
            .values()
            .map(|t| ToolSchema {
                schema_type: "function".to_string(),
                function: FunctionSchema {
                    name: t.name().to_string(),
                    description: t.description().to_string(),
                    parameters: t.parameters_schema(),
                },
            })
            .collect();
        schemas.sort_by(|a, b| a.function.name.cmp(&b.function.name));
        schemas
    }

    /// Execute a tool by name.
    pub async fn execute(&self, name: &str, args: Value) -> anyhow::Result<String> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown tool: {}", name))?;

        tool.execute(args).await
    }
}
