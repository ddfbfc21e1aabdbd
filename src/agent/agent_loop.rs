//! Core agent loop implementation.

use std::sync::Arc;

use crate::config::Config;
use crate::llm::{ChatMessage, GeminiClient, LlmClient, Role, ToolCall};
use crate::tools::ToolRegistry;

use super::prompt::build_system_prompt;

/// The crypto price agent.
pub struct Agent {
    config: Config,
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
}

impl Agent {
    /// Create a new agent with the given configuration.
    pub fn new(config: Config) -> Self {
        let llm = Arc::new(GeminiClient::new(
            config.gemini_api_key.clone(),
            config.gemini_base_url.clone(),
        ));
        let tools = ToolRegistry::new(&config.ticker_base_url);

        Self { config, llm, tools }
    }

    /// Create an agent with a custom model client and tools (useful for testing).
    pub fn with_client(config: Config, llm: Arc<dyn LlmClient>, tools: ToolRegistry) -> Self {
        Self { config, llm, tools }
    }

    /// Run one chat message through the agent and return the final reply.
    pub async fn run_message(&self, input: &str) -> anyhow::Result<String> {
        // Build initial messages
        let system_prompt = build_system_prompt(&self.tools);
        let mut messages = vec![
            ChatMessage {
                role: Role::System,
                content: Some(system_prompt),
                tool_calls: None,
                tool_call_id: None,
            },
            ChatMessage {
                role: Role::User,
                content: Some(input.to_string()),
                tool_calls: None,
                tool_call_id: None,
            },
        ];

        // Get tool schemas for the model
        let tool_schemas = self.tools.get_tool_schemas();

        // Agent loop
        for iteration in 0..self.config.max_iterations {
            tracing::debug!("Agent iteration {}", iteration + 1);

            // Call the model
            let response = self
                .llm
                .chat_completion(&self.config.model, &messages, Some(&tool_schemas))
                .await?;

            // Check for tool calls
            if let Some(tool_calls) = &response.tool_calls {
                if !tool_calls.is_empty() {
                    // Add assistant message with tool calls
                    messages.push(ChatMessage {
                        role: Role::Assistant,
                        content: response.content.clone(),
                        tool_calls: Some(tool_calls.clone()),
                        tool_call_id: None,
                    });

                    // Execute each tool call
                    for tool_call in tool_calls {
                        tracing::debug!(
                            "Calling tool: {} with args: {}",
                            tool_call.function.name,
                            tool_call.function.arguments
                        );

                        let result = self.execute_tool_call(tool_call).await;

                        let result_str = match result {
                            Ok(output) => output,
                            Err(e) => format!("Error: {}", e),
                        };

                        // Add tool result message
                        messages.push(ChatMessage {
                            role: Role::Tool,
                            content: Some(result_str),
                            tool_calls: None,
                            tool_call_id: Some(tool_call.id.clone()),
                        });
                    }

                    continue;
                }
            }

            // No tool calls - this is the final response
            if let Some(content) = response.content {
                return Ok(content);
            }

            // Empty response - shouldn't happen but handle gracefully
            return Err(anyhow::anyhow!("Model returned empty response"));
        }

        Err(anyhow::anyhow!(
            "Max iterations ({}) reached without completion",
            self.config.max_iterations
        ))
    }

    /// Execute a single tool call.
    async fn execute_tool_call(&self, tool_call: &ToolCall) -> anyhow::Result<String> {
        let args: serde_json::Value = serde_json::from_str(&tool_call.function.arguments)
            .unwrap_or(serde_json::Value::Null);

        self.tools.execute(&tool_call.function.name, args).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use crate::llm::{AssistantMessage, FunctionCall, ToolSchema};
    use crate::tools::Tool;

    use super::*;

    /// Model client that replays a fixed sequence of assistant messages.
    struct ScriptedClient {
        responses: Mutex<VecDeque<AssistantMessage>>,
    }

    impl ScriptedClient {
        fn new(responses: Vec<AssistantMessage>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
            }
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedClient {
        async fn chat_completion(
            &self,
            _model: &str,
            _messages: &[ChatMessage],
            _tools: Option<&[ToolSchema]>,
        ) -> anyhow::Result<AssistantMessage> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| anyhow::anyhow!("script exhausted"))
        }
    }

    /// Tool that records whether it ran and echoes its argument back.
    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the input back."
        }

        fn parameters_schema(&self) -> Value {
            json!({
                "type": "object",
                "properties": {
                    "text": { "type": "string" }
                },
                "required": ["text"]
            })
        }

        async fn execute(&self, args: Value) -> anyhow::Result<String> {
            Ok(format!("echo: {}", args["text"].as_str().unwrap_or("")))
        }
    }

    fn test_config() -> Config {
        Config::new(
            "test-key".to_string(),
            "http://localhost/v1".to_string(),
            "test-model".to_string(),
        )
    }

    fn tool_call_message(name: &str, arguments: &str) -> AssistantMessage {
        AssistantMessage {
            content: None,
            tool_calls: Some(vec![ToolCall {
                id: "call_1".to_string(),
                call_type: "function".to_string(),
                function: FunctionCall {
                    name: name.to_string(),
                    arguments: arguments.to_string(),
                },
            }]),
        }
    }

    fn text_message(content: &str) -> AssistantMessage {
        AssistantMessage {
            content: Some(content.to_string()),
            tool_calls: None,
        }
    }

    #[tokio::test]
    async fn runs_tool_call_then_returns_final_answer() {
        let client = ScriptedClient::new(vec![
            tool_call_message("echo", r#"{"text":"hi"}"#),
            text_message("All done."),
        ]);

        let mut tools = ToolRegistry::empty();
        tools.register(Arc::new(EchoTool));

        let agent = Agent::with_client(test_config(), Arc::new(client), tools);
        let reply = agent.run_message("please echo hi").await.unwrap();

        assert_eq!(reply, "All done.");
    }

    #[tokio::test]
    async fn tool_failure_is_fed_back_as_text() {
        // The model calls an unregistered tool, then answers anyway: the
        // execution error must not abort the loop.
        let client = ScriptedClient::new(vec![
            tool_call_message("missing_tool", "{}"),
            text_message("Recovered."),
        ]);

        let agent = Agent::with_client(test_config(), Arc::new(client), ToolRegistry::empty());
        let reply = agent.run_message("hello").await.unwrap();

        assert_eq!(reply, "Recovered.");
    }

    #[tokio::test]
    async fn empty_model_response_is_an_error() {
        let client = ScriptedClient::new(vec![AssistantMessage {
            content: None,
            tool_calls: None,
        }]);

        let agent = Agent::with_client(test_config(), Arc::new(client), ToolRegistry::empty());
        let err = agent.run_message("hello").await.unwrap_err();

        assert!(err.to_string().contains("empty response"));
    }

    #[tokio::test]
    async fn loop_stops_at_max_iterations() {
        let mut config = test_config();
        config.max_iterations = 2;

        // Always request another tool call; the loop must give up.
        let client = ScriptedClient::new(vec![
            tool_call_message("echo", r#"{"text":"a"}"#),
            tool_call_message("echo", r#"{"text":"b"}"#),
            text_message("never reached"),
        ]);

        let mut tools = ToolRegistry::empty();
        tools.register(Arc::new(EchoTool));

        let agent = Agent::with_client(config, Arc::new(client), tools);
        let err = agent.run_message("loop forever").await.unwrap_err();

        assert!(err.to_string().contains("Max iterations (2)"));
    }
}
