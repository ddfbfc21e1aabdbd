//! Agent module - the crypto price agent logic.
//!
//! The agent follows a "tools in a loop" pattern:
//! 1. Build context with system prompt and user message
//! 2. Call the model with available tools
//! 3. If the model requests a tool call, execute it and feed the result back
//! 4. Repeat until the model produces a final response or max iterations reached

mod agent_loop;
mod prompt;

pub use agent_loop::Agent;
pub use prompt::build_system_prompt;
