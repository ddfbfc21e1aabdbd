//! # tickerchat
//!
//! A chat service backed by an LLM agent with live cryptocurrency price tools.
//!
//! This library provides:
//! - An HTTP API that relays chat messages to the agent
//! - A tool-based agent loop over an OpenAI-compatible model endpoint
//! - Two Binance ticker-price tools the model can call
//!
//! ## Architecture
//!
//! The agent follows the "tools in a loop" pattern:
//! 1. Receive a chat message via the API
//! 2. Build context with system prompt and available tools
//! 3. Call the model, parse the response, execute any tool calls
//! 4. Feed results back to the model, repeat until it answers in plain text
//!
//! ## Example
//!
//! ```rust,ignore
//! use tickerchat::{agent::Agent, config::Config};
//!
//! let config = Config::from_env()?;
//! let agent = Agent::new(config);
//! let reply = agent.run_message("What is BTCUSDT trading at?").await?;
//! ```

pub mod agent;
pub mod api;
pub mod config;
pub mod llm;
pub mod tools;

pub use config::Config;
