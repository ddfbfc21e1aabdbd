//! API request and response types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One inbound chat message.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    /// The user's message text
    pub message: String,
}

/// The agent's reply to one chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Unique identifier for this chat turn
    pub id: Uuid,

    /// The agent's final output, forwarded verbatim
    pub reply: String,
}

/// Error body returned when the agent run fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}
