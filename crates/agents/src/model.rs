//! Domain types and request/response payloads.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A tool agents can be equipped with.
#[derive(Debug, Clone, Serialize)]
pub struct Tool {
    pub id: u64,
    pub name: String,
    pub description: String,
}

/// Payload for creating or replacing a tool.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolInput {
    pub name: String,
    pub description: String,
}

/// An agent with its materialized tool list.
#[derive(Debug, Clone, Serialize)]
pub struct Agent {
    pub id: u64,
    pub name: String,
    pub role: String,
    pub description: String,
    pub tools: Vec<Tool>,
}

/// Payload for creating or replacing an agent.
///
/// `tool_ids` must reference tools owned by the same tenant.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentInput {
    pub name: String,
    pub role: String,
    pub description: String,
    #[serde(default)]
    pub tool_ids: Vec<u64>,
}

/// Prompt and model selection for a single agent run.
#[derive(Debug, Clone, Deserialize)]
pub struct RunRequest {
    pub prompt: String,
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_model() -> String {
    "gpt-4o".to_owned()
}

#[derive(Debug, Clone, Serialize)]
pub struct RunResponse {
    pub agent: String,
    pub final_prompt: String,
    pub response: String,
}

/// A recorded agent run.
#[derive(Debug, Clone, Serialize)]
pub struct Execution {
    pub id: u64,
    pub agent_id: u64,
    pub prompt: String,
    pub model: String,
    pub response: String,
    pub timestamp: Timestamp,
}
