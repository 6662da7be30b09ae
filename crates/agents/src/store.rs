//! In-memory, tenant-scoped storage.

use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicU64, Ordering},
};

use dashmap::DashMap;
use jiff::Timestamp;

use crate::{
    error::ApiError,
    model::{Agent, AgentInput, Execution, Tool, ToolInput},
};

#[derive(Default)]
struct TenantData {
    tools: BTreeMap<u64, ToolRecord>,
    agents: BTreeMap<u64, AgentRecord>,
    executions: Vec<Execution>,
}

struct ToolRecord {
    name: String,
    description: String,
}

struct AgentRecord {
    name: String,
    role: String,
    description: String,
    tool_ids: Vec<u64>,
}

/// Storage for tools, agents and execution history, partitioned by tenant.
///
/// Every operation takes the calling tenant's id; rows belonging to one
/// tenant are unreachable from another tenant's calls. Multi-step writes
/// (such as validating an agent's tool references before inserting it) run
/// under the tenant's exclusive map entry guard. Ids are process-wide
/// monotonically increasing, starting at 1.
#[derive(Default)]
pub struct Store {
    tenants: DashMap<String, TenantData>,
    next_tool_id: AtomicU64,
    next_agent_id: AtomicU64,
    next_execution_id: AtomicU64,
}

impl Store {
    pub fn create_tool(&self, tenant_id: &str, input: ToolInput) -> Tool {
        let id = self.next_tool_id.fetch_add(1, Ordering::Relaxed) + 1;
        let mut data = self.tenants.entry(tenant_id.to_owned()).or_default();

        let record = ToolRecord {
            name: input.name,
            description: input.description,
        };
        let tool = materialize_tool(id, &record);

        data.tools.insert(id, record);

        tool
    }

    pub fn list_tools(&self, tenant_id: &str) -> Vec<Tool> {
        match self.tenants.get(tenant_id) {
            Some(data) => data
                .tools
                .iter()
                .map(|(id, record)| materialize_tool(*id, record))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn update_tool(&self, tenant_id: &str, tool_id: u64, input: ToolInput) -> Result<Tool, ApiError> {
        let mut data = self.tenants.get_mut(tenant_id).ok_or(ApiError::ToolNotFound)?;
        let record = data.tools.get_mut(&tool_id).ok_or(ApiError::ToolNotFound)?;

        record.name = input.name;
        record.description = input.description;

        Ok(materialize_tool(tool_id, record))
    }

    /// Delete a tool. Agents referencing it keep the dangling id, which
    /// simply stops materializing in their tool list.
    pub fn delete_tool(&self, tenant_id: &str, tool_id: u64) -> Result<(), ApiError> {
        let mut data = self.tenants.get_mut(tenant_id).ok_or(ApiError::ToolNotFound)?;

        data.tools.remove(&tool_id).map(|_| ()).ok_or(ApiError::ToolNotFound)
    }

    pub fn create_agent(&self, tenant_id: &str, input: AgentInput) -> Result<Agent, ApiError> {
        let id = self.next_agent_id.fetch_add(1, Ordering::Relaxed) + 1;
        let mut data = self.tenants.entry(tenant_id.to_owned()).or_default();

        if input.tool_ids.iter().any(|tool_id| !data.tools.contains_key(tool_id)) {
            return Err(ApiError::UnknownToolIds);
        }

        let record = AgentRecord {
            name: input.name,
            role: input.role,
            description: input.description,
            tool_ids: input.tool_ids,
        };
        let agent = materialize_agent(id, &record, &data.tools);

        data.agents.insert(id, record);

        Ok(agent)
    }

    pub fn list_agents(&self, tenant_id: &str) -> Vec<Agent> {
        match self.tenants.get(tenant_id) {
            Some(data) => data
                .agents
                .iter()
                .map(|(id, record)| materialize_agent(*id, record, &data.tools))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn get_agent(&self, tenant_id: &str, agent_id: u64) -> Result<Agent, ApiError> {
        let data = self.tenants.get(tenant_id).ok_or(ApiError::AgentNotFound)?;
        let record = data.agents.get(&agent_id).ok_or(ApiError::AgentNotFound)?;

        Ok(materialize_agent(agent_id, record, &data.tools))
    }

    pub fn update_agent(&self, tenant_id: &str, agent_id: u64, input: AgentInput) -> Result<Agent, ApiError> {
        let mut data = self.tenants.get_mut(tenant_id).ok_or(ApiError::AgentNotFound)?;
        let data = &mut *data;

        if !data.agents.contains_key(&agent_id) {
            return Err(ApiError::AgentNotFound);
        }

        if input.tool_ids.iter().any(|tool_id| !data.tools.contains_key(tool_id)) {
            return Err(ApiError::UnknownToolIds);
        }

        let record = data.agents.get_mut(&agent_id).ok_or(ApiError::AgentNotFound)?;

        record.name = input.name;
        record.role = input.role;
        record.description = input.description;
        record.tool_ids = input.tool_ids;

        Ok(materialize_agent(agent_id, record, &data.tools))
    }

    pub fn delete_agent(&self, tenant_id: &str, agent_id: u64) -> Result<(), ApiError> {
        let mut data = self.tenants.get_mut(tenant_id).ok_or(ApiError::AgentNotFound)?;

        data.agents.remove(&agent_id).map(|_| ()).ok_or(ApiError::AgentNotFound)
    }

    pub fn record_execution(
        &self,
        tenant_id: &str,
        agent_id: u64,
        prompt: String,
        model: String,
        response: String,
    ) -> Execution {
        let id = self.next_execution_id.fetch_add(1, Ordering::Relaxed) + 1;

        let execution = Execution {
            id,
            agent_id,
            prompt,
            model,
            response,
            timestamp: Timestamp::now(),
        };

        let mut data = self.tenants.entry(tenant_id.to_owned()).or_default();
        data.executions.push(execution.clone());

        execution
    }

    /// The tenant's execution history in insertion order, windowed by
    /// `skip`/`limit`.
    pub fn list_executions(&self, tenant_id: &str, skip: usize, limit: usize) -> Vec<Execution> {
        match self.tenants.get(tenant_id) {
            Some(data) => data.executions.iter().skip(skip).take(limit).cloned().collect(),
            None => Vec::new(),
        }
    }
}

fn materialize_tool(id: u64, record: &ToolRecord) -> Tool {
    Tool {
        id,
        name: record.name.clone(),
        description: record.description.clone(),
    }
}

fn materialize_agent(id: u64, record: &AgentRecord, tools: &BTreeMap<u64, ToolRecord>) -> Agent {
    let tools = record
        .tool_ids
        .iter()
        .filter_map(|tool_id| tools.get(tool_id).map(|record| materialize_tool(*tool_id, record)))
        .collect();

    Agent {
        id,
        name: record.name.clone(),
        role: record.role.clone(),
        description: record.description.clone(),
        tools,
    }
}
