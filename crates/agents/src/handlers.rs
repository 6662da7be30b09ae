use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use context::TenantIdentity;
use serde::Deserialize;

use crate::{
    completion,
    error::ApiError,
    model::{Agent, AgentInput, Execution, RunRequest, RunResponse, Tool, ToolInput},
    store::Store,
};

pub(crate) async fn create_tool(
    State(store): State<Arc<Store>>,
    Extension(tenant): Extension<TenantIdentity>,
    Json(input): Json<ToolInput>,
) -> Json<Tool> {
    Json(store.create_tool(&tenant.id, input))
}

pub(crate) async fn list_tools(
    State(store): State<Arc<Store>>,
    Extension(tenant): Extension<TenantIdentity>,
) -> Json<Vec<Tool>> {
    Json(store.list_tools(&tenant.id))
}

pub(crate) async fn update_tool(
    State(store): State<Arc<Store>>,
    Extension(tenant): Extension<TenantIdentity>,
    Path(tool_id): Path<u64>,
    Json(input): Json<ToolInput>,
) -> Result<Json<Tool>, ApiError> {
    store.update_tool(&tenant.id, tool_id, input).map(Json)
}

pub(crate) async fn delete_tool(
    State(store): State<Arc<Store>>,
    Extension(tenant): Extension<TenantIdentity>,
    Path(tool_id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    store.delete_tool(&tenant.id, tool_id)?;

    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn create_agent(
    State(store): State<Arc<Store>>,
    Extension(tenant): Extension<TenantIdentity>,
    Json(input): Json<AgentInput>,
) -> Result<Json<Agent>, ApiError> {
    store.create_agent(&tenant.id, input).map(Json)
}

pub(crate) async fn list_agents(
    State(store): State<Arc<Store>>,
    Extension(tenant): Extension<TenantIdentity>,
) -> Json<Vec<Agent>> {
    Json(store.list_agents(&tenant.id))
}

pub(crate) async fn get_agent(
    State(store): State<Arc<Store>>,
    Extension(tenant): Extension<TenantIdentity>,
    Path(agent_id): Path<u64>,
) -> Result<Json<Agent>, ApiError> {
    store.get_agent(&tenant.id, agent_id).map(Json)
}

pub(crate) async fn update_agent(
    State(store): State<Arc<Store>>,
    Extension(tenant): Extension<TenantIdentity>,
    Path(agent_id): Path<u64>,
    Json(input): Json<AgentInput>,
) -> Result<Json<Agent>, ApiError> {
    store.update_agent(&tenant.id, agent_id, input).map(Json)
}

pub(crate) async fn delete_agent(
    State(store): State<Arc<Store>>,
    Extension(tenant): Extension<TenantIdentity>,
    Path(agent_id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    store.delete_agent(&tenant.id, agent_id)?;

    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn run_agent(
    State(store): State<Arc<Store>>,
    Extension(tenant): Extension<TenantIdentity>,
    Path(agent_id): Path<u64>,
    Json(request): Json<RunRequest>,
) -> Result<Json<RunResponse>, ApiError> {
    let agent = store.get_agent(&tenant.id, agent_id)?;

    let tool_list = agent
        .tools
        .iter()
        .map(|tool| tool.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let final_prompt = format!(
        "System: You are {name}, a {role}. {description}. \
         You have access to these tools: [{tool_list}].\n\
         User Task: {task}",
        name = agent.name,
        role = agent.role,
        description = agent.description,
        task = request.prompt,
    );

    let response = completion::complete(&final_prompt, &request.model).await;

    log::debug!("recording execution of agent {agent_id} for tenant {}", tenant.id);

    store.record_execution(
        &tenant.id,
        agent.id,
        final_prompt.clone(),
        request.model,
        response.clone(),
    );

    Ok(Json(RunResponse {
        agent: agent.name,
        final_prompt,
        response,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub(crate) struct HistoryParams {
    skip: usize,
    limit: usize,
}

impl Default for HistoryParams {
    fn default() -> Self {
        Self { skip: 0, limit: 10 }
    }
}

pub(crate) async fn list_executions(
    State(store): State<Arc<Store>>,
    Extension(tenant): Extension<TenantIdentity>,
    Query(params): Query<HistoryParams>,
) -> Json<Vec<Execution>> {
    Json(store.list_executions(&tenant.id, params.skip, params.limit))
}
