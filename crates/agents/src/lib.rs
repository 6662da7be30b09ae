//! Tenant-facing API for managing tools and agents, running agents against
//! a simulated model backend, and reading execution history.
//!
//! Every route expects an authenticated [`context::TenantIdentity`] in the
//! request extensions; the server's request gate puts it there.

mod completion;
mod error;
mod handlers;
mod model;
mod store;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};

pub use error::ApiError;
pub use model::{Agent, AgentInput, Execution, RunRequest, RunResponse, Tool, ToolInput};
pub use store::Store;

/// Build the API router backed by the given store.
pub fn router(store: Arc<Store>) -> Router {
    Router::new()
        .route("/tools", post(handlers::create_tool).get(handlers::list_tools))
        .route(
            "/tools/{tool_id}",
            put(handlers::update_tool).delete(handlers::delete_tool),
        )
        .route("/agents", post(handlers::create_agent).get(handlers::list_agents))
        .route(
            "/agents/{agent_id}",
            get(handlers::get_agent)
                .put(handlers::update_agent)
                .delete(handlers::delete_agent),
        )
        .route("/agents/{agent_id}/run", post(handlers::run_agent))
        .route("/executions", get(handlers::list_executions))
        .with_state(store)
}
