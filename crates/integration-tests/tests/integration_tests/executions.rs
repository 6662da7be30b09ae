use indoc::indoc;
use integration_tests::{TestClient, TestServer};
use serde_json::json;

const CONFIG: &str = indoc! {r#"
    [server.rate_limits.per_tenant]
    limit = 100
    interval = "60s"

    [tenants.tenant-1]
    api_key = "sk-key-123"
    display_name = "First Tenant"
"#};

/// Create the Calc tool and a Math Bot agent equipped with it.
async fn create_math_bot(client: &TestClient) {
    let response = client
        .post("/tools", &json!({ "name": "Calc", "description": "Calculator" }))
        .await;
    assert_eq!(response.status(), 200);

    let response = client
        .post(
            "/agents",
            &json!({
                "name": "Math Bot",
                "role": "Math",
                "description": "Does math",
                "tool_ids": [1]
            }),
        )
        .await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn running_an_agent_returns_the_final_prompt() {
    let server = TestServer::builder().build(CONFIG).await;
    let client = server.client_for("sk-key-123");

    create_math_bot(&client).await;

    // No model given, so the default is applied.
    let response = client
        .post("/agents/1/run", &json!({ "prompt": "Calculate 2+2" }))
        .await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    insta::assert_json_snapshot!(body, @r#"
    {
      "agent": "Math Bot",
      "final_prompt": "System: You are Math Bot, a Math. Does math. You have access to these tools: [Calc].\nUser Task: Calculate 2+2",
      "response": "[gpt-4o Response]: Based on your request, I have executed the necessary tools."
    }
    "#);
}

#[tokio::test]
async fn running_an_unknown_agent_is_not_found() {
    let server = TestServer::builder().build(CONFIG).await;
    let client = server.client_for("sk-key-123");

    let response = client
        .post("/agents/999/run", &json!({ "prompt": "Calculate 2+2" }))
        .await;
    assert_eq!(response.status(), 404);

    let body = response.text().await.unwrap();
    insta::assert_snapshot!(body, @r#"{"error":"Agent not found"}"#);

    // Nothing was recorded.
    let body: serde_json::Value = client.get("/executions").await.json().await.unwrap();
    insta::assert_json_snapshot!(body, @"[]");
}

#[tokio::test]
async fn execution_history_is_recorded_and_paginated() {
    let server = TestServer::builder().build(CONFIG).await;
    let client = server.client_for("sk-key-123");

    create_math_bot(&client).await;

    for _ in 0..3 {
        let response = client
            .post("/agents/1/run", &json!({ "prompt": "ping", "model": "gpt-4o" }))
            .await;
        assert_eq!(response.status(), 200);
    }

    let body: serde_json::Value = client.get("/executions").await.json().await.unwrap();

    insta::assert_json_snapshot!(body, { "[].timestamp" => "[timestamp]" }, @r#"
    [
      {
        "agent_id": 1,
        "id": 1,
        "model": "gpt-4o",
        "prompt": "System: You are Math Bot, a Math. Does math. You have access to these tools: [Calc].\nUser Task: ping",
        "response": "[gpt-4o Response]: I have analyzed the data and found significant trends.",
        "timestamp": "[timestamp]"
      },
      {
        "agent_id": 1,
        "id": 2,
        "model": "gpt-4o",
        "prompt": "System: You are Math Bot, a Math. Does math. You have access to these tools: [Calc].\nUser Task: ping",
        "response": "[gpt-4o Response]: I have analyzed the data and found significant trends.",
        "timestamp": "[timestamp]"
      },
      {
        "agent_id": 1,
        "id": 3,
        "model": "gpt-4o",
        "prompt": "System: You are Math Bot, a Math. Does math. You have access to these tools: [Calc].\nUser Task: ping",
        "response": "[gpt-4o Response]: I have analyzed the data and found significant trends.",
        "timestamp": "[timestamp]"
      }
    ]
    "#);

    let body: serde_json::Value = client.get("/executions?skip=1&limit=1").await.json().await.unwrap();

    insta::assert_json_snapshot!(body, { "[].timestamp" => "[timestamp]" }, @r#"
    [
      {
        "agent_id": 1,
        "id": 2,
        "model": "gpt-4o",
        "prompt": "System: You are Math Bot, a Math. Does math. You have access to these tools: [Calc].\nUser Task: ping",
        "response": "[gpt-4o Response]: I have analyzed the data and found significant trends.",
        "timestamp": "[timestamp]"
      }
    ]
    "#);
}
