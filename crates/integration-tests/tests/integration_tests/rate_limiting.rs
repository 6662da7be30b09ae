use indoc::indoc;
use integration_tests::TestServer;
use serde_json::json;

#[tokio::test]
async fn sixth_request_within_the_window_is_throttled() {
    let config = indoc! {r#"
        [server.rate_limits.per_tenant]
        limit = 5
        interval = "60s"

        [tenants.tenant-1]
        api_key = "sk-key-123"
        display_name = "First Tenant"
    "#};

    let server = TestServer::builder().build(config).await;
    let client = server.client_for("sk-key-123");

    let mut results = Vec::new();

    for i in 1..=6 {
        let response = client.get("/tools").await;

        results.push(json!({
            "request": i,
            "status": response.status().as_u16(),
            "retry_after": response.headers().get("retry-after").map(|h| h.to_str().unwrap_or("invalid"))
        }));
    }

    insta::assert_json_snapshot!(results, @r#"
    [
      {
        "request": 1,
        "retry_after": null,
        "status": 200
      },
      {
        "request": 2,
        "retry_after": null,
        "status": 200
      },
      {
        "request": 3,
        "retry_after": null,
        "status": 200
      },
      {
        "request": 4,
        "retry_after": null,
        "status": 200
      },
      {
        "request": 5,
        "retry_after": null,
        "status": 200
      },
      {
        "request": 6,
        "retry_after": "60",
        "status": 429
      }
    ]
    "#);
}

#[tokio::test]
async fn tenants_are_throttled_independently() {
    let config = indoc! {r#"
        [server.rate_limits.per_tenant]
        limit = 2
        interval = "10s"

        [tenants.tenant-1]
        api_key = "sk-key-123"
        display_name = "First Tenant"

        [tenants.tenant-2]
        api_key = "sk-key-456"
        display_name = "Second Tenant"
    "#};

    let server = TestServer::builder().build(config).await;

    let mut results = Vec::new();

    for (tenant, api_key) in [("tenant-1", "sk-key-123"), ("tenant-2", "sk-key-456")] {
        let client = server.client_for(api_key);

        for i in 1..=3 {
            let response = client.get("/tools").await;

            results.push(json!({
                "tenant": tenant,
                "request": i,
                "status": response.status().as_u16(),
            }));
        }
    }

    insta::assert_json_snapshot!(results, @r#"
    [
      {
        "request": 1,
        "status": 200,
        "tenant": "tenant-1"
      },
      {
        "request": 2,
        "status": 200,
        "tenant": "tenant-1"
      },
      {
        "request": 3,
        "status": 429,
        "tenant": "tenant-1"
      },
      {
        "request": 1,
        "status": 200,
        "tenant": "tenant-2"
      },
      {
        "request": 2,
        "status": 200,
        "tenant": "tenant-2"
      },
      {
        "request": 3,
        "status": 429,
        "tenant": "tenant-2"
      }
    ]
    "#);
}

#[tokio::test]
async fn throttled_responses_have_a_plain_text_body() {
    let config = indoc! {r#"
        [server.rate_limits.per_tenant]
        limit = 1
        interval = "60s"

        [tenants.tenant-1]
        api_key = "sk-key-123"
        display_name = "First Tenant"
    "#};

    let server = TestServer::builder().build(config).await;
    let client = server.client_for("sk-key-123");

    assert_eq!(client.get("/tools").await.status(), 200);

    let response = client.get("/tools").await;
    assert_eq!(response.status(), 429);

    let body = response.text().await.unwrap();
    insta::assert_snapshot!(body, @"Rate limit exceeded");
}

#[tokio::test]
async fn throttling_can_be_disabled() {
    let config = indoc! {r#"
        [server.rate_limits]
        enabled = false

        [tenants.tenant-1]
        api_key = "sk-key-123"
        display_name = "First Tenant"
    "#};

    let server = TestServer::builder().build(config).await;
    let client = server.client_for("sk-key-123");

    for _ in 0..10 {
        assert_eq!(client.get("/tools").await.status(), 200);
    }
}
