use indoc::indoc;
use integration_tests::TestServer;

#[tokio::test]
async fn requests_without_a_key_are_unauthorized() {
    let config = indoc! {r#"
        [tenants.tenant-1]
        api_key = "sk-key-123"
        display_name = "First Tenant"
    "#};

    let server = TestServer::builder().build(config).await;

    let response = server.client.get("/tools").await;
    assert_eq!(response.status(), 401);

    let body = response.text().await.unwrap();
    insta::assert_snapshot!(body, @r#"{"error":"Unauthorized"}"#);
}

#[tokio::test]
async fn unknown_keys_are_indistinguishable_from_missing_keys() {
    let config = indoc! {r#"
        [tenants.tenant-1]
        api_key = "sk-key-123"
        display_name = "First Tenant"
    "#};

    let server = TestServer::builder().build(config).await;

    let missing = server.client.get("/tools").await;
    let missing_status = missing.status();
    let missing_content_type = missing.headers().get("content-type").cloned();
    let missing_body = missing.text().await.unwrap();

    let unknown = server
        .client
        .request(reqwest::Method::GET, "/tools")
        .header("x-api-key", "sk-wrong-key")
        .send()
        .await
        .unwrap();

    let unknown_status = unknown.status();
    let unknown_content_type = unknown.headers().get("content-type").cloned();
    let unknown_body = unknown.text().await.unwrap();

    assert_eq!(missing_status, unknown_status);
    assert_eq!(missing_content_type, unknown_content_type);
    assert_eq!(missing_body, unknown_body);
}

#[tokio::test]
async fn valid_keys_reach_the_api() {
    let config = indoc! {r#"
        [tenants.tenant-1]
        api_key = "sk-key-123"
        display_name = "First Tenant"
    "#};

    let server = TestServer::builder().build(config).await;
    let client = server.client_for("sk-key-123");

    let response = client.get("/tools").await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    insta::assert_json_snapshot!(body, @"[]");
}

#[tokio::test]
async fn unauthenticated_requests_do_not_consume_quota() {
    let config = indoc! {r#"
        [server.rate_limits.per_tenant]
        limit = 2
        interval = "10s"

        [tenants.tenant-1]
        api_key = "sk-key-123"
        display_name = "First Tenant"
    "#};

    let server = TestServer::builder().build(config).await;

    // A burst of rejected requests with a bad key must not touch any
    // tenant's window.
    for _ in 0..5 {
        let response = server
            .client
            .request(reqwest::Method::GET, "/tools")
            .header("x-api-key", "sk-wrong-key")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 401);
    }

    let client = server.client_for("sk-key-123");

    // The full quota is still available.
    assert_eq!(client.get("/tools").await.status(), 200);
    assert_eq!(client.get("/tools").await.status(), 200);
    assert_eq!(client.get("/tools").await.status(), 429);
}

#[tokio::test]
async fn health_does_not_require_a_key() {
    let config = indoc! {r#"
        [tenants.tenant-1]
        api_key = "sk-key-123"
        display_name = "First Tenant"
    "#};

    let server = TestServer::builder().build(config).await;

    let response = server.client.get("/health").await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    insta::assert_json_snapshot!(body, @r#"
    {
      "status": "healthy"
    }
    "#);
}
