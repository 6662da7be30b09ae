//! Test harness that boots the real server on an ephemeral port and drives
//! it over HTTP.

use std::{net::SocketAddr, time::Duration};

use config::Config;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use server::ServeConfig;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// Test client for making HTTP requests to the test server.
#[derive(Clone)]
pub struct TestClient {
    base_url: String,
    client: reqwest::Client,
    custom_headers: HeaderMap,
}

impl TestClient {
    /// Create a new test client for the given base URL.
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
            custom_headers: HeaderMap::new(),
        }
    }

    /// Add a custom header to be included in all requests.
    pub fn push_header(&mut self, key: &str, value: impl AsRef<str>) {
        let header_name = HeaderName::from_bytes(key.as_bytes()).unwrap();
        let header_value = HeaderValue::from_str(value.as_ref()).unwrap();
        self.custom_headers.insert(header_name, header_value);
    }

    /// Send a POST request to the given path with a JSON body.
    pub async fn post<T: serde::Serialize>(&self, path: &str, body: &T) -> reqwest::Response {
        self.request(reqwest::Method::POST, path).json(body).send().await.unwrap()
    }

    /// Send a PUT request to the given path with a JSON body.
    pub async fn put<T: serde::Serialize>(&self, path: &str, body: &T) -> reqwest::Response {
        self.request(reqwest::Method::PUT, path).json(body).send().await.unwrap()
    }

    /// Send a GET request to the given path.
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.request(reqwest::Method::GET, path).send().await.unwrap()
    }

    /// Send a GET request to the given path, returning Result instead of panicking.
    pub async fn try_get(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client.get(format!("{}{}", self.base_url, path)).send().await
    }

    /// Send a DELETE request to the given path.
    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.request(reqwest::Method::DELETE, path).send().await.unwrap()
    }

    /// Create a request with the given method and path, with the client's
    /// custom headers already applied.
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut req = self.client.request(method, format!("{}{}", self.base_url, path));

        for (key, value) in &self.custom_headers {
            req = req.header(key.clone(), value.clone());
        }

        req
    }

    /// Get the base URL of this test client.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Test server that manages the lifecycle of a server instance.
pub struct TestServer {
    pub client: TestClient,
    pub address: SocketAddr,
    /// Configuration used by this test server.
    pub config: Config,
    /// Handle to the server task.
    _task_handle: tokio::task::JoinHandle<()>,
    /// Shutdown signal for the server.
    shutdown_signal: CancellationToken,
}

impl TestServer {
    pub fn builder() -> TestServerBuilder {
        TestServerBuilder::default()
    }

    /// Start a new test server with the given TOML configuration.
    #[allow(clippy::panic)]
    async fn start(config_toml: &str) -> Self {
        // Write config to a temporary file and use the proper loader to
        // ensure validation runs.
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, config_toml).unwrap();

        let config = Config::load(&config_path).unwrap();

        // Reserve an ephemeral port for the server.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        let shutdown_signal = CancellationToken::new();

        let serve_config = ServeConfig {
            listen_address: address,
            config: config.clone(),
            shutdown_signal: shutdown_signal.clone(),
            log_filter: "server=debug,rate_limit=debug,agents=debug,config=debug".to_string(),
        };

        let task_handle = tokio::spawn(async move {
            // Drop the listener so the server can bind to the address.
            drop(listener);

            if let Err(e) = server::serve(serve_config).await {
                eprintln!("test server exited with an error: {e}");
            }
        });

        let client = TestClient::new(format!("http://{address}"));

        // Wait until the health endpoint answers.
        let mut retries = 30;
        let mut last_error = None;

        while retries > 0 {
            match client.try_get("/health").await {
                Ok(_) => break,
                Err(e) => {
                    last_error = Some(e);
                }
            }

            retries -= 1;
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        if retries == 0 {
            match last_error {
                Some(e) => panic!("Server failed to become ready after 30 retries. Last error: {e}"),
                None => panic!("Server failed to become ready after 30 retries. No specific error."),
            }
        }

        TestServer {
            client,
            address,
            config,
            _task_handle: task_handle,
            shutdown_signal,
        }
    }

    /// A client that authenticates every request with the given API key.
    pub fn client_for(&self, api_key: &str) -> TestClient {
        let mut client = self.client.clone();
        client.push_header("x-api-key", api_key);
        client
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown_signal.cancel();
    }
}

#[derive(Default)]
pub struct TestServerBuilder;

impl TestServerBuilder {
    pub async fn build(self, config: &str) -> TestServer {
        TestServer::start(config).await
    }
}
