//! Simulated model backend.
//!
//! Stands in for a real LLM integration: the completion is a pure function
//! of the prompt and model, with a fixed artificial latency.

use std::time::Duration;

const COMPLETIONS: [&str; 4] = [
    "I have analyzed the data and found significant trends.",
    "Based on your request, I have executed the necessary tools.",
    "Here is the summary you requested based on the provided context.",
    "The calculation is complete. The result is within expected parameters.",
];

const SIMULATED_LATENCY: Duration = Duration::from_millis(500);

/// Produce a simulated completion for the prompt.
pub(crate) async fn complete(prompt: &str, model: &str) -> String {
    tokio::time::sleep(SIMULATED_LATENCY).await;

    let completion = COMPLETIONS[prompt.len() % COMPLETIONS.len()];

    format!("[{model} Response]: {completion}")
}
