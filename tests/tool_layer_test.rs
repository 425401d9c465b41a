// Tool boundary behavior: structured failure payloads for caller input
// errors, protocol errors for missing arguments, silent result caps.

mod common;

use common::{FakeEngine, hit, pipeline};
use serde_json::{Map, Value, json};

use mcp_nvidia_search::NvidiaSearchServer;
use mcp_nvidia_search::mcp::ToolOutcome;

fn args(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("args fixture must be an object"),
    }
}

fn server_with_gpu_results() -> NvidiaSearchServer {
    let many: Vec<_> = (0..20)
        .map(|i| {
            hit(
                "GPU computing",
                &format!("https://developer.nvidia.com/gpu/{i}"),
                "GPU computing resources",
            )
        })
        .collect();
    let engine = FakeEngine::new().respond("developer.nvidia.com", many);
    NvidiaSearchServer::with_pipeline(pipeline(engine))
}

fn failure_message(outcome: &ToolOutcome) -> String {
    match outcome {
        ToolOutcome::Failure { payload } => payload["error"]["message"]
            .as_str()
            .expect("error message")
            .to_string(),
        ToolOutcome::Success { .. } => panic!("expected a failure payload"),
    }
}

#[tokio::test]
async fn oversized_query_yields_too_long_failure() {
    let server = server_with_gpu_results();
    let outcome = server
        .run_search_nvidia(&args(json!({ "query": "q".repeat(501) })))
        .await
        .expect("no protocol error");

    assert!(failure_message(&outcome).contains("too long"));
}

#[tokio::test]
async fn foreign_domain_yields_invalid_domains_failure() {
    let server = server_with_gpu_results();
    let outcome = server
        .run_search_nvidia(&args(json!({
            "query": "GPU",
            "domains": ["https://evil.com/"],
        })))
        .await
        .expect("no protocol error");

    assert!(failure_message(&outcome).to_lowercase().contains("invalid"));
}

#[tokio::test]
async fn one_bad_domain_fails_the_whole_request() {
    let server = server_with_gpu_results();
    let outcome = server
        .run_search_nvidia(&args(json!({
            "query": "GPU",
            "domains": ["developer.nvidia.com", "evil.com"],
        })))
        .await
        .expect("no protocol error");

    assert!(failure_message(&outcome).contains("Invalid domains"));
}

#[tokio::test]
async fn non_list_domains_yield_shape_failure() {
    let server = server_with_gpu_results();
    let outcome = server
        .run_search_nvidia(&args(json!({
            "query": "GPU",
            "domains": "developer.nvidia.com",
        })))
        .await
        .expect("no protocol error");

    assert_eq!(failure_message(&outcome), "domains must be a list");
}

#[tokio::test]
async fn missing_query_is_a_protocol_error() {
    let server = server_with_gpu_results();
    let error = server
        .run_search_nvidia(&args(json!({})))
        .await
        .expect_err("missing query must be a hard error");
    assert!(error.message.contains("query"));
}

#[tokio::test]
async fn oversized_result_request_is_silently_capped_at_ten() {
    let server = server_with_gpu_results();
    let outcome = server
        .run_search_nvidia(&args(json!({
            "query": "GPU",
            "max_results_per_domain": 100,
        })))
        .await
        .expect("no protocol error");

    let ToolOutcome::Success { payload, .. } = outcome else {
        panic!("expected success");
    };
    assert_eq!(payload["success"], json!(true));
    assert_eq!(payload["metadata"]["max_results_per_domain"], json!(10));
    let results = payload["results"].as_array().expect("results array");
    assert!(results.len() <= 10);
}

#[tokio::test]
async fn success_payload_carries_results_and_metadata() {
    let server = server_with_gpu_results();
    let outcome = server
        .run_search_nvidia(&args(json!({ "query": "GPU computing" })))
        .await
        .expect("no protocol error");

    let ToolOutcome::Success { report, payload } = outcome else {
        panic!("expected success");
    };
    let results = payload["results"].as_array().expect("results array");
    assert_eq!(
        payload["metadata"]["result_count"].as_u64().expect("count") as usize,
        results.len()
    );
    assert!(report.contains("GPU computing"));
    for result in results {
        let score = result["relevance_score"].as_u64().expect("score");
        assert!(score <= 100);
    }
}

#[tokio::test]
async fn discover_rejects_oversized_topic() {
    let server = server_with_gpu_results();
    let outcome = server
        .run_discover_content(&args(json!({
            "content_type": "blog",
            "topic": "t".repeat(501),
        })))
        .await
        .expect("no protocol error");

    assert!(failure_message(&outcome).contains("too long"));
}

#[tokio::test]
async fn discover_requires_content_type_and_topic() {
    let server = server_with_gpu_results();
    assert!(
        server
            .run_discover_content(&args(json!({ "topic": "GPU" })))
            .await
            .is_err()
    );
    assert!(
        server
            .run_discover_content(&args(json!({ "content_type": "blog" })))
            .await
            .is_err()
    );
}

#[tokio::test]
async fn empty_results_still_succeed() {
    // No scripted responses at all: every domain returns an empty list.
    let server = NvidiaSearchServer::with_pipeline(pipeline(FakeEngine::new()));
    let outcome = server
        .run_search_nvidia(&args(json!({ "query": "GPU" })))
        .await
        .expect("no protocol error");

    let ToolOutcome::Success { report, payload } = outcome else {
        panic!("expected success");
    };
    assert_eq!(payload["metadata"]["result_count"], json!(0));
    assert!(report.contains("No results found"));
}
