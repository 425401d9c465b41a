// Content discovery: strategy rewriting, type-keyword re-scoring, total cap.

mod common;

use common::{FakeEngine, hit, pipeline};
use mcp_nvidia_search::ContentType;

#[tokio::test]
async fn tutorial_results_are_rescored_by_strategy_keywords() {
    let engine = FakeEngine::new()
        .respond(
            "developer.nvidia.com",
            vec![hit(
                "Triton tutorial: step by step guide",
                "https://developer.nvidia.com/triton-tutorial",
                "A guide and walkthrough for the Triton tutorial",
            )],
        )
        .respond(
            "docs.nvidia.com",
            vec![hit(
                "Triton tutorial reference",
                "https://docs.nvidia.com/triton",
                "Triton tutorial configuration reference",
            )],
        );

    let results = pipeline(engine)
        .discover_content(ContentType::Tutorial, "Triton", 5)
        .await;

    assert!(!results.is_empty());
    // The keyword-dense developer hit outranks the reference page.
    assert_eq!(results[0].url, "https://developer.nvidia.com/triton-tutorial");
    for pair in results.windows(2) {
        assert!(pair[0].relevance_score >= pair[1].relevance_score);
    }
    for result in &results {
        assert_eq!(result.content_type.as_deref(), Some("tutorial"));
        assert!(result.relevance_score <= 100);
    }
}

#[tokio::test]
async fn discovery_caps_the_total_not_per_domain() {
    let developer: Vec<_> = (0..8)
        .map(|i| {
            hit(
                "CUDA video session",
                &format!("https://developer.nvidia.com/video/{i}"),
                "Watch this CUDA video session recording",
            )
        })
        .collect();
    let blogs: Vec<_> = (0..8)
        .map(|i| {
            hit(
                "CUDA video session",
                &format!("https://blogs.nvidia.com/video/{i}"),
                "Watch this CUDA video session recording",
            )
        })
        .collect();
    let engine = FakeEngine::new()
        .respond("developer.nvidia.com", developer)
        .respond("blogs.nvidia.com", blogs);

    let results = pipeline(engine)
        .discover_content(ContentType::Video, "CUDA", 5)
        .await;

    assert_eq!(results.len(), 5);
}

#[tokio::test]
async fn unknown_type_falls_back_to_generic_search() {
    let engine = FakeEngine::new().respond(
        "docs.nvidia.com",
        vec![hit(
            "Omniverse overview",
            "https://docs.nvidia.com/omniverse",
            "Omniverse platform documentation",
        )],
    );

    let results = pipeline(engine)
        .discover_content(ContentType::parse("podcast"), "Omniverse", 5)
        .await;

    // Generic strategy searches the full default set with an empty keyword
    // list, so every surviving result re-scores to 0 but is still returned.
    assert!(!results.is_empty());
    assert!(results.iter().all(|r| r.relevance_score == 0));
    assert!(results.iter().all(|r| r.content_type.as_deref() == Some("other")));
}

#[tokio::test]
async fn discovery_stays_inside_the_strategy_domains() {
    // Scripted hits exist for a domain outside the blog strategy subset.
    let engine = FakeEngine::new()
        .respond(
            "docs.nvidia.com",
            vec![hit(
                "Grace blog mirror",
                "https://docs.nvidia.com/grace-blog",
                "Grace blog post mirror",
            )],
        )
        .respond(
            "blogs.nvidia.com",
            vec![hit(
                "Grace Hopper blog post",
                "https://blogs.nvidia.com/grace",
                "Technical blog post about Grace",
            )],
        );

    let results = pipeline(engine)
        .discover_content(ContentType::Blog, "Grace blog post", 5)
        .await;

    assert!(!results.is_empty());
    assert!(results.iter().all(|r| r.domain != "docs.nvidia.com"));
}
