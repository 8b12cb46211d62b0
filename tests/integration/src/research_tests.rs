//! Research agent scenarios against recording fake collaborators.

use pretty_assertions::assert_eq;
use relay_agents::{Error, RESEARCHER, ResearchAgent, Settings, TokenUsage};
use relay_messages::{Action, parse};
use relay_test_utils::{FakeCollaborators, TestRun};

fn agent(run: &TestRun, fakes: &FakeCollaborators) -> ResearchAgent {
    let settings = Settings::for_layout(&run.layout()).unwrap();
    ResearchAgent::new(&run.config(), &settings, fakes.build())
}

fn train_term(term: &str) -> String {
    format!("```\nFROM: PLANNER\nTO: RESEARCHER\nACTION: train-using-search-term\nTERM: {term}\n```")
}

fn train_url(url: &str) -> String {
    format!("```\nFROM: PLANNER\nTO: RESEARCHER\nACTION: train-using-url\nURL: {url}\n```")
}

// =============================================================================
// Training
// =============================================================================

#[test]
fn test_train_using_search_term() {
    let run = TestRun::new("run-1");
    let fakes = FakeCollaborators::new()
        .with_search_results(&["https://docs.rs/serde", "https://serde.rs/derive"]);
    let mut agent = agent(&run, &fakes);

    let reply = agent.handle(&train_term("serde derive")).unwrap();
    let message = parse(&reply.message).unwrap();

    assert_eq!(message.action().unwrap(), Action::TrainingOutput);
    assert_eq!(message.sender(), Some(RESEARCHER));
    assert_eq!(message.recipient(), Some("PLANNER"));
    assert_eq!(
        message.details(),
        Some("Training using search term completed successfully")
    );
    assert_eq!(reply.usage, None);

    let record = fakes.record();
    assert_eq!(record.searches, vec!["serde derive"]);
    assert_eq!(
        record.crawled,
        vec!["https://docs.rs/serde", "https://serde.rs/derive"]
    );
    let research = run.layout().research_dir();
    assert_eq!(
        record.indexed,
        vec![research.join("derive"), research.join("serde")]
    );
}

#[test]
fn test_full_reindex_resubmits_every_folder() {
    let run = TestRun::new("run-1");
    run.add_research_folder("existing/nested");
    let fakes = FakeCollaborators::new();
    let mut agent = agent(&run, &fakes);

    agent.handle(&train_url("https://example.com/first")).unwrap();
    agent.handle(&train_url("https://example.com/second")).unwrap();

    let research = run.layout().research_dir();
    assert_eq!(
        fakes.record().indexed,
        vec![
            research.join("existing"),
            research.join("existing").join("nested"),
            research.join("first"),
            research.join("existing"),
            research.join("existing").join("nested"),
            research.join("first"),
            research.join("second"),
        ]
    );
}

#[test]
fn test_incremental_reindex_skips_known_folders() {
    let run = TestRun::new("run-1").with_settings("[research]\nreindex = \"incremental\"\n");
    let fakes = FakeCollaborators::new();
    let mut agent = agent(&run, &fakes);

    agent.handle(&train_url("https://example.com/first")).unwrap();
    agent.handle(&train_url("https://example.com/second")).unwrap();

    let research = run.layout().research_dir();
    assert_eq!(
        fakes.record().indexed,
        vec![research.join("first"), research.join("second")]
    );
}

#[test]
fn test_reindex_strategy_does_not_change_replies() {
    let full_run = TestRun::new("run-1");
    let incremental_run =
        TestRun::new("run-1").with_settings("[research]\nreindex = \"incremental\"\n");
    let full_fakes = FakeCollaborators::new();
    let incremental_fakes = FakeCollaborators::new();
    let mut full = agent(&full_run, &full_fakes);
    let mut incremental = agent(&incremental_run, &incremental_fakes);

    for url in ["https://example.com/first", "https://example.com/second"] {
        assert_eq!(
            full.handle(&train_url(url)).unwrap(),
            incremental.handle(&train_url(url)).unwrap()
        );
    }
}

#[test]
fn test_search_failure_is_a_collaborator_error() {
    let run = TestRun::new("run-1");
    let fakes = FakeCollaborators::new().failing_search();
    let mut agent = agent(&run, &fakes);

    let err = agent.handle(&train_term("anything")).unwrap_err();
    assert!(matches!(
        err,
        Error::Collaborator {
            collaborator: "search",
            ..
        }
    ));
    assert!(fakes.record().crawled.is_empty());
}

// =============================================================================
// Inference
// =============================================================================

#[test]
fn test_infer_returns_response_and_usage() {
    let run = TestRun::new("run-1");
    let fakes = FakeCollaborators::new().with_response("Use serde_json", TokenUsage::new(100, 20));
    let mut agent = agent(&run, &fakes);

    let reply = agent
        .handle("```\nFROM: CODER\nTO: RESEARCHER\nACTION: infer\nDETAILS: How do I parse JSON?\n```")
        .unwrap();
    let message = parse(&reply.message).unwrap();

    assert_eq!(message.action().unwrap(), Action::Response);
    assert_eq!(message.recipient(), Some("CODER"));
    assert_eq!(message.details(), Some("Use serde_json"));
    assert_eq!(
        reply.usage,
        Some(TokenUsage {
            prompt: 100,
            completion: 20,
            total: 120
        })
    );

    let record = fakes.record();
    assert_eq!(record.queries, vec!["How do I parse JSON?"]);
    assert_eq!(
        record.inferences,
        vec![(
            "retrieved context".to_string(),
            "How do I parse JSON?".to_string()
        )]
    );
    assert!(record.indexed.is_empty());
}

// =============================================================================
// Protocol errors
// =============================================================================

#[test]
fn test_non_research_action_is_unknown() {
    let run = TestRun::new("run-1");
    let fakes = FakeCollaborators::new();
    let mut agent = agent(&run, &fakes);

    let err = agent
        .handle("```\nFROM: CODER\nTO: RESEARCHER\nACTION: inform\nDETAILS: hi\n```")
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Message(relay_messages::Error::UnknownAction(ref name)) if name == "inform"
    ));
}

#[test]
fn test_missing_term_is_malformed() {
    let run = TestRun::new("run-1");
    let fakes = FakeCollaborators::new();
    let mut agent = agent(&run, &fakes);

    let err = agent
        .handle("```\nFROM: PLANNER\nTO: RESEARCHER\nACTION: train-using-search-term\n```")
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Message(relay_messages::Error::MalformedMessage { .. })
    ));
    assert!(fakes.record().searches.is_empty());
}
