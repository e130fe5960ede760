mod common;

use std::sync::Arc;

use sous_agent::{Agent, AgentConfig, LlmSettings};
use sous_kg::ToolRegistry;
use sous_llm::Message;

use common::{
    seasonal_rows, text_response, tool_call_response, FailingChatClient, FailingGraphStore,
    LoopingChatClient, ScriptedChatClient, StaticStore,
};

fn agent_with(
    client: Arc<dyn sous_llm::ChatClient>,
    registry: ToolRegistry,
    config: AgentConfig,
) -> Agent {
    Agent::builder()
        .chat_client(client)
        .registry(Arc::new(registry))
        .config(config)
        .llm(LlmSettings::new("gpt-4o"))
        .build()
        .unwrap()
}

fn question(text: &str) -> Vec<Message> {
    vec![Message::system("You answer recipe questions."), Message::human(text)]
}

#[tokio::test]
async fn final_text_on_first_turn_ends_the_run() {
    let client = Arc::new(ScriptedChatClient::new(vec![text_response(
        "I don't need the graph for that.",
    )]));
    let registry = ToolRegistry::for_store(Arc::new(StaticStore::new(vec![])));
    let agent = agent_with(client.clone(), registry, AgentConfig::default());

    let outcome = agent.run(question("hi")).await.unwrap();

    assert_eq!(outcome.answer, "I don't need the graph for that.");
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn tool_round_trip_reaches_final_text() {
    let client = Arc::new(ScriptedChatClient::new(vec![
        tool_call_response("call_0", "execute_query", r#"{"query": "seasonal recipes"}"#),
        text_response("You have Butternut Squash Soup, Asparagus Risotto, and Peach Galette."),
    ]));
    let registry = ToolRegistry::for_store(Arc::new(StaticStore::new(seasonal_rows())));
    let agent = agent_with(client.clone(), registry, AgentConfig::default());

    let outcome = agent.run(question("What seasonal recipes do you have?")).await.unwrap();

    assert_eq!(client.calls(), 2);
    assert!(outcome.answer.contains("Butternut Squash Soup"));
    assert!(outcome
        .log
        .iter()
        .any(|line| line.contains("execute_query")));
}

#[tokio::test]
async fn ceiling_forces_termination_after_exactly_n_model_calls() {
    let client = Arc::new(LoopingChatClient::new());
    let registry = ToolRegistry::for_store(Arc::new(StaticStore::new(seasonal_rows())));
    let agent = agent_with(client.clone(), registry, AgentConfig::default());

    let outcome = agent.run(question("keep going")).await.unwrap();

    // Non-throwing result with the default ceiling of 10 model calls
    assert_eq!(client.calls(), 10);
    assert_eq!(outcome.answer, "");
    assert!(outcome
        .log
        .last()
        .unwrap()
        .contains("model call ceiling (10) reached"));
}

#[tokio::test]
async fn ceiling_is_configurable() {
    let client = Arc::new(LoopingChatClient::new());
    let registry = ToolRegistry::for_store(Arc::new(StaticStore::new(vec![])));
    let config = AgentConfig::new().with_max_model_calls(3);
    let agent = agent_with(client.clone(), registry, config);

    let outcome = agent.run(question("keep going")).await.unwrap();

    assert_eq!(client.calls(), 3);
    assert!(outcome
        .log
        .last()
        .unwrap()
        .contains("model call ceiling (3) reached"));
}

#[tokio::test]
async fn model_failure_aborts_the_run_with_partial_log() {
    let client = Arc::new(FailingChatClient);
    let registry = ToolRegistry::for_store(Arc::new(StaticStore::new(vec![])));
    let agent = agent_with(client, registry, AgentConfig::default());

    let err = agent.run(question("anything")).await.unwrap_err();

    assert!(err.to_string().contains("model call failed"));
    assert!(err.log.iter().any(|line| line.contains("run aborted")));
}

#[tokio::test]
async fn query_failure_is_fed_back_as_tool_result() {
    let client = Arc::new(ScriptedChatClient::new(vec![
        tool_call_response("call_0", "execute_query", r#"{"query": "MATCH Recipie"}"#),
        text_response("That query failed, the label does not exist."),
    ]));
    let registry = ToolRegistry::for_store(Arc::new(FailingGraphStore));
    let agent = agent_with(client.clone(), registry, AgentConfig::default());

    // The loop must recover: the failure becomes tool-result text the model
    // can reason about, not a hard error
    let outcome = agent.run(question("find the recipie")).await.unwrap();

    assert_eq!(client.calls(), 2);
    assert_eq!(outcome.answer, "That query failed, the label does not exist.");
    assert!(outcome
        .log
        .iter()
        .any(|line| line.contains("Tool execution failed")));
}

#[tokio::test]
async fn unknown_tool_name_does_not_fail_the_loop() {
    let client = Arc::new(ScriptedChatClient::new(vec![
        tool_call_response("call_0", "fetch_weather", r#"{"city": "Lyon"}"#),
        text_response("I can only query the knowledge graph."),
    ]));
    let registry = ToolRegistry::for_store(Arc::new(StaticStore::new(vec![])));
    let agent = agent_with(client.clone(), registry, AgentConfig::default());

    let outcome = agent.run(question("weather?")).await.unwrap();

    assert_eq!(client.calls(), 2);
    assert_eq!(outcome.answer, "I can only query the knowledge graph.");
}
