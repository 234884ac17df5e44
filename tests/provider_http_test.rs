// Provider wire-contract tests against a mock HTTP server

use keyi::providers::{ChatProvider, CompletionRequest, OpenAiCompatProvider, ProviderFailure};
use keyi::session::Message;

fn provider_for(server: &mockito::ServerGuard) -> OpenAiCompatProvider {
    OpenAiCompatProvider::new(
        "test-key".to_string(),
        server.url(),
        "glm-4-flash".to_string(),
        "zhipu".to_string(),
    )
    .unwrap()
}

fn request() -> CompletionRequest {
    CompletionRequest::new(vec![Message::system("sys"), Message::user("你好")])
}

#[tokio::test]
async fn test_successful_completion() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "你好，我在听。"}}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let provider = provider_for(&server);
    let reply = provider.complete(&request()).await.unwrap();

    assert_eq!(reply, "你好，我在听。");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_request_carries_decoding_parameters() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "model": "glm-4-flash",
            "temperature": 0.7,
            "max_tokens": 500
        })))
        .with_status(200)
        .with_body(
            serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "ok"}}]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let provider = provider_for(&server);
    provider.complete(&request()).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_error_maps_to_unavailable() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/chat/completions")
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let provider = provider_for(&server);
    let result = provider.complete(&request()).await;

    assert!(matches!(result, Err(ProviderFailure::Unavailable(_))));
}

#[tokio::test]
async fn test_client_error_maps_to_rejected() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/chat/completions")
        .with_status(429)
        .with_body("rate limited")
        .create_async()
        .await;

    let provider = provider_for(&server);
    let result = provider.complete(&request()).await;

    assert!(matches!(result, Err(ProviderFailure::Rejected(_))));
}

#[tokio::test]
async fn test_malformed_body_maps_to_unavailable() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body("not json at all")
        .create_async()
        .await;

    let provider = provider_for(&server);
    let result = provider.complete(&request()).await;

    assert!(matches!(result, Err(ProviderFailure::Unavailable(_))));
}

#[tokio::test]
async fn test_empty_choices_maps_to_unavailable() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(serde_json::json!({"choices": []}).to_string())
        .create_async()
        .await;

    let provider = provider_for(&server);
    let result = provider.complete(&request()).await;

    assert!(matches!(result, Err(ProviderFailure::Unavailable(_))));
}
