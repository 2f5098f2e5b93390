use super::*;

struct EchoModel;

#[async_trait]
impl ModelClient for EchoModel {
    async fn send(&self, messages: &[Message], _options: &ModelRequestOptions) -> ModelResponse {
        ModelResponse {
            content: format!("saw {} messages", messages.len()),
            tool_calls: Vec::new(),
            interrupted: false,
        }
    }
}

#[tokio::test]
async fn stub_client_satisfies_the_trait() {
    let client = EchoModel;
    let options = ModelRequestOptions {
        tools: Vec::new(),
        temperature: 0.0,
        max_tokens: 100,
        reasoning_effort: ReasoningEffort::Medium,
        stream: false,
        cancellation: CancellationToken::new(),
    };
    let response = client.send(&[], &options).await;
    assert_eq!(response.content, "saw 0 messages");
    assert!(!response.interrupted);
}
