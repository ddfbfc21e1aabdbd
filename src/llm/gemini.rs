//! Gemini client speaking the OpenAI-compatible chat completions protocol.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{AssistantMessage, ChatMessage, LlmClient, ToolSchema};

/// Client for Gemini's OpenAI-compatible endpoint.
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],

    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [ToolSchema]>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        tools: Option<&[ToolSchema]>,
    ) -> anyhow::Result<AssistantMessage> {
        let request = ChatCompletionRequest {
            model,
            messages,
            tools,
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Model endpoint returned {}: {}", status, body);
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("Model endpoint returned no choices"))?;

        Ok(choice.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completions_url_strips_trailing_slash() {
        let client = GeminiClient::new(
            "key".to_string(),
            "https://generativelanguage.googleapis.com/v1beta/openai/".to_string(),
        );
        assert_eq!(
            client.completions_url(),
            "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions"
        );
    }

    #[test]
    fn parses_tool_call_response() {
        let body = r#"{
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {
                            "name": "get_coin_price",
                            "arguments": "{\"symbol\":\"btcusdt\"}"
                        }
                    }]
                }
            }]
        }"#;

        let parsed: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        let message = &parsed.choices[0].message;
        assert!(message.content.is_none());
        let calls = message.tool_calls.as_ref().unwrap();
        assert_eq!(calls[0].function.name, "get_coin_price");
        assert_eq!(calls[0].function.arguments, "{\"symbol\":\"btcusdt\"}");
    }

    #[test]
    fn parses_plain_text_response() {
        let body = r#"{
            "choices": [{
                "message": { "content": "BTC is trading around $60,000." }
            }]
        }"#;

        let parsed: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        let message = &parsed.choices[0].message;
        assert_eq!(
            message.content.as_deref(),
            Some("BTC is trading around $60,000.")
        );
        assert!(message.tool_calls.is_none());
    }
}
