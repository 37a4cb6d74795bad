use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use super::static_list::{StaticAdvice, STATIC_TIPS};
use super::{AdviceConfig, AdviceSource};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, thiserror::Error)]
pub enum RemoteAdviceError {
    #[error("HTTP request failed: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Asks a Gemini-style `generateContent` endpoint for a tip
///
/// Only the topic string is ever sent. Any failure is logged and answered from
/// the static list.
#[derive(Clone)]
pub struct RemoteAdvice {
    client: Client,
    url: String,
    api_key: String,
    temperature: f32,
}

impl std::fmt::Debug for RemoteAdvice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteAdvice")
            .field("url", &self.url)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate, or `None` if the model produced nothing
    pub(crate) fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }
}

fn generate_url(endpoint: &Url, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        endpoint.as_str().trim_end_matches('/'),
        model
    )
}

fn prompt(topic: &str) -> String {
    format!(
        "Give one short security tip about {}. Focus on ECC encryption and file security. \
         Keep it under 50 words. Mention that this tool works offline.",
        topic
    )
}

impl RemoteAdvice {
    pub fn new(config: &AdviceConfig, api_key: &str) -> Result<Self, RemoteAdviceError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            url: generate_url(&config.endpoint, &config.model),
            api_key: api_key.to_string(),
            temperature: config.temperature,
        })
    }

    async fn generate(&self, topic: &str) -> Result<GenerateResponse, RemoteAdviceError> {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt(topic),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        let response = self
            .client
            .post(&self.url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<GenerateResponse>().await?)
    }
}

#[async_trait::async_trait]
impl AdviceSource for RemoteAdvice {
    async fn tip(&self, topic: &str) -> String {
        match self.generate(topic).await {
            Ok(response) => response
                .text()
                .unwrap_or_else(|| STATIC_TIPS[0].to_string()),
            Err(e) => {
                tracing::warn!("advice request failed, using a static tip: {}", e);
                StaticAdvice::random_tip().to_string()
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_generate_url() {
        let endpoint = Url::parse("https://example.com/v1beta/").unwrap();
        assert_eq!(
            generate_url(&endpoint, "some-model"),
            "https://example.com/v1beta/models/some-model:generateContent"
        );
    }

    #[test]
    fn test_prompt_mentions_topic() {
        assert!(prompt("key backups").contains("key backups"));
    }

    #[test]
    fn test_request_shape() {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: "hi".to_string(),
                }],
            }],
            generation_config: GenerationConfig { temperature: 0.5 },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(json["generationConfig"]["temperature"], 0.5);
    }

    #[test]
    fn test_response_text() {
        let body = r#"{
            "candidates": [
                { "content": { "parts": [ { "text": "  Keep your key " }, { "text": "offline.  " } ], "role": "model" } }
            ]
        }"#;
        let response: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.text().as_deref(), Some("Keep your key offline."));
    }

    #[test]
    fn test_response_without_text() {
        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.text(), None);

        let response: GenerateResponse =
            serde_json::from_str(r#"{ "candidates": [ { "content": { "parts": [ { "text": "   " } ] } } ] }"#)
                .unwrap();
        assert_eq!(response.text(), None);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_falls_back() {
        let config = AdviceConfig {
            api_key: Some("test-key".to_string()),
            endpoint: Url::parse("http://127.0.0.1:9").unwrap(),
            timeout_secs: 2,
            ..Default::default()
        };
        let remote = RemoteAdvice::new(&config, "test-key").unwrap();
        let tip = remote.tip("passwords").await;
        assert!(STATIC_TIPS.contains(&tip.as_str()));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let remote = RemoteAdvice::new(&AdviceConfig::default(), "super-secret").unwrap();
        assert!(!format!("{:?}", remote).contains("super-secret"));
    }
}
