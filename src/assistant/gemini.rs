use crate::config::AssistantConfig;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A text-in, text-out generative model.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Model identifier, for logs
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Models visible to the credential. Diagnostic only.
    async fn list_models(&self) -> Result<Vec<String>>;
}

/// The configured model does not exist for this credential.
#[derive(Debug)]
pub struct ModelNotFound {
    pub model: String,
}

impl fmt::Display for ModelNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "model {} not found", self.model)
    }
}

impl std::error::Error for ModelNotFound {}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Deserialize)]
struct ModelInfo {
    name: String,
}

/// Google Gemini REST client (`v1beta` generateContent).
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, config: &AssistantConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to build Gemini HTTP client")?;

        Ok(Self {
            http_client,
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn check_response_status(&self, response: &reqwest::Response) -> Result<()> {
        match response.status() {
            StatusCode::NOT_FOUND => Err(anyhow::Error::new(ModelNotFound {
                model: self.model.clone(),
            })),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(anyhow!("Gemini rejected the API key"))
            }
            StatusCode::TOO_MANY_REQUESTS => Err(anyhow!("Gemini quota exceeded")),
            s if !s.is_success() => Err(anyhow!("Gemini API error: {}", s)),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&body)
            .send()
            .await
            .context("Failed to send generateContent request")?;

        self.check_response_status(&response)?;
        let parsed = response
            .json::<GenerateResponse>()
            .await
            .context("Failed to parse generateContent response")?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect()
            })
            .ok_or_else(|| anyhow!("Gemini returned no candidates"))?;

        Ok(text)
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        let url = format!("{}/v1beta/models", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .header("x-goog-api-key", self.api_key.as_str())
            .send()
            .await
            .context("Failed to send listModels request")?;

        if !response.status().is_success() {
            return Err(anyhow!("Gemini listModels error: {}", response.status()));
        }

        let parsed = response
            .json::<ListModelsResponse>()
            .await
            .context("Failed to parse listModels response")?;
        Ok(parsed.models.into_iter().map(|m| m.name).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn client_for(server: &Server) -> GeminiClient {
        let config = AssistantConfig {
            base_url: server.url(),
            ..AssistantConfig::default()
        };
        GeminiClient::new("test-key".to_string(), &config).unwrap()
    }

    #[tokio::test]
    async fn test_generate_joins_parts() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "contents": [{"parts": [{"text": "hello"}]}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"candidates": [{"content": {"parts": [{"text": "Hi, "}, {"text": "I'm ARYA."}], "role": "model"}}]}"#,
            )
            .create_async()
            .await;

        let text = client_for(&server).generate("hello").await.unwrap();
        assert_eq!(text, "Hi, I'm ARYA.");
    }

    #[tokio::test]
    async fn test_generate_404_is_model_not_found() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .with_status(404)
            .with_body(r#"{"error": {"code": 404, "message": "models/gemini-2.5-flash is not found"}}"#)
            .create_async()
            .await;

        let err = client_for(&server).generate("hello").await.unwrap_err();
        let not_found = err.downcast_ref::<ModelNotFound>().unwrap();
        assert_eq!(not_found.model, "gemini-2.5-flash");
    }

    #[tokio::test]
    async fn test_generate_without_candidates_is_an_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates": []}"#)
            .create_async()
            .await;

        let err = client_for(&server).generate("hello").await.unwrap_err();
        assert!(err.to_string().contains("no candidates"));
        assert!(err.downcast_ref::<ModelNotFound>().is_none());
    }

    #[tokio::test]
    async fn test_quota_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .with_status(429)
            .create_async()
            .await;

        let err = client_for(&server).generate("hello").await.unwrap_err();
        assert!(err.to_string().contains("quota"));
    }

    #[tokio::test]
    async fn test_list_models() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1beta/models")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"models": [{"name": "models/gemini-2.0-flash"}, {"name": "models/gemini-pro"}]}"#)
            .create_async()
            .await;

        let models = client_for(&server).list_models().await.unwrap();
        assert_eq!(models, vec!["models/gemini-2.0-flash", "models/gemini-pro"]);
    }
}
