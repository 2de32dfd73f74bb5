use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::error::LlmError;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    top_p: f32,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

/// Thin client over the Ollama REST API.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    config: LlmConfig,
}

impl OllamaClient {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|source| LlmError::Http {
                url: config.url.clone(),
                source,
            })?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Run a single non-streaming completion and return the generated text.
    pub async fn generate(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.config.url.trim_end_matches('/'));
        let body = GenerateRequest {
            model: &self.config.model,
            prompt: full_prompt(system, prompt),
            stream: false,
            options: GenerateOptions {
                temperature: self.config.temperature,
                top_p: self.config.top_p,
                num_predict: self.config.num_predict,
            },
        };

        tracing::debug!(%url, model = %self.config.model, "sending generate request");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|source| LlmError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let data: GenerateResponse = response
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

        data.response
            .ok_or_else(|| LlmError::MalformedResponse("missing 'response' field".to_string()))
    }

    /// Names of the models installed on the server.
    pub async fn list_models(&self) -> Result<Vec<String>, LlmError> {
        let url = format!("{}/api/tags", self.config.url.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| LlmError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

/// Gemma-style single-turn prompt with the system context prepended.
pub fn full_prompt(system: &str, prompt: &str) -> String {
    format!("{}\n\nUser: {}\n\nAssistant:", system, prompt)
}

/// First installed model matching the preference list.
///
/// Installed models are checked in server order; a model matches
/// when either name contains the other, so `gemma3:4b` matches
/// `gemma3:4b-instruct`.
pub fn recommend_model<'a>(available: &'a [String], preferred: &[String]) -> Option<&'a str> {
    available
        .iter()
        .filter(|name| !name.is_empty())
        .find(|name| {
            preferred
                .iter()
                .any(|p| name.contains(p.as_str()) || p.contains(name.as_str()))
        })
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_prompt_layout() {
        assert_eq!(
            full_prompt("You are an expert.", "Hi"),
            "You are an expert.\n\nUser: Hi\n\nAssistant:"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateRequest {
            model: "gemma3:4b",
            prompt: full_prompt("sys", "q"),
            stream: false,
            options: GenerateOptions {
                temperature: 0.5,
                top_p: 0.75,
                num_predict: 500,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gemma3:4b");
        assert_eq!(json["stream"], false);
        assert_eq!(json["options"]["num_predict"], 500);
        assert_eq!(json["options"]["top_p"], 0.75);
    }

    #[test]
    fn test_parse_tags() {
        let tags: TagsResponse = serde_json::from_str(
            r#"{"models":[{"name":"llama3.2:3b","size":1},{"name":"phi3:mini"}]}"#,
        )
        .unwrap();
        let names: Vec<_> = tags.models.into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["llama3.2:3b", "phi3:mini"]);
    }

    #[test]
    fn test_recommend_model() {
        let preferred = LlmConfig::default().preferred_models;
        let available = vec!["phi3:mini".to_string(), "gemma3:4b-it-qat".to_string()];
        assert_eq!(recommend_model(&available, &preferred), Some("gemma3:4b-it-qat"));

        let none = vec!["phi3:mini".to_string()];
        assert_eq!(recommend_model(&none, &preferred), None);
    }

    #[test]
    fn test_client_builds_from_default_config() {
        let client = OllamaClient::new(LlmConfig::default()).unwrap();
        assert_eq!(client.model(), "gemma3:4b");
    }
}
