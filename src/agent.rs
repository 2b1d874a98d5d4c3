//! Model invoker: one blocking chat-completions call, reply returned as raw
//! text. Tool capabilities (math, search) are declared on the request; the
//! reply content is still consumed as free text.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::ModelConfig;

#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("model request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("model API error {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("model reply had no message content")]
    EmptyReply,
}

/// Seam for the remote model so the pipeline is testable without network.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String, AgentError>;
}

pub struct OpenAiChatModel {
    http: reqwest::Client,
    cfg: ModelConfig,
}

impl OpenAiChatModel {
    pub fn new(cfg: ModelConfig) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { http, cfg }
    }

    /// Function tools advertised to the model. The pipeline never executes
    /// tool calls itself; a reply that is not plain text is an empty reply.
    fn tool_declarations() -> Value {
        json!([
            {
                "type": "function",
                "function": {
                    "name": "evaluate_expression",
                    "description": "Evaluate a basic arithmetic expression.",
                    "parameters": {
                        "type": "object",
                        "properties": {
                            "expression": { "type": "string" }
                        },
                        "required": ["expression"]
                    }
                }
            },
            {
                "type": "function",
                "function": {
                    "name": "web_search",
                    "description": "Search the web for a short query.",
                    "parameters": {
                        "type": "object",
                        "properties": {
                            "query": { "type": "string" }
                        },
                        "required": ["query"]
                    }
                }
            }
        ])
    }
}

#[async_trait]
impl ChatModel for OpenAiChatModel {
    async fn complete(&self, system: &str, user: &str) -> Result<String, AgentError> {
        #[derive(Deserialize)]
        struct Resp {
            choices: Vec<Choice>,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: ChoiceMsg,
        }
        #[derive(Deserialize)]
        struct ChoiceMsg {
            content: Option<String>,
        }

        let body = json!({
            "model": self.cfg.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user }
            ],
            "temperature": self.cfg.temperature,
            "tools": Self::tool_declarations(),
            "stream": false
        });

        let url = format!(
            "{}/chat/completions",
            self.cfg.api_url.trim_end_matches('/')
        );
        debug!(%url, model = %self.cfg.model, "sending model request");

        let mut req = self.http.post(&url).json(&body);
        if !self.cfg.api_key.is_empty() {
            req = req.bearer_auth(&self.cfg.api_key);
        }

        let resp = req.send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            warn!(%status, "model API rejected request");
            return Err(AgentError::Api { status, body });
        }

        let parsed: Resp = resp.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        if content.trim().is_empty() {
            return Err(AgentError::EmptyReply);
        }
        Ok(content)
    }
}

/// Canned-reply model for tests and local dry runs.
#[derive(Clone)]
pub struct FixedReplyModel {
    pub reply: String,
}

#[async_trait]
impl ChatModel for FixedReplyModel {
    async fn complete(&self, _system: &str, _user: &str) -> Result<String, AgentError> {
        Ok(self.reply.clone())
    }
}
