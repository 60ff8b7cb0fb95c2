//! OpenAI-compatible embeddings over HTTP, including Azure OpenAI
//! deployments. Retries with exponential backoff before giving up.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use mnemo_core::config::{defaults, EmbeddingConfig, EmbeddingProviderKind};
use mnemo_core::errors::{EmbeddingError, MnemoResult};
use mnemo_core::traits::EmbeddingProvider;

/// Wire dialect: where the request goes and how it authenticates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpFlavor {
    /// `POST {base}/embeddings`, `Authorization: Bearer`.
    OpenAi { base_url: String },
    /// `POST {endpoint}/openai/deployments/{deployment}/embeddings?api-version=..`,
    /// `api-key` header.
    Azure {
        endpoint: String,
        deployment: String,
        api_version: String,
    },
}

impl HttpFlavor {
    pub fn url(&self) -> String {
        match self {
            Self::OpenAi { base_url } => {
                let base = base_url.trim_end_matches('/');
                if base.ends_with("/embeddings") {
                    base.to_string()
                } else {
                    format!("{base}/embeddings")
                }
            }
            Self::Azure {
                endpoint,
                deployment,
                api_version,
            } => format!(
                "{}/openai/deployments/{deployment}/embeddings?api-version={api_version}",
                endpoint.trim_end_matches('/')
            ),
        }
    }
}

pub struct HttpEmbeddingProvider {
    client: reqwest::Client,
    flavor: HttpFlavor,
    api_key: String,
    model: String,
    dimensions: usize,
    max_retries: u32,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    embedding: Vec<f32>,
    #[serde(default)]
    index: usize,
}

impl HttpEmbeddingProvider {
    pub fn new(flavor: HttpFlavor, api_key: String, model: String, dimensions: usize) -> Self {
        Self {
            client: reqwest::Client::new(),
            flavor,
            api_key,
            model,
            dimensions,
            max_retries: 2,
        }
    }

    /// Build from config. Fails when a required field is missing.
    pub fn from_config(config: &EmbeddingConfig) -> MnemoResult<Self> {
        let missing = |field: &str| EmbeddingError::ProviderUnavailable {
            provider: format!("{:?}: missing {field}", config.provider),
        };
        let api_key = config.api_key.clone().ok_or_else(|| missing("api_key"))?;

        let flavor = match config.provider {
            EmbeddingProviderKind::Azure => HttpFlavor::Azure {
                endpoint: config.endpoint.clone().ok_or_else(|| missing("endpoint"))?,
                deployment: config.deployment.clone().ok_or_else(|| missing("deployment"))?,
                api_version: config.api_version.clone(),
            },
            _ => HttpFlavor::OpenAi {
                base_url: config
                    .endpoint
                    .clone()
                    .unwrap_or_else(|| defaults::DEFAULT_OPENAI_ENDPOINT.to_string()),
            },
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| EmbeddingError::ProviderUnavailable {
                provider: format!("http client: {e}"),
            })?;

        Ok(Self {
            client,
            flavor,
            api_key,
            model: config.model.clone(),
            dimensions: config.dimensions,
            max_retries: 2,
        })
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    async fn send(&self, texts: &[String]) -> MnemoResult<Vec<Vec<f32>>> {
        let request = self.client.post(self.flavor.url()).json(&EmbedRequest {
            model: &self.model,
            input: texts,
        });
        let request = match &self.flavor {
            HttpFlavor::OpenAi { .. } => request.bearer_auth(&self.api_key),
            HttpFlavor::Azure { .. } => request.header("api-key", &self.api_key),
        };

        let inference = |reason: String| EmbeddingError::InferenceFailed { reason };
        let response = request
            .send()
            .await
            .map_err(|e| inference(e.to_string()))?
            .error_for_status()
            .map_err(|e| inference(e.to_string()))?
            .json::<EmbedResponse>()
            .await
            .map_err(|e| inference(format!("bad response body: {e}")))?;

        decode_response(response, texts.len(), self.dimensions)
    }
}

/// Order by `index`, check count and length.
fn decode_response(
    mut response: EmbedResponse,
    expected_count: usize,
    dimensions: usize,
) -> MnemoResult<Vec<Vec<f32>>> {
    if response.data.len() != expected_count {
        return Err(EmbeddingError::InferenceFailed {
            reason: format!(
                "expected {expected_count} embeddings, got {}",
                response.data.len()
            ),
        }
        .into());
    }
    response.data.sort_by_key(|d| d.index);
    response
        .data
        .into_iter()
        .map(|d| -> MnemoResult<Vec<f32>> {
            if d.embedding.len() == dimensions {
                Ok(d.embedding)
            } else {
                Err(EmbeddingError::DimensionMismatch {
                    expected: dimensions,
                    actual: d.embedding.len(),
                }
                .into())
            }
        })
        .collect()
}

#[async_trait]
impl EmbeddingProvider for HttpEmbeddingProvider {
    async fn embed(&self, text: &str) -> MnemoResult<Vec<f32>> {
        let mut batch = self.embed_batch(&[text.to_string()]).await?;
        batch.pop().ok_or_else(|| {
            EmbeddingError::InferenceFailed {
                reason: "empty embedding response".to_string(),
            }
            .into()
        })
    }

    async fn embed_batch(&self, texts: &[String]) -> MnemoResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let mut last_err = None;
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = Duration::from_millis(100 * 2u64.pow(attempt - 1));
                tokio::time::sleep(delay).await;
                debug!(attempt, "retrying embedding request");
            }
            match self.send(texts).await {
                Ok(vectors) => return Ok(vectors),
                Err(e) => {
                    warn!(attempt, provider = self.name(), error = %e, "embedding request failed");
                    last_err = Some(e);
                }
            }
        }
        Err(last_err.unwrap_or_else(|| {
            EmbeddingError::InferenceFailed {
                reason: "all retries exhausted".to_string(),
            }
            .into()
        }))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        match self.flavor {
            HttpFlavor::OpenAi { .. } => "openai",
            HttpFlavor::Azure { .. } => "azure-openai",
        }
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }
}
