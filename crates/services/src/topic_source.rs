use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::TopicSourceError;

/// Raw topic payload as returned by the remote source: an ordered pair of
/// title and body with no durable identity beyond its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTopic {
    pub title: String,
    pub body: String,
}

/// The remote list-topics operation.
///
/// Implementations return an ordered sequence of raw pairs; the wire format
/// behind it is the source's concern, not the core's.
#[async_trait]
pub trait TopicSource: Send + Sync {
    /// List topics from the remote source.
    ///
    /// # Errors
    ///
    /// Returns `TopicSourceError` on transport, status, or parse failures.
    async fn list_topics(&self) -> Result<Vec<RawTopic>, TopicSourceError>;
}

#[derive(Clone, Debug)]
pub struct TopicSourceConfig {
    pub base_url: String,
    pub limit: u32,
}

impl TopicSourceConfig {
    /// Read configuration from the environment, falling back to
    /// JSONPlaceholder with a five-post page.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env::var("LEARN_TOPICS_BASE_URL")
            .unwrap_or_else(|_| "https://jsonplaceholder.typicode.com".into());
        let limit = env::var("LEARN_TOPICS_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);
        Self { base_url, limit }
    }
}

impl Default for TopicSourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://jsonplaceholder.typicode.com".into(),
            limit: 5,
        }
    }
}

/// HTTP-backed topic source.
#[derive(Clone)]
pub struct HttpTopicSource {
    client: Client,
    config: TopicSourceConfig,
}

impl HttpTopicSource {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(TopicSourceConfig::from_env())
    }

    #[must_use]
    pub fn new(config: TopicSourceConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl TopicSource for HttpTopicSource {
    async fn list_topics(&self) -> Result<Vec<RawTopic>, TopicSourceError> {
        let url = format!("{}/posts", self.config.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(url)
            .query(&[("_limit", self.config.limit)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TopicSourceError::HttpStatus(response.status()));
        }

        let posts: Vec<PostDto> = response.json().await?;
        Ok(posts
            .into_iter()
            .map(|post| RawTopic {
                title: post.title,
                body: post.body,
            })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct PostDto {
    title: String,
    body: String,
}
