//! Client for the external comment store (a Supabase-style hosted REST
//! table). Comments are keyed by the three-segment unit path. The store
//! is optional: when unconfigured or unreachable the comment section
//! renders nothing, and no failure here may abort page rendering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{SiteError, SiteResult};

pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "snake_case"))]
pub struct Comment {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub author_name: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct NewComment<'a> {
    unit_path: &'a str,
    content: &'a str,
    author_name: &'a str,
}

#[derive(Debug, Clone)]
pub struct CommentStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl CommentStore {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key: api_key.into(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/comments", self.base_url)
    }

    /// Comments for a unit path, ordered by creation time. Any transport
    /// or decode failure is logged and surfaces as an empty list.
    pub async fn fetch(&self, unit_path: &str) -> Vec<Comment> {
        let filter = format!("eq.{unit_path}");
        let result = self
            .client
            .get(self.table_url())
            .query(&[
                ("select", "*"),
                ("unit_path", filter.as_str()),
                ("order", "created_at.asc"),
            ])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await;
        match result {
            Ok(response) => match response.error_for_status() {
                Ok(response) => response.json::<Vec<Comment>>().await.unwrap_or_else(|error| {
                    tracing::warn!("failed to decode comments for {unit_path}: {error}");
                    Vec::new()
                }),
                Err(error) => {
                    tracing::warn!("comment store rejected fetch for {unit_path}: {error}");
                    Vec::new()
                }
            },
            Err(error) => {
                tracing::warn!("comment store unreachable fetching {unit_path}: {error}");
                Vec::new()
            }
        }
    }

    /// Inserts one comment row. A blank author becomes [`ANONYMOUS_AUTHOR`].
    /// Content is passed through untouched; validation and rate limiting
    /// belong to the store.
    pub async fn insert(
        &self,
        unit_path: &str,
        content: &str,
        author_name: Option<&str>,
    ) -> SiteResult<()> {
        let author = match author_name.map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => ANONYMOUS_AUTHOR,
        };
        let row = NewComment {
            unit_path,
            content,
            author_name: author,
        };
        let response = self
            .client
            .post(self.table_url())
            .header("apikey", &self.api_key)
            .header("Prefer", "return=minimal")
            .bearer_auth(&self.api_key)
            .json(&row)
            .send()
            .await
            .map_err(|error| SiteError::Internal(format!("comment store unreachable: {error}")))?;
        response
            .error_for_status()
            .map_err(|error| SiteError::Internal(format!("comment insert rejected: {error}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_camel_case_for_the_api() {
        let comment = Comment {
            id: "c1".to_string(),
            created_at: "2026-01-02T03:04:05Z".parse().expect("timestamp"),
            author_name: "Ada".to_string(),
            content: "hi".to_string(),
        };
        let json = serde_json::to_value(&comment).expect("serialize");
        assert_eq!(json["authorName"], "Ada");
        assert_eq!(json["createdAt"], "2026-01-02T03:04:05Z");
    }

    #[test]
    fn deserializes_store_rows_in_snake_case() {
        let raw = r#"{
            "id": "7",
            "created_at": "2026-01-02T03:04:05Z",
            "author_name": "Anonymous",
            "content": "first"
        }"#;
        let comment: Comment = serde_json::from_str(raw).expect("deserialize");
        assert_eq!(comment.author_name, "Anonymous");
        assert_eq!(comment.content, "first");
    }

    #[test]
    fn store_url_trims_trailing_slash() {
        let store = CommentStore::new("https://db.example.com/", "key");
        assert_eq!(store.table_url(), "https://db.example.com/rest/v1/comments");
    }
}
