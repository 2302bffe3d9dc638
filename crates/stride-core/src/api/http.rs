use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::{NotificationApi, Page};
use crate::error::{Error, Result};

/// Production `NotificationApi` backed by the backend's REST endpoints.
#[derive(Clone)]
pub struct HttpNotificationApi {
    base_url: String,
    auth_token: Option<String>,
    client: reqwest::Client,
}

impl HttpNotificationApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_token: None,
            client: reqwest::Client::builder().build()?,
        })
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn expect_success(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(Error::Api {
            status: status.as_u16(),
            message: parse_api_error(status, &body),
        })
    }
}

#[async_trait]
impl NotificationApi for HttpNotificationApi {
    async fn fetch_page(&self, limit: usize, cursor: Option<u64>) -> Result<Page> {
        let mut request = self
            .client
            .get(self.url("/notifications"))
            .query(&[("limit", limit.to_string())]);
        if let Some(cursor) = cursor {
            request = request.query(&[("cursor", cursor.to_string())]);
        }
        debug!(limit, ?cursor, "fetching notification page");
        let response = Self::expect_success(self.authorize(request).send().await?).await?;
        Ok(response.json::<Page>().await?)
    }

    async fn fetch_unread_count(&self) -> Result<u64> {
        let request = self.client.get(self.url("/notifications/unread-count"));
        let response = Self::expect_success(self.authorize(request).send().await?).await?;
        Ok(response.json::<CountResponse>().await?.count)
    }

    async fn mark_read(&self, ids: &[u64]) -> Result<()> {
        let request = self
            .client
            .post(self.url("/notifications/mark-read"))
            .json(&json!({ "ids": ids }));
        Self::expect_success(self.authorize(request).send().await?).await?;
        Ok(())
    }

    async fn mark_all_read(&self) -> Result<()> {
        let request = self.client.post(self.url("/notifications/mark-all-read"));
        Self::expect_success(self.authorize(request).send().await?).await?;
        Ok(())
    }

    async fn delete_one(&self, id: u64) -> Result<()> {
        let request = self.client.delete(self.url(&format!("/notifications/{id}")));
        Self::expect_success(self.authorize(request).send().await?).await?;
        Ok(())
    }

    async fn delete_all(&self) -> Result<()> {
        let request = self.client.delete(self.url("/notifications"));
        Self::expect_success(self.authorize(request).send().await?).await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct CountResponse {
    count: u64,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
    message: Option<String>,
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(message) = payload.message.or(payload.error) {
            return message.trim().to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let api = HttpNotificationApi::new("https://api.example.com/").unwrap();
        assert_eq!(api.url("/notifications"), "https://api.example.com/notifications");
    }

    #[test]
    fn api_error_prefers_structured_message() {
        let status = StatusCode::UNPROCESSABLE_ENTITY;
        let parsed = parse_api_error(status, r#"{"message": "unknown cursor"}"#);
        assert_eq!(parsed, "unknown cursor");
    }

    #[test]
    fn api_error_falls_back_to_body_then_status() {
        let status = StatusCode::BAD_GATEWAY;
        assert_eq!(parse_api_error(status, "upstream down"), "upstream down");
        assert_eq!(parse_api_error(status, "  "), "HTTP 502");
    }
}
