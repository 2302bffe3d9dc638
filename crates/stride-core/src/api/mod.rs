pub mod http;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Result;
use crate::models::Notification;

pub use http::HttpNotificationApi;

/// One page of the cursor-paginated notification listing.
///
/// `next_cursor == None` means the listing is exhausted past this page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub items: Vec<Notification>,
    pub next_cursor: Option<u64>,
}

/// The REST surface the feed depends on.
///
/// Injected into every `NotificationFeed` so tests can script responses;
/// `HttpNotificationApi` is the production implementation. Mutation calls
/// confirm optimistic local edits and return no payload on success.
#[async_trait]
pub trait NotificationApi: Send + Sync {
    async fn fetch_page(&self, limit: usize, cursor: Option<u64>) -> Result<Page>;

    /// Authoritative unread count, used to reconcile the local tracker.
    async fn fetch_unread_count(&self) -> Result<u64>;

    async fn mark_read(&self, ids: &[u64]) -> Result<()>;

    async fn mark_all_read(&self) -> Result<()>;

    async fn delete_one(&self, id: u64) -> Result<()>;

    async fn delete_all(&self) -> Result<()>;
}
