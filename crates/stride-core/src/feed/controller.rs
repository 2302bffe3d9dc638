use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::merge::{merge, MergeMode};
use super::pagination::{CursorState, PageOutcome, PageRequest};
use super::reducer::{reduce, CollectionDelta, CountAction, PushEffects};
use super::unread::UnreadCount;
use crate::api::NotificationApi;
use crate::error::Result;
use crate::models::Notification;
use crate::push::PushEvent;

/// Which listing a feed instance backs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingScope {
    /// The full notifications page: read items stay visible.
    All,
    /// The dropdown: only unread items; marking read removes them.
    UnreadOnly,
}

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    pub items: Vec<Notification>,
    pub unread: u64,
    pub loading: bool,
    pub has_more: bool,
}

struct FeedState {
    items: Vec<Notification>,
    unread: UnreadCount,
    cursor: CursorState,
}

/// Canonical owner of one listing session's collection, unread count, and
/// cursor state.
///
/// Merges three writers into one consistent view: cursor-paginated fetches,
/// push events, and optimistic local mutations. State lives behind a mutex
/// that is never held across an await; fetch I/O runs between a capture
/// section (which flips the in-flight guard) and an apply section (which
/// discards results a reset has superseded).
pub struct NotificationFeed {
    api: Arc<dyn NotificationApi>,
    scope: ListingScope,
    page_size: usize,
    state: Mutex<FeedState>,
}

impl NotificationFeed {
    pub fn new(api: Arc<dyn NotificationApi>, scope: ListingScope, page_size: usize) -> Self {
        Self {
            api,
            scope,
            page_size,
            state: Mutex::new(FeedState {
                items: Vec::new(),
                unread: UnreadCount::new(),
                cursor: CursorState::new(),
            }),
        }
    }

    /// Full reload: clears the collection, resets pagination, fetches
    /// page 1. Also the manual retry path after a fetch failure.
    pub async fn load_initial(&self) -> Result<()> {
        let request = {
            let mut state = self.state.lock();
            state.items.clear();
            match state.cursor.begin_request(true) {
                Some(request) => request,
                None => return Ok(()),
            }
        };
        self.run_fetch(request, MergeMode::Replace).await
    }

    /// Fetch the next page. Returns false without issuing a request when a
    /// fetch is already in flight or the listing is exhausted.
    pub async fn load_more(&self) -> Result<bool> {
        let request = {
            let mut state = self.state.lock();
            match state.cursor.begin_request(false) {
                Some(request) => request,
                None => return Ok(false),
            }
        };
        self.run_fetch(request, MergeMode::Append).await?;
        Ok(true)
    }

    /// Input hook for the infinite-scroll sentinel. The visibility signal
    /// can fire repeatedly per scroll frame; the cursor state decides
    /// whether a fetch is actually warranted.
    pub async fn notify_sentinel_visible(&self) -> Result<bool> {
        if !self.state.lock().cursor.should_fetch_more(self.page_size) {
            return Ok(false);
        }
        self.load_more().await
    }

    /// Apply one push event, in arrival order.
    pub async fn on_push(&self, event: PushEvent) -> Result<()> {
        let PushEffects { collection, count } = reduce(event);
        match collection {
            CollectionDelta::Prepend(notification) => {
                let mut state = self.state.lock();
                if state.items.iter().any(|n| n.id == notification.id) {
                    // Already known from a fetch; keep its position and
                    // count, the server told us nothing new.
                    debug!(id = notification.id, "push duplicate of loaded notification");
                } else {
                    state.items =
                        merge(&state.items, std::slice::from_ref(&notification), MergeMode::Prepend);
                    if count == CountAction::Increment {
                        state.unread.increment();
                    }
                }
                Ok(())
            }
            CollectionDelta::Remove(id) => {
                self.state.lock().items.retain(|n| n.id != id);
                match count {
                    CountAction::Reconcile => self.reconcile_unread().await,
                    CountAction::Increment => Ok(()),
                }
            }
            // `refresh` covers the Reconcile action alongside the refetch.
            CollectionDelta::Refresh => self.refresh().await,
        }
    }

    /// Push-triggered full refresh: reset refetch of page 1 plus a count
    /// reconciliation. Unlike `load_initial` the current items stay on
    /// screen until the replacement page lands.
    async fn refresh(&self) -> Result<()> {
        let request = {
            let mut state = self.state.lock();
            match state.cursor.begin_request(true) {
                Some(request) => request,
                None => return Ok(()),
            }
        };
        let page = self.run_fetch(request, MergeMode::Replace).await;
        let count = self.reconcile_unread().await;
        page.and(count)
    }

    /// Overwrite the local unread count with the server's.
    pub async fn reconcile_unread(&self) -> Result<()> {
        let count = self.api.fetch_unread_count().await?;
        self.state.lock().unread.reconcile(count);
        Ok(())
    }

    /// Optimistically mark the given ids read, then confirm with the
    /// backend. The optimistic state is not rolled back on failure; the
    /// next reconciling fetch corrects any divergence.
    pub async fn mark_read(&self, ids: &[u64]) -> Result<()> {
        {
            let mut state = self.state.lock();
            let mut newly_read = 0u64;
            for item in state.items.iter_mut().filter(|n| ids.contains(&n.id)) {
                if !item.is_read {
                    item.is_read = true;
                    newly_read += 1;
                }
            }
            state.unread.decrement_clamped(newly_read);
            if self.scope == ListingScope::UnreadOnly {
                state.items.retain(|n| !ids.contains(&n.id));
            }
        }

        if let Err(err) = self.api.mark_read(ids).await {
            warn!(%err, "mark-read confirmation failed; keeping optimistic state");
            return Err(err);
        }
        Ok(())
    }

    /// Optimistically mark everything read and zero the count, then confirm.
    pub async fn mark_all_read(&self) -> Result<()> {
        {
            let mut state = self.state.lock();
            match self.scope {
                ListingScope::All => {
                    for item in &mut state.items {
                        item.is_read = true;
                    }
                }
                ListingScope::UnreadOnly => state.items.clear(),
            }
            state.unread.reset(0);
        }

        if let Err(err) = self.api.mark_all_read().await {
            warn!(%err, "mark-all-read confirmation failed; keeping optimistic state");
            return Err(err);
        }
        Ok(())
    }

    /// Optimistically remove one notification. Re-deleting an absent id is
    /// a no-op: nothing changes locally and no confirmation is sent.
    pub async fn delete_one(&self, id: u64) -> Result<()> {
        let was_present = {
            let mut state = self.state.lock();
            let was_unread = state
                .items
                .iter()
                .find(|n| n.id == id)
                .map(|n| !n.is_read);
            state.items.retain(|n| n.id != id);
            if was_unread == Some(true) {
                state.unread.decrement_clamped(1);
            }
            was_unread.is_some()
        };
        if !was_present {
            return Ok(());
        }

        if let Err(err) = self.api.delete_one(id).await {
            warn!(%err, id, "delete confirmation failed; keeping optimistic state");
            return Err(err);
        }
        Ok(())
    }

    /// Optimistically clear the whole listing and mark it exhausted, then
    /// confirm.
    pub async fn delete_all(&self) -> Result<()> {
        {
            let mut state = self.state.lock();
            state.items.clear();
            state.unread.reset(0);
            state.cursor.mark_exhausted();
        }

        if let Err(err) = self.api.delete_all().await {
            warn!(%err, "delete-all confirmation failed; keeping optimistic state");
            return Err(err);
        }
        Ok(())
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        let state = self.state.lock();
        FeedSnapshot {
            items: state.items.clone(),
            unread: state.unread.get(),
            loading: state.cursor.is_fetching(),
            has_more: state.cursor.has_more(),
        }
    }

    pub fn unread_count(&self) -> u64 {
        self.state.lock().unread.get()
    }

    pub fn has_more(&self) -> bool {
        self.state.lock().cursor.has_more()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().cursor.is_fetching()
    }

    /// Issue the captured fetch, then apply it unless a reset superseded
    /// it while it was in flight.
    async fn run_fetch(&self, request: PageRequest, mode: MergeMode) -> Result<()> {
        let fetched = self.api.fetch_page(self.page_size, request.cursor).await;

        let mut state = self.state.lock();
        match fetched {
            Ok(page) => {
                let applied = state.cursor.complete_request(
                    request,
                    PageOutcome::Success {
                        next_cursor: page.next_cursor,
                        received: page.items.len(),
                    },
                );
                if applied {
                    state.items = merge(&state.items, &page.items, mode);
                } else {
                    debug!(cursor = ?request.cursor, "discarding page superseded by reset");
                }
                Ok(())
            }
            Err(err) => {
                let applied = state.cursor.complete_request(request, PageOutcome::Failure);
                if applied {
                    warn!(%err, cursor = ?request.cursor, "page fetch failed; pagination closed");
                }
                Err(err)
            }
        }
    }
}
