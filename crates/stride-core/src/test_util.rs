//! Shared test doubles: a scriptable `NotificationApi` and sample data.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::api::{NotificationApi, Page};
use crate::error::{Error, Result};
use crate::models::{Notification, NotificationKind, Sender};

pub fn sample_notification(id: u64, is_read: bool) -> Notification {
    Notification {
        id,
        kind: NotificationKind::WorkoutLike,
        content: format!("notification {id}"),
        sender: Sender {
            id: 1000 + id,
            display_name: format!("user{id}"),
            avatar_url: None,
        },
        is_read,
        created_at: DateTime::<Utc>::from_timestamp(1_754_000_000 + id as i64, 0).unwrap(),
        subject: None,
    }
}

pub fn page(ids: &[u64], next_cursor: Option<u64>) -> Page {
    Page {
        items: ids.iter().map(|&id| sample_notification(id, false)).collect(),
        next_cursor,
    }
}

/// Scriptable fetch collaborator.
///
/// Page responses are keyed by the cursor they answer, so interleaved
/// fetches (the reset-vs-load-more race) stay deterministic. A gate queued
/// for a cursor makes that fetch suspend until the test releases it.
#[derive(Default)]
pub struct FakeApi {
    pages: Mutex<HashMap<Option<u64>, VecDeque<Page>>>,
    page_failures: Mutex<HashMap<Option<u64>, usize>>,
    gates: Mutex<HashMap<Option<u64>, VecDeque<oneshot::Receiver<()>>>>,
    unread: Mutex<u64>,
    fail_mutations: Mutex<bool>,
    pub page_requests: Mutex<Vec<Option<u64>>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_page(&self, cursor: Option<u64>, page: Page) {
        self.pages.lock().entry(cursor).or_default().push_back(page);
    }

    /// The next fetch for `cursor` will suspend until the returned sender
    /// is dropped or triggered.
    pub fn gate_page(&self, cursor: Option<u64>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().entry(cursor).or_default().push_back(rx);
        tx
    }

    /// The next fetch for `cursor` fails with a server error.
    pub fn script_page_failure(&self, cursor: Option<u64>) {
        *self.page_failures.lock().entry(cursor).or_insert(0) += 1;
    }

    pub fn set_unread(&self, value: u64) {
        *self.unread.lock() = value;
    }

    pub fn fail_mutations(&self) {
        *self.fail_mutations.lock() = true;
    }

    pub fn recorded_calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn mutation(&self, name: &str) -> Result<()> {
        self.calls.lock().push(name.to_string());
        if *self.fail_mutations.lock() {
            return Err(Error::Api {
                status: 500,
                message: "scripted failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationApi for FakeApi {
    async fn fetch_page(&self, _limit: usize, cursor: Option<u64>) -> Result<Page> {
        self.page_requests.lock().push(cursor);

        let gate = self.gates.lock().get_mut(&cursor).and_then(VecDeque::pop_front);
        if let Some(gate) = gate {
            // Either release signal or a dropped sender unblocks the fetch.
            let _ = gate.await;
        }

        if let Some(remaining) = self.page_failures.lock().get_mut(&cursor) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(Error::Api {
                    status: 500,
                    message: "scripted fetch failure".to_string(),
                });
            }
        }

        Ok(self
            .pages
            .lock()
            .get_mut(&cursor)
            .and_then(VecDeque::pop_front)
            .unwrap_or(Page {
                items: Vec::new(),
                next_cursor: None,
            }))
    }

    async fn fetch_unread_count(&self) -> Result<u64> {
        self.calls.lock().push("unread_count".to_string());
        Ok(*self.unread.lock())
    }

    async fn mark_read(&self, ids: &[u64]) -> Result<()> {
        self.mutation(&format!("mark_read{ids:?}"))
    }

    async fn mark_all_read(&self) -> Result<()> {
        self.mutation("mark_all_read")
    }

    async fn delete_one(&self, id: u64) -> Result<()> {
        self.mutation(&format!("delete_one({id})"))
    }

    async fn delete_all(&self) -> Result<()> {
        self.mutation("delete_all")
    }
}
