use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{collections::VecDeque, sync::Arc};
use tokio::sync::Mutex;

pub const FEED_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
}

impl Notice {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Info)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedEntry {
    pub id: u64,
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub notice: Notice,
}

#[derive(Debug)]
struct FeedInner {
    next_id: u64,
    entries: VecDeque<FeedEntry>,
}

/// Notices raised outside a request (timers, startup) for the page to poll.
#[derive(Debug, Clone)]
pub struct NotificationFeed {
    inner: Arc<Mutex<FeedInner>>,
}

impl Default for NotificationFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationFeed {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FeedInner {
                next_id: 1,
                entries: VecDeque::with_capacity(FEED_CAPACITY),
            })),
        }
    }

    pub async fn publish(&self, notice: Notice) -> u64 {
        let mut inner = self.inner.lock().await;
        let id = inner.next_id;
        inner.next_id += 1;
        if inner.entries.len() == FEED_CAPACITY {
            inner.entries.pop_front();
        }
        inner.entries.push_back(FeedEntry {
            id,
            at: Utc::now(),
            notice,
        });
        id
    }

    pub async fn publish_all(&self, notices: impl IntoIterator<Item = Notice>) {
        for notice in notices {
            self.publish(notice).await;
        }
    }

    /// Entries with an id strictly greater than `after`, oldest first.
    pub async fn since(&self, after: u64) -> Vec<FeedEntry> {
        let inner = self.inner.lock().await;
        inner
            .entries
            .iter()
            .filter(|entry| entry.id > after)
            .cloned()
            .collect()
    }
}

pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        12..=16 => "Good afternoon",
        17.. => "Good evening",
        _ => "Good morning",
    }
}

pub fn welcome_notice(hour: u32) -> Notice {
    Notice::success(format!(
        "{}! Ready to achieve your health goals today?",
        greeting_for_hour(hour)
    ))
}
