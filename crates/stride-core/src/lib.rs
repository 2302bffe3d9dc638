pub mod api;
pub mod error;
pub mod feed;
pub mod models;
pub mod push;

#[cfg(test)]
pub(crate) mod test_util;

pub use api::{HttpNotificationApi, NotificationApi, Page};
pub use error::{Error, Result};
pub use feed::{FeedSnapshot, ListingScope, NotificationFeed};
pub use models::{Notification, NotificationKind, Sender, SubjectRef};
pub use push::{PushEvent, PushHub, PushSubscription, SocketPushClient};
