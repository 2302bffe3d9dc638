pub mod controller;
pub mod merge;
pub mod pagination;
pub mod reducer;
pub mod unread;

pub use controller::{FeedSnapshot, ListingScope, NotificationFeed};
pub use merge::{merge, MergeMode};
pub use pagination::{CursorState, LastRequest, PageOutcome, PageRequest};
pub use reducer::{reduce, CollectionDelta, CountAction, PushEffects};
pub use unread::UnreadCount;
