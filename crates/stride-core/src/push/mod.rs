pub mod event;
pub mod hub;
pub mod socket;

pub use event::PushEvent;
pub use hub::{PushHub, PushSubscription};
pub use socket::SocketPushClient;
