use serde::Deserialize;
use tracing::debug;

use crate::models::Notification;

/// Wire shape pushed by the backend: a kind tag plus whichever payload
/// field that kind carries.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireEvent {
    kind: String,
    notification: Option<Notification>,
    id: Option<u64>,
}

/// A classified push event.
///
/// The wire `kind` is an open string set; this closes it into a total
/// union. Unknown kinds that carry a notification payload are treated as
/// ordinary new notifications so old clients keep working when the server
/// adds kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum PushEvent {
    /// A single new notification arrived.
    New(Notification),
    /// Something changed server-side in bulk; refetch instead of patching.
    BulkChange,
    /// The notification with this id was removed server-side.
    Deleted(u64),
}

impl PushEvent {
    /// Parse one newline-delimited JSON frame from the push transport.
    ///
    /// Returns `Ok(None)` for frames that decode but cannot be acted on
    /// (e.g. an unknown kind with no notification payload); those are
    /// dropped, not errors.
    pub fn parse_line(line: &str) -> serde_json::Result<Option<Self>> {
        let wire: WireEvent = serde_json::from_str(line)?;
        Ok(Self::from_wire(wire))
    }

    fn from_wire(wire: WireEvent) -> Option<Self> {
        match wire.kind.as_str() {
            "UPDATE_ALL" => Some(PushEvent::BulkChange),
            "DELETE" => match wire.id {
                Some(id) => Some(PushEvent::Deleted(id)),
                None => {
                    debug!("dropping DELETE push event without target id");
                    None
                }
            },
            // "UPDATE" and any future kind: a new notification, if one
            // was actually attached.
            kind => match wire.notification {
                Some(notification) => Some(PushEvent::New(notification)),
                None => {
                    debug!(kind, "dropping push event without notification payload");
                    None
                }
            },
        }
    }
}
