use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a notification is about.
///
/// `Other` catches kind strings this client does not know yet; the server
/// adds kinds without a client release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    Comment,
    Reply,
    WorkoutLike,
    CommentLike,
    Follow,
    #[serde(untagged)]
    Other(String),
}

/// Who triggered the notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sender {
    pub id: u64,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Navigation target carried by some notifications.
/// Opaque to the feed core; only the router looks inside.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<u64>,
}

/// A single notification as delivered by the backend.
///
/// `id` is unique and monotonically issued by the server; it is the dedup
/// key everywhere. `is_read` is server-authoritative, flipped optimistically
/// by local mark-read mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub content: String,
    pub sender: Sender,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<SubjectRef>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_full_notification() {
        let value = json!({
            "id": 42,
            "kind": "COMMENT",
            "content": "Ann commented on your workout",
            "sender": {
                "id": 7,
                "displayName": "Ann",
                "avatarUrl": "https://cdn.example.com/a/7.png"
            },
            "isRead": false,
            "createdAt": "2026-08-01T09:30:00Z",
            "subject": { "workoutId": 311, "commentId": 95 }
        });

        let n: Notification = serde_json::from_value(value).unwrap();
        assert_eq!(n.id, 42);
        assert_eq!(n.kind, NotificationKind::Comment);
        assert_eq!(n.sender.display_name, "Ann");
        assert!(!n.is_read);
        assert_eq!(n.subject.unwrap().workout_id, Some(311));
    }

    #[test]
    fn parses_without_optional_fields() {
        let value = json!({
            "id": 1,
            "kind": "FOLLOW",
            "content": "Bo started following you",
            "sender": { "id": 2, "displayName": "Bo" },
            "isRead": true,
            "createdAt": "2026-08-01T09:30:00Z"
        });

        let n: Notification = serde_json::from_value(value).unwrap();
        assert_eq!(n.kind, NotificationKind::Follow);
        assert_eq!(n.sender.avatar_url, None);
        assert_eq!(n.subject, None);
    }

    #[test]
    fn unknown_kind_falls_back_to_other() {
        let kind: NotificationKind = serde_json::from_value(json!("GROUP_INVITE")).unwrap();
        assert_eq!(kind, NotificationKind::Other("GROUP_INVITE".to_string()));
    }
}
